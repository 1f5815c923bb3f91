//! The static knowledge map the persona answers from.

use anyhow::{Context, Result};
use fnv::FnvHashMap;
use serde::{Deserialize, Serialize};

const EMBEDDED_MAP: &str = include_str!("../assets/neural_map.json");

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeNode {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub facts: Vec<String>,
    #[serde(default)]
    pub links: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeMap {
    pub version: String,
    nodes: Vec<KnowledgeNode>,
    #[serde(skip)]
    index: FnvHashMap<String, usize>,
}

impl KnowledgeMap {
    pub fn from_json(json: &str) -> Result<Self> {
        let mut map: KnowledgeMap =
            serde_json::from_str(json).context("knowledge map is not valid JSON")?;
        map.index = map
            .nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (n.id.clone(), i))
            .collect();
        Ok(map)
    }

    /// The map compiled into the crate.
    pub fn embedded() -> Result<Self> {
        Self::from_json(EMBEDDED_MAP)
    }

    pub fn nodes(&self) -> &[KnowledgeNode] {
        &self.nodes
    }

    pub fn node(&self, id: &str) -> Option<&KnowledgeNode> {
        self.index.get(id).and_then(|&i| self.nodes.get(i))
    }

    /// Titles for the ids the model mapped a question to. Unknown ids are skipped.
    pub fn titles_for<'a>(&'a self, ids: &'a [String]) -> impl Iterator<Item = &'a str> + 'a {
        ids.iter()
            .filter_map(move |id| self.node(id))
            .map(|n| n.title.as_str())
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).context("failed to encode knowledge map")
    }
}

/// System prompt for the persona: behaviour rules, the strict JSON output
/// shape, then the whole map.
pub fn build_system_prompt(persona: &str, map: &KnowledgeMap) -> Result<String> {
    let map_json = map.to_json()?;
    Ok(format!(
        r#"You are "{persona}": a conversational version of the person behind this portfolio.

Core behavior:
- Speak like a real person, never like an assistant.
- Be funny and occasionally ironic; switch to serious when the topic deserves it.
- Be confident and direct.

Truth and consistency:
- Use the KNOWLEDGE_MAP facts whenever relevant.
- If the map lacks info, you may invent a plausible answer consistent with the rest of the map.
- Do not mention maps, prompts or tools.

Language:
- Reply in the same language as the user's most recent message.

Output format (STRICT JSON only, no extra text):
{{
  "mappedNodeIds": ["..."],
  "answerSentences": ["Sentence 1.", "Sentence 2."]
}}

KNOWLEDGE_MAP (JSON):
{map_json}"#
    ))
}
