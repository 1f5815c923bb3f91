//! Chat-completion proxy contract, persona session and the dialog cue handed
//! to the phase controller.
//!
//! Nothing here performs I/O. The front end posts the body returned by
//! [`PersonaSession::begin_turn`] and feeds the raw response back through
//! [`parse_completion`].

use crate::config::SphereConfig;
use crate::constants::{
    DIALOG_EMPTY_REPLY, DIALOG_FALLBACK_MIN_MS, DIALOG_FALLBACK_SENTENCE, DIALOG_MIN_READING_MS,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// One failure stage of a chat round trip.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ChatError {
    #[error("chat endpoint url is missing")]
    MissingEndpoint,
    #[error("network error: {0}")]
    Network(String),
    #[error("chat proxy error ({status}): {body}")]
    Status { status: u16, body: String },
    #[error("chat proxy returned a non-JSON response")]
    NonJson,
    #[error("invalid response shape (missing message.content)")]
    MissingContent,
    #[error("message content was not valid JSON")]
    InvalidContent,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResponseFormat {
    #[serde(rename = "type")]
    pub kind: String,
}

impl ResponseFormat {
    pub fn json_object() -> Self {
        Self {
            kind: "json_object".to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: &'a [ChatMessage],
    pub response_format: ResponseFormat,
}

/// The structured answer the persona is asked to produce.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonaReply {
    pub mapped_node_ids: Vec<String>,
    pub answer_sentences: Vec<String>,
}

impl PersonaReply {
    /// Sentences joined by single spaces and trimmed.
    pub fn joined(&self) -> String {
        self.answer_sentences.join(" ").trim().to_string()
    }

    fn from_content(content: &Value) -> Self {
        Self {
            mapped_node_ids: string_array(content.get("mappedNodeIds")),
            answer_sentences: string_array(content.get("answerSentences")),
        }
    }
}

/// Non-arrays read as empty; non-string entries are dropped.
fn string_array(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect(),
        _ => Vec::new(),
    }
}

/// Decode a proxy response into a persona reply.
///
/// The proxy wraps a completion whose `choices[0].message.content` is itself a
/// JSON document encoded as a string.
pub fn parse_completion(status: u16, body: &str) -> Result<PersonaReply, ChatError> {
    if !(200..300).contains(&status) {
        return Err(ChatError::Status {
            status,
            body: body.to_string(),
        });
    }
    let data: Value = serde_json::from_str(body).map_err(|_| ChatError::NonJson)?;
    let content = data
        .pointer("/choices/0/message/content")
        .and_then(Value::as_str)
        .ok_or(ChatError::MissingContent)?;
    let inner: Value = serde_json::from_str(content).map_err(|_| ChatError::InvalidContent)?;
    Ok(PersonaReply::from_content(&inner))
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChatSettings {
    pub endpoint: String,
    pub model: String,
    pub warmup: bool,
}

/// Running conversation with the persona. The system prompt is pushed once;
/// every user turn and a compact assistant turn are kept for coherence.
#[derive(Clone, Debug)]
pub struct PersonaSession {
    settings: ChatSettings,
    system_prompt: String,
    messages: Vec<ChatMessage>,
    prepared: bool,
}

impl PersonaSession {
    pub fn new(settings: ChatSettings, system_prompt: String) -> Self {
        Self {
            settings,
            system_prompt,
            messages: Vec::new(),
            prepared: false,
        }
    }

    pub fn settings(&self) -> &ChatSettings {
        &self.settings
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn is_prepared(&self) -> bool {
        self.prepared
    }

    /// Endpoint to post to, or `MissingEndpoint` when none is configured.
    pub fn endpoint(&self) -> Result<&str, ChatError> {
        let url = self.settings.endpoint.trim();
        if url.is_empty() {
            return Err(ChatError::MissingEndpoint);
        }
        Ok(url)
    }

    /// Push the system prompt on first use. Returns the warm-up request body
    /// when warm-up is enabled and this call did the preparing.
    pub fn prepare(&mut self) -> Option<String> {
        if self.prepared {
            return None;
        }
        self.messages
            .push(ChatMessage::new(Role::System, self.system_prompt.clone()));
        self.prepared = true;
        if self.settings.warmup {
            self.warmup_body()
        } else {
            None
        }
    }

    /// One-shot request that only proves the pipeline is alive. Its answer is
    /// never recorded.
    pub fn warmup_body(&self) -> Option<String> {
        let mut messages = self.messages.clone();
        messages.push(ChatMessage::new(
            Role::User,
            r#"Return {"answerSentences":["READY"]}."#,
        ));
        self.request_body(&messages)
    }

    /// Record a user turn and build its request body. `None` for blank input,
    /// which the caller answers locally.
    pub fn begin_turn(&mut self, user_text: &str) -> Option<String> {
        self.prepare();
        let content = user_text.trim();
        if content.is_empty() {
            return None;
        }
        self.messages.push(ChatMessage::new(Role::User, content));
        self.request_body(&self.messages)
    }

    /// Keep the assistant's answer as plain joined text, not the raw JSON.
    pub fn finish_turn(&mut self, reply: &PersonaReply) {
        self.messages
            .push(ChatMessage::new(Role::Assistant, reply.joined()));
    }

    fn request_body(&self, messages: &[ChatMessage]) -> Option<String> {
        let request = ChatRequest {
            model: &self.settings.model,
            messages,
            response_format: ResponseFormat::json_object(),
        };
        match serde_json::to_string(&request) {
            Ok(body) => Some(body),
            Err(e) => {
                log::error!("[chat] failed to encode request: {}", e);
                None
            }
        }
    }
}

/// Text and display time handed to `PhaseController::trigger_dialog`.
#[derive(Clone, Debug, PartialEq)]
pub struct DialogCue {
    pub text: String,
    pub sentences: Vec<String>,
    pub duration_ms: f32,
}

impl DialogCue {
    /// Reading time scales with length, never below three seconds.
    pub fn from_reply(reply: &PersonaReply, config: &SphereConfig) -> Self {
        let mut text = reply.joined();
        let mut sentences: Vec<String> = reply
            .answer_sentences
            .iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        if text.is_empty() {
            text = DIALOG_EMPTY_REPLY.to_string();
            sentences = vec![text.clone()];
        }
        let chars = text.chars().count() as f32;
        let duration_ms = (chars * config.dialog_seconds_per_char * 1000.0).max(DIALOG_MIN_READING_MS);
        Self {
            text,
            sentences,
            duration_ms,
        }
    }

    /// Cue shown when a chat round trip failed at any stage.
    pub fn fallback(err: &ChatError, config: &SphereConfig) -> Self {
        log::warn!("[chat] falling back after error: {}", err);
        let text = DIALOG_FALLBACK_SENTENCE.to_string();
        let chars = text.chars().count() as f32;
        let duration_ms = (chars * config.dialog_seconds_per_char * 1000.0).max(DIALOG_FALLBACK_MIN_MS);
        Self {
            sentences: vec![text.clone()],
            text,
            duration_ms,
        }
    }
}
