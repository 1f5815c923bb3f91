use super::Wiring;
use crate::chat;
use crate::constants::{CONTROL_BUTTONS, PROMPT_INPUT_ID, PROMPT_SEND_ID};
use crate::core::{parse_completion, ChatError, DialogCue, PersonaReply, PromptOptions};
use crate::dom;
use crate::overlay;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

/// Control bar buttons open a portal labelled after the button.
pub fn wire_control_bar(w: &Wiring) {
    for (id, label) in CONTROL_BUTTONS {
        let w = w.clone();
        dom::add_click_listener(&w.document.clone(), id, move || {
            let pointer = w.pointer.borrow().ndc;
            let config = w.config.borrow();
            w.controller
                .borrow_mut()
                .trigger_prompt(label, pointer, PromptOptions::default(), &config);
        });
    }
}

/// Send button and Enter in the prompt input both submit.
pub fn wire_prompt_bar(w: &Wiring) {
    {
        let w = w.clone();
        dom::add_click_listener(&w.document.clone(), PROMPT_SEND_ID, move || submit(&w));
    }

    if let Some(input) = dom::input_element(&w.document, PROMPT_INPUT_ID) {
        let w = w.clone();
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
                if ev.key() == "Enter" {
                    ev.prevent_default();
                    submit(&w);
                }
            }) as Box<dyn FnMut(_)>);
        _ = input.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

fn submit(w: &Wiring) {
    if w.loading.borrow().is_busy() {
        log::info!("[prompt] request already in flight");
        return;
    }
    let Some(input) = dom::input_element(&w.document, PROMPT_INPUT_ID) else {
        return;
    };
    let text = input.value();
    input.set_value("");

    let Some(body) = w.session.borrow_mut().begin_turn(&text) else {
        // blank after trimming: answer locally
        let config = w.config.borrow();
        *w.pending_cue.borrow_mut() = Some(DialogCue::from_reply(&PersonaReply::default(), &config));
        return;
    };
    let endpoint = w.session.borrow().endpoint().map(str::to_string);

    w.animator.borrow_mut().stop();
    overlay::set_dialog_text(&w.document, "");
    w.loading.borrow_mut().start(dom::now_ms());
    overlay::show_loading(&w.document, true);
    overlay::set_loading_fill(&w.document, 0.0);

    let w = w.clone();
    spawn_local(async move {
        let result = match endpoint {
            Ok(url) => request_reply(&url, &body).await,
            Err(e) => Err(e),
        };
        let cue = {
            let config = w.config.borrow();
            match result {
                Ok(reply) => {
                    let titles: Vec<&str> = w.knowledge.titles_for(&reply.mapped_node_ids).collect();
                    log::info!("[prompt] reply mapped to {:?}", titles);
                    w.session.borrow_mut().finish_turn(&reply);
                    DialogCue::from_reply(&reply, &config)
                }
                Err(e) => {
                    log::error!("[prompt] chat failed: {}", e);
                    DialogCue::fallback(&e, &config)
                }
            }
        };
        w.loading.borrow_mut().complete(dom::now_ms());
        *w.pending_cue.borrow_mut() = Some(cue);
    });
}

async fn request_reply(url: &str, body: &str) -> Result<PersonaReply, ChatError> {
    let (status, text) = chat::post_json(url, body).await?;
    parse_completion(status, &text)
}

/// Fire the optional warm-up request. Its outcome is only logged.
pub fn send_warmup(w: &Wiring) {
    let Some(body) = w.session.borrow_mut().prepare() else {
        return;
    };
    let endpoint = match w.session.borrow().endpoint() {
        Ok(url) => url.to_string(),
        Err(e) => {
            log::warn!("[prompt] warm-up skipped: {}", e);
            return;
        }
    };
    spawn_local(async move {
        match request_reply(&endpoint, &body).await {
            Ok(_) => log::info!("[prompt] warm-up ok"),
            Err(e) => log::warn!("[prompt] warm-up failed: {}", e),
        }
    });
}
