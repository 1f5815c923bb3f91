use super::Wiring;
use crate::keys::{is_text_entry, key_action, KeyAction};
use crate::overlay;
use wasm_bindgen::JsCast;
use web_sys as web;

fn typing_in_field(ev: &web::KeyboardEvent) -> bool {
    ev.target()
        .and_then(|t| t.dyn_into::<web::Element>().ok())
        .map(|el| is_text_entry(&el.tag_name()))
        .unwrap_or(false)
}

pub fn handle_global_keydown(ev: &web::KeyboardEvent, w: &Wiring) {
    if typing_in_field(ev) {
        return;
    }
    let Some(action) = key_action(&ev.key()) else {
        return;
    };
    match action {
        KeyAction::TogglePanel => overlay::toggle_panel(&w.document),
        KeyAction::ToggleTheme => {
            let next = w.theme.borrow().toggled();
            *w.theme.borrow_mut() = next;
            overlay::apply_theme(&w.document, next);
            log::info!("[keys] theme={}", next.name());
        }
        KeyAction::ShowPrompt => overlay::show_prompt_bar(&w.document),
        KeyAction::ShowControls => overlay::show_control_bar(&w.document),
    }
    ev.prevent_default();
}

pub fn wire_global_keydown(w: &Wiring) {
    if let Some(window) = web::window() {
        let w = w.clone();
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
                handle_global_keydown(&ev, &w);
            }) as Box<dyn FnMut(_)>);
        _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
