use crate::constants::*;
use crate::dom;
use crate::theme::{Theme, THEME_CLASSES};
use web_sys as web;

const VISIBLE_CLASS: &str = "visible";

/// Show the centre overlay with the prompt label.
#[inline]
pub fn show_center(document: &web::Document, label: &str) {
    dom::set_text(document, CENTER_LABEL_ID, label);
    if let Some(el) = document.get_element_by_id(CENTER_OVERLAY_ID) {
        _ = el.class_list().add_1(VISIBLE_CLASS);
    }
}

#[inline]
pub fn hide_center(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(CENTER_OVERLAY_ID) {
        _ = el.class_list().remove_1(VISIBLE_CLASS);
    }
    dom::set_text(document, CENTER_LABEL_ID, "");
}

/// Scale the portal image and toggle its container.
pub fn set_portal(document: &web::Document, scale: f32, visible: bool) {
    if let Some(el) = document.get_element_by_id(PORTAL_ID) {
        let classes = el.class_list();
        _ = if visible {
            classes.add_1(VISIBLE_CLASS)
        } else {
            classes.remove_1(VISIBLE_CLASS)
        };
    }
    if let Some(img) = document.get_element_by_id(PORTAL_IMAGE_ID) {
        _ = img.set_attribute("style", &format!("transform:scale({:.4})", scale));
    }
}

/// The two bars are exclusive: showing one hides the other.
pub fn show_control_bar(document: &web::Document) {
    dom::set_hidden(document, CONTROL_BAR_ID, false);
    dom::set_hidden(document, PROMPT_BAR_ID, true);
}

pub fn show_prompt_bar(document: &web::Document) {
    dom::set_hidden(document, PROMPT_BAR_ID, false);
    dom::set_hidden(document, CONTROL_BAR_ID, true);
    if let Some(input) = dom::input_element(document, PROMPT_INPUT_ID) {
        _ = input.focus();
    }
}

pub fn toggle_panel(document: &web::Document) {
    let hidden = dom::is_hidden(document, PANEL_ID);
    dom::set_hidden(document, PANEL_ID, !hidden);
}

pub fn set_dialog_text(document: &web::Document, text: &str) {
    dom::set_text(document, DIALOG_TEXT_ID, text);
}

/// Swap the prompt input for the loading bar (or back).
pub fn show_loading(document: &web::Document, loading: bool) {
    dom::set_hidden(document, PROMPT_INNER_ID, loading);
    dom::set_hidden(document, PROMPT_LOADING_ID, !loading);
}

pub fn set_loading_fill(document: &web::Document, pct: f64) {
    if let Some(el) = document.get_element_by_id(PROMPT_FILL_ID) {
        let pct = pct.clamp(0.0, 100.0);
        _ = el.set_attribute("style", &format!("width:{:.1}%", pct));
    }
}

/// Body class for the theme; colours are pushed to the renderer separately.
pub fn apply_theme(document: &web::Document, theme: Theme) {
    if let Some(body) = document.body() {
        let classes = body.class_list();
        for class in THEME_CLASSES {
            _ = classes.remove_1(class);
        }
        _ = classes.add_1(theme.body_class());
    }
}
