use crate::constants::PANEL_ID;
use crate::core::{ParamSpec, SphereConfig, PARAM_SECTIONS};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

fn js_err(e: JsValue) -> anyhow::Error {
    anyhow::anyhow!(format!("{:?}", e))
}

/// Build one labelled slider per live-editable parameter inside the panel.
/// Edits write straight into the shared config.
pub fn build_panel(
    document: &web::Document,
    config: &Rc<RefCell<SphereConfig>>,
) -> anyhow::Result<()> {
    let Some(panel) = document.get_element_by_id(PANEL_ID) else {
        log::warn!("[panel] missing #{}", PANEL_ID);
        return Ok(());
    };
    for section in PARAM_SECTIONS {
        let heading = document.create_element("h3").map_err(js_err)?;
        heading.set_text_content(Some(section.title));
        panel.append_child(&heading).map_err(js_err)?;
        for param in section.params {
            let row = build_row(document, param, config)?;
            panel.append_child(&row).map_err(js_err)?;
        }
    }
    Ok(())
}

fn format_value(param: &ParamSpec, value: f32) -> String {
    if param.step >= 1.0 {
        format!("{:.0}", value)
    } else if param.step >= 0.1 {
        format!("{:.1}", value)
    } else {
        format!("{:.3}", value)
    }
}

fn build_row(
    document: &web::Document,
    param: &'static ParamSpec,
    config: &Rc<RefCell<SphereConfig>>,
) -> anyhow::Result<web::Element> {
    let current = config.borrow().get(param.key).unwrap_or(param.min);

    let row = document.create_element("label").map_err(js_err)?;
    row.set_class_name("panel-row");
    let name = document.create_element("span").map_err(js_err)?;
    name.set_text_content(Some(param.label));
    let value_el = document.create_element("span").map_err(js_err)?;
    value_el.set_class_name("panel-value");
    value_el.set_text_content(Some(&format_value(param, current)));

    let slider: web::HtmlInputElement = document
        .create_element("input")
        .map_err(js_err)?
        .dyn_into()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    slider.set_type("range");
    slider.set_min(&param.min.to_string());
    slider.set_max(&param.max.to_string());
    slider.set_step(&param.step.to_string());
    slider.set_value(&current.to_string());

    let config = config.clone();
    let slider_for_cb = slider.clone();
    let value_for_cb = value_el.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move || {
        if let Ok(v) = slider_for_cb.value().parse::<f32>() {
            config.borrow_mut().set(param.key, v);
            value_for_cb.set_text_content(Some(&format_value(param, v)));
        }
    }) as Box<dyn FnMut()>);
    _ = slider.add_event_listener_with_callback("input", closure.as_ref().unchecked_ref());
    closure.forget();

    row.append_child(&name).map_err(js_err)?;
    row.append_child(&slider).map_err(js_err)?;
    row.append_child(&value_el).map_err(js_err)?;
    Ok(row)
}
