use crate::core::ChatError;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

fn js_err(e: JsValue) -> ChatError {
    ChatError::Network(format!("{:?}", e))
}

/// POST a JSON body and return the status with the raw response text.
///
/// Only transport failures are errors here; status and body are judged by
/// `parse_completion`.
pub async fn post_json(url: &str, body: &str) -> Result<(u16, String), ChatError> {
    let window = web::window().ok_or_else(|| ChatError::Network("no window".into()))?;

    let init = web::RequestInit::new();
    init.set_method("POST");
    init.set_body(&JsValue::from_str(body));
    let request = web::Request::new_with_str_and_init(url, &init).map_err(js_err)?;
    request
        .headers()
        .set("Content-Type", "application/json")
        .map_err(js_err)?;

    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(js_err)?;
    let resp: web::Response = resp_value.dyn_into().map_err(js_err)?;
    let status = resp.status();
    // an unreadable body is treated as empty, the status decides first
    let text = match resp.text() {
        Ok(promise) => JsFuture::from(promise)
            .await
            .ok()
            .and_then(|v| v.as_string())
            .unwrap_or_default(),
        Err(_) => String::new(),
    };
    Ok((status, text))
}
