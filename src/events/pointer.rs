use super::Wiring;
use crate::input;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn wire_pointer_handlers(w: &Wiring) {
    wire_pointermove(w);
}

fn wire_pointermove(w: &Wiring) {
    let w = w.clone();
    let canvas_for_listener = w.canvas.clone();

    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let rect = w.canvas.get_bounding_client_rect();
        let ndc = input::client_to_ndc(
            ev.client_x() as f32,
            ev.client_y() as f32,
            rect.left() as f32,
            rect.top() as f32,
            rect.width() as f32,
            rect.height() as f32,
        );
        w.pointer.borrow_mut().update(ndc);
    }) as Box<dyn FnMut(_)>);

    _ = canvas_for_listener
        .add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
    closure.forget();
}
