#![cfg(target_arch = "wasm32")]
use crate::constants::*;
use crate::core::{
    build_system_prompt, ChatSettings, KnowledgeMap, MagneticSphere, PersonaSession,
    PhaseController, SphereConfig, TextAnimator, TypingOptions,
};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod chat;
mod constants;
mod core;
mod dom;
mod events;
mod frame;
mod input;
mod keys;
mod loading;
mod overlay;
mod panel;
mod render;
mod theme;

fn wire_canvas_resize(canvas: &web::HtmlCanvasElement) {
    dom::sync_canvas_backing_size(canvas);
    let canvas_resize = canvas.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        dom::sync_canvas_backing_size(&canvas_resize);
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}

fn build_session() -> anyhow::Result<(PersonaSession, KnowledgeMap)> {
    let knowledge = KnowledgeMap::embedded()?;
    let prompt = build_system_prompt(PERSONA_NAME, &knowledge)?;
    let session = PersonaSession::new(
        ChatSettings {
            endpoint: CHAT_ENDPOINT.to_string(),
            model: CHAT_MODEL.to_string(),
            warmup: CHAT_WARMUP,
        },
        prompt,
    );
    log::info!(
        "[init] knowledge map v{} with {} nodes",
        knowledge.version,
        knowledge.nodes().len()
    );
    Ok((session, knowledge))
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("sphere-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    static STARTED: AtomicBool = AtomicBool::new(false);
    if STARTED.swap(true, Ordering::SeqCst) {
        return Ok(());
    }

    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", CANVAS_ID))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    // Maintain canvas internal pixel size to match CSS size * devicePixelRatio
    wire_canvas_resize(&canvas);

    let config = SphereConfig::default();
    let sphere = MagneticSphere::new(&config, SPHERE_SEED);
    let config = Rc::new(RefCell::new(config));
    let (session, knowledge) = build_session()?;

    let w = events::Wiring {
        canvas: canvas.clone(),
        document: document.clone(),
        config: config.clone(),
        controller: Rc::new(RefCell::new(PhaseController::new())),
        pointer: Rc::new(RefCell::new(input::PointerState::default())),
        animator: Rc::new(RefCell::new(TextAnimator::new(TypingOptions::default()))),
        loading: Rc::new(RefCell::new(loading::LoadingBar::default())),
        theme: Rc::new(RefCell::new(theme::Theme::default())),
        session: Rc::new(RefCell::new(session)),
        knowledge: Rc::new(knowledge),
        pending_cue: Rc::new(RefCell::new(None)),
    };

    overlay::apply_theme(&document, *w.theme.borrow());
    overlay::show_control_bar(&document);
    if let Err(e) = panel::build_panel(&document, &config) {
        log::warn!("[init] control panel unavailable: {:?}", e);
    }

    events::wire_pointer_handlers(&w);
    events::wire_global_keydown(&w);
    events::wire_control_bar(&w);
    events::wire_prompt_bar(&w);
    events::send_warmup(&w);

    let gpu = frame::init_gpu(&canvas, sphere.point_count()).await;
    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext::new(w, sphere, gpu)));
    frame::start_loop(frame_ctx);
    Ok(())
}
