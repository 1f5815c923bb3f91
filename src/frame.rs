use crate::constants::*;
use crate::core::{Camera, MagneticSphere, PortalImage, SphereInputs};
use crate::dom;
use crate::events::Wiring;
use crate::input;
use crate::overlay;
use crate::render;
use crate::theme::Theme;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext<'a> {
    pub w: Wiring,
    pub sphere: MagneticSphere,
    pub gpu: Option<render::GpuState<'a>>,

    pub started: Instant,
    pub last_instant: Instant,
    pub was_animating: bool,
    pub shown_label: Option<String>,
    pub portal: PortalImage,
    pub applied_theme: Option<Theme>,
}

impl<'a> FrameContext<'a> {
    pub fn new(w: Wiring, sphere: MagneticSphere, gpu: Option<render::GpuState<'a>>) -> Self {
        let now = Instant::now();
        Self {
            w,
            sphere,
            gpu,
            started: now,
            last_instant: now,
            was_animating: false,
            shown_label: None,
            portal: PortalImage::new(),
            applied_theme: None,
        }
    }

    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt = now - self.last_instant;
        self.last_instant = now;
        let time = (now - self.started).as_secs_f32();
        let now_ms = dom::now_ms();

        // snapshot so panel edits never overlap a borrow held by the frame
        let config = self.w.config.borrow().clone();

        if let Some(cue) = self.w.pending_cue.borrow_mut().take() {
            self.w
                .controller
                .borrow_mut()
                .trigger_dialog(&cue.text, cue.duration_ms, &config);
            self.w.animator.borrow_mut().start(&cue.sentences, now_ms);
        }

        // Controller first: everything below reads this frame's output.
        let out = self.w.controller.borrow_mut().update(dt, &config);

        if let Some(p) = self.w.pointer.borrow().effective(out.virtual_pointer) {
            self.sphere.set_pointer_ndc(p.x, p.y);
        }

        let camera = self.camera();
        self.sphere.update(
            time,
            SphereInputs {
                enable_magnet: out.magnet_enabled(),
                hollow_factor: out.hollow_factor,
                dialog_mode: out.dialog_mode,
            },
            &camera,
            &config,
        );

        let animating = out.is_animating();
        if self.was_animating && !animating {
            log::info!("[frame] controller back to idle");
        }
        self.was_animating = animating;

        self.sync_center();
        self.portal.update(&out);
        overlay::set_portal(&self.w.document, self.portal.scale(), self.portal.is_visible());

        self.tick_text(now_ms);
        self.tick_loading(now_ms);
        self.sync_theme();

        if let Some(g) = &mut self.gpu {
            g.resize_if_needed(self.w.canvas.width(), self.w.canvas.height());
            if let Err(e) = g.render(&camera, self.sphere.positions(), config.point_size) {
                log::error!("render error: {:?}", e);
            }
        }
    }

    fn camera(&self) -> Camera {
        let aspect = input::aspect_ratio(self.w.canvas.width(), self.w.canvas.height());
        Camera::looking_at_origin(CAMERA_Z, aspect, CAMERA_FOV_DEG.to_radians())
    }

    /// The centre overlay mirrors the controller: a prompt shows its label,
    /// a dialog or idle sphere shows nothing.
    fn sync_center(&mut self) {
        let controller = self.w.controller.borrow();
        let label = controller.center_label();
        if label == self.shown_label.as_deref() {
            return;
        }
        match label {
            Some(l) => overlay::show_center(&self.w.document, l),
            None => overlay::hide_center(&self.w.document),
        }
        self.shown_label = label.map(str::to_string);
    }

    fn tick_text(&mut self, now_ms: f64) {
        let mut animator = self.w.animator.borrow_mut();
        if animator.tick(now_ms) {
            overlay::set_dialog_text(&self.w.document, &animator.display());
        }
    }

    fn tick_loading(&mut self, now_ms: f64) {
        let mut loading = self.w.loading.borrow_mut();
        if !loading.is_busy() {
            return;
        }
        match loading.tick(now_ms, LOADING_COMPLETE_HOLD_MS) {
            Some(pct) => overlay::set_loading_fill(&self.w.document, pct),
            None => {
                overlay::show_loading(&self.w.document, false);
                overlay::set_loading_fill(&self.w.document, 0.0);
            }
        }
    }

    fn sync_theme(&mut self) {
        let theme = *self.w.theme.borrow();
        if self.applied_theme == Some(theme) {
            return;
        }
        if let Some(g) = &mut self.gpu {
            g.set_colors(theme.background(), theme.dots());
        }
        self.applied_theme = Some(theme);
    }
}

pub async fn init_gpu(
    canvas: &web::HtmlCanvasElement,
    capacity: usize,
) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas, capacity).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
