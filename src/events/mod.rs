use crate::core::{
    DialogCue, KnowledgeMap, PersonaSession, PhaseController, SphereConfig, TextAnimator,
};
use crate::input::PointerState;
use crate::loading::LoadingBar;
use crate::theme::Theme;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

mod keyboard;
mod pointer;
mod prompt;

pub use keyboard::wire_global_keydown;
pub use pointer::wire_pointer_handlers;
pub use prompt::{send_warmup, wire_control_bar, wire_prompt_bar};

/// Shared state handed to every event handler and to the frame loop.
#[derive(Clone)]
pub struct Wiring {
    pub canvas: web::HtmlCanvasElement,
    pub document: web::Document,
    pub config: Rc<RefCell<SphereConfig>>,
    pub controller: Rc<RefCell<PhaseController>>,
    pub pointer: Rc<RefCell<PointerState>>,
    pub animator: Rc<RefCell<TextAnimator>>,
    pub loading: Rc<RefCell<LoadingBar>>,
    pub theme: Rc<RefCell<Theme>>,
    pub session: Rc<RefCell<PersonaSession>>,
    pub knowledge: Rc<KnowledgeMap>,
    /// Dialog cue delivered by a finished chat request, consumed next frame.
    pub pending_cue: Rc<RefCell<Option<DialogCue>>>,
}
