pub mod camera;
pub mod chat;
pub mod config;
pub mod constants;
pub mod dialog;
pub mod hollow;
pub mod knowledge;
pub mod magnet;
pub mod math;
pub mod phase;
pub mod points;
pub mod portal;
pub mod sphere;
pub mod spikes;
pub mod text;

pub use camera::{ray_sphere, Camera};
pub use chat::{
    parse_completion, ChatError, ChatMessage, ChatSettings, DialogCue, PersonaReply,
    PersonaSession, Role,
};
pub use config::{ParamSection, ParamSpec, SphereConfig, PARAM_SECTIONS};
pub use knowledge::{build_system_prompt, KnowledgeMap, KnowledgeNode};
pub use phase::{DialogEnvelope, Phase, PhaseController, PhaseOutput, PromptOptions};
pub use points::PointField;
pub use portal::PortalImage;
pub use sphere::{MagneticSphere, SphereInputs};
pub use text::{TextAnimator, TypingOptions};
