pub mod canvas;
pub mod config;
pub mod drag;
pub mod frame;
pub mod input;
pub mod listeners;
pub mod render;
pub mod resize;
pub mod shortcuts;
pub mod template;

pub use canvas::CardCanvas;
pub use config::CanvasConfig;
pub use input::{InputEvent, Modifiers, PointerSource};
pub use listeners::{ListenerKind, ListenerSet};
pub use render::{RenderFrame, RenderItem};
pub use template::{TemplateContent, TemplateElement, TemplateLayout};
