pub mod font_scale;
pub mod hit;
pub mod id;
pub mod layout;
pub mod measure;
pub mod model;
pub mod resize;
pub mod snap;
pub mod snapshot;

pub use font_scale::{FontScaleConfig, FontSizer};
pub use id::ElementId;
pub use layout::clamp_position;
pub use measure::{ApproxMetrics, MeasureBackend, measure};
pub use model::*;
pub use snap::{Guide, GuideAxis, SnapRequest, SnapResult, SnapTarget, compute_snap};
pub use snapshot::{ElementLayout, LayoutSnapshot};
