pub use crate::detection::builder::DetectionStoreBuilder;
pub use crate::detection::{Detection, DetectionStore};
pub use crate::graph::{FrameIndex, TrackingGraph};
pub use crate::trackers::gog::assembler::{FrameTracks, TrackedBox};
pub use crate::trackers::gog::batch_api::{SceneBatch, SceneTracks};
pub use crate::trackers::gog::options::{GogOptions, SuppressionMode};
pub use crate::trackers::gog::{GogTracker, Track, TrackingResult};
pub use crate::utils::bbox::{BoundingBox, Overlap};
