pub mod detection;
pub mod graph;
pub mod prelude;
pub mod trackers;
pub mod utils;

/// Synthetic detection sequences for benchmarks and demos
pub mod examples;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Errors {
    #[error("The detection store is empty.")]
    EmptyDetectionStore,
    #[error("Detection {0} has frame 0, frames are numbered from 1.")]
    ZeroFrame(usize),
    #[error("Detection {position} (frame {frame}) follows frame {previous}: detections must be sorted by frame.")]
    UnorderedFrames {
        position: usize,
        frame: usize,
        previous: usize,
    },
    #[error("Detection {0} has a non-positive width or height.")]
    NonPositiveExtent(usize),
    #[error("Detection {0} has a non-finite coordinate, extent or score.")]
    NonFiniteValue(usize),
    #[error("Option `{0}` must be in (0, 1], got {1}.")]
    ThresholdOutOfRange(&'static str, f32),
    #[error("Option `betta` must be finite, got {0}.")]
    NonFiniteBetta(f64),
    #[error("Option `max_iterations` must be positive when set.")]
    ZeroIterations,
    #[error("The graph has {nodes} nodes but the detection store has {detections} detections.")]
    GraphMismatch { detections: usize, nodes: usize },
}

pub(crate) const EPS: f32 = 0.00001;

/// Approximate equality for float-based objects
pub trait EstimateClose {
    fn almost_same(&self, other: &Self, eps: f32) -> bool;
}
