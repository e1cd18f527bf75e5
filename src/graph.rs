use crate::detection::DetectionStore;
use crate::utils::bbox::BoundingBox;
use itertools::Itertools;
use log::debug;
use std::ops::Range;

/// Default IoU required to link detections of consecutive frames
pub const DEFAULT_OVERLAP_THRESHOLD: f32 = 0.3;

/// Default minimal `min(r, 1 / r)` of the height ratio between linked detections
pub const DEFAULT_MIN_HEIGHT_RATIO: f32 = 0.8;

/// Frame to position range lookup for a [`DetectionStore`].
///
/// Frames without detections (gaps in numbering, or frames past the last one) resolve
/// to an empty range.
///
#[derive(Clone, Debug, Default)]
pub struct FrameIndex {
    ranges: Vec<Range<usize>>,
}

impl FrameIndex {
    pub fn new(store: &DetectionStore) -> Self {
        let last_frame = store.last_frame();
        let mut ranges = vec![0..0; last_frame];
        for (frame, group) in &store
            .iter()
            .enumerate()
            .group_by(|(_, detection)| detection.frame)
        {
            let positions = group.map(|(position, _)| position).collect::<Vec<_>>();
            let start = positions[0];
            ranges[frame - 1] = start..start + positions.len();
        }
        Self { ranges }
    }

    /// Positions of the detections of `frame`
    ///
    pub fn range(&self, frame: usize) -> Range<usize> {
        if frame == 0 {
            return 0..0;
        }
        self.ranges.get(frame - 1).cloned().unwrap_or(0..0)
    }

    /// The first frame that has detections
    ///
    pub fn first_frame(&self) -> Option<usize> {
        self.ranges
            .iter()
            .position(|r| !r.is_empty())
            .map(|index| index + 1)
    }

    pub fn last_frame(&self) -> usize {
        self.ranges.len()
    }
}

/// Temporal adjacency of detections: for every position the ordered positions of the
/// previous-frame detections it may continue.
///
#[derive(Clone, Debug)]
pub struct TrackingGraph {
    neighbors: Vec<Vec<usize>>,
    frames: FrameIndex,
}

impl TrackingGraph {
    /// Builds the graph for the store.
    ///
    /// # Parameters
    /// * `store` - detections sorted by frame;
    /// * `overlap_threshold` - the predecessor is linked only when IoU is strictly greater;
    /// * `min_height_ratio` - the predecessor is linked only when `min(r, 1 / r)` is strictly greater.
    ///
    pub fn new(store: &DetectionStore, overlap_threshold: f32, min_height_ratio: f32) -> Self {
        let frames = FrameIndex::new(store);
        let mut neighbors = vec![Vec::new(); store.len()];

        for frame in 2..=frames.last_frame() {
            let previous = frames.range(frame - 1);
            if previous.is_empty() {
                continue;
            }
            for current in frames.range(frame) {
                let bbox = &store[current].bbox;
                neighbors[current] = previous
                    .clone()
                    .filter(|&p| {
                        let predecessor = &store[p].bbox;
                        BoundingBox::overlap(predecessor, bbox).iou > overlap_threshold
                            && BoundingBox::height_consistency(predecessor, bbox)
                                > min_height_ratio
                    })
                    .collect();
            }
        }

        debug!(
            "Tracking graph is built for {} detections in {} frames, {} edges",
            store.len(),
            frames.last_frame(),
            neighbors.iter().map(Vec::len).sum::<usize>()
        );

        Self { neighbors, frames }
    }

    /// Builds the graph with the default thresholds
    ///
    pub fn with_defaults(store: &DetectionStore) -> Self {
        Self::new(store, DEFAULT_OVERLAP_THRESHOLD, DEFAULT_MIN_HEIGHT_RATIO)
    }

    pub fn neighbors(&self, position: usize) -> &[usize] {
        &self.neighbors[position]
    }

    pub fn frames(&self) -> &FrameIndex {
        &self.frames
    }

    pub fn len(&self) -> usize {
        self.neighbors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.neighbors.is_empty()
    }
}
