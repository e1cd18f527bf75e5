use crate::utils::bbox::BoundingBox;
use crate::Errors;
use anyhow::Result;
use std::ops::Index;

pub mod builder;

/// Single detector output: the box, its confidence and the frame it was observed in.
///
/// Frames are numbered from `1`.
///
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Detection {
    pub frame: usize,
    pub bbox: BoundingBox,
    pub score: f32,
}

impl Detection {
    pub fn new(frame: usize, bbox: BoundingBox, score: f32) -> Self {
        Self { frame, bbox, score }
    }
}

/// Ordered collection of detections of a whole sequence.
///
/// The position of a detection in the store is its stable handle: it is assigned once
/// when the store is built and is used by the graph, the solver and the emitted tracks.
/// The store guarantees that detections are sorted by frame, so every frame occupies a
/// contiguous run of positions.
///
#[derive(Clone, Debug, Default)]
pub struct DetectionStore {
    detections: Vec<Detection>,
}

impl DetectionStore {
    /// Validates the detections and builds the store.
    ///
    /// # Errors
    /// * [`Errors::EmptyDetectionStore`] when no detections are passed;
    /// * [`Errors::ZeroFrame`], [`Errors::UnorderedFrames`] when the frame numbering is broken;
    /// * [`Errors::NonPositiveExtent`], [`Errors::NonFiniteValue`] for malformed boxes or scores.
    ///
    pub fn new(detections: Vec<Detection>) -> Result<Self> {
        if detections.is_empty() {
            return Err(Errors::EmptyDetectionStore.into());
        }

        let mut previous = 1;
        for (position, d) in detections.iter().enumerate() {
            if d.frame == 0 {
                return Err(Errors::ZeroFrame(position).into());
            }
            if d.frame < previous {
                return Err(Errors::UnorderedFrames {
                    position,
                    frame: d.frame,
                    previous,
                }
                .into());
            }
            let b = &d.bbox;
            if ![b.x(), b.y(), b.width(), b.height(), d.score]
                .iter()
                .all(|v| v.is_finite())
            {
                return Err(Errors::NonFiniteValue(position).into());
            }
            if b.width() <= 0.0 || b.height() <= 0.0 {
                return Err(Errors::NonPositiveExtent(position).into());
            }
            previous = d.frame;
        }

        Ok(Self { detections })
    }

    pub fn len(&self) -> usize {
        self.detections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.detections.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&Detection> {
        self.detections.get(position)
    }

    pub fn detections(&self) -> &[Detection] {
        &self.detections
    }

    pub fn iter(&self) -> impl Iterator<Item = &Detection> {
        self.detections.iter()
    }

    /// The largest frame number or `0` for an empty store
    ///
    pub fn last_frame(&self) -> usize {
        self.detections.last().map(|d| d.frame).unwrap_or(0)
    }
}

impl Index<usize> for DetectionStore {
    type Output = Detection;

    fn index(&self, position: usize) -> &Self::Output {
        &self.detections[position]
    }
}
