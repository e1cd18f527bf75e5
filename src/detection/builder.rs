use crate::detection::{Detection, DetectionStore};
use crate::utils::bbox::BoundingBox;
use anyhow::Result;

/// Builder for DetectionStore
///
/// Rows are appended in the order a reader produces them; the validation happens once in
/// [`build`](DetectionStoreBuilder::build).
///
#[derive(Default, Debug)]
pub struct DetectionStoreBuilder {
    detections: Vec<Detection>,
}

impl DetectionStoreBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder with preallocated capacity for `n` detections
    ///
    pub fn with_capacity(n: usize) -> Self {
        Self {
            detections: Vec::with_capacity(n),
        }
    }

    /// Appends a detection
    ///
    /// # Parameters
    /// * `frame` - frame number, starting from `1`;
    /// * `bbox` - detected box;
    /// * `score` - detector confidence.
    ///
    pub fn detection(mut self, frame: usize, bbox: BoundingBox, score: f32) -> Self {
        self.add(frame, bbox, score);
        self
    }

    /// Appends a detection in place
    ///
    pub fn add(&mut self, frame: usize, bbox: BoundingBox, score: f32) {
        self.detections.push(Detection::new(frame, bbox, score));
    }

    /// Appends all detections of a single frame
    ///
    pub fn frame<I>(mut self, frame: usize, boxes: I) -> Self
    where
        I: IntoIterator<Item = (BoundingBox, f32)>,
    {
        for (bbox, score) in boxes {
            self.add(frame, bbox, score);
        }
        self
    }

    pub fn build(self) -> Result<DetectionStore> {
        DetectionStore::new(self.detections)
    }
}

#[cfg(test)]
mod tests {
    use crate::detection::builder::DetectionStoreBuilder;
    use crate::utils::bbox::BoundingBox;

    #[test]
    fn build_by_frames() {
        let store = DetectionStoreBuilder::new()
            .frame(
                1,
                [
                    (BoundingBox::new(0.0, 0.0, 5.0, 5.0), 0.9),
                    (BoundingBox::new(10.0, 0.0, 5.0, 5.0), 0.8),
                ],
            )
            .detection(2, BoundingBox::new(1.0, 0.0, 5.0, 5.0), 0.7)
            .build()
            .unwrap();
        assert_eq!(store.len(), 3);
        assert_eq!(store[2].frame, 2);
        assert_eq!(store[1].score, 0.8);
    }

    #[test]
    fn build_fails_on_unordered() {
        let mut builder = DetectionStoreBuilder::with_capacity(2);
        builder.add(2, BoundingBox::new(0.0, 0.0, 5.0, 5.0), 0.9);
        builder.add(1, BoundingBox::new(0.0, 0.0, 5.0, 5.0), 0.9);
        assert!(builder.build().is_err());
    }
}
