use crate::detection::builder::DetectionStoreBuilder;
use crate::detection::DetectionStore;
use crate::utils::bbox::BoundingBox;
use rand::distributions::Uniform;
use rand::Rng;

/// Random walk of a box: every step shifts the corner by up to `pos_drift` and changes the
/// extents by up to `size_drift`, keeping them not smaller than `1.0`.
///
#[derive(Clone, Debug)]
pub struct BoxWalk {
    bbox: BoundingBox,
    shift: Uniform<f32>,
    resize: Uniform<f32>,
}

impl BoxWalk {
    pub fn new(start: BoundingBox, pos_drift: f32, size_drift: f32) -> Self {
        Self {
            bbox: start,
            shift: Uniform::new_inclusive(-pos_drift, pos_drift),
            resize: Uniform::new_inclusive(-size_drift, size_drift),
        }
    }

    /// The box only moves right and down
    ///
    pub fn forward(start: BoundingBox, pos_drift: f32, size_drift: f32) -> Self {
        Self {
            shift: Uniform::new_inclusive(0.0, pos_drift),
            ..Self::new(start, pos_drift, size_drift)
        }
    }

    /// Moves the box and returns its new position
    ///
    pub fn step<R: Rng>(&mut self, rng: &mut R) -> BoundingBox {
        let b = &self.bbox;
        self.bbox = BoundingBox::new(
            b.x() + rng.sample(self.shift),
            b.y() + rng.sample(self.shift),
            (b.width() + rng.sample(self.resize)).max(1.0),
            (b.height() + rng.sample(self.resize)).max(1.0),
        );
        self.bbox
    }
}

/// Generates a detection sequence of slowly drifting, well separated objects
///
/// Every object is observed in every frame with a random score; a share of the objects
/// can be made flickering (missed in some frames) or duplicated by a near copy of the box.
///
pub struct SequenceGen {
    objects: usize,
    frames: usize,
    miss_rate: f64,
    duplicate_rate: f64,
    score: Uniform<f32>,
}

impl SequenceGen {
    /// # Parameters
    /// * `objects` - the number of objects in the scene;
    /// * `frames` - the length of the sequence.
    ///
    pub fn new(objects: usize, frames: usize) -> Self {
        Self {
            objects,
            frames,
            miss_rate: 0.0,
            duplicate_rate: 0.0,
            score: Uniform::new(0.7, 1.0),
        }
    }

    /// The probability an object is not detected in a frame
    ///
    pub fn miss_rate(mut self, rate: f64) -> Self {
        self.miss_rate = rate;
        self
    }

    /// The probability a detection is accompanied with a near duplicate
    ///
    pub fn duplicate_rate(mut self, rate: f64) -> Self {
        self.duplicate_rate = rate;
        self
    }

    /// # Panics
    /// When nothing is generated: no objects, no frames or every detection is missed.
    ///
    pub fn generate(&self) -> DetectionStore {
        let mut rng = rand::thread_rng();
        let mut walks = (0..self.objects)
            .map(|i| {
                let start = BoundingBox::new(200.0 * i as f32, 100.0, 50.0, 80.0);
                BoxWalk::new(start, 1.0, 0.2)
            })
            .collect::<Vec<_>>();

        let mut builder = DetectionStoreBuilder::with_capacity(self.objects * self.frames);
        for frame in 1..=self.frames {
            for walk in &mut walks {
                let bbox = walk.step(&mut rng);
                if rng.gen_bool(self.miss_rate) {
                    continue;
                }
                builder.add(frame, bbox, rng.sample(self.score));
                if rng.gen_bool(self.duplicate_rate) {
                    let copy = BoundingBox::new(
                        bbox.x() + 0.5,
                        bbox.y() + 0.5,
                        bbox.width(),
                        bbox.height(),
                    );
                    builder.add(frame, copy, rng.sample(self.score) - 0.1);
                }
            }
        }
        builder
            .build()
            .expect("Generated sequence must be a valid detection store")
    }
}

#[cfg(test)]
mod tests {
    use crate::examples::{BoxWalk, SequenceGen};
    use crate::utils::bbox::BoundingBox;

    #[test]
    fn generated_store() {
        let store = SequenceGen::new(4, 25).generate();
        assert_eq!(store.len(), 100);
        assert_eq!(store.last_frame(), 25);

        let store = SequenceGen::new(4, 25).duplicate_rate(1.0).generate();
        assert_eq!(store.len(), 200);
    }

    #[test]
    fn walk_keeps_extents() {
        let mut rng = rand::thread_rng();
        let mut walk = BoxWalk::forward(BoundingBox::new(0.0, 0.0, 1.0, 1.0), 1.0, 0.5);
        let mut previous = BoundingBox::new(0.0, 0.0, 1.0, 1.0);
        for _ in 0..100 {
            let bbox = walk.step(&mut rng);
            assert!(bbox.width() >= 1.0 && bbox.height() >= 1.0);
            assert!(bbox.x() >= previous.x() && bbox.y() >= previous.y());
            previous = bbox;
        }
    }
}
