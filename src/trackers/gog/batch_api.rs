use crate::detection::DetectionStore;
use crate::trackers::gog::{GogTracker, TrackingResult};
use anyhow::Result;
use log::debug;
use rayon::prelude::*;
use std::collections::BTreeMap;

pub type SceneTracks = (u64, TrackingResult);

/// Independent detection sequences keyed by a customer-specific scene identifier
/// (camera id, object class, etc...)
///
#[derive(Debug, Clone, Default)]
pub struct SceneBatch {
    scenes: BTreeMap<u64, DetectionStore>,
}

impl SceneBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the sequence of `scene_id`, returns the sequence previously added for it
    ///
    pub fn add(&mut self, scene_id: u64, store: DetectionStore) -> Option<DetectionStore> {
        self.scenes.insert(scene_id, store)
    }

    pub fn get(&self, scene_id: u64) -> Option<&DetectionStore> {
        self.scenes.get(&scene_id)
    }

    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }
}

impl GogTracker {
    /// Tracks every scene of the batch in parallel.
    ///
    /// Each scene is processed as a separate run with its own graph and working state, so
    /// the result of a scene is the same as the one of [`track`](GogTracker::track).
    /// The results are sorted by scene id.
    ///
    pub fn track_batch(&self, batch: &SceneBatch) -> Result<Vec<SceneTracks>> {
        debug!("Tracking a batch of {} scenes", batch.len());
        let mut res = batch
            .scenes
            .par_iter()
            .map(|(scene_id, store)| self.track(store).map(|res| (*scene_id, res)))
            .collect::<Result<Vec<_>>>()?;
        res.sort_by_key(|(scene_id, _)| *scene_id);
        Ok(res)
    }
}
