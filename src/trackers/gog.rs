use crate::detection::DetectionStore;
use crate::graph::TrackingGraph;
use crate::trackers::gog::assembler::{assemble, FrameTracks};
use crate::trackers::gog::options::GogOptions;
use crate::trackers::gog::solver::GogSolver;
use anyhow::Result;
use log::info;

/// Tracker configuration
pub mod options;

/// Iterative cheapest-path extraction
pub mod solver;

/// Regrouping of tracks by frames
pub mod assembler;

/// Tracking of many independent sequences at once
pub mod batch_api;

/// Track extracted by the solver
///
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    track_id: u64,
    positions: Vec<usize>,
    cost: f64,
}

impl Track {
    pub(crate) fn new(track_id: u64, positions: Vec<usize>, cost: f64) -> Self {
        Self {
            track_id,
            positions,
            cost,
        }
    }

    /// The number of the iteration the track was extracted at, starting from `1`
    ///
    pub fn get_track_id(&self) -> u64 {
        self.track_id
    }

    /// Positions of the detections in the store, from the birth to the death of the track
    ///
    pub fn positions(&self) -> &[usize] {
        &self.positions
    }

    /// Total cost the track was extracted with
    ///
    pub fn cost(&self) -> f64 {
        self.cost
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Outcome of a single tracking run
///
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackingResult {
    tracks: Vec<Track>,
    iterations: usize,
    min_costs: Vec<f64>,
}

impl TrackingResult {
    pub(crate) fn new(tracks: Vec<Track>, iterations: usize, min_costs: Vec<f64>) -> Self {
        Self {
            tracks,
            iterations,
            min_costs,
        }
    }

    /// Tracks in the order of extraction
    ///
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn into_tracks(self) -> Vec<Track> {
        self.tracks
    }

    /// The number of started iterations, including the one that stopped the run
    ///
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// The cheapest track cost found at every iteration, including the rejected last one
    ///
    pub fn min_costs(&self) -> &[f64] {
        &self.min_costs
    }

    /// Tracked boxes grouped by frames of `store`, see [`assemble`]
    ///
    pub fn frames(&self, store: &DetectionStore) -> Vec<FrameTracks> {
        assemble(store, &self.tracks)
    }
}

/// Offline GOG tracker
///
/// The tracker keeps no state between runs, every call of [`track`](GogTracker::track)
/// builds its own graph and working state.
///
#[derive(Debug, Clone, Default)]
pub struct GogTracker {
    opts: GogOptions,
}

impl GogTracker {
    /// Creates new tracker
    ///
    /// # Errors
    /// Fails when the options don't pass [`GogOptions::validate`].
    ///
    pub fn new(opts: GogOptions) -> Result<Self> {
        opts.validate()?;
        Ok(Self { opts })
    }

    pub fn options(&self) -> &GogOptions {
        &self.opts
    }

    /// Builds the adjacency graph for the store with the tracker's thresholds
    ///
    pub fn graph(&self, store: &DetectionStore) -> TrackingGraph {
        TrackingGraph::new(
            store,
            self.opts.get_overlap_threshold(),
            self.opts.get_min_height_ratio(),
        )
    }

    /// Extracts tracks from the detections of a whole sequence
    ///
    pub fn track(&self, store: &DetectionStore) -> Result<TrackingResult> {
        let graph = self.graph(store);
        self.track_with_graph(store, &graph)
    }

    /// Extracts tracks using a prebuilt graph
    ///
    /// # Errors
    /// Fails with [`Errors::GraphMismatch`](crate::Errors::GraphMismatch) when the graph
    /// was built for another store.
    ///
    pub fn track_with_graph(
        &self,
        store: &DetectionStore,
        graph: &TrackingGraph,
    ) -> Result<TrackingResult> {
        let res = GogSolver::new(store, graph, &self.opts)?.run();
        info!(
            "{} tracks extracted from {} detections in {} iterations",
            res.tracks().len(),
            store.len(),
            res.iterations()
        );
        Ok(res)
    }
}
