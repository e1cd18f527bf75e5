use crate::detection::DetectionStore;
use crate::graph::TrackingGraph;
use crate::trackers::gog::options::{GogOptions, SuppressionMode};
use crate::trackers::gog::{Track, TrackingResult};
use crate::utils::nms::duplicates;
use crate::Errors;
use anyhow::Result;
use log::{debug, trace};
use std::collections::HashSet;

/// Predecessor of a detection on the cheapest path ending at it
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BackLink {
    /// The path starts at the detection
    Birth,
    /// The path continues the detection at the position
    From(usize),
}

/// Dynamic programming state of a single detection
#[derive(Clone, Debug)]
struct Node {
    raw_cost: f64,
    path_cost: f64,
    back_link: BackLink,
    origin: usize,
    active: bool,
}

/// Working state of a single tracking run.
///
/// Every iteration recomputes the cheapest paths only for the detections scheduled for
/// recomputation, extracts the globally cheapest path as a new track, removes its members
/// (and their duplicates in [`SuppressionMode::Aggressive`]) and schedules the detections
/// whose paths started where a removed detection's path started.
///
pub struct GogSolver<'a> {
    store: &'a DetectionStore,
    graph: &'a TrackingGraph,
    opts: &'a GogOptions,
    nodes: Vec<Node>,
    scheduled: Vec<usize>,
}

impl<'a> GogSolver<'a> {
    /// # Errors
    /// Fails with [`Errors::GraphMismatch`] when the graph was built for another store.
    ///
    pub fn new(
        store: &'a DetectionStore,
        graph: &'a TrackingGraph,
        opts: &'a GogOptions,
    ) -> Result<Self> {
        if store.len() != graph.len() {
            return Err(Errors::GraphMismatch {
                detections: store.len(),
                nodes: graph.len(),
            }
            .into());
        }

        let betta = opts.get_betta();
        let nodes = store
            .iter()
            .enumerate()
            .map(|(position, d)| Node {
                raw_cost: betta - d.score as f64,
                path_cost: f64::INFINITY,
                back_link: BackLink::Birth,
                origin: position,
                active: true,
            })
            .collect::<Vec<_>>();

        Ok(Self {
            store,
            graph,
            opts,
            scheduled: (0..nodes.len()).collect(),
            nodes,
        })
    }

    /// Runs the iterations until the cheapest remaining track is too expensive, the
    /// iteration ceiling is reached or no detections are left.
    ///
    pub fn run(mut self) -> TrackingResult {
        let mut tracks = Vec::new();
        let mut min_costs = Vec::new();
        let mut iteration = 0;

        if self.nodes.is_empty() {
            return TrackingResult::new(tracks, iteration, min_costs);
        }

        let max_track_cost = self.opts.get_max_track_cost() as f64;

        loop {
            if let Some(max_iterations) = self.opts.get_max_iterations() {
                if iteration >= max_iterations {
                    debug!("Iteration ceiling {} is reached", max_iterations);
                    break;
                }
            }
            iteration += 1;

            self.reset();
            self.relax();

            let (end, cost) = match self.cheapest_end() {
                Some(res) => res,
                None => {
                    debug!("Iteration {}: no detections left", iteration);
                    break;
                }
            };
            min_costs.push(cost);

            if cost >= max_track_cost {
                debug!(
                    "Iteration {}: the cheapest track costs {:.4}, the limit is {}",
                    iteration, cost, max_track_cost
                );
                break;
            }

            let positions = self.backtrack(end);
            let suppressed = self.suppressed(&positions);
            let origins: HashSet<usize> = match self.opts.get_suppression() {
                SuppressionMode::Aggressive => {
                    suppressed.iter().map(|&p| self.nodes[p].origin).collect()
                }
                SuppressionMode::Simple => HashSet::from([self.nodes[positions[0]].origin]),
            };

            for &p in &suppressed {
                self.nodes[p].active = false;
            }

            self.scheduled = self
                .nodes
                .iter()
                .enumerate()
                .filter(|(_, n)| n.active && origins.contains(&n.origin))
                .map(|(p, _)| p)
                .collect();

            debug!(
                "Iteration {}: track of {} detections with cost {:.4}, {} suppressed, {} scheduled",
                iteration,
                positions.len(),
                cost,
                suppressed.len(),
                self.scheduled.len()
            );
            trace!("Suppressed detections: {:?}", &suppressed);

            tracks.push(Track::new(iteration as u64, positions, cost));
        }

        TrackingResult::new(tracks, iteration, min_costs)
    }

    /// Every scheduled detection starts a fresh track
    ///
    fn reset(&mut self) {
        let birth_cost = self.opts.get_birth_cost() as f64;
        for &p in &self.scheduled {
            let node = &mut self.nodes[p];
            node.path_cost = node.raw_cost + birth_cost;
            node.back_link = BackLink::Birth;
            node.origin = p;
        }
    }

    /// Single forward pass: edges point to the previous frame only and positions grow with
    /// frames, so ascending order visits every predecessor before its successors.
    ///
    fn relax(&mut self) {
        let transition_cost = self.opts.get_transition_cost() as f64;
        for &p in &self.scheduled {
            let raw_cost = self.nodes[p].raw_cost;
            let best = self
                .graph
                .neighbors(p)
                .iter()
                .filter(|&&n| self.nodes[n].active)
                .map(|&n| (n, transition_cost + raw_cost + self.nodes[n].path_cost))
                .min_by(|l, r| l.1.total_cmp(&r.1));

            if let Some((link, cost)) = best {
                if cost < self.nodes[p].path_cost {
                    let origin = self.nodes[link].origin;
                    let node = &mut self.nodes[p];
                    node.path_cost = cost;
                    node.back_link = BackLink::From(link);
                    node.origin = origin;
                }
            }
        }
    }

    /// The position and the cost of the cheapest track end among the remaining detections
    ///
    fn cheapest_end(&self) -> Option<(usize, f64)> {
        let death_cost = self.opts.get_death_cost() as f64;
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.active)
            .map(|(p, n)| (p, n.path_cost + death_cost))
            .min_by(|l, r| l.1.total_cmp(&r.1))
    }

    /// The path ending at `end`, from birth to death
    ///
    fn backtrack(&self, end: usize) -> Vec<usize> {
        let mut positions = vec![end];
        let mut current = end;
        while let BackLink::From(previous) = self.nodes[current].back_link {
            debug_assert!(self.nodes[previous].active);
            positions.push(previous);
            current = previous;
        }
        positions.reverse();
        positions
    }

    /// Positions removed together with the track, sorted
    ///
    fn suppressed(&self, track: &[usize]) -> Vec<usize> {
        let mut suppressed = track.to_vec();
        if self.opts.get_suppression() == SuppressionMode::Aggressive {
            let store = self.store;
            for &member in track {
                let candidates = self
                    .graph
                    .frames()
                    .range(store[member].frame)
                    .filter(|&p| self.nodes[p].active)
                    .map(|p| (p, &store[p].bbox));
                suppressed.extend(duplicates(
                    &store[member].bbox,
                    candidates,
                    self.opts.get_suppression_iou(),
                    self.opts.get_suppression_ioa(),
                ));
            }
        }
        suppressed.sort_unstable();
        suppressed.dedup();
        suppressed
    }
}
