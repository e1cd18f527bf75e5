use crate::graph::{DEFAULT_MIN_HEIGHT_RATIO, DEFAULT_OVERLAP_THRESHOLD};
use crate::utils::nms::{DEFAULT_SUPPRESSION_IOA, DEFAULT_SUPPRESSION_IOU};
use crate::Errors;
use anyhow::Result;

/// Defines which detections are removed once a track is extracted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SuppressionMode {
    /// Only the track members are removed
    Simple,
    /// The track members and all same-frame boxes duplicating them are removed
    #[default]
    Aggressive,
}

/// Class that is used to configure the GOG tracker
///
/// The cost of a track is `birth_cost + sum(betta - score) + (n - 1) * transition_cost + death_cost`
/// for a track of `n` detections. Tracks are extracted cheapest first while their cost stays
/// below `max_track_cost`.
///
#[derive(Debug, Clone)]
pub struct GogOptions {
    birth_cost: i32,
    death_cost: i32,
    transition_cost: i32,
    betta: f64,
    max_iterations: Option<usize>,
    max_track_cost: i32,
    suppression: SuppressionMode,
    overlap_threshold: f32,
    min_height_ratio: f32,
    suppression_iou: f32,
    suppression_ioa: f32,
}

impl Default for GogOptions {
    fn default() -> Self {
        Self {
            birth_cost: 10,
            death_cost: 10,
            transition_cost: -2,
            betta: 0.01,
            max_iterations: None,
            max_track_cost: 18,
            suppression: SuppressionMode::default(),
            overlap_threshold: DEFAULT_OVERLAP_THRESHOLD,
            min_height_ratio: DEFAULT_MIN_HEIGHT_RATIO,
            suppression_iou: DEFAULT_SUPPRESSION_IOU,
            suppression_ioa: DEFAULT_SUPPRESSION_IOA,
        }
    }
}

impl GogOptions {
    /// The penalty for starting a track
    ///
    pub fn birth_cost(mut self, cost: i32) -> Self {
        self.birth_cost = cost;
        self
    }

    /// The penalty for ending a track
    ///
    pub fn death_cost(mut self, cost: i32) -> Self {
        self.death_cost = cost;
        self
    }

    /// The penalty for linking detections of consecutive frames. Negative values reward long tracks.
    ///
    pub fn transition_cost(mut self, cost: i32) -> Self {
        self.transition_cost = cost;
        self
    }

    /// The per-detection cost is `betta - score`; increasing `betta` produces fewer tracks.
    ///
    pub fn betta(mut self, betta: f64) -> Self {
        self.betta = betta;
        self
    }

    /// The maximum number of extracted tracks, `None` means unbounded
    ///
    pub fn max_iterations(mut self, n: Option<usize>) -> Self {
        self.max_iterations = n;
        self
    }

    /// The tracking stops when the cheapest remaining track costs this much or more
    ///
    pub fn max_track_cost(mut self, cost: i32) -> Self {
        self.max_track_cost = cost;
        self
    }

    pub fn suppression(mut self, mode: SuppressionMode) -> Self {
        self.suppression = mode;
        self
    }

    /// The IoU a detection must exceed to be linked with a detection of the previous frame
    ///
    pub fn overlap_threshold(mut self, threshold: f32) -> Self {
        self.overlap_threshold = threshold;
        self
    }

    /// Linked detections must have `min(r, 1 / r)` of their height ratio above the value
    ///
    pub fn min_height_ratio(mut self, ratio: f32) -> Self {
        self.min_height_ratio = ratio;
        self
    }

    /// The IoU a same-frame box must exceed to be suppressed in [`SuppressionMode::Aggressive`]
    ///
    pub fn suppression_iou(mut self, threshold: f32) -> Self {
        self.suppression_iou = threshold;
        self
    }

    /// The IoA a same-frame box must exceed to be suppressed in [`SuppressionMode::Aggressive`]
    ///
    pub fn suppression_ioa(mut self, threshold: f32) -> Self {
        self.suppression_ioa = threshold;
        self
    }

    pub fn get_birth_cost(&self) -> i32 {
        self.birth_cost
    }

    pub fn get_death_cost(&self) -> i32 {
        self.death_cost
    }

    pub fn get_transition_cost(&self) -> i32 {
        self.transition_cost
    }

    pub fn get_betta(&self) -> f64 {
        self.betta
    }

    pub fn get_max_iterations(&self) -> Option<usize> {
        self.max_iterations
    }

    pub fn get_max_track_cost(&self) -> i32 {
        self.max_track_cost
    }

    pub fn get_suppression(&self) -> SuppressionMode {
        self.suppression
    }

    pub fn get_overlap_threshold(&self) -> f32 {
        self.overlap_threshold
    }

    pub fn get_min_height_ratio(&self) -> f32 {
        self.min_height_ratio
    }

    pub fn get_suppression_iou(&self) -> f32 {
        self.suppression_iou
    }

    pub fn get_suppression_ioa(&self) -> f32 {
        self.suppression_ioa
    }

    /// Checks that the options define a meaningful tracking problem.
    ///
    /// Every threshold must be in `(0, 1]`, `betta` must be finite and the iteration
    /// ceiling, when set, must be positive.
    ///
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("overlap_threshold", self.overlap_threshold),
            ("min_height_ratio", self.min_height_ratio),
            ("suppression_iou", self.suppression_iou),
            ("suppression_ioa", self.suppression_ioa),
        ] {
            if !(value > 0.0 && value <= 1.0) {
                return Err(Errors::ThresholdOutOfRange(name, value).into());
            }
        }

        if !self.betta.is_finite() {
            return Err(Errors::NonFiniteBetta(self.betta).into());
        }

        if self.max_iterations == Some(0) {
            return Err(Errors::ZeroIterations.into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::trackers::gog::options::{GogOptions, SuppressionMode};
    use crate::Errors;

    #[test]
    fn defaults() {
        let opts = GogOptions::default();
        assert_eq!(opts.get_birth_cost(), 10);
        assert_eq!(opts.get_death_cost(), 10);
        assert_eq!(opts.get_transition_cost(), -2);
        assert_eq!(opts.get_betta(), 0.01);
        assert_eq!(opts.get_max_iterations(), None);
        assert_eq!(opts.get_max_track_cost(), 18);
        assert_eq!(opts.get_suppression(), SuppressionMode::Aggressive);
        assert_eq!(opts.get_overlap_threshold(), 0.3);
        assert_eq!(opts.get_min_height_ratio(), 0.8);
        assert_eq!(opts.get_suppression_iou(), 0.5);
        assert_eq!(opts.get_suppression_ioa(), 0.9);
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn builder() {
        let opts = GogOptions::default()
            .birth_cost(5)
            .death_cost(6)
            .transition_cost(0)
            .betta(0.2)
            .max_iterations(Some(3))
            .max_track_cost(30)
            .suppression(SuppressionMode::Simple);
        assert_eq!(opts.get_birth_cost(), 5);
        assert_eq!(opts.get_death_cost(), 6);
        assert_eq!(opts.get_transition_cost(), 0);
        assert_eq!(opts.get_betta(), 0.2);
        assert_eq!(opts.get_max_iterations(), Some(3));
        assert_eq!(opts.get_max_track_cost(), 30);
        assert_eq!(opts.get_suppression(), SuppressionMode::Simple);
    }

    fn error_of(opts: GogOptions) -> Errors {
        opts.validate().unwrap_err().downcast::<Errors>().unwrap()
    }

    #[test]
    fn invalid_thresholds() {
        assert_eq!(
            error_of(GogOptions::default().overlap_threshold(0.0)),
            Errors::ThresholdOutOfRange("overlap_threshold", 0.0)
        );
        assert_eq!(
            error_of(GogOptions::default().min_height_ratio(1.5)),
            Errors::ThresholdOutOfRange("min_height_ratio", 1.5)
        );
        assert_eq!(
            error_of(GogOptions::default().suppression_iou(-0.5)),
            Errors::ThresholdOutOfRange("suppression_iou", -0.5)
        );
        assert!(matches!(
            error_of(GogOptions::default().suppression_ioa(f32::NAN)),
            Errors::ThresholdOutOfRange("suppression_ioa", _)
        ));
    }

    #[test]
    fn invalid_costs() {
        assert_eq!(
            error_of(GogOptions::default().betta(f64::INFINITY)),
            Errors::NonFiniteBetta(f64::INFINITY)
        );
        assert_eq!(
            error_of(GogOptions::default().max_iterations(Some(0))),
            Errors::ZeroIterations
        );
    }
}
