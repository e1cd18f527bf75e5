use anyhow::Result;
use gog::examples::{BoxWalk, SequenceGen};
use gog::prelude::{BoundingBox, DetectionStoreBuilder, GogOptions, GogTracker, SuppressionMode};

fn main() -> Result<()> {
    env_logger::init();

    let pos_drift = 1.0;
    let box_drift = 0.2;
    let mut rng = rand::thread_rng();
    let mut b1 = BoxWalk::forward(
        BoundingBox::new(100.0, 100.0, 10.0, 15.0),
        pos_drift,
        box_drift,
    );
    let mut b2 = BoxWalk::forward(
        BoundingBox::new(10.0, 10.0, 12.0, 18.0),
        pos_drift,
        box_drift,
    );

    let mut builder = DetectionStoreBuilder::new();
    for frame in 1..=10 {
        builder.add(frame, b1.step(&mut rng), 0.9);
        // the second object is missed in the 5th frame, so it is split into two tracks
        let b = b2.step(&mut rng);
        if frame != 5 {
            builder.add(frame, b, 0.8);
        }
    }
    let store = builder.build()?;

    let tracker = GogTracker::new(GogOptions::default())?;
    let res = tracker.track(&store)?;
    for t in res.tracks() {
        eprintln!(
            "Track id: {}, detections: {}, cost: {:.3}",
            t.get_track_id(),
            t.len(),
            t.cost()
        );
    }

    for frame in res.frames(&store) {
        eprintln!("Frame {}: {:?}", frame.frame, frame.boxes);
    }

    let noisy = SequenceGen::new(5, 50)
        .miss_rate(0.05)
        .duplicate_rate(0.3)
        .generate();
    for mode in [SuppressionMode::Simple, SuppressionMode::Aggressive] {
        let tracker = GogTracker::new(GogOptions::default().suppression(mode))?;
        let res = tracker.track(&noisy)?;
        eprintln!(
            "{:?} suppression: {} tracks from {} detections, cheapest costs per iteration: {:?}",
            mode,
            res.tracks().len(),
            noisy.len(),
            res.min_costs()
        );
    }

    Ok(())
}
