use crate::detection::DetectionStore;
use crate::trackers::gog::Track;
use crate::utils::bbox::BoundingBox;

/// Box of a tracked detection labeled with its track
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrackedBox {
    pub bbox: BoundingBox,
    pub track_id: u64,
}

/// Tracked boxes of a single frame
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameTracks {
    pub frame: usize,
    pub boxes: Vec<TrackedBox>,
}

/// Scatters the members of `tracks` into frame buckets.
///
/// The result holds one entry per frame from `1` to the last frame of `store`, frames
/// without tracked detections have empty `boxes`. Within a frame the boxes follow the
/// order of the tracks.
///
pub fn assemble(store: &DetectionStore, tracks: &[Track]) -> Vec<FrameTracks> {
    let mut frames = (1..=store.last_frame())
        .map(|frame| FrameTracks {
            frame,
            boxes: Vec::new(),
        })
        .collect::<Vec<_>>();

    for track in tracks {
        for &position in track.positions() {
            let detection = &store[position];
            frames[detection.frame - 1].boxes.push(TrackedBox {
                bbox: detection.bbox,
                track_id: track.get_track_id(),
            });
        }
    }

    frames
}
