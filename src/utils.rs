/// Bounding boxes
pub mod bbox;

/// Same-frame duplicate suppression for boxes along extracted tracks
pub mod nms;
