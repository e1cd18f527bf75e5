use crate::utils::bbox::BoundingBox;

/// Default IoU above which a same-frame box is treated as a duplicate of a track member
pub const DEFAULT_SUPPRESSION_IOU: f32 = 0.5;

/// Default IoA above which a same-frame box is treated as a duplicate of a track member
pub const DEFAULT_SUPPRESSION_IOA: f32 = 0.9;

/// Finds the candidates duplicating `member`.
///
/// # Parameters
/// * `member` - the box kept by the tracker, the IoA is computed against its area;
/// * `candidates` - `(position, box)` pairs of the same frame, `member` itself may be among them;
/// * `iou_threshold` - the candidate is a duplicate only when IoU is strictly greater;
/// * `ioa_threshold` - the candidate is a duplicate only when IoA is strictly greater.
///
/// Returns the positions of duplicates in the order of `candidates`.
///
pub fn duplicates<'a, I>(
    member: &BoundingBox,
    candidates: I,
    iou_threshold: f32,
    ioa_threshold: f32,
) -> Vec<usize>
where
    I: IntoIterator<Item = (usize, &'a BoundingBox)>,
{
    candidates
        .into_iter()
        .filter(|(_, other)| {
            let overlap = BoundingBox::overlap(member, other);
            overlap.iou > iou_threshold && overlap.ioa > ioa_threshold
        })
        .map(|(position, _)| position)
        .collect()
}
