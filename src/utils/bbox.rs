use crate::{EstimateClose, EPS};

/// Bounding box in the format (x, y, width, height), where (x, y) is the top-left corner
///
#[derive(Clone, Default, Debug, Copy)]
pub struct BoundingBox {
    x: f32,
    y: f32,
    width: f32,
    height: f32,
}

/// Pairwise overlap of two boxes
///
/// * `iou` - intersection over union;
/// * `ioa` - intersection over the area of the reference (left) box.
///
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Overlap {
    pub iou: f32,
    pub ioa: f32,
}

impl BoundingBox {
    /// Constructor
    ///
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn area(&self) -> f32 {
        self.width * self.height
    }

    /// Corners in the format (min-x, min-y, max-x, max-y)
    ///
    pub fn corners(&self) -> (f32, f32, f32, f32) {
        (self.x, self.y, self.x + self.width, self.y + self.height)
    }

    pub fn intersection(l: &BoundingBox, r: &BoundingBox) -> f32 {
        let (ax0, ay0, ax1, ay1) = l.corners();
        let (bx0, by0, bx1, by1) = r.corners();

        if ax0 > bx1 || ax1 < bx0 || ay0 > by1 || ay1 < by0 {
            return 0.0;
        }

        let int_width = ax1.min(bx1) - ax0.max(bx0);
        let int_height = ay1.min(by1) - ay0.max(by0);
        int_width * int_height
    }

    /// IoU and IoA of two boxes; IoA is computed against the area of `reference`.
    ///
    pub fn overlap(reference: &BoundingBox, other: &BoundingBox) -> Overlap {
        let intersection = BoundingBox::intersection(reference, other);
        if intersection <= 0.0 {
            return Overlap::default();
        }

        let reference_area = reference.area();
        let union = reference_area + other.area() - intersection;
        Overlap {
            iou: intersection / union,
            ioa: intersection / reference_area,
        }
    }

    /// Symmetric height consistency: `min(r, 1 / r)` for `r = current.height / previous.height`.
    /// Always falls in (0, 1] for boxes with positive heights.
    ///
    pub fn height_consistency(previous: &BoundingBox, current: &BoundingBox) -> f32 {
        let ratio = current.height / previous.height;
        ratio.min(1.0 / ratio)
    }
}

impl EstimateClose for BoundingBox {
    /// Allows comparing bboxes
    ///
    fn almost_same(&self, other: &Self, eps: f32) -> bool {
        (self.x - other.x).abs() < eps
            && (self.y - other.y).abs() < eps
            && (self.width - other.width).abs() < eps
            && (self.height - other.height).abs() < eps
    }
}

impl PartialEq<Self> for BoundingBox {
    fn eq(&self, other: &Self) -> bool {
        self.almost_same(other, EPS)
    }
}

#[cfg(test)]
mod tests {
    use crate::utils::bbox::{BoundingBox, Overlap};
    use crate::EPS;

    #[test]
    fn identical_boxes() {
        let bb = BoundingBox::new(3.0, 4.0, 10.0, 20.0);
        let ov = BoundingBox::overlap(&bb, &bb);
        assert!((ov.iou - 1.0).abs() < EPS);
        assert!((ov.ioa - 1.0).abs() < EPS);
    }

    #[test]
    fn disjoint_boxes() {
        let bb1 = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        let bb2 = BoundingBox::new(50.0, 0.0, 10.0, 10.0);
        let bb3 = BoundingBox::new(0.0, 50.0, 10.0, 10.0);
        assert_eq!(BoundingBox::overlap(&bb1, &bb2), Overlap::default());
        assert_eq!(BoundingBox::overlap(&bb1, &bb3), Overlap::default());
        assert_eq!(BoundingBox::intersection(&bb2, &bb3), 0.0);
    }

    #[test]
    fn touching_boxes() {
        let bb1 = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        let bb2 = BoundingBox::new(10.0, 0.0, 10.0, 10.0);
        assert_eq!(BoundingBox::overlap(&bb1, &bb2), Overlap::default());
    }

    #[test]
    fn partial_overlap() {
        let bb1 = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        let bb2 = BoundingBox::new(1.0, 1.0, 10.0, 10.0);
        let ov = BoundingBox::overlap(&bb1, &bb2);
        assert!((ov.iou - 81.0 / 119.0).abs() < EPS);
        assert!((ov.ioa - 0.81).abs() < EPS);
    }

    #[test]
    fn ioa_is_asymmetric() {
        let small = BoundingBox::new(5.0, 5.0, 10.0, 10.0);
        let large = BoundingBox::new(0.0, 0.0, 20.0, 20.0);
        let ov_small = BoundingBox::overlap(&small, &large);
        let ov_large = BoundingBox::overlap(&large, &small);
        assert!((ov_small.iou - ov_large.iou).abs() < EPS);
        assert!((ov_small.ioa - 1.0).abs() < EPS);
        assert!((ov_large.ioa - 0.25).abs() < EPS);
    }

    #[test]
    fn height_consistency() {
        let bb1 = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        let bb2 = BoundingBox::new(0.0, 0.0, 10.0, 20.0);
        assert!((BoundingBox::height_consistency(&bb1, &bb2) - 0.5).abs() < EPS);
        assert!((BoundingBox::height_consistency(&bb2, &bb1) - 0.5).abs() < EPS);
        assert!((BoundingBox::height_consistency(&bb1, &bb1) - 1.0).abs() < EPS);
    }
}
