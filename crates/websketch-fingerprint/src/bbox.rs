//! Bounding-box utilities shared by hashing and diffing: quantization, the
//! exact string form that enters the shallow hash, and intersection-over-union.

use websketch_core::{BBox01, BBOX_QUANT_STEP};

/// Fractional digits used by [`bbox_string`] in hash records.
pub const HASH_PRECISION: usize = 3;

/// Round every component of `bbox` to the nearest multiple of `step`,
/// half away from zero. Suppresses sub-pixel jitter before hashing and
/// sibling ordering.
#[must_use]
pub fn quantize(bbox: BBox01, step: f64) -> BBox01 {
    BBox01(bbox.0.map(|c| {
        let q = (c / step).round() * step;
        // IEEE negative zero would leak a sign into the string form.
        if q == 0.0 { 0.0 } else { q }
    }))
}

/// Quantize with the default [`BBOX_QUANT_STEP`].
#[must_use]
pub fn quantize_default(bbox: BBox01) -> BBox01 {
    quantize(bbox, BBOX_QUANT_STEP)
}

/// Fixed-precision comma-joined string form of `bbox`. This exact
/// representation enters the shallow-node hash, so precision is part of the
/// wire contract.
#[must_use]
pub fn bbox_string(bbox: &BBox01, precision: usize) -> String {
    let [x, y, w, h] = bbox.0;
    format!("{x:.precision$},{y:.precision$},{w:.precision$},{h:.precision$}")
}

/// Intersection-over-union of two boxes, in `[0, 1]`. Zero-union pairs
/// (two zero-area boxes) score 0.
#[must_use]
pub fn bbox_iou(a: &BBox01, b: &BBox01) -> f64 {
    let ix = (a.x() + a.w()).min(b.x() + b.w()) - a.x().max(b.x());
    let iy = (a.y() + a.h()).min(b.y() + b.h()) - a.y().max(b.y());
    let intersection = ix.max(0.0) * iy.max(0.0);
    let union = a.area() + b.area() - intersection;
    if union <= 0.0 {
        0.0
    } else {
        intersection / union
    }
}
