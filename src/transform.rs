use log::info;
use serde::Serialize;

use crate::core::geometry::scale_coord;
use crate::core::index::PageModel;

/// Spatial adjustments applied after derivation. Absent values are no-ops.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct TransformSettings {
    pub x_offset: Option<i32>,
    pub y_offset: Option<i32>,
    pub scale: Option<f64>,
    /// Explicit page size (width, height) replacing the derived bounds.
    pub canvas: Option<(i32, i32)>,
}

impl TransformSettings {
    /// Offset, then scale, then canvas override.
    pub fn apply(&self, model: &mut PageModel) {
        apply_offset(
            model,
            self.x_offset.unwrap_or_default(),
            self.y_offset.unwrap_or_default(),
        );
        let scale = self.scale.unwrap_or_default();
        apply_scale(model, scale);
        if let Some((width, height)) = self.canvas {
            apply_canvas(model, width, height, scale);
        }
    }
}

/// Shifts every segment. Ignored unless both offsets are non-negative and at
/// least one is positive.
pub fn apply_offset(model: &mut PageModel, dx: i32, dy: i32) -> bool {
    if !(dx >= 0 && dy >= 0 && (dx > 0 || dy > 0)) {
        return false;
    }
    info!("applying pixel offset ({dx}, {dy})");
    model.for_each_segment_mut(|segment| segment.region.translate(dx, dy));
    true
}

/// Scales every segment down by `factor`. Ignored unless `factor > 0`.
pub fn apply_scale(model: &mut PageModel, factor: f64) -> bool {
    if factor.is_nan() || factor <= 0.0 {
        return false;
    }
    info!("scaling geometry down by {factor}");
    model.for_each_segment_mut(|segment| segment.region.scale_down(factor));
    true
}

/// Replaces the page size with an explicit canvas, scaled like everything
/// else when `factor > 0`.
pub fn apply_canvas(model: &mut PageModel, width: i32, height: i32, factor: f64) {
    let region = &mut model.page_mut().region;
    if factor > 0.0 {
        region.width = Some(scale_coord(width, factor));
        region.height = scale_coord(height, factor);
    } else {
        region.width = Some(width);
        region.height = height;
    }
}
