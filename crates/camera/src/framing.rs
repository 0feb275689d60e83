//! Fly-to pose for a region's bounding box.
//!
//! The camera sits above the box, pulled back along +z so the view is
//! tilted, at the distance where the box's footprint fits the frustum. The
//! look target is nudged off-center so the region clears on-screen UI: to
//! the side on wide layouts, along depth on narrow ones.

use foundation::bounds::Aabb3;
use foundation::math::Vec3;
use serde::Deserialize;

use crate::pose::CameraPose;
use crate::viewport::LayoutClass;

#[derive(Debug, Copy, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FramingConfig {
    /// Multiplier on the fitted distance.
    pub padding: f64,
    /// Horizontal pull-back as a fraction of the height.
    pub depth_offset_ratio: f64,
    /// Look-target shift as a fraction of the distance.
    pub bias_ratio: f64,
    /// Floor applied before padding, so tiny regions are not framed nose-first.
    pub min_distance: f64,
}

impl Default for FramingConfig {
    fn default() -> Self {
        Self {
            padding: 1.3,
            depth_offset_ratio: 0.3,
            bias_ratio: 0.25,
            min_distance: 2.0,
        }
    }
}

/// Unpadded distance at which a `width` x `depth` footprint fills the view.
pub fn fit_distance(width: f64, depth: f64, fov_y_deg: f64, aspect: f64) -> f64 {
    let half_tan = (fov_y_deg.to_radians() * 0.5).tan();
    let aspect = if aspect.is_finite() && aspect > 0.0 {
        aspect
    } else {
        1.0
    };
    let d_depth = depth.max(0.0) / (2.0 * half_tan);
    let d_width = width.max(0.0) / (2.0 * half_tan * aspect);
    d_depth.max(d_width)
}

/// Camera pose that frames `bounds`.
pub fn frame_bounds(
    bounds: &Aabb3,
    fov_y_deg: f64,
    aspect: f64,
    layout: LayoutClass,
    config: &FramingConfig,
) -> CameraPose {
    let center = bounds.center();
    let fitted = fit_distance(bounds.width(), bounds.depth(), fov_y_deg, aspect);
    let distance = fitted.max(config.min_distance) * config.padding;

    let shift = distance * config.bias_ratio;
    let bias = match layout {
        LayoutClass::Wide => Vec3::new(shift, 0.0, 0.0),
        LayoutClass::Narrow => Vec3::new(0.0, 0.0, shift),
    };

    let target = center + bias;
    let position = target + Vec3::new(0.0, distance, distance * config.depth_offset_ratio);
    CameraPose::new(position, target)
}
