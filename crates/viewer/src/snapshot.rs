//! Per-frame state handed to the renderer.

use foundation::math::Vec3;
use layers::LabelView;
use scene::Region;
use scene::selection::InteractionState;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CameraView {
    pub position: [f64; 3],
    pub target: [f64; 3],
    pub fov_y_deg: f64,
    pub near: f64,
    pub far: f64,
}

/// Current appearance of a region whose material or elevation changed
/// since the previous snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionAppearance {
    pub id: u32,
    pub color: String,
    pub opacity: f32,
    pub roughness: f32,
    pub metalness: f32,
    pub elevation: f64,
}

impl From<&Region> for RegionAppearance {
    fn from(region: &Region) -> Self {
        Self {
            id: region.id.index(),
            color: region.material.color.to_css(),
            opacity: region.material.opacity,
            roughness: region.material.roughness,
            metalness: region.material.metalness,
            elevation: region.elevation,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "region", rename_all = "snake_case")]
pub enum StateView {
    None,
    Hovered(u32),
    Selected(u32),
}

impl From<InteractionState> for StateView {
    fn from(state: InteractionState) -> Self {
        match state {
            InteractionState::None => StateView::None,
            InteractionState::Hovered(r) => StateView::Hovered(r.index()),
            InteractionState::Selected(r) => StateView::Selected(r.index()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameSnapshot {
    pub frame: u64,
    pub camera: CameraView,
    pub state: StateView,
    pub regions: Vec<RegionAppearance>,
    pub label: Option<LabelView>,
    pub flying: bool,
}

pub(crate) fn xyz(v: Vec3) -> [f64; 3] {
    [v.x, v.y, v.z]
}
