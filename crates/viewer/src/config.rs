use camera::{DEFAULT_FLIGHT_DURATION_S, FramingConfig, PanZoomConfig};
use layers::LabelConfig;
use scene::selection::SelectionStyle;
use serde::Deserialize;

use crate::error::{Result, ViewerError};

/// Everything the host may tune. Any subset can be supplied as JSON; missing
/// fields keep their defaults.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub pan_zoom: PanZoomConfig,
    pub framing: FramingConfig,
    pub selection: SelectionStyle,
    pub label: LabelConfig,
    pub flight_duration_s: f64,
    /// Largest press-to-release displacement (CSS px) still treated as a
    /// click rather than a drag.
    pub click_threshold_px: f64,
    pub fov_y_deg: f64,
    pub near: f64,
    pub far: f64,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            pan_zoom: PanZoomConfig::default(),
            framing: FramingConfig::default(),
            selection: SelectionStyle::default(),
            label: LabelConfig::default(),
            flight_duration_s: DEFAULT_FLIGHT_DURATION_S,
            click_threshold_px: 5.0,
            fov_y_deg: 45.0,
            near: 0.1,
            far: 2000.0,
        }
    }
}

impl ViewerConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).map_err(ViewerError::Config)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values the frame loop cannot run with: inverted ranges,
    /// degenerate projections and dampings that never decay.
    pub fn validate(&self) -> Result<()> {
        let pz = &self.pan_zoom;
        let damping = |v: f64| (0.0..1.0).contains(&v);
        let checks = [
            (pz.min_height > 0.0, "pan_zoom.min_height must be positive"),
            (
                pz.min_height <= pz.max_height,
                "pan_zoom.min_height must not exceed pan_zoom.max_height",
            ),
            (pz.max_height.is_finite(), "pan_zoom.max_height must be finite"),
            (pz.reference_height > 0.0, "pan_zoom.reference_height must be positive"),
            (pz.base_pan_speed >= 0.0, "pan_zoom.base_pan_speed must not be negative"),
            (pz.zoom_speed >= 0.0, "pan_zoom.zoom_speed must not be negative"),
            (damping(pz.pan_damping), "pan_zoom.pan_damping must be in [0, 1)"),
            (damping(pz.zoom_damping), "pan_zoom.zoom_damping must be in [0, 1)"),
            (pz.epsilon > 0.0, "pan_zoom.epsilon must be positive"),
            (self.framing.padding > 0.0, "framing.padding must be positive"),
            (self.framing.min_distance >= 0.0, "framing.min_distance must not be negative"),
            (self.label.fade_speed >= 0.0, "label.fade_speed must not be negative"),
            (
                self.fov_y_deg > 0.0 && self.fov_y_deg < 180.0,
                "fov_y_deg must be in (0, 180)",
            ),
            (self.near > 0.0 && self.near < self.far, "near must be in (0, far)"),
            (self.far.is_finite(), "far must be finite"),
            (self.flight_duration_s >= 0.0, "flight_duration_s must not be negative"),
            (self.click_threshold_px >= 0.0, "click_threshold_px must not be negative"),
        ];
        // NaN fails every comparison above.
        match checks.iter().find(|(ok, _)| !ok) {
            Some((_, reason)) => Err(ViewerError::InvalidConfig((*reason).to_string())),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ViewerConfig;
    use crate::error::ViewerError;
    use pretty_assertions::assert_eq;
    use scene::Color;

    #[test]
    fn empty_object_yields_defaults() {
        assert_eq!(ViewerConfig::from_json("{}").expect("valid"), ViewerConfig::default());
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let cfg = ViewerConfig::from_json(
            r#"{
                "click_threshold_px": 8,
                "pan_zoom": { "max_height": 30 },
                "selection": { "selected_color": 16711680 }
            }"#,
        )
        .expect("valid");

        let mut expected = ViewerConfig::default();
        expected.click_threshold_px = 8.0;
        expected.pan_zoom.max_height = 30.0;
        expected.selection.selected_color = Color(0xff0000);
        assert_eq!(cfg, expected);
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        let err = ViewerConfig::from_json(r#"{"fov_y_deg": "wide"}"#).unwrap_err();
        assert!(matches!(err, ViewerError::Config(_)));
        assert!(err.to_string().starts_with("invalid viewer configuration"));
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        for json in [
            r#"{"pan_zoom": {"min_height": 60, "max_height": 50}}"#,
            r#"{"pan_zoom": {"pan_damping": 1.0}}"#,
            r#"{"pan_zoom": {"epsilon": 0}}"#,
            r#"{"fov_y_deg": 0}"#,
            r#"{"fov_y_deg": 180}"#,
            r#"{"near": 5, "far": 1}"#,
            r#"{"framing": {"padding": 0}}"#,
            r#"{"flight_duration_s": -1}"#,
            r#"{"click_threshold_px": -2}"#,
        ] {
            let err = ViewerConfig::from_json(json).unwrap_err();
            assert!(matches!(err, ViewerError::InvalidConfig(_)), "{json}: {err}");
        }
    }

    #[test]
    fn defaults_pass_validation() {
        ViewerConfig::default().validate().expect("defaults are valid");
    }
}
