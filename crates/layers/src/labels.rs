//! Floating label pinned above the selected region.

use foundation::math::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Maps a world point to viewport-local pixels (Y down). `None` when the
/// point cannot be placed, e.g. it lies behind the camera.
pub trait LabelProjector {
    fn project(&self, world: Vec3) -> Option<Vec2>;
}

#[derive(Debug, Copy, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LabelConfig {
    /// Opacity change per second while fading.
    pub fade_speed: f64,
    /// Upward screen offset from the projected anchor.
    pub offset_px: f64,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            fade_speed: 4.0,
            offset_px: 12.0,
        }
    }
}

/// What the host draws this frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelView {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub opacity: f64,
}

#[derive(Debug, Clone, Default)]
pub struct FloatingLabel {
    config: LabelConfig,
    text: String,
    anchor: Option<Vec3>,
    screen: Option<Vec2>,
    opacity: f64,
    target_opacity: f64,
}

impl FloatingLabel {
    pub fn new(config: LabelConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn set_config(&mut self, config: LabelConfig) {
        self.config = config;
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn anchor(&self) -> Option<Vec3> {
        self.anchor
    }

    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    pub fn screen_position(&self) -> Option<Vec2> {
        self.screen
    }

    /// Anchored and fading in or fully shown.
    pub fn is_active(&self) -> bool {
        self.anchor.is_some() && self.target_opacity > 0.0
    }

    pub fn is_fading(&self) -> bool {
        self.opacity != self.target_opacity
    }

    /// Pins the label to `anchor` and starts fading it in. The label is
    /// placed immediately so the fade starts at the right spot.
    pub fn show<P: LabelProjector>(&mut self, text: impl Into<String>, anchor: Vec3, projector: &P) {
        self.text = text.into();
        self.anchor = Some(anchor);
        self.target_opacity = 1.0;
        self.place(projector);
    }

    /// Starts fading out; the anchor is dropped once fully transparent.
    pub fn hide(&mut self) {
        self.target_opacity = 0.0;
    }

    /// Advances the fade by `dt_s` seconds, then re-projects the anchor if
    /// the label is active and settled.
    pub fn update<P: LabelProjector>(&mut self, dt_s: f64, projector: &P) {
        self.step_fade(dt_s);
        if self.is_active() && !self.is_fading() {
            self.place(projector);
        }
    }

    /// Current draw state; `None` when nothing is visible.
    pub fn view(&self) -> Option<LabelView> {
        let screen = self.screen?;
        if self.opacity <= 0.0 {
            return None;
        }
        Some(LabelView {
            text: self.text.clone(),
            x: screen.x,
            y: screen.y,
            opacity: self.opacity,
        })
    }

    fn step_fade(&mut self, dt_s: f64) {
        if !self.is_fading() {
            return;
        }
        let step = (self.config.fade_speed * dt_s.max(0.0)).max(0.0);
        if self.opacity < self.target_opacity {
            self.opacity = (self.opacity + step).min(self.target_opacity);
        } else {
            self.opacity = (self.opacity - step).max(self.target_opacity);
        }
        if self.opacity <= 0.0 && self.target_opacity <= 0.0 {
            self.anchor = None;
            self.screen = None;
        }
    }

    fn place<P: LabelProjector>(&mut self, projector: &P) {
        self.screen = self
            .anchor
            .and_then(|anchor| projector.project(anchor))
            .filter(|p| p.x.is_finite() && p.y.is_finite())
            .map(|p| Vec2::new(p.x, p.y - self.config.offset_px));
    }
}

#[cfg(test)]
mod tests {
    use super::{FloatingLabel, LabelConfig, LabelProjector, LabelView};
    use foundation::math::{Vec2, Vec3};
    use pretty_assertions::assert_eq;
    use std::cell::Cell;

    /// Drops z and counts calls; points with z > 0 count as behind.
    #[derive(Default)]
    struct FlatProjector {
        calls: Cell<usize>,
        shift: f64,
    }

    impl LabelProjector for FlatProjector {
        fn project(&self, world: Vec3) -> Option<Vec2> {
            self.calls.set(self.calls.get() + 1);
            (world.z <= 0.0).then(|| Vec2::new(world.x + self.shift, world.y))
        }
    }

    fn config() -> LabelConfig {
        LabelConfig {
            fade_speed: 2.0,
            offset_px: 0.0,
        }
    }

    #[test]
    fn show_places_immediately_and_fades_in() {
        let proj = FlatProjector::default();
        let mut label = FloatingLabel::new(config());
        label.show("Ohio", Vec3::new(100.0, 50.0, 0.0), &proj);
        assert_eq!(label.screen_position(), Some(Vec2::new(100.0, 50.0)));
        assert!(label.view().is_none());

        label.update(0.25, &proj);
        assert_eq!(label.opacity(), 0.5);
        label.update(0.5, &proj);
        assert_eq!(
            label.view(),
            Some(LabelView {
                text: "Ohio".into(),
                x: 100.0,
                y: 50.0,
                opacity: 1.0,
            })
        );
    }

    #[test]
    fn repositions_only_when_settled() {
        let mut proj = FlatProjector::default();
        let mut label = FloatingLabel::new(config());
        label.show("Utah", Vec3::new(10.0, 10.0, 0.0), &proj);

        proj.shift = 5.0;
        label.update(0.1, &proj);
        assert_eq!(label.screen_position(), Some(Vec2::new(10.0, 10.0)));

        label.update(1.0, &proj);
        assert_eq!(label.screen_position(), Some(Vec2::new(15.0, 10.0)));

        proj.shift = 7.0;
        label.update(0.016, &proj);
        assert_eq!(label.screen_position(), Some(Vec2::new(17.0, 10.0)));
    }

    #[test]
    fn hide_fades_out_then_releases_anchor() {
        let proj = FlatProjector::default();
        let mut label = FloatingLabel::new(config());
        label.show("Iowa", Vec3::new(1.0, 1.0, 0.0), &proj);
        label.update(1.0, &proj);

        label.hide();
        assert!(!label.is_active());
        let calls = proj.calls.get();
        label.update(0.25, &proj);
        assert_eq!(proj.calls.get(), calls);
        assert_eq!(label.opacity(), 0.5);
        assert!(label.view().is_some());

        label.update(0.25, &proj);
        assert_eq!(label.opacity(), 0.0);
        assert_eq!(label.anchor(), None);
        assert!(label.view().is_none());
    }

    #[test]
    fn anchors_behind_the_camera_are_not_placed() {
        let proj = FlatProjector::default();
        let mut label = FloatingLabel::new(config());
        label.show("Maine", Vec3::new(1.0, 1.0, 3.0), &proj);
        label.update(1.0, &proj);
        assert_eq!(label.screen_position(), None);
        assert!(label.view().is_none());
        assert!(label.is_active());
    }

    #[test]
    fn offset_lifts_label_above_anchor() {
        let proj = FlatProjector::default();
        let mut label = FloatingLabel::new(LabelConfig {
            offset_px: 12.0,
            ..config()
        });
        label.show("Texas", Vec3::new(40.0, 40.0, 0.0), &proj);
        assert_eq!(label.screen_position(), Some(Vec2::new(40.0, 28.0)));
    }
}
