use foundation::math::Vec2;

/// Widest viewport (CSS px) still laid out as a narrow, stacked UI.
pub const NARROW_MAX_WIDTH_PX: f64 = 768.0;

/// The canvas' bounding client rectangle in CSS pixels.
///
/// Pointer events arrive in client (window) coordinates; the canvas may be
/// offset by page chrome, so every mapping goes through this rectangle.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Viewport {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(0.0, 0.0, 1280.0, 720.0)
    }
}

impl Viewport {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn is_degenerate(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0) || !self.width.is_finite() || !self.height.is_finite()
    }

    pub fn aspect(&self) -> f64 {
        if self.is_degenerate() {
            1.0
        } else {
            self.width / self.height
        }
    }

    pub fn contains(&self, client: Vec2) -> bool {
        client.x >= self.left
            && client.x <= self.left + self.width
            && client.y >= self.top
            && client.y <= self.top + self.height
    }

    /// Client coordinates relative to the viewport's top-left corner.
    pub fn to_local(&self, client: Vec2) -> Vec2 {
        Vec2::new(client.x - self.left, client.y - self.top)
    }

    /// Normalized device coordinates (`[-1, 1]`, Y up) of a client point.
    ///
    /// `None` when the viewport is degenerate or the point lies outside it.
    pub fn to_ndc(&self, client: Vec2) -> Option<Vec2> {
        if self.is_degenerate() || !self.contains(client) {
            return None;
        }
        let local = self.to_local(client);
        Some(Vec2::new(
            local.x / self.width * 2.0 - 1.0,
            -(local.y / self.height) * 2.0 + 1.0,
        ))
    }

    /// Viewport-local pixel position of an NDC point (Y flipped so screen Y
    /// grows downward).
    pub fn ndc_to_local(&self, ndc: Vec2) -> Vec2 {
        Vec2::new(
            (ndc.x + 1.0) * 0.5 * self.width,
            (1.0 - ndc.y) * 0.5 * self.height,
        )
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum LayoutClass {
    #[default]
    Wide,
    /// Narrow or portrait viewport; UI stacks vertically.
    Narrow,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum InputClass {
    #[default]
    Pointer,
    /// Primary input is touch; there is no hover.
    Touch,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct DeviceClass {
    pub layout: LayoutClass,
    pub input: InputClass,
}

impl DeviceClass {
    /// Classifies from the current viewport and whether the host reports a
    /// coarse (touch) primary pointer.
    pub fn classify(viewport: &Viewport, touch_primary: bool) -> Self {
        let layout = if viewport.width <= NARROW_MAX_WIDTH_PX || viewport.width < viewport.height {
            LayoutClass::Narrow
        } else {
            LayoutClass::Wide
        };
        let input = if touch_primary {
            InputClass::Touch
        } else {
            InputClass::Pointer
        };
        Self { layout, input }
    }

    pub fn hover_enabled(&self) -> bool {
        self.input == InputClass::Pointer
    }
}

#[cfg(test)]
mod tests {
    use super::{DeviceClass, InputClass, LayoutClass, Viewport};
    use foundation::math::Vec2;

    #[test]
    fn ndc_accounts_for_canvas_offset() {
        // Canvas sits below a 60px header.
        let vp = Viewport::new(0.0, 60.0, 800.0, 600.0);
        assert_eq!(vp.to_ndc(Vec2::new(400.0, 360.0)), Some(Vec2::new(0.0, 0.0)));
        assert_eq!(vp.to_ndc(Vec2::new(0.0, 60.0)), Some(Vec2::new(-1.0, 1.0)));
        assert_eq!(vp.to_ndc(Vec2::new(800.0, 660.0)), Some(Vec2::new(1.0, -1.0)));
    }

    #[test]
    fn points_outside_or_degenerate_viewports_have_no_ndc() {
        let vp = Viewport::new(10.0, 10.0, 100.0, 100.0);
        assert!(vp.to_ndc(Vec2::new(5.0, 50.0)).is_none());
        assert!(vp.to_ndc(Vec2::new(-999.0, 999.0)).is_none());
        let empty = Viewport::new(0.0, 0.0, 0.0, 100.0);
        assert!(empty.to_ndc(Vec2::new(0.0, 0.0)).is_none());
        assert_eq!(empty.aspect(), 1.0);
    }

    #[test]
    fn ndc_to_local_flips_y() {
        let vp = Viewport::new(0.0, 0.0, 200.0, 100.0);
        assert_eq!(vp.ndc_to_local(Vec2::new(-1.0, 1.0)), Vec2::new(0.0, 0.0));
        assert_eq!(vp.ndc_to_local(Vec2::new(1.0, -1.0)), Vec2::new(200.0, 100.0));
    }

    #[test]
    fn classification_by_size_and_input() {
        let desktop = DeviceClass::classify(&Viewport::new(0.0, 0.0, 1440.0, 900.0), false);
        assert_eq!(desktop.layout, LayoutClass::Wide);
        assert!(desktop.hover_enabled());

        let phone = DeviceClass::classify(&Viewport::new(0.0, 0.0, 390.0, 844.0), true);
        assert_eq!(phone.layout, LayoutClass::Narrow);
        assert_eq!(phone.input, InputClass::Touch);
        assert!(!phone.hover_enabled());

        let portrait_monitor = DeviceClass::classify(&Viewport::new(0.0, 0.0, 1080.0, 1920.0), false);
        assert_eq!(portrait_monitor.layout, LayoutClass::Narrow);
    }
}
