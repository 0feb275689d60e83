use serde::Deserialize;

/// 24-bit sRGB colour, `0xRRGGBB`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Deserialize)]
pub struct Color(pub u32);

impl Color {
    pub const fn from_hex(hex: u32) -> Self {
        Color(hex & 0x00ff_ffff)
    }

    pub fn to_css(self) -> String {
        format!("#{:06x}", self.0)
    }
}

/// Surface appearance of a region as handed to the renderer.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Material {
    pub color: Color,
    pub roughness: f32,
    pub metalness: f32,
    pub opacity: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            color: Color::from_hex(0xffffff),
            roughness: 0.4,
            metalness: 0.0,
            opacity: 1.0,
        }
    }
}

impl Material {
    pub fn with_color(color: Color) -> Self {
        Self {
            color,
            ..Self::default()
        }
    }

    /// A copy of this material with only the colour replaced.
    pub fn tinted(&self, color: Color) -> Self {
        Self { color, ..*self }
    }
}

#[cfg(test)]
mod tests {
    use super::{Color, Material};

    #[test]
    fn css_and_hex_masking() {
        assert_eq!(Color::from_hex(0xcfe0fa).to_css(), "#cfe0fa");
        assert_eq!(Color(0x0000ff).to_css(), "#0000ff");
        assert_eq!(Color::from_hex(0xff00_0001), Color(0x01));
    }

    #[test]
    fn tint_keeps_other_surface_parameters() {
        let base = Material {
            color: Color::from_hex(0x808080),
            roughness: 0.7,
            metalness: 0.1,
            opacity: 0.9,
        };
        let tinted = base.tinted(Color::from_hex(0xff0000));
        assert_eq!(tinted.color, Color::from_hex(0xff0000));
        assert_eq!(tinted.roughness, 0.7);
        assert_eq!(tinted.metalness, 0.1);
        assert_eq!(tinted.opacity, 0.9);
    }
}
