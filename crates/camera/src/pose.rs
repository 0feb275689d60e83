use foundation::math::Vec3;

/// Overview camera position (whole map in view).
pub const OVERVIEW_POSITION: Vec3 = Vec3::new(0.0, 10.0, 3.0);

/// Overview look target: the ground point seen from `OVERVIEW_POSITION`
/// with the camera tilted 70 degrees down.
pub const OVERVIEW_TARGET: Vec3 = Vec3::new(0.0, 0.0, -0.64);

/// Camera position plus the point it looks at.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub target: Vec3,
}

impl Default for CameraPose {
    fn default() -> Self {
        Self::overview()
    }
}

impl CameraPose {
    pub fn new(position: Vec3, target: Vec3) -> Self {
        Self { position, target }
    }

    pub fn overview() -> Self {
        Self {
            position: OVERVIEW_POSITION,
            target: OVERVIEW_TARGET,
        }
    }

    /// Moves position and target together, keeping the view direction.
    pub fn translate(&mut self, delta: Vec3) {
        self.position += delta;
        self.target += delta;
    }

    pub fn lerp(&self, other: &Self, t: f64) -> Self {
        Self {
            position: self.position.lerp(other.position, t),
            target: self.target.lerp(other.target, t),
        }
    }

    pub fn is_finite(&self) -> bool {
        [self.position, self.target]
            .iter()
            .all(|v| v.x.is_finite() && v.y.is_finite() && v.z.is_finite())
    }
}
