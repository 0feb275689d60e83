use crate::math::Vec3;

/// Axis-aligned bounding box in world space.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Aabb3 {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb3 {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Aabb3 { min, max }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Extent along X.
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    /// Extent along Z.
    pub fn depth(&self) -> f64 {
        self.max.z - self.min.z
    }

    pub fn is_valid(&self) -> bool {
        let finite = [
            self.min.x, self.min.y, self.min.z, self.max.x, self.max.y, self.max.z,
        ]
        .iter()
        .all(|v| v.is_finite());
        finite && self.min.x <= self.max.x && self.min.y <= self.max.y && self.min.z <= self.max.z
    }

    pub fn translated(&self, offset: Vec3) -> Self {
        Aabb3 {
            min: self.min + offset,
            max: self.max + offset,
        }
    }

    /// Center of the top face; used as a label anchor.
    pub fn top_center(&self) -> Vec3 {
        let c = self.center();
        Vec3::new(c.x, self.max.y, c.z)
    }

    /// Slab intersection; returns the entry distance along `dir`
    /// (0 when `origin` is inside).
    pub fn ray_entry(&self, origin: Vec3, dir: Vec3, mut t_min: f64, mut t_max: f64) -> Option<f64> {
        let o = [origin.x, origin.y, origin.z];
        let d = [dir.x, dir.y, dir.z];
        let lo = [self.min.x, self.min.y, self.min.z];
        let hi = [self.max.x, self.max.y, self.max.z];

        for axis in 0..3 {
            if d[axis].abs() < 1e-12 {
                if o[axis] < lo[axis] || o[axis] > hi[axis] {
                    return None;
                }
                continue;
            }

            let inv = 1.0 / d[axis];
            let mut t1 = (lo[axis] - o[axis]) * inv;
            let mut t2 = (hi[axis] - o[axis]) * inv;
            if t1 > t2 {
                std::mem::swap(&mut t1, &mut t2);
            }

            t_min = t_min.max(t1);
            t_max = t_max.min(t2);
            if t_max < t_min {
                return None;
            }
        }

        Some(t_min.max(0.0))
    }
}
