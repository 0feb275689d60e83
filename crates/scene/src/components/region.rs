use foundation::bounds::Aabb3;
use foundation::math::Vec3;

use super::Material;
use crate::entity::RegionId;

/// A named, pickable map subdivision.
///
/// `base_bounds` is the mesh's world-space box at elevation 0; the box used
/// for picking and framing is raised by `elevation`.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    pub id: RegionId,
    pub name: String,
    pub base_bounds: Aabb3,
    pub material: Material,
    pub elevation: f64,
}

impl Region {
    pub fn new(id: RegionId, name: impl Into<String>, base_bounds: Aabb3) -> Self {
        Self {
            id,
            name: name.into(),
            base_bounds,
            material: Material::default(),
            elevation: 0.0,
        }
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }

    pub fn world_bounds(&self) -> Aabb3 {
        self.base_bounds.translated(Vec3::new(0.0, self.elevation, 0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::Region;
    use crate::entity::RegionId;
    use foundation::bounds::Aabb3;
    use foundation::math::Vec3;

    #[test]
    fn world_bounds_follow_elevation() {
        let mut r = Region::new(
            RegionId(3),
            "ohio",
            Aabb3::new(Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 0.5, 1.0)),
        );
        assert_eq!(r.world_bounds(), r.base_bounds);
        r.elevation = 2.0;
        assert_eq!(r.world_bounds().min.y, 2.0);
        assert_eq!(r.world_bounds().max.y, 2.5);
    }
}
