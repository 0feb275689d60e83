use std::collections::BTreeMap;

use crate::components::Region;
use crate::entity::RegionId;

/// The set of pickable regions known to the viewer.
///
/// Iteration order is ascending `RegionId`.
#[derive(Debug, Default, Clone)]
pub struct World {
    regions: BTreeMap<RegionId, Region>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `region`, returning the region previously registered under the
    /// same id.
    pub fn insert(&mut self, region: Region) -> Option<Region> {
        self.regions.insert(region.id, region)
    }

    pub fn get(&self, id: RegionId) -> Option<&Region> {
        self.regions.get(&id)
    }

    pub fn get_mut(&mut self, id: RegionId) -> Option<&mut Region> {
        self.regions.get_mut(&id)
    }

    pub fn contains(&self, id: RegionId) -> bool {
        self.regions.contains_key(&id)
    }

    pub fn regions(&self) -> impl Iterator<Item = &Region> {
        self.regions.values()
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Case-insensitive lookup by internal name. Lowest id wins on duplicates.
    pub fn find_by_name(&self, name: &str) -> Option<&Region> {
        let needle = name.trim();
        self.regions
            .values()
            .find(|r| r.name.eq_ignore_ascii_case(needle))
    }
}

#[cfg(test)]
mod tests {
    use super::World;
    use crate::components::Region;
    use crate::entity::RegionId;
    use foundation::bounds::Aabb3;
    use foundation::math::Vec3;

    fn region(id: u32, name: &str) -> Region {
        Region::new(
            RegionId(id),
            name,
            Aabb3::new(Vec3::ZERO, Vec3::new(1.0, 1.0, 1.0)),
        )
    }

    #[test]
    fn insert_replaces_same_id() {
        let mut world = World::new();
        assert!(world.insert(region(1, "ohio")).is_none());
        let old = world.insert(region(1, "Ohio")).expect("replaced");
        assert_eq!(old.name, "ohio");
        assert_eq!(world.len(), 1);
    }

    #[test]
    fn iterates_in_id_order() {
        let mut world = World::new();
        world.insert(region(9, "texas"));
        world.insert(region(2, "utah"));
        world.insert(region(5, "iowa"));
        let ids: Vec<u32> = world.regions().map(|r| r.id.0).collect();
        assert_eq!(ids, vec![2, 5, 9]);
    }

    #[test]
    fn name_lookup_ignores_case() {
        let mut world = World::new();
        world.insert(region(4, "New_York"));
        assert_eq!(world.find_by_name("new_york").map(|r| r.id), Some(RegionId(4)));
        assert!(world.find_by_name("ohio").is_none());
    }
}
