//! Pointer position to regions under it.

use camera::{PerspectiveCamera, Viewport};
use foundation::math::Vec2;
use scene::World;
use scene::entity::RegionId;
use scene::picking::{PickHit, PickOptions, pick_screen};

/// Regions under the client-space point `client`, nearest first.
///
/// The point is mapped through the canvas rectangle, not the window, so page
/// chrome around the canvas does not skew picking. Points outside the
/// rectangle hit nothing.
pub fn hit_test(
    world: &World,
    camera: &PerspectiveCamera,
    viewport: &Viewport,
    client: Vec2,
) -> Vec<PickHit> {
    let opts = PickOptions {
        max_distance: camera.far,
    };
    pick_screen(
        world,
        client.x,
        client.y,
        |x, y| camera.ray_through_client(viewport, Vec2::new(x, y)),
        opts,
    )
}

/// Nearest region under `client`.
pub fn hit_region(
    world: &World,
    camera: &PerspectiveCamera,
    viewport: &Viewport,
    client: Vec2,
) -> Option<RegionId> {
    hit_test(world, camera, viewport, client)
        .first()
        .map(|hit| hit.region)
}

#[cfg(test)]
mod tests {
    use super::{hit_region, hit_test};
    use camera::{CameraPose, PerspectiveCamera, Viewport};
    use foundation::bounds::Aabb3;
    use foundation::math::{Vec2, Vec3};
    use scene::entity::RegionId;
    use scene::{Region, World};

    fn top_down() -> PerspectiveCamera {
        PerspectiveCamera {
            pose: CameraPose::new(Vec3::new(0.0, 10.0, 0.001), Vec3::ZERO),
            aspect: 1.0,
            ..PerspectiveCamera::default()
        }
    }

    fn slab(id: u32, x0: f64, x1: f64, top: f64) -> Region {
        Region::new(
            RegionId(id),
            format!("r{id}"),
            Aabb3::new(Vec3::new(x0, 0.0, -1.0), Vec3::new(x1, top, 1.0)),
        )
    }

    #[test]
    fn center_of_offset_canvas_hits_region_below() {
        let mut world = World::new();
        world.insert(slab(1, -1.0, 1.0, 0.1));
        world.insert(slab(2, 2.0, 3.0, 0.1));
        let cam = top_down();
        let vp = Viewport::new(100.0, 50.0, 400.0, 400.0);

        assert_eq!(hit_region(&world, &cam, &vp, Vec2::new(300.0, 250.0)), Some(RegionId(1)));
        // Same point in window space but ignoring the offset would miss.
        assert_eq!(hit_region(&world, &cam, &vp, Vec2::new(200.0, 200.0)), None);
    }

    #[test]
    fn overlapping_regions_are_ordered_nearest_first() {
        let mut world = World::new();
        world.insert(slab(5, -1.0, 1.0, 0.1));
        world.insert(slab(9, -0.5, 0.5, 0.6));
        let cam = top_down();
        let vp = Viewport::new(0.0, 0.0, 400.0, 400.0);

        let hits = hit_test(&world, &cam, &vp, Vec2::new(200.0, 200.0));
        let ids: Vec<RegionId> = hits.iter().map(|h| h.region).collect();
        assert_eq!(ids, vec![RegionId(9), RegionId(5)]);
    }

    #[test]
    fn outside_canvas_or_empty_world_hits_nothing() {
        let mut world = World::new();
        let cam = top_down();
        let vp = Viewport::new(0.0, 0.0, 400.0, 400.0);
        assert!(hit_test(&world, &cam, &vp, Vec2::new(200.0, 200.0)).is_empty());

        world.insert(slab(1, -1.0, 1.0, 0.1));
        assert!(hit_test(&world, &cam, &vp, Vec2::new(-5.0, 200.0)).is_empty());
        assert!(hit_test(&world, &cam, &Viewport::new(0.0, 0.0, 0.0, 0.0), Vec2::ZERO).is_empty());
    }
}
