use foundation::math::Vec3;
use foundation::math::precision::stable_total_cmp_f64;

use crate::World;
use crate::entity::RegionId;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub dir: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, dir: Vec3) -> Self {
        Self { origin, dir }
    }

    pub fn at(&self, t: f64) -> Vec3 {
        self.origin + self.dir * t
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PickHit {
    pub region: RegionId,
    pub distance: f64,
    pub point: Vec3,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PickOptions {
    pub max_distance: f64,
}

impl Default for PickOptions {
    fn default() -> Self {
        Self {
            max_distance: 1.0e30,
        }
    }
}

/// All regions hit by `ray`, nearest first.
///
/// Ordering contract:
/// - Hits are sorted by entry distance along the (normalized) ray.
/// - Equal distances are broken by ascending `RegionId`.
///
/// Notes:
/// - Intersection uses each region's world bounds, so raised regions are
///   picked where they are drawn.
/// - Regions with invalid bounds are ignored.
pub fn pick_all(world: &World, ray: Ray, opts: PickOptions) -> Vec<PickHit> {
    let Some(dir) = ray.dir.normalize() else {
        return Vec::new();
    };
    let ray = Ray::new(ray.origin, dir);

    let mut hits: Vec<PickHit> = world
        .regions()
        .filter_map(|region| {
            let bounds = region.world_bounds();
            if !bounds.is_valid() {
                return None;
            }
            let t = bounds.ray_entry(ray.origin, ray.dir, 0.0, opts.max_distance)?;
            Some(PickHit {
                region: region.id,
                distance: t,
                point: ray.at(t),
            })
        })
        .collect();

    hits.sort_by(|a, b| {
        stable_total_cmp_f64(a.distance, b.distance).then_with(|| a.region.cmp(&b.region))
    });
    hits
}

/// Screen picking wrapper.
///
/// The caller supplies the screen->ray mapping via `make_ray`; a mapping that
/// yields no ray (pointer outside the viewport) produces no hits.
pub fn pick_screen<F>(
    world: &World,
    x_px: f64,
    y_px: f64,
    mut make_ray: F,
    opts: PickOptions,
) -> Vec<PickHit>
where
    F: FnMut(f64, f64) -> Option<Ray>,
{
    match make_ray(x_px, y_px) {
        Some(ray) => pick_all(world, ray, opts),
        None => Vec::new(),
    }
}
