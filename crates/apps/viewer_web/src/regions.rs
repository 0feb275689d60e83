//! Region descriptions sent by the JS renderer once the map meshes load.

use foundation::bounds::Aabb3;
use foundation::math::Vec3;
use scene::entity::RegionId;
use scene::{Color, Material, Region};
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RegionInput {
    pub id: u32,
    pub name: String,
    /// World-space box corners of the mesh at rest.
    pub min: [f64; 3],
    pub max: [f64; 3],
    #[serde(default = "default_color")]
    pub color: u32,
    #[serde(default)]
    pub material: Option<MaterialInput>,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct MaterialInput {
    pub roughness: f32,
    pub metalness: f32,
    pub opacity: f32,
}

fn default_color() -> u32 {
    0xffffff
}

impl From<RegionInput> for Region {
    fn from(input: RegionInput) -> Self {
        let [x0, y0, z0] = input.min;
        let [x1, y1, z1] = input.max;
        let mut material = Material::with_color(Color::from_hex(input.color));
        if let Some(m) = input.material {
            material.roughness = m.roughness;
            material.metalness = m.metalness;
            material.opacity = m.opacity;
        }
        Region::new(
            RegionId(input.id),
            input.name,
            Aabb3::new(Vec3::new(x0, y0, z0), Vec3::new(x1, y1, z1)),
        )
        .with_material(material)
    }
}

pub fn parse_regions(json: &str) -> Result<Vec<Region>, serde_json::Error> {
    let inputs: Vec<RegionInput> = serde_json::from_str(json)?;
    Ok(inputs.into_iter().map(Region::from).collect())
}

#[cfg(test)]
mod tests {
    use super::parse_regions;
    use foundation::math::Vec3;
    use scene::Color;
    use scene::entity::RegionId;

    #[test]
    fn parses_regions_with_and_without_material() {
        let regions = parse_regions(
            r#"[
                {"id": 3, "name": "ohio", "min": [-1, 0, -1], "max": [0, 0.1, 0], "color": 8956501},
                {"id": 4, "name": "utah", "min": [1, 0, -1], "max": [2, 0.1, 0],
                 "material": {"roughness": 0.8, "metalness": 0.1, "opacity": 0.9}}
            ]"#,
        )
        .expect("valid");

        assert_eq!(regions.len(), 2);
        assert_eq!(regions[0].id, RegionId(3));
        assert_eq!(regions[0].material.color, Color(0x88aa55));
        assert_eq!(regions[0].base_bounds.max, Vec3::new(0.0, 0.1, 0.0));
        assert_eq!(regions[1].material.color, Color(0xffffff));
        assert_eq!(regions[1].material.roughness, 0.8);
        assert_eq!(regions[1].elevation, 0.0);
    }

    #[test]
    fn rejects_rows_without_bounds() {
        assert!(parse_regions(r#"[{"id": 1, "name": "x"}]"#).is_err());
    }
}
