pub mod components;
pub mod entity;
pub mod picking;
pub mod selection;
pub mod world;

pub use components::{Color, Material, Region};
pub use entity::RegionId;
pub use world::*;
