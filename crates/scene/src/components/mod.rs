pub mod material;
pub mod region;

pub use material::*;
pub use region::*;
