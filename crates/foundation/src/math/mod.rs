pub mod ease;
pub mod mat4;
pub mod precision;
pub mod vec;

pub use ease::*;
pub use mat4::*;
pub use precision::*;
pub use vec::*;
