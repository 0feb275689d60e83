//! Camera model and navigation: perspective camera, viewport mapping,
//! pan/zoom with inertia, region framing and animated fly-to.

pub mod camera;
pub mod flight;
pub mod framing;
pub mod pan_zoom;
pub mod pose;
pub mod viewport;

pub use camera::*;
pub use flight::*;
pub use framing::*;
pub use pan_zoom::*;
pub use pose::*;
pub use viewport::*;
