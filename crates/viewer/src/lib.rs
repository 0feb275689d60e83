//! Interaction core of the map viewer.
//!
//! [`MapViewer`] owns the region store, the camera and every piece of
//! interaction state. Hosts feed it input events and display-frame
//! timestamps, and read back a [`FrameSnapshot`] for rendering.

pub mod config;
pub mod controller;
pub mod error;
pub mod events;
pub mod hit_test;
pub mod snapshot;

pub use config::ViewerConfig;
pub use controller::{MapViewer, PressSession};
pub use error::{Result, ViewerError};
pub use events::InteractionEvent;
pub use hit_test::{hit_region, hit_test};
pub use snapshot::{CameraView, FrameSnapshot, RegionAppearance, StateView};
