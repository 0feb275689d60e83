//! Screen-space overlays driven by the selection: the floating region label
//! and the side-data info panel.

pub mod info;
pub mod labels;

pub use info::*;
pub use labels::*;
