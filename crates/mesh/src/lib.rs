//! The host side of the vertex bridge: the fixed layout of a host-owned mesh and the handle
//! that names one.

mod geometry;
mod handle;
mod host;

pub use geometry::*;
pub use handle::*;
pub use host::*;
