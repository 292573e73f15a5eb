mod config;
mod error;
pub mod ffi;
mod sync;

pub use config::*;
pub use error::*;
pub use sync::*;
