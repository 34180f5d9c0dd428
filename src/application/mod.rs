//! Application layer - runs the regeneration workflow over the domain ports

pub mod errors;
pub mod pipeline;
pub mod traits;

pub use errors::*;
pub use pipeline::*;
pub use traits::*;
