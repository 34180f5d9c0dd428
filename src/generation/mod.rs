//! Generation domain module - everything that shapes the generated client
//!
//! This module holds the generator port and the pure, filesystem-local steps
//! applied around it: the security-scheme patch for downloaded documents,
//! removal of unused output files, and the source patch set.

pub mod patches;
pub mod sanitizers;
pub mod security;
pub mod traits;
pub mod types;

pub use patches::*;
pub use sanitizers::*;
pub use security::*;
pub use traits::*;
pub use types::*;
