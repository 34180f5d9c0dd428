//! Installation of the generated client into the host project

pub mod installer;

pub use installer::*;
