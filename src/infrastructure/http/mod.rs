//! HTTP implementations

pub mod client;

pub use client::{HttpClient, token_header_value};
