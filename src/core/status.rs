//! Human-readable status lines printed to stdout.
//!
//! Diagnostics go through `tracing` (stderr); these lines are the user-facing
//! progress report of a run.

use std::fmt::Display;

pub fn success(msg: impl Display) {
    println!("✅ {msg}");
}

pub fn notice(msg: impl Display) {
    println!("❗ {msg}");
}

pub fn progress(msg: impl Display) {
    println!("📥 {msg}");
}

pub fn link(msg: impl Display) {
    println!("🔗 {msg}");
}

pub fn lock(msg: impl Display) {
    println!("🔒 {msg}");
}

pub fn warning(msg: impl Display) {
    println!("⚠️  {msg}");
}

pub fn failure(msg: impl Display) {
    println!("❌ {msg}");
}
