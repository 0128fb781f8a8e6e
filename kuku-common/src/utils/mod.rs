//! utils
//!
//! Small helpers shared across the KuKu crates.

pub mod time;
