//! Internal utilities for the smcrypt library
//!
//! Not part of the public API; the algorithm crates use these helpers for
//! comparisons and masks that should not branch on secret data.

pub mod constant_time;
