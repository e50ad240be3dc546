//! Constant values for smcrypt operations
//!
//! Curve domain parameters and algorithm sizes. Everything here is a
//! `pub const`; nothing is configurable at runtime.

#![no_std]

pub mod traditional;
pub mod utils;
