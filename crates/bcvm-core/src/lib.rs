#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Shared helpers for the bcvm toolchain.
//!
//! Kept dependency-free so every other crate (bytecode, compiler, VM, CLI)
//! can use the same terminal palette and column helpers.

pub mod colors;
pub mod utils;

#[cfg(test)]
mod utils_tests;

pub use colors::Colors;
pub use utils::{truncate_text, width_for_count};
