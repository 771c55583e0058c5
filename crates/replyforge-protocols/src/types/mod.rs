//! Data model shared by both contexts.

mod context;
mod profile;
mod usage;

pub use context::*;
pub use profile::*;
pub use usage::*;

#[cfg(test)]
#[path = "types_tests.rs"]
mod tests;
