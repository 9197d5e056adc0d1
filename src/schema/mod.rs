//! Schema module - Configuration types for frame generation runs.

mod config;

pub use config::*;
