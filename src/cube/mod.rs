//! Cube module - Voxel color state shared by animators and serializers.

mod color;
mod grid;

pub use color::*;
pub use grid::*;
