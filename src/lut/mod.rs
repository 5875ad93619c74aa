//! 3D LUT grid representation and interpolation.

pub mod grid;
pub mod interp;

pub use grid::LutGrid;
pub use interp::Kernel;
