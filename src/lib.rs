//! # lutforge
//!
//! Decode HALD CLUT images (PNG, with a from-scratch DEFLATE/zlib decoder) and
//! sample 3D color-grading LUTs with linear, bilinear, trilinear or tetrahedral
//! interpolation.
//!
//! ## HALD decode example
//!
//! ```no_run
//! let data = std::fs::read("identity64.png").expect("read failed");
//! let grid = lutforge::hald::decode(&data).expect("decode failed");
//! println!("decoded a grid with resolution {:?}", grid.res());
//! ```
//!
//! ## Sampling example
//!
//! ```
//! use lutforge::lut::Kernel;
//! use lutforge::rgb::Rgb;
//!
//! # fn identity_grid() -> lutforge::lut::LutGrid<f64> {
//! #     let res = 2;
//! #     let mut samples = vec![Rgb::splat(0.0); 8];
//! #     for b in 0..res { for g in 0..res { for r in 0..res {
//! #         samples[r + g*res + b*res*res] = Rgb::new(r as f64, g as f64, b as f64);
//! #     }}}
//! #     lutforge::lut::LutGrid::new_cubic(res, samples, Rgb::splat(0.0), Rgb::splat(1.0)).unwrap()
//! # }
//! let grid = identity_grid();
//! let out = Kernel::Tetrahedral.sample(&grid, Rgb::new(0.3, 0.6, 0.9)).unwrap();
//! ```

pub mod bitstream;
pub mod containers;
pub mod crc32;
pub mod deflate;
pub mod error;
pub mod filter;
pub mod hald;
pub mod huffman;
pub mod lut;
pub mod png;
pub mod rgb;
pub mod zlib;

pub use error::{Error, Result};
