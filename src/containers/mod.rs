//! Text-based 3D LUT container formats.
//!
//! Adobe `.cube`, Autodesk/Lustre `.3dl` and Cinespace `.csp`, parsed with the same
//! line-oriented, `Result`-returning style this crate uses for PNG/DEFLATE.

pub mod csp;
pub mod cube;
pub mod threedl;
