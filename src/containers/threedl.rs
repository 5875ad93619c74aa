//! Autodesk/Lustre `.3dl` text LUT parser.
//!
//! The first data line is the input mesh (its word count gives the cube resolution
//! `N`); the remaining lines are `N^3` integer RGB triples in B-fastest order (B
//! cycles quickest, then G, then R). This crate stores grids R-fastest, so rows are
//! re-indexed on the way in rather than copied verbatim.

use crate::error::{Error, Result};
use crate::lut::grid::LutGrid;
use crate::rgb::Rgb;

pub fn parse(text: &str) -> Result<LutGrid<f64>> {
    let mut lines = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.eq_ignore_ascii_case("3DMESH") && !l.starts_with('#'));

    let mesh_line = lines
        .next()
        .ok_or_else(|| Error::FileFormatMismatch("empty .3dl file".into()))?;
    let mesh_points: Vec<f64> = mesh_line
        .split_whitespace()
        .map(|w| {
            w.parse::<f64>()
                .map_err(|_| Error::FileFormatMismatch("non-numeric mesh line".into()))
        })
        .collect::<Result<_>>()?;
    let size = mesh_points.len();
    if size < 2 {
        return Err(Error::FileFormatMismatch(
            "mesh line must list at least 2 breakpoints".into(),
        ));
    }
    let max_value = mesh_points
        .iter()
        .cloned()
        .fold(0.0f64, f64::max)
        .max(1.0);

    let mut file_order: Vec<Rgb<f64>> = Vec::with_capacity(size * size * size);
    for line in lines {
        let mut parts = line.split_whitespace();
        let r: f64 = parts
            .next()
            .ok_or_else(|| Error::FileFormatMismatch("short data line".into()))?
            .parse()
            .map_err(|_| Error::FileFormatMismatch("non-numeric data line".into()))?;
        let g: f64 = parts
            .next()
            .ok_or_else(|| Error::FileFormatMismatch("short data line".into()))?
            .parse()
            .map_err(|_| Error::FileFormatMismatch("non-numeric data line".into()))?;
        let b: f64 = parts
            .next()
            .ok_or_else(|| Error::FileFormatMismatch("short data line".into()))?
            .parse()
            .map_err(|_| Error::FileFormatMismatch("non-numeric data line".into()))?;
        file_order.push(Rgb::new(r / max_value, g / max_value, b / max_value));
    }

    let expected = size * size * size;
    if file_order.len() != expected {
        return Err(Error::GridShape(format!(
            "expected {expected} data lines for mesh size {size}, got {}",
            file_order.len()
        )));
    }

    // re-index from B-fastest file order into this crate's R-fastest storage order
    let mut samples = vec![Rgb::splat(0.0); expected];
    let mut file_index = 0usize;
    for r in 0..size {
        for g in 0..size {
            for b in 0..size {
                let dest = r + g * size + b * size * size;
                samples[dest] = file_order[file_index];
                file_index += 1;
            }
        }
    }

    log::debug!("parsed .3dl LUT: size={} max_value={}", size, max_value);
    LutGrid::new_cubic(size, samples, Rgb::splat(0.0), Rgb::splat(1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reindexes_b_fastest_file_order() {
        let mut text = String::from("0 1364 2731 4095\n");
        // size=2 would need a 2-entry mesh line; use size 2 for a small, exact test
        text = String::from("0 4095\n");
        for r in 0..2u32 {
            for g in 0..2u32 {
                for b in 0..2u32 {
                    text.push_str(&format!("{} {} {}\n", r * 4095, g * 4095, b * 4095));
                }
            }
        }
        let grid = parse(&text).unwrap();
        assert_eq!(grid.res(), (2, 2, 2));
        assert_eq!(grid.vertex(1, 0, 0), Rgb::new(1.0, 0.0, 0.0));
        assert_eq!(grid.vertex(0, 1, 0), Rgb::new(0.0, 1.0, 0.0));
        assert_eq!(grid.vertex(0, 0, 1), Rgb::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn rejects_short_mesh_line() {
        let text = "100\n";
        assert!(matches!(parse(text), Err(Error::FileFormatMismatch(_))));
    }
}
