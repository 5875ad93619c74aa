//! Adobe `.cube` text LUT parser.
//!
//! Layout: optional `TITLE`, a required `LUT_3D_SIZE N`, optional `DOMAIN_MIN`/
//! `DOMAIN_MAX` lines (defaulting to `0 0 0`/`1 1 1`), then `N^3` data lines of three
//! whitespace-separated floats in R-fastest/G-next/B-slowest order, matching this
//! crate's own [`crate::lut::grid::LutGrid`] storage order directly.

use crate::error::{Error, Result};
use crate::lut::grid::LutGrid;
use crate::rgb::Rgb;

pub fn parse(text: &str) -> Result<LutGrid<f64>> {
    let mut size: Option<usize> = None;
    let mut domain_min = Rgb::splat(0.0f64);
    let mut domain_max = Rgb::splat(1.0f64);
    let mut values: Vec<f64> = Vec::new();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some(rest) = line.strip_prefix("TITLE") {
            log::debug!("cube TITLE:{}", rest.trim());
            continue;
        }
        if let Some(rest) = line.strip_prefix("LUT_3D_SIZE") {
            let n: usize = rest
                .trim()
                .parse()
                .map_err(|_| Error::FileFormatMismatch("bad LUT_3D_SIZE".into()))?;
            size = Some(n);
            continue;
        }
        if let Some(rest) = line.strip_prefix("DOMAIN_MIN") {
            domain_min = parse_three(rest)?;
            continue;
        }
        if let Some(rest) = line.strip_prefix("DOMAIN_MAX") {
            domain_max = parse_three(rest)?;
            continue;
        }
        if line.starts_with("LUT_1D_SIZE") {
            return Err(Error::FileFormatMismatch(
                "1D .cube LUTs are not supported".into(),
            ));
        }

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
        values.push(r);
        values.push(g);
        values.push(b);
    }

    let size = size.ok_or_else(|| Error::FileFormatMismatch("missing LUT_3D_SIZE".into()))?;
    let expected = size * size * size;
    if values.len() != expected * 3 {
        return Err(Error::GridShape(format!(
            "expected {expected} data lines for LUT_3D_SIZE {size}, got {}",
            values.len() / 3
        )));
    }

    let samples: Vec<Rgb<f64>> = values
        .chunks_exact(3)
        .map(|c| Rgb::new(c[0], c[1], c[2]))
        .collect();
    log::debug!(
        "parsed .cube LUT: size={} domain_min=({},{},{}) domain_max=({},{},{})",
        size,
        domain_min.r,
        domain_min.g,
        domain_min.b,
        domain_max.r,
        domain_max.g,
        domain_max.b
    );
    LutGrid::new_cubic(size, samples, domain_min, domain_max)
}

/// Serializes `grid` back into Adobe `.cube` text, the inverse of [`parse`]. Used by
/// the `hald-decode` CLI command to turn a decoded HALD image into a format most
/// grading tools can read directly.
pub fn write(grid: &LutGrid<f64>) -> String {
    let (lo, hi) = grid.domain();
    let (res, rg, rb) = grid.res();
    debug_assert_eq!((res, res), (rg, rb), "write() only supports cubic grids");
    let mut out = String::new();
    out.push_str("TITLE \"decoded\"\n");
    out.push_str(&format!("LUT_3D_SIZE {res}\n"));
    out.push_str(&format!("DOMAIN_MIN {} {} {}\n", lo.r, lo.g, lo.b));
    out.push_str(&format!("DOMAIN_MAX {} {} {}\n", hi.r, hi.g, hi.b));
    for b in 0..res {
        for g in 0..res {
            for r in 0..res {
                let v = grid.vertex(r, g, b);
                out.push_str(&format!("{} {} {}\n", v.r, v.g, v.b));
            }
        }
    }
    out
}

/// Parses the three whitespace-separated floats following a `DOMAIN_MIN`/`DOMAIN_MAX`
/// keyword into a per-channel [`Rgb`] triplet.
fn parse_three(rest: &str) -> Result<Rgb<f64>> {
    let mut parts = rest.split_whitespace();
    let mut next = || -> Result<f64> {
        parts
            .next()
            .ok_or_else(|| Error::FileFormatMismatch("short DOMAIN line".into()))?
            .parse()
            .map_err(|_| Error::FileFormatMismatch("non-numeric DOMAIN line".into()))
    };
    Ok(Rgb::new(next()?, next()?, next()?))
}
