//! Cinespace `.csp` text LUT parser.
//!
//! Layout: a `CSPLUTV100` / `3D` header, an optional `METADATA` block, three prelut
//! sections (R, G, B — each a point count followed by that many `in out` pairs), a
//! `LUT_3D_SIZE N` line, then `N^3` RGB triples in the same R-fastest order as
//! [`super::cube`]. The prelut curves are parsed and kept but never evaluated: this
//! crate only consumes the 3D cube they precede. Each curve's first and last `input`
//! sample declares that channel's `domain_min`/`domain_max`; a curve with no points at
//! all defaults to `[0, 1]`.

use crate::error::{Error, Result};
use crate::lut::grid::LutGrid;
use crate::rgb::Rgb;

/// A parsed-but-unevaluated 1D prelut curve: pairs of `(input, output)` sample points.
#[derive(Clone, Debug, Default)]
pub struct Prelut {
    pub points: Vec<(f64, f64)>,
}

impl Prelut {
    /// The input-space bounds this curve declares (its first and last sample
    /// points' `input` values), or the default `(0.0, 1.0)` when the curve has no
    /// points at all.
    fn input_domain(&self) -> (f64, f64) {
        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => (first.0, last.0),
            _ => (0.0, 1.0),
        }
    }
}

#[derive(Clone, Debug)]
pub struct CspLut {
    pub prelut_r: Prelut,
    pub prelut_g: Prelut,
    pub prelut_b: Prelut,
    pub grid: LutGrid<f64>,
}

struct Lines<'a> {
    inner: std::iter::Peekable<std::str::Lines<'a>>,
}

impl<'a> Lines<'a> {
    fn new(text: &'a str) -> Self {
        Lines {
            inner: text.lines().peekable(),
        }
    }

    fn next_nonblank(&mut self) -> Option<&'a str> {
        loop {
            let line = self.inner.next()?.trim();
            if !line.is_empty() {
                return Some(line);
            }
        }
    }
}

fn parse_prelut(lines: &mut Lines) -> Result<Prelut> {
    let count_line = lines
        .next_nonblank()
        .ok_or_else(|| Error::FileFormatMismatch("missing prelut point count".into()))?;
    let count: usize = count_line
        .parse()
        .map_err(|_| Error::FileFormatMismatch("non-numeric prelut point count".into()))?;
    let mut points = Vec::with_capacity(count);
    for _ in 0..count {
        let line = lines
            .next_nonblank()
            .ok_or_else(|| Error::FileFormatMismatch("truncated prelut section".into()))?;
        let mut parts = line.split_whitespace();
        let input: f64 = parts
            .next()
            .ok_or_else(|| Error::FileFormatMismatch("short prelut line".into()))?
            .parse()
            .map_err(|_| Error::FileFormatMismatch("non-numeric prelut line".into()))?;
        let output: f64 = parts
            .next()
            .ok_or_else(|| Error::FileFormatMismatch("short prelut line".into()))?
            .parse()
            .map_err(|_| Error::FileFormatMismatch("non-numeric prelut line".into()))?;
        points.push((input, output));
    }
    Ok(Prelut { points })
}

pub fn parse(text: &str) -> Result<CspLut> {
    let mut lines = Lines::new(text);

    let magic = lines
        .next_nonblank()
        .ok_or_else(|| Error::FileFormatMismatch("empty .csp file".into()))?;
    if magic != "CSPLUTV100" {
        return Err(Error::FileFormatMismatch(
            "missing CSPLUTV100 magic".into(),
        ));
    }
    let dimension = lines
        .next_nonblank()
        .ok_or_else(|| Error::FileFormatMismatch("missing dimension line".into()))?;
    if dimension != "3D" {
        return Err(Error::FileFormatMismatch(
            "only 3D .csp files are supported".into(),
        ));
    }

    if let Some(&peeked) = lines.inner.peek() {
        if peeked.trim().eq_ignore_ascii_case("BEGIN METADATA") {
            lines.next_nonblank();
            loop {
                let line = lines
                    .next_nonblank()
                    .ok_or_else(|| Error::FileFormatMismatch("unterminated METADATA".into()))?;
                if line.eq_ignore_ascii_case("END METADATA") {
                    break;
                }
            }
        }
    }

    let prelut_r = parse_prelut(&mut lines)?;
    let prelut_g = parse_prelut(&mut lines)?;
    let prelut_b = parse_prelut(&mut lines)?;
    log::debug!(
        "parsed .csp prelut curves: r={} g={} b={} points (unevaluated)",
        prelut_r.points.len(),
        prelut_g.points.len(),
        prelut_b.points.len()
    );

    let size_line = lines
        .next_nonblank()
        .ok_or_else(|| Error::FileFormatMismatch("missing LUT_3D_SIZE".into()))?;
    let size: usize = size_line
        .parse()
        .map_err(|_| Error::FileFormatMismatch("non-numeric LUT_3D_SIZE".into()))?;

    let expected = size * size * size;
    let mut samples = Vec::with_capacity(expected);
    for _ in 0..expected {
        let line = lines
            .next_nonblank()
            .ok_or_else(|| Error::FileFormatMismatch("truncated 3D LUT data".into()))?;
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
        samples.push(Rgb::new(r, g, b));
    }

    let domain_min = Rgb::new(
        prelut_r.input_domain().0,
        prelut_g.input_domain().0,
        prelut_b.input_domain().0,
    );
    let domain_max = Rgb::new(
        prelut_r.input_domain().1,
        prelut_g.input_domain().1,
        prelut_b.input_domain().1,
    );
    let grid = LutGrid::new_cubic(size, samples, domain_min, domain_max)?;
    Ok(CspLut {
        prelut_r,
        prelut_g,
        prelut_b,
        grid,
    })
}
