//! 3D LUT grid descriptor.
//!
//! A cube of vertices with storage order fixed to match the HALD layout: R varies
//! fastest, then G, then B. The three axes may carry independent resolutions (`Rr`,
//! `Rg`, `Rb`), degenerating to a plane or line when any of them is 1; every container
//! this crate ships (`hald`, `.cube`, `.3dl`, `.csp`) happens to produce a cube with
//! all three equal, but the grid type itself does not assume that.

use crate::error::{Error, Result};
use crate::rgb::Rgb;
use num_traits::Float;

/// Per-axis resolution `(Rr, Rg, Rb)`, each in `1..=256`.
pub type Res = (usize, usize, usize);

/// A 3D LUT: `res.0 * res.1 * res.2` vertices in R-fastest/G-next/B-slowest order,
/// over a per-channel domain `[domain_min[c], domain_max[c]]`.
#[derive(Clone, Debug)]
pub struct LutGrid<T: Float> {
    res: Res,
    samples: Vec<Rgb<T>>,
    domain_min: Rgb<T>,
    domain_max: Rgb<T>,
}

impl<T: Float> LutGrid<T> {
    /// Builds a grid from `Rr*Rg*Rb` samples in R-fastest/G-next/B-slowest order.
    /// `domain_min`/`domain_max` are per-channel output bounds; each channel must
    /// satisfy `domain_min[c] <= domain_max[c]` and every component of every sample
    /// (and of the domain itself) must be finite.
    pub fn new(res: Res, samples: Vec<Rgb<T>>, domain_min: Rgb<T>, domain_max: Rgb<T>) -> Result<Self> {
        let (rr, rg, rb) = res;
        for (axis, n) in [("R", rr), ("G", rg), ("B", rb)] {
            if !(1..=256).contains(&n) {
                return Err(Error::GridShape(format!(
                    "{axis} resolution must be in 1..=256, got {n}"
                )));
            }
        }
        let expected = rr * rg * rb;
        if samples.len() != expected {
            return Err(Error::GridShape(format!(
                "expected {expected} samples for resolution {rr}x{rg}x{rb}, got {}",
                samples.len()
            )));
        }
        for (lo, hi) in [
            (domain_min.r, domain_max.r),
            (domain_min.g, domain_max.g),
            (domain_min.b, domain_max.b),
        ] {
            if !lo.is_finite() || !hi.is_finite() {
                return Err(Error::GridDomain("domain bounds must be finite".into()));
            }
            if lo > hi {
                return Err(Error::GridDomain(
                    "domain_min must be <= domain_max on every channel".into(),
                ));
            }
        }
        for sample in &samples {
            if !sample.r.is_finite() || !sample.g.is_finite() || !sample.b.is_finite() {
                return Err(Error::GridDomain("sample components must be finite".into()));
            }
        }
        Ok(LutGrid {
            res,
            samples,
            domain_min,
            domain_max,
        })
    }

    /// Convenience constructor for the common case of a cube with equal resolution on
    /// every axis (every container this crate ships produces one of these).
    pub fn new_cubic(res: usize, samples: Vec<Rgb<T>>, domain_min: Rgb<T>, domain_max: Rgb<T>) -> Result<Self> {
        Self::new((res, res, res), samples, domain_min, domain_max)
    }

    /// Per-axis resolution `(Rr, Rg, Rb)`.
    pub fn res(&self) -> Res {
        self.res
    }

    /// `true` when every axis shares the same resolution (a true cube, not a
    /// degenerate plane or line).
    pub fn is_cubic(&self) -> bool {
        let (rr, rg, rb) = self.res;
        rr == rg && rg == rb
    }

    /// `true` when the grid has collapsed to a plane or line on at least one axis.
    pub fn is_degenerate(&self) -> bool {
        let (rr, rg, rb) = self.res;
        rr == 1 || rg == 1 || rb == 1
    }

    pub fn domain(&self) -> (Rgb<T>, Rgb<T>) {
        (self.domain_min, self.domain_max)
    }

    /// Flat index for grid coordinates `(r, g, b)`, `r in 0..Rr`, `g in 0..Rg`,
    /// `b in 0..Rb`: `(ir, ig, ib) -> ((ib*Rg + ig)*Rr + ir)`.
    pub fn index(&self, r: usize, g: usize, b: usize) -> usize {
        let (rr, rg, _rb) = self.res;
        (b * rg + g) * rr + r
    }

    /// Vertex at grid coordinates `(r, g, b)`.
    pub fn vertex(&self, r: usize, g: usize, b: usize) -> Rgb<T> {
        self.samples[self.index(r, g, b)]
    }

    pub fn samples(&self) -> &[Rgb<T>] {
        &self.samples
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny_grid() -> LutGrid<f64> {
        let mut samples = vec![Rgb::splat(0.0); 8];
        for b in 0..2 {
            for g in 0..2 {
                for r in 0..2 {
                    let idx = r + g * 2 + b * 4;
                    samples[idx] = Rgb::new(r as f64, g as f64, b as f64);
                }
            }
        }
        LutGrid::new_cubic(2, samples, Rgb::splat(0.0), Rgb::splat(1.0)).unwrap()
    }

    #[test]
    fn vertex_lookup_is_r_fastest() {
        let grid = tiny_grid();
        assert_eq!(grid.vertex(1, 0, 0), Rgb::new(1.0, 0.0, 0.0));
        assert_eq!(grid.vertex(0, 1, 0), Rgb::new(0.0, 1.0, 0.0));
        assert_eq!(grid.vertex(0, 0, 1), Rgb::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn rejects_wrong_sample_count() {
        let samples = vec![Rgb::splat(0.0f32); 7];
        assert!(matches!(
            LutGrid::new_cubic(2, samples, Rgb::splat(0.0), Rgb::splat(1.0)),
            Err(Error::GridShape(_))
        ));
    }

    #[test]
    fn rejects_resolution_above_256() {
        let samples = vec![Rgb::splat(0.0f32); 1];
        assert!(matches!(
            LutGrid::new((257, 1, 1), samples, Rgb::splat(0.0), Rgb::splat(1.0)),
            Err(Error::GridShape(_))
        ));
    }

    #[test]
    fn rejects_inverted_domain() {
        let samples = vec![Rgb::splat(0.0f32); 8];
        assert!(matches!(
            LutGrid::new_cubic(2, samples, Rgb::splat(1.0), Rgb::splat(0.0)),
            Err(Error::GridDomain(_))
        ));
    }

    #[test]
    fn rejects_non_finite_sample() {
        let mut samples = vec![Rgb::splat(0.0f32); 8];
        samples[3] = Rgb::new(f32::NAN, 0.0, 0.0);
        assert!(matches!(
            LutGrid::new_cubic(2, samples, Rgb::splat(0.0), Rgb::splat(1.0)),
            Err(Error::GridDomain(_))
        ));
    }

    #[test]
    fn allows_per_channel_asymmetric_domain() {
        let samples = vec![Rgb::splat(0.0f32); 8];
        let grid = LutGrid::new_cubic(
            2,
            samples,
            Rgb::new(0.0f32, -1.0, 0.0),
            Rgb::new(1.0f32, 1.0, 2.0),
        )
        .unwrap();
        let (lo, hi) = grid.domain();
        assert_eq!(lo, Rgb::new(0.0, -1.0, 0.0));
        assert_eq!(hi, Rgb::new(1.0, 1.0, 2.0));
    }

    #[test]
    fn a_single_point_per_axis_is_allowed_and_degenerate() {
        let samples = vec![Rgb::splat(0.5f32)];
        let grid = LutGrid::new((1, 1, 1), samples, Rgb::splat(0.0), Rgb::splat(1.0)).unwrap();
        assert!(grid.is_degenerate());
        assert_eq!(grid.vertex(0, 0, 0), Rgb::splat(0.5));
    }

    #[test]
    fn non_cubic_grid_reports_its_own_resolution() {
        let samples = vec![Rgb::splat(0.0f32); 2 * 3 * 1];
        let grid = LutGrid::new((2, 3, 1), samples, Rgb::splat(0.0), Rgb::splat(1.0)).unwrap();
        assert_eq!(grid.res(), (2, 3, 1));
        assert!(!grid.is_cubic());
        assert!(grid.is_degenerate());
    }
}
