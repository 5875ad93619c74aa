//! Interpolation kernels over a [`LutGrid`].
//!
//! One enum dispatching into four free functions generic over [`num_traits::Float`],
//! so a single implementation serves both `f32` and `f64` call sites.
//!
//! The tetrahedral table below uses the correct six-case corner assignment for every
//! ordering of `(r, g, b)` weights, including `g > r > b`, rather than reusing the
//! `r > g > b` corner set for it as some ports of this algorithm do.
//!
//! Every kernel is written against a per-axis resolution `(Rr, Rg, Rb)`: an axis with
//! resolution 1 collapses to a single plane, and [`locate_axis`] returns index 0 with
//! a zero fractional weight for it directly rather than as a special case.

use super::grid::LutGrid;
use crate::error::{Error, Result};
use crate::rgb::Rgb;
use num_traits::Float;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Kernel {
    /// 1D interpolation along R only; G and B snap to the nearest grid index.
    Linear,
    /// 2D interpolation over the two non-degenerate axes; requires exactly one axis
    /// with resolution 1, else [`Error::NotApplicable`].
    Bilinear,
    /// Full 8-corner trilinear interpolation; falls back to bilinear if any axis is
    /// degenerate.
    Trilinear,
    /// 6-simplex tetrahedral interpolation (Kasson et al.); falls back to trilinear
    /// (which may itself fall back further) when the cube is degenerate.
    Tetrahedral,
}

/// A located coordinate on one axis: `index`/`upper` are the lower/upper grid
/// indices bracketing the value (`upper = min(index+1, Ri-1)`), `frac` the weight
/// between them.
struct Coord<T> {
    index: usize,
    upper: usize,
    frac: T,
}

/// Maps a single normalized-space channel value into grid index space for an axis of
/// resolution `res`. Inputs are clamped to `[0,1]` directly -- `domain_min`/
/// `domain_max` govern only the *output* clamp, not how an already-normalized input
/// is located.
fn locate_axis<T: Float>(res: usize, value: T) -> Coord<T> {
    if res == 1 {
        return Coord {
            index: 0,
            upper: 0,
            frac: T::zero(),
        };
    }
    let value = value.max(T::zero()).min(T::one());
    let steps = T::from(res - 1).unwrap();
    let continuous = value * steps;
    let max_index = res - 2;
    let index = continuous.floor().to_usize().unwrap_or(0).min(max_index);
    let upper = (index + 1).min(res - 1);
    let frac = continuous - T::from(index).unwrap();
    Coord { index, upper, frac }
}

/// Rounds half up: the "nearest" convention for snapping a degenerate axis to its
/// closest grid index, not round-to-even.
fn nearest_axis_index<T: Float>(res: usize, value: T) -> usize {
    let coord = locate_axis(res, value);
    if coord.frac >= T::from(0.5).unwrap() {
        coord.upper
    } else {
        coord.index
    }
}

fn lerp<T: Float>(a: Rgb<T>, b: Rgb<T>, t: T) -> Rgb<T> {
    a * (T::one() - t) + b * t
}

fn sample_linear<T: Float>(grid: &LutGrid<T>, input: Rgb<T>) -> Rgb<T> {
    let (rr, rg, rb) = grid.res();
    let r = locate_axis(rr, input.r);
    let g = nearest_axis_index(rg, input.g);
    let b = nearest_axis_index(rb, input.b);
    let lo = grid.vertex(r.index, g, b);
    let hi = grid.vertex(r.upper, g, b);
    lerp(lo, hi, r.frac)
}

/// 2D interpolation over whichever two axes are non-degenerate, snapping the third
/// (always index 0 if it is the degenerate one, since `locate_axis` collapses it).
/// Requires exactly one axis with resolution 1; returns [`Error::NotApplicable`]
/// otherwise.
fn sample_bilinear<T: Float>(grid: &LutGrid<T>, input: Rgb<T>) -> Result<Rgb<T>> {
    let (rr, rg, rb) = grid.res();
    let degenerate = (rr == 1, rg == 1, rb == 1);
    let degenerate_count = [degenerate.0, degenerate.1, degenerate.2]
        .iter()
        .filter(|&&d| d)
        .count();
    if degenerate_count != 1 {
        return Err(Error::NotApplicable);
    }

    let r = locate_axis(rr, input.r);
    let g = locate_axis(rg, input.g);
    let b = locate_axis(rb, input.b);

    let out = match degenerate {
        (true, false, false) => {
            // R collapsed: interpolate G then B.
            let c00 = grid.vertex(r.index, g.index, b.index);
            let c10 = grid.vertex(r.index, g.upper, b.index);
            let c01 = grid.vertex(r.index, g.index, b.upper);
            let c11 = grid.vertex(r.index, g.upper, b.upper);
            let top = lerp(c00, c10, g.frac);
            let bottom = lerp(c01, c11, g.frac);
            lerp(top, bottom, b.frac)
        }
        (false, true, false) => {
            // G collapsed: interpolate R then B.
            let c00 = grid.vertex(r.index, g.index, b.index);
            let c10 = grid.vertex(r.upper, g.index, b.index);
            let c01 = grid.vertex(r.index, g.index, b.upper);
            let c11 = grid.vertex(r.upper, g.index, b.upper);
            let top = lerp(c00, c10, r.frac);
            let bottom = lerp(c01, c11, r.frac);
            lerp(top, bottom, b.frac)
        }
        (false, false, true) => {
            // B collapsed: interpolate R then G.
            let c00 = grid.vertex(r.index, g.index, b.index);
            let c10 = grid.vertex(r.upper, g.index, b.index);
            let c01 = grid.vertex(r.index, g.upper, b.index);
            let c11 = grid.vertex(r.upper, g.upper, b.index);
            let top = lerp(c00, c10, r.frac);
            let bottom = lerp(c01, c11, r.frac);
            lerp(top, bottom, g.frac)
        }
        _ => unreachable!("degenerate_count == 1 guarantees exactly one true"),
    };
    Ok(out)
}

fn sample_trilinear<T: Float>(grid: &LutGrid<T>, input: Rgb<T>) -> Rgb<T> {
    let (rr, rg, rb) = grid.res();
    let r = locate_axis(rr, input.r);
    let g = locate_axis(rg, input.g);
    let b = locate_axis(rb, input.b);

    let c000 = grid.vertex(r.index, g.index, b.index);
    let c100 = grid.vertex(r.upper, g.index, b.index);
    let c010 = grid.vertex(r.index, g.upper, b.index);
    let c110 = grid.vertex(r.upper, g.upper, b.index);
    let c001 = grid.vertex(r.index, g.index, b.upper);
    let c101 = grid.vertex(r.upper, g.index, b.upper);
    let c011 = grid.vertex(r.index, g.upper, b.upper);
    let c111 = grid.vertex(r.upper, g.upper, b.upper);

    let c00 = lerp(c000, c100, r.frac);
    let c10 = lerp(c010, c110, r.frac);
    let c01 = lerp(c001, c101, r.frac);
    let c11 = lerp(c011, c111, r.frac);

    let c0 = lerp(c00, c10, g.frac);
    let c1 = lerp(c01, c11, g.frac);

    lerp(c0, c1, b.frac)
}

/// Trilinear, falling back to bilinear when any axis is degenerate. Shared by
/// [`Kernel::Trilinear`] and the [`Kernel::Tetrahedral`] degeneracy chain.
fn sample_trilinear_or_fallback<T: Float>(grid: &LutGrid<T>, input: Rgb<T>) -> Result<Rgb<T>> {
    if grid.is_degenerate() {
        sample_bilinear(grid, input)
    } else {
        Ok(sample_trilinear(grid, input))
    }
}

fn sample_tetrahedral<T: Float>(grid: &LutGrid<T>, input: Rgb<T>) -> Rgb<T> {
    let (rr, rg, rb) = grid.res();
    let r = locate_axis(rr, input.r);
    let g = locate_axis(rg, input.g);
    let b = locate_axis(rb, input.b);

    let c000 = grid.vertex(r.index, g.index, b.index);
    let c100 = grid.vertex(r.upper, g.index, b.index);
    let c010 = grid.vertex(r.index, g.upper, b.index);
    let c110 = grid.vertex(r.upper, g.upper, b.index);
    let c001 = grid.vertex(r.index, g.index, b.upper);
    let c101 = grid.vertex(r.upper, g.index, b.upper);
    let c011 = grid.vertex(r.index, g.upper, b.upper);
    let c111 = grid.vertex(r.upper, g.upper, b.upper);

    let (fr, fg, fb) = (r.frac, g.frac, b.frac);

    // Each branch is `c000 + (corner-corner)*weight + ...`, using `Rgb`'s
    // component-wise subtraction rather than an algebraically expanded
    // `c000*(1-w) + ...` form.
    if fr >= fg && fg >= fb {
        c000 + (c100 - c000) * fr + (c110 - c100) * fg + (c111 - c110) * fb
    } else if fr >= fb && fb >= fg {
        c000 + (c100 - c000) * fr + (c101 - c100) * fb + (c111 - c101) * fg
    } else if fb >= fr && fr >= fg {
        c000 + (c001 - c000) * fb + (c101 - c001) * fr + (c111 - c101) * fg
    } else if fg >= fr && fr >= fb {
        c000 + (c010 - c000) * fg + (c110 - c010) * fr + (c111 - c110) * fb
    } else if fg >= fb && fb >= fr {
        c000 + (c010 - c000) * fg + (c011 - c010) * fb + (c111 - c011) * fr
    } else {
        // fb >= fg && fg >= fr
        c000 + (c001 - c000) * fb + (c011 - c001) * fg + (c111 - c011) * fr
    }
}

impl Kernel {
    /// Samples `grid` at `input`, applying the degeneracy fallback chain
    /// (tetrahedral -> trilinear -> bilinear) documented on [`Kernel::Tetrahedral`]/
    /// [`Kernel::Trilinear`].
    pub fn sample<T: Float>(self, grid: &LutGrid<T>, input: Rgb<T>) -> Result<Rgb<T>> {
        let out = match self {
            Kernel::Linear => sample_linear(grid, input),
            Kernel::Bilinear => sample_bilinear(grid, input)?,
            Kernel::Trilinear => sample_trilinear_or_fallback(grid, input)?,
            Kernel::Tetrahedral => {
                if grid.is_degenerate() {
                    sample_trilinear_or_fallback(grid, input)?
                } else {
                    sample_tetrahedral(grid, input)
                }
            }
        };
        let (lo, hi) = grid.domain();
        Ok(out.clamp_channels(lo, hi))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linear_ramp_grid() -> LutGrid<f64> {
        let res = 4;
        let mut samples = vec![Rgb::splat(0.0); res * res * res];
        for b in 0..res {
            for g in 0..res {
                for r in 0..res {
                    let idx = r + g * res + b * res * res;
                    let t = |i: usize| i as f64 / (res - 1) as f64;
                    samples[idx] = Rgb::new(t(r), t(g), t(b));
                }
            }
        }
        LutGrid::new_cubic(res, samples, Rgb::splat(0.0), Rgb::splat(1.0)).unwrap()
    }

    #[test]
    fn identity_ramp_is_preserved_by_trilinear_and_tetrahedral() {
        let grid = linear_ramp_grid();
        let input = Rgb::new(0.37f64, 0.62, 0.08);
        for kernel in [Kernel::Trilinear, Kernel::Tetrahedral] {
            let out = kernel.sample(&grid, input).unwrap();
            assert!((out.r - input.r).abs() < 1e-9, "{:?} kernel r", kernel);
            assert!((out.g - input.g).abs() < 1e-9, "{:?} kernel g", kernel);
            assert!((out.b - input.b).abs() < 1e-9, "{:?} kernel b", kernel);
        }
    }

    #[test]
    fn linear_kernel_is_faithful_on_r_and_snaps_g_b() {
        let grid = linear_ramp_grid();
        let input = Rgb::new(0.37f64, 0.62, 0.08);
        let out = Kernel::Linear.sample(&grid, input).unwrap();
        assert!((out.r - input.r).abs() < 1e-9);
    }

    #[test]
    fn bilinear_rejects_a_full_cube() {
        let grid = linear_ramp_grid();
        assert!(matches!(
            Kernel::Bilinear.sample(&grid, Rgb::splat(0.5)),
            Err(Error::NotApplicable)
        ));
    }

    #[test]
    fn tetrahedral_matches_trilinear_on_a_linear_ramp() {
        let grid = linear_ramp_grid();
        let input = Rgb::new(0.81f64, 0.2, 0.55);
        let tet = Kernel::Tetrahedral.sample(&grid, input).unwrap();
        let tri = Kernel::Trilinear.sample(&grid, input).unwrap();
        assert!((tet.r - tri.r).abs() < 1e-9);
        assert!((tet.g - tri.g).abs() < 1e-9);
        assert!((tet.b - tri.b).abs() < 1e-9);
    }

    #[test]
    fn corners_are_returned_exactly() {
        let grid = linear_ramp_grid();
        let corner = Rgb::new(1.0f64, 0.0, 1.0);
        let out = Kernel::Tetrahedral.sample(&grid, corner).unwrap();
        assert!((out.r - 1.0).abs() < 1e-9);
        assert!((out.g - 0.0).abs() < 1e-9);
        assert!((out.b - 1.0).abs() < 1e-9);
    }

    #[test]
    fn out_of_domain_input_is_clamped() {
        let grid = linear_ramp_grid();
        let out = Kernel::Trilinear
            .sample(&grid, Rgb::new(5.0f64, -5.0, 0.5))
            .unwrap();
        assert!((out.r - 1.0).abs() < 1e-9);
        assert!((out.g - 0.0).abs() < 1e-9);
    }

    #[test]
    fn output_clamp_is_independent_per_channel() {
        // a grid whose samples run outside [0,1] on R, inside it on G
        let res = 2;
        let mut samples = vec![Rgb::splat(0.0); 8];
        for b in 0..res {
            for g in 0..res {
                for r in 0..res {
                    let idx = r + g * res + b * res * res;
                    samples[idx] = Rgb::new(r as f64 * 2.0 - 0.5, g as f64, b as f64);
                }
            }
        }
        // domain clamps R to [0, 1] even though samples reach -0.5..1.5
        let grid =
            LutGrid::new_cubic(res, samples, Rgb::splat(0.0), Rgb::new(1.0, 1.0, 1.0)).unwrap();
        let out = Kernel::Trilinear
            .sample(&grid, Rgb::new(0.0, 0.5, 0.5))
            .unwrap();
        assert!(
            (out.r - 0.0).abs() < 1e-9,
            "expected R clamped to domain_min, got {}",
            out.r
        );
    }

    #[test]
    fn trilinear_falls_back_to_bilinear_on_a_degenerate_b_axis() {
        // a 2x2x1 plane: B always 0, so trilinear must degrade to bilinear over R,G.
        let mut samples = vec![Rgb::splat(0.0); 4];
        for g in 0..2 {
            for r in 0..2 {
                samples[r + g * 2] = Rgb::new(r as f64, g as f64, 0.5);
            }
        }
        let grid = LutGrid::new((2, 2, 1), samples, Rgb::splat(0.0), Rgb::splat(1.0)).unwrap();
        let out = Kernel::Trilinear
            .sample(&grid, Rgb::new(0.5, 0.5, 0.9))
            .unwrap();
        assert!((out.r - 0.5).abs() < 1e-9);
        assert!((out.g - 0.5).abs() < 1e-9);
        assert!((out.b - 0.5).abs() < 1e-9, "degenerate axis snaps to its single sample");
    }

    #[test]
    fn tetrahedral_falls_back_through_trilinear_to_bilinear_on_degenerate_grid() {
        let mut samples = vec![Rgb::splat(0.0); 4];
        for g in 0..2 {
            for r in 0..2 {
                samples[r + g * 2] = Rgb::new(r as f64, g as f64, 0.5);
            }
        }
        let grid = LutGrid::new((2, 2, 1), samples, Rgb::splat(0.0), Rgb::splat(1.0)).unwrap();
        let out = Kernel::Tetrahedral
            .sample(&grid, Rgb::new(0.25, 0.75, 0.1))
            .unwrap();
        assert!((out.r - 0.25).abs() < 1e-9);
        assert!((out.g - 0.75).abs() < 1e-9);
    }

    #[test]
    fn bilinear_interpolates_the_two_live_axes_on_a_line() {
        // fully degenerate on G and B: a 1D line along R only.
        let samples = vec![Rgb::new(0.0, 0.0, 0.0), Rgb::new(1.0, 0.0, 0.0)];
        let grid = LutGrid::new((2, 1, 1), samples, Rgb::splat(0.0), Rgb::splat(1.0)).unwrap();
        // only one axis is non-degenerate here, so "exactly one degenerate axis" does
        // not hold (two are) -- bilinear is NOT_APPLICABLE, linear is the right kernel.
        assert!(matches!(
            Kernel::Bilinear.sample(&grid, Rgb::new(0.5, 0.0, 0.0)),
            Err(Error::NotApplicable)
        ));
        let out = Kernel::Linear.sample(&grid, Rgb::new(0.5, 0.0, 0.0)).unwrap();
        assert!((out.r - 0.5).abs() < 1e-9);
    }
}
