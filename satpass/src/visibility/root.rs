//! Bracket refinement on a scalar function of time.
//!
//! Times are seconds from an arbitrary origin. Both searches are bounded by
//! an iteration cap and return the best bracket reached when it is hit.

/// Inverse golden ratio, `(√5 − 1) / 2`.
const INV_PHI: f64 = 0.618_033_988_749_894_8;

/// Narrow `[lo, hi]` around a change of `above(t)`.
///
/// Requires `above(lo) != above(hi)`. Returns the final bracket; each end
/// keeps the classification it started with.
pub fn bisect<E, F>(
    mut above: F,
    mut lo: f64,
    mut hi: f64,
    tolerance: f64,
    max_iterations: usize,
) -> Result<(f64, f64), E>
where
    F: FnMut(f64) -> Result<bool, E>,
{
    let lo_above = above(lo)?;

    for _ in 0..max_iterations {
        if hi - lo <= tolerance {
            break;
        }
        let mid = lo + (hi - lo) / 2.0;
        if above(mid)? == lo_above {
            lo = mid;
        } else {
            hi = mid;
        }
    }

    Ok((lo, hi))
}

/// Locate the maximum of `f` on `[a, b]` by golden-section search.
///
/// Assumes `f` is unimodal on the interval. Returns `(t, f(t))`.
pub fn golden_section_max<E, F>(
    mut f: F,
    mut a: f64,
    mut b: f64,
    tolerance: f64,
    max_iterations: usize,
) -> Result<(f64, f64), E>
where
    F: FnMut(f64) -> Result<f64, E>,
{
    let mut c = b - INV_PHI * (b - a);
    let mut d = a + INV_PHI * (b - a);
    let mut fc = f(c)?;
    let mut fd = f(d)?;

    for _ in 0..max_iterations {
        if b - a <= tolerance {
            break;
        }
        if fc >= fd {
            b = d;
            d = c;
            fd = fc;
            c = b - INV_PHI * (b - a);
            fc = f(c)?;
        } else {
            a = c;
            c = d;
            fc = fd;
            d = a + INV_PHI * (b - a);
            fd = f(d)?;
        }
    }

    let t = a + (b - a) / 2.0;
    let value = f(t)?;
    Ok((t, value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;

    #[test]
    fn test_bisect_rising_crossing() {
        let (lo, hi) =
            bisect::<Infallible, _>(|t| Ok(t * t - 2.0 >= 0.0), 0.0, 3.0, 1e-9, 100).unwrap();
        assert!(hi - lo <= 1e-9);
        assert!(lo * lo < 2.0);
        assert!(hi * hi >= 2.0);
    }

    #[test]
    fn test_bisect_falling_crossing_keeps_sides() {
        // Above on the left, below on the right
        let (lo, hi) =
            bisect::<Infallible, _>(|t| Ok(10.0 - t >= 0.0), 0.0, 30.0, 1.0, 64).unwrap();
        assert!(lo <= 10.0);
        assert!(hi > 10.0);
        assert!(hi - lo <= 1.0);
    }

    #[test]
    fn test_bisect_respects_iteration_cap() {
        let mut calls = 0;
        let (lo, hi) = bisect::<Infallible, _>(
            |t| {
                calls += 1;
                Ok(t >= 0.5)
            },
            0.0,
            1.0,
            0.0,
            3,
        )
        .unwrap();
        assert_eq!(hi - lo, 0.125);
        assert_eq!(calls, 4);
    }

    #[test]
    fn test_bisect_propagates_errors() {
        let result = bisect(|_| Err::<bool, _>("boom"), 0.0, 1.0, 0.1, 10);
        assert_eq!(result, Err("boom"));
    }

    #[test]
    fn test_golden_section_parabola() {
        let (t, value) =
            golden_section_max::<Infallible, _>(|t| Ok(-(t - 1.3) * (t - 1.3) + 4.0), -5.0, 5.0, 1e-6, 200)
                .unwrap();
        assert!((t - 1.3).abs() < 1e-5);
        assert!((value - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_golden_section_monotone_hits_edge() {
        let (t, _) =
            golden_section_max::<Infallible, _>(|t| Ok(t), 0.0, 10.0, 0.01, 200).unwrap();
        assert!(t > 9.98 && t < 10.0);
    }
}
