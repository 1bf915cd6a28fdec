use super::TOLERANCE;

/// Linear interpolation between `a` and `b` at parameter `t`.
#[must_use]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    (b - a).mul_add(t, a)
}

/// Interpolates the depth at `x` on the segment `(x0, d0)–(x1, d1)`.
///
/// A zero-width segment returns `d0`.
#[must_use]
pub fn lerp_at(x0: f64, d0: f64, x1: f64, d1: f64, x: f64) -> f64 {
    let span = x1 - x0;
    if span.abs() < TOLERANCE {
        return d0;
    }
    lerp(d0, d1, (x - x0) / span)
}

/// Maps `value` from `[lo, hi]` onto `[-1, 1]`, clamping the result.
///
/// A degenerate range maps every value to `0`.
#[must_use]
pub fn to_bipolar(value: f64, lo: f64, hi: f64) -> f64 {
    let range = hi - lo;
    if range.abs() < TOLERANCE {
        return 0.0;
    }
    ((value - lo) / range).mul_add(2.0, -1.0).clamp(-1.0, 1.0)
}

/// Returns the `(min, max)` of the values, or `None` for an empty iterator.
#[must_use]
pub fn min_max(values: impl IntoIterator<Item = f64>) -> Option<(f64, f64)> {
    values.into_iter().fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-12;

    #[test]
    fn lerp_endpoints_and_midpoint() {
        assert!((lerp(2.0, 4.0, 0.0) - 2.0).abs() < TOL);
        assert!((lerp(2.0, 4.0, 1.0) - 4.0).abs() < TOL);
        assert!((lerp(2.0, 4.0, 0.5) - 3.0).abs() < TOL);
    }

    #[test]
    fn lerp_at_zero_width_returns_start() {
        let d = lerp_at(1.0, 0.3, 1.0, 0.9, 1.0);
        assert!((d - 0.3).abs() < TOL, "d={d}");
    }

    #[test]
    fn bipolar_maps_range_ends() {
        assert!((to_bipolar(0.0, 0.0, 2.0) + 1.0).abs() < TOL);
        assert!((to_bipolar(2.0, 0.0, 2.0) - 1.0).abs() < TOL);
        assert!(to_bipolar(1.0, 0.0, 2.0).abs() < TOL);
    }

    #[test]
    fn bipolar_degenerate_range_is_zero() {
        assert!(to_bipolar(5.0, 1.0, 1.0).abs() < TOL);
    }

    #[test]
    fn bipolar_clamps_outside_values() {
        assert!((to_bipolar(10.0, 0.0, 1.0) - 1.0).abs() < TOL);
    }

    #[test]
    fn min_max_of_empty_is_none() {
        assert!(min_max(std::iter::empty()).is_none());
        assert_eq!(min_max([3.0, -1.0, 2.0]), Some((-1.0, 3.0)));
    }
}
