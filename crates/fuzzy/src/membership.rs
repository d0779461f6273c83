//! Triangular membership function.

use crate::error::ConfigError;

/// Piecewise-linear triangular membership shape `(a, b, c)`.
///
/// The degree is 0 at and below `a`, rises linearly to 1 at `b`, and falls
/// linearly back to 0 at and above `c`. Degenerate edges are allowed:
///
/// - `a == b`: left shoulder, the degree steps to 1 at `b`
/// - `b == c`: right shoulder, the degree is 1 at `b` and 0 just above it
///
/// The peak takes precedence over the support test, so `[0, 0, 35]` has
/// degree 1 at `x = 0`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "[f64; 3]", into = "[f64; 3]")
)]
pub struct Triangle {
    a: f64,
    b: f64,
    c: f64,
}

impl Triangle {
    /// Creates a triangle, rejecting `a > b`, `b > c` and non-finite points.
    pub fn new(a: f64, b: f64, c: f64) -> Result<Self, ConfigError> {
        let finite = a.is_finite() && b.is_finite() && c.is_finite();
        if !finite || a > b || b > c {
            return Err(ConfigError::MalformedShape { a, b, c });
        }
        Ok(Self { a, b, c })
    }

    #[inline]
    pub const fn a(&self) -> f64 {
        self.a
    }

    #[inline]
    pub const fn b(&self) -> f64 {
        self.b
    }

    #[inline]
    pub const fn c(&self) -> f64 {
        self.c
    }

    /// Returns the point of full membership.
    #[inline]
    pub const fn peak(&self) -> f64 {
        self.b
    }

    /// Returns the closed interval outside of which the degree is 0.
    #[inline]
    pub const fn support(&self) -> (f64, f64) {
        (self.a, self.c)
    }

    /// Evaluates the membership degree of `x`, always within `[0, 1]`.
    ///
    /// Any real is accepted; values outside `[a, c]` saturate to 0.
    /// NaN has no membership and yields 0.
    pub fn degree(&self, x: f64) -> f64 {
        let Self { a, b, c } = *self;

        if x == b {
            1.0
        } else if x.is_nan() || x <= a || x >= c {
            0.0
        } else if x < b {
            // a < x < b, so b - a > 0
            (x - a) / (b - a)
        } else {
            // b < x < c, so c - b > 0
            (c - x) / (c - b)
        }
    }
}

impl TryFrom<[f64; 3]> for Triangle {
    type Error = ConfigError;

    fn try_from([a, b, c]: [f64; 3]) -> Result<Self, Self::Error> {
        Self::new(a, b, c)
    }
}

impl From<Triangle> for [f64; 3] {
    fn from(t: Triangle) -> Self {
        [t.a, t.b, t.c]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn medium() -> Triangle {
        Triangle::new(25.0, 50.0, 75.0).unwrap()
    }

    #[test]
    fn interior_points_interpolate_linearly() {
        let t = medium();
        assert_eq!(t.degree(25.0), 0.0);
        assert_eq!(t.degree(37.5), 0.5);
        assert_eq!(t.degree(50.0), 1.0);
        assert_eq!(t.degree(62.5), 0.5);
        assert_eq!(t.degree(75.0), 0.0);
    }

    #[test]
    fn outside_support_is_zero() {
        let t = medium();
        assert_eq!(t.degree(-1000.0), 0.0);
        assert_eq!(t.degree(10.0), 0.0);
        assert_eq!(t.degree(90.0), 0.0);
        assert_eq!(t.degree(f64::INFINITY), 0.0);
        assert_eq!(t.degree(f64::NEG_INFINITY), 0.0);
    }

    #[test]
    fn left_shoulder_is_full_at_peak() {
        let close = Triangle::new(0.0, 0.0, 35.0).unwrap();
        assert_eq!(close.degree(0.0), 1.0);
        assert!((close.degree(10.0) - 25.0 / 35.0).abs() < 1e-12);
        assert_eq!(close.degree(35.0), 0.0);
        assert_eq!(close.degree(-0.5), 0.0);
    }

    #[test]
    fn right_shoulder_is_full_at_peak() {
        let far = Triangle::new(65.0, 100.0, 100.0).unwrap();
        assert_eq!(far.degree(100.0), 1.0);
        assert!((far.degree(90.0) - 25.0 / 35.0).abs() < 1e-12);
        assert_eq!(far.degree(100.5), 0.0);
    }

    #[test]
    fn singleton_triangle() {
        let spike = Triangle::new(10.0, 10.0, 10.0).unwrap();
        assert_eq!(spike.degree(10.0), 1.0);
        assert_eq!(spike.degree(9.999), 0.0);
        assert_eq!(spike.degree(10.001), 0.0);
    }

    #[test]
    fn nan_has_no_membership() {
        assert_eq!(medium().degree(f64::NAN), 0.0);
    }

    #[test]
    fn rejects_malformed_shapes() {
        assert!(matches!(
            Triangle::new(50.0, 25.0, 75.0),
            Err(ConfigError::MalformedShape { .. })
        ));
        assert!(Triangle::new(0.0, 80.0, 75.0).is_err());
        assert!(Triangle::new(f64::NAN, 1.0, 2.0).is_err());
        assert!(Triangle::new(0.0, 1.0, f64::INFINITY).is_err());
    }

    #[test]
    fn converts_from_triple() {
        let t = Triangle::try_from([30.0, 50.0, 70.0]).unwrap();
        assert_eq!(t.support(), (30.0, 70.0));
        assert_eq!(t.peak(), 50.0);
        assert!(Triangle::try_from([70.0, 50.0, 30.0]).is_err());
    }

    fn triangle_strategy() -> impl Strategy<Value = Triangle> {
        (-500.0f64..500.0, 0.0f64..300.0, 0.0f64..300.0)
            .prop_map(|(a, rise, fall)| Triangle::new(a, a + rise, a + rise + fall).unwrap())
    }

    proptest! {
        #[test]
        fn degree_is_bounded(t in triangle_strategy(), x in -2000.0f64..2000.0) {
            let d = t.degree(x);
            prop_assert!((0.0..=1.0).contains(&d));
        }

        #[test]
        fn degree_is_one_at_peak(t in triangle_strategy()) {
            prop_assert_eq!(t.degree(t.peak()), 1.0);
        }

        #[test]
        fn rising_tail_is_non_decreasing(t in triangle_strategy(), p in 0.0f64..1.0, q in 0.0f64..1.0) {
            let (lo, hi) = if p <= q { (p, q) } else { (q, p) };
            let x1 = (t.a() + lo * (t.b() - t.a())).min(t.b());
            let x2 = (t.a() + hi * (t.b() - t.a())).min(t.b());
            prop_assert!(t.degree(x1) <= t.degree(x2) + 1e-12);
        }

        #[test]
        fn falling_tail_is_non_increasing(t in triangle_strategy(), p in 0.0f64..1.0, q in 0.0f64..1.0) {
            let (lo, hi) = if p <= q { (p, q) } else { (q, p) };
            let x1 = (t.b() + lo * (t.c() - t.b())).clamp(t.b(), t.c());
            let x2 = (t.b() + hi * (t.c() - t.b())).clamp(t.b(), t.c());
            prop_assert!(t.degree(x1) + 1e-12 >= t.degree(x2));
        }
    }
}
