//! Adaptive Simpson quadrature with Lyness's error correction.

use serde::Deserialize;

use crate::error::IntegrationError;
use crate::integral::Integral;
use crate::precision::{Real, Sample, EPSILON, NAN, NUMERIC_INTERVAL};

/// Deepest bisection allowed, 2^22 ~ 4 million panels.
pub const MAX_DEPTH: u8 = 22;

/// Adaptive Simpson integrator (Kuncir, Algorithm 103).
///
/// `epsilon` is the absolute error target for the whole interval; it is halved
/// on every bisection. Values out of range are clamped, see
/// [`Simpson::effective_epsilon`] and [`Simpson::effective_max_depth`].
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct Simpson {
    pub epsilon: Real,
    pub max_depth: u8,
}

impl Default for Simpson {
    fn default() -> Self {
        Self {
            epsilon: 1e-10,
            max_depth: 8,
        }
    }
}

impl Simpson {
    pub fn new(epsilon: Real, max_depth: u8) -> Self {
        Self { epsilon, max_depth }
    }

    /// Like [`Simpson::new`], but rejects settings that would otherwise be clamped.
    pub fn try_new(epsilon: Real, max_depth: u8) -> Result<Self, IntegrationError> {
        if !(epsilon >= Self::epsilon_floor()) {
            return Err(IntegrationError::EpsilonBelowFloor {
                requested: epsilon,
                floor: Self::epsilon_floor(),
            });
        }

        if max_depth > MAX_DEPTH {
            return Err(IntegrationError::DepthAboveCeiling {
                requested: max_depth,
                ceiling: MAX_DEPTH,
            });
        }

        Ok(Self::new(epsilon, max_depth))
    }

    /// Epsilon is halved on every level, so leave room for some recursion.
    pub fn epsilon_floor() -> Real {
        512. * EPSILON
    }

    pub fn effective_epsilon(&self) -> Real {
        self.epsilon.max(Self::epsilon_floor())
    }

    pub fn effective_max_depth(&self) -> u8 {
        self.max_depth.min(MAX_DEPTH)
    }
}

/// Midpoint of a panel and the three point Simpson area over the panel.
#[derive(Debug, Clone, Copy)]
struct Panel {
    mid: Sample,
    area: Real,
}

impl Panel {
    fn new<F>(f: &F, start: Sample, end: Sample) -> Self
    where
        F: Fn(Real) -> Real,
    {
        let mid = Sample::eval(f, (start.x + end.x) / 2.);
        let area = (end.x - start.x).abs() * (start.y + 4. * mid.y + end.y) / 6.;

        Self { mid, area }
    }
}

struct Bisection<'a, F> {
    f: &'a F,
    max_depth: u8,
}

impl<F> Bisection<'_, F>
where
    F: Fn(Real) -> Real,
{
    //    start  left  mid  right  end
    // ----*------*-----*-----*-----*---> x
    fn refine(&self, start: Sample, whole: Panel, end: Sample, epsilon: Real, depth: u8) -> Real {
        if epsilon < EPSILON || (end.x - start.x).abs() < NUMERIC_INTERVAL {
            return whole.area;
        }

        let left = Panel::new(self.f, start, whole.mid);
        let right = Panel::new(self.f, whole.mid, end);

        if !left.mid.y.is_finite() || !right.mid.y.is_finite() {
            return NAN;
        }

        // J. N. Lyness, Notes on the adaptive Simpson quadrature routine
        let error = (left.area + right.area - whole.area) / 15.;
        let depth = depth + 1;

        if error.abs() < epsilon || depth > self.max_depth {
            return left.area + right.area + error;
        }

        self.refine(start, left, whole.mid, epsilon / 2., depth)
            + self.refine(whole.mid, right, end, epsilon / 2., depth)
    }
}

impl Integral for Simpson {
    fn integrate<F>(&self, f: F, support: (Real, Real)) -> Real
    where
        F: Fn(Real) -> Real,
    {
        let (a, b) = support;
        let (a, b) = if b < a { (b, a) } else { (a, b) };

        let start = Sample::eval(&f, a);
        let end = Sample::eval(&f, b);
        let whole = Panel::new(&f, start, end);

        if !start.y.is_finite() || !end.y.is_finite() || !whole.mid.y.is_finite() {
            return NAN;
        }

        let bisection = Bisection {
            f: &f,
            max_depth: self.effective_max_depth(),
        };

        bisection.refine(start, whole, end, self.effective_epsilon(), 0)
    }
}

/// Integrates `f` over `[a, b]` with the default [`Simpson`] settings.
///
/// ```
/// use quadrature::{simpson, PI};
///
/// let area = simpson(|x| x.sin(), 0., PI);
/// assert!((area - 2.).abs() < 1e-9);
/// ```
pub fn simpson<F>(f: F, a: Real, b: Real) -> Real
where
    F: Fn(Real) -> Real,
{
    Simpson::default().integrate(f, (a, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::precision::PI;

    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use proptest::prelude::*;
    use std::cell::Cell;

    #[test]
    fn test_sin() {
        assert_abs_diff_eq!(simpson(|x| x.sin(), 0., PI), 2., epsilon = 1e-9);
    }

    #[test]
    fn test_quadratic() {
        let area = simpson(|x| 6. * x * x - 8. * x + 5., 1., 4.);
        assert_relative_eq!(area, 81., epsilon = 1e-10);
    }

    #[test]
    fn test_log() {
        let exact = 2. * (2. as Real).ln() - 1.;
        assert_abs_diff_eq!(simpson(|x| x.ln(), 1., 2.), exact, epsilon = 1e-9);
    }

    #[test]
    fn test_agrees_with_newton_cotes() {
        use peroxide::numerical::integral::newton_cotes_quadrature;

        let reference = newton_cotes_quadrature(|x: f64| x.exp(), 10, (0., 1.));
        let area = simpson(|x| x.exp(), 0., 1.);

        assert_relative_eq!(area, reference, max_relative = 1e-5);
        assert_abs_diff_eq!(area, (1. as Real).exp() - 1., epsilon = 1e-9);
    }

    #[test]
    fn test_reversed_bounds() {
        let f = |x: Real| x.exp() * x.cos();

        assert_eq!(simpson(f, 3., -1.), simpson(f, -1., 3.));
    }

    #[test]
    fn test_degenerate_interval() {
        assert_eq!(simpson(|x| x.exp(), 1.5, 1.5), 0.);
    }

    #[test]
    fn test_nan_at_endpoint() {
        assert!(simpson(|x| if x == 0. { Real::NAN } else { x }, 0., 2.).is_nan());
        assert!(simpson(|x| if x == 2. { Real::NAN } else { x }, 0., 2.).is_nan());
    }

    #[test]
    fn test_nan_at_inner_sample() {
        // midpoint, then the first quarter point
        assert!(simpson(|x| if x == 1. { Real::NAN } else { x }, 0., 2.).is_nan());
        assert!(simpson(|x| if x == 0.5 { Real::NAN } else { x }, 0., 2.).is_nan());
    }

    #[test]
    fn test_infinite_sample() {
        assert!(simpson(|x| 1. / x, -1., 1.).is_nan());
        assert!(simpson(|x| 1. / (x - 0.25), 0., 2.).is_nan());
    }

    #[test]
    fn test_depth_does_not_worsen_error() {
        let exact = 2. / 3.;
        let mut last_error = Real::INFINITY;

        for max_depth in 0..=12 {
            let area = Simpson::new(1e-10, max_depth).integrate(|x| x.sqrt(), (0., 1.));
            let error = (area - exact).abs();

            assert!(
                error <= last_error + 1e-15,
                "max_depth = {}, error = {}, previous = {}",
                max_depth,
                error,
                last_error
            );
            last_error = error;
        }
    }

    #[test]
    fn test_evaluations_bounded() {
        for max_depth in [0u8, 1, 4, 10] {
            let count = Cell::new(0usize);
            let f = |x: Real| {
                count.set(count.get() + 1);
                1e3 * (1e4 * x).sin()
            };

            let area = Simpson::new(0., max_depth).integrate(f, (0., 10.));
            let bound = 3 + 2 * ((1usize << (max_depth + 1)) - 1);

            assert!(area.is_finite());
            assert!(count.get() <= bound, "{} > {}", count.get(), bound);
        }
    }

    #[test]
    fn test_single_level_adds_lyness_correction() {
        let f = |x: Real| x.exp();
        let simpson_area = |a: Real, b: Real| (b - a) * (f(a) + 4. * f((a + b) / 2.) + f(b)) / 6.;

        let whole = simpson_area(0., 2.);
        let fine = simpson_area(0., 1.) + simpson_area(1., 2.);
        let corrected = fine + (fine - whole) / 15.;

        let area = Simpson::new(1e-10, 0).integrate(f, (0., 2.));

        assert_relative_eq!(area, corrected, max_relative = 1e-14);
        assert!((area - fine).abs() > 1e-4);
    }

    #[test]
    fn test_halved_epsilon_stops_refinement() {
        // 512 * EPSILON halves below EPSILON after ten levels, long before depth 22
        let count = Cell::new(0usize);
        let f = |x: Real| {
            count.set(count.get() + 1);
            1e3 * (1e4 * x).sin()
        };

        let area = Simpson::new(0., 50).integrate(f, (0., 10.));

        assert!(area.is_finite());
        assert_eq!(count.get(), 3 + 2 * ((1 << 10) - 1));
    }

    #[test]
    fn test_clamping() {
        let simpson = Simpson::new(0., 50);

        assert_eq!(simpson.effective_max_depth(), MAX_DEPTH);
        assert_eq!(simpson.effective_epsilon(), 512. * EPSILON);
        assert_eq!(Simpson::default().effective_epsilon(), 1e-10);
        assert_eq!(Simpson::default().effective_max_depth(), 8);
    }

    #[test]
    fn test_try_new() {
        assert_eq!(Simpson::try_new(1e-6, 12), Ok(Simpson::new(1e-6, 12)));
        assert!(matches!(
            Simpson::try_new(1e-20, 8),
            Err(IntegrationError::EpsilonBelowFloor { .. })
        ));
        assert_eq!(
            Simpson::try_new(1e-6, 23),
            Err(IntegrationError::DepthAboveCeiling {
                requested: 23,
                ceiling: MAX_DEPTH
            })
        );
    }

    #[test]
    fn test_settings_from_csv() {
        let data = "epsilon,max_depth\n1e-6,4\n1e-12,16\n";
        let settings: Vec<Simpson> = csv::Reader::from_reader(data.as_bytes())
            .deserialize()
            .collect::<Result<_, _>>()
            .unwrap();

        assert_eq!(settings, vec![Simpson::new(1e-6, 4), Simpson::new(1e-12, 16)]);
    }

    proptest! {
        #[test]
        fn reversed_bounds_match_sorted(a in -10.0..10.0f64, b in -10.0..10.0f64) {
            let f = |x: Real| x * x * x - 2. * x + 1.;
            prop_assert_eq!(simpson(f, a, b), simpson(f, b, a));
        }

        #[test]
        fn cubic_is_exact(a in -5.0..5.0f64, width in 0.0..5.0f64) {
            let b = a + width;
            let antiderivative = |x: Real| x.powi(4) / 4. - x * x + x;
            let area = simpson(|x| x * x * x - 2. * x + 1., a, b);

            prop_assert!((area - (antiderivative(b) - antiderivative(a))).abs() < 1e-9);
        }
    }
}
