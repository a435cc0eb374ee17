/// Floating point type used by every integrator.
///
/// There is no stable 128-bit float, so this is the widest native type.
pub type Real = f64;

/// Smallest value such that `1 + EPSILON` is distinguishable from `1`.
pub const EPSILON: Real = Real::EPSILON;

/// Smallest interval width that is still subdivided.
pub const NUMERIC_INTERVAL: Real = f64::EPSILON as Real;

/// Failure sentinel, returned instead of an error when the integrand is non-finite.
pub const NAN: Real = Real::NAN;

/// Archimedes' constant as a [`Real`].
pub const PI: Real = std::f64::consts::PI;

/// A point on the integrand, `y = f(x)`.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Sample {
    pub x: Real,
    pub y: Real,
}

impl Sample {
    pub fn eval<F>(f: &F, x: Real) -> Self
    where
        F: Fn(Real) -> Real,
    {
        Self { x, y: f(x) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_epsilon_resolves_one() {
        assert!(1. + EPSILON > 1.);
        assert_eq!(1. + EPSILON / 2., 1.);
    }

    #[test]
    fn test_nan_poisons_arithmetic() {
        assert!((NAN + 1.).is_nan());
        assert!((3. * NAN).is_nan());
        assert!(NAN != NAN);
    }

    #[test]
    fn test_sample_eval() {
        let s = Sample::eval(&|x: Real| x * x, 3.);
        assert_eq!(s.x, 3.);
        assert_eq!(s.y, 9.);
    }
}
