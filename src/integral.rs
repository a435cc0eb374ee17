use crate::error::IntegrationError;
use crate::precision::Real;

/// A definite integration rule over a closed interval.
///
/// Implementations signal a non-finite integrand by returning [`crate::NAN`];
/// test the result with `is_nan`, never by comparing against NaN.
pub trait Integral {
    fn integrate<F>(&self, f: F, support: (Real, Real)) -> Real
    where
        F: Fn(Real) -> Real;

    /// Same as [`Integral::integrate`], with the NaN sentinel turned into an error.
    fn checked_integrate<F>(&self, f: F, support: (Real, Real)) -> Result<Real, IntegrationError>
    where
        F: Fn(Real) -> Real,
    {
        let area = self.integrate(f, support);

        if !area.is_finite() {
            let (a, b) = support;
            return Err(IntegrationError::NonFinite {
                a: a.min(b),
                b: a.max(b),
            });
        }

        Ok(area)
    }
}

impl<I> Integral for &I
where
    I: Integral,
{
    fn integrate<F>(&self, f: F, support: (Real, Real)) -> Real
    where
        F: Fn(Real) -> Real,
    {
        (**self).integrate(f, support)
    }
}
