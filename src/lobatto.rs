//! Adaptive Gauss–Lobatto quadrature with a Kronrod-style extension.
//!
//! Walter Gander, Walter Gautschi, *Adaptive Quadrature - Revisited*.
//!
//! Each panel `[start, end]` with half-width `h` is sampled at seven points,
//! symmetric about the midpoint `m`:
//!
//! ```text
//! start  m-αh  m-βh   m   m+βh  m+αh  end      α = sqrt(2/3), β = sqrt(1/5)
//! ```
//!
//! The four point Lobatto rule uses the endpoints and `m±βh`; the seven point
//! rule uses all of them. When the two disagree by more than `epsilon` the panel
//! is split at every sample into six sub-panels.

use serde::Deserialize;

use crate::error::IntegrationError;
use crate::integral::Integral;
use crate::precision::{Real, Sample, EPSILON, NAN, NUMERIC_INTERVAL};

/// Deepest subdivision allowed, 6^8 ~ 1.7 million panels.
pub const MAX_DEPTH: u8 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct Lobatto {
    /// Absolute tolerance on the difference between the two rules, per panel.
    pub epsilon: Real,
    pub max_depth: u8,
}

impl Default for Lobatto {
    fn default() -> Self {
        Self {
            epsilon: 1e-10,
            max_depth: 2,
        }
    }
}

impl Lobatto {
    pub fn new(epsilon: Real, max_depth: u8) -> Self {
        Self { epsilon, max_depth }
    }

    /// Like [`Lobatto::new`], but rejects settings that would otherwise be clamped.
    pub fn try_new(epsilon: Real, max_depth: u8) -> Result<Self, IntegrationError> {
        if !(epsilon >= EPSILON) {
            return Err(IntegrationError::EpsilonBelowFloor {
                requested: epsilon,
                floor: EPSILON,
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

    pub fn effective_epsilon(&self) -> Real {
        self.epsilon.max(EPSILON)
    }

    pub fn effective_max_depth(&self) -> u8 {
        self.max_depth.min(MAX_DEPTH)
    }
}

struct Subdivision<'a, F> {
    f: &'a F,
    epsilon: Real,
    max_depth: u8,
    node_lobatto: Real,
    node_kronrod: Real,
}

impl<F> Subdivision<'_, F>
where
    F: Fn(Real) -> Real,
{
    fn refine(&self, start: Sample, end: Sample, depth: u8) -> Real {
        let h = (end.x - start.x) / 2.;
        let m = (start.x + end.x) / 2.;

        let p2 = Sample::eval(self.f, m - self.node_kronrod * h);
        let p3 = Sample::eval(self.f, m - self.node_lobatto * h);
        let p4 = Sample::eval(self.f, m);
        let p5 = Sample::eval(self.f, m + self.node_lobatto * h);
        let p6 = Sample::eval(self.f, m + self.node_kronrod * h);

        let area_kronrod = (h / 1470.)
            * ((start.y + end.y) * 77.
                + (p2.y + p6.y) * 432.
                + (p3.y + p5.y) * 625.
                + p4.y * 672.);

        if !area_kronrod.is_finite() {
            return NAN;
        }

        let depth = depth + 1;
        if h.abs() < NUMERIC_INTERVAL || depth > self.max_depth {
            return area_kronrod;
        }

        let area_lobatto = (h / 6.) * (start.y + end.y + (p3.y + p5.y) * 5.);

        if (area_kronrod - area_lobatto).abs() < self.epsilon {
            return area_kronrod;
        }

        [start, p2, p3, p4, p5, p6, end]
            .windows(2)
            .map(|pair| self.refine(pair[0], pair[1], depth))
            .sum()
    }
}

impl Integral for Lobatto {
    fn integrate<F>(&self, f: F, support: (Real, Real)) -> Real
    where
        F: Fn(Real) -> Real,
    {
        let (a, b) = support;
        let (a, b) = if b < a { (b, a) } else { (a, b) };

        let start = Sample::eval(&f, a);
        let end = Sample::eval(&f, b);

        if !start.y.is_finite() || !end.y.is_finite() {
            return NAN;
        }

        let subdivision = Subdivision {
            f: &f,
            epsilon: self.effective_epsilon(),
            max_depth: self.effective_max_depth(),
            node_lobatto: (1. / 5. as Real).sqrt(),
            node_kronrod: (2. / 3. as Real).sqrt(),
        };

        subdivision.refine(start, end, 0)
    }
}

/// Integrates `f` over `[a, b]` with the default [`Lobatto`] settings.
pub fn lobatto<F>(f: F, a: Real, b: Real) -> Real
where
    F: Fn(Real) -> Real,
{
    Lobatto::default().integrate(f, (a, b))
}
