//! Adaptive numerical integration of `Real -> Real` functions over a closed interval.
//!
//! Two independent integrators are provided, both bounded by recursion depth:
//!
//! - [`Simpson`]: bisection with Simpson's rule and Lyness's error correction.
//! - [`Lobatto`]: six-way subdivision, a four point Gauss–Lobatto rule checked
//!   against a seven point Kronrod-style extension.
//!
//! A non-finite integrand anywhere it is sampled turns the whole result into
//! [`NAN`]; use [`Integral::checked_integrate`] for a `Result` instead.

pub mod error;
pub mod format;
pub mod integral;
pub mod lobatto;
pub mod precision;
pub mod simpson;

pub use error::IntegrationError;
pub use format::{real_to_string, Fixed};
pub use integral::Integral;
pub use lobatto::{lobatto, Lobatto};
pub use precision::{Real, EPSILON, NAN, NUMERIC_INTERVAL, PI};
pub use simpson::{simpson, Simpson};
