use thiserror::Error;

use crate::precision::Real;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum IntegrationError {
    #[error("integrand is not finite somewhere on [{a}, {b}]")]
    NonFinite { a: Real, b: Real },

    #[error("epsilon {requested:e} is below the numerically safe floor {floor:e}")]
    EpsilonBelowFloor { requested: Real, floor: Real },

    #[error("max_depth {requested} exceeds the ceiling {ceiling}")]
    DepthAboveCeiling { requested: u8, ceiling: u8 },
}
