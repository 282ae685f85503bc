//! Scalar integrands for numerical integration, with a C ABI for low-level
//! quadrature callbacks and an adaptive Gauss-Kronrod driver.

mod error;
mod ffi;
mod integrand;
mod quad;
#[cfg(test)]
mod utils;

#[cfg(feature = "python")]
mod py;

pub use self::error::{QuadError, Result};
pub use self::integrand::{
    integrand1, integrand1_nd, integrand2, integrand2_nd, Integrand2Args,
    INTEGRAND2_ARITY,
};
pub use self::quad::{
    quad, quad_integrand1, quad_integrand2, QuadOptions, QuadResult,
    KRONROD_POINTS,
};
