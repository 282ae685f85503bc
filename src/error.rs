//! Error types for the quadrature driver.

use thiserror::Error;

/// Result type alias using the driver's error.
pub type Result<T> = core::result::Result<T, QuadError>;

/// Errors reported by [`crate::quad`].
///
/// The integrands themselves never fail; these cover invalid driver input
/// and integrands that blow up inside the range.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QuadError {
    /// An integration bound is NaN or infinite.
    #[error("Invalid bounds [{lo}, {hi}]: both must be finite")]
    InvalidBounds {
        /// Lower bound
        lo: f64,
        /// Upper bound
        hi: f64,
    },

    /// The tolerances cannot be satisfied.
    #[error("Invalid tolerance: epsabs = {epsabs}, epsrel = {epsrel}")]
    InvalidTolerance {
        /// Absolute tolerance
        epsabs: f64,
        /// Relative tolerance
        epsrel: f64,
    },

    /// The panel limit is zero.
    #[error("Invalid limit: at least one panel is required")]
    InvalidLimit,

    /// The integrand produced NaN or an infinity inside a panel, or the
    /// estimate overflowed.
    #[error("Integrand is not finite on [{lo}, {hi}]")]
    NonFiniteValue {
        /// Panel lower bound
        lo: f64,
        /// Panel upper bound
        hi: f64,
    },
}
