//! Error type shared by every evaluation, decomposition and composition call.

use crate::decompose::Strategy;

/// Errors returned by the Zernike engine.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ZernikeError {
    /// The (n, m) pair does not describe a Zernike polynomial:
    /// n > 100, n < 0, n < |m| or (n − m) odd.
    #[error("invalid Zernike polynomial order (n={n}, m={m})")]
    InvalidPolynomialOrder { n: i32, m: i32 },
    /// Not enough samples to solve for the requested number of terms.
    #[error("insufficient points: {required} required, {available} available")]
    InsufficientPoints { required: usize, available: usize },
    /// Annular coordinates violate 0 < ε < ρ_max ≤ 1.
    #[error("annular coordinates out of range (epsilon={epsilon}, rho_max={rho_max})")]
    CoordinateOutOfRange { epsilon: f64, rho_max: f64 },
    /// A scratch buffer could not be reserved.
    #[error("failed to allocate {elements} elements")]
    AllocationFailure { elements: usize },
    /// Samples are not index-aligned with the points.
    #[error("{samples} samples supplied for {points} points")]
    LengthMismatch { points: usize, samples: usize },
    /// The precision threshold must be finite and non-negative.
    #[error("invalid precision threshold {0}")]
    InvalidPrecision(f64),
    /// The triangular factor of the design matrix is singular.
    #[error("design matrix is rank deficient")]
    SingularSystem,
    /// The strategy does not apply to this kind of sample.
    #[error("strategy {0:?} is not supported for this sample type")]
    UnsupportedStrategy(Strategy),
}

pub type Result<T> = std::result::Result<T, ZernikeError>;

/// Reserve a zero-filled buffer, reporting allocator failure instead of aborting.
pub(crate) fn zeroed(elements: usize) -> Result<Vec<f64>> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(elements)
        .map_err(|_| ZernikeError::AllocationFailure { elements })?;
    buf.resize(elements, 0.0);
    Ok(buf)
}
