//! Decomposition of sampled data into Zernike coefficients.
//!
//! Four strategies are available:
//! - [`Strategy::Greedy`]: sequential projection with deflation. Cheap and
//!   exact on dense symmetric sampling; biased on skewed samples.
//! - [`Strategy::LeastSquares`]: joint QR least-squares fit.
//! - [`Strategy::Orthonormal`]: projection onto an orthonormalized basis
//!   followed by un-mixing back to Zernike coefficients.
//! - [`Strategy::Annular`]: greedy projection onto the annular Zernike
//!   basis, with ε and ρmax derived from the sample radii.

pub mod greedy;
pub mod least_squares;
pub mod orthonormal;

pub use greedy::{decompose_greedy, decompose_vector_greedy, greedy_with};
pub use least_squares::{decompose_gradient_least_squares, decompose_least_squares};
pub use orthonormal::{decompose_gradient_orthonormal, decompose_orthonormal, OrthonormalBasis};

use crate::annular::decompose_annular;
use crate::config::DecomposeConfig;
use crate::error::{Result, ZernikeError};
use crate::gradient::vector_to_zernike;
use crate::point::{Gradient, PolarPoint};

/// Decomposition algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Greedy,
    LeastSquares,
    Orthonormal,
    Annular,
}

/// Coefficients produced by a decomposition.
#[derive(Debug, Clone, PartialEq)]
pub struct Decomposition {
    /// One coefficient per single index, (Nmax+1)(Nmax+2)/2 entries.
    pub coefficients: Vec<f64>,
    /// Largest index with a nonzero coefficient (0 if none).
    pub last_nonzero: usize,
    /// Algorithm that produced the coefficients.
    pub strategy: Strategy,
}

impl Decomposition {
    pub fn new(coefficients: Vec<f64>, strategy: Strategy) -> Self {
        let last_nonzero = coefficients.iter().rposition(|&c| c != 0.0).unwrap_or(0);
        Self {
            coefficients,
            last_nonzero,
            strategy,
        }
    }

    pub fn len(&self) -> usize {
        self.coefficients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coefficients.is_empty()
    }
}

/// Points and samples must pair up one to one.
pub(crate) fn check_lengths(points: usize, samples: usize) -> Result<()> {
    if points != samples {
        return Err(ZernikeError::LengthMismatch { points, samples });
    }
    Ok(())
}

/// Decompose surface heights with the configured strategy.
pub fn decompose(
    config: &DecomposeConfig,
    points: &[PolarPoint],
    heights: &[f64],
) -> Result<Decomposition> {
    match config.strategy {
        Strategy::Greedy => decompose_greedy(config.max_order, points, heights),
        Strategy::LeastSquares => decompose_least_squares(config.max_order, points, heights),
        Strategy::Orthonormal => decompose_orthonormal(config.max_order, points, heights),
        Strategy::Annular => decompose_annular(config.max_order, points, heights),
    }
}

/// Decompose wavefront gradients into wavefront Zernike coefficients.
///
/// The greedy strategy projects onto the Zhao–Burge vector polynomials and
/// converts the result with [`vector_to_zernike`]; the joint strategies fit
/// ∇Z directly. The piston coefficient is always 0. The annular basis has
/// no gradient form and is rejected.
pub fn decompose_gradient(
    config: &DecomposeConfig,
    points: &[PolarPoint],
    gradients: &[Gradient],
) -> Result<Decomposition> {
    match config.strategy {
        Strategy::Greedy => {
            let vector = decompose_vector_greedy(config.max_order, points, gradients)?;
            let coefficients =
                least_squares::threshold_coefficients(vector_to_zernike(&vector.coefficients));
            Ok(Decomposition::new(coefficients, Strategy::Greedy))
        }
        Strategy::LeastSquares => {
            decompose_gradient_least_squares(config.max_order, points, gradients)
        }
        Strategy::Orthonormal => {
            decompose_gradient_orthonormal(config.max_order, points, gradients)
        }
        Strategy::Annular => Err(ZernikeError::UnsupportedStrategy(Strategy::Annular)),
    }
}
