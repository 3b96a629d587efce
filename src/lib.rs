//! # zernike
//!
//! Wavefront decomposition and composition with **Zernike** and **annular
//! Zernike** polynomials.
//!
//! A scalar field (surface heights) or a vector field (wavefront slopes)
//! sampled at scattered points on a disk or annulus is represented as a
//! weighted sum of orthogonal polynomials. This crate converts in both
//! directions: sampled data → coefficient vector (decomposition) and
//! coefficient vector → sampled data (composition).
//!
//! ## Features
//!
//! - **Closed-form evaluation** of Z_n^m up to n = 100, with analytic gradients
//! - **Four decomposition strategies**: greedy projection, joint least squares
//!   (QR), orthonormal-basis projection and annular greedy projection
//! - **Gradient decomposition** through the Zhao–Burge vector polynomials or
//!   directly against ∇Z
//! - **Annular basis** built with Mahajan's recursion, parameterized by the
//!   annulus actually covered by the samples
//!
//! ## Example
//!
//! ```
//! use zernike::{compose, decompose, DecomposeConfig, PolarPoint, Strategy};
//!
//! // A polar grid: 8 rings × 32 spokes
//! let mut points = Vec::new();
//! for ring in 0..8 {
//!     let r = 0.1 + 0.11 * ring as f64;
//!     for k in 0..32 {
//!         points.push(PolarPoint::new(r, k as f64 * std::f64::consts::TAU / 32.0));
//!     }
//! }
//!
//! // Defocus plus a little astigmatism
//! let coefficients = [0.0, 0.0, 0.0, 0.3, 1.0, 0.0];
//! let heights = compose(&coefficients, &points).unwrap();
//!
//! let config = DecomposeConfig {
//!     max_order: 2,
//!     strategy: Strategy::LeastSquares,
//! };
//! let result = decompose(&config, &points, &heights).unwrap();
//! assert!((result.coefficients[4] - 1.0).abs() < 1e-9);
//! assert_eq!(result.last_nonzero, 4);
//! ```
//!
//! ## Index convention
//!
//! Polynomials are addressed by a single index p ordered by radial order n,
//! then angular frequency m = −n, −n+2, …, n (see [`basis::index`]). A
//! decomposition up to order Nmax yields (Nmax+1)(Nmax+2)/2 coefficients.
//!
//! ## Precision threshold
//!
//! A process-wide threshold (default 1e-6, see [`set_precision`]) decides
//! when a coefficient counts as zero: the greedy projection does not deflate
//! such terms, composition skips them and the joint solvers report them as
//! zero.

pub mod annular;
pub mod basis;
pub mod compose;
pub mod config;
pub mod decompose;
pub mod error;
pub mod gradient;
pub mod point;

pub use annular::{decompose_annular, AnnularBasis, AnnularContext};
pub use basis::{
    index_to_order, order_to_index, term_count, zernike, zernike_by_index, zernike_with_norm,
    BasisSet, PixelGrid, ZernikeBasis,
};
pub use compose::{compose, compose_annular, compose_gradient, compose_vector, compose_with};
pub use config::{precision, set_precision, DecomposeConfig, DEFAULT_PRECISION};
pub use decompose::{
    decompose, decompose_gradient, decompose_gradient_least_squares,
    decompose_gradient_orthonormal, decompose_greedy, decompose_least_squares,
    decompose_orthonormal, decompose_vector_greedy, Decomposition, Strategy,
};
pub use error::{Result, ZernikeError};
pub use gradient::{
    gradient, gradient_with_norm, vector_polynomial, vector_polynomial_with_norm,
    vector_to_zernike, GradientBasis, VectorBasis,
};
pub use point::{Gradient, PolarPoint, Sample};
