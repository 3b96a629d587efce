//! Reconstruction of samples from coefficients.
//!
//! Composition is the inverse of decomposition: Σ_p c_p · B_p(point) over
//! any [`BasisSet`]. Coefficients below the precision threshold are
//! skipped, so tiny noise coefficients never cost a basis evaluation.

use crate::annular::AnnularBasis;
use crate::basis::{BasisSet, ZernikeBasis};
use crate::config::precision;
use crate::error::Result;
use crate::gradient::{GradientBasis, VectorBasis};
use crate::point::{Gradient, PolarPoint, Sample};

/// Σ c_p · B_p over every point of `basis`.
pub fn compose_with<B: BasisSet>(basis: &B, coefficients: &[f64]) -> Result<Vec<B::Sample>> {
    let threshold = precision();
    let mut out = vec![B::Sample::default(); basis.point_count()];
    for (p, &c) in coefficients.iter().enumerate().skip(basis.first_index()) {
        if c.abs() < threshold {
            continue;
        }
        let values = basis.evaluate(p)?;
        for (o, v) in out.iter_mut().zip(&values) {
            o.add_scaled(c, v);
        }
    }
    Ok(out)
}

/// Surface heights of Σ c_p Z_p.
pub fn compose(coefficients: &[f64], points: &[PolarPoint]) -> Result<Vec<f64>> {
    compose_with(&ZernikeBasis::new(points), coefficients)
}

/// Wavefront gradients of Σ c_p Z_p. The piston coefficient is ignored.
pub fn compose_gradient(coefficients: &[f64], points: &[PolarPoint]) -> Result<Vec<Gradient>> {
    compose_with(&GradientBasis::new(points), coefficients)
}

/// Gradients of Σ s_p S_p over the Zhao–Burge vector polynomials.
pub fn compose_vector(coefficients: &[f64], points: &[PolarPoint]) -> Result<Vec<Gradient>> {
    compose_with(&VectorBasis::new(points), coefficients)
}

/// Surface heights of Σ c_p A_p over the annular basis fitted to `points`.
pub fn compose_annular(coefficients: &[f64], points: &[PolarPoint]) -> Result<Vec<f64>> {
    let basis = AnnularBasis::new(coefficients.len(), points)?;
    compose_with(&basis, coefficients)
}
