//! Greedy projection with deflation.
//!
//! Terms are visited in increasing index order. Each coefficient is the
//! projection of the running residual onto one basis function,
//!
//! ```text
//! K_p = Σ basis_p · residual / Σ basis_p²
//! ```
//!
//! and, unless |K_p| is below the precision threshold, K_p·basis_p is
//! subtracted from the residual before the next term. This is exact only
//! when the sampled basis is orthogonal over the point set (dense or
//! symmetric sampling); on skewed samples accuracy degrades silently.

use tracing::debug;

use crate::basis::{term_count, BasisSet, ZernikeBasis};
use crate::config::precision;
use crate::error::Result;
use crate::gradient::VectorBasis;
use crate::point::{norm_sqr, Gradient, PolarPoint, Sample};

use super::{check_lengths, Decomposition, Strategy};

/// Greedy decomposition of `samples` over the first `terms` functions of `basis`.
pub fn greedy_with<B: BasisSet>(
    basis: &B,
    samples: &[B::Sample],
    terms: usize,
    strategy: Strategy,
) -> Result<Decomposition> {
    check_lengths(basis.point_count(), samples.len())?;
    let threshold = precision();
    let mut residual = samples.to_vec();
    let mut coefficients = vec![0.0; terms];
    let mut deflated = 0usize;

    for p in basis.first_index()..terms {
        let values = basis.evaluate(p)?;
        let norm = norm_sqr(&values);
        if norm <= f64::MIN_POSITIVE {
            continue;
        }
        let k = values
            .iter()
            .zip(&residual)
            .map(|(v, r)| v.dot(r))
            .sum::<f64>()
            / norm;
        if k.abs() < threshold {
            continue;
        }
        coefficients[p] = k;
        deflated += 1;
        for (r, v) in residual.iter_mut().zip(&values) {
            r.add_scaled(-k, v);
        }
    }

    let result = Decomposition::new(coefficients, strategy);
    debug!(
        "Greedy decomposition: {} terms, {} nonzero, last nonzero index {}, residual Σ² {:.3e}",
        terms,
        deflated,
        result.last_nonzero,
        norm_sqr(&residual)
    );
    Ok(result)
}

/// Greedy decomposition of heights into standard Zernike coefficients.
pub fn decompose_greedy(
    max_order: usize,
    points: &[PolarPoint],
    heights: &[f64],
) -> Result<Decomposition> {
    greedy_with(
        &ZernikeBasis::new(points),
        heights,
        term_count(max_order),
        Strategy::Greedy,
    )
}

/// Greedy decomposition of gradients into Zhao–Burge vector-polynomial
/// coefficients. Index 0 is always 0.
///
/// Use [`vector_to_zernike`](crate::gradient::vector_to_zernike) to obtain
/// wavefront Zernike coefficients.
pub fn decompose_vector_greedy(
    max_order: usize,
    points: &[PolarPoint],
    gradients: &[Gradient],
) -> Result<Decomposition> {
    greedy_with(
        &VectorBasis::new(points),
        gradients,
        term_count(max_order),
        Strategy::Greedy,
    )
}
