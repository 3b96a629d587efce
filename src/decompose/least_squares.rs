//! Joint least-squares fit through a Householder QR factorization.
//!
//! Row i of the design matrix holds every basis function at point i; the
//! gradient variant stacks all X components first, then all Y components.
//! Solving `A·z ≈ b` as `R·z = (Qᵀb)[..cols]` fits every term
//! simultaneously, unlike the sequential greedy projection.

use nalgebra::{DMatrix, DVector};
use tracing::debug;

use crate::basis::{index_to_order, term_count, zernike_by_index};
use crate::config::precision;
use crate::error::{zeroed, Result, ZernikeError};
use crate::gradient::gradient;
use crate::point::{Gradient, PolarPoint};

use super::{check_lengths, Decomposition, Strategy};

/// Design matrix with one column per term, one row per point.
pub(crate) fn height_design_matrix(points: &[PolarPoint], terms: usize) -> Result<DMatrix<f64>> {
    let mut a = DMatrix::from_vec(points.len(), terms, zeroed(points.len() * terms)?);
    for p in 0..terms {
        let values = zernike_by_index(p, points)?;
        a.column_mut(p).copy_from_slice(&values);
    }
    Ok(a)
}

/// Design matrix of ∇Z columns for terms 1..`terms`, X rows above Y rows.
pub(crate) fn gradient_design_matrix(
    points: &[PolarPoint],
    terms: usize,
) -> Result<DMatrix<f64>> {
    let n = points.len();
    let cols = terms.saturating_sub(1);
    let mut a = DMatrix::from_vec(2 * n, cols, zeroed(2 * n * cols)?);
    for p in 1..terms {
        let (order, m) = index_to_order(p);
        let grads = gradient(order, m, points)?;
        let mut col = a.column_mut(p - 1);
        for (i, g) in grads.iter().enumerate() {
            col[i] = g.x;
            col[n + i] = g.y;
        }
    }
    Ok(a)
}

/// Stack gradient samples as [x₀ … xₙ, y₀ … yₙ].
pub(crate) fn stack_gradients(gradients: &[Gradient]) -> DVector<f64> {
    let n = gradients.len();
    DVector::from_fn(2 * n, |i, _| {
        if i < n {
            gradients[i].x
        } else {
            gradients[i - n].y
        }
    })
}

/// Least-squares solution of `a·x ≈ b`. Requires rows ≥ columns.
pub(crate) fn solve_qr(a: DMatrix<f64>, b: &DVector<f64>) -> Result<DVector<f64>> {
    let (rows, cols) = a.shape();
    if rows < cols {
        return Err(ZernikeError::InsufficientPoints {
            required: cols,
            available: rows,
        });
    }
    let qr = a.qr();
    let mut qtb = b.clone();
    qr.q_tr_mul(&mut qtb);
    let r = qr.r();
    let rhs = qtb.rows(0, cols).into_owned();
    r.solve_upper_triangular(&rhs)
        .ok_or(ZernikeError::SingularSystem)
}

/// Zero out coefficients below the precision threshold.
pub(crate) fn threshold_coefficients(values: impl IntoIterator<Item = f64>) -> Vec<f64> {
    let threshold = precision();
    values
        .into_iter()
        .map(|c| if c.abs() < threshold { 0.0 } else { c })
        .collect()
}

/// Least-squares decomposition of heights. Needs at least
/// (Nmax+1)(Nmax+2)/2 points.
pub fn decompose_least_squares(
    max_order: usize,
    points: &[PolarPoint],
    heights: &[f64],
) -> Result<Decomposition> {
    check_lengths(points.len(), heights.len())?;
    let terms = term_count(max_order);
    if points.len() < terms {
        return Err(ZernikeError::InsufficientPoints {
            required: terms,
            available: points.len(),
        });
    }
    let a = height_design_matrix(points, terms)?;
    let b = DVector::from_column_slice(heights);
    let solution = solve_qr(a, &b)?;

    let result = Decomposition::new(
        threshold_coefficients(solution.iter().copied()),
        Strategy::LeastSquares,
    );
    debug!(
        "Least-squares decomposition: {} points, {} terms, last nonzero index {}",
        points.len(),
        terms,
        result.last_nonzero
    );
    Ok(result)
}

/// Least-squares decomposition of gradients into wavefront Zernike
/// coefficients. Index 0 (piston) is not observable and stays 0.
pub fn decompose_gradient_least_squares(
    max_order: usize,
    points: &[PolarPoint],
    gradients: &[Gradient],
) -> Result<Decomposition> {
    check_lengths(points.len(), gradients.len())?;
    let terms = term_count(max_order);
    if terms < 2 {
        return Ok(Decomposition::new(vec![0.0; terms], Strategy::LeastSquares));
    }
    let a = gradient_design_matrix(points, terms)?;
    let b = stack_gradients(gradients);
    let solution = solve_qr(a, &b)?;

    let coefficients = threshold_coefficients(std::iter::once(0.0).chain(solution.iter().copied()));
    let result = Decomposition::new(coefficients, Strategy::LeastSquares);
    debug!(
        "Gradient least-squares decomposition: {} points, {} terms, last nonzero index {}",
        points.len(),
        terms,
        result.last_nonzero
    );
    Ok(result)
}
