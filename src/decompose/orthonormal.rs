//! Decomposition through an explicit orthonormal basis.
//!
//! The sampled Zernike columns are not orthogonal on an arbitrary point
//! set. Normalizing each column by its L2 norm (`A = Z·D⁻¹`) and factoring
//! `A = U·R` gives an orthonormal basis U in which every coefficient is a
//! plain inner product, `u = Uᵀ·w`. Column k of U mixes only the first k
//! Zernike columns, so the Zernike coefficients are recovered from u by
//! back-substitution through the triangular factor, `R·c = u`, followed by
//! undoing the column scaling, `z = D⁻¹·c`.

use nalgebra::{DMatrix, DVector};
use tracing::debug;

use crate::basis::term_count;
use crate::error::{Result, ZernikeError};
use crate::point::{Gradient, PolarPoint};

use super::least_squares::{
    gradient_design_matrix, height_design_matrix, stack_gradients, threshold_coefficients,
};
use super::{check_lengths, Decomposition, Strategy};

/// Orthonormal basis of a design matrix together with the un-mixing data.
pub struct OrthonormalBasis {
    /// Orthonormal columns (rows × cols).
    pub u: DMatrix<f64>,
    /// Upper-triangular mixing matrix (cols × cols).
    pub r: DMatrix<f64>,
    /// L2 norm of each original column.
    pub column_norms: Vec<f64>,
}

impl OrthonormalBasis {
    /// Factor a design matrix. Requires rows ≥ columns and no empty column.
    pub fn new(mut a: DMatrix<f64>) -> Result<Self> {
        let (rows, cols) = a.shape();
        if rows < cols {
            return Err(ZernikeError::InsufficientPoints {
                required: cols,
                available: rows,
            });
        }
        let mut column_norms = Vec::with_capacity(cols);
        for mut col in a.column_iter_mut() {
            let norm = col.norm();
            if norm == 0.0 {
                return Err(ZernikeError::SingularSystem);
            }
            col /= norm;
            column_norms.push(norm);
        }
        let qr = a.qr();
        Ok(Self {
            u: qr.q(),
            r: qr.r(),
            column_norms,
        })
    }

    /// Coefficients of `samples` in the orthonormal basis.
    pub fn project(&self, samples: &DVector<f64>) -> DVector<f64> {
        self.u.tr_mul(samples)
    }

    /// Convert orthonormal-basis coefficients back to coefficients of the
    /// original (unscaled) columns.
    pub fn unmix(&self, u: &DVector<f64>) -> Result<Vec<f64>> {
        let c = self
            .r
            .solve_upper_triangular(u)
            .ok_or(ZernikeError::SingularSystem)?;
        Ok(c.iter()
            .zip(&self.column_norms)
            .map(|(ck, dk)| ck / dk)
            .collect())
    }

    /// Project and un-mix in one step.
    pub fn solve(&self, samples: &DVector<f64>) -> Result<Vec<f64>> {
        self.unmix(&self.project(samples))
    }
}

/// Orthonormal-basis decomposition of heights. Needs at least
/// (Nmax+1)(Nmax+2)/2 points.
pub fn decompose_orthonormal(
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
    let basis = OrthonormalBasis::new(height_design_matrix(points, terms)?)?;
    let z = basis.solve(&DVector::from_column_slice(heights))?;

    let result = Decomposition::new(threshold_coefficients(z), Strategy::Orthonormal);
    debug!(
        "Orthonormal decomposition: {} points, {} terms, last nonzero index {}",
        points.len(),
        terms,
        result.last_nonzero
    );
    Ok(result)
}

/// Orthonormal-basis decomposition of gradients into wavefront Zernike
/// coefficients. Index 0 stays 0.
pub fn decompose_gradient_orthonormal(
    max_order: usize,
    points: &[PolarPoint],
    gradients: &[Gradient],
) -> Result<Decomposition> {
    check_lengths(points.len(), gradients.len())?;
    let terms = term_count(max_order);
    if terms < 2 {
        return Ok(Decomposition::new(vec![0.0; terms], Strategy::Orthonormal));
    }
    let basis = OrthonormalBasis::new(gradient_design_matrix(points, terms)?)?;
    let z = basis.solve(&stack_gradients(gradients))?;

    let coefficients = threshold_coefficients(std::iter::once(0.0).chain(z));
    let result = Decomposition::new(coefficients, Strategy::Orthonormal);
    debug!(
        "Gradient orthonormal decomposition: {} points, {} terms, last nonzero index {}",
        points.len(),
        terms,
        result.last_nonzero
    );
    Ok(result)
}
