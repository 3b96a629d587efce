//! Zernike polynomials orthogonal over an annular pupil.
//!
//! Samples covering an annulus ε ≤ r ≤ ρ_max are poorly served by the disk
//! polynomials, which are not orthogonal there. The annular basis replaces
//! the radial part with Mahajan's annular radial functions (built in the
//! `recursion` submodule) and keeps the usual angular factor:
//!
//! ```text
//! A_n^m(r, θ) = R_n^|m|(r; ε) · Θ_m(θ)
//! ```
//!
//! ε and ρ_max come from the sample radii ([`AnnularContext::from_points`]),
//! so a basis is only meaningful for the point set it was built on.
//! Unlike the disk basis no normalization factor is applied; the greedy
//! projection divides by each function's sampled Σ value² instead.

pub mod context;
mod recursion;

pub use context::AnnularContext;

use tracing::debug;

use crate::basis::{angular, index_to_order, term_count, BasisSet};
use crate::decompose::{check_lengths, greedy_with, Decomposition, Strategy};
use crate::error::{zeroed, Result, ZernikeError};
use crate::point::PolarPoint;

use recursion::RecursionTable;

/// Highest radial order the annular table is built for. Layer 0 of the
/// recursion holds j up to 3·Nmax/2 (radial order 3·Nmax), and j must stay
/// inside the factorial table.
pub const MAX_ANNULAR_ORDER: i32 = 60;

/// Annular Zernike polynomials evaluated over one point set.
#[derive(Debug, Clone)]
pub struct AnnularBasis {
    point_count: usize,
    values: Vec<Vec<f64>>,
    norms: Vec<f64>,
}

impl AnnularBasis {
    /// Evaluate the first `terms` annular polynomials at `points`.
    pub fn new(terms: usize, points: &[PolarPoint]) -> Result<Self> {
        let context = AnnularContext::from_points(points)?;
        let mut basis = Self {
            point_count: points.len(),
            values: Vec::with_capacity(terms),
            norms: Vec::with_capacity(terms),
        };
        if terms == 0 {
            return Ok(basis);
        }
        let (max_order, _) = index_to_order(terms - 1);
        if max_order > MAX_ANNULAR_ORDER {
            return Err(ZernikeError::InvalidPolynomialOrder { n: max_order, m: 0 });
        }
        let table = RecursionTable::new(max_order as usize, &context, points)?;

        for p in 0..terms {
            let (n, m) = index_to_order(p);
            let mut values = table.radial(n as usize, m.unsigned_abs() as usize, points)?;
            let mut norm = 0.0;
            for (v, pt) in values.iter_mut().zip(points) {
                *v *= angular(m, pt.theta);
                norm += *v * *v;
            }
            basis.values.push(values);
            basis.norms.push(norm);
        }
        debug!(
            "Annular basis: {} terms over {} points, epsilon={:.4}, rho_max={:.4}",
            terms,
            points.len(),
            context.epsilon,
            context.rho_max
        );
        Ok(basis)
    }

    /// Number of polynomials held.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Values of polynomial `p` at every point.
    pub fn values(&self, p: usize) -> Option<&[f64]> {
        self.values.get(p).map(Vec::as_slice)
    }

    /// Σ value² of polynomial `p` over the point set.
    pub fn norm(&self, p: usize) -> Option<f64> {
        self.norms.get(p).copied()
    }
}

impl BasisSet for AnnularBasis {
    type Sample = f64;

    fn point_count(&self) -> usize {
        self.point_count
    }

    fn evaluate(&self, p: usize) -> Result<Vec<f64>> {
        let values = self.values(p).ok_or_else(|| {
            let (n, m) = index_to_order(p);
            ZernikeError::InvalidPolynomialOrder { n, m }
        })?;
        let mut out = zeroed(values.len())?;
        out.copy_from_slice(values);
        Ok(out)
    }
}

/// Greedy decomposition of heights sampled over an annulus into annular
/// Zernike coefficients.
pub fn decompose_annular(
    max_order: usize,
    points: &[PolarPoint],
    heights: &[f64],
) -> Result<Decomposition> {
    check_lengths(points.len(), heights.len())?;
    let terms = term_count(max_order);
    let basis = AnnularBasis::new(terms, points)?;
    greedy_with(&basis, heights, terms, Strategy::Annular)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basis::order_to_index;
    use crate::compose::compose_annular;
    use std::f64::consts::TAU;

    /// Rings evenly spaced in r² between ε and ρ_max. The end rings carry
    /// half as many spokes, so equal-weight sums follow the trapezoid rule
    /// over the annulus area.
    fn annulus_grid(epsilon: f64, rho_max: f64, rings: usize, spokes: usize) -> Vec<PolarPoint> {
        let mut points = Vec::new();
        for i in 0..=rings {
            let t = i as f64 / rings as f64;
            let r = if i == rings {
                rho_max
            } else {
                (epsilon * epsilon + (rho_max * rho_max - epsilon * epsilon) * t).sqrt()
            };
            let count = if i == 0 || i == rings { spokes } else { 2 * spokes };
            for k in 0..count {
                points.push(PolarPoint::new(r, k as f64 * TAU / count as f64));
            }
        }
        points
    }

    #[test]
    fn test_basis_is_orthogonal_on_annulus() {
        let points = annulus_grid(0.3, 1.0, 100, 16);
        let basis = AnnularBasis::new(term_count(4), &points).unwrap();
        for i in 0..basis.len() {
            for j in (i + 1)..basis.len() {
                let dot: f64 = basis
                    .values(i)
                    .unwrap()
                    .iter()
                    .zip(basis.values(j).unwrap())
                    .map(|(a, b)| a * b)
                    .sum();
                let cos = dot / (basis.norm(i).unwrap() * basis.norm(j).unwrap()).sqrt();
                assert!(cos.abs() < 1e-3, "A{} · A{} = {}", i, j, cos);
            }
        }
    }

    #[test]
    fn test_piston_and_tilt() {
        let points = annulus_grid(0.5, 0.8, 10, 8);
        let basis = AnnularBasis::new(3, &points).unwrap();
        assert!(basis.values(0).unwrap().iter().all(|&v| (v - 1.0).abs() < 1e-15));
        // R_1^1 = ρ / sqrt(1 + ε²) with ρ and ε scaled by ρ_max
        let eps: f64 = 0.5 / 0.8;
        let norm = (1.0 + eps * eps).sqrt();
        for (v, p) in basis.values(2).unwrap().iter().zip(&points) {
            let expected = p.r / 0.8 / norm * p.theta.cos();
            assert!((v - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn test_annular_roundtrip() {
        let points = annulus_grid(0.3, 0.9, 64, 16);
        let mut original = vec![0.0; term_count(4)];
        original[0] = 0.5;
        original[order_to_index(1, 1)] = 1.2;
        original[order_to_index(2, 0)] = -0.8;
        original[order_to_index(3, -1)] = 0.4;
        original[order_to_index(4, 0)] = 0.3;
        original[order_to_index(4, 4)] = -0.6;
        let heights = compose_annular(&original, &points).unwrap();
        let result = decompose_annular(4, &points, &heights).unwrap();
        assert_eq!(result.strategy, Strategy::Annular);
        assert_eq!(result.last_nonzero, order_to_index(4, 4));
        for (p, (&got, &want)) in result.coefficients.iter().zip(&original).enumerate() {
            assert!(
                (got - want).abs() < 1e-3,
                "coefficient {}: {} vs {}",
                p,
                got,
                want
            );
        }
    }

    #[test]
    fn test_full_disk_is_rejected() {
        let points = [PolarPoint::new(0.0, 0.0), PolarPoint::new(0.9, 1.0)];
        let err = decompose_annular(2, &points, &[0.0, 1.0]).unwrap_err();
        assert_eq!(
            err,
            ZernikeError::CoordinateOutOfRange {
                epsilon: 0.0,
                rho_max: 0.9
            }
        );
    }

    #[test]
    fn test_order_limit() {
        let points = annulus_grid(0.3, 1.0, 4, 4);
        let terms = term_count(MAX_ANNULAR_ORDER as usize + 1);
        assert!(matches!(
            AnnularBasis::new(terms, &points),
            Err(ZernikeError::InvalidPolynomialOrder { .. })
        ));
    }
}
