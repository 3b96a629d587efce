//! Closed-form Zernike polynomials on the unit disk.
//!
//! Z_n^m(r, θ) = N_n^m · R_n^|m|(r) · Θ_m(θ) with
//!
//! ```text
//! N_n^m = sqrt(2(n+1) / (π ε_m)),  ε_m = 2 if m = 0 else 1
//! Θ_m   = cos(mθ) for m > 0, sin(|m|θ) for m < 0, 1 for m = 0
//! ```
//!
//! With this normalization ∫∫ Z² dA = 1 over the unit disk. Points outside
//! the disk (r > 1) evaluate to zero.

pub mod grid;
pub mod index;
pub mod radial;

pub use grid::PixelGrid;
pub use index::{index_to_order, order_to_index, term_count};
pub use radial::RadialPowers;

use std::f64::consts::PI;

use crate::error::{zeroed, Result, ZernikeError};
use crate::point::{PolarPoint, Sample};

/// Highest radial order supported by the factorial table.
pub const MAX_ORDER: i32 = 100;

/// Validate an (n, m) pair; `min_n` is 0 for values and 1 for gradients.
pub(crate) fn check_order(n: i32, m: i32, min_n: i32) -> Result<()> {
    if n > MAX_ORDER || n < min_n || n < m.abs() || (n - m) % 2 != 0 {
        return Err(ZernikeError::InvalidPolynomialOrder { n, m });
    }
    Ok(())
}

/// Normalization factor sqrt(2(n+1)/(π ε_m)).
pub(crate) fn normalization(n: i32, m: i32) -> f64 {
    let eps_m = if m == 0 { 2.0 } else { 1.0 };
    (2.0 * (n as f64 + 1.0) / PI / eps_m).sqrt()
}

/// Angular factor Θ_m(θ).
pub(crate) fn angular(m: i32, theta: f64) -> f64 {
    let m_theta = m.abs() as f64 * theta;
    match m {
        0 => 1.0,
        m if m > 0 => m_theta.cos(),
        _ => m_theta.sin(),
    }
}

/// Values of Z_n^m at every point.
pub fn zernike(n: i32, m: i32, points: &[PolarPoint]) -> Result<Vec<f64>> {
    zernike_with_norm(n, m, points).map(|(values, _)| values)
}

/// Values of Z_n^m at every point together with Σ value².
pub fn zernike_with_norm(n: i32, m: i32, points: &[PolarPoint]) -> Result<(Vec<f64>, f64)> {
    check_order(n, m, 0)?;
    let nu = n as usize;
    let coeffs = radial::radial_coefficients(nu, m.unsigned_abs() as usize);
    let powers = RadialPowers::new(nu, points)?;
    let scale = normalization(n, m);

    let mut values = zeroed(points.len())?;
    let mut norm = 0.0;
    for (idx, (value, p)) in values.iter_mut().zip(points).enumerate() {
        if p.r > 1.0 {
            continue;
        }
        let z = scale * radial::radial(&coeffs, nu, &powers, idx) * angular(m, p.theta);
        *value = z;
        norm += z * z;
    }
    Ok((values, norm))
}

/// Values of the polynomial with single index `p` at every point.
pub fn zernike_by_index(p: usize, points: &[PolarPoint]) -> Result<Vec<f64>> {
    let (n, m) = index_to_order(p);
    zernike(n, m, points)
}

/// A family of basis functions evaluated over a fixed set of points.
///
/// Decomposition and composition are written once against this trait and
/// shared by the standard, gradient, vector-polynomial and annular bases.
pub trait BasisSet {
    /// Sample type produced by one basis function at one point.
    type Sample: Sample;

    /// Number of points the basis is evaluated on.
    fn point_count(&self) -> usize;

    /// First index carrying a non-trivial function (1 for gradient bases,
    /// since the piston term has no slope).
    fn first_index(&self) -> usize {
        0
    }

    /// Values of basis function `p` at every point.
    fn evaluate(&self, p: usize) -> Result<Vec<Self::Sample>>;
}

/// Standard Zernike polynomials on a set of scattered points.
#[derive(Debug, Clone, Copy)]
pub struct ZernikeBasis<'a> {
    points: &'a [PolarPoint],
}

impl<'a> ZernikeBasis<'a> {
    pub fn new(points: &'a [PolarPoint]) -> Self {
        Self { points }
    }
}

impl BasisSet for ZernikeBasis<'_> {
    type Sample = f64;

    fn point_count(&self) -> usize {
        self.points.len()
    }

    fn evaluate(&self, p: usize) -> Result<Vec<f64>> {
        zernike_by_index(p, self.points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::TAU;

    /// Rings at equal-area radii with equally spaced angles.
    fn polar_grid(rings: usize, spokes: usize) -> Vec<PolarPoint> {
        let mut points = Vec::with_capacity(rings * spokes);
        for i in 0..rings {
            let r = ((i as f64 + 0.5) / rings as f64).sqrt();
            for k in 0..spokes {
                points.push(PolarPoint::new(r, k as f64 * TAU / spokes as f64));
            }
        }
        points
    }

    #[test]
    fn test_invalid_orders() {
        let points = [PolarPoint::new(0.5, 0.0)];
        for &(n, m) in &[(-1, 1), (-2, 0), (2, 4), (3, 0), (4, -1), (101, 1), (1, -3)] {
            assert_eq!(
                zernike(n, m, &points),
                Err(ZernikeError::InvalidPolynomialOrder { n, m }),
                "({}, {}) must be rejected",
                n,
                m
            );
        }
    }

    #[test]
    fn test_low_order_closed_forms() {
        let p = PolarPoint::new(0.7, 0.4);
        let pts = [p];
        let r = p.r;
        let t = p.theta;
        let piston = zernike(0, 0, &pts).unwrap()[0];
        assert!((piston - 1.0 / PI.sqrt()).abs() < 1e-14);

        let tilt_x = zernike(1, 1, &pts).unwrap()[0];
        assert!((tilt_x - 2.0 / PI.sqrt() * r * t.cos()).abs() < 1e-14);

        let tilt_y = zernike(1, -1, &pts).unwrap()[0];
        assert!((tilt_y - 2.0 / PI.sqrt() * r * t.sin()).abs() < 1e-14);

        let defocus = zernike(2, 0, &pts).unwrap()[0];
        let expected = (3.0 / PI).sqrt() * (2.0 * r * r - 1.0);
        assert!((defocus - expected).abs() < 1e-14);

        let astig = zernike(2, -2, &pts).unwrap()[0];
        let expected = (6.0 / PI).sqrt() * r * r * (2.0 * t).sin();
        assert!((astig - expected).abs() < 1e-14);
    }

    #[test]
    fn test_points_outside_pupil_are_masked() {
        let points = [PolarPoint::new(1.2, 0.3), PolarPoint::new(0.5, 0.3)];
        let (values, norm) = zernike_with_norm(2, 2, &points).unwrap();
        assert_eq!(values[0], 0.0);
        assert!(values[1] != 0.0);
        assert!((norm - values[1] * values[1]).abs() < 1e-15);
    }

    #[test]
    fn test_by_index_matches_order() {
        let points = polar_grid(3, 8);
        for p in 0..term_count(5) {
            let (n, m) = index_to_order(p);
            assert_eq!(zernike_by_index(p, &points), zernike(n, m, &points));
        }
    }

    #[test]
    fn test_orthogonality_on_symmetric_grid() {
        let points = polar_grid(200, 64);
        // Discrete sums approximate (N/π)·∫∫ over the disk.
        let scale = PI / points.len() as f64;
        let pmax = term_count(6);
        let values: Vec<Vec<f64>> = (0..pmax)
            .map(|p| zernike_by_index(p, &points).unwrap())
            .collect();
        for i in 0..pmax {
            for j in i..pmax {
                let dot: f64 = values[i].iter().zip(&values[j]).map(|(a, b)| a * b).sum();
                let dot = dot * scale;
                if i == j {
                    assert!((dot - 1.0).abs() < 1e-3, "<Z{},Z{}> = {}", i, j, dot);
                } else {
                    assert!(dot.abs() < 1e-3, "<Z{},Z{}> = {}", i, j, dot);
                }
            }
        }
    }
}
