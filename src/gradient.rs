//! Analytic gradients of the Zernike polynomials and the Zhao–Burge
//! vector polynomials built from them.
//!
//! For Z = N·R(r)·Θ(θ):
//!
//! ```text
//! ∂Z/∂x = Θ·R'·cos θ − R·Θ'/r · sin θ
//! ∂Z/∂y = Θ·R'·sin θ + R·Θ'/r · cos θ
//! ```
//!
//! The gradients ∇Z_j are not mutually orthogonal. Zhao & Burge (Opt.
//! Express 15, 18014, 2007) remove the dependence between orders n and n−2:
//!
//! ```text
//! S_j = ∇Z(n, m)                                 if n = |m| or n < 3
//! S_j = ∇Z(n, m) − sqrt((n+1)/(n−1)) · ∇Z(n−2, m) otherwise
//! ```

use crate::basis::radial::{radial_coefficients, radial_with_derivative};
use crate::basis::{
    check_order, index_to_order, normalization, order_to_index, BasisSet, RadialPowers,
};
use crate::error::{Result, ZernikeError};
use crate::point::{norm_sqr, Gradient, PolarPoint};

/// ∇Z_n^m at every point. Requires n ≥ 1.
///
/// Points outside the pupil give a zero vector. At the pupil centre the
/// limit r → 0 is taken, which is nonzero only for |m| = 1.
pub fn gradient(n: i32, m: i32, points: &[PolarPoint]) -> Result<Vec<Gradient>> {
    gradient_with_norm(n, m, points).map(|(values, _)| values)
}

/// ∇Z_n^m at every point together with Σ|∇Z|².
pub fn gradient_with_norm(n: i32, m: i32, points: &[PolarPoint]) -> Result<(Vec<Gradient>, f64)> {
    check_order(n, m, 1)?;
    let nu = n as usize;
    let m_abs = m.unsigned_abs() as usize;
    let coeffs = radial_coefficients(nu, m_abs);
    let powers = RadialPowers::new(nu, points)?;
    let scale = normalization(n, m);
    let mf = m_abs as f64;

    let mut values = vec![Gradient::default(); points.len()];
    let mut norm = 0.0;
    for (idx, (g, p)) in values.iter_mut().zip(points).enumerate() {
        if p.r > 1.0 {
            continue;
        }
        let at_centre = p.r.abs() < f64::EPSILON;
        // Only |m| = 1 terms have a nonzero slope at the centre
        if at_centre && m_abs != 1 {
            continue;
        }
        let (t, dt) = match m {
            0 => (1.0, 0.0),
            m if m > 0 => {
                let (s, c) = (mf * p.theta).sin_cos();
                (c, -mf * s)
            }
            _ => {
                let (s, c) = (mf * p.theta).sin_cos();
                (s, mf * c)
            }
        };
        let (rj, drj) = radial_with_derivative(&coeffs, nu, &powers, idx);
        let (rj, drj) = (rj * scale, drj * scale);
        // R/r tends to the coefficient of r¹ as r → 0
        let r_over = if at_centre {
            coeffs[coeffs.len() - 1] * scale
        } else {
            rj / p.r
        };
        let (sin_t, cos_t) = p.theta.sin_cos();

        let t_dr = t * drj;
        let r_dt = r_over * dt;
        g.x = t_dr * cos_t - r_dt * sin_t;
        g.y = t_dr * sin_t + r_dt * cos_t;
        norm += g.x * g.x + g.y * g.y;
    }
    Ok((values, norm))
}

/// Zhao–Burge vector polynomial S_p at every point. Requires p ≥ 1.
pub fn vector_polynomial(p: usize, points: &[PolarPoint]) -> Result<Vec<Gradient>> {
    let (n, m) = index_to_order(p);
    if n < 1 {
        return Err(ZernikeError::InvalidPolynomialOrder { n, m });
    }
    // The normalization of the n = |m| / n < 3 branch is left at 1.
    let mut s = gradient(n, m, points)?;
    if n != m.abs() && n > 2 {
        let k = ((n as f64 + 1.0) / (n as f64 - 1.0)).sqrt();
        let lower = gradient(n - 2, m, points)?;
        for (sj, zj) in s.iter_mut().zip(&lower) {
            sj.x -= k * zj.x;
            sj.y -= k * zj.y;
        }
    }
    Ok(s)
}

/// Like [`vector_polynomial`], also returning Σ|S_p|².
pub fn vector_polynomial_with_norm(p: usize, points: &[PolarPoint]) -> Result<(Vec<Gradient>, f64)> {
    let s = vector_polynomial(p, points)?;
    let norm = norm_sqr(&s);
    Ok((s, norm))
}

/// Convert coefficients of the Zhao–Burge basis into wavefront Zernike
/// coefficients.
///
/// Since S_(n,m) = ∇Z(n,m) − k_n ∇Z(n−2,m), the coefficient of ∇Z(n,m) in
/// Σ s_j S_j is s_(n,m) − sqrt((n+3)/(n+1))·s_(n+2,m). The piston term is
/// not observable from slopes and stays 0.
pub fn vector_to_zernike(vector_coeffs: &[f64]) -> Vec<f64> {
    let len = vector_coeffs.len();
    let mut out = vec![0.0; len];
    for (i, z) in out.iter_mut().enumerate().skip(1) {
        let (n, m) = index_to_order(i);
        let upper = order_to_index(n + 2, m);
        let s_upper = if upper < len { vector_coeffs[upper] } else { 0.0 };
        let k = ((n as f64 + 3.0) / (n as f64 + 1.0)).sqrt();
        *z = vector_coeffs[i] - k * s_upper;
    }
    out
}

/// Gradients of the standard Zernike polynomials (∇Z_p) on scattered points.
#[derive(Debug, Clone, Copy)]
pub struct GradientBasis<'a> {
    points: &'a [PolarPoint],
}

impl<'a> GradientBasis<'a> {
    pub fn new(points: &'a [PolarPoint]) -> Self {
        Self { points }
    }
}

impl BasisSet for GradientBasis<'_> {
    type Sample = Gradient;

    fn point_count(&self) -> usize {
        self.points.len()
    }

    fn first_index(&self) -> usize {
        1
    }

    fn evaluate(&self, p: usize) -> Result<Vec<Gradient>> {
        let (n, m) = index_to_order(p);
        gradient(n, m, self.points)
    }
}

/// Zhao–Burge vector polynomials (S_p) on scattered points.
#[derive(Debug, Clone, Copy)]
pub struct VectorBasis<'a> {
    points: &'a [PolarPoint],
}

impl<'a> VectorBasis<'a> {
    pub fn new(points: &'a [PolarPoint]) -> Self {
        Self { points }
    }
}

impl BasisSet for VectorBasis<'_> {
    type Sample = Gradient;

    fn point_count(&self) -> usize {
        self.points.len()
    }

    fn first_index(&self) -> usize {
        1
    }

    fn evaluate(&self, p: usize) -> Result<Vec<Gradient>> {
        vector_polynomial(p, self.points)
    }
}
