//! Mahajan's recursion for the annular radial polynomials.
//!
//! Mahajan (JOSA 71, 75, 1981) writes the annular radial functions through
//! polynomials Q_j^m(x), x = ρ², orthogonal over [ε², 1] with weight x^m.
//! Layer m = 0 is the ordinary even radial polynomial in the remapped
//! radius, and each layer m is derived from layer m−1 alone:
//!
//! ```text
//! h_j^0 = (1−ε²) / (2(2j+1))
//! Q_j^0(x) = R_2j^0(r'),  r'² = (x − ε²)/(1 − ε²)
//!
//! H_j^m = 2(2j+2m−1) / ((j+m)(1−ε²)) · h_j^(m−1) / Q_j^(m−1)(0)
//! h_j^m = −H_j^m · Q_(j+1)^(m−1)(0)
//! Q_j^m(x) = H_j^m · Σ_(i=0..j) Q_i^(m−1)(0) · Q_i^(m−1)(x) / h_i^(m−1)
//! ```
//!
//! Q_j^m(0) is the value at the pupil centre x = 0, which lies outside the
//! annulus (r'² = −ε²/(1−ε²) there). Building layer m needs one more j of
//! layer m−1, so layer m holds j = 0..(jmax + mmax − m).
//!
//! The radial functions follow as
//!
//! ```text
//! R_2j^0      = Q_j^0
//! R_n^n       = ρ^n / sqrt(Σ_(i=0..n) ε^2i)
//! R_2j+m^m    = sqrt((1−ε²) / (2(2j+m+1) h_j^m)) · ρ^m · Q_j^m
//! ```
//!
//! normalized so that ∫_ε^1 R² ρ dρ = (1−ε²)/(2(n+1)). Radii and ε are
//! scaled by ρ_max, so the sampled annulus is always [ε/ρ_max, 1].

use crate::basis::radial::radial_coefficients;
use crate::error::{zeroed, Result};
use crate::point::PolarPoint;

use super::AnnularContext;

/// Evaluate R_2j^0 from its coefficients as a polynomial in t = r².
fn even_radial(coeffs: &[f64], t: f64) -> f64 {
    coeffs.iter().fold(0.0, |acc, c| acc * t + c)
}

/// h_j^m and Q_j^m at every point, for every layer m.
pub(crate) struct RecursionTable {
    epsilon: f64,
    rho_max: f64,
    /// h_j^m, indexed `[m][j]`.
    h: Vec<Vec<f64>>,
    /// Q_j^m at every point for j ≤ jmax, indexed `[m][j][point]`.
    q: Vec<Vec<Vec<f64>>>,
}

impl RecursionTable {
    pub(crate) fn new(max_order: usize, ctx: &AnnularContext, points: &[PolarPoint]) -> Result<Self> {
        let eps = ctx.obscuration();
        let e2 = eps * eps;
        let one_e2 = 1.0 - e2;
        let mmax = max_order;
        let jmax = max_order / 2;
        let jm = jmax + mmax + 1;

        let t: Vec<f64> = points.iter().map(|p| ctx.remap_sqr(p.r)).collect();
        let t0 = -e2 / one_e2;

        let mut h = Vec::with_capacity(mmax + 1);
        let mut q0 = Vec::with_capacity(mmax + 1);
        let mut q = Vec::with_capacity(mmax + 1);

        let mut h_layer = Vec::with_capacity(jm);
        let mut q0_layer = Vec::with_capacity(jm);
        let mut q_layer = Vec::with_capacity(jmax + 1);
        for j in 0..jm {
            let coeffs = radial_coefficients(2 * j, 0);
            h_layer.push(one_e2 / (2.0 * (2 * j + 1) as f64));
            q0_layer.push(even_radial(&coeffs, t0));
            if j <= jmax {
                let mut values = zeroed(points.len())?;
                for (v, &x) in values.iter_mut().zip(&t) {
                    *v = even_radial(&coeffs, x);
                }
                q_layer.push(values);
            }
        }
        h.push(h_layer);
        q0.push(q0_layer);
        q.push(q_layer);

        for m in 1..=mmax {
            let (hp, q0p, qp) = (&h[m - 1], &q0[m - 1], &q[m - 1]);
            let len = jm - m;
            let mut h_layer = Vec::with_capacity(len);
            let mut q0_layer = Vec::with_capacity(len);
            let mut q_layer = Vec::with_capacity(jmax + 1);
            for j in 0..len {
                let jm_sum = (j + m) as f64;
                let big_h = 2.0 * (2.0 * jm_sum - 1.0) / (jm_sum * one_e2) * hp[j] / q0p[j];
                h_layer.push(-big_h * q0p[j + 1]);
                let centre: f64 = (0..=j).map(|i| q0p[i] * q0p[i] / hp[i]).sum();
                q0_layer.push(big_h * centre);
                if j <= jmax {
                    let mut values = zeroed(points.len())?;
                    for i in 0..=j {
                        let w = big_h * q0p[i] / hp[i];
                        for (v, qi) in values.iter_mut().zip(&qp[i]) {
                            *v += w * qi;
                        }
                    }
                    q_layer.push(values);
                }
            }
            h.push(h_layer);
            q0.push(q0_layer);
            q.push(q_layer);
        }

        Ok(Self {
            epsilon: eps,
            rho_max: ctx.rho_max,
            h,
            q,
        })
    }

    /// Annular radial function R_n^|m| at every point. Requires n − |m|
    /// even and n no larger than the table's order.
    pub(crate) fn radial(&self, n: usize, m_abs: usize, points: &[PolarPoint]) -> Result<Vec<f64>> {
        let j = (n - m_abs) / 2;
        let mut values = zeroed(points.len())?;
        if m_abs == 0 {
            values.copy_from_slice(&self.q[0][j]);
            return Ok(values);
        }
        let e2 = self.epsilon * self.epsilon;
        let scale = if n == m_abs {
            let eps_sum: f64 = (0..=n).map(|i| e2.powi(i as i32)).sum();
            1.0 / eps_sum.sqrt()
        } else {
            ((1.0 - e2) / (2.0 * (n + 1) as f64 * self.h[m_abs][j])).sqrt()
        };
        for (idx, (v, p)) in values.iter_mut().zip(points).enumerate() {
            let rho_m = (p.r / self.rho_max).powi(m_abs as i32);
            *v = if n == m_abs {
                scale * rho_m
            } else {
                scale * rho_m * self.q[m_abs][j][idx]
            };
        }
        Ok(values)
    }
}
