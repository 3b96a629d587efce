//! Radial part of the Zernike polynomials.
//!
//! ```text
//!              (n-|m|)/2        (-1)^k (n-k)!
//! R_n^|m|(r) =    Σ      ------------------------------- r^(n-2k)
//!                k=0     k! ((n+|m|)/2-k)! ((n-|m|)/2-k)!
//! ```

use std::sync::OnceLock;

use crate::error::{zeroed, Result};
use crate::point::PolarPoint;

/// Highest factorial kept in the table (n ≤ 100 needs at most 99!).
const FACTORIAL_LEN: usize = 100;

static FACTORIALS: OnceLock<[f64; FACTORIAL_LEN]> = OnceLock::new();

/// Factorials 0!..99!, built once on first use.
pub(crate) fn factorials() -> &'static [f64; FACTORIAL_LEN] {
    FACTORIALS.get_or_init(|| {
        let mut table = [1.0; FACTORIAL_LEN];
        for i in 1..FACTORIAL_LEN {
            table[i] = table[i - 1] * i as f64;
        }
        table
    })
}

/// Coefficients c_k of r^(n-2k) in R_n^|m|, k = 0..=(n-|m|)/2.
pub(crate) fn radial_coefficients(n: usize, m_abs: usize) -> Vec<f64> {
    let fk = factorials();
    let iup = (n - m_abs) / 2;
    let isum = (n + m_abs) / 2;
    (0..=iup)
        .map(|k| {
            let sign = if k % 2 == 0 { 1.0 } else { -1.0 };
            // (n-k)! with n = 100, k = 0 lies beyond the table; the ratio
            // (n-k)!/((n+|m|)/2-k)! is formed stepwise instead.
            let mut num = sign;
            for f in (isum - k + 1)..=(n - k) {
                num *= f as f64;
            }
            num / (fk[k] * fk[iup - k])
        })
        .collect()
}

/// Table of r^0 ..= r^n for every point.
///
/// Built for one evaluation call and dropped with it.
pub struct RadialPowers {
    powers: Vec<Vec<f64>>,
}

impl RadialPowers {
    pub fn new(max_power: usize, points: &[PolarPoint]) -> Result<Self> {
        let mut powers = Vec::with_capacity(max_power + 1);
        let mut current = zeroed(points.len())?;
        current.iter_mut().for_each(|v| *v = 1.0);
        powers.push(current);
        for k in 1..=max_power {
            let mut next = zeroed(points.len())?;
            for ((v, prev), p) in next.iter_mut().zip(&powers[k - 1]).zip(points) {
                *v = prev * p.r;
            }
            powers.push(next);
        }
        Ok(Self { powers })
    }

    /// r^k at every point.
    pub fn pow(&self, k: usize) -> &[f64] {
        &self.powers[k]
    }
}

/// R_n^|m| and its derivative dR/dr at point `idx`.
pub(crate) fn radial_with_derivative(
    coeffs: &[f64],
    n: usize,
    powers: &RadialPowers,
    idx: usize,
) -> (f64, f64) {
    let mut value = 0.0;
    let mut deriv = 0.0;
    for (k, c) in coeffs.iter().enumerate() {
        let power = n - 2 * k;
        value += c * powers.pow(power)[idx];
        if power > 0 {
            deriv += c * power as f64 * powers.pow(power - 1)[idx];
        }
    }
    (value, deriv)
}

/// R_n^|m| at point `idx`.
pub(crate) fn radial(coeffs: &[f64], n: usize, powers: &RadialPowers, idx: usize) -> f64 {
    coeffs
        .iter()
        .enumerate()
        .map(|(k, c)| c * powers.pow(n - 2 * k)[idx])
        .sum()
}
