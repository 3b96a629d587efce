//! Per-call annulus geometry.
//!
//! The inner radius ε and outer radius ρ_max are taken from the sample
//! radii themselves. Every annular evaluation receives the context
//! explicitly, so independent calls never share annulus parameters.

use crate::error::{Result, ZernikeError};
use crate::point::PolarPoint;

/// Inner and outer radius of the sampled annulus.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnnularContext {
    /// Smallest sample radius, 0 < ε < ρ_max.
    pub epsilon: f64,
    /// Largest sample radius, ρ_max ≤ 1.
    pub rho_max: f64,
}

impl AnnularContext {
    /// Validate 0 < ε < 1, ρ_max ≤ 1 and ε < ρ_max.
    pub fn new(epsilon: f64, rho_max: f64) -> Result<Self> {
        // Written as negated comparisons so NaN is rejected too.
        if !(epsilon > 0.0 && epsilon < 1.0) || !(rho_max <= 1.0) || !(epsilon < rho_max) {
            return Err(ZernikeError::CoordinateOutOfRange { epsilon, rho_max });
        }
        Ok(Self { epsilon, rho_max })
    }

    /// Context spanning the smallest and largest radius in `points`.
    pub fn from_points(points: &[PolarPoint]) -> Result<Self> {
        if points.is_empty() {
            return Err(ZernikeError::InsufficientPoints {
                required: 1,
                available: 0,
            });
        }
        let (epsilon, rho_max) = points
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
                (lo.min(p.r), hi.max(p.r))
            });
        Self::new(epsilon, rho_max)
    }

    /// Inner-to-outer radius ratio ε/ρ_max of the annulus.
    pub fn obscuration(&self) -> f64 {
        self.epsilon / self.rho_max
    }

    /// Map a radius in [ε, ρ_max] onto [0, 1]:
    /// r' = sqrt((r² − ε²)/(ρ_max² − ε²)).
    ///
    /// ε maps to exactly 0 and ρ_max to exactly 1.
    pub fn remap(&self, r: f64) -> f64 {
        self.remap_sqr(r).sqrt()
    }

    /// Squared remapped radius r'², the variable the annular radial
    /// polynomials are built in.
    pub(crate) fn remap_sqr(&self, r: f64) -> f64 {
        let e2 = self.epsilon * self.epsilon;
        (r * r - e2) / (self.rho_max * self.rho_max - e2)
    }

    /// Remap every point, keeping θ.
    pub fn remap_points(&self, points: &[PolarPoint]) -> Vec<PolarPoint> {
        points
            .iter()
            .map(|p| PolarPoint::new(self.remap(p.r), p.theta))
            .collect()
    }
}
