//! Process-wide precision threshold and per-call decomposition settings.
//!
//! The precision threshold decides when a computed coefficient is treated
//! as exactly zero. It is read by every decomposition and composition call,
//! so it is normally set once at startup.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::decompose::Strategy;
use crate::error::{Result, ZernikeError};

/// Default precision threshold for Zernike coefficients.
pub const DEFAULT_PRECISION: f64 = 1e-6;

// Bit pattern of DEFAULT_PRECISION.
static PRECISION_BITS: AtomicU64 = AtomicU64::new(0x3EB0_C6F7_A0B5_ED8D);

/// Current precision threshold.
pub fn precision() -> f64 {
    f64::from_bits(PRECISION_BITS.load(Ordering::Relaxed))
}

/// Set the precision threshold used by all subsequent calls.
///
/// The value must be finite and non-negative.
pub fn set_precision(value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(ZernikeError::InvalidPrecision(value));
    }
    PRECISION_BITS.store(value.to_bits(), Ordering::Relaxed);
    Ok(())
}

/// Configuration for [`decompose`](crate::decompose::decompose) and
/// [`decompose_gradient`](crate::decompose::decompose_gradient).
#[derive(Debug, Clone)]
pub struct DecomposeConfig {
    /// Maximum radial order Nmax. The coefficient vector has
    /// (Nmax+1)(Nmax+2)/2 entries. Default 8.
    pub max_order: usize,
    /// Decomposition algorithm. Default [`Strategy::Greedy`].
    pub strategy: Strategy,
}

impl Default for DecomposeConfig {
    fn default() -> Self {
        Self {
            max_order: 8,
            strategy: Strategy::Greedy,
        }
    }
}
