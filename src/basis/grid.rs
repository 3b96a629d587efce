//! Dense rectangular sampling of the pupil.
//!
//! A `width × height` pixel matrix is mapped onto the unit disk with its
//! centre at ((W−1)/2, (H−1)/2) and the radius normalized by
//! max((W−1)/2, (H−1)/2). Pixels are stored row-major (index `j·W + i`),
//! with +Y pointing down the rows.

use crate::error::{Result, ZernikeError};
use crate::point::PolarPoint;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelGrid {
    width: usize,
    height: usize,
}

impl PixelGrid {
    /// Both dimensions must be at least 2.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        if width < 2 || height < 2 {
            return Err(ZernikeError::InsufficientPoints {
                required: 2,
                available: width.min(height),
            });
        }
        Ok(Self { width, height })
    }

    /// Polar coordinates of every pixel, row-major.
    ///
    /// Corner pixels fall outside the unit disk (r > 1) and are masked by
    /// every evaluator.
    pub fn polar_points(&self) -> Vec<PolarPoint> {
        let xc = (self.width as f64 - 1.0) / 2.0;
        let yc = (self.height as f64 - 1.0) / 2.0;
        let rnorm = xc.max(yc);
        let mut points = Vec::with_capacity(self.width * self.height);
        for j in 0..self.height {
            let y = (j as f64 - yc) / rnorm;
            for i in 0..self.width {
                let x = (i as f64 - xc) / rnorm;
                points.push(PolarPoint::from_cartesian(x, y));
            }
        }
        points
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reject_small_grid() {
        assert!(PixelGrid::new(1, 5).is_err());
        assert!(PixelGrid::new(5, 0).is_err());
        assert!(PixelGrid::new(2, 2).is_ok());
    }

    #[test]
    fn test_grid_geometry() {
        let grid = PixelGrid::new(5, 3).unwrap();
        let points = grid.polar_points();
        assert_eq!(points.len(), 15);
        // Centre pixel (2, 1)
        assert!(points[1 * 5 + 2].r.abs() < 1e-15);
        // Rightmost pixel on the centre row is on the edge
        let edge = points[1 * 5 + 4];
        assert!((edge.r - 1.0).abs() < 1e-15);
        assert!(edge.theta.abs() < 1e-15);
        // Corner lies outside the disk
        assert!(points[0].r > 1.0);
    }

    #[test]
    fn test_even_grid_is_symmetric() {
        let grid = PixelGrid::new(4, 4).unwrap();
        let points = grid.polar_points();
        let r0 = points[5].r;
        for idx in [5, 6, 9, 10] {
            assert!((points[idx].r - r0).abs() < 1e-15);
        }
    }
}
