//! Sample locations and gradient samples.
//!
//! Points are polar coordinates on the unit pupil: `r` is normalized so the
//! aperture edge sits at 1, `theta` is measured counter-clockwise from +X.

/// A sample location in normalized polar coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PolarPoint {
    /// Normalized radius. Points with r > 1 lie outside the pupil.
    pub r: f64,
    /// Polar angle in radians.
    pub theta: f64,
}

impl PolarPoint {
    pub fn new(r: f64, theta: f64) -> Self {
        Self { r, theta }
    }

    /// Build a point from Cartesian coordinates already normalized to the pupil radius.
    pub fn from_cartesian(x: f64, y: f64) -> Self {
        Self {
            r: x.hypot(y),
            theta: y.atan2(x),
        }
    }

    /// Cartesian (x, y) coordinates of this point.
    pub fn to_cartesian(&self) -> (f64, f64) {
        let (s, c) = self.theta.sin_cos();
        (self.r * c, self.r * s)
    }
}

/// A 2-D gradient (wavefront slope) sample.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Gradient {
    /// ∂W/∂x
    pub x: f64,
    /// ∂W/∂y
    pub y: f64,
}

impl Gradient {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Arithmetic needed to project, deflate and accumulate samples.
///
/// Implemented for scalar heights (`f64`) and gradient vectors, so the
/// greedy and composition loops are written once for every basis.
pub trait Sample: Copy + Default {
    /// Inner product of two samples.
    fn dot(&self, other: &Self) -> f64;
    /// `self += k * other`
    fn add_scaled(&mut self, k: f64, other: &Self);

    fn norm_sqr(&self) -> f64 {
        self.dot(self)
    }
}

impl Sample for f64 {
    fn dot(&self, other: &Self) -> f64 {
        self * other
    }

    fn add_scaled(&mut self, k: f64, other: &Self) {
        *self += k * other;
    }
}

impl Sample for Gradient {
    fn dot(&self, other: &Self) -> f64 {
        self.x * other.x + self.y * other.y
    }

    fn add_scaled(&mut self, k: f64, other: &Self) {
        self.x += k * other.x;
        self.y += k * other.y;
    }
}

/// Σ|v|² over a set of samples.
pub fn norm_sqr<S: Sample>(values: &[S]) -> f64 {
    values.iter().map(Sample::norm_sqr).sum()
}
