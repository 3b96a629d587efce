//! Precision threshold behaviour. Kept in its own test binary because the
//! threshold is process-wide.

use std::f64::consts::TAU;
use zernike::{
    compose, decompose, order_to_index, precision, set_precision, zernike, DecomposeConfig,
    PolarPoint, Strategy, DEFAULT_PRECISION,
};

fn dense_grid(rings: usize, spokes: usize) -> Vec<PolarPoint> {
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
fn test_raised_precision_threshold() {
    let _ = tracing_subscriber::fmt().with_env_filter("info").try_init();

    // ── Step 1: Heights with one small term, built without any threshold ──
    let points = dense_grid(96, 32);
    let piston = zernike(0, 0, &points).unwrap();
    let tilt = zernike(1, 1, &points).unwrap();
    let defocus = zernike(2, 0, &points).unwrap();
    let heights: Vec<f64> = piston
        .iter()
        .zip(&tilt)
        .zip(&defocus)
        .map(|((a, b), c)| a + 0.5 * b + 5e-3 * c)
        .collect();

    // The default threshold keeps the small term
    assert_eq!(precision(), DEFAULT_PRECISION);
    let config = DecomposeConfig {
        max_order: 4,
        strategy: Strategy::LeastSquares,
    };
    let result = decompose(&config, &points, &heights).unwrap();
    assert!((result.coefficients[order_to_index(2, 0)] - 5e-3).abs() < 1e-9);

    // ── Step 2: Raise the threshold ──
    set_precision(1e-2).unwrap();
    assert_eq!(precision(), 1e-2);

    // ── Step 3: Decomposition zeroes the small term ──
    for strategy in [Strategy::Greedy, Strategy::LeastSquares, Strategy::Orthonormal] {
        let config = DecomposeConfig {
            max_order: 4,
            strategy,
        };
        let result = decompose(&config, &points, &heights).unwrap();
        assert_eq!(result.coefficients[order_to_index(2, 0)], 0.0, "{:?}", strategy);
        assert!((result.coefficients[0] - 1.0).abs() < 1e-3, "{:?}", strategy);
        assert!(
            (result.coefficients[order_to_index(1, 1)] - 0.5).abs() < 1e-3,
            "{:?}",
            strategy
        );
        assert_eq!(result.last_nonzero, order_to_index(1, 1), "{:?}", strategy);
    }

    // ── Step 4: Composition skips the small term ──
    let mut coefficients = vec![0.0; 6];
    coefficients[0] = 1.0;
    coefficients[order_to_index(2, 0)] = 5e-3;
    let composed = compose(&coefficients, &points).unwrap();
    assert_eq!(composed, piston);

    coefficients[order_to_index(2, 0)] = 2e-2;
    let composed = compose(&coefficients, &points).unwrap();
    for ((c, p), d) in composed.iter().zip(&piston).zip(&defocus) {
        assert!((c - (p + 2e-2 * d)).abs() < 1e-12);
    }

    set_precision(DEFAULT_PRECISION).unwrap();
}
