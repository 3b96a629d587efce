//! Single-index ⇄ (n, m) conversion.
//!
//! Terms are enumerated by increasing radial order n, then by increasing
//! angular frequency m = −n, −n+2, …, n:
//!
//! ```text
//! p:  0      1       2      3       4      5      6       7    ...
//!    (0,0) (1,-1)  (1,1)  (2,-2)  (2,0)  (2,2)  (3,-3)  (3,-1) ...
//! ```

/// Number of terms with radial order up to and including `max_order`.
pub fn term_count(max_order: usize) -> usize {
    (max_order + 1) * (max_order + 2) / 2
}

/// Convert a single index `p` into (n, m).
pub fn index_to_order(p: usize) -> (i32, i32) {
    let mut n = ((-1.0 + (1.0 + 8.0 * p as f64).sqrt()) / 2.0).floor() as usize;
    // Guard against rounding in the square root for large p.
    while n * (n + 1) / 2 > p {
        n -= 1;
    }
    while (n + 1) * (n + 2) / 2 <= p {
        n += 1;
    }
    let m = 2 * p as i64 - (n * (n + 2)) as i64;
    (n as i32, m as i32)
}

/// Convert (n, m) into the single index. The pair must be a valid order
/// (see [`check_order`](super::check_order)).
pub fn order_to_index(n: i32, m: i32) -> usize {
    ((n * (n + 2) + m) / 2) as usize
}
