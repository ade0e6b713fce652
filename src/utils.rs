//! Assorted utilities and helpers.

/// Stack bound used by [`crate::engine::SearchEngine::new`] for a chain of
/// `n` factors: `2n - 1`, never below 1.
///
/// The frontier never holds more than `n` fragments, so the bound only trips
/// on a broken undo discipline.
#[inline]
pub fn default_stack_limit(n: usize) -> usize {
    if n <= 1 {
        1
    } else {
        2 * n - 1
    }
}

/// Catalan number `C(k)`, the count of full binary trees with `k + 1` leaves.
///
/// Returns `None` once the value no longer fits in a `u64` (k > 36).
pub fn catalan(k: u32) -> Option<u64> {
    // C(i+1) = C(i) * 2(2i+1) / (i+2); the product stays exact in u128.
    let mut c: u128 = 1;
    for i in 0..u128::from(k) {
        c = c * 2 * (2 * i + 1) / (i + 2);
        if c > u128::from(u64::MAX) {
            return None;
        }
    }
    u64::try_from(c).ok()
}
