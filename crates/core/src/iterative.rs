//! Linear-time Fibonacci with the same contract as the recursive version
//!
//! Used as a test oracle and as the fast comparison in benchmarks. It is
//! never exported as the extension's behavior.

/// Compute the n-th Fibonacci number in O(n) time
///
/// Returns `n` for every `n <= 1` and wraps on overflow, so it agrees with
/// [`crate::nth_fibonacci`] for every input.
pub fn nth_fibonacci_iterative(n: i32) -> i32 {
    if n <= 1 {
        return n;
    }
    let mut a: i32 = 0;
    let mut b: i32 = 1;
    for _ in 1..n {
        let tmp = a.wrapping_add(b);
        a = b;
        b = tmp;
    }
    b
}
