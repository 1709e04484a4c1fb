//! Naive recursive Fibonacci
//!
//! # Overflow Behavior
//!
//! Addition uses **wrapping semantics**, matching what a C `int` does on
//! every platform we target:
//! - fib(46) = 1_836_311_903 is the last exact value
//! - fib(47) wraps to -1_323_752_223
//!
//! Wrapping addition is associative modulo 2^32, so the wrapped result is the
//! same no matter how deep in the recursion the overflow happens.

/// Compute the n-th Fibonacci number by double recursion
///
/// fib(0) = 0, fib(1) = 1, fib(k) = fib(k-1) + fib(k-2).
///
/// Every `n <= 1` is returned as-is, so negative indices come back
/// unchanged (`nth_fibonacci(-3) == -3`). No memoization: runtime is
/// O(φⁿ) and stack depth is O(n).
pub fn nth_fibonacci(n: i32) -> i32 {
    if n <= 1 {
        return n;
    }
    nth_fibonacci(n - 1).wrapping_add(nth_fibonacci(n - 2))
}
