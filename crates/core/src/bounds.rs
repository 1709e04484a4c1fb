//! Overflow boundary for `i32` Fibonacci values

use crate::iterative::nth_fibonacci_iterative;

/// Largest index whose Fibonacci value fits in an `i32`
///
/// fib(46) = 1_836_311_903; fib(47) = 2_971_215_073 > i32::MAX.
pub const MAX_EXACT_INDEX: i32 = 46;

/// Whether `nth_fibonacci(n)` is the exact Fibonacci value
///
/// Negative indices count as fitting: they return themselves.
pub fn fits_exactly(n: i32) -> bool {
    n <= MAX_EXACT_INDEX
}

/// The exact n-th Fibonacci value, or `None` if it would wrap
pub fn checked_nth_fibonacci(n: i32) -> Option<i32> {
    if fits_exactly(n) {
        Some(nth_fibonacci_iterative(n))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundary_value_is_exact() {
        let exact: i64 = 1_836_311_903;
        assert_eq!(nth_fibonacci_iterative(MAX_EXACT_INDEX) as i64, exact);
        assert_eq!(checked_nth_fibonacci(MAX_EXACT_INDEX), Some(1_836_311_903));
    }

    #[test]
    fn test_one_past_boundary_wraps() {
        // True value 2_971_215_073 does not fit; two's complement gives
        // 2_971_215_073 - 2^32.
        let wrapped = (2_971_215_073_i64 - (1_i64 << 32)) as i32;
        assert_eq!(wrapped, -1_323_752_223);
        assert_eq!(nth_fibonacci_iterative(MAX_EXACT_INDEX + 1), wrapped);
        assert_eq!(checked_nth_fibonacci(MAX_EXACT_INDEX + 1), None);
    }

    #[test]
    fn test_fits_exactly() {
        assert!(fits_exactly(-10));
        assert!(fits_exactly(0));
        assert!(fits_exactly(46));
        assert!(!fits_exactly(47));
        assert!(!fits_exactly(i32::MAX));
    }

    #[test]
    fn test_checked_negative_index() {
        assert_eq!(checked_nth_fibonacci(-7), Some(-7));
    }
}
