//! Argument marshaling between a host runtime and the native `int`
//!
//! Conversion follows the rules of Ruby's `NUM2INT`:
//! - Integers must fit in `i32`, otherwise `RangeError`
//! - Floats are truncated toward zero, then range-checked the same way
//! - NaN, infinities, and floats outside the host's long range are rejected
//! - Anything else is a `TypeError`
//!
//! The core never fails; every error a caller can see comes from here.

use std::fmt;

/// A numeric argument as a host runtime hands it to the binding
#[derive(Debug, Clone, PartialEq)]
pub enum HostValue {
    /// Host integer, at most the width of a C `long`
    Integer(i64),
    Float(f64),
    Nil,
    /// Any other object, carried by its class name (e.g. "String")
    Other(String),
}

/// Why a host value could not become a native `int`
#[derive(Debug, Clone, PartialEq)]
pub enum ConversionError {
    /// Integer outside the `i32` range
    OutOfRange { value: i64 },
    /// Float that is NaN, infinite, or outside the `i64` range
    FloatOutOfRange { value: f64 },
    /// Value with no implicit integer conversion
    TypeMismatch { from: String },
}

impl HostValue {
    /// `true`/`false` carried by their literal names, as Ruby reports them
    pub fn boolean(value: bool) -> Self {
        HostValue::Other(value.to_string())
    }
}

impl ConversionError {
    /// Name of the exception class a Ruby host raises for this error
    pub fn exception_class(&self) -> &'static str {
        match self {
            ConversionError::OutOfRange { .. } | ConversionError::FloatOutOfRange { .. } => {
                "RangeError"
            }
            ConversionError::TypeMismatch { .. } => "TypeError",
        }
    }
}

impl fmt::Display for ConversionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConversionError::OutOfRange { value } if *value > 0 => {
                write!(f, "integer {} too big to convert to 'int'", value)
            }
            ConversionError::OutOfRange { value } => {
                write!(f, "integer {} too small to convert to 'int'", value)
            }
            ConversionError::FloatOutOfRange { value } => {
                write!(f, "float {} out of range of integer", float_repr(*value))
            }
            ConversionError::TypeMismatch { from } if from == "nil" => {
                write!(f, "no implicit conversion from nil to integer")
            }
            ConversionError::TypeMismatch { from } => {
                write!(f, "no implicit conversion of {} into Integer", from)
            }
        }
    }
}

impl std::error::Error for ConversionError {}

/// Spell a float the way Ruby's range errors do (C `%.10g`)
fn float_repr(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Inf" } else { "-Inf" }.to_string();
    }
    format_g10(value)
}

const G_PRECISION: i32 = 10;

/// `%.10g`: 10 significant digits, trailing zeros dropped, exponent form
/// when the exponent is below -4 or at least the precision
fn format_g10(value: f64) -> String {
    if value == 0.0 {
        return if value.is_sign_negative() { "-0" } else { "0" }.to_string();
    }
    // Round to the final digit count first; rounding can bump the exponent
    let sci = format!("{:.*e}", (G_PRECISION - 1) as usize, value);
    let (mantissa, exp) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let exp: i32 = exp.parse().unwrap_or(0);

    if exp < -4 || exp >= G_PRECISION {
        let sign = if exp < 0 { '-' } else { '+' };
        format!(
            "{}e{}{:02}",
            strip_fraction_zeros(mantissa),
            sign,
            exp.unsigned_abs()
        )
    } else {
        let decimals = (G_PRECISION - 1 - exp) as usize;
        strip_fraction_zeros(&format!("{:.*}", decimals, value)).to_string()
    }
}

fn strip_fraction_zeros(digits: &str) -> &str {
    if digits.contains('.') {
        digits.trim_end_matches('0').trim_end_matches('.')
    } else {
        digits
    }
}

/// Convert a host value to a native `int`
pub fn int_from_host(value: &HostValue) -> Result<i32, ConversionError> {
    match value {
        HostValue::Integer(v) => {
            i32::try_from(*v).map_err(|_| ConversionError::OutOfRange { value: *v })
        }
        HostValue::Float(f) => {
            // i64::MAX as f64 rounds up to 2^63, hence the strict upper bound
            if !f.is_finite() || *f < i64::MIN as f64 || *f >= i64::MAX as f64 {
                return Err(ConversionError::FloatOutOfRange { value: *f });
            }
            let truncated = f.trunc() as i64;
            i32::try_from(truncated).map_err(|_| ConversionError::OutOfRange { value: truncated })
        }
        HostValue::Nil => Err(ConversionError::TypeMismatch {
            from: "nil".to_string(),
        }),
        HostValue::Other(class) => Err(ConversionError::TypeMismatch {
            from: class.clone(),
        }),
    }
}

/// Convert a native `int` result back to a host value
pub fn int_to_host(value: i32) -> HostValue {
    HostValue::Integer(i64::from(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_in_range() {
        assert_eq!(int_from_host(&HostValue::Integer(44)), Ok(44));
        assert_eq!(int_from_host(&HostValue::Integer(-3)), Ok(-3));
        assert_eq!(
            int_from_host(&HostValue::Integer(i32::MAX as i64)),
            Ok(i32::MAX)
        );
        assert_eq!(
            int_from_host(&HostValue::Integer(i32::MIN as i64)),
            Ok(i32::MIN)
        );
    }

    #[test]
    fn test_integer_too_big() {
        let err = int_from_host(&HostValue::Integer(i32::MAX as i64 + 1)).unwrap_err();
        assert_eq!(err.exception_class(), "RangeError");
        assert_eq!(
            err.to_string(),
            "integer 2147483648 too big to convert to 'int'"
        );
    }

    #[test]
    fn test_integer_too_small() {
        let err = int_from_host(&HostValue::Integer(i32::MIN as i64 - 1)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "integer -2147483649 too small to convert to 'int'"
        );
    }

    #[test]
    fn test_float_truncates_toward_zero() {
        assert_eq!(int_from_host(&HostValue::Float(10.9)), Ok(10));
        assert_eq!(int_from_host(&HostValue::Float(-2.7)), Ok(-2));
        assert_eq!(int_from_host(&HostValue::Float(0.0)), Ok(0));
    }

    #[test]
    fn test_float_outside_int_range() {
        let err = int_from_host(&HostValue::Float(3.0e9)).unwrap_err();
        assert_eq!(err, ConversionError::OutOfRange { value: 3_000_000_000 });
    }

    #[test]
    fn test_float_not_finite() {
        let err = int_from_host(&HostValue::Float(f64::NAN)).unwrap_err();
        assert_eq!(err.to_string(), "float NaN out of range of integer");

        let err = int_from_host(&HostValue::Float(f64::INFINITY)).unwrap_err();
        assert_eq!(err.to_string(), "float Inf out of range of integer");

        let err = int_from_host(&HostValue::Float(f64::NEG_INFINITY)).unwrap_err();
        assert_eq!(err.to_string(), "float -Inf out of range of integer");
        assert_eq!(err.exception_class(), "RangeError");
    }

    #[test]
    fn test_float_beyond_long_uses_exponent_form() {
        let err = int_from_host(&HostValue::Float(1.0e20)).unwrap_err();
        assert!(matches!(err, ConversionError::FloatOutOfRange { .. }));
        assert_eq!(err.to_string(), "float 1e+20 out of range of integer");

        let err = int_from_host(&HostValue::Float(-9.3e18)).unwrap_err();
        assert_eq!(err.to_string(), "float -9.3e+18 out of range of integer");
    }

    #[test]
    fn test_format_g10() {
        assert_eq!(format_g10(0.0), "0");
        assert_eq!(format_g10(12345.678), "12345.678");
        assert_eq!(format_g10(0.0001), "0.0001");
        assert_eq!(format_g10(0.00001), "1e-05");
        assert_eq!(format_g10(1234567890.0), "1234567890");
        assert_eq!(format_g10(12345678901.0), "1.23456789e+10");
        assert_eq!(format_g10(9999999999.7), "1e+10");
        assert_eq!(format_g10(1.0 / 3.0), "0.3333333333");
    }

    #[test]
    fn test_type_mismatch() {
        let err = int_from_host(&HostValue::Nil).unwrap_err();
        assert_eq!(err.exception_class(), "TypeError");
        assert_eq!(err.to_string(), "no implicit conversion from nil to integer");

        let err = int_from_host(&HostValue::Other("String".to_string())).unwrap_err();
        assert_eq!(
            err.to_string(),
            "no implicit conversion of String into Integer"
        );
    }

    #[test]
    fn test_booleans_use_literal_names() {
        let err = int_from_host(&HostValue::boolean(true)).unwrap_err();
        assert_eq!(err.exception_class(), "TypeError");
        assert_eq!(err.to_string(), "no implicit conversion of true into Integer");

        let err = int_from_host(&HostValue::boolean(false)).unwrap_err();
        assert_eq!(err.to_string(), "no implicit conversion of false into Integer");
    }

    #[test]
    fn test_int_to_host() {
        assert_eq!(int_to_host(6765), HostValue::Integer(6765));
        assert_eq!(int_to_host(-1_323_752_223), HostValue::Integer(-1_323_752_223));
    }
}
