use std::fmt;

/// A JSON number.
///
/// Every number reads as a double. Integers that fit in `i64` also keep
/// their exact value, so large integers survive a serialize/parse cycle.
#[derive(Debug, Clone, Copy)]
pub struct Number(N);

#[derive(Debug, Clone, Copy)]
enum N {
    Int(i64),
    Float(f64),
}

impl Number {
    pub fn from_f64(f: f64) -> Self {
        Number(N::Float(f))
    }

    pub fn from_i64(i: i64) -> Self {
        Number(N::Int(i))
    }

    /// `true` when the number carries an exact integer.
    pub fn is_integer(&self) -> bool {
        matches!(self.0, N::Int(_))
    }

    pub fn is_finite(&self) -> bool {
        match self.0 {
            N::Int(_) => true,
            N::Float(f) => f.is_finite(),
        }
    }

    pub fn as_f64(&self) -> f64 {
        match self.0 {
            N::Int(i) => i as f64,
            N::Float(f) => f,
        }
    }

    /// Floats are truncated toward zero and saturate at the `i64` bounds.
    pub fn as_i64(&self) -> i64 {
        match self.0 {
            N::Int(i) => i,
            N::Float(f) => f as i64,
        }
    }

    /// Saturates at the `i32` bounds; floats are truncated toward zero.
    pub fn as_i32(&self) -> i32 {
        match self.0 {
            N::Int(i) => i.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32,
            N::Float(f) => f as i32,
        }
    }

    /// The exact integer, if this number has one.
    pub fn as_exact_i64(&self) -> Option<i64> {
        match self.0 {
            N::Int(i) => Some(i),
            N::Float(_) => None,
        }
    }
}

/// 2^63, the first float above `i64::MAX`.
const I64_END: f64 = 9_223_372_036_854_775_808.0;

/// `true` when `f` is exactly the integer `i`. Comparing through `f64`
/// would round `i` first and make `==` non-transitive above 2^53.
fn int_eq_float(i: i64, f: f64) -> bool {
    f.fract() == 0.0 && f >= -I64_END && f < I64_END && f as i64 == i
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        match (self.0, other.0) {
            (N::Int(a), N::Int(b)) => a == b,
            (N::Float(a), N::Float(b)) => a == b,
            (N::Int(i), N::Float(f)) | (N::Float(f), N::Int(i)) => int_eq_float(i, f),
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            N::Int(i) => write!(f, "{i}"),
            // Debug output of f64 is the shortest round-tripping form.
            N::Float(x) => write!(f, "{x:?}"),
        }
    }
}

impl serde::Serialize for Number {
    /// NaN and the infinities have no JSON spelling and are rejected.
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0 {
            N::Int(i) => serializer.serialize_i64(i),
            N::Float(f) if f.is_finite() => serializer.serialize_f64(f),
            N::Float(_) => Err(serde::ser::Error::custom("non-finite number")),
        }
    }
}

macro_rules! from_signed {
    ($($t:ty),*) => {
        $(impl From<$t> for Number {
            fn from(n: $t) -> Self {
                Number(N::Int(i64::from(n)))
            }
        })*
    };
}

from_signed!(i8, i16, i32, i64, u8, u16, u32);

impl From<u64> for Number {
    fn from(n: u64) -> Self {
        match i64::try_from(n) {
            Ok(i) => Number(N::Int(i)),
            Err(_) => Number(N::Float(n as f64)),
        }
    }
}

impl From<usize> for Number {
    fn from(n: usize) -> Self {
        Number::from(n as u64)
    }
}

impl From<isize> for Number {
    fn from(n: isize) -> Self {
        Number(N::Int(n as i64))
    }
}

impl From<f64> for Number {
    fn from(f: f64) -> Self {
        Number(N::Float(f))
    }
}

impl From<f32> for Number {
    fn from(f: f32) -> Self {
        Number(N::Float(f64::from(f)))
    }
}

impl From<&serde_json::Number> for Number {
    fn from(n: &serde_json::Number) -> Self {
        if let Some(i) = n.as_i64() {
            Number(N::Int(i))
        } else if let Some(u) = n.as_u64() {
            Number::from(u)
        } else {
            Number(N::Float(n.as_f64().unwrap_or(f64::NAN)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_keeps_exact_value() {
        let n = Number::from(i64::MAX);
        assert!(n.is_integer());
        assert_eq!(n.as_i64(), i64::MAX);
        assert_eq!(Number::from(i64::MIN).as_i64(), i64::MIN);
    }

    #[test]
    fn test_float_truncates_to_integer() {
        let n = Number::from(12.34);
        assert_eq!(n.as_i64(), 12);
        assert_eq!(n.as_i32(), 12);
        assert_eq!(Number::from(-7.9).as_i64(), -7);
        assert_eq!(n.as_f64(), 12.34);
    }

    #[test]
    fn test_float_conversion_saturates() {
        assert_eq!(Number::from(1e300).as_i64(), i64::MAX);
        assert_eq!(Number::from(-1e300).as_i32(), i32::MIN);
    }

    #[test]
    fn test_u64_beyond_i64_becomes_float() {
        let n = Number::from(u64::MAX);
        assert!(!n.is_integer());
        assert_eq!(n.as_f64(), u64::MAX as f64);
    }

    #[test]
    fn test_numeric_equality_across_flavours() {
        assert_eq!(Number::from(1), Number::from(1.0));
        assert_ne!(Number::from(1), Number::from(1.5));
        assert_ne!(Number::from(f64::NAN), Number::from(f64::NAN));
    }

    #[test]
    fn test_equality_is_exact_beyond_f64_precision() {
        let x = Number::from(1_i64 << 53);
        let y = Number::from((1_i64 << 53) + 1);
        let f = Number::from(9_007_199_254_740_992.0);
        assert_eq!(x, f);
        assert_ne!(y, f);
        assert_ne!(x, y);
        assert_eq!(Number::from(i64::MIN), Number::from(i64::MIN as f64));
        assert_ne!(Number::from(i64::MAX), Number::from(i64::MAX as f64));
        assert_ne!(Number::from(0), Number::from(f64::NAN));
        assert_ne!(Number::from(i64::MAX), Number::from(f64::INFINITY));
    }

    #[test]
    fn test_as_i32_saturates_for_both_payloads() {
        assert_eq!(Number::from(3_000_000_000_i64).as_i32(), i32::MAX);
        assert_eq!(Number::from(3_000_000_000.0).as_i32(), i32::MAX);
        assert_eq!(Number::from(-3_000_000_000_i64).as_i32(), i32::MIN);
        assert_eq!(Number::from(-42).as_i32(), -42);
    }

    #[test]
    fn test_display() {
        assert_eq!(Number::from(42).to_string(), "42");
        assert_eq!(Number::from(1.23).to_string(), "1.23");
        assert_eq!(Number::from(2.0).to_string(), "2.0");
    }

    #[test]
    fn test_finiteness() {
        assert!(Number::from(3).is_finite());
        assert!(!Number::from(f64::INFINITY).is_finite());
        assert!(!Number::from(f64::NAN).is_finite());
    }
}
