use serde::{Serialize, Serializer};
use std::fmt;

use crate::Result;

/// Whole numbers below this print in full decimal, as `Number.prototype.toString` does.
const FULL_DECIMAL_LIMIT: f64 = 1e21;

/// A parsed coordinate: a number or the not-a-number sentinel.
///
/// Values are kept as `f64` because that is what `parseInt` produces; a digit
/// run longer than `i64` still reaches the wire unchanged up to float rounding.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Coordinate {
    Num(f64),
    NaN,
}

impl Coordinate {
    pub fn is_nan(&self) -> bool {
        matches!(self, Coordinate::NaN)
    }

    fn as_whole(&self) -> Option<i128> {
        match self {
            Coordinate::Num(value)
                if value.is_finite()
                    && value.fract() == 0.0
                    && value.abs() < FULL_DECIMAL_LIMIT =>
            {
                Some(*value as i128)
            }
            _ => None,
        }
    }
}

impl From<i64> for Coordinate {
    fn from(value: i64) -> Self {
        Coordinate::Num(value as f64)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(whole) = self.as_whole() {
            return write!(f, "{}", whole);
        }
        match self {
            Coordinate::Num(value) => write!(f, "{}", value),
            Coordinate::NaN => f.write_str("NaN"),
        }
    }
}

// Whole values go out as exact integers. NaN and infinities go through the
// serializer as floats, which serde_json writes as `null` like JSON.stringify.
impl Serialize for Coordinate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if let Some(whole) = self.as_whole() {
            return serializer.serialize_i128(whole);
        }
        match self {
            Coordinate::Num(value) => serializer.serialize_f64(*value),
            Coordinate::NaN => serializer.serialize_f64(f64::NAN),
        }
    }
}

/// The `{x, y}` record sent on each click.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct OutboundPoint {
    pub x: Coordinate,
    pub y: Coordinate,
}

impl OutboundPoint {
    pub fn new(x: Coordinate, y: Coordinate) -> Self {
        Self { x, y }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_json() {
        let point = OutboundPoint::new(3.into(), 4.into());
        assert_eq!(point.to_json().unwrap(), r#"{"x":3,"y":4}"#);

        let point = OutboundPoint::new((-1).into(), Coordinate::Num(-0.0));
        assert_eq!(point.to_json().unwrap(), r#"{"x":-1,"y":0}"#);
    }

    #[test]
    fn test_large_values_keep_full_decimal_form() {
        let point = OutboundPoint::new(Coordinate::Num(1e20), Coordinate::Num(-9007199254740993.0));
        assert_eq!(
            point.to_json().unwrap(),
            r#"{"x":100000000000000000000,"y":-9007199254740992}"#
        );
    }

    #[test]
    fn test_nan_and_infinity_are_written_as_null() {
        let point = OutboundPoint::new(Coordinate::NaN, 5.into());
        assert_eq!(point.to_json().unwrap(), r#"{"x":null,"y":5}"#);

        let point = OutboundPoint::new(Coordinate::NaN, Coordinate::Num(f64::INFINITY));
        assert_eq!(point.to_json().unwrap(), r#"{"x":null,"y":null}"#);
    }

    #[test]
    fn test_display() {
        assert_eq!(Coordinate::from(-3).to_string(), "-3");
        assert_eq!(Coordinate::Num(1e20).to_string(), "100000000000000000000");
        assert_eq!(Coordinate::NaN.to_string(), "NaN");
        assert!(Coordinate::NaN.is_nan());
    }
}
