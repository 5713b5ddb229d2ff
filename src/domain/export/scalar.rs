// ============================================================
// SCALAR CELL VALUE
// ============================================================
// One cell of an exported table

use serde_json::Value;
use std::fmt;

/// A single cell value.
///
/// The text form (via `Display`) is what ends up inside the quotes of the
/// exported CSV: null is empty, numbers use their natural decimal text.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl Scalar {
    pub fn is_null(&self) -> bool {
        matches!(self, Scalar::Null)
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Null => Ok(()),
            Scalar::Bool(value) => write!(f, "{}", value),
            Scalar::Integer(value) => write!(f, "{}", value),
            Scalar::Float(value) if value.is_nan() => f.write_str("NaN"),
            Scalar::Float(value) if value.is_infinite() => {
                f.write_str(if *value > 0.0 { "Infinity" } else { "-Infinity" })
            }
            // -0.0 prints as "0"
            Scalar::Float(value) if *value == 0.0 => f.write_str("0"),
            Scalar::Float(value) => write_float(f, *value),
            Scalar::Text(value) => f.write_str(value),
        }
    }
}

/// Fixed notation for `1e-6 <= |v| < 1e21`, exponent form (`1e+21`, `1.5e-7`)
/// outside that range.
fn write_float(f: &mut fmt::Formatter<'_>, value: f64) -> fmt::Result {
    let magnitude = value.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return write!(f, "{}", value);
    }
    let text = format!("{:e}", value);
    match text.split_once('e') {
        Some((mantissa, exp)) if !exp.starts_with('-') => write!(f, "{}e+{}", mantissa, exp),
        _ => f.write_str(&text),
    }
}

impl From<&Value> for Scalar {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => Scalar::Null,
            Value::Bool(b) => Scalar::Bool(*b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Scalar::Integer(i)
                } else if n.is_u64() {
                    // Beyond i64: keep the exact digits.
                    Scalar::Text(n.to_string())
                } else {
                    n.as_f64().map(Scalar::Float).unwrap_or(Scalar::Null)
                }
            }
            Value::String(s) => Scalar::Text(s.clone()),
            nested => Scalar::Text(nested.to_string()),
        }
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Integer(value)
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::Float(value)
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Scalar::Bool(value)
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Text(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::Text(value)
    }
}

impl<T: Into<Scalar>> From<Option<T>> for Scalar {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Scalar::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_numbers_use_natural_decimal_text() {
        assert_eq!(Scalar::Integer(80).to_string(), "80");
        assert_eq!(Scalar::Float(80.0).to_string(), "80");
        assert_eq!(Scalar::Float(7.5).to_string(), "7.5");
        assert_eq!(Scalar::Float(-0.0).to_string(), "0");
        assert_eq!(Scalar::Float(0.1 + 0.2).to_string(), "0.30000000000000004");
    }

    #[test]
    fn test_exponent_form_outside_fixed_range() {
        assert_eq!(Scalar::Float(1e21).to_string(), "1e+21");
        assert_eq!(Scalar::Float(-2.5e22).to_string(), "-2.5e+22");
        assert_eq!(Scalar::Float(1e-7).to_string(), "1e-7");
        assert_eq!(Scalar::Float(1.5e-7).to_string(), "1.5e-7");
        assert_eq!(Scalar::Float(1e20).to_string(), "100000000000000000000");
        assert_eq!(Scalar::Float(0.000001).to_string(), "0.000001");
    }

    #[test]
    fn test_null_is_empty() {
        assert_eq!(Scalar::Null.to_string(), "");
        assert_eq!(Scalar::from(None::<i64>).to_string(), "");
    }

    #[test]
    fn test_non_finite_floats() {
        assert_eq!(Scalar::Float(f64::NAN).to_string(), "NaN");
        assert_eq!(Scalar::Float(f64::INFINITY).to_string(), "Infinity");
        assert_eq!(Scalar::Float(f64::NEG_INFINITY).to_string(), "-Infinity");
    }

    #[test]
    fn test_from_json_value() {
        assert_eq!(Scalar::from(&json!(null)), Scalar::Null);
        assert_eq!(Scalar::from(&json!(true)), Scalar::Bool(true));
        assert_eq!(Scalar::from(&json!(72)), Scalar::Integer(72));
        assert_eq!(Scalar::from(&json!(7.25)), Scalar::Float(7.25));
        assert_eq!(Scalar::from(&json!("1/8")), Scalar::Text("1/8".to_string()));
        assert_eq!(
            Scalar::from(&json!(u64::MAX)),
            Scalar::Text("18446744073709551615".to_string())
        );
        assert_eq!(Scalar::from(&json!([1, 2])).to_string(), "[1,2]");
    }
}
