use std::{fmt, str::FromStr};

use chrono::{DateTime, FixedOffset};
use rust_decimal::{Decimal, prelude::ToPrimitive};

use crate::{ast::Operator, evaluator::BuildError};

/// A literal operand handed to query generators.
///
/// # Examples
///
/// ```
/// use esfilter::Value;
/// use rust_decimal::Decimal;
///
/// let port = Value::Numeric(Decimal::from(443));
/// assert_eq!(port.to_json(), serde_json::json!(443));
///
/// let host = Value::String("1.1.1.1".to_string());
/// assert_eq!(host.to_string(), "\"1.1.1.1\"");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Exact decimal number
    Numeric(Decimal),

    Boolean(bool),

    /// UTF-8 string
    String(String),

    /// Timestamp with the offset it was written in (UTC when none was given)
    /// and the text it was parsed from
    Time {
        at: DateTime<FixedOffset>,
        text: String,
    },
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Numeric(_) => "numeric",
            Value::Boolean(_) => "boolean",
            Value::String(_) => "string",
            Value::Time { .. } => "time",
        }
    }

    /// Applies a prefix operator to this literal.
    pub fn apply_prefix(self, op: Operator) -> Result<Value, BuildError> {
        match (op, self) {
            (Operator::Negate, Value::Numeric(n)) => Ok(Value::Numeric(-n)),
            (Operator::Invert, Value::Boolean(b)) => Ok(Value::Boolean(!b)),
            (Operator::BitwiseNot, Value::Numeric(n)) if n.fract().is_zero() => n
                .to_i64()
                .map(|i| Value::Numeric(Decimal::from(!i)))
                .ok_or_else(|| BuildError::InvalidPrefix {
                    op,
                    operand: "out-of-range numeric".to_string(),
                }),
            (op, value) => Err(BuildError::InvalidPrefix {
                op,
                operand: value.type_name().to_string(),
            }),
        }
    }

    /// JSON form used in the rendered query DSL.
    ///
    /// Whole numbers become JSON integers. Fractions become JSON numbers
    /// only when an `f64` holds them exactly, otherwise their decimal text.
    /// Times render as written.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Numeric(n) => {
                if n.fract().is_zero() {
                    if let Some(i) = n.to_i64() {
                        return serde_json::Value::from(i);
                    }
                }
                n.to_f64()
                    .filter(|f| Decimal::from_str(&f.to_string()).ok() == Some(*n))
                    .and_then(serde_json::Number::from_f64)
                    .map(serde_json::Value::Number)
                    .unwrap_or_else(|| serde_json::Value::String(n.to_string()))
            }
            Value::Boolean(b) => serde_json::Value::Bool(*b),
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Time { text, .. } => serde_json::Value::String(text.clone()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Numeric(n) => write!(f, "{n}"),
            Value::Boolean(b) => write!(f, "{b}"),
            Value::String(s) => write!(f, "{s:?}"),
            Value::Time { text, .. } => write!(f, "{text:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negate_numeric() {
        let value = Value::Numeric(Decimal::from_str("2.5").unwrap());
        assert_eq!(
            value.apply_prefix(Operator::Negate).unwrap(),
            Value::Numeric(Decimal::from_str("-2.5").unwrap())
        );
    }

    #[test]
    fn test_invert_boolean() {
        assert_eq!(
            Value::Boolean(true).apply_prefix(Operator::Invert).unwrap(),
            Value::Boolean(false)
        );
    }

    #[test]
    fn test_bitwise_not_integer() {
        assert_eq!(
            Value::Numeric(Decimal::from(5))
                .apply_prefix(Operator::BitwiseNot)
                .unwrap(),
            Value::Numeric(Decimal::from(-6))
        );
    }

    #[test]
    fn test_bitwise_not_rejects_fraction() {
        let value = Value::Numeric(Decimal::from_str("1.5").unwrap());
        assert!(matches!(
            value.apply_prefix(Operator::BitwiseNot),
            Err(BuildError::InvalidPrefix { .. })
        ));
    }

    #[test]
    fn test_invert_numeric_is_rejected() {
        let err = Value::Numeric(Decimal::ONE)
            .apply_prefix(Operator::Invert)
            .unwrap_err();
        assert_eq!(err.to_string(), "prefix `!` cannot apply to a numeric operand");
    }

    #[test]
    fn test_json_numbers() {
        assert_eq!(Value::Numeric(Decimal::from(7)).to_json(), serde_json::json!(7));
        assert_eq!(
            Value::Numeric(Decimal::from_str("0.5").unwrap()).to_json(),
            serde_json::json!(0.5)
        );
    }

    #[test]
    fn test_json_fraction_keeps_precision() {
        let n = Decimal::from_str("0.1234567890123456789012345678").unwrap();
        assert_eq!(
            Value::Numeric(n).to_json(),
            serde_json::json!("0.1234567890123456789012345678")
        );
    }

    #[test]
    fn test_json_time_keeps_spelling() {
        let at = DateTime::parse_from_rfc3339("2024-03-01T08:00:00+08:00").unwrap();
        let value = Value::Time {
            at,
            text: "2024-03-01T08:00:00.000+08:00".to_string(),
        };
        assert_eq!(value.to_json(), serde_json::json!("2024-03-01T08:00:00.000+08:00"));
        assert_eq!(value.to_string(), "\"2024-03-01T08:00:00.000+08:00\"");
    }
}
