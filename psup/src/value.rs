//!
//! Owned SNMP values and coercions
//!
use snmp2::Value;

use crate::error::ReadError;

/// Owned decode of a varbind value.
///
/// `snmp2` values borrow the session receive buffer, so they cannot outlive
/// the next request; converting to `RawValue` copies the payload out.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RawValue {
    /// OCTET STRING, decoded as UTF-8 (lossy)
    Text(String),
    /// INTEGER
    Integer(i64),
    /// endOfMibView exception, terminates a table walk
    EndOfMibView,
    /// Anything else the device may return
    Other(String),
}

impl From<&Value<'_>> for RawValue {
    fn from(value: &Value<'_>) -> RawValue {
        match value {
            Value::OctetString(bytes) => RawValue::Text(String::from_utf8_lossy(bytes).into_owned()),
            Value::Integer(n) => RawValue::Integer(*n),
            Value::EndOfMibView => RawValue::EndOfMibView,
            other => RawValue::Other(format!("{other:?}")),
        }
    }
}

impl RawValue {
    /// Coerce to text, failing on any other shape
    pub fn into_text(self) -> Result<String, ReadError> {
        match self {
            RawValue::Text(s) => Ok(s),
            other => Err(ReadError::Coercion {
                expected: "text",
                found: other.describe(),
            }),
        }
    }

    /// Coerce to a signed integer, failing on any other shape
    pub fn into_integer(self) -> Result<i64, ReadError> {
        match self {
            RawValue::Integer(n) => Ok(n),
            other => Err(ReadError::Coercion {
                expected: "integer",
                found: other.describe(),
            }),
        }
    }

    fn describe(&self) -> String {
        match self {
            RawValue::Text(s) => format!("text {s:?}"),
            RawValue::Integer(n) => format!("integer {n}"),
            RawValue::EndOfMibView => "endOfMibView".to_owned(),
            RawValue::Other(d) => d.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_octet_string() {
        let value = Value::OctetString(b"black");
        assert_eq!(RawValue::from(&value), RawValue::Text("black".to_owned()));
    }

    #[test]
    fn test_decode_integer() {
        let value = Value::Integer(-2);
        assert_eq!(RawValue::from(&value), RawValue::Integer(-2));
    }

    #[test]
    fn test_text_coercion() {
        assert_eq!(RawValue::Text("cyan".to_owned()).into_text().unwrap(), "cyan");
        assert!(RawValue::Integer(10).into_text().is_err());
    }

    #[test]
    fn test_integer_coercion() {
        assert_eq!(RawValue::Integer(100).into_integer().unwrap(), 100);

        let err = RawValue::Text("cyan".to_owned()).into_integer().unwrap_err();
        assert_eq!(err.to_string(), "expected integer, device returned text \"cyan\"");
    }
}
