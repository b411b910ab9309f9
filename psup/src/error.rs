//!
//! Supply status errors
//!
use std::net::AddrParseError;

use crate::model::Stage;

/// Top-level acquisition error
#[derive(Debug, thiserror::Error)]
pub enum SupplyError {
    #[error("invalid device address: {0}")]
    /// The device address is not a valid IPv4 or IPv6 address
    InvalidAddress(#[from] AddrParseError),

    #[error("connection failed: {0}")]
    /// Session establishment failure
    Connection(#[source] snmp2::Error),

    #[error("unable to retrieve '{stage}': {source}")]
    /// One of the four reads failed; `stage` names which one
    Read {
        stage: Stage,
        #[source]
        source: ReadError,
    },
}

/// Scalar read or table walk failure
#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    #[error(transparent)]
    /// Transport or protocol error, after all retransmissions failed
    Snmp(#[from] snmp2::Error),

    #[error("device returned no value")]
    /// Response carried no varbinds
    EmptyResponse,

    #[error("not a valid object identifier: {0}")]
    /// Malformed dotted OID string
    InvalidOid(String),

    #[error("expected {expected}, device returned {found}")]
    /// Response value cannot be coerced to the shape the caller mandates
    Coercion { expected: &'static str, found: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_error_stage_context() {
        let err = SupplyError::Read {
            stage: Stage::ModelName,
            source: ReadError::EmptyResponse,
        };
        assert_eq!(
            err.to_string(),
            "unable to retrieve 'model name': device returned no value"
        );
    }

    #[test]
    fn test_coercion_message() {
        let err = ReadError::Coercion {
            expected: "text",
            found: "integer 42".to_owned(),
        };
        assert_eq!(err.to_string(), "expected text, device returned integer 42");
    }
}
