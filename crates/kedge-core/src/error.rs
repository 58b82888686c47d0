//! Parse errors for the user-facing string grammars

use thiserror::Error;

/// Errors raised while parsing port mappings, endpoints and quantities
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParseError {
    /// More than one `:` or `/` in a port mapping
    #[error("invalid syntax for port mapping '{mapping}', use 'port:targetPort/protocol'")]
    InvalidPortMapping { mapping: String },

    #[error("invalid protocol '{value}' provided, the acceptable values are 'TCP' and 'UDP'")]
    InvalidProtocol { value: String },

    /// A numeric field did not fit a 32-bit integer
    #[error("{field} is not an integer: '{value}'")]
    NotAnInteger { field: &'static str, value: String },

    #[error("invalid syntax for endpoint '{endpoint}', use 'host' or 'host/path'")]
    InvalidEndpoint { endpoint: String },

    #[error("invalid quantity '{value}'")]
    InvalidQuantity { value: String },
}

pub type Result<T> = std::result::Result<T, ParseError>;
