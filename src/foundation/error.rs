use secp256k1::Error as SecpError;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    ExecutorBusy,
    WindowExpired,
    SeedDerivationFailed,
    EmptySigningGroup,
    NoControlledSeats,
    InvalidMemberIndex,
    ChainError,
    TransportError,
    EncodingError,
    CryptoError,
    ProposalValidationFailed,
    ConfigError,
    ParseError,
    Message,
}

#[derive(Debug, Error)]
pub enum CoordinationError {
    #[error("coordination executor is busy")]
    ExecutorBusy,

    #[error("coordination window expired: block={coordination_block} current={current_block}")]
    WindowExpired { coordination_block: u64, current_block: u64 },

    /// Transient chain failure while deriving the coordination seed.
    /// The window is skipped; no fault is recorded.
    #[error("failed to compute coordination seed for block {coordination_block}: {details}")]
    SeedDerivationFailed { coordination_block: u64, details: String },

    #[error("signing group has no operators")]
    EmptySigningGroup,

    #[error("executor controls no seats in the signing group")]
    NoControlledSeats,

    #[error("invalid member index: {index} (group size {group_size})")]
    InvalidMemberIndex { index: u8, group_size: usize },

    #[error("chain error during {operation}: {details}")]
    ChainError { operation: String, details: String },

    #[error("transport error during {operation}: {details}")]
    TransportError { operation: String, details: String },

    #[error("{format} encoding error: {details}")]
    EncodingError { format: String, details: String },

    #[error("crypto error during {operation}: {details}")]
    CryptoError { operation: String, details: String },

    #[error("proposal validation failed: {details}")]
    ProposalValidationFailed { details: String },

    #[error("configuration error: {0}")]
    ConfigError(String),

    #[error("parse error: {0}")]
    ParseError(String),

    #[error("{0}")]
    Message(String),
}

pub type Result<T> = std::result::Result<T, CoordinationError>;

impl CoordinationError {
    pub fn code(&self) -> ErrorCode {
        match self {
            CoordinationError::ExecutorBusy => ErrorCode::ExecutorBusy,
            CoordinationError::WindowExpired { .. } => ErrorCode::WindowExpired,
            CoordinationError::SeedDerivationFailed { .. } => ErrorCode::SeedDerivationFailed,
            CoordinationError::EmptySigningGroup => ErrorCode::EmptySigningGroup,
            CoordinationError::NoControlledSeats => ErrorCode::NoControlledSeats,
            CoordinationError::InvalidMemberIndex { .. } => ErrorCode::InvalidMemberIndex,
            CoordinationError::ChainError { .. } => ErrorCode::ChainError,
            CoordinationError::TransportError { .. } => ErrorCode::TransportError,
            CoordinationError::EncodingError { .. } => ErrorCode::EncodingError,
            CoordinationError::CryptoError { .. } => ErrorCode::CryptoError,
            CoordinationError::ProposalValidationFailed { .. } => ErrorCode::ProposalValidationFailed,
            CoordinationError::ConfigError(_) => ErrorCode::ConfigError,
            CoordinationError::ParseError(_) => ErrorCode::ParseError,
            CoordinationError::Message(_) => ErrorCode::Message,
        }
    }

    pub fn chain(operation: impl Into<String>, details: impl std::fmt::Display) -> Self {
        CoordinationError::ChainError { operation: operation.into(), details: details.to_string() }
    }

    pub fn transport(operation: impl Into<String>, details: impl std::fmt::Display) -> Self {
        CoordinationError::TransportError { operation: operation.into(), details: details.to_string() }
    }
}

impl From<hex::FromHexError> for CoordinationError {
    fn from(err: hex::FromHexError) -> Self {
        CoordinationError::EncodingError { format: "hex".to_string(), details: err.to_string() }
    }
}

impl From<bincode::Error> for CoordinationError {
    fn from(err: bincode::Error) -> Self {
        CoordinationError::EncodingError { format: "bincode".to_string(), details: err.to_string() }
    }
}

impl From<SecpError> for CoordinationError {
    fn from(err: SecpError) -> Self {
        CoordinationError::CryptoError { operation: "secp256k1".to_string(), details: err.to_string() }
    }
}

// NOTE: Avoid adding generic "stringly" error conversions here.
// Use structured `CoordinationError` variants at the call site to preserve context.
