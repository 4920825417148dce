//! Error types for junokit.
use thiserror::Error;

/// Errors returned by balance and transfer flows.
///
/// A signer rejection is deliberately absent: it is a normal outcome and is
/// reported through [`TransferOutcome`](crate::types::TransferOutcome).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FlowError {
    /// The operation needs a connected wallet session.
    #[error("wallet connection required")]
    ConnectionRequired,

    /// Network or query-layer failure.
    #[error("query failed: {0}")]
    QueryFailed(String),

    /// The response did not have the expected numeric shape.
    #[error("parse failed: {0}")]
    ParseFailed(String),

    /// The same operation is already running for this controller.
    #[error("{0} already in flight")]
    OperationInFlight(&'static str),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("transport: {0}")] Transport(String),
    #[error("status {status}: {message}")] Status { status: u16, message: String },
    #[error("malformed response: {0}")] Malformed(String),
}

impl From<QueryError> for FlowError {
    fn from(e: QueryError) -> Self {
        match e {
            QueryError::Malformed(reason) => FlowError::ParseFailed(reason),
            other => FlowError::QueryFailed(other.to_string()),
        }
    }
}

impl From<AmountError> for FlowError {
    fn from(e: AmountError) -> Self {
        FlowError::ParseFailed(e.to_string())
    }
}

/// Failures reported by the wallet's sign-and-broadcast primitive.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SignerError {
    /// The user declined the signing prompt.
    #[error("request rejected by user")]
    Rejected,

    /// Signing succeeded but submission failed.
    #[error("broadcast failed: {0}")]
    Broadcast(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WalletError {
    #[error("wallet not installed: {0}")] NotInstalled(String),
    #[error("connection rejected by user")] Rejected,
    #[error("wallet provider: {0}")] Provider(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("invalid transition from {from} on {event}")]
    InvalidTransition { from: String, event: String },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AmountError {
    #[error("empty amount")] Empty,
    #[error("negative amount")] Negative,
    #[error("invalid digit: {0:?}")] InvalidDigit(char),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("config load: {0}")] Load(String),
    #[error("invalid config: {0}")] Invalid(String),
}
