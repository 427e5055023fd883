//! Error types for lock-contract reads and check verdicts.

use alloy::transports::{RpcError, TransportErrorKind};
use thiserror::Error;

/// Failures raised by the lock-contract reader.
///
/// These classify the underlying RPC stack's errors into the handful of
/// shapes the checker cares about; the original cause is carried as text.
#[derive(Debug, Clone, Error)]
pub enum LockError {
    #[error("contract call reverted: {0}")]
    Reverted(String),

    #[error("transport failure: {0}")]
    Transport(String),

    #[error("failed to decode contract response: {0}")]
    Decode(String),

    #[error("rpc request failed: {0}")]
    Rpc(String),
}

impl From<RpcError<TransportErrorKind>> for LockError {
    fn from(err: RpcError<TransportErrorKind>) -> Self {
        match err {
            RpcError::Transport(kind) => LockError::Transport(kind.to_string()),
            other => LockError::Rpc(other.to_string()),
        }
    }
}

impl From<alloy::contract::Error> for LockError {
    fn from(err: alloy::contract::Error) -> Self {
        use alloy::contract::Error as ContractError;

        match err {
            // A JSON-RPC error response to eth_call means the node executed
            // the call and the contract rejected it.
            ContractError::TransportError(RpcError::ErrorResp(payload)) => {
                LockError::Reverted(payload.to_string())
            }
            ContractError::TransportError(RpcError::Transport(kind)) => {
                LockError::Transport(kind.to_string())
            }
            ContractError::TransportError(other) => LockError::Rpc(other.to_string()),
            ContractError::AbiError(inner) => LockError::Decode(inner.to_string()),
            other => LockError::Rpc(other.to_string()),
        }
    }
}

/// User-facing explanation attached to an invalid verdict.
///
/// The `Display` strings are the exact messages rendered by the form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Diagnostic {
    #[error("No key found for this address")]
    NoKey,

    #[error("Your key has expired")]
    KeyExpired,

    /// The contract reports a nonzero balance but refuses the key, and the
    /// expiration timestamp does not explain why.
    #[error("You own a key but it appears to be invalid")]
    OwnedButInvalid,

    #[error("Error checking key ownership")]
    OwnershipCheckFailed,

    #[error("Error checking key expiration")]
    ExpirationCheckFailed,

    #[error("Contract call failed - the contract might not support this method")]
    UnsupportedCall,

    #[error("Network connection error - please try again")]
    NetworkUnavailable,

    #[error("Error: {0}")]
    Other(String),
}

impl Diagnostic {
    /// Map a failed primary validity query onto the message shown to the
    /// visitor: reverts and transport outages get dedicated copy, anything
    /// else surfaces the reader's own description.
    pub fn from_primary_failure(err: &LockError) -> Self {
        match err {
            LockError::Reverted(_) => Diagnostic::UnsupportedCall,
            LockError::Transport(_) => Diagnostic::NetworkUnavailable,
            other => Diagnostic::Other(other.to_string()),
        }
    }
}
