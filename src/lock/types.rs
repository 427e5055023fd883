//! Types for ticket check verdicts.

use alloy::primitives::Address;
use serde::{Deserialize, Serialize};

use crate::lock::error::Diagnostic;

/// Final validity state of one check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketStatus {
    /// The lock contract confirms a currently valid key.
    Valid,
    /// No usable key, for whatever reason the diagnostic carries.
    Invalid,
}

/// Everything the form needs to render about the key behind a valid verdict.
///
/// Both fields are best-effort: a failed detail read leaves its field empty
/// and never affects the verdict itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyDetails {
    /// Display name of the lock contract, doubling as the event string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lock_name: Option<String>,

    /// Unix timestamp when the key lapses. `None` for non-expiring keys
    /// (the contract reports a sentinel beyond any real date).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<u64>,
}

impl KeyDetails {
    /// True when no detail read produced anything worth rendering.
    pub fn is_empty(&self) -> bool {
        self.lock_name.is_none() && self.expires_at.is_none()
    }
}

/// Result of one full check run: the canonical address that was queried,
/// the verdict, and the optional explanation or key details.
///
/// A diagnostic is only ever attached to an invalid verdict; details are
/// only ever attached to a valid one.
#[derive(Debug, Clone)]
pub struct CheckOutcome {
    /// The queried address in canonical checksummed form.
    pub address: Address,

    /// The verdict.
    pub status: TicketStatus,

    /// Why the ticket is not valid, in user-facing words.
    pub diagnostic: Option<Diagnostic>,

    /// Key details shown alongside a valid verdict.
    pub details: Option<KeyDetails>,
}

impl CheckOutcome {
    /// A valid verdict, dropping detail records with nothing in them.
    pub fn valid(address: Address, details: KeyDetails) -> Self {
        let details = (!details.is_empty()).then_some(details);
        Self {
            address,
            status: TicketStatus::Valid,
            diagnostic: None,
            details,
        }
    }

    /// An invalid verdict with its explanation.
    pub fn invalid(address: Address, diagnostic: Diagnostic) -> Self {
        Self {
            address,
            status: TicketStatus::Invalid,
            diagnostic: Some(diagnostic),
            details: None,
        }
    }

    /// Convenience for the presentation layer.
    pub fn is_valid(&self) -> bool {
        self.status == TicketStatus::Valid
    }
}
