//! Lock-contract ticket validation module.
//!
//! This module answers one question: does an address hold a valid key on the
//! configured Unlock-style lock contract? The contract is the sole authority;
//! nothing here signs, sends, or mutates chain state. Every read is an
//! `eth_call` against the latest block.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌───────────────┐     ┌──────────────┐
//! │ LockClient  │────▶│ TicketChecker │────▶│ CheckOutcome │
//! │  (alloy)    │     │ (decision     │     │  (verdict +  │
//! └─────────────┘     │  tree)        │     │  diagnostic) │
//!        │            └───────────────┘     └──────────────┘
//!        ▼
//! ┌─────────────┐
//! │ PublicLock  │
//! │  contract   │
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use turnstile::lock::{LockClient, LockReader, TicketChecker};
//!
//! // Initialize components
//! let reader: Arc<dyn LockReader> = Arc::new(LockClient::new(rpc_url, lock_address));
//! let checker = TicketChecker::new(reader);
//!
//! // Check an address
//! match checker.check("0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed").await {
//!     Ok(outcome) if outcome.is_valid() => { /* admit */ }
//!     Ok(outcome) => { /* show outcome.diagnostic and the purchase link */ }
//!     Err(e) => { /* address problem, ask the user to fix their input */ }
//! }
//! ```

pub mod checker;
pub mod client;
pub mod error;
pub mod types;

// Re-export main types for convenience
pub use checker::TicketChecker;
pub use client::{LockClient, LockReader};
pub use error::{Diagnostic, LockError};
pub use types::{CheckOutcome, KeyDetails, TicketStatus};
