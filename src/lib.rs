//! On-chain ticket checking for Unlock-style lock contracts.
//!
//! The crate is split along the request path: [`address`] canonicalizes user
//! input, [`lock`] reads the contract and reaches a verdict, and [`modules`]
//! exposes both over HTTP together with the portal page.

pub mod address;

// Lock-contract reads and the check decision tree
pub mod lock;

// HTTP surface: check API and the portal page
pub mod modules;
