//! Ticket check sequencing.
//!
//! This module holds the decision tree that turns a handful of lock-contract
//! reads into a single verdict. Chain failures never escape as errors: every
//! failed step degrades to an invalid verdict with a diagnostic, so the form
//! always has something to render.

use crate::address::{self, AddressError};
use crate::lock::client::LockReader;
use crate::lock::error::Diagnostic;
use crate::lock::types::{CheckOutcome, KeyDetails};
use alloy::primitives::{Address, U256};
use log::{debug, error, info, warn};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

/// Runs the check sequence against a lock reader.
///
/// Exactly one sequence shape exists: validity predicate first, then balance
/// to distinguish "no key" from "key gone bad", then expiration to separate
/// lapsed keys from the ambiguous rest. Reads are awaited one at a time.
pub struct TicketChecker {
    reader: Arc<dyn LockReader>,
}

impl TicketChecker {
    /// Create a checker over the given reader.
    pub fn new(reader: Arc<dyn LockReader>) -> Self {
        Self { reader }
    }

    /// Check whether `raw_address` holds a valid key.
    ///
    /// Address problems are reported as `Err` before any network traffic;
    /// once the address is canonical the run always produces an outcome.
    pub async fn check(&self, raw_address: &str) -> Result<CheckOutcome, AddressError> {
        // 1. Normalize before anything touches the network.
        let owner = address::normalize(raw_address)?;
        debug!("Checking key for {}", owner);

        // 2. Primary validity predicate.
        let outcome = match self.reader.has_valid_key(owner).await {
            Ok(true) => {
                let details = self.gather_details(owner).await;
                CheckOutcome::valid(owner, details)
            }
            Ok(false) => self.explain_invalid(owner).await,
            Err(err) => {
                error!("getHasValidKey failed for {}: {}", owner, err);
                CheckOutcome::invalid(owner, Diagnostic::from_primary_failure(&err))
            }
        };

        if let Some(diagnostic) = &outcome.diagnostic {
            info!("No valid key for {}: {}", owner, diagnostic);
        } else {
            info!("Valid key for {}", owner);
        }

        Ok(outcome)
    }

    /// The contract said no; figure out which kind of no.
    async fn explain_invalid(&self, owner: Address) -> CheckOutcome {
        // 3. Balance distinguishes "no key at all" from a key gone bad.
        let balance = match self.reader.key_balance(owner).await {
            Ok(balance) => balance,
            Err(err) => {
                error!("balanceOf failed for {}: {}", owner, err);
                return CheckOutcome::invalid(owner, Diagnostic::OwnershipCheckFailed);
            }
        };

        if balance.is_zero() {
            return CheckOutcome::invalid(owner, Diagnostic::NoKey);
        }

        // 4. Expiration separates lapsed keys from the ambiguous rest.
        match self.reader.key_expiration(owner).await {
            Ok(expiration) if expiration < U256::from(unix_now()) => {
                CheckOutcome::invalid(owner, Diagnostic::KeyExpired)
            }
            Ok(_) => CheckOutcome::invalid(owner, Diagnostic::OwnedButInvalid),
            Err(err) => {
                error!("keyExpirationTimestampFor failed for {}: {}", owner, err);
                CheckOutcome::invalid(owner, Diagnostic::ExpirationCheckFailed)
            }
        }
    }

    /// Best-effort detail reads for a confirmed key. Failures degrade to
    /// empty fields; the verdict is already settled at this point.
    async fn gather_details(&self, owner: Address) -> KeyDetails {
        let lock_name = match self.reader.lock_name().await {
            Ok(name) => Some(name),
            Err(err) => {
                warn!("Lock name unavailable: {}", err);
                None
            }
        };

        let expires_at = match self.reader.key_expiration(owner).await {
            // Timestamps beyond u64 are the contract's non-expiring
            // sentinel; zero means the field was never set.
            Ok(expiration) => u64::try_from(expiration).ok().filter(|&ts| ts != 0),
            Err(err) => {
                warn!("Key expiration unavailable for {}: {}", owner, err);
                None
            }
        };

        KeyDetails {
            lock_name,
            expires_at,
        }
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lock::error::LockError;
    use crate::lock::types::TicketStatus;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const OWNER: &str = "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed";
    const FAR_FUTURE: u64 = 4_102_444_800; // 2100-01-01

    /// Scripted reader: each query returns its configured result and bumps
    /// a shared counter so tests can assert the chain was (not) touched.
    struct MockReader {
        valid: Result<bool, LockError>,
        balance: Result<U256, LockError>,
        expiration: Result<U256, LockError>,
        name: Result<String, LockError>,
        queries: AtomicUsize,
    }

    impl Default for MockReader {
        fn default() -> Self {
            Self {
                valid: Ok(true),
                balance: Ok(U256::from(1)),
                expiration: Ok(U256::from(FAR_FUTURE)),
                name: Ok("M3trik Lock".to_string()),
                queries: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl LockReader for MockReader {
        async fn current_block(&self) -> Result<u64, LockError> {
            self.queries.fetch_add(1, Ordering::SeqCst);
            Ok(1)
        }

        async fn has_valid_key(&self, _owner: Address) -> Result<bool, LockError> {
            self.queries.fetch_add(1, Ordering::SeqCst);
            self.valid.clone()
        }

        async fn key_balance(&self, _owner: Address) -> Result<U256, LockError> {
            self.queries.fetch_add(1, Ordering::SeqCst);
            self.balance.clone()
        }

        async fn key_expiration(&self, _owner: Address) -> Result<U256, LockError> {
            self.queries.fetch_add(1, Ordering::SeqCst);
            self.expiration.clone()
        }

        async fn lock_name(&self) -> Result<String, LockError> {
            self.queries.fetch_add(1, Ordering::SeqCst);
            self.name.clone()
        }
    }

    fn checker_over(mock: MockReader) -> (TicketChecker, Arc<MockReader>) {
        let reader = Arc::new(mock);
        (TicketChecker::new(reader.clone()), reader)
    }

    #[tokio::test]
    async fn test_valid_key_yields_valid_outcome() {
        let (checker, _) = checker_over(MockReader::default());
        let outcome = checker.check(OWNER).await.unwrap();

        assert_eq!(outcome.status, TicketStatus::Valid);
        assert!(outcome.diagnostic.is_none());

        let details = outcome.details.unwrap();
        assert_eq!(details.lock_name.as_deref(), Some("M3trik Lock"));
        assert_eq!(details.expires_at, Some(FAR_FUTURE));
    }

    #[tokio::test]
    async fn test_malformed_address_never_queries_chain() {
        let (checker, reader) = checker_over(MockReader::default());
        let err = checker.check("0x123").await.unwrap_err();

        assert_eq!(err, AddressError::Malformed);
        assert_eq!(reader.queries.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_empty_address_never_queries_chain() {
        let (checker, reader) = checker_over(MockReader::default());
        let err = checker.check("").await.unwrap_err();

        assert_eq!(err, AddressError::Empty);
        assert_eq!(reader.queries.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_zero_balance_reports_no_key() {
        let (checker, reader) = checker_over(MockReader {
            valid: Ok(false),
            balance: Ok(U256::ZERO),
            ..MockReader::default()
        });
        let outcome = checker.check(OWNER).await.unwrap();

        assert_eq!(outcome.status, TicketStatus::Invalid);
        assert_eq!(outcome.diagnostic, Some(Diagnostic::NoKey));
        // Validity predicate and balance only; expiration is never asked.
        assert_eq!(reader.queries.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_expired_key_reports_expired() {
        let (checker, _) = checker_over(MockReader {
            valid: Ok(false),
            expiration: Ok(U256::from(1)),
            ..MockReader::default()
        });
        let outcome = checker.check(OWNER).await.unwrap();

        assert_eq!(outcome.status, TicketStatus::Invalid);
        assert_eq!(outcome.diagnostic, Some(Diagnostic::KeyExpired));
    }

    #[tokio::test]
    async fn test_future_expiration_reports_owned_but_invalid() {
        let (checker, _) = checker_over(MockReader {
            valid: Ok(false),
            ..MockReader::default()
        });
        let outcome = checker.check(OWNER).await.unwrap();

        assert_eq!(outcome.diagnostic, Some(Diagnostic::OwnedButInvalid));
    }

    #[tokio::test]
    async fn test_primary_transport_failure_degrades_to_invalid() {
        let (checker, _) = checker_over(MockReader {
            valid: Err(LockError::Transport("connection refused".to_string())),
            ..MockReader::default()
        });
        let outcome = checker.check(OWNER).await.unwrap();

        assert_eq!(outcome.status, TicketStatus::Invalid);
        assert_eq!(outcome.diagnostic, Some(Diagnostic::NetworkUnavailable));
    }

    #[tokio::test]
    async fn test_primary_revert_reports_unsupported_call() {
        let (checker, _) = checker_over(MockReader {
            valid: Err(LockError::Reverted("execution reverted".to_string())),
            ..MockReader::default()
        });
        let outcome = checker.check(OWNER).await.unwrap();

        assert_eq!(outcome.diagnostic, Some(Diagnostic::UnsupportedCall));
    }

    #[tokio::test]
    async fn test_balance_failure_reports_ownership_check() {
        let (checker, _) = checker_over(MockReader {
            valid: Ok(false),
            balance: Err(LockError::Rpc("timeout".to_string())),
            ..MockReader::default()
        });
        let outcome = checker.check(OWNER).await.unwrap();

        assert_eq!(outcome.diagnostic, Some(Diagnostic::OwnershipCheckFailed));
    }

    #[tokio::test]
    async fn test_expiration_failure_reports_expiration_check() {
        let (checker, _) = checker_over(MockReader {
            valid: Ok(false),
            expiration: Err(LockError::Rpc("timeout".to_string())),
            ..MockReader::default()
        });
        let outcome = checker.check(OWNER).await.unwrap();

        assert_eq!(outcome.diagnostic, Some(Diagnostic::ExpirationCheckFailed));
    }

    #[tokio::test]
    async fn test_detail_failures_never_flip_validity() {
        let (checker, _) = checker_over(MockReader {
            name: Err(LockError::Rpc("timeout".to_string())),
            expiration: Err(LockError::Rpc("timeout".to_string())),
            ..MockReader::default()
        });
        let outcome = checker.check(OWNER).await.unwrap();

        assert_eq!(outcome.status, TicketStatus::Valid);
        assert!(outcome.diagnostic.is_none());
        assert!(outcome.details.is_none());
    }

    #[tokio::test]
    async fn test_non_expiring_key_omits_expiration() {
        let (checker, _) = checker_over(MockReader {
            expiration: Ok(U256::MAX),
            ..MockReader::default()
        });
        let outcome = checker.check(OWNER).await.unwrap();

        let details = outcome.details.unwrap();
        assert_eq!(details.lock_name.as_deref(), Some("M3trik Lock"));
        assert_eq!(details.expires_at, None);
    }

    #[tokio::test]
    async fn test_outcome_address_is_canonical() {
        let (checker, _) = checker_over(MockReader::default());
        let outcome = checker.check(&OWNER.to_lowercase()).await.unwrap();

        assert_eq!(outcome.address.to_checksum(None), OWNER);
    }
}
