//! Read-only client for the lock contract.
//!
//! This module provides an alloy-based client for querying key state from
//! an Unlock-style lock contract over a JSON-RPC endpoint. Every query is a
//! view call; the gate never signs or submits anything.

use crate::lock::error::LockError;
use alloy::primitives::{Address, U256};
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::sol;
use async_trait::async_trait;
use log::{debug, info};
use url::Url;

sol! {
    #[sol(rpc)]
    interface IPublicLock {
        function getHasValidKey(address keyOwner) external view returns (bool isValid);
        function balanceOf(address keyOwner) external view returns (uint256 balance);
        function keyExpirationTimestampFor(address keyOwner) external view returns (uint256 timestamp);
        function name() external view returns (string lockName);
    }
}

/// The view queries the checker sequences.
///
/// This trait abstracts the chain so the decision tree can be exercised
/// against a mock reader in tests.
#[async_trait]
pub trait LockReader: Send + Sync {
    /// Current chain head, used for health reporting.
    async fn current_block(&self) -> Result<u64, LockError>;

    /// Whether the address holds a currently valid key.
    async fn has_valid_key(&self, owner: Address) -> Result<bool, LockError>;

    /// Number of keys the address holds, valid or not.
    async fn key_balance(&self, owner: Address) -> Result<U256, LockError>;

    /// Unix timestamp at which the address's key lapses.
    async fn key_expiration(&self, owner: Address) -> Result<U256, LockError>;

    /// Display name of the lock contract.
    async fn lock_name(&self) -> Result<String, LockError>;
}

/// Lock-contract reader over a JSON-RPC HTTP provider.
pub struct LockClient {
    /// The RPC endpoint this client talks to.
    rpc_url: Url,

    /// Address of the lock contract.
    lock_address: Address,

    /// Type-erased alloy provider; HTTP transport, no signer.
    provider: DynProvider,
}

impl LockClient {
    /// Create a new reader for the given endpoint and lock contract.
    ///
    /// The provider is stateless HTTP; the first network traffic happens on
    /// the first query.
    pub fn new(rpc_url: Url, lock_address: Address) -> Self {
        info!("Lock reader bound to {} via {}", lock_address, rpc_url);

        let provider = ProviderBuilder::new().connect_http(rpc_url.clone()).erased();

        Self {
            rpc_url,
            lock_address,
            provider,
        }
    }
}

#[async_trait]
impl LockReader for LockClient {
    async fn current_block(&self) -> Result<u64, LockError> {
        let block = self.provider.get_block_number().await?;
        debug!("Chain head at block {}", block);
        Ok(block)
    }

    async fn has_valid_key(&self, owner: Address) -> Result<bool, LockError> {
        let lock = IPublicLock::new(self.lock_address, self.provider.clone());
        let valid = lock.getHasValidKey(owner).call().await?;
        debug!("getHasValidKey({}) -> {}", owner, valid);
        Ok(valid)
    }

    async fn key_balance(&self, owner: Address) -> Result<U256, LockError> {
        let lock = IPublicLock::new(self.lock_address, self.provider.clone());
        let balance = lock.balanceOf(owner).call().await?;
        debug!("balanceOf({}) -> {}", owner, balance);
        Ok(balance)
    }

    async fn key_expiration(&self, owner: Address) -> Result<U256, LockError> {
        let lock = IPublicLock::new(self.lock_address, self.provider.clone());
        let timestamp = lock.keyExpirationTimestampFor(owner).call().await?;
        debug!("keyExpirationTimestampFor({}) -> {}", owner, timestamp);
        Ok(timestamp)
    }

    async fn lock_name(&self) -> Result<String, LockError> {
        let lock = IPublicLock::new(self.lock_address, self.provider.clone());
        let name = lock.name().call().await?;
        debug!("name() -> {:?}", name);
        Ok(name)
    }
}

impl std::fmt::Debug for LockClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LockClient")
            .field("rpc_url", &self.rpc_url.as_str())
            .field("lock_address", &self.lock_address)
            .finish()
    }
}
