//! Trait interfaces for external collaborators.
//!
//! These traits are the seams between junokit and the outside world:
//! - [`WalletProvider`]: browser-extension style wallet that grants accounts
//! - [`SigningClient`]: sign-and-broadcast primitive bound to one account
//! - [`BalanceQuery`]: read-only chain queries against an endpoint (junokit-rpc implements)
//!
//! With the `mocks` feature each trait gets a `mockall` double
//! (`MockWalletProvider`, `MockSigningClient`, `MockBalanceQuery`).

use async_trait::async_trait;

#[cfg(feature = "mocks")]
use mockall::automock;

use crate::error::{QueryError, SignerError, WalletError};
use crate::types::{Account, Msg, StdFee, TxResponse};

/// Wallet capability that holds keys and authorizes accounts.
#[cfg_attr(feature = "mocks", automock)]
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Human-readable wallet name (e.g. "keplr-extension").
    fn name(&self) -> String;

    /// Ask the wallet to enable `chain_id` and return the granted account.
    ///
    /// May prompt the user; resolves once they approve or decline.
    async fn enable(&self, chain_id: &str) -> Result<Account, WalletError>;

    /// Release the connection. Never fails from the caller's point of view.
    async fn disconnect(&self);
}

/// Signs messages with the account's key and submits them to the chain.
#[cfg_attr(feature = "mocks", automock)]
#[async_trait]
pub trait SigningClient: Send + Sync {
    /// Sign `msgs` with `fee`, broadcast, and wait for inclusion.
    ///
    /// Returns [`SignerError::Rejected`] when the user declines the prompt.
    async fn sign_and_broadcast(
        &self,
        signer_address: &str,
        msgs: &[Msg],
        fee: &StdFee,
        memo: &str,
    ) -> Result<TxResponse, SignerError>;
}

/// Read-only balance queries. Amounts are returned as raw decimal strings;
/// parsing is left to the caller.
#[cfg_attr(feature = "mocks", automock)]
#[async_trait]
pub trait BalanceQuery: Send + Sync {
    /// Bank balance of `denom` held by `address`. `None` if never held.
    async fn bank_balance(
        &self,
        endpoint: &str,
        address: &str,
        denom: &str,
    ) -> Result<Option<String>, QueryError>;

    /// CW20 `balance` smart query against `contract`. `None` if absent.
    async fn cw20_balance(
        &self,
        endpoint: &str,
        contract: &str,
        address: &str,
    ) -> Result<Option<String>, QueryError>;
}
