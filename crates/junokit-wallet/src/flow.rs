//! Balance queries and self-transfers gated on the wallet session.
//!
//! [`TransactionFlow`] never changes connection state. It re-reads the
//! session right before acting so it never works from a stale snapshot.

use std::sync::Arc;

use tracing::{debug, info, warn};

use junokit_core::amount::Amount;
use junokit_core::config::{BalanceSource, ChainConfig};
use junokit_core::error::{FlowError, SignerError};
use junokit_core::traits::BalanceQuery;
use junokit_core::types::{BalanceResult, TransferOutcome, TransferRequest};

use crate::session::WalletSession;

/// Memo attached to self-transfers.
pub const SELF_TRANSFER_MEMO: &str = "";

/// Runs balance queries and transfers against a [`WalletSession`].
#[derive(Clone)]
pub struct TransactionFlow {
    config: Arc<ChainConfig>,
    query: Arc<dyn BalanceQuery>,
}

impl TransactionFlow {
    pub fn new(config: Arc<ChainConfig>, query: Arc<dyn BalanceQuery>) -> Self {
        Self { config, query }
    }

    pub fn config(&self) -> &ChainConfig {
        &self.config
    }

    /// Query the balance of `target`.
    ///
    /// Uses the wallet-supplied endpoint when connected and falls back to
    /// [`ChainConfig::fallback_endpoint`] otherwise. An address that never
    /// held the denomination reports zero.
    pub async fn fetch_balance(
        &self,
        session: &WalletSession,
        target: &str,
    ) -> Result<BalanceResult, FlowError> {
        let account = session.current_account();
        if account.is_none() && self.config.query_requires_connection {
            warn!(address = target, "Balance query refused: wallet not connected");
            return Err(FlowError::ConnectionRequired);
        }

        let endpoint = match account.and_then(|a| a.rpc_endpoint) {
            Some(endpoint) => endpoint,
            None => {
                let fallback = self.config.fallback_endpoint();
                info!(endpoint = %fallback, "No wallet-supplied endpoint, using fallback");
                fallback
            }
        };

        let (denom, raw) = match &self.config.balance_source {
            BalanceSource::Bank => {
                let raw = self
                    .query
                    .bank_balance(&endpoint, target, &self.config.denom)
                    .await?;
                (self.config.denom.clone(), raw)
            }
            BalanceSource::Cw20 { contract } => {
                let raw = self.query.cw20_balance(&endpoint, contract, target).await?;
                (contract.clone(), raw)
            }
        };

        let amount = match raw {
            Some(s) => s.parse::<Amount>()?,
            None => Amount::zero(),
        };
        debug!(address = target, %denom, %amount, "Balance fetched");
        Ok(BalanceResult { denom, amount })
    }

    /// Build the fixed self-transfer for `address`.
    pub fn build_self_transfer(&self, address: &str) -> TransferRequest {
        TransferRequest {
            from_address: address.to_string(),
            to_address: address.to_string(),
            denom: self.config.denom.clone(),
            amount: self.config.transfer.amount.clone(),
            fee_amount: self.config.transfer.fee_amount.clone(),
            gas_limit: self.config.transfer.gas_limit,
        }
    }

    /// Sign and broadcast a transfer from the connected account to itself.
    ///
    /// Broadcasts at most once per call. A user who declines to sign gets
    /// [`TransferOutcome::RejectedBySigner`], not an error.
    pub async fn send_self_transfer(
        &self,
        session: &WalletSession,
    ) -> Result<TransferOutcome, FlowError> {
        let Some(account) = session.current_account() else {
            warn!(state = %session.current_state(), "Transfer refused: wallet not connected");
            return Err(FlowError::ConnectionRequired);
        };

        let request = self.build_self_transfer(&account.address);
        let msg = request.msg();
        debug!(?request, type_url = msg.type_url(), "Built self-transfer");

        let outcome = match account
            .signer
            .sign_and_broadcast(
                &account.address,
                &[msg],
                &request.fee(),
                SELF_TRANSFER_MEMO,
            )
            .await
        {
            Ok(resp) if resp.is_ok() => TransferOutcome::Success(resp),
            Ok(resp) => TransferOutcome::BroadcastFailed(format!(
                "code {}: {}",
                resp.code, resp.raw_log
            )),
            Err(SignerError::Rejected) => TransferOutcome::RejectedBySigner,
            Err(SignerError::Broadcast(reason)) => TransferOutcome::BroadcastFailed(reason),
        };

        match &outcome {
            TransferOutcome::Success(resp) => {
                info!(tx = %resp.transaction_hash, height = resp.height, "Self-transfer included")
            }
            TransferOutcome::RejectedBySigner => info!("Self-transfer declined by user"),
            TransferOutcome::BroadcastFailed(reason) => {
                warn!(%reason, "Self-transfer broadcast failed")
            }
        }
        Ok(outcome)
    }
}
