//! Core value types: connection state, accounts, messages and results.
//!
//! Message and fee shapes follow the Cosmos SDK amino/JSON conventions so
//! they can be handed to a wallet's signer unchanged.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::amount::Amount;
use crate::traits::SigningClient;

/// Connection status of the wallet session.
///
/// Exactly one variant is active at a time. Transitions happen only through
/// wallet lifecycle events.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ConnectionState {
    #[default]
    Disconnected,
    Connecting,
    Connected,
    /// Connection attempt failed with the wallet's reason.
    Error(String),
}

impl ConnectionState {
    pub fn is_connected(&self) -> bool {
        matches!(self, Self::Connected)
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disconnected => f.write_str("Disconnected"),
            Self::Connecting => f.write_str("Connecting"),
            Self::Connected => f.write_str("Connected"),
            Self::Error(reason) => write!(f, "Error({reason})"),
        }
    }
}

/// A connected wallet account.
///
/// Only valid while the owning session stays `Connected`; the signer must not
/// be used after the session leaves that state.
#[derive(Clone)]
pub struct Account {
    /// Bech32 account address.
    pub address: String,
    /// Sign-and-broadcast capability bound to this account.
    pub signer: Arc<dyn SigningClient>,
    /// Query endpoint suggested by the wallet, if any.
    pub rpc_endpoint: Option<String>,
}

impl Account {
    pub fn new(address: impl Into<String>, signer: Arc<dyn SigningClient>) -> Self {
        Self {
            address: address.into(),
            signer,
            rpc_endpoint: None,
        }
    }

    pub fn with_rpc_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.rpc_endpoint = Some(endpoint.into());
        self
    }
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("address", &self.address)
            .field("signer", &"<signing capability>")
            .field("rpc_endpoint", &self.rpc_endpoint)
            .finish()
    }
}

/// A denomination and amount pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coin {
    pub denom: String,
    pub amount: Amount,
}

impl Coin {
    pub fn new(denom: impl Into<String>, amount: impl Into<Amount>) -> Self {
        Self {
            denom: denom.into(),
            amount: amount.into(),
        }
    }
}

/// Fee attached to a transaction: coins paid plus a gas limit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StdFee {
    pub amount: Vec<Coin>,
    /// Gas limit, encoded as a decimal string on the wire.
    #[serde(serialize_with = "gas_to_string", deserialize_with = "gas_from_string")]
    pub gas: u64,
}

fn gas_to_string<S: Serializer>(gas: &u64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(gas)
}

fn gas_from_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    let s = String::deserialize(deserializer)?;
    s.parse().map_err(serde::de::Error::custom)
}

/// Bank send message body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MsgSend {
    pub from_address: String,
    pub to_address: String,
    pub amount: Vec<Coin>,
}

/// A message ready for signing, tagged with its protobuf type URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "typeUrl", content = "value")]
pub enum Msg {
    #[serde(rename = "/cosmos.bank.v1beta1.MsgSend")]
    Send(MsgSend),
}

impl Msg {
    pub fn type_url(&self) -> &'static str {
        match self {
            Msg::Send(_) => crate::constants::MSG_SEND_TYPE_URL,
        }
    }
}

/// Parameters of a single bank transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRequest {
    pub from_address: String,
    pub to_address: String,
    pub denom: String,
    pub amount: Amount,
    pub fee_amount: Amount,
    pub gas_limit: u64,
}

impl TransferRequest {
    pub fn msg(&self) -> Msg {
        Msg::Send(MsgSend {
            from_address: self.from_address.clone(),
            to_address: self.to_address.clone(),
            amount: vec![Coin::new(self.denom.clone(), self.amount.clone())],
        })
    }

    pub fn fee(&self) -> StdFee {
        StdFee {
            amount: vec![Coin::new(self.denom.clone(), self.fee_amount.clone())],
            gas: self.gas_limit,
        }
    }
}

/// Balance of one denomination (or CW20 contract) for an address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceResult {
    pub denom: String,
    pub amount: Amount,
}

/// Acknowledgement returned by the wallet after broadcast and inclusion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TxResponse {
    /// ABCI result code; zero means the transaction executed.
    pub code: u32,
    pub height: u64,
    pub transaction_hash: String,
    #[serde(default)]
    pub raw_log: String,
    #[serde(default)]
    pub gas_used: u64,
    #[serde(default)]
    pub gas_wanted: u64,
}

impl TxResponse {
    pub fn is_ok(&self) -> bool {
        self.code == 0
    }

    /// Pretty JSON for display.
    pub fn display(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| format!("{self:?}"))
    }
}

/// Result of one sign-and-broadcast attempt.
///
/// A user cancellation is not a failure and must be shown differently from a
/// broadcast error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferOutcome {
    Success(TxResponse),
    RejectedBySigner,
    BroadcastFailed(String),
}
