//! # junokit-core
//! Foundation types, collaborator traits and configuration for junokit.
//!
//! # Modules
//!
//! - [`amount`]: arbitrary-precision base-unit `Amount`
//! - [`config`]: `ChainConfig` loading and validation
//! - [`constants`]: chain defaults and demo transfer parameters
//! - [`error`]: error enums shared across crates
//! - [`logging`]: tracing subscriber bootstrap
//! - [`traits`]: wallet, signer and chain query seams
//! - [`types`]: connection state, messages, fees, results

pub mod amount;
pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod traits;
pub mod types;

pub use amount::Amount;
pub use config::{BalanceSource, ChainConfig, TransferDefaults};
pub use error::{AmountError, ConfigError, FlowError, QueryError, SessionError, SignerError, WalletError};
pub use traits::{BalanceQuery, SigningClient, WalletProvider};
pub use types::{
    Account, BalanceResult, Coin, ConnectionState, Msg, MsgSend, StdFee, TransferOutcome,
    TransferRequest, TxResponse,
};
