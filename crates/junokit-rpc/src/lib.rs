//! # junokit-rpc: chain query capability over the Cosmos LCD REST API.
//!
//! [`LcdClient`] implements [`BalanceQuery`](junokit_core::traits::BalanceQuery)
//! for native bank balances and CW20 token balances.

pub mod lcd;

pub use lcd::{LcdClient, bank_balance_url, cw20_balance_url};
