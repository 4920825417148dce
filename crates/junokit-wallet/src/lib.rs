//! # junokit-wallet: wallet session and transaction flows.
//!
//! Tracks the connection to an external wallet, gates balance queries and
//! self-transfers on that connection, and owns the state a UI renders.
//!
//! # Modules
//!
//! - [`session`]: `WalletSession` state machine and change listeners
//! - [`flow`]: `TransactionFlow`: fetch balance, send self-transfer
//! - [`dashboard`]: `Dashboard` controller with stale-result discarding

pub mod dashboard;
pub mod flow;
pub mod session;

pub use dashboard::{Applied, Dashboard, DashboardView, Notice};
pub use flow::TransactionFlow;
pub use session::{ListenerId, SessionTicket, WalletEvent, WalletSession};
