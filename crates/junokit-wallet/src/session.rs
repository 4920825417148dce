//! Wallet session: connection state tracking.
//!
//! [`WalletSession`] mirrors the lifecycle reported by an external wallet.
//! State only changes through [`WalletSession::apply`] with a
//! [`WalletEvent`]; flows read it and never set it.
//!
//! ```text
//!  Disconnected ──ConnectRequested──▶ Connecting ──Connected──▶ Connected
//!       ▲   ▲                          │      │                     │
//!       │   └───────Disconnected───────┘    Failed                  │
//!       │                                     ▼                     │
//!       └──────Acknowledged/Disconnected── Error ◀── (retry via ConnectRequested)
//!       └──────────────────────────Disconnected─────────────────────┘
//! ```
//!
//! Every entry into or exit from `Connected` bumps the session epoch. A
//! [`SessionTicket`] captured before an async call tells the caller whether
//! the result still belongs to the current connection.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::{Mutex, RwLock};
use tracing::{info, warn};

use junokit_core::error::SessionError;
use junokit_core::traits::WalletProvider;
use junokit_core::types::{Account, ConnectionState};

/// Lifecycle events reported by the wallet collaborator.
#[derive(Debug, Clone)]
pub enum WalletEvent {
    /// The user asked to connect (or retry).
    ConnectRequested,
    /// The wallet granted an account.
    Connected(Account),
    /// The user disconnected, closed the prompt, or the wallet revoked access.
    Disconnected,
    /// The connection attempt failed.
    Failed(String),
    /// The user dismissed an error.
    Acknowledged,
}

impl WalletEvent {
    fn label(&self) -> &'static str {
        match self {
            Self::ConnectRequested => "ConnectRequested",
            Self::Connected(_) => "Connected",
            Self::Disconnected => "Disconnected",
            Self::Failed(_) => "Failed",
            Self::Acknowledged => "Acknowledged",
        }
    }
}

/// Snapshot of the session epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionTicket(u64);

/// Handle returned by [`WalletSession::on_state_change`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Arc<dyn Fn(&ConnectionState) + Send + Sync>;

struct Inner {
    state: ConnectionState,
    account: Option<Account>,
    epoch: u64,
}

/// Connection state and, while connected, the granted account.
pub struct WalletSession {
    wallet_name: String,
    inner: RwLock<Inner>,
    listeners: Mutex<Vec<(ListenerId, Listener)>>,
    next_listener: AtomicU64,
}

impl WalletSession {
    pub fn new(wallet_name: impl Into<String>) -> Self {
        Self {
            wallet_name: wallet_name.into(),
            inner: RwLock::new(Inner {
                state: ConnectionState::Disconnected,
                account: None,
                epoch: 0,
            }),
            listeners: Mutex::new(Vec::new()),
            next_listener: AtomicU64::new(0),
        }
    }

    pub fn wallet_name(&self) -> &str {
        &self.wallet_name
    }

    pub fn current_state(&self) -> ConnectionState {
        self.inner.read().state.clone()
    }

    /// The connected account, or `None` unless the state is `Connected`.
    pub fn current_account(&self) -> Option<Account> {
        let inner = self.inner.read();
        match inner.state {
            ConnectionState::Connected => inner.account.clone(),
            _ => None,
        }
    }

    /// Address of the connected account, if any.
    pub fn address(&self) -> Option<String> {
        self.current_account().map(|a| a.address)
    }

    pub fn ticket(&self) -> SessionTicket {
        SessionTicket(self.inner.read().epoch)
    }

    /// Whether no connect or disconnect happened since `ticket` was taken.
    pub fn is_current(&self, ticket: SessionTicket) -> bool {
        self.inner.read().epoch == ticket.0
    }

    /// Register a callback invoked with the new state after every transition.
    pub fn on_state_change<F>(&self, listener: F) -> ListenerId
    where
        F: Fn(&ConnectionState) + Send + Sync + 'static,
    {
        let id = ListenerId(self.next_listener.fetch_add(1, Ordering::Relaxed));
        self.listeners.lock().push((id, Arc::new(listener)));
        id
    }

    /// Unregister a listener. Returns `false` if it was not registered.
    pub fn remove_listener(&self, id: ListenerId) -> bool {
        let mut listeners = self.listeners.lock();
        let before = listeners.len();
        listeners.retain(|(lid, _)| *lid != id);
        listeners.len() != before
    }

    /// Apply a wallet lifecycle event.
    ///
    /// Illegal transitions (for example `Disconnected` straight to
    /// `Connected`) are rejected and leave the state untouched.
    pub fn apply(&self, event: WalletEvent) -> Result<ConnectionState, SessionError> {
        let new_state = {
            let mut inner = self.inner.write();
            let label = event.label();
            let current = inner.state.clone();
            let next = match (current, event) {
                (ConnectionState::Disconnected, WalletEvent::ConnectRequested)
                | (ConnectionState::Error(_), WalletEvent::ConnectRequested) => {
                    ConnectionState::Connecting
                }
                (ConnectionState::Connecting, WalletEvent::Connected(account)) => {
                    info!(wallet = %self.wallet_name, address = %account.address, "Wallet connected");
                    inner.account = Some(account);
                    inner.epoch += 1;
                    ConnectionState::Connected
                }
                (ConnectionState::Connecting, WalletEvent::Failed(reason)) => {
                    warn!(wallet = %self.wallet_name, %reason, "Wallet connection failed");
                    ConnectionState::Error(reason)
                }
                (ConnectionState::Connecting, WalletEvent::Disconnected) => {
                    ConnectionState::Disconnected
                }
                (ConnectionState::Connected, WalletEvent::Disconnected) => {
                    info!(wallet = %self.wallet_name, "Wallet disconnected");
                    inner.account = None;
                    inner.epoch += 1;
                    ConnectionState::Disconnected
                }
                (ConnectionState::Error(_), WalletEvent::Acknowledged)
                | (ConnectionState::Error(_), WalletEvent::Disconnected) => {
                    ConnectionState::Disconnected
                }
                (from, _) => {
                    warn!(wallet = %self.wallet_name, from = %from, event = label, "Rejected wallet transition");
                    return Err(SessionError::InvalidTransition {
                        from: from.to_string(),
                        event: label.to_string(),
                    });
                }
            };
            inner.state = next.clone();
            next
        };

        // Listeners run outside the state lock so they may read the session.
        let listeners: Vec<Listener> = self
            .listeners
            .lock()
            .iter()
            .map(|(_, l)| Arc::clone(l))
            .collect();
        for listener in listeners {
            listener(&new_state);
        }

        Ok(new_state)
    }

    /// Run the full connect handshake against `provider`.
    pub async fn connect(
        &self,
        provider: &dyn WalletProvider,
        chain_id: &str,
    ) -> Result<ConnectionState, SessionError> {
        self.apply(WalletEvent::ConnectRequested)?;
        info!(
            wallet = %self.wallet_name,
            provider = %provider.name(),
            chain_id,
            "Requesting wallet connection"
        );
        match provider.enable(chain_id).await {
            Ok(account) => self.apply(WalletEvent::Connected(account)),
            Err(e) => self.apply(WalletEvent::Failed(e.to_string())),
        }
    }

    /// Disconnect from `provider` and reflect it locally.
    pub async fn disconnect(
        &self,
        provider: &dyn WalletProvider,
    ) -> Result<ConnectionState, SessionError> {
        provider.disconnect().await;
        self.apply(WalletEvent::Disconnected)
    }
}
