//! Single controller owning the UI-visible state.
//!
//! [`Dashboard`] is the one place that holds the displayed connection status,
//! balance and last transaction response. Presentation code reads snapshots
//! through [`Dashboard::view`]; nothing else mutates them.
//!
//! Each operation captures a [`SessionTicket`](crate::session::SessionTicket)
//! before awaiting the network. If the wallet connects or disconnects while
//! the call is in flight, the result is dropped and the view keeps its prior
//! (stale but valid) values.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use tracing::warn;

use junokit_core::amount::Amount;
use junokit_core::config::BalanceSource;
use junokit_core::error::FlowError;
use junokit_core::types::{BalanceResult, ConnectionState, TransferOutcome};

use crate::flow::TransactionFlow;
use crate::session::{ListenerId, WalletSession};

/// User-facing notice left by the last operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// The user declined to sign.
    Cancelled,
    Failed(String),
}

/// Snapshot of everything the UI renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardView {
    pub state: ConnectionState,
    pub balance: Amount,
    /// Denomination (or CW20 contract) the balance is expressed in.
    pub denom: String,
    /// Pretty JSON of the last successful broadcast.
    pub last_response: Option<String>,
    pub notice: Option<Notice>,
}

/// Whether an operation's result reached the view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Applied<T> {
    Applied(T),
    /// The session changed while the call was in flight.
    Discarded,
}

/// Clears the flag on drop so a failed or cancelled call never wedges it.
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool, what: &'static str) -> Result<Self, FlowError> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map(|_| Self(flag))
            .map_err(|_| FlowError::OperationInFlight(what))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct Dashboard {
    session: Arc<WalletSession>,
    flow: TransactionFlow,
    view: Arc<Mutex<DashboardView>>,
    listener: ListenerId,
    balance_busy: AtomicBool,
    send_busy: AtomicBool,
}

impl Dashboard {
    pub fn new(session: Arc<WalletSession>, flow: TransactionFlow) -> Self {
        let denom = match &flow.config().balance_source {
            BalanceSource::Bank => flow.config().denom.clone(),
            BalanceSource::Cw20 { contract } => contract.clone(),
        };
        let view = Arc::new(Mutex::new(DashboardView {
            state: session.current_state(),
            balance: Amount::zero(),
            denom,
            last_response: None,
            notice: None,
        }));

        let sink = Arc::clone(&view);
        let listener = session.on_state_change(move |state| sink.lock().state = state.clone());

        Self {
            session,
            flow,
            view,
            listener,
            balance_busy: AtomicBool::new(false),
            send_busy: AtomicBool::new(false),
        }
    }

    pub fn session(&self) -> &Arc<WalletSession> {
        &self.session
    }

    pub fn view(&self) -> DashboardView {
        self.view.lock().clone()
    }

    /// Balance formatted for display, e.g. `"1.5 JUNO"`.
    pub fn balance_text(&self) -> String {
        let view = self.view.lock();
        let config = self.flow.config();
        if view.denom == config.denom {
            format!("{} {}", view.balance.format_units(config.decimals), config.display_denom)
        } else {
            format!("{} {}", view.balance, view.denom)
        }
    }

    /// Fetch the balance of `target` and show it if still relevant.
    pub async fn refresh_balance(
        &self,
        target: &str,
    ) -> Result<Applied<BalanceResult>, FlowError> {
        let _busy = InFlight::acquire(&self.balance_busy, "balance query")?;
        let ticket = self.session.ticket();

        let result = self.flow.fetch_balance(&self.session, target).await;

        // Ticket must be checked with the view locked.
        let mut view = self.view.lock();
        if !self.session.is_current(ticket) {
            warn!(address = target, "Session changed during balance query, discarding result");
            return Ok(Applied::Discarded);
        }
        match result {
            Ok(balance) => {
                view.balance = balance.amount.clone();
                view.denom = balance.denom.clone();
                view.notice = None;
                Ok(Applied::Applied(balance))
            }
            Err(e) => {
                view.notice = Some(Notice::Failed(e.to_string()));
                Err(e)
            }
        }
    }

    /// Fetch the connected account's own balance.
    pub async fn refresh_own_balance(&self) -> Result<Applied<BalanceResult>, FlowError> {
        let address = self.session.address().ok_or(FlowError::ConnectionRequired)?;
        self.refresh_balance(&address).await
    }

    /// Send the demo self-transfer and record its outcome.
    pub async fn send_to_self(&self) -> Result<Applied<TransferOutcome>, FlowError> {
        let _busy = InFlight::acquire(&self.send_busy, "self-transfer")?;
        let ticket = self.session.ticket();

        let outcome = self.flow.send_self_transfer(&self.session).await?;

        let mut view = self.view.lock();
        if !self.session.is_current(ticket) {
            warn!(?outcome, "Session changed during self-transfer, discarding result");
            return Ok(Applied::Discarded);
        }
        match &outcome {
            TransferOutcome::Success(resp) => {
                view.last_response = Some(resp.display());
                view.notice = None;
            }
            TransferOutcome::RejectedBySigner => view.notice = Some(Notice::Cancelled),
            TransferOutcome::BroadcastFailed(reason) => {
                view.notice = Some(Notice::Failed(reason.clone()))
            }
        }
        Ok(Applied::Applied(outcome))
    }
}

impl Drop for Dashboard {
    fn drop(&mut self) {
        self.session.remove_listener(self.listener);
    }
}
