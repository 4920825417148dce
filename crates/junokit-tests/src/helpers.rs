//! Shared test helpers: hand-written collaborators and session builders.
//!
//! `mockall` doubles from `junokit-core` cover call-count expectations; the
//! types here cover behaviour that mocks express poorly (recording endpoints,
//! pausing a query mid-flight, scripted wallets).

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::Notify;

use junokit_core::config::ChainConfig;
use junokit_core::error::{QueryError, SignerError, WalletError};
use junokit_core::traits::{BalanceQuery, MockSigningClient, SigningClient, WalletProvider};
use junokit_core::types::{Account, Msg, StdFee, TxResponse};
use junokit_wallet::{TransactionFlow, WalletEvent, WalletSession};

/// One recorded balance query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryCall {
    pub endpoint: String,
    pub address: String,
    pub denom_or_contract: String,
}

/// Balance query that records every call and answers with a fixed amount.
#[derive(Default)]
pub struct RecordingQuery {
    pub answer: Option<String>,
    pub calls: Mutex<Vec<QueryCall>>,
}

impl RecordingQuery {
    pub fn answering(amount: Option<&str>) -> Self {
        Self {
            answer: amount.map(str::to_string),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<QueryCall> {
        self.calls.lock().clone()
    }

    fn record(&self, endpoint: &str, address: &str, key: &str) -> Option<String> {
        self.calls.lock().push(QueryCall {
            endpoint: endpoint.to_string(),
            address: address.to_string(),
            denom_or_contract: key.to_string(),
        });
        self.answer.clone()
    }
}

#[async_trait]
impl BalanceQuery for RecordingQuery {
    async fn bank_balance(
        &self,
        endpoint: &str,
        address: &str,
        denom: &str,
    ) -> Result<Option<String>, QueryError> {
        Ok(self.record(endpoint, address, denom))
    }

    async fn cw20_balance(
        &self,
        endpoint: &str,
        contract: &str,
        address: &str,
    ) -> Result<Option<String>, QueryError> {
        Ok(self.record(endpoint, address, contract))
    }
}

/// Balance query that signals `started` on entry and then blocks until
/// `release` is notified. Lets a test change the session mid-flight.
pub struct GatedQuery {
    pub amount: String,
    pub started: Arc<Notify>,
    pub release: Arc<Notify>,
}

impl GatedQuery {
    pub fn new(amount: &str) -> Self {
        Self {
            amount: amount.to_string(),
            started: Arc::new(Notify::new()),
            release: Arc::new(Notify::new()),
        }
    }

    async fn wait(&self) -> Result<Option<String>, QueryError> {
        self.started.notify_one();
        self.release.notified().await;
        Ok(Some(self.amount.clone()))
    }
}

#[async_trait]
impl BalanceQuery for GatedQuery {
    async fn bank_balance(
        &self,
        _endpoint: &str,
        _address: &str,
        _denom: &str,
    ) -> Result<Option<String>, QueryError> {
        self.wait().await
    }

    async fn cw20_balance(
        &self,
        _endpoint: &str,
        _contract: &str,
        _address: &str,
    ) -> Result<Option<String>, QueryError> {
        self.wait().await
    }
}

/// Signer that signals `started` when asked to sign and then holds the
/// broadcast until `release` is notified.
pub struct GatedSigner {
    pub response: TxResponse,
    pub started: Arc<Notify>,
    pub release: Arc<Notify>,
    pub broadcasts: AtomicUsize,
}

impl GatedSigner {
    pub fn new(response: TxResponse) -> Self {
        Self {
            response,
            started: Arc::new(Notify::new()),
            release: Arc::new(Notify::new()),
            broadcasts: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl SigningClient for GatedSigner {
    async fn sign_and_broadcast(
        &self,
        _signer_address: &str,
        _msgs: &[Msg],
        _fee: &StdFee,
        _memo: &str,
    ) -> Result<TxResponse, SignerError> {
        self.started.notify_one();
        self.release.notified().await;
        self.broadcasts.fetch_add(1, Ordering::SeqCst);
        Ok(self.response.clone())
    }
}

/// Wallet provider that grants a fixed account or fails with a fixed error.
pub struct ScriptedWallet {
    pub result: Result<Account, WalletError>,
    pub enables: AtomicUsize,
    pub disconnects: AtomicUsize,
}

impl ScriptedWallet {
    pub fn granting(account: Account) -> Self {
        Self {
            result: Ok(account),
            enables: AtomicUsize::new(0),
            disconnects: AtomicUsize::new(0),
        }
    }

    pub fn failing(err: WalletError) -> Self {
        Self {
            result: Err(err),
            enables: AtomicUsize::new(0),
            disconnects: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl WalletProvider for ScriptedWallet {
    fn name(&self) -> String {
        "scripted".to_string()
    }

    async fn enable(&self, _chain_id: &str) -> Result<Account, WalletError> {
        self.enables.fetch_add(1, Ordering::SeqCst);
        self.result.clone()
    }

    async fn disconnect(&self) {
        self.disconnects.fetch_add(1, Ordering::SeqCst);
    }
}

/// A session driven through Connecting into Connected with `account`.
pub fn connected_session(account: Account) -> Arc<WalletSession> {
    let session = Arc::new(WalletSession::new("test-wallet"));
    session.apply(WalletEvent::ConnectRequested).unwrap();
    session.apply(WalletEvent::Connected(account)).unwrap();
    session
}

/// Account at `address` whose signer is `signer`.
pub fn account_with(address: &str, signer: impl SigningClient + 'static) -> Account {
    Account::new(address, Arc::new(signer))
}

/// Account whose signer must never be called.
pub fn idle_account(address: &str) -> Account {
    let mut signer = MockSigningClient::new();
    signer.expect_sign_and_broadcast().times(0);
    account_with(address, signer)
}

pub fn flow_with(query: Arc<dyn BalanceQuery>) -> TransactionFlow {
    TransactionFlow::new(Arc::new(ChainConfig::default()), query)
}
