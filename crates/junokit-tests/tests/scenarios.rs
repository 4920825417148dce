//! End-to-end scenarios for the wallet session, transaction flow and dashboard.
//!
//! Each test wires real `WalletSession` / `TransactionFlow` / `Dashboard`
//! instances to test doubles standing in for the wallet extension and the
//! chain query endpoint.

use std::sync::Arc;
use std::sync::atomic::Ordering;

use junokit_core::amount::Amount;
use junokit_core::config::ChainConfig;
use junokit_core::error::{FlowError, SignerError, WalletError};
use junokit_core::traits::MockSigningClient;
use junokit_core::types::{Account, ConnectionState, Msg, TransferOutcome, TxResponse};
use junokit_tests::helpers::*;
use junokit_wallet::{Applied, Dashboard, Notice, TransactionFlow, WalletEvent, WalletSession};

fn echoed_response() -> TxResponse {
    TxResponse {
        code: 0,
        height: 8_123_456,
        transaction_hash: "E3B0C44298FC1C149AFBF4C8996FB92427AE41E4649B934CA495991B7852B855".into(),
        raw_log: "[]".into(),
        gas_used: 71_002,
        gas_wanted: 86_364,
    }
}

// ======================================================================
// Scenario: connected self-transfer is built from the fixed demo values
// and the signer's response comes back verbatim.
// ======================================================================

#[tokio::test]
async fn connected_self_transfer_succeeds_with_echoed_response() {
    let mut signer = MockSigningClient::new();
    signer
        .expect_sign_and_broadcast()
        .withf(|signer_address, msgs, fee, _memo| {
            let Msg::Send(send) = &msgs[0];
            let fee_json = serde_json::to_string(fee).unwrap();
            signer_address == "addr1"
                && msgs.len() == 1
                && send.from_address == "addr1"
                && send.to_address == "addr1"
                && send.amount.len() == 1
                && send.amount[0].denom == "ujuno"
                && send.amount[0].amount == Amount::from(1_000u64)
                && fee_json == r#"{"amount":[{"denom":"ujuno","amount":"2000"}],"gas":"86364"}"#
        })
        .times(1)
        .returning(|_, _, _, _| Ok(echoed_response()));

    let session = connected_session(account_with("addr1", signer));
    let flow = flow_with(Arc::new(RecordingQuery::default()));

    let outcome = flow.send_self_transfer(&session).await.unwrap();
    assert_eq!(outcome, TransferOutcome::Success(echoed_response()));
}

// ======================================================================
// Scenario: every non-connected state refuses to transfer and never
// touches the signer.
// ======================================================================

#[tokio::test]
async fn disconnected_transfer_is_refused_without_side_effects() {
    let session = connected_session(idle_account("addr1"));
    session.apply(WalletEvent::Disconnected).unwrap();

    let flow = flow_with(Arc::new(RecordingQuery::default()));
    let err = flow.send_self_transfer(&session).await.unwrap_err();
    assert_eq!(err, FlowError::ConnectionRequired);
}

#[tokio::test]
async fn connecting_and_error_states_refuse_transfer() {
    let flow = flow_with(Arc::new(RecordingQuery::default()));

    let connecting = WalletSession::new("w");
    connecting.apply(WalletEvent::ConnectRequested).unwrap();
    assert_eq!(
        flow.send_self_transfer(&connecting).await.unwrap_err(),
        FlowError::ConnectionRequired
    );

    let errored = WalletSession::new("w");
    errored.apply(WalletEvent::ConnectRequested).unwrap();
    errored.apply(WalletEvent::Failed("extension locked".into())).unwrap();
    assert_eq!(
        flow.send_self_transfer(&errored).await.unwrap_err(),
        FlowError::ConnectionRequired
    );
}

// ======================================================================
// Scenario: signer rejection and broadcast failure stay distinguishable
// at the same call site.
// ======================================================================

#[tokio::test]
async fn rejection_is_not_a_broadcast_failure() {
    let flow = flow_with(Arc::new(RecordingQuery::default()));

    let mut declining = MockSigningClient::new();
    declining
        .expect_sign_and_broadcast()
        .times(1)
        .returning(|_, _, _, _| Err(SignerError::Rejected));
    let mut failing = MockSigningClient::new();
    failing
        .expect_sign_and_broadcast()
        .times(1)
        .returning(|_, _, _, _| Err(SignerError::Broadcast("insufficient fees".into())));

    let outcomes = [
        flow.send_self_transfer(&connected_session(account_with("addr1", declining)))
            .await
            .unwrap(),
        flow.send_self_transfer(&connected_session(account_with("addr1", failing)))
            .await
            .unwrap(),
    ];

    assert!(matches!(outcomes[0], TransferOutcome::RejectedBySigner));
    assert!(matches!(outcomes[1], TransferOutcome::BroadcastFailed(ref r) if r == "insufficient fees"));
}

// ======================================================================
// Scenario: balance queries
// ======================================================================

#[tokio::test]
async fn never_held_denomination_reads_zero() {
    let query = Arc::new(RecordingQuery::answering(None));
    let session = connected_session(idle_account("addr1"));
    let balance = flow_with(query).fetch_balance(&session, "addr1").await.unwrap();
    assert_eq!(balance.amount.to_string(), "0");
}

#[tokio::test]
async fn disconnected_query_uses_configured_fallback_endpoint() {
    let query = Arc::new(RecordingQuery::answering(Some("10")));
    let session = WalletSession::new("w");

    let flow = flow_with(query.clone());
    flow.fetch_balance(&session, "addr1").await.unwrap();

    let calls = query.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].endpoint, ChainConfig::default().fallback_endpoint());
    assert_eq!(calls[0].endpoint, "https://rest.cosmos.directory/juno");
    assert_eq!(calls[0].address, "addr1");
    assert_eq!(calls[0].denom_or_contract, "ujuno");
}

#[tokio::test]
async fn custom_fallback_template_is_honoured() {
    let query = Arc::new(RecordingQuery::answering(Some("10")));
    let config = ChainConfig {
        chain_name: "junotestnet".into(),
        fallback_endpoint_template: "https://lcd.internal/{chain}".into(),
        ..ChainConfig::default()
    };
    let flow = TransactionFlow::new(Arc::new(config), query.clone());

    flow.fetch_balance(&WalletSession::new("w"), "addr1").await.unwrap();
    assert_eq!(query.calls()[0].endpoint, "https://lcd.internal/junotestnet");
}

#[tokio::test]
async fn connected_wallet_endpoint_wins_over_fallback() {
    let query = Arc::new(RecordingQuery::answering(Some("10")));
    let session = connected_session(idle_account("addr1").with_rpc_endpoint("https://lcd.wallet"));

    flow_with(query.clone()).fetch_balance(&session, "addr1").await.unwrap();
    assert_eq!(query.calls()[0].endpoint, "https://lcd.wallet");
}

// ======================================================================
// Scenario: the session disconnects while a balance query is in flight;
// the late result is discarded and the displayed balance is unchanged.
// ======================================================================

#[tokio::test]
async fn balance_resolving_after_disconnect_is_discarded() {
    let query = Arc::new(GatedQuery::new("999999"));
    let (started, release) = (Arc::clone(&query.started), Arc::clone(&query.release));

    let session = connected_session(idle_account("addr1"));
    let dashboard = Dashboard::new(Arc::clone(&session), flow_with(query));
    let before = dashboard.view().balance;

    let (result, ()) = tokio::join!(dashboard.refresh_balance("addr1"), async {
        started.notified().await;
        session.apply(WalletEvent::Disconnected).unwrap();
        release.notify_one();
    });

    assert_eq!(result.unwrap(), Applied::Discarded);
    let view = dashboard.view();
    assert_eq!(view.balance, before);
    assert_eq!(view.state, ConnectionState::Disconnected);
}

#[tokio::test]
async fn balance_resolving_on_same_session_is_applied() {
    let query = Arc::new(GatedQuery::new("999999"));
    let (started, release) = (Arc::clone(&query.started), Arc::clone(&query.release));

    let session = connected_session(idle_account("addr1"));
    let dashboard = Dashboard::new(Arc::clone(&session), flow_with(query));

    let (result, ()) = tokio::join!(dashboard.refresh_balance("addr1"), async {
        started.notified().await;
        release.notify_one();
    });

    assert!(matches!(result.unwrap(), Applied::Applied(_)));
    assert_eq!(dashboard.view().balance, Amount::from(999_999u64));
}

#[tokio::test]
async fn transfer_resolving_after_disconnect_is_discarded() {
    let signer = Arc::new(GatedSigner::new(echoed_response()));
    let (started, release) = (Arc::clone(&signer.started), Arc::clone(&signer.release));

    let session = connected_session(Account::new("addr1", signer.clone()));
    let dashboard = Dashboard::new(
        Arc::clone(&session),
        flow_with(Arc::new(RecordingQuery::default())),
    );

    let (result, ()) = tokio::join!(dashboard.send_to_self(), async {
        started.notified().await;
        session.apply(WalletEvent::Disconnected).unwrap();
        release.notify_one();
    });

    assert_eq!(result.unwrap(), Applied::Discarded);
    assert_eq!(signer.broadcasts.load(Ordering::SeqCst), 1);
    let view = dashboard.view();
    assert_eq!(view.last_response, None);
    assert_eq!(view.notice, None);
    assert_eq!(view.state, ConnectionState::Disconnected);
}

#[tokio::test]
async fn concurrent_refresh_is_refused() {
    let query = Arc::new(GatedQuery::new("1"));
    let (started, release) = (Arc::clone(&query.started), Arc::clone(&query.release));

    let session = connected_session(idle_account("addr1"));
    let dashboard = Dashboard::new(session, flow_with(query));

    let (first, second) = tokio::join!(dashboard.refresh_balance("addr1"), async {
        started.notified().await;
        let second = dashboard.refresh_balance("addr1").await;
        release.notify_one();
        second
    });

    assert!(matches!(first.unwrap(), Applied::Applied(_)));
    assert_eq!(second.unwrap_err(), FlowError::OperationInFlight("balance query"));
}

// ======================================================================
// Scenario: full lifecycle through a wallet provider.
// ======================================================================

#[tokio::test]
async fn connect_query_send_disconnect() {
    junokit_core::logging::init_logging();

    let mut signer = MockSigningClient::new();
    signer
        .expect_sign_and_broadcast()
        .times(1)
        .returning(|_, _, _, _| Ok(echoed_response()));
    let wallet = ScriptedWallet::granting(account_with("juno1user", signer));

    let session = Arc::new(WalletSession::new("keplr-extension"));
    let dashboard = Dashboard::new(
        Arc::clone(&session),
        flow_with(Arc::new(RecordingQuery::answering(Some("2500000")))),
    );

    let state = session.connect(&wallet, "juno-1").await.unwrap();
    assert_eq!(state, ConnectionState::Connected);
    assert_eq!(wallet.enables.load(Ordering::SeqCst), 1);

    dashboard.refresh_own_balance().await.unwrap();
    assert_eq!(dashboard.balance_text(), "2.5 JUNO");

    let sent = dashboard.send_to_self().await.unwrap();
    assert_eq!(sent, Applied::Applied(TransferOutcome::Success(echoed_response())));
    assert_eq!(dashboard.view().last_response, Some(echoed_response().display()));

    session.disconnect(&wallet).await.unwrap();
    assert_eq!(wallet.disconnects.load(Ordering::SeqCst), 1);
    assert_eq!(dashboard.view().state, ConnectionState::Disconnected);
    // Displayed values survive the disconnect.
    assert_eq!(dashboard.balance_text(), "2.5 JUNO");
}

#[tokio::test]
async fn failed_connect_leaves_error_state_and_blocks_transfer() {
    let wallet = ScriptedWallet::failing(WalletError::NotInstalled("keplr".into()));
    let session = Arc::new(WalletSession::new("keplr-extension"));
    let dashboard = Dashboard::new(
        Arc::clone(&session),
        flow_with(Arc::new(RecordingQuery::default())),
    );

    let state = session.connect(&wallet, "juno-1").await.unwrap();
    assert!(matches!(state, ConnectionState::Error(ref r) if r.contains("keplr")));
    assert_eq!(
        dashboard.send_to_self().await.unwrap_err(),
        FlowError::ConnectionRequired
    );
    assert_eq!(dashboard.view().notice, None);

    session.apply(WalletEvent::Acknowledged).unwrap();
    assert_eq!(dashboard.view().state, ConnectionState::Disconnected);
}

#[tokio::test]
async fn declined_signature_shows_cancel_notice() {
    let mut signer = MockSigningClient::new();
    signer
        .expect_sign_and_broadcast()
        .returning(|_, _, _, _| Err(SignerError::Rejected));
    let session = connected_session(account_with("juno1user", signer));
    let dashboard = Dashboard::new(session, flow_with(Arc::new(RecordingQuery::default())));

    let sent = dashboard.send_to_self().await.unwrap();
    assert_eq!(sent, Applied::Applied(TransferOutcome::RejectedBySigner));
    let view = dashboard.view();
    assert_eq!(view.notice, Some(Notice::Cancelled));
    assert!(view.last_response.is_none());
}
