//! Cosmos LCD (REST) balance queries.

use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use junokit_core::error::QueryError;
use junokit_core::traits::BalanceQuery;
use junokit_core::types::Coin;

/// `GET /cosmos/bank/v1beta1/balances/{address}/by_denom` response.
#[derive(Debug, Deserialize)]
struct BankBalanceResponse {
    balance: Option<Coin>,
}

/// `GET /cosmwasm/wasm/v1/contract/{contract}/smart/{query}` response.
#[derive(Debug, Deserialize)]
struct SmartQueryResponse<T> {
    data: T,
}

/// CW20 `{"balance":{"address":…}}` result.
#[derive(Debug, Deserialize)]
struct Cw20Balance {
    balance: Option<String>,
}

/// gRPC-gateway error body.
#[derive(Debug, Deserialize)]
struct GatewayError {
    #[serde(default)]
    message: String,
}

/// HTTP client for a chain's LCD endpoint.
#[derive(Debug, Clone)]
pub struct LcdClient {
    client: Client,
}

impl LcdClient {
    pub fn new(timeout: Duration) -> Result<Self, QueryError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| QueryError::Transport(e.to_string()))?;
        Ok(Self { client })
    }

    async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T, QueryError> {
        debug!(%url, "LCD query");
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| QueryError::Transport(e.to_string()))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| QueryError::Transport(e.to_string()))?;

        if !status.is_success() {
            let message = serde_json::from_str::<GatewayError>(&body)
                .map(|e| e.message)
                .ok()
                .filter(|m| !m.is_empty())
                .unwrap_or(body);
            return Err(QueryError::Status {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&body).map_err(|e| QueryError::Malformed(e.to_string()))
    }
}

/// URL for a bank balance lookup.
pub fn bank_balance_url(endpoint: &str, address: &str, denom: &str) -> String {
    format!(
        "{}/cosmos/bank/v1beta1/balances/{address}/by_denom?denom={denom}",
        endpoint.trim_end_matches('/')
    )
}

/// URL for a CW20 `balance` smart query. The query JSON is base64url-encoded
/// into the path.
pub fn cw20_balance_url(endpoint: &str, contract: &str, address: &str) -> String {
    let query = json!({ "balance": { "address": address } }).to_string();
    format!(
        "{}/cosmwasm/wasm/v1/contract/{contract}/smart/{}",
        endpoint.trim_end_matches('/'),
        URL_SAFE.encode(query)
    )
}

#[async_trait]
impl BalanceQuery for LcdClient {
    async fn bank_balance(
        &self,
        endpoint: &str,
        address: &str,
        denom: &str,
    ) -> Result<Option<String>, QueryError> {
        let resp: BankBalanceResponse = self.get(&bank_balance_url(endpoint, address, denom)).await?;
        Ok(resp.balance.map(|coin| coin.amount.to_string()))
    }

    async fn cw20_balance(
        &self,
        endpoint: &str,
        contract: &str,
        address: &str,
    ) -> Result<Option<String>, QueryError> {
        let resp: SmartQueryResponse<Cw20Balance> =
            self.get(&cw20_balance_url(endpoint, contract, address)).await?;
        Ok(resp.data.balance)
    }
}
