//! Chain configuration.
//!
//! Provides [`ChainConfig`], loaded once at startup from built-in defaults,
//! an optional config file, and `JUNOKIT_*` environment variables (nested
//! keys separated by `__`, e.g. `JUNOKIT_TRANSFER__GAS_LIMIT`). The loaded
//! value is treated as immutable and shared behind an `Arc`.
//!
//! Environment values are kept as strings so amounts reach
//! [`Amount`]'s digit parser intact; numeric scalars are coerced on
//! deserialize.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::amount::Amount;
use crate::constants::{
    CHAIN_PLACEHOLDER, DEFAULT_CHAIN_ID, DEFAULT_CHAIN_NAME, DEFAULT_DECIMALS, DEFAULT_DENOM,
    DEFAULT_DISPLAY_DENOM, DEFAULT_FALLBACK_ENDPOINT_TEMPLATE, DEFAULT_QUERY_TIMEOUT_SECS,
    DEMO_FEE_AMOUNT, DEMO_GAS_LIMIT, DEMO_TRANSFER_AMOUNT, ENV_PREFIX,
};
use crate::error::ConfigError;

/// Where the displayed balance comes from.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BalanceSource {
    /// Native bank balance of the configured denom.
    #[default]
    Bank,
    /// CW20 token balance held in a contract.
    Cw20 { contract: String },
}

/// Fixed parameters of the self-transfer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransferDefaults {
    pub amount: Amount,
    pub fee_amount: Amount,
    pub gas_limit: u64,
}

impl Default for TransferDefaults {
    fn default() -> Self {
        Self {
            amount: Amount::from(DEMO_TRANSFER_AMOUNT),
            fee_amount: Amount::from(DEMO_FEE_AMOUNT),
            gas_limit: DEMO_GAS_LIMIT,
        }
    }
}

/// Static chain configuration for the process lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainConfig {
    /// Chain registry name; substituted into the fallback endpoint.
    pub chain_name: String,
    /// Chain ID passed to the wallet on connect.
    pub chain_id: String,
    /// Native base denomination.
    pub denom: String,
    /// Display denomination.
    pub display_denom: String,
    /// Decimal places between base and display denomination.
    pub decimals: u32,
    /// Endpoint template containing `{chain}`.
    pub fallback_endpoint_template: String,
    /// Refuse balance queries unless a wallet is connected.
    pub query_requires_connection: bool,
    /// HTTP timeout for chain queries, in seconds.
    pub query_timeout_secs: u64,
    pub balance_source: BalanceSource,
    pub transfer: TransferDefaults,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            chain_name: DEFAULT_CHAIN_NAME.to_string(),
            chain_id: DEFAULT_CHAIN_ID.to_string(),
            denom: DEFAULT_DENOM.to_string(),
            display_denom: DEFAULT_DISPLAY_DENOM.to_string(),
            decimals: DEFAULT_DECIMALS,
            fallback_endpoint_template: DEFAULT_FALLBACK_ENDPOINT_TEMPLATE.to_string(),
            query_requires_connection: false,
            query_timeout_secs: DEFAULT_QUERY_TIMEOUT_SECS,
            balance_source: BalanceSource::Bank,
            transfer: TransferDefaults::default(),
        }
    }
}

impl ChainConfig {
    /// Load from defaults, an optional file, and the process environment.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with_env(path, None)
    }

    /// Like [`load`](Self::load), but reads environment overrides from `env`
    /// instead of the process environment when given.
    pub fn load_with_env(
        path: Option<&Path>,
        env: Option<::config::Map<String, String>>,
    ) -> Result<Self, ConfigError> {
        let mut builder = ::config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(::config::File::from(path).required(true));
        }

        let environment = ::config::Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .source(env);

        let cfg: ChainConfig = builder
            .add_source(environment)
            .build()
            .map_err(|e| ConfigError::Load(e.to_string()))?
            .try_deserialize()
            .map_err(|e| ConfigError::Load(e.to_string()))?;

        cfg.validate()?;
        Ok(cfg)
    }

    /// Check invariants the flows rely on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.chain_name.trim().is_empty() {
            return Err(ConfigError::Invalid("chain_name is empty".into()));
        }
        if self.chain_id.trim().is_empty() {
            return Err(ConfigError::Invalid("chain_id is empty".into()));
        }
        if self.denom.trim().is_empty() {
            return Err(ConfigError::Invalid("denom is empty".into()));
        }
        if !self.fallback_endpoint_template.contains(CHAIN_PLACEHOLDER) {
            return Err(ConfigError::Invalid(format!(
                "fallback_endpoint_template must contain {CHAIN_PLACEHOLDER}"
            )));
        }
        if self.transfer.gas_limit == 0 {
            return Err(ConfigError::Invalid("transfer.gas_limit must be positive".into()));
        }
        if let BalanceSource::Cw20 { contract } = &self.balance_source {
            if contract.trim().is_empty() {
                return Err(ConfigError::Invalid("cw20 contract address is empty".into()));
            }
        }
        Ok(())
    }

    /// Endpoint used when the wallet does not supply one.
    pub fn fallback_endpoint(&self) -> String {
        self.fallback_endpoint_template
            .replace(CHAIN_PLACEHOLDER, &self.chain_name)
            .trim_end_matches('/')
            .to_string()
    }

    pub fn query_timeout(&self) -> Duration {
        Duration::from_secs(self.query_timeout_secs)
    }
}
