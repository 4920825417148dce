//! Chain defaults. All monetary values in base units (1 JUNO = 10^6 ujuno).

/// Registry name of the default chain, used to derive fallback endpoints.
pub const DEFAULT_CHAIN_NAME: &str = "juno";

/// Chain ID requested from the wallet on connect.
pub const DEFAULT_CHAIN_ID: &str = "juno-1";

/// Native base denomination.
pub const DEFAULT_DENOM: &str = "ujuno";

/// Display denomination shown next to formatted balances.
pub const DEFAULT_DISPLAY_DENOM: &str = "JUNO";

/// Decimal places between `DEFAULT_DENOM` and `DEFAULT_DISPLAY_DENOM`.
pub const DEFAULT_DECIMALS: u32 = 6;

/// Placeholder substituted with the chain name in endpoint templates.
pub const CHAIN_PLACEHOLDER: &str = "{chain}";

/// Public REST proxy used when the wallet supplies no endpoint.
pub const DEFAULT_FALLBACK_ENDPOINT_TEMPLATE: &str = "https://rest.cosmos.directory/{chain}";

/// Self-transfer amount in base units.
pub const DEMO_TRANSFER_AMOUNT: u64 = 1_000;

/// Self-transfer fee in base units.
pub const DEMO_FEE_AMOUNT: u64 = 2_000;

/// Gas limit attached to the self-transfer fee.
pub const DEMO_GAS_LIMIT: u64 = 86_364;

/// HTTP timeout for chain queries.
pub const DEFAULT_QUERY_TIMEOUT_SECS: u64 = 10;

/// Protobuf type URL of a bank send message.
pub const MSG_SEND_TYPE_URL: &str = "/cosmos.bank.v1beta1.MsgSend";

/// Environment variable prefix for configuration overrides.
pub const ENV_PREFIX: &str = "JUNOKIT";
