use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::types::{Address, QuoterError, Result, TokenInfo, TokenPair};
use crate::utils::math::{DEFAULT_FEE_BPS, FEE_DENOMINATOR, MAX_TOKEN_DECIMALS};

pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

const BASE_RPC_URL: &str = "https://mainnet.base.org";
const BASE_WETH: &str = "0x4200000000000000000000000000000000000006";
const BASE_USDC: &str = "0x833589fCD6eDb6E08f4c7C32D4f71b54bdA02913";
const BASE_UNISWAP_V2_ROUTER: &str = "0x4752ba5dbc23f44d87826276bf6fd6b1c372ad24";

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Ledger connection settings
    pub network: NetworkConfig,

    /// Contract addresses
    pub contracts: ContractsConfig,

    /// What to quote and how
    pub quote: QuoteConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

/// Network configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    pub rpc_url: String,
    pub request_timeout_ms: u64,
    pub max_retries: u32,
    pub retry_delay_ms: u64,
}

impl NetworkConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            rpc_url: BASE_RPC_URL.into(),
            request_timeout_ms: 10_000,
            max_retries: 3,
            retry_delay_ms: 500,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContractsConfig {
    pub router_address: Address,
    /// Resolved through the router when absent
    pub factory_address: Option<Address>,
}

impl Default for ContractsConfig {
    fn default() -> Self {
        Self {
            router_address: Address::parse(BASE_UNISWAP_V2_ROUTER).unwrap_or_default(),
            factory_address: None,
        }
    }
}

/// Quote parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QuoteConfig {
    pub token_in: TokenInfo,
    pub token_out: TokenInfo,

    /// Pool trading fee in basis points
    pub fee_bps: u32,

    /// Router quote input, in whole `token_in` units
    pub amount_in: Decimal,

    /// Maximum router vs reserves divergence before warning
    pub cross_check_tolerance_percent: Decimal,
}

impl QuoteConfig {
    pub fn pair(&self) -> TokenPair {
        TokenPair::new(self.token_in.clone(), self.token_out.clone())
    }
}

impl Default for QuoteConfig {
    fn default() -> Self {
        Self {
            token_in: TokenInfo::new("WETH", Address::parse(BASE_WETH).unwrap_or_default(), 18),
            token_out: TokenInfo::new("USDC", Address::parse(BASE_USDC).unwrap_or_default(), 6),
            fee_bps: DEFAULT_FEE_BPS,
            amount_in: Decimal::ONE,
            cross_check_tolerance_percent: Decimal::new(5, 1),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".into() }
    }
}

impl Config {
    pub fn network_config(&self) -> &NetworkConfig {
        &self.network
    }

    pub fn contracts_config(&self) -> &ContractsConfig {
        &self.contracts
    }

    pub fn quote_config(&self) -> &QuoteConfig {
        &self.quote
    }

    /// Load config from `config.toml` if present, else defaults; env vars win either way
    pub fn load() -> Result<Self> {
        let mut config = if Path::new(DEFAULT_CONFIG_PATH).exists() {
            Self::load_from_file(DEFAULT_CONFIG_PATH)?
        } else {
            Self::default()
        };
        config.apply_env_vars()?;
        Ok(config)
    }

    /// Load from TOML file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Apply environment variable overrides
    fn apply_env_vars(&mut self) -> Result<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(rpc_url) = lookup("RPC_URL") {
            self.network.rpc_url = rpc_url;
        }

        if let Some(router) = lookup("ROUTER_ADDRESS") {
            self.contracts.router_address = Address::parse(&router)?;
        }

        if let Some(factory) = lookup("FACTORY_ADDRESS") {
            self.contracts.factory_address = Some(Address::parse(&factory)?);
        }

        if let Some(level) = lookup("LOG_LEVEL") {
            self.logging.level = level;
        }

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !self.network.rpc_url.starts_with("http://") && !self.network.rpc_url.starts_with("https://") {
            return Err(QuoterError::Config(format!("rpc_url must be http(s): '{}'", self.network.rpc_url)));
        }

        if self.network.max_retries == 0 {
            return Err(QuoterError::Config("max_retries must be at least 1".into()));
        }

        if self.contracts.router_address.is_zero() {
            return Err(QuoterError::Config("router_address is not set".into()));
        }

        let quote = &self.quote;
        for token in [&quote.token_in, &quote.token_out] {
            if token.address.is_zero() {
                return Err(QuoterError::Config(format!("{} address is not set", token.symbol)));
            }
            if token.decimals > MAX_TOKEN_DECIMALS {
                return Err(QuoterError::Config(format!(
                    "{} decimals {} exceed {}",
                    token.symbol, token.decimals, MAX_TOKEN_DECIMALS
                )));
            }
        }

        if quote.token_in.address == quote.token_out.address {
            return Err(QuoterError::Config("token_in and token_out must differ".into()));
        }

        if quote.fee_bps > FEE_DENOMINATOR {
            return Err(QuoterError::InvalidFee {
                fee_bps: quote.fee_bps,
                max_bps: FEE_DENOMINATOR,
            });
        }

        if quote.amount_in <= Decimal::ZERO {
            return Err(QuoterError::Config("amount_in must be positive".into()));
        }

        if quote.cross_check_tolerance_percent.is_sign_negative() {
            return Err(QuoterError::Config("cross_check_tolerance_percent cannot be negative".into()));
        }

        Ok(())
    }
}
