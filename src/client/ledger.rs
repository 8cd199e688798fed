use std::fmt;
use std::future::Future;
use std::time::Duration;

use alloy::{
    network::Ethereum,
    primitives::U256 as WireU256,
    providers::{DynProvider, RootProvider},
    rpc::client::RpcClient,
    transports::{http::Http, RpcError, TransportError, TransportErrorKind},
};
use tracing::{debug, error, info, warn};

use crate::types::{QuoterError, Result, TokenAmount};
use crate::utils::config::NetworkConfig;

/// Whether a failed ledger request can succeed if sent again.
pub trait TransientError {
    fn is_transient(&self) -> bool;
}

impl TransientError for TransportError {
    fn is_transient(&self) -> bool {
        match self {
            // Node said no (revert, bad params); asking again gives the same answer
            RpcError::ErrorResp(_) => false,
            RpcError::Transport(TransportErrorKind::HttpError(http)) => http.status == 429 || http.status >= 500,
            RpcError::Transport(_) => true,
            _ => false,
        }
    }
}

impl TransientError for alloy::contract::Error {
    fn is_transient(&self) -> bool {
        match self {
            alloy::contract::Error::TransportError(e) => e.is_transient(),
            _ => false,
        }
    }
}

/// Read-only connection to an EVM node over HTTP JSON-RPC.
pub struct LedgerClient {
    provider: DynProvider,
    max_retries: u32,
    retry_delay: Duration,
}

impl LedgerClient {
    pub fn connect(config: &NetworkConfig) -> Result<Self> {
        info!("Initializing ledger client with endpoint: {}", config.rpc_url);

        let url = config
            .rpc_url
            .parse::<reqwest::Url>()
            .map_err(|e| QuoterError::Config(format!("invalid rpc_url '{}': {}", config.rpc_url, e)))?;

        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| QuoterError::Config(format!("could not build HTTP client: {}", e)))?;

        let client = RpcClient::new(Http::with_client(http, url), false);
        let provider = DynProvider::new(RootProvider::<Ethereum>::new(client));

        Ok(Self {
            provider,
            max_retries: config.max_retries.max(1),
            retry_delay: config.retry_delay(),
        })
    }

    pub fn provider(&self) -> &DynProvider {
        &self.provider
    }

    /// Run `request` until it succeeds, fails for good, or retries run out.
    ///
    /// Only transport failures (network, HTTP 5xx/429) are retried. Every
    /// failure surfaces as `RemoteCall` tagged with `call`.
    pub async fn call<T, E, F, Fut>(&self, call: &str, request: F) -> Result<T>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = std::result::Result<T, E>>,
        E: TransientError + fmt::Display,
    {
        let mut last_error = None;
        for attempt in 0..self.max_retries {
            match request().await {
                Ok(value) => {
                    debug!(call, attempt = attempt + 1, "ledger call succeeded");
                    return Ok(value);
                }
                Err(e) if !e.is_transient() => {
                    error!("{} failed: {}", call, e);
                    return Err(QuoterError::remote(call, e));
                }
                Err(e) => {
                    warn!("{} attempt {}/{} failed: {}", call, attempt + 1, self.max_retries, e);
                    last_error = Some(QuoterError::remote(call, e));

                    if attempt < self.max_retries - 1 {
                        debug!("Retrying in {:?}...", self.retry_delay);
                        tokio::time::sleep(self.retry_delay).await;
                    }
                }
            }
        }

        error!("All {} attempts exhausted for {}", self.max_retries, call);
        Err(last_error.unwrap_or_else(|| QuoterError::remote(call, "no attempt was made")))
    }
}

/// Domain amount to the wire integer type
pub fn to_wire(amount: TokenAmount) -> WireU256 {
    let mut bytes = [0u8; 32];
    for (i, byte) in bytes.iter_mut().enumerate() {
        *byte = amount.byte(31 - i);
    }
    WireU256::from_be_bytes(bytes)
}

/// Wire integer to the domain amount type
pub fn from_wire(value: WireU256) -> TokenAmount {
    TokenAmount::from_big_endian(&value.to_be_bytes::<32>())
}
