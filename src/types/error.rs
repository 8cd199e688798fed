use thiserror::Error;

use crate::types::QuoteMethod;

#[derive(Error, Debug)]
pub enum QuoterError {
    #[error("Degenerate pool: {0}")]
    DegeneratePool(String),

    #[error("Invalid swap path: {0}")]
    InvalidPath(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Remote call failed ({call}): {cause}")]
    RemoteCall { call: String, cause: String },

    #[error("{method} quote unavailable: {source}")]
    QuoteUnavailable {
        method: QuoteMethod,
        #[source]
        source: Box<QuoterError>,
    },

    #[error("Pool not found: {0}")]
    PoolNotFound(String),

    #[error("Invalid fee: {fee_bps} bps exceeds {max_bps} bps")]
    InvalidFee { fee_bps: u32, max_bps: u32 },

    #[error("Arithmetic overflow: {0}")]
    ArithmeticOverflow(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Decimal error: {0}")]
    Decimal(#[from] rust_decimal::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, QuoterError>;

impl QuoterError {
    pub fn remote(call: impl Into<String>, cause: impl ToString) -> Self {
        Self::RemoteCall {
            call: call.into(),
            cause: cause.to_string(),
        }
    }

    pub fn unavailable(method: QuoteMethod, source: QuoterError) -> Self {
        // Never nest: a quote that failed inside another quote keeps its original method.
        match source {
            QuoterError::QuoteUnavailable { .. } => source,
            other => Self::QuoteUnavailable {
                method,
                source: Box::new(other),
            },
        }
    }

    /// The innermost error, looking through `QuoteUnavailable`.
    pub fn root_cause(&self) -> &QuoterError {
        match self {
            QuoterError::QuoteUnavailable { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// Only collaborator failures are worth retrying; everything else is
    /// deterministic given the same inputs.
    pub fn is_retryable(&self) -> bool {
        matches!(self.root_cause(), QuoterError::RemoteCall { .. })
    }
}
