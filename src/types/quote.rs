use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::{Address, OrientedReserves, ReservePair, SwapPath, Timestamp, TokenAmount, TokenPair};

/// Which pricing method produced a quote
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuoteMethod {
    /// Router `getAmountsOut`
    Router,
    /// Local constant-product math over pair reserves
    Reserves,
    /// Router price against the reserve-derived price for the same input
    CrossCheck,
}

impl QuoteMethod {
    pub fn label(&self) -> &'static str {
        match self {
            QuoteMethod::Router => "Method 1 (Router)",
            QuoteMethod::Reserves => "Method 2 (Pair)",
            QuoteMethod::CrossCheck => "Cross-check",
        }
    }
}

impl fmt::Display for QuoteMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuoteMethod::Router => write!(f, "router"),
            QuoteMethod::Reserves => write!(f, "reserves"),
            QuoteMethod::CrossCheck => write!(f, "cross-check"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PriceKind {
    /// Raw reserve ratio, no fee and no curve impact
    Spot,
    /// What a swap actually pays out after fee and curve impact
    FeeAdjusted,
}

/// Output units per one input unit, tagged with its provenance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceQuote {
    pub method: QuoteMethod,
    pub kind: PriceKind,
    pub value: Decimal,
    /// Only set on reserve-derived fee-adjusted quotes
    pub slippage_percent: Option<Decimal>,
}

impl PriceQuote {
    pub fn spot(value: Decimal) -> Self {
        Self {
            method: QuoteMethod::Reserves,
            kind: PriceKind::Spot,
            value,
            slippage_percent: None,
        }
    }

    pub fn effective(value: Decimal, slippage_percent: Decimal) -> Self {
        Self {
            method: QuoteMethod::Reserves,
            kind: PriceKind::FeeAdjusted,
            value,
            slippage_percent: Some(slippage_percent),
        }
    }

    pub fn router(value: Decimal) -> Self {
        Self {
            method: QuoteMethod::Router,
            kind: PriceKind::FeeAdjusted,
            value,
            slippage_percent: None,
        }
    }
}

/// Result of the router method
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouterQuote {
    pub pair: TokenPair,
    pub path: SwapPath,
    pub amount_in: TokenAmount,
    /// `amount_in` in display units
    pub amount_in_units: Decimal,
    /// One entry per path token; first is `amount_in`
    pub amounts: Vec<TokenAmount>,
    pub amount_out: Decimal,
    pub price: PriceQuote,
    pub quoted_at: Timestamp,
}

/// Result of the reserves method
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservesQuote {
    pub pair: TokenPair,
    pub pair_address: Address,
    pub reserves: ReservePair,
    /// `reserves` mapped onto the quote direction
    pub oriented: OrientedReserves,
    pub reserve_in: Decimal,
    pub reserve_out: Decimal,
    pub unit_amount_out: TokenAmount,
    pub spot: PriceQuote,
    pub effective: PriceQuote,
    pub fee_bps: u32,
    pub fee_to: Address,
    pub fee_to_setter: Address,
    pub quoted_at: Timestamp,
}

impl ReservesQuote {
    pub fn slippage_percent(&self) -> Decimal {
        self.effective.slippage_percent.unwrap_or(Decimal::ZERO)
    }

    /// Pass-through of the pool's last update time
    pub fn last_update(&self) -> u32 {
        self.reserves.block_timestamp_last
    }

    /// Which canonical pool slot holds the input token
    pub fn input_slot(&self) -> &'static str {
        if self.oriented.input_is_token0 {
            "token0"
        } else {
            "token1"
        }
    }

    /// Whether the protocol fee switch is on (non-zero fee recipient)
    pub fn protocol_fee_enabled(&self) -> bool {
        !self.fee_to.is_zero()
    }
}

/// Router price versus reserve-derived effective price
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrossCheckResult {
    pub router_price: Decimal,
    pub effective_price: Decimal,
    pub divergence_percent: Decimal,
    pub tolerance_percent: Decimal,
    pub within_tolerance: bool,
}

/// Everything one full run produced
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteSummary {
    pub router: RouterQuote,
    pub reserves: ReservesQuote,
    pub cross_check: CrossCheckResult,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_price_quote_tags() {
        let spot = PriceQuote::spot(dec!(2000));
        assert_eq!(spot.method, QuoteMethod::Reserves);
        assert_eq!(spot.kind, PriceKind::Spot);
        assert!(spot.slippage_percent.is_none());

        let effective = PriceQuote::effective(dec!(1992.01), dec!(0.39));
        assert_eq!(effective.kind, PriceKind::FeeAdjusted);
        assert_eq!(effective.slippage_percent, Some(dec!(0.39)));

        let router = PriceQuote::router(dec!(1992.01));
        assert_eq!(router.method, QuoteMethod::Router);
        assert!(router.slippage_percent.is_none());
    }

    #[test]
    fn test_method_labels() {
        assert_eq!(QuoteMethod::Router.label(), "Method 1 (Router)");
        assert_eq!(QuoteMethod::Reserves.label(), "Method 2 (Pair)");
        assert_eq!(QuoteMethod::Reserves.to_string(), "reserves");
        assert_eq!(QuoteMethod::CrossCheck.label(), "Cross-check");
        assert_eq!(QuoteMethod::CrossCheck.to_string(), "cross-check");
    }
}
