use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::{
    dex::PoolStateSource,
    types::{
        now, Address, OrientedReserves, PriceQuote, QuoteMethod, QuoterError, ReservesQuote, Result, TokenAmount,
        TokenPair,
    },
    utils::math,
};

/// Prices computed locally from the pair's reserves, without trusting the router.
pub struct ReservesPriceEngine {
    pools: Arc<dyn PoolStateSource>,
    fee_bps: u32,
}

/// Pure pricing output for one oriented reserve snapshot
#[derive(Debug, Clone, PartialEq)]
pub struct ReservePricing {
    pub spot: Decimal,
    pub unit_amount_out: TokenAmount,
    pub effective: Decimal,
    pub slippage_percent: Decimal,
    pub reserve_in: Decimal,
    pub reserve_out: Decimal,
}

/// Spot, one-unit effective price and slippage for reserves already oriented
/// into swap direction.
pub fn price_reserves(oriented: &OrientedReserves, pair: &TokenPair, fee_bps: u32) -> Result<ReservePricing> {
    let decimals_in = pair.token_in.decimals;
    let decimals_out = pair.token_out.decimals;

    let spot = math::spot_price(oriented.reserve_in, decimals_in, oriented.reserve_out, decimals_out)?;

    let one = pair.token_in.one()?;
    let unit_amount_out = math::get_amount_out(one, oriented.reserve_in, oriented.reserve_out, fee_bps)?;
    let effective = math::to_decimal(unit_amount_out, decimals_out)?;
    let slippage_percent = math::price_impact_percent(spot, effective)?;

    Ok(ReservePricing {
        spot,
        unit_amount_out,
        effective,
        slippage_percent,
        reserve_in: math::to_decimal(oriented.reserve_in, decimals_in)?,
        reserve_out: math::to_decimal(oriented.reserve_out, decimals_out)?,
    })
}

/// Fee-adjusted price per input unit for a swap of `amount_in` raw input units.
///
/// This is what the router should quote for the same input, so it is the
/// reference the cross-check compares against.
pub fn effective_price_at(
    oriented: &OrientedReserves,
    pair: &TokenPair,
    fee_bps: u32,
    amount_in: TokenAmount,
) -> Result<Decimal> {
    if amount_in.is_zero() {
        return Err(QuoterError::InvalidAmount("effective price needs a non-zero input".into()));
    }

    let amount_out = math::get_amount_out(amount_in, oriented.reserve_in, oriented.reserve_out, fee_bps)?;
    let amount_in_units = pair.token_in.to_decimal(amount_in)?;
    let amount_out_units = pair.token_out.to_decimal(amount_out)?;

    amount_out_units
        .checked_div(amount_in_units)
        .ok_or_else(|| QuoterError::ArithmeticOverflow("amount_out / amount_in".into()))
}

impl ReservesPriceEngine {
    pub fn new(pools: Arc<dyn PoolStateSource>, fee_bps: u32) -> Self {
        Self { pools, fee_bps }
    }

    pub fn fee_bps(&self) -> u32 {
        self.fee_bps
    }

    /// Resolve the pool for `pair` and price it from its reserves.
    ///
    /// Collaborator calls are made one at a time; the first failure ends the
    /// quote and is reported as `QuoteUnavailable`.
    pub async fn quote(&self, pair: &TokenPair) -> Result<ReservesQuote> {
        self.price(pair)
            .await
            .map_err(|e| QuoterError::unavailable(QuoteMethod::Reserves, e))
    }

    async fn resolve_pair(&self, pair: &TokenPair) -> Result<Address> {
        let pair_address = self
            .pools
            .get_pair_address(&pair.token_in.address, &pair.token_out.address)
            .await?;

        if pair_address.is_zero() {
            return Err(QuoterError::PoolNotFound(format!(
                "no pool for {} ({} / {})",
                pair, pair.token_in.address, pair.token_out.address
            )));
        }

        Ok(pair_address)
    }

    async fn price(&self, pair: &TokenPair) -> Result<ReservesQuote> {
        let pair_address = self.resolve_pair(pair).await?;
        debug!(pair = %pair, %pair_address, "resolved pool");

        let (token0, token1) = self.pools.get_pair_tokens(&pair_address).await?;
        let reserves = self.pools.get_reserves(&pair_address).await?;
        if reserves.is_degenerate() {
            return Err(QuoterError::DegeneratePool(format!(
                "pool {} has reserves {}/{}",
                pair_address, reserves.reserve0, reserves.reserve1
            )));
        }

        let oriented = reserves.orient(token0, token1, pair.token_in.address, pair.token_out.address)?;
        let pricing = price_reserves(&oriented, pair, self.fee_bps)?;

        let fee_to = self.pools.get_fee_recipient_address().await?;
        let fee_to_setter = self.pools.get_fee_recipient_setter_address().await?;

        info!(
            pair = %pair,
            spot = %pricing.spot,
            effective = %pricing.effective,
            slippage = %pricing.slippage_percent,
            "reserves quote"
        );

        Ok(ReservesQuote {
            pair: pair.clone(),
            pair_address,
            reserves,
            oriented,
            reserve_in: pricing.reserve_in,
            reserve_out: pricing.reserve_out,
            unit_amount_out: pricing.unit_amount_out,
            spot: PriceQuote::spot(pricing.spot),
            effective: PriceQuote::effective(pricing.effective, pricing.slippage_percent),
            fee_bps: self.fee_bps,
            fee_to,
            fee_to_setter,
            quoted_at: now(),
        })
    }
}
