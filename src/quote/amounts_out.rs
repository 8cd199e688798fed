use std::sync::Arc;

use tracing::{debug, info};

use crate::{
    dex::RouterQuoteSource,
    types::{now, PriceQuote, QuoteMethod, QuoterError, Result, RouterQuote, SwapPath, TokenAmount, TokenPair},
};

/// Router-quoted price: the contract does all the curve math, we only rescale.
pub struct AmountsOutCalculator {
    router: Arc<dyn RouterQuoteSource>,
}

impl AmountsOutCalculator {
    pub fn new(router: Arc<dyn RouterQuoteSource>) -> Self {
        Self { router }
    }

    /// Amounts at every hop of `path`, as reported by the router.
    ///
    /// The response must have one entry per path token and start with `amount_in`.
    pub async fn quote_path(&self, amount_in: TokenAmount, path: &SwapPath) -> Result<Vec<TokenAmount>> {
        debug!(%amount_in, %path, "requesting router amounts");
        let amounts = self.router.get_amounts_out(amount_in, path).await?;

        if amounts.len() != path.len() {
            return Err(QuoterError::remote(
                "getAmountsOut",
                format!("expected {} amounts for path, got {}", path.len(), amounts.len()),
            ));
        }
        if amounts[0] != amount_in {
            return Err(QuoterError::remote(
                "getAmountsOut",
                format!("first amount {} does not echo amount_in {}", amounts[0], amount_in),
            ));
        }

        Ok(amounts)
    }

    /// Output units per one input unit for `amount_in` routed along `path`.
    ///
    /// Path and amount are checked before any remote call; those failures come
    /// back as-is. Anything after that is reported as `QuoteUnavailable`.
    pub async fn quote(&self, amount_in: TokenAmount, path: &SwapPath, pair: &TokenPair) -> Result<RouterQuote> {
        if path.first() != pair.token_in.address || path.last() != pair.token_out.address {
            return Err(QuoterError::InvalidPath(format!(
                "path {} does not run from {} to {}",
                path, pair.token_in, pair.token_out
            )));
        }
        if amount_in.is_zero() {
            return Err(QuoterError::InvalidAmount("router quote needs a non-zero input".into()));
        }

        self.price(amount_in, path, pair)
            .await
            .map_err(|e| QuoterError::unavailable(QuoteMethod::Router, e))
    }

    async fn price(&self, amount_in: TokenAmount, path: &SwapPath, pair: &TokenPair) -> Result<RouterQuote> {
        let amounts = self.quote_path(amount_in, path).await?;
        let last = amounts[amounts.len() - 1];

        let amount_in_units = pair.token_in.to_decimal(amount_in)?;
        let amount_out = pair.token_out.to_decimal(last)?;
        let price = amount_out
            .checked_div(amount_in_units)
            .ok_or_else(|| QuoterError::ArithmeticOverflow("amount_out / amount_in".into()))?;

        info!(pair = %pair, %amount_out, %price, "router quote");

        Ok(RouterQuote {
            pair: pair.clone(),
            path: path.clone(),
            amount_in,
            amount_in_units,
            amounts,
            amount_out,
            price: PriceQuote::router(price),
            quoted_at: now(),
        })
    }
}
