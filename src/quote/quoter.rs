use std::sync::Arc;

use tracing::{info, warn};

use crate::{
    dex::{PoolStateSource, RouterQuoteSource},
    quote::{
        amounts_out::AmountsOutCalculator,
        cross_check::cross_check,
        report::{render_cross_check, render_reserves, render_router, QuoteReporter, TracingReporter},
        reserves::{effective_price_at, ReservesPriceEngine},
    },
    types::{
        CrossCheckResult, QuoteMethod, QuoteSummary, QuoterError, ReservesQuote, Result, RouterQuote, SwapPath,
    },
    utils::config::QuoteConfig,
};

/// Runs both pricing methods for the configured pair and reports each result.
pub struct PriceQuoter {
    calculator: AmountsOutCalculator,
    engine: ReservesPriceEngine,
    reporter: Arc<dyn QuoteReporter>,
    config: QuoteConfig,
}

impl PriceQuoter {
    pub fn builder() -> PriceQuoterBuilder {
        PriceQuoterBuilder::new()
    }

    /// Router method for the configured amount over the direct path.
    pub async fn run_router(&self) -> Result<RouterQuote> {
        let pair = self.config.pair();
        let amount_in = pair.token_in.to_raw(self.config.amount_in)?;
        let path = SwapPath::direct(pair.token_in.address, pair.token_out.address);

        let quote = self.calculator.quote(amount_in, &path, &pair).await?;
        self.reporter.report(QuoteMethod::Router.label(), &render_router(&quote));
        Ok(quote)
    }

    /// Reserves method for the configured pair.
    pub async fn run_reserves(&self) -> Result<ReservesQuote> {
        let quote = self.engine.quote(&self.config.pair()).await?;
        self.reporter.report(QuoteMethod::Reserves.label(), &render_reserves(&quote));
        Ok(quote)
    }

    /// Router, then reserves, then the cross-check between them.
    ///
    /// The first failure aborts the run; nothing partial is returned.
    pub async fn run(&self) -> Result<QuoteSummary> {
        info!(pair = %self.config.pair(), "quoting");

        let router = self.run_router().await?;
        let reserves = self.run_reserves().await?;

        let result = self
            .compare(&router, &reserves)
            .map_err(|e| QuoterError::unavailable(QuoteMethod::CrossCheck, e))?;
        self.reporter.report(QuoteMethod::CrossCheck.label(), &render_cross_check(&result));

        if !result.within_tolerance {
            warn!(
                router = %result.router_price,
                effective = %result.effective_price,
                divergence = %result.divergence_percent,
                tolerance = %result.tolerance_percent,
                "router and reserve prices diverge"
            );
        }

        Ok(QuoteSummary {
            router,
            reserves,
            cross_check: result,
        })
    }

    /// Router price against the reserves' effective price for the same input amount
    fn compare(&self, router: &RouterQuote, reserves: &ReservesQuote) -> Result<CrossCheckResult> {
        let expected = effective_price_at(&reserves.oriented, &reserves.pair, reserves.fee_bps, router.amount_in)?;
        cross_check(router.price.value, expected, self.config.cross_check_tolerance_percent)
    }
}

pub struct PriceQuoterBuilder {
    router: Option<Arc<dyn RouterQuoteSource>>,
    pools: Option<Arc<dyn PoolStateSource>>,
    reporter: Option<Arc<dyn QuoteReporter>>,
    config: Option<QuoteConfig>,
}

impl PriceQuoterBuilder {
    pub fn new() -> Self {
        Self {
            router: None,
            pools: None,
            reporter: None,
            config: None,
        }
    }

    pub fn with_router(mut self, router: Arc<dyn RouterQuoteSource>) -> Self {
        self.router = Some(router);
        self
    }

    pub fn with_pools(mut self, pools: Arc<dyn PoolStateSource>) -> Self {
        self.pools = Some(pools);
        self
    }

    /// Defaults to [`TracingReporter`]
    pub fn with_reporter(mut self, reporter: Arc<dyn QuoteReporter>) -> Self {
        self.reporter = Some(reporter);
        self
    }

    pub fn with_config(mut self, config: QuoteConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn build(self) -> Result<PriceQuoter> {
        let router = self
            .router
            .ok_or_else(|| QuoterError::Config("Router quote source is required".to_string()))?;

        let pools = self
            .pools
            .ok_or_else(|| QuoterError::Config("Pool state source is required".to_string()))?;

        let config = self
            .config
            .ok_or_else(|| QuoterError::Config("QuoteConfig is required".to_string()))?;

        let reporter = self.reporter.unwrap_or_else(|| Arc::new(TracingReporter));

        Ok(PriceQuoter {
            calculator: AmountsOutCalculator::new(router),
            engine: ReservesPriceEngine::new(pools, config.fee_bps),
            reporter,
            config,
        })
    }
}

impl Default for PriceQuoterBuilder {
    fn default() -> Self {
        Self::new()
    }
}
