use std::sync::Arc;

use pair_quoter::{
    client::LedgerClient,
    dex::{UniswapV2Factory, UniswapV2Router},
    quote::{PriceQuoter, TracingReporter},
    types::Result,
    utils::{config::Config, logger},
};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let config = Config::load()?;
    config.validate()?;
    logger::init(&config.logging.level)?;

    info!("Starting pair quoter");

    let ledger = Arc::new(LedgerClient::connect(config.network_config())?);
    let router = UniswapV2Router::new(ledger.clone(), config.contracts_config().router_address);

    let factory = match config.contracts_config().factory_address {
        Some(address) => UniswapV2Factory::new(ledger.clone(), address),
        None => match UniswapV2Factory::from_router(ledger.clone(), &router).await {
            Ok(factory) => factory,
            Err(e) => {
                error!("Failed to resolve factory: {}", e);
                return Err(e);
            }
        },
    };
    info!(router = %router.address(), factory = %factory.address(), "contracts ready");

    let quoter = PriceQuoter::builder()
        .with_router(Arc::new(router))
        .with_pools(Arc::new(factory))
        .with_reporter(Arc::new(TracingReporter))
        .with_config(config.quote_config().clone())
        .build()?;

    match quoter.run().await {
        Ok(summary) => {
            info!(
                pair = %summary.router.pair,
                router_price = %summary.cross_check.router_price,
                effective_price = %summary.cross_check.effective_price,
                "Quote complete"
            );
            Ok(())
        }
        Err(e) => {
            error!(retryable = e.is_retryable(), "Quote failed: {}", e);
            Err(e)
        }
    }
}
