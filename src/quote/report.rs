use chrono::DateTime;
use tracing::info;

use crate::types::{CrossCheckResult, QuoteMethod, ReservesQuote, RouterQuote};

/// Sink for human-readable quote results.
pub trait QuoteReporter: Send + Sync {
    fn report(&self, label: &str, lines: &[String]);
}

/// Writes every line through `tracing` with the label as a field
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl QuoteReporter for TracingReporter {
    fn report(&self, label: &str, lines: &[String]) {
        for line in lines {
            info!(label, "{}", line);
        }
    }
}

fn render_timestamp(seconds: u32) -> String {
    match DateTime::from_timestamp(seconds as i64, 0) {
        Some(at) => format!("{} ({})", seconds, at.format("%Y-%m-%d %H:%M:%S UTC")),
        None => seconds.to_string(),
    }
}

pub fn render_router(quote: &RouterQuote) -> Vec<String> {
    let pair = &quote.pair;
    vec![
        format!("{}: {}", QuoteMethod::Router.label(), pair),
        format!("Path: {}", quote.path),
        format!(
            "{} {} -> {:.6} {}",
            quote.amount_in_units.normalize(),
            pair.token_in.symbol,
            quote.amount_out,
            pair.token_out.symbol
        ),
        format!("Price: 1 {} = {:.6} {}", pair.token_in.symbol, quote.price.value, pair.token_out.symbol),
    ]
}

pub fn render_reserves(quote: &ReservesQuote) -> Vec<String> {
    let pair = &quote.pair;
    vec![
        format!("{}: {}", QuoteMethod::Reserves.label(), pair),
        format!("Pair address: {}", quote.pair_address),
        format!("Input token slot: {}", quote.input_slot()),
        format!("Reserve {}: {:.6}", pair.token_in.symbol, quote.reserve_in),
        format!("Reserve {}: {:.6}", pair.token_out.symbol, quote.reserve_out),
        format!("Last update: {}", render_timestamp(quote.last_update())),
        format!("Spot price: 1 {} = {:.6} {}", pair.token_in.symbol, quote.spot.value, pair.token_out.symbol),
        format!(
            "Effective price ({} bps fee): 1 {} = {:.6} {}",
            quote.fee_bps, pair.token_in.symbol, quote.effective.value, pair.token_out.symbol
        ),
        format!("Slippage: {:.2}%", quote.slippage_percent()),
        format!("Fee recipient: {}", quote.fee_to),
        format!("Fee recipient setter: {}", quote.fee_to_setter),
    ]
}

pub fn render_cross_check(result: &CrossCheckResult) -> Vec<String> {
    let verdict = if result.within_tolerance { "OK" } else { "DIVERGED" };
    vec![
        format!("Router price: {:.6}", result.router_price),
        format!("Effective price: {:.6}", result.effective_price),
        format!(
            "Divergence: {:.4}% (tolerance {}%) {}",
            result.divergence_percent, result.tolerance_percent, verdict
        ),
    ]
}
