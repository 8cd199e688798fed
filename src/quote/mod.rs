pub mod amounts_out;
pub mod cross_check;
pub mod quoter;
pub mod report;
pub mod reserves;

#[cfg(test)]
pub(crate) mod mock;

pub use amounts_out::AmountsOutCalculator;
pub use cross_check::cross_check;
pub use quoter::{PriceQuoter, PriceQuoterBuilder};
pub use report::{QuoteReporter, TracingReporter};
pub use reserves::{effective_price_at, price_reserves, ReservePricing, ReservesPriceEngine};
