pub mod adapter;
pub mod uniswap_v2;

pub use adapter::{PoolStateSource, RouterQuoteSource};
pub use uniswap_v2::{UniswapV2Factory, UniswapV2Router};
