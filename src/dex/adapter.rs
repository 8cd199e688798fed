use async_trait::async_trait;

use crate::types::{Address, ReservePair, Result, SwapPath, TokenAmount};

/// Router-side view of the AMM: multi-hop quotes computed by the contract.
#[async_trait]
pub trait RouterQuoteSource: Send + Sync {
    // ========== QUOTES ==========

    /// Amounts at every hop of `path`; first element is `amount_in`
    async fn get_amounts_out(&self, amount_in: TokenAmount, path: &SwapPath) -> Result<Vec<TokenAmount>>;

    // ========== WIRING ==========
    async fn get_factory_address(&self) -> Result<Address>;
}

/// Factory/pair-side view of the AMM: raw pool state.
#[async_trait]
pub trait PoolStateSource: Send + Sync {
    // ========== POOL LOOKUP ==========

    /// Pool for the unordered pair; the zero address when none exists
    async fn get_pair_address(&self, token_a: &Address, token_b: &Address) -> Result<Address>;

    /// `(token0, token1)` in the pool's canonical slot order
    async fn get_pair_tokens(&self, pair: &Address) -> Result<(Address, Address)>;

    // ========== POOL STATE ==========
    async fn get_reserves(&self, pair: &Address) -> Result<ReservePair>;

    // ========== FEE SETTINGS ==========
    async fn get_fee_recipient_address(&self) -> Result<Address>;
    async fn get_fee_recipient_setter_address(&self) -> Result<Address>;
}
