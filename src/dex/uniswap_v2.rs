use std::sync::Arc;

use alloy::sol;
use async_trait::async_trait;
use tracing::debug;

use crate::{
    client::{from_wire, to_wire, LedgerClient},
    dex::adapter::{PoolStateSource, RouterQuoteSource},
    types::{Address, QuoterError, ReservePair, Result, SwapPath, TokenAmount},
};

sol! {
    #[sol(rpc)]
    interface IUniswapV2Router02 {
        function factory() external view returns (address);
        function getAmountsOut(uint256 amountIn, address[] calldata path) external view returns (uint256[] memory amounts);
    }

    #[sol(rpc)]
    interface IUniswapV2Factory {
        function feeTo() external view returns (address);
        function feeToSetter() external view returns (address);
        function getPair(address tokenA, address tokenB) external view returns (address pair);
    }

    #[sol(rpc)]
    interface IUniswapV2Pair {
        function token0() external view returns (address);
        function token1() external view returns (address);
        function getReserves() external view returns (uint112 reserve0, uint112 reserve1, uint32 blockTimestampLast);
    }
}

/// Uniswap-V2 style router contract
pub struct UniswapV2Router {
    ledger: Arc<LedgerClient>,
    address: Address,
}

impl UniswapV2Router {
    pub fn new(ledger: Arc<LedgerClient>, address: Address) -> Self {
        Self { ledger, address }
    }

    pub fn address(&self) -> Address {
        self.address
    }
}

#[async_trait]
impl RouterQuoteSource for UniswapV2Router {
    async fn get_amounts_out(&self, amount_in: TokenAmount, path: &SwapPath) -> Result<Vec<TokenAmount>> {
        debug!(router = %self.address, %amount_in, hops = path.hop_count(), "getAmountsOut");
        let router = IUniswapV2Router02::new(self.address.into(), self.ledger.provider().clone());
        let router = &router;
        let wire_path: Vec<alloy::primitives::Address> = path.tokens().iter().map(|t| (*t).into()).collect();
        let wire_path = &wire_path;
        let wire_amount = to_wire(amount_in);

        let amounts = self
            .ledger
            .call("getAmountsOut", || async move {
                router.getAmountsOut(wire_amount, wire_path.clone()).call().await
            })
            .await?;

        Ok(amounts.into_iter().map(from_wire).collect())
    }

    async fn get_factory_address(&self) -> Result<Address> {
        let router = IUniswapV2Router02::new(self.address.into(), self.ledger.provider().clone());
        let router = &router;
        let factory = self
            .ledger
            .call("factory", || async move { router.factory().call().await })
            .await?;
        Ok(factory.into())
    }
}

/// Uniswap-V2 style factory plus the pairs it deployed
pub struct UniswapV2Factory {
    ledger: Arc<LedgerClient>,
    address: Address,
}

impl UniswapV2Factory {
    pub fn new(ledger: Arc<LedgerClient>, address: Address) -> Self {
        Self { ledger, address }
    }

    /// Resolve the factory through the router, the way the router itself finds pairs
    pub async fn from_router(ledger: Arc<LedgerClient>, router: &UniswapV2Router) -> Result<Self> {
        let address = router.get_factory_address().await?;
        debug!(router = %router.address(), factory = %address, "resolved factory");
        Ok(Self::new(ledger, address))
    }

    pub fn address(&self) -> Address {
        self.address
    }
}

fn reserve(value: alloy::primitives::Uint<112, 2>, slot: &str) -> Result<TokenAmount> {
    u128::try_from(value)
        .map(TokenAmount::from)
        .map_err(|e| QuoterError::remote("getReserves", format!("{} out of range: {}", slot, e)))
}

#[async_trait]
impl PoolStateSource for UniswapV2Factory {
    async fn get_pair_address(&self, token_a: &Address, token_b: &Address) -> Result<Address> {
        let factory = IUniswapV2Factory::new(self.address.into(), self.ledger.provider().clone());
        let factory = &factory;
        let (token_a, token_b) = ((*token_a).into(), (*token_b).into());

        let pair = self
            .ledger
            .call("getPair", || async move { factory.getPair(token_a, token_b).call().await })
            .await?;
        Ok(pair.into())
    }

    async fn get_pair_tokens(&self, pair: &Address) -> Result<(Address, Address)> {
        let pool = IUniswapV2Pair::new((*pair).into(), self.ledger.provider().clone());
        let pool = &pool;

        let token0 = self
            .ledger
            .call("token0", || async move { pool.token0().call().await })
            .await?;
        let token1 = self
            .ledger
            .call("token1", || async move { pool.token1().call().await })
            .await?;
        Ok((token0.into(), token1.into()))
    }

    async fn get_reserves(&self, pair: &Address) -> Result<ReservePair> {
        let pool = IUniswapV2Pair::new((*pair).into(), self.ledger.provider().clone());
        let pool = &pool;

        let reserves = self
            .ledger
            .call("getReserves", || async move { pool.getReserves().call().await })
            .await?;

        Ok(ReservePair::new(
            reserve(reserves.reserve0, "reserve0")?,
            reserve(reserves.reserve1, "reserve1")?,
            reserves.blockTimestampLast,
        ))
    }

    async fn get_fee_recipient_address(&self) -> Result<Address> {
        let factory = IUniswapV2Factory::new(self.address.into(), self.ledger.provider().clone());
        let factory = &factory;
        let fee_to = self
            .ledger
            .call("feeTo", || async move { factory.feeTo().call().await })
            .await?;
        Ok(fee_to.into())
    }

    async fn get_fee_recipient_setter_address(&self) -> Result<Address> {
        let factory = IUniswapV2Factory::new(self.address.into(), self.ledger.provider().clone());
        let factory = &factory;
        let setter = self
            .ledger
            .call("feeToSetter", || async move { factory.feeToSetter().call().await })
            .await?;
        Ok(setter.into())
    }
}
