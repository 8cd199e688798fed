//! In-memory collaborator doubles shared by the quote tests.

use std::sync::Mutex;

use async_trait::async_trait;
use primitive_types::U256;

use crate::dex::{PoolStateSource, RouterQuoteSource};
use crate::quote::QuoteReporter;
use crate::types::{Address, QuoterError, ReservePair, Result, SwapPath, TokenAmount, TokenInfo, TokenPair};
use crate::utils::math;

pub const PAIR: Address = Address::new([0x88; 20]);
pub const FACTORY: Address = Address::new([0x89; 20]);
pub const FEE_TO_SETTER: Address = Address::new([0x55; 20]);

pub fn weth() -> TokenInfo {
    TokenInfo::new("WETH", Address::new([0x42; 20]), 18)
}

pub fn usdc() -> TokenInfo {
    TokenInfo::new("USDC", Address::new([0x83; 20]), 6)
}

pub fn weth_usdc() -> TokenPair {
    TokenPair::new(weth(), usdc())
}

pub fn units(whole: u128, decimals: u8) -> U256 {
    U256::from(whole) * math::pow10(decimals).unwrap()
}

/// 1000 WETH against 2,000,000 USDC, stored WETH-first
pub fn reference_pool() -> MockPool {
    MockPool::new(
        weth().address,
        usdc().address,
        ReservePair::new(units(1_000, 18), units(2_000_000, 6), 1_700_000_000),
    )
}

pub struct MockPool {
    pub token0: Address,
    pub token1: Address,
    pub reserves: ReservePair,
    pub pair: Address,
    pub fee_to: Address,
    pub fail_on: Option<&'static str>,
    pub calls: Mutex<Vec<&'static str>>,
}

impl MockPool {
    pub fn new(token0: Address, token1: Address, reserves: ReservePair) -> Self {
        Self {
            token0,
            token1,
            reserves,
            pair: PAIR,
            fee_to: Address::ZERO,
            fail_on: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Same pool with the canonical slots swapped
    pub fn flipped(&self) -> Self {
        Self::new(
            self.token1,
            self.token0,
            ReservePair::new(self.reserves.reserve1, self.reserves.reserve0, self.reserves.block_timestamp_last),
        )
    }

    pub fn failing_on(mut self, call: &'static str) -> Self {
        self.fail_on = Some(call);
        self
    }

    pub fn without_pair(mut self) -> Self {
        self.pair = Address::ZERO;
        self
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: &'static str) -> Result<()> {
        self.calls.lock().unwrap().push(call);
        if self.fail_on == Some(call) {
            return Err(QuoterError::remote(call, "connection refused"));
        }
        Ok(())
    }

    fn reserve_for(&self, token: &Address) -> Option<TokenAmount> {
        if *token == self.token0 {
            Some(self.reserves.reserve0)
        } else if *token == self.token1 {
            Some(self.reserves.reserve1)
        } else {
            None
        }
    }
}

#[async_trait]
impl PoolStateSource for MockPool {
    async fn get_pair_address(&self, token_a: &Address, token_b: &Address) -> Result<Address> {
        self.record("getPair")?;
        let known = [self.token0, self.token1];
        if known.contains(token_a) && known.contains(token_b) {
            Ok(self.pair)
        } else {
            Ok(Address::ZERO)
        }
    }

    async fn get_pair_tokens(&self, _pair: &Address) -> Result<(Address, Address)> {
        self.record("token0/token1")?;
        Ok((self.token0, self.token1))
    }

    async fn get_reserves(&self, _pair: &Address) -> Result<ReservePair> {
        self.record("getReserves")?;
        Ok(self.reserves)
    }

    async fn get_fee_recipient_address(&self) -> Result<Address> {
        self.record("feeTo")?;
        Ok(self.fee_to)
    }

    async fn get_fee_recipient_setter_address(&self) -> Result<Address> {
        self.record("feeToSetter")?;
        Ok(FEE_TO_SETTER)
    }
}

/// Router double that prices each hop against a single pool, like the real router would
pub struct MockRouter {
    pub pool: MockPool,
    pub fee_bps: u32,
    pub fail: bool,
    /// Overrides the computed response when set
    pub canned: Option<Vec<TokenAmount>>,
}

impl MockRouter {
    pub fn new(pool: MockPool) -> Self {
        Self {
            pool,
            fee_bps: math::DEFAULT_FEE_BPS,
            fail: false,
            canned: None,
        }
    }

    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    pub fn answering(mut self, amounts: Vec<TokenAmount>) -> Self {
        self.canned = Some(amounts);
        self
    }
}

#[async_trait]
impl RouterQuoteSource for MockRouter {
    async fn get_amounts_out(&self, amount_in: TokenAmount, path: &SwapPath) -> Result<Vec<TokenAmount>> {
        if self.fail {
            return Err(QuoterError::remote("getAmountsOut", "timeout"));
        }
        if let Some(canned) = &self.canned {
            return Ok(canned.clone());
        }

        let mut amounts = vec![amount_in];
        for hop in path.tokens().windows(2) {
            let reserve_in = self.pool.reserve_for(&hop[0]).ok_or_else(|| QuoterError::remote("getAmountsOut", "no pool"))?;
            let reserve_out = self.pool.reserve_for(&hop[1]).ok_or_else(|| QuoterError::remote("getAmountsOut", "no pool"))?;
            let last = amounts[amounts.len() - 1];
            amounts.push(math::get_amount_out(last, reserve_in, reserve_out, self.fee_bps)?);
        }
        Ok(amounts)
    }

    async fn get_factory_address(&self) -> Result<Address> {
        if self.fail {
            return Err(QuoterError::remote("factory", "timeout"));
        }
        Ok(FACTORY)
    }
}

/// Captures reports in order
#[derive(Default)]
pub struct RecordingReporter {
    pub reports: Mutex<Vec<(String, Vec<String>)>>,
}

impl RecordingReporter {
    pub fn labels(&self) -> Vec<String> {
        self.reports.lock().unwrap().iter().map(|(label, _)| label.clone()).collect()
    }
}

impl QuoteReporter for RecordingReporter {
    fn report(&self, label: &str, lines: &[String]) {
        self.reports.lock().unwrap().push((label.to_string(), lines.to_vec()));
    }
}
