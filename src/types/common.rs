use primitive_types::U256;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::{Address, Result};
use crate::utils::math;

/// Seconds since the Unix epoch.
pub type Timestamp = u64;

/// Amount in a token's smallest indivisible unit.
pub type TokenAmount = U256;

pub fn now() -> Timestamp {
    chrono::Utc::now().timestamp() as u64
}

// ============================================================================
// Token Information
// ============================================================================

/// Token metadata
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TokenInfo {
    pub symbol: String,
    pub address: Address,
    pub decimals: u8,
}

impl TokenInfo {
    pub fn new(symbol: impl Into<String>, address: Address, decimals: u8) -> Self {
        Self {
            symbol: symbol.into(),
            address,
            decimals,
        }
    }

    /// Convert raw amount to decimal
    pub fn to_decimal(&self, raw_amount: TokenAmount) -> Result<Decimal> {
        math::to_decimal(raw_amount, self.decimals)
    }

    /// Convert decimal to raw amount, flooring anything below one smallest unit
    pub fn to_raw(&self, decimal_amount: Decimal) -> Result<TokenAmount> {
        math::from_decimal(decimal_amount, self.decimals)
    }

    /// Smallest-unit amount equal to one whole token
    pub fn one(&self) -> Result<TokenAmount> {
        math::pow10(self.decimals)
    }
}

impl fmt::Display for TokenInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol)
    }
}

// ============================================================================
// Token Pair
// ============================================================================

/// Direction-aware pair: quotes are always "token_out per one token_in"
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TokenPair {
    pub token_in: TokenInfo,
    pub token_out: TokenInfo,
}

impl TokenPair {
    pub fn new(token_in: TokenInfo, token_out: TokenInfo) -> Self {
        Self { token_in, token_out }
    }

    /// Get pair symbol (eg "WETH/USDC")
    pub fn symbol(&self) -> String {
        format!("{}/{}", self.token_in.symbol, self.token_out.symbol)
    }

    pub fn reversed(&self) -> Self {
        Self {
            token_in: self.token_out.clone(),
            token_out: self.token_in.clone(),
        }
    }
}

impl fmt::Display for TokenPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn usdc() -> TokenInfo {
        TokenInfo::new("USDC", Address::new([0x83; 20]), 6)
    }

    #[test]
    fn test_token_info_to_decimal() {
        let token = usdc();
        assert_eq!(token.to_decimal(U256::from(2_500_000u64)).unwrap(), dec!(2.5));
        assert_eq!(token.to_decimal(U256::zero()).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_token_info_to_raw_floors() {
        let token = usdc();
        assert_eq!(token.to_raw(dec!(1.2345679)).unwrap(), U256::from(1_234_567u64));
    }

    #[test]
    fn test_token_info_one() {
        assert_eq!(usdc().one().unwrap(), U256::from(1_000_000u64));
    }

    #[test]
    fn test_token_pair_symbol_and_reverse() {
        let weth = TokenInfo::new("WETH", Address::new([0x42; 20]), 18);
        let pair = TokenPair::new(weth, usdc());

        assert_eq!(pair.symbol(), "WETH/USDC");
        assert_eq!(pair.reversed().symbol(), "USDC/WETH");
        assert_eq!(pair.reversed().reversed(), pair);
    }
}
