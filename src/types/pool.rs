use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::{Address, QuoterError, Result, TokenAmount};

/// Reserves exactly as the pool stores them, in canonical `token0`/`token1` order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservePair {
    pub reserve0: TokenAmount,
    pub reserve1: TokenAmount,
    /// Seconds since epoch of the last reserve update, passed through untouched.
    pub block_timestamp_last: u32,
}

impl ReservePair {
    pub fn new(reserve0: TokenAmount, reserve1: TokenAmount, block_timestamp_last: u32) -> Self {
        Self {
            reserve0,
            reserve1,
            block_timestamp_last,
        }
    }

    pub fn is_degenerate(&self) -> bool {
        self.reserve0.is_zero() || self.reserve1.is_zero()
    }

    /// Map the canonical slots onto input/output using the pool's reported token order.
    pub fn orient(
        &self,
        token0: Address,
        token1: Address,
        token_in: Address,
        token_out: Address,
    ) -> Result<OrientedReserves> {
        if token0 == token_in && token1 == token_out {
            Ok(OrientedReserves {
                reserve_in: self.reserve0,
                reserve_out: self.reserve1,
                input_is_token0: true,
            })
        } else if token1 == token_in && token0 == token_out {
            Ok(OrientedReserves {
                reserve_in: self.reserve1,
                reserve_out: self.reserve0,
                input_is_token0: false,
            })
        } else {
            Err(QuoterError::PoolNotFound(format!(
                "pool holds {}/{} but quote asked for {}/{}",
                token0, token1, token_in, token_out
            )))
        }
    }
}

/// Reserves resolved into swap direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrientedReserves {
    pub reserve_in: TokenAmount,
    pub reserve_out: TokenAmount,
    pub input_is_token0: bool,
}

/// Hop sequence for a router quote. Always at least two tokens.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Address>", into = "Vec<Address>")]
pub struct SwapPath(Vec<Address>);

impl SwapPath {
    pub fn new(tokens: Vec<Address>) -> Result<Self> {
        if tokens.len() < 2 {
            return Err(QuoterError::InvalidPath(format!(
                "path needs at least 2 tokens, got {}",
                tokens.len()
            )));
        }
        Ok(Self(tokens))
    }

    pub fn direct(token_in: Address, token_out: Address) -> Self {
        Self(vec![token_in, token_out])
    }

    pub fn tokens(&self) -> &[Address] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn hop_count(&self) -> usize {
        self.0.len() - 1
    }

    pub fn first(&self) -> Address {
        self.0[0]
    }

    pub fn last(&self) -> Address {
        self.0[self.0.len() - 1]
    }
}

impl TryFrom<Vec<Address>> for SwapPath {
    type Error = QuoterError;

    fn try_from(tokens: Vec<Address>) -> Result<Self> {
        SwapPath::new(tokens)
    }
}

impl From<SwapPath> for Vec<Address> {
    fn from(path: SwapPath) -> Self {
        path.0
    }
}

impl fmt::Display for SwapPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hops: Vec<String> = self.0.iter().map(|a| a.to_string()).collect();
        write!(f, "{}", hops.join(" -> "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use primitive_types::U256;

    fn amount(value: u128) -> TokenAmount {
        U256::from(value)
    }

    fn addr(byte: u8) -> Address {
        Address::new([byte; 20])
    }

    #[test]
    fn test_swap_path_requires_two_tokens() {
        assert!(matches!(SwapPath::new(vec![]), Err(QuoterError::InvalidPath(_))));
        assert!(matches!(SwapPath::new(vec![addr(1)]), Err(QuoterError::InvalidPath(_))));

        let path = SwapPath::new(vec![addr(1), addr(2), addr(3)]).unwrap();
        assert_eq!(path.len(), 3);
        assert_eq!(path.hop_count(), 2);
        assert_eq!(path.first(), addr(1));
        assert_eq!(path.last(), addr(3));
    }

    #[test]
    fn test_swap_path_deserialize_rejects_short_path() {
        let json = format!("[\"{}\"]", addr(1));
        let parsed: std::result::Result<SwapPath, _> = serde_json::from_str(&json);
        assert!(parsed.is_err());

        let json = format!("[\"{}\",\"{}\"]", addr(1), addr(2));
        let parsed: SwapPath = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, SwapPath::direct(addr(1), addr(2)));
    }

    #[test]
    fn test_orient_matches_canonical_order() {
        let reserves = ReservePair::new(amount(100), amount(200), 7);

        let forward = reserves.orient(addr(1), addr(2), addr(1), addr(2)).unwrap();
        assert_eq!(forward.reserve_in, amount(100));
        assert_eq!(forward.reserve_out, amount(200));
        assert!(forward.input_is_token0);

        let backward = reserves.orient(addr(1), addr(2), addr(2), addr(1)).unwrap();
        assert_eq!(backward.reserve_in, amount(200));
        assert_eq!(backward.reserve_out, amount(100));
        assert!(!backward.input_is_token0);
    }

    #[test]
    fn test_orient_rejects_foreign_tokens() {
        let reserves = ReservePair::new(amount(100), amount(200), 7);
        let err = reserves.orient(addr(1), addr(2), addr(1), addr(3)).unwrap_err();
        assert!(matches!(err, QuoterError::PoolNotFound(_)));
    }

    #[test]
    fn test_degenerate_reserves() {
        assert!(ReservePair::new(amount(0), amount(1), 0).is_degenerate());
        assert!(ReservePair::new(amount(1), amount(0), 0).is_degenerate());
        assert!(!ReservePair::new(amount(1), amount(1), 0).is_degenerate());
    }
}
