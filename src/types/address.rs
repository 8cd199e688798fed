use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::types::{QuoterError, Result};

pub const ADDRESS_LEN: usize = 20;

/// A 20-byte ledger account/contract address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Address([u8; ADDRESS_LEN]);

impl Address {
    pub const ZERO: Address = Address([0u8; ADDRESS_LEN]);

    pub const fn new(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }

    /// Parse a hex address, with or without the `0x` prefix.
    pub fn parse(hex_str: &str) -> Result<Self> {
        let trimmed = hex_str.trim();
        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);

        let bytes = hex::decode(digits)
            .map_err(|e| QuoterError::Parse(format!("Could not parse address '{}': {}", hex_str, e)))?;

        Self::from_slice(&bytes)
            .map_err(|_| QuoterError::Parse(format!("Address '{}' must be {} bytes, got {}", hex_str, ADDRESS_LEN, bytes.len())))
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let array: [u8; ADDRESS_LEN] = bytes
            .try_into()
            .map_err(|_| QuoterError::Parse(format!("expected {} address bytes, got {}", ADDRESS_LEN, bytes.len())))?;
        Ok(Self(array))
    }

    pub fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; ADDRESS_LEN]
    }
}

impl FromStr for Address {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Address::parse(s).map_err(|e| anyhow::anyhow!("invalid address '{}': {}", s, e))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl From<[u8; ADDRESS_LEN]> for Address {
    fn from(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self::new(bytes)
    }
}

impl From<Address> for alloy::primitives::Address {
    fn from(address: Address) -> Self {
        alloy::primitives::Address::new(address.0)
    }
}

impl From<alloy::primitives::Address> for Address {
    fn from(address: alloy::primitives::Address) -> Self {
        Self(address.0.0)
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Address::parse(&raw).map_err(serde::de::Error::custom)
    }
}
