// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Starknet types and constants.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Starknet network configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkConfig {
    /// Identifier accepted in configuration (`sepolia`, `mainnet`)
    pub id: &'static str,
    /// Network name for display
    pub name: &'static str,
    /// Block explorer URL
    pub explorer_url: &'static str,
}

/// Starknet Mainnet configuration.
pub const STARKNET_MAINNET: NetworkConfig = NetworkConfig {
    id: "mainnet",
    name: "Starknet Mainnet",
    explorer_url: "https://starkscan.co",
};

/// Starknet Sepolia testnet configuration.
pub const STARKNET_SEPOLIA: NetworkConfig = NetworkConfig {
    id: "sepolia",
    name: "Starknet Sepolia",
    explorer_url: "https://sepolia.starkscan.co",
};

impl NetworkConfig {
    /// Explorer link for a submitted transaction.
    pub fn tx_url(&self, tx_hash: &str) -> String {
        format!("{}/tx/{}", self.explorer_url.trim_end_matches('/'), tx_hash)
    }
}

impl FromStr for NetworkConfig {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "sepolia" => Ok(STARKNET_SEPOLIA),
            "mainnet" => Ok(STARKNET_MAINNET),
            other => Err(format!(
                "Unsupported network `{other}` (expected `sepolia` or `mainnet`)"
            )),
        }
    }
}

/// Fungible token metadata.
#[derive(Debug, Clone)]
pub struct TokenInfo {
    pub symbol: &'static str,
    pub name: &'static str,
    pub decimals: u8,
    pub address: &'static str,
}

/// STRK, the Starknet fee token. Same address on Sepolia and Mainnet.
pub const STRK_TOKEN: TokenInfo = TokenInfo {
    symbol: "STRK",
    name: "Starknet Token",
    decimals: 18,
    address: "0x04718f5a0Fc34cC1AF16A1cdee98fFB20C31f5cD61D6Ab07201858f4287c938D",
};

/// A single contract invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Call {
    /// Target contract address
    pub contract_address: String,
    /// Entry point name (e.g., "approve")
    pub entrypoint: String,
    /// Ordered calldata felts, base-10 or 0x-hex strings
    pub calldata: Vec<String>,
}

/// Options forwarded with `execute`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ExecuteOptions {
    /// Ask the relay to sponsor the transaction fee
    pub gasless: bool,
}

impl ExecuteOptions {
    pub fn gasless() -> Self {
        Self { gasless: true }
    }
}

/// Two-component Stark signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MessageSignature {
    pub r: String,
    pub s: String,
}

/// Errors for malformed Starknet addresses.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AddressError {
    #[error("Address must start with 0x")]
    MissingPrefix,

    #[error("Address must have between 1 and 64 hex digits")]
    InvalidLength,

    #[error("Address must contain only hex characters")]
    InvalidCharacters,
}

/// Starknet contract or account address (a felt rendered as `0x` hex).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "String", into = "String")]
pub struct FeltAddress(String);

impl FeltAddress {
    pub fn parse(raw: &str) -> Result<Self, AddressError> {
        let trimmed = raw.trim();
        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .ok_or(AddressError::MissingPrefix)?;
        if digits.is_empty() || digits.len() > 64 {
            return Err(AddressError::InvalidLength);
        }
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(AddressError::InvalidCharacters);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Wrap a compile-time constant known to be well formed.
    pub(crate) fn from_static(raw: &'static str) -> Self {
        Self(raw.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FeltAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for FeltAddress {
    type Error = AddressError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<FeltAddress> for String {
    fn from(value: FeltAddress) -> Self {
        value.0
    }
}
