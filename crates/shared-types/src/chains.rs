// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Blockchain chain selectors
//!
//! This module provides the closed set of networks the data endpoints can be
//! queried against. The selector is carried by every fetch component even when
//! an endpoint builds the same URL for all of them.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Supported blockchain networks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Chain {
    /// Ethereum Mainnet - Chain ID: 1
    #[default]
    Ethereum,
    /// BNB Smart Chain - Chain ID: 56
    Binance,
    /// BNB Smart Chain Testnet - Chain ID: 97
    BscTest,
}

impl Chain {
    /// Returns the numeric EVM chain ID
    pub const fn chain_id(self) -> u64 {
        match self {
            Self::Ethereum => 1,
            Self::Binance => 56,
            Self::BscTest => 97,
        }
    }

    /// Returns the selector name as used by the data endpoints
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ethereum => "ethereum",
            Self::Binance => "binance",
            Self::BscTest => "bsctest",
        }
    }

    /// Returns whether this selector points at a test network
    pub const fn is_testnet(self) -> bool {
        matches!(self, Self::BscTest)
    }

    /// Returns all supported chains
    pub const fn all() -> &'static [Self] {
        &[Self::Ethereum, Self::Binance, Self::BscTest]
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Chain {
    type Err = ChainParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(id) = s.parse::<u64>() {
            return Self::try_from(id);
        }

        match s.trim().to_lowercase().as_str() {
            "ethereum" | "eth" => Ok(Self::Ethereum),
            "binance" | "bsc" | "bnb" => Ok(Self::Binance),
            "bsctest" | "bsc-testnet" => Ok(Self::BscTest),
            _ => Err(ChainParseError::InvalidName(s.to_string())),
        }
    }
}

impl TryFrom<u64> for Chain {
    type Error = ChainParseError;

    fn try_from(id: u64) -> Result<Self, Self::Error> {
        match id {
            1 => Ok(Self::Ethereum),
            56 => Ok(Self::Binance),
            97 => Ok(Self::BscTest),
            _ => Err(ChainParseError::InvalidId(id)),
        }
    }
}

impl Serialize for Chain {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Chain {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ChainVisitor;

        impl serde::de::Visitor<'_> for ChainVisitor {
            type Value = Chain;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                write!(
                    formatter,
                    "a supported chain ID (1, 56, 97) or name (ethereum, binance, bsctest)"
                )
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Chain::try_from(value).map_err(|_| {
                    E::invalid_value(
                        serde::de::Unexpected::Unsigned(value),
                        &"a supported chain ID (1, 56, 97)",
                    )
                })
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                u64::try_from(value)
                    .ok()
                    .and_then(|id| Chain::try_from(id).ok())
                    .ok_or_else(|| {
                        E::invalid_value(
                            serde::de::Unexpected::Signed(value),
                            &"a supported chain ID (1, 56, 97)",
                        )
                    })
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Chain::from_str(value).map_err(|_| {
                    E::invalid_value(
                        serde::de::Unexpected::Str(value),
                        &"a supported chain name (ethereum, binance, bsctest)",
                    )
                })
            }
        }

        deserializer.deserialize_any(ChainVisitor)
    }
}

/// Error type for chain selector parsing
#[derive(Debug, thiserror::Error)]
pub enum ChainParseError {
    /// Invalid chain ID number
    #[error(
        "unsupported chain ID: {0}. Supported chain IDs are: 1 (ethereum), 56 (binance), 97 (bsctest)"
    )]
    InvalidId(u64),
    /// Invalid chain name
    #[error("unsupported chain name: {0}. Supported chain names are: ethereum, binance, bsctest")]
    InvalidName(String),
}
