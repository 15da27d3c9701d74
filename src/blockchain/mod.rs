// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Starknet call construction.
//!
//! This module provides functionality for:
//! - Encoding human-readable token amounts as `u256` calldata words
//! - Building ERC-20 style `approve` calls
//! - Network and token constants

pub mod amount;
pub mod erc20;
pub mod types;

pub use amount::{encode, format_amount, AmountError, Uint256Pair, TOKEN_DECIMALS};
pub use erc20::approve_call;
pub use types::*;
