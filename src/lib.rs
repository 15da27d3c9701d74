// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Gasless Wallet Demo - Starknet wallet SDK demonstration service
//!
//! Exposes the actions of a wallet demo client (login, gasless token
//! approval, message signing, account deletion) as a JSON API. Key
//! management, signing and fee sponsorship stay with the wallet SDK.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `blockchain` - `u256` amount encoding and Starknet call construction
//! - `sdk` - Wallet SDK trait and its remote/sandbox adapters
//! - `sessions` - Per-client SDK sessions keyed by bearer token
//! - `config` - Environment configuration

pub mod api;
pub mod blockchain;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod sdk;
pub mod sessions;
pub mod state;
