// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! Request and response bodies for the REST API. Each type derives `ToSchema`
//! so it appears in the OpenAPI document.
//!
//! ## Model Categories
//!
//! - **Session**: login and the wallet dashboard
//! - **Amounts**: `u256` encoding of human-readable token amounts
//! - **Transactions**: gasless token approval
//! - **Messages**: message signing
//! - **Account**: account deletion

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::blockchain::Call;
use crate::sdk::UserProfile;

/// Amount approved when the request does not name one.
pub const DEFAULT_APPROVE_AMOUNT: &str = "1";

/// Message signed when the request does not name one.
pub const DEFAULT_SIGN_MESSAGE: &str = "Hello world!";

// =============================================================================
// Session Models
// =============================================================================

/// Request to log in through an external identity method.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginRequest {
    /// Identity provider: `google` or `apple`.
    pub provider: String,
}

/// Token shown on the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TokenSummary {
    pub symbol: String,
    pub address: String,
    pub decimals: u8,
}

/// Dashboard view of the current session.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SessionResponse {
    pub authenticated: bool,
    /// Bearer token for later requests (login responses only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_token: Option<String>,
    /// Wallet address (present once authenticated)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserProfile>,
    /// Identity provider used for the current session
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    /// Network display name
    pub network: String,
    /// Token targeted by approvals
    pub token: TokenSummary,
}

// =============================================================================
// Amount Models
// =============================================================================

/// Request to encode a human-readable token amount.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EncodeAmountRequest {
    /// Decimal amount, e.g. `"1.5"`.
    pub amount: String,
}

// =============================================================================
// Transaction Models
// =============================================================================

/// Request to approve a spender for the configured token.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct ApproveRequest {
    /// Address allowed to spend. Defaults to the wallet's own address.
    #[serde(default)]
    pub spender: Option<String>,
    /// Decimal token amount. Defaults to `"1"`.
    #[serde(default)]
    pub amount: Option<String>,
}

/// Submitted approval.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApproveResponse {
    /// Transaction hash returned by the SDK
    pub tx_hash: String,
    /// Block explorer URL
    pub explorer_url: String,
    /// The call as submitted
    pub call: Call,
    /// Approved amount in tokens, after truncation to 18 decimals
    pub amount: String,
    /// Whether fee sponsorship was requested
    pub gasless: bool,
    /// When the SDK accepted the transaction
    pub submitted_at: DateTime<Utc>,
}

// =============================================================================
// Message Models
// =============================================================================

/// Request to sign a message.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct SignMessageRequest {
    /// Message to sign. Defaults to `"Hello world!"`.
    #[serde(default)]
    pub message: Option<String>,
}

// =============================================================================
// Account Models
// =============================================================================

/// Request to permanently delete the account.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeleteAccountRequest {
    /// Must be `true`; deletion cannot be undone.
    #[serde(default)]
    pub confirm: bool,
}
