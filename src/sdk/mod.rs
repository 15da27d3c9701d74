// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Wallet SDK Integration
//!
//! The wallet SDK owns authentication, account deployment, key management,
//! transaction signing and the gasless relay. This service only forwards
//! user actions to it through the [`WalletSdk`] trait.
//!
//! A [`WalletSdk`] holds at most one login. Every client of this service
//! gets its own instance from the configured [`WalletConnector`].
//!
//! ## Adapters
//!
//! - [`RemoteConnector`] / [`RemoteWalletSdk`] - JSON over HTTPS against the
//!   SDK backend
//! - [`SandboxConnector`] / [`SandboxWalletSdk`] - in-process stand-in for
//!   local development; never touches a chain

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::blockchain::{Call, ExecuteOptions, MessageSignature};

pub mod remote;
pub mod sandbox;

pub use remote::{RemoteConnector, RemoteWalletSdk};
pub use sandbox::{SandboxConnector, SandboxWalletSdk};

/// External identity method used to log in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum LoginProvider {
    Google,
    Apple,
}

impl LoginProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoginProvider::Google => "google",
            LoginProvider::Apple => "apple",
        }
    }
}

impl fmt::Display for LoginProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LoginProvider {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "google" => Ok(LoginProvider::Google),
            "apple" => Ok(LoginProvider::Apple),
            other => Err(format!(
                "Unsupported login provider `{other}` (expected `google` or `apple`)"
            )),
        }
    }
}

/// Profile of the authenticated user, as reported by the SDK.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserProfile {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Snapshot of the SDK's authentication state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Session {
    pub authenticated: bool,
    /// Wallet address (present once authenticated)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserProfile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<LoginProvider>,
}

/// Failures surfaced by an SDK adapter.
#[derive(Debug, thiserror::Error)]
pub enum SdkError {
    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("Wallet SDK request failed: {0}")]
    Request(String),

    #[error("Wallet SDK rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Wallet SDK response was invalid: {0}")]
    InvalidResponse(String),
}

/// Creates SDK clients, one per logged-in user.
#[async_trait]
pub trait WalletConnector: Send + Sync {
    /// Short adapter name for health output and logs.
    fn mode(&self) -> &'static str;

    /// A new client with no session.
    fn connect(&self) -> Arc<dyn WalletSdk>;

    /// Check that the SDK backend can be reached.
    async fn ping(&self) -> Result<(), SdkError>;
}

/// Operations consumed from the wallet SDK.
#[async_trait]
pub trait WalletSdk: Send + Sync {
    /// Current authentication state.
    async fn session(&self) -> Session;

    /// Authenticate with an external identity method.
    async fn login(&self, provider: LoginProvider) -> Result<Session, SdkError>;

    /// Submit a transaction; returns its hash.
    async fn execute(&self, call: Call, options: ExecuteOptions) -> Result<String, SdkError>;

    /// Sign an arbitrary message with the account key.
    async fn sign_message(&self, message: &str) -> Result<MessageSignature, SdkError>;

    /// Irreversibly remove the authenticated account. Clears the session.
    async fn delete_account(&self) -> Result<(), SdkError>;

    /// Clear the local session. Succeeds when already logged out.
    async fn logout(&self) -> Result<(), SdkError>;
}
