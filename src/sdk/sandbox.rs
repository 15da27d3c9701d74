// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! In-process wallet SDK stand-in.
//!
//! Mirrors the SDK's session behavior without any network access: login
//! derives a deterministic account address, `execute` returns a pseudo
//! transaction hash and `sign_message` a pseudo signature. Nothing here is
//! cryptographically meaningful.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use alloy::primitives::U256;
use async_trait::async_trait;
use sha2::{Digest, Sha256};
use tokio::sync::RwLock;
use tracing::debug;

use super::{LoginProvider, SdkError, Session, UserProfile, WalletConnector, WalletSdk};
use crate::blockchain::{Call, ExecuteOptions, MessageSignature};

/// A call accepted by the sandbox, kept for inspection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmittedCall {
    pub tx_hash: String,
    pub call: Call,
    pub options: ExecuteOptions,
}

#[derive(Default)]
struct SandboxState {
    session: Session,
    submitted: Vec<SubmittedCall>,
    /// Bumped on account deletion so the next login yields a fresh account.
    account_epoch: u64,
}

/// Hands out independent sandbox clients for one application id.
pub struct SandboxConnector {
    app_id: String,
}

impl SandboxConnector {
    pub fn new(app_id: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
        }
    }
}

#[async_trait]
impl WalletConnector for SandboxConnector {
    fn mode(&self) -> &'static str {
        "sandbox"
    }

    fn connect(&self) -> Arc<dyn WalletSdk> {
        Arc::new(SandboxWalletSdk::new(self.app_id.clone()))
    }

    async fn ping(&self) -> Result<(), SdkError> {
        Ok(())
    }
}

pub struct SandboxWalletSdk {
    app_id: String,
    state: RwLock<SandboxState>,
    nonce: AtomicU64,
}

impl SandboxWalletSdk {
    pub fn new(app_id: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            state: RwLock::new(SandboxState::default()),
            nonce: AtomicU64::new(0),
        }
    }

    /// Calls accepted so far, oldest first.
    pub async fn submitted(&self) -> Vec<SubmittedCall> {
        self.state.read().await.submitted.clone()
    }

    async fn require_address(&self) -> Result<String, SdkError> {
        self.state
            .read()
            .await
            .session
            .address
            .clone()
            .ok_or(SdkError::NotAuthenticated)
    }
}

/// 31 bytes of SHA-256 keep the value below the Stark field prime.
fn felt_digest(parts: &[&[u8]]) -> [u8; 31] {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update((part.len() as u64).to_be_bytes());
        hasher.update(part);
    }
    let digest = hasher.finalize();
    let mut out = [0u8; 31];
    out.copy_from_slice(&digest[..31]);
    out
}

fn felt_hex(bytes: &[u8; 31]) -> String {
    format!("0x00{}", alloy::hex::encode(bytes))
}

fn felt_decimal(bytes: &[u8; 31]) -> String {
    U256::from_be_slice(bytes).to_string()
}

#[async_trait]
impl WalletSdk for SandboxWalletSdk {
    async fn session(&self) -> Session {
        self.state.read().await.session.clone()
    }

    async fn login(&self, provider: LoginProvider) -> Result<Session, SdkError> {
        let mut state = self.state.write().await;
        let epoch = state.account_epoch.to_be_bytes();
        let seed = felt_digest(&[
            self.app_id.as_bytes(),
            provider.as_str().as_bytes(),
            epoch.as_slice(),
        ]);
        let address = felt_hex(&seed);

        state.session = Session {
            authenticated: true,
            address: Some(address.clone()),
            user: Some(UserProfile {
                id: format!("sandbox|{provider}|{}", &address[4..16]),
                email: Some(format!("{}@sandbox.invalid", provider)),
                name: None,
            }),
            provider: Some(provider),
        };
        debug!(%provider, %address, "Sandbox login");
        Ok(state.session.clone())
    }

    async fn execute(&self, call: Call, options: ExecuteOptions) -> Result<String, SdkError> {
        // Held until the call is recorded so a concurrent logout cannot slip in.
        let mut state = self.state.write().await;
        let address = state
            .session
            .address
            .clone()
            .ok_or(SdkError::NotAuthenticated)?;
        let nonce = self.nonce.fetch_add(1, Ordering::SeqCst).to_be_bytes();

        let mut parts: Vec<&[u8]> = vec![
            address.as_bytes(),
            call.contract_address.as_bytes(),
            call.entrypoint.as_bytes(),
        ];
        parts.extend(call.calldata.iter().map(|felt| felt.as_bytes()));
        parts.push(nonce.as_slice());
        let tx_hash = felt_hex(&felt_digest(&parts));

        debug!(%tx_hash, entrypoint = %call.entrypoint, gasless = options.gasless, "Sandbox execute");
        state.submitted.push(SubmittedCall {
            tx_hash: tx_hash.clone(),
            call,
            options,
        });
        Ok(tx_hash)
    }

    async fn sign_message(&self, message: &str) -> Result<MessageSignature, SdkError> {
        let address = self.require_address().await?;
        let r = felt_digest(&[b"r".as_slice(), address.as_bytes(), message.as_bytes()]);
        let s = felt_digest(&[b"s".as_slice(), address.as_bytes(), message.as_bytes()]);
        Ok(MessageSignature {
            r: felt_decimal(&r),
            s: felt_decimal(&s),
        })
    }

    async fn delete_account(&self) -> Result<(), SdkError> {
        let mut state = self.state.write().await;
        if !state.session.authenticated {
            return Err(SdkError::NotAuthenticated);
        }
        state.session = Session::default();
        state.account_epoch += 1;
        Ok(())
    }

    async fn logout(&self) -> Result<(), SdkError> {
        self.state.write().await.session = Session::default();
        Ok(())
    }
}
