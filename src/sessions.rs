// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Client Sessions
//!
//! Each login gets its own SDK client, registered under an opaque token.
//! Callers present the token as `Authorization: Bearer <token>`; a request
//! without one never reaches anyone's wallet.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::sdk::{LoginProvider, SdkError, Session, WalletConnector, WalletSdk};

pub struct SessionStore {
    connector: Arc<dyn WalletConnector>,
    clients: RwLock<HashMap<String, Arc<dyn WalletSdk>>>,
}

impl SessionStore {
    pub fn new(connector: Arc<dyn WalletConnector>) -> Self {
        Self {
            connector,
            clients: RwLock::new(HashMap::new()),
        }
    }

    pub fn connector(&self) -> &dyn WalletConnector {
        self.connector.as_ref()
    }

    /// Log in on a fresh client and register it.
    ///
    /// Nothing is registered when the login fails.
    pub async fn open(&self, provider: LoginProvider) -> Result<(String, Session), SdkError> {
        let sdk = self.connector.connect();
        let session = sdk.login(provider).await?;
        let token = self.insert(sdk).await;
        Ok((token, session))
    }

    /// Register an already logged-in client; returns its token.
    pub async fn insert(&self, sdk: Arc<dyn WalletSdk>) -> String {
        let token = Uuid::new_v4().simple().to_string();
        self.clients.write().await.insert(token.clone(), sdk);
        token
    }

    pub async fn get(&self, token: &str) -> Option<Arc<dyn WalletSdk>> {
        self.clients.read().await.get(token).cloned()
    }

    pub async fn remove(&self, token: &str) -> Option<Arc<dyn WalletSdk>> {
        self.clients.write().await.remove(token)
    }

    /// Number of registered clients.
    pub async fn active(&self) -> usize {
        self.clients.read().await.len()
    }
}
