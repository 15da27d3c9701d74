// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use crate::config::{AppConfig, SdkMode};
use crate::sdk::{RemoteConnector, SandboxConnector, SdkError, WalletConnector};
use crate::sessions::SessionStore;

#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<SessionStore>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(connector: Arc<dyn WalletConnector>, config: AppConfig) -> Self {
        Self {
            sessions: Arc::new(SessionStore::new(connector)),
            config: Arc::new(config),
        }
    }

    /// Build the SDK connector selected by `config.sdk_mode`.
    pub fn from_config(config: AppConfig) -> Result<Self, SdkError> {
        let connector: Arc<dyn WalletConnector> = match &config.sdk_mode {
            SdkMode::Sandbox => Arc::new(SandboxConnector::new(config.app_id.clone())),
            SdkMode::Remote { base_url } => Arc::new(RemoteConnector::new(
                base_url.clone(),
                config.app_id.clone(),
                config.network.id,
            )?),
        };
        Ok(Self::new(connector, config))
    }
}

impl Default for AppState {
    fn default() -> Self {
        let config = AppConfig::default();
        Self::new(Arc::new(SandboxConnector::new(config.app_id.clone())), config)
    }
}
