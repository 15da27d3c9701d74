// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Wallet SDK backend over HTTPS.
//!
//! The backend speaks camelCase JSON in both directions. Every request
//! carries `X-App-Id` and `X-Network`; authenticated ones add the bearer
//! token handed out at login.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{info, warn};
use url::Url;

use super::{LoginProvider, SdkError, Session, UserProfile, WalletConnector, WalletSdk};
use crate::blockchain::{Call, ExecuteOptions, MessageSignature};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);
const APP_ID_HEADER: &str = "X-App-Id";
const NETWORK_HEADER: &str = "X-Network";

// =============================================================================
// Wire format
// =============================================================================

#[derive(Serialize)]
struct LoginRequest {
    provider: LoginProvider,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginResponse {
    access_token: String,
    address: String,
    #[serde(default)]
    user: Option<UserProfile>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WireCall<'a> {
    contract_address: &'a str,
    entrypoint: &'a str,
    calldata: &'a [String],
}

impl<'a> From<&'a Call> for WireCall<'a> {
    fn from(call: &'a Call) -> Self {
        Self {
            contract_address: &call.contract_address,
            entrypoint: &call.entrypoint,
            calldata: &call.calldata,
        }
    }
}

#[derive(Serialize)]
struct ExecuteRequest<'a> {
    calls: [WireCall<'a>; 1],
    gasless: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExecuteResponse {
    transaction_hash: String,
}

#[derive(Serialize)]
struct SignRequest<'a> {
    message: &'a str,
}

// =============================================================================
// Transport
// =============================================================================

/// Connection settings shared by every client of one backend.
#[derive(Clone)]
struct Backend {
    base_url: Url,
    app_id: String,
    network: String,
    http: Client,
}

impl Backend {
    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.as_str().trim_end_matches('/'), path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http
            .request(method, self.endpoint(path))
            .header(APP_ID_HEADER, &self.app_id)
            .header(NETWORK_HEADER, &self.network)
    }

    async fn send(&self, path: &str, request: RequestBuilder) -> Result<reqwest::Response, SdkError> {
        let response = request
            .send()
            .await
            .map_err(|e| SdkError::Request(format!("{path} failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(SdkError::Rejected {
                status,
                message: extract_error_message(&body),
            });
        }
        Ok(response)
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        path: &str,
        request: RequestBuilder,
    ) -> Result<T, SdkError> {
        self.send(path, request)
            .await?
            .json()
            .await
            .map_err(|e| SdkError::InvalidResponse(format!("{path} invalid JSON: {e}")))
    }
}

/// Prefer the backend's `error`/`message` field over the raw body.
fn extract_error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .or_else(|| v.get("message"))
                .and_then(Value::as_str)
                .map(str::to_string)
        })
        .unwrap_or_else(|| body.trim().to_string())
}

// =============================================================================
// Connector
// =============================================================================

/// Builds [`RemoteWalletSdk`] clients sharing one HTTP connection pool.
pub struct RemoteConnector {
    backend: Backend,
}

impl RemoteConnector {
    pub fn new(
        base_url: Url,
        app_id: impl Into<String>,
        network: impl Into<String>,
    ) -> Result<Self, SdkError> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| SdkError::Request(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            backend: Backend {
                base_url,
                app_id: app_id.into(),
                network: network.into(),
                http,
            },
        })
    }
}

#[async_trait]
impl WalletConnector for RemoteConnector {
    fn mode(&self) -> &'static str {
        "remote"
    }

    fn connect(&self) -> Arc<dyn WalletSdk> {
        Arc::new(RemoteWalletSdk {
            backend: self.backend.clone(),
            session: RwLock::new(None),
        })
    }

    async fn ping(&self) -> Result<(), SdkError> {
        let path = "/health";
        let request = self.backend.request(Method::GET, path);
        self.backend.send(path, request).await.map(|_| ())
    }
}

// =============================================================================
// Client
// =============================================================================

struct RemoteSession {
    access_token: String,
    session: Session,
}

/// One user's session against the SDK backend.
pub struct RemoteWalletSdk {
    backend: Backend,
    session: RwLock<Option<RemoteSession>>,
}

impl RemoteWalletSdk {
    async fn authorized(&self, method: Method, path: &str) -> Result<RequestBuilder, SdkError> {
        let token = self
            .session
            .read()
            .await
            .as_ref()
            .map(|s| s.access_token.clone())
            .ok_or(SdkError::NotAuthenticated)?;
        Ok(self.backend.request(method, path).bearer_auth(token))
    }
}

#[async_trait]
impl WalletSdk for RemoteWalletSdk {
    async fn session(&self) -> Session {
        self.session
            .read()
            .await
            .as_ref()
            .map(|s| s.session.clone())
            .unwrap_or_default()
    }

    async fn login(&self, provider: LoginProvider) -> Result<Session, SdkError> {
        let path = "/auth/login";
        let request = self
            .backend
            .request(Method::POST, path)
            .json(&LoginRequest { provider });
        let response: LoginResponse = self.backend.send_json(path, request).await?;

        let session = Session {
            authenticated: true,
            address: Some(response.address),
            user: response.user,
            provider: Some(provider),
        };
        *self.session.write().await = Some(RemoteSession {
            access_token: response.access_token,
            session: session.clone(),
        });
        info!(%provider, "Wallet SDK login succeeded");
        Ok(session)
    }

    async fn execute(&self, call: Call, options: ExecuteOptions) -> Result<String, SdkError> {
        let path = "/transactions/execute";
        let body = ExecuteRequest {
            calls: [WireCall::from(&call)],
            gasless: options.gasless,
        };
        let request = self.authorized(Method::POST, path).await?.json(&body);
        let response: ExecuteResponse = self.backend.send_json(path, request).await?;
        Ok(response.transaction_hash)
    }

    async fn sign_message(&self, message: &str) -> Result<MessageSignature, SdkError> {
        let path = "/messages/sign";
        let request = self
            .authorized(Method::POST, path)
            .await?
            .json(&SignRequest { message });
        self.backend.send_json(path, request).await
    }

    async fn delete_account(&self) -> Result<(), SdkError> {
        let path = "/account";
        let request = self.authorized(Method::DELETE, path).await?;
        self.backend.send(path, request).await?;
        *self.session.write().await = None;
        Ok(())
    }

    async fn logout(&self) -> Result<(), SdkError> {
        let Some(remote) = self.session.write().await.take() else {
            return Ok(());
        };

        // The local session is already gone; a failed revoke only leaves a
        // token that expires on its own.
        let path = "/auth/logout";
        let request = self
            .backend
            .request(Method::POST, path)
            .bearer_auth(remote.access_token);
        if let Err(e) = self.backend.send(path, request).await {
            warn!(error = %e, "Wallet SDK logout revoke failed");
        }
        Ok(())
    }
}
