// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use tracing::warn;
use utoipa::ToSchema;

use crate::state::AppState;

/// Health check response with individual component status.
#[derive(Debug, Serialize, ToSchema)]
pub struct ReadyResponse {
    /// Overall health status.
    pub status: String,
    /// Individual health checks and their results.
    pub checks: HealthChecks,
}

/// Individual health check results.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthChecks {
    /// Whether the service process is running.
    pub service: String,
    /// Wallet SDK adapter in use (`sandbox` or `remote`).
    pub sdk_mode: String,
    /// `ok` when the SDK backend answered, `unavailable` otherwise.
    pub sdk: String,
    /// Network the SDK is configured for.
    pub network: String,
    /// Logged-in clients.
    pub sessions: usize,
}

/// Simple health check response for liveness probes.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

/// Health check endpoint handler.
///
/// Returns 200 if the SDK backend is reachable, 503 otherwise.
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is healthy", body = ReadyResponse),
        (status = 503, description = "Wallet SDK unreachable", body = ReadyResponse)
    )
)]
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<ReadyResponse>) {
    let connector = state.sessions.connector();
    let sdk_ok = match connector.ping().await {
        Ok(()) => true,
        Err(e) => {
            warn!(error = %e, "Wallet SDK health check failed");
            false
        }
    };

    let response = ReadyResponse {
        status: if sdk_ok { "ok" } else { "degraded" }.to_string(),
        checks: HealthChecks {
            service: "ok".to_string(),
            sdk_mode: connector.mode().to_string(),
            sdk: if sdk_ok { "ok" } else { "unavailable" }.to_string(),
            network: state.config.network.id.to_string(),
            sessions: state.sessions.active().await,
        },
    };

    let status = if sdk_ok {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(response))
}

/// Liveness probe handler.
///
/// Always returns 200 if the process is running.
#[utoipa::path(
    get,
    path = "/health/live",
    tag = "Health",
    responses(
        (status = 200, description = "Service is alive", body = HealthResponse)
    )
)]
pub async fn liveness() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// Readiness probe handler.
///
/// Returns 200 only while the wallet SDK backend answers.
#[utoipa::path(
    get,
    path = "/health/ready",
    tag = "Health",
    responses(
        (status = 200, description = "Service is ready", body = ReadyResponse),
        (status = 503, description = "Wallet SDK unreachable", body = ReadyResponse)
    )
)]
pub async fn readiness(state: State<AppState>) -> (StatusCode, Json<ReadyResponse>) {
    health(state).await
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::config::AppConfig;
    use crate::sdk::{LoginProvider, RemoteConnector};

    #[tokio::test]
    async fn health_reports_sdk_and_sessions() {
        let state = AppState::default();

        let (status, Json(before)) = health(State(state.clone())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(before.status, "ok");
        assert_eq!(before.checks.sdk_mode, "sandbox");
        assert_eq!(before.checks.sdk, "ok");
        assert_eq!(before.checks.network, "sepolia");
        assert_eq!(before.checks.sessions, 0);

        state.sessions.open(LoginProvider::Google).await.unwrap();
        let (_, Json(after)) = readiness(State(state)).await;
        assert_eq!(after.checks.sessions, 1);
    }

    #[tokio::test]
    async fn readiness_fails_when_remote_sdk_is_unreachable() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let connector = RemoteConnector::new(
            format!("http://{addr}/").parse().unwrap(),
            "app-id",
            "sepolia",
        )
        .unwrap();
        let state = AppState::new(Arc::new(connector), AppConfig::default());

        let (status, Json(body)) = readiness(State(state)).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body.status, "degraded");
        assert_eq!(body.checks.sdk_mode, "remote");
        assert_eq!(body.checks.sdk, "unavailable");
    }

    #[tokio::test]
    async fn liveness_is_ok() {
        assert_eq!(liveness().await.status, "ok");
    }
}
