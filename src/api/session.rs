// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Login, logout and the wallet dashboard.

use axum::{extract::State, http::StatusCode, Json};
use tracing::{error, info};

use super::extract::{ApiJson, ClientSession};
use crate::{
    blockchain::TOKEN_DECIMALS,
    error::ApiError,
    models::{LoginRequest, SessionResponse, TokenSummary},
    sdk::{LoginProvider, Session},
    state::AppState,
};

fn session_response(state: &AppState, session: Session, token: Option<String>) -> SessionResponse {
    SessionResponse {
        authenticated: session.authenticated,
        session_token: token,
        address: session.address,
        user: session.user,
        provider: session.provider.map(|p| p.to_string()),
        network: state.config.network.name.to_string(),
        token: TokenSummary {
            symbol: state.config.token_symbol.clone(),
            address: state.config.token_address.to_string(),
            decimals: TOKEN_DECIMALS,
        },
    }
}

/// Log in with an external identity provider.
///
/// Returns a `session_token` to send as `Authorization: Bearer <token>`.
/// A caller that already holds a token logs in again on the same session.
#[utoipa::path(
    post,
    path = "/v1/auth/login",
    request_body = LoginRequest,
    tag = "Session",
    responses(
        (status = 200, description = "Logged in", body = SessionResponse),
        (status = 400, description = "Unsupported provider or malformed body"),
        (status = 502, description = "Wallet SDK failed")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    client: Option<ClientSession>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> Result<Json<SessionResponse>, ApiError> {
    let provider: LoginProvider = request.provider.parse().map_err(ApiError::bad_request)?;

    let result = match client {
        Some(client) => client.sdk.login(provider).await.map(|s| (client.token, s)),
        None => state.sessions.open(provider).await,
    };
    let (token, session) = result.map_err(|e| {
        error!(%provider, error = %e, "Login failed");
        ApiError::from(e)
    })?;
    info!(%provider, address = ?session.address, "Logged in");

    Ok(Json(session_response(&state, session, Some(token))))
}

/// End the caller's session. Succeeds without one.
#[utoipa::path(
    post,
    path = "/v1/auth/logout",
    tag = "Session",
    security(("bearer" = [])),
    responses((status = 204, description = "Logged out"))
)]
pub async fn logout(
    State(state): State<AppState>,
    client: Option<ClientSession>,
) -> Result<StatusCode, ApiError> {
    if let Some(client) = client {
        state.sessions.remove(&client.token).await;
        client.sdk.logout().await?;
        info!("Logged out");
    }
    Ok(StatusCode::NO_CONTENT)
}

/// Dashboard: authentication state, wallet address and token.
#[utoipa::path(
    get,
    path = "/v1/session",
    tag = "Session",
    security((), ("bearer" = [])),
    responses((status = 200, description = "Current session", body = SessionResponse))
)]
pub async fn get_session(
    State(state): State<AppState>,
    client: Option<ClientSession>,
) -> Json<SessionResponse> {
    let session = match client {
        Some(client) => client.sdk.session().await,
        None => Session::default(),
    };
    Json(session_response(&state, session, None))
}
