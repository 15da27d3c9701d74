// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Extractors shared by the handlers.
//!
//! Both reject with [`ApiError`], so clients always get an
//! `{"error": ...}` body.

use std::sync::Arc;

use axum::{
    extract::{FromRequest, FromRequestParts, OptionalFromRequest, OptionalFromRequestParts, Request},
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        request::Parts,
    },
    Json,
};
use serde::de::DeserializeOwned;

use crate::{error::ApiError, sdk::WalletSdk, state::AppState};

/// The caller's own SDK client, looked up by the bearer token issued at
/// login.
///
/// ```rust,ignore
/// async fn handler(client: ClientSession) -> Result<Json<Session>, ApiError> {
///     Ok(Json(client.sdk.session().await))
/// }
/// ```
#[derive(Clone)]
pub struct ClientSession {
    pub token: String,
    pub sdk: Arc<dyn WalletSdk>,
}

fn bearer_token(parts: &Parts) -> Result<Option<String>, ApiError> {
    let Some(header) = parts.headers.get(AUTHORIZATION) else {
        return Ok(None);
    };
    let token = header
        .to_str()
        .ok()
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| ApiError::unauthorized("Invalid Authorization header"))?;
    Ok(Some(token.to_string()))
}

impl FromRequestParts<AppState> for ClientSession {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        <Self as OptionalFromRequestParts<AppState>>::from_request_parts(parts, state)
            .await?
            .ok_or_else(|| ApiError::unauthorized("Not authenticated"))
    }
}

/// Unknown or revoked tokens read as anonymous.
impl OptionalFromRequestParts<AppState> for ClientSession {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Option<Self>, Self::Rejection> {
        let Some(token) = bearer_token(parts)? else {
            return Ok(None);
        };
        let sdk = state.sessions.get(&token).await;
        Ok(sdk.map(|sdk| ClientSession { token, sdk }))
    }
}

/// `Json` with rejections mapped into [`ApiError`].
///
/// As `Option<ApiJson<T>>`, a request without a `Content-Type` reads as
/// `None` so bodies whose fields are all optional can be left out.
pub struct ApiJson<T>(pub T);

impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = <Json<T> as FromRequest<S>>::from_request(req, state).await?;
        Ok(Self(value))
    }
}

impl<T, S> OptionalFromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Option<Self>, Self::Rejection> {
        if !req.headers().contains_key(CONTENT_TYPE) {
            return Ok(None);
        }
        <Self as FromRequest<S>>::from_request(req, state).await.map(Some)
    }
}
