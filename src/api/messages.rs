// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::Json;
use tracing::{error, info};

use super::extract::{ApiJson, ClientSession};
use crate::{
    blockchain::MessageSignature,
    error::ApiError,
    models::{SignMessageRequest, DEFAULT_SIGN_MESSAGE},
};

/// Sign a message with the wallet's account key.
#[utoipa::path(
    post,
    path = "/v1/messages/sign",
    request_body = SignMessageRequest,
    tag = "Messages",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Message signed", body = MessageSignature),
        (status = 400, description = "Malformed body"),
        (status = 401, description = "Not authenticated"),
        (status = 502, description = "Wallet SDK failed")
    )
)]
pub async fn sign_message(
    client: ClientSession,
    request: Option<ApiJson<SignMessageRequest>>,
) -> Result<Json<MessageSignature>, ApiError> {
    let message = request
        .and_then(|ApiJson(r)| r.message)
        .unwrap_or_else(|| DEFAULT_SIGN_MESSAGE.to_string());

    let signature = client.sdk.sign_message(&message).await.map_err(|e| {
        error!(error = %e, "Signing failed");
        ApiError::from(e)
    })?;
    info!(r = %signature.r, s = %signature.s, "Message signed");

    Ok(Json(signature))
}
