// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Token approval endpoint.

use axum::{extract::State, Json};
use chrono::Utc;
use tracing::{error, info};

use super::extract::{ApiJson, ClientSession};
use crate::{
    blockchain::{amount, approve_call, format_amount, ExecuteOptions, FeltAddress, TOKEN_DECIMALS},
    error::ApiError,
    models::{ApproveRequest, ApproveResponse, DEFAULT_APPROVE_AMOUNT},
    state::AppState,
};

/// Approve a spender for the configured token, gasless.
///
/// The amount is scaled by 10^18 and split into the `(low, high)` words of
/// a `u256`. Without a spender the wallet approves itself.
#[utoipa::path(
    post,
    path = "/v1/approve",
    request_body = ApproveRequest,
    tag = "Transactions",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Transaction submitted", body = ApproveResponse),
        (status = 400, description = "Invalid amount, spender address or body"),
        (status = 401, description = "Not authenticated"),
        (status = 422, description = "Amount exceeds 256 bits"),
        (status = 502, description = "Wallet SDK failed")
    )
)]
pub async fn approve(
    State(state): State<AppState>,
    client: ClientSession,
    request: Option<ApiJson<ApproveRequest>>,
) -> Result<Json<ApproveResponse>, ApiError> {
    let request = request.map(|ApiJson(r)| r).unwrap_or_default();
    let session = client.sdk.session().await;
    let address = session
        .address
        .filter(|_| session.authenticated)
        .ok_or_else(|| ApiError::unauthorized("Not authenticated"))?;

    let spender = match request.spender.as_deref().map(str::trim) {
        Some(raw) if !raw.is_empty() => FeltAddress::parse(raw)?,
        _ => FeltAddress::parse(&address)?,
    };
    let amount_raw = request.amount.as_deref().unwrap_or(DEFAULT_APPROVE_AMOUNT);
    let amount = amount::encode(amount_raw)?;
    let normalized = format_amount(amount.value()?, TOKEN_DECIMALS);

    let call = approve_call(&state.config.token_address, &spender, amount);
    let options = ExecuteOptions::gasless();

    info!(
        token = %call.contract_address,
        spender = %spender,
        amount = %normalized,
        "Executing approve transaction"
    );
    let tx_hash = client
        .sdk
        .execute(call.clone(), options)
        .await
        .map_err(|e| {
            error!(error = %e, "Approve transaction failed");
            ApiError::from(e)
        })?;
    info!(%tx_hash, "Approve transaction submitted");

    Ok(Json(ApproveResponse {
        explorer_url: state.config.network.tx_url(&tx_hash),
        tx_hash,
        call,
        amount: normalized,
        gasless: options.gasless,
        submitted_at: Utc::now(),
    }))
}
