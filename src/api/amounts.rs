// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::Json;

use super::extract::ApiJson;
use crate::{
    blockchain::{amount, Uint256Pair},
    error::ApiError,
    models::EncodeAmountRequest,
};

/// Encode a human-readable amount as `u256` calldata words.
#[utoipa::path(
    post,
    path = "/v1/amounts/encode",
    request_body = EncodeAmountRequest,
    tag = "Amounts",
    responses(
        (status = 200, description = "Encoded amount", body = Uint256Pair),
        (status = 400, description = "Amount is not a non-negative decimal, or malformed body"),
        (status = 422, description = "Amount exceeds 256 bits")
    )
)]
pub async fn encode_amount(
    ApiJson(request): ApiJson<EncodeAmountRequest>,
) -> Result<Json<Uint256Pair>, ApiError> {
    Ok(Json(amount::encode(&request.amount)?))
}
