// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::blockchain::{AddressError, AmountError};
use crate::sdk::SdkError;

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub fn unprocessable(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, message)
    }

    pub fn bad_gateway(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_GATEWAY, message)
    }
}

impl From<AmountError> for ApiError {
    fn from(err: AmountError) -> Self {
        match err {
            AmountError::InvalidAmount(_) => Self::bad_request(err.to_string()),
            AmountError::Overflow => Self::unprocessable(err.to_string()),
        }
    }
}

impl From<AddressError> for ApiError {
    fn from(err: AddressError) -> Self {
        Self::bad_request(err.to_string())
    }
}

impl From<SdkError> for ApiError {
    fn from(err: SdkError) -> Self {
        match err {
            SdkError::NotAuthenticated => Self::unauthorized(err.to_string()),
            _ => Self::bad_gateway(err.to_string()),
        }
    }
}

/// Malformed or mistyped bodies are a 400; other rejections keep their status.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        let status = match &rejection {
            JsonRejection::JsonDataError(_) | JsonRejection::JsonSyntaxError(_) => {
                StatusCode::BAD_REQUEST
            }
            _ => rejection.status(),
        };
        Self::new(status, rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorBody {
            error: self.message,
        });
        (self.status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[test]
    fn constructors_set_status_and_message() {
        let bad = ApiError::bad_request("bad");
        assert_eq!(bad.status, StatusCode::BAD_REQUEST);
        assert_eq!(bad.message, "bad");

        let unauth = ApiError::unauthorized("who");
        assert_eq!(unauth.status, StatusCode::UNAUTHORIZED);

        let unp = ApiError::unprocessable("oops");
        assert_eq!(unp.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(unp.message, "oops");

        let gw = ApiError::bad_gateway("down");
        assert_eq!(gw.status, StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn domain_errors_map_to_statuses() {
        let invalid: ApiError = AmountError::InvalidAmount("`x` is not a decimal number".into()).into();
        assert_eq!(invalid.status, StatusCode::BAD_REQUEST);
        assert_eq!(invalid.message, "Invalid amount: `x` is not a decimal number");

        let overflow: ApiError = AmountError::Overflow.into();
        assert_eq!(overflow.status, StatusCode::UNPROCESSABLE_ENTITY);

        let address: ApiError = AddressError::MissingPrefix.into();
        assert_eq!(address.status, StatusCode::BAD_REQUEST);

        let unauth: ApiError = SdkError::NotAuthenticated.into();
        assert_eq!(unauth.status, StatusCode::UNAUTHORIZED);

        let rejected: ApiError = SdkError::Rejected {
            status: 500,
            message: "relay down".into(),
        }
        .into();
        assert_eq!(rejected.status, StatusCode::BAD_GATEWAY);
        assert!(rejected.message.contains("relay down"));
    }

    #[tokio::test]
    async fn into_response_returns_json_body() {
        let response = ApiError::bad_request("bad data").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body_bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = String::from_utf8(body_bytes.to_vec()).unwrap();
        assert_eq!(body, r#"{"error":"bad data"}"#);
    }
}
