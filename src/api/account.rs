// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{extract::State, http::StatusCode};
use tracing::{error, warn};

use super::extract::{ApiJson, ClientSession};
use crate::{error::ApiError, models::DeleteAccountRequest, state::AppState};

/// Permanently delete the account and its wallet.
///
/// The caller's session ends once the account is gone.
#[utoipa::path(
    delete,
    path = "/v1/account",
    request_body = DeleteAccountRequest,
    tag = "Account",
    security(("bearer" = [])),
    responses(
        (status = 204, description = "Account deleted"),
        (status = 400, description = "Deletion not confirmed"),
        (status = 401, description = "Not authenticated"),
        (status = 502, description = "Wallet SDK failed")
    )
)]
pub async fn delete_account(
    State(state): State<AppState>,
    client: ClientSession,
    request: Option<ApiJson<DeleteAccountRequest>>,
) -> Result<StatusCode, ApiError> {
    let confirmed = request.is_some_and(|ApiJson(r)| r.confirm);
    if !confirmed {
        return Err(ApiError::bad_request(
            "Account deletion cannot be undone; set `confirm` to true to proceed",
        ));
    }

    let address = client.sdk.session().await.address;
    client.sdk.delete_account().await.map_err(|e| {
        error!(error = %e, "Account deletion failed");
        ApiError::from(e)
    })?;
    state.sessions.remove(&client.token).await;
    warn!(address = ?address, "Account deleted");

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sdk::LoginProvider;

    async fn client(state: &AppState) -> ClientSession {
        let (token, _) = state.sessions.open(LoginProvider::Google).await.unwrap();
        let sdk = state.sessions.get(&token).await.unwrap();
        ClientSession { token, sdk }
    }

    fn confirm(confirm: bool) -> Option<ApiJson<DeleteAccountRequest>> {
        Some(ApiJson(DeleteAccountRequest { confirm }))
    }

    #[tokio::test]
    async fn deletion_requires_confirmation() {
        let state = AppState::default();
        let client = client(&state).await;

        for request in [None, confirm(false)] {
            let err = delete_account(State(state.clone()), client.clone(), request)
                .await
                .unwrap_err();
            assert_eq!(err.status, StatusCode::BAD_REQUEST);
        }
        assert!(client.sdk.session().await.authenticated);
        assert!(state.sessions.get(&client.token).await.is_some());
    }

    #[tokio::test]
    async fn confirmed_deletion_ends_session() {
        let state = AppState::default();
        let client = client(&state).await;

        let status = delete_account(State(state.clone()), client.clone(), confirm(true))
            .await
            .expect("deletion succeeds");
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert!(!client.sdk.session().await.authenticated);
        assert!(state.sessions.get(&client.token).await.is_none());
    }

    #[tokio::test]
    async fn deletion_requires_logged_in_client() {
        let state = AppState::default();
        let client = client(&state).await;
        client.sdk.logout().await.unwrap();

        let err = delete_account(State(state), client, confirm(true))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
    }
}
