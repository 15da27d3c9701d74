// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    http::HeaderName,
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    blockchain::{Call, ExecuteOptions, MessageSignature, Uint256Pair},
    models::{
        ApproveRequest, ApproveResponse, DeleteAccountRequest, EncodeAmountRequest, LoginRequest,
        SessionResponse, SignMessageRequest, TokenSummary,
    },
    sdk::UserProfile,
    state::AppState,
};

pub mod account;
pub mod amounts;
pub mod extract;
pub mod health;
pub mod messages;
pub mod session;
pub mod transactions;

const REQUEST_ID_HEADER: &str = "x-request-id";

pub fn router(state: AppState) -> Router {
    let v1_routes = Router::new()
        .route("/auth/login", post(session::login))
        .route("/auth/logout", post(session::logout))
        .route("/session", get(session::get_session))
        .route("/amounts/encode", post(amounts::encode_amount))
        .route("/approve", post(transactions::approve))
        .route("/messages/sign", post(messages::sign_message))
        .route("/account", delete(account::delete_account))
        .with_state(state.clone());

    let health_routes = Router::new()
        .route("/health", get(health::health))
        .route("/health/live", get(health::liveness))
        .route("/health/ready", get(health::readiness))
        .with_state(state);

    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    Router::new()
        .nest("/v1", v1_routes)
        .merge(health_routes)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(PropagateRequestIdLayer::new(request_id.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::new(request_id, MakeRequestUuid))
        .layer(CorsLayer::permissive())
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        health::liveness,
        health::readiness,
        session::login,
        session::logout,
        session::get_session,
        amounts::encode_amount,
        transactions::approve,
        messages::sign_message,
        account::delete_account
    ),
    components(
        schemas(
            LoginRequest,
            SessionResponse,
            TokenSummary,
            UserProfile,
            EncodeAmountRequest,
            Uint256Pair,
            ApproveRequest,
            ApproveResponse,
            Call,
            ExecuteOptions,
            SignMessageRequest,
            MessageSignature,
            DeleteAccountRequest,
            health::ReadyResponse,
            health::HealthChecks,
            health::HealthResponse
        )
    ),
    tags(
        (name = "Health", description = "Liveness and readiness probes"),
        (name = "Session", description = "Login, logout and the wallet dashboard"),
        (name = "Amounts", description = "u256 amount encoding"),
        (name = "Transactions", description = "Gasless token approval"),
        (name = "Messages", description = "Message signing"),
        (name = "Account", description = "Account deletion")
    )
)]
struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{header::AUTHORIZATION, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn call(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn send(
        app: &Router,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        call(app, request).await
    }

    async fn login(app: &Router, provider: &str) -> String {
        let (status, session) = send(
            app,
            "POST",
            "/v1/auth/login",
            None,
            Some(json!({ "provider": provider })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(session["authenticated"], true);
        session["session_token"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn router_builds_with_all_routes() {
        let app = router(AppState::default());
        let _ = app.into_make_service();
    }

    #[tokio::test]
    async fn approve_flow_over_http() {
        let app = router(AppState::default());

        let (status, body) = send(&app, "POST", "/v1/approve", None, Some(json!({}))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Not authenticated");

        let token = login(&app, "google").await;

        let (status, body) = send(
            &app,
            "POST",
            "/v1/approve",
            Some(&token),
            Some(json!({ "spender": "0x0123", "amount": "340282366920938463463.374607431768211457" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["call"]["entrypoint"], "approve");
        assert_eq!(body["call"]["calldata"], json!(["0x0123", "1", "1"]));
        assert_eq!(body["gasless"], true);
        assert!(body["explorer_url"]
            .as_str()
            .unwrap()
            .starts_with("https://sepolia.starkscan.co/tx/0x"));

        let (status, body) = send(
            &app,
            "POST",
            "/v1/approve",
            Some(&token),
            Some(json!({ "spender": "0x0123", "amount": "abc" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().starts_with("Invalid amount"));

        let (status, body) = send(&app, "POST", "/v1/approve", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["amount"], "1");
    }

    #[tokio::test]
    async fn other_callers_cannot_use_a_logged_in_wallet() {
        let app = router(AppState::default());
        let token = login(&app, "google").await;

        let (status, body) = send(
            &app,
            "POST",
            "/v1/messages/sign",
            None,
            Some(json!({ "message": "transfer all" })),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Not authenticated");

        let (status, _) = send(
            &app,
            "DELETE",
            "/v1/account",
            Some("not-a-session"),
            Some(json!({ "confirm": true })),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = send(&app, "POST", "/v1/approve", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (_, body) = send(&app, "GET", "/v1/session", None, None).await;
        assert_eq!(body["authenticated"], false);
        assert!(body.get("address").is_none());

        let request = Request::builder()
            .method("POST")
            .uri("/v1/messages/sign")
            .header(AUTHORIZATION, "Basic dXNlcjpwYXNz")
            .body(Body::empty())
            .unwrap();
        let (status, body) = call(&app, request).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Invalid Authorization header");

        // The owner is unaffected.
        let (_, body) = send(&app, "GET", "/v1/session", Some(&token), None).await;
        assert_eq!(body["authenticated"], true);
        let (status, _) = send(&app, "POST", "/v1/messages/sign", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn sessions_are_kept_per_client() {
        let app = router(AppState::default());
        let alice = login(&app, "google").await;
        let bob = login(&app, "apple").await;
        assert_ne!(alice, bob);

        let (status, _) = send(&app, "POST", "/v1/auth/logout", Some(&alice), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = send(&app, "POST", "/v1/messages/sign", Some(&alice), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        let (_, body) = send(&app, "GET", "/v1/session", Some(&bob), None).await;
        assert_eq!(body["authenticated"], true);
        assert_eq!(body["provider"], "apple");
    }

    #[tokio::test]
    async fn session_sign_and_delete_over_http() {
        let app = router(AppState::default());

        let (status, body) = send(&app, "GET", "/v1/session", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["authenticated"], false);
        assert_eq!(body["token"]["symbol"], "STRK");

        let token = login(&app, "apple").await;

        let (status, sig) = send(&app, "POST", "/v1/messages/sign", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(sig["r"].is_string());
        assert!(sig["s"].is_string());

        let (status, body) = send(&app, "DELETE", "/v1/account", Some(&token), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("confirm"));

        let (status, _) =
            send(&app, "DELETE", "/v1/account", Some(&token), Some(json!({ "confirm": true }))).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (_, body) = send(&app, "GET", "/v1/session", Some(&token), None).await;
        assert_eq!(body["authenticated"], false);

        let (status, _) = send(&app, "POST", "/v1/auth/logout", Some(&token), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn body_errors_use_json_error_shape() {
        let app = router(AppState::default());

        let (status, body) = send(&app, "POST", "/v1/auth/login", None, Some(json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("provider"));

        let (status, body) = send(&app, "POST", "/v1/amounts/encode", None, None).await;
        assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert!(body["error"].is_string());

        let token = login(&app, "google").await;
        let request = Request::builder()
            .method("POST")
            .uri("/v1/messages/sign")
            .header(AUTHORIZATION, format!("Bearer {token}"))
            .header("content-type", "application/json")
            .body(Body::from("{\"message\": "))
            .unwrap();
        let (status, body) = call(&app, request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());

        let request = Request::builder()
            .method("DELETE")
            .uri("/v1/account")
            .header(AUTHORIZATION, format!("Bearer {token}"))
            .header("content-type", "text/plain")
            .body(Body::from("confirm"))
            .unwrap();
        let (status, body) = call(&app, request).await;
        assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn encode_endpoint_and_health() {
        let app = router(AppState::default());

        let (status, body) =
            send(&app, "POST", "/v1/amounts/encode", None, Some(json!({ "amount": "0" }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "low": "0", "high": "0" }));

        let (status, body) = send(&app, "GET", "/health/ready", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["checks"]["sdk_mode"], "sandbox");
        assert_eq!(body["checks"]["sdk"], "ok");
    }

    #[tokio::test]
    async fn responses_carry_request_id() {
        let app = router(AppState::default());
        let response = app
            .oneshot(Request::builder().uri("/health/live").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert!(response.headers().contains_key(REQUEST_ID_HEADER));
    }
}
