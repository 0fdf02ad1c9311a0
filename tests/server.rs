use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use rosterguard::config::{AppConfig, DemoActor, DemoResource};
use rosterguard::server::{build_router, AppState};
use rosterguard_types::prelude::{ManualClock, ResourceKind};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

fn demo_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.rate_limit.sweep_probability = 0.0;
    config.demo.actors = vec![
        DemoActor {
            token: "coach-t1".into(),
            id: "u1".into(),
            role: "COACH".into(),
            team_id: Some("T1".into()),
        },
        DemoActor {
            token: "viewer".into(),
            id: "u2".into(),
            role: "VIEWER".into(),
            team_id: None,
        },
    ];
    config.demo.resources = vec![
        DemoResource {
            kind: ResourceKind::Player,
            id: "p1".into(),
            team_id: Some("T1".into()),
        },
        DemoResource {
            kind: ResourceKind::Player,
            id: "p2".into(),
            team_id: Some("T2".into()),
        },
    ];
    config
}

fn state() -> AppState {
    AppState::with_clock(&demo_config(), Arc::new(ManualClock::new(0))).unwrap()
}

async fn send(state: &AppState, req: Request<Body>) -> (StatusCode, axum::http::HeaderMap, Value) {
    let response = build_router(state.clone()).oneshot(req).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, headers, body)
}

fn put_player(id: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("PUT")
        .uri(format!("/api/players/{id}"))
        .header("x-forwarded-for", "203.0.113.7");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

#[tokio::test]
async fn health_is_ok() {
    let state = state();
    let (status, _, body) = send(
        &state,
        Request::builder().uri("/health").body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn coach_edits_own_player_only() {
    let state = state();

    let (status, headers, body) = send(&state, put_player("p1", Some("coach-t1"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["actor"], "u1");
    assert_eq!(body["route"], "/api/players/{playerId}");
    assert_eq!(headers["x-ratelimit-limit"], "60");
    assert!(headers.contains_key("x-request-id"));

    let (status, _, body) = send(&state, put_player("p2", Some("coach-t1"))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Forbidden");
}

#[tokio::test]
async fn missing_credentials_never_reach_the_limiter() {
    let state = state();
    let (status, _, body) = send(&state, put_player("p1", None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Unauthorized");
    assert!(state.limiter.store().is_empty());
}

#[tokio::test]
async fn unknown_player_is_not_found() {
    let state = state();
    let (status, _, body) = send(&state, put_player("p404", Some("coach-t1"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Not found");
}

#[tokio::test]
async fn login_is_throttled_after_five_attempts() {
    let state = state();
    let login = || {
        Request::builder()
            .method("POST")
            .uri("/api/auth/login")
            .header("x-real-ip", "1.2.3.4")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"token":"viewer"}"#))
            .unwrap()
    };

    for _ in 0..5 {
        let (status, _, body) = send(&state, login()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["actor"]["id"], "u2");
    }
    let (status, headers, body) = send(&state, login()).await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(headers["retry-after"], "900");
    assert_eq!(headers["x-ratelimit-remaining"], "0");
    assert_eq!(body["error"], "Too many requests");
    assert_eq!(body["retryAfter"], 900);
}

#[tokio::test]
async fn bad_login_token_is_unauthorized() {
    let state = state();
    let req = Request::builder()
        .method("POST")
        .uri("/api/auth/login")
        .body(Body::from(r#"{"token":"forged"}"#))
        .unwrap();
    let (status, _, _) = send(&state, req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn undeclared_route_is_forbidden() {
    let state = state();
    let req = Request::builder()
        .uri("/api/admin/export")
        .header("authorization", "Bearer viewer")
        .body(Body::empty())
        .unwrap();
    let (status, _, body) = send(&state, req).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Forbidden");
    let counted = state
        .limiter
        .store()
        .peek("unknown:GET /api/admin/export")
        .expect("undeclared request counted");
    assert_eq!(counted.count, 1);
}
