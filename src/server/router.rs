use axum::body::Body;
use axum::extract::State;
use axum::http::{Method, Request};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use futures::FutureExt;
use rosterguard_authz::prelude::{ActorProvider, Credentials};
use rosterguard_interceptors::adapters::http::handle_with_chain;
use rosterguard_interceptors::prelude::InterceptError;
use serde_json::{json, Value};
use tower_http::cors::{Any, CorsLayer};

use super::state::AppState;
use crate::policy::LOGIN_PATH;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route(LOGIN_PATH, post(login_handler))
        .fallback(protected_handler)
        .layer(cors_layer())
        .with_state(state)
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any)
}

async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "windows": state.limiter.store().len(),
    }))
}

/// Checks a demo token. Only the login budget guards this route.
async fn login_handler(State(state): State<AppState>, req: Request<Body>) -> Response {
    let actors = state.actors.clone();
    handle_with_chain(req, &state.public, move |_cx, req| {
        async move {
            let body = req.read_json().await?;
            let token = body
                .get("token")
                .and_then(Value::as_str)
                .ok_or_else(|| InterceptError::schema("token is required"))?;
            let actor = actors
                .current_actor(&Credentials::bearer(token))
                .await
                .map_err(|err| InterceptError::from_error(err.into_inner()))?;
            Ok::<_, InterceptError>(json!({ "actor": actor }))
        }
        .boxed()
    })
    .await
}

/// Every other route: the full admission chain in front of an echo handler.
async fn protected_handler(State(state): State<AppState>, req: Request<Body>) -> Response {
    handle_with_chain(req, &state.protected, |cx, _req| {
        async move {
            let Some(route) = cx.route.as_ref() else {
                return Err(InterceptError::internal("admitted without a route binding"));
            };
            Ok(json!({
                "route": route.pattern,
                "resource": route.resource,
                "action": route.action,
                "target": route.target,
                "actor": cx.actor.as_ref().map(|actor| actor.id.clone()),
            }))
        }
        .boxed()
    })
    .await
}
