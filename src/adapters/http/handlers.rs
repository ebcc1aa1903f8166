//! Route handlers. Parse, validate once, hand off to the `MessagingPort`.

use super::dto::{
    BroadcastBody, BroadcastResponse, InboundBody, InboundResponse, SendBody, SendResponse,
};
use super::error::ApiError;
use super::router::AppState;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::response::Json;

pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "ok": true }))
}

pub async fn send(
    State(state): State<AppState>,
    body: Result<Json<SendBody>, JsonRejection>,
) -> Result<Json<SendResponse>, ApiError> {
    let Json(body) = body?;
    let request = body.into_request()?;
    state.messaging.send(request).await?;
    Ok(Json(SendResponse {
        ok: true,
        sent: true,
    }))
}

pub async fn broadcast(
    State(state): State<AppState>,
    body: Result<Json<BroadcastBody>, JsonRejection>,
) -> Result<Json<BroadcastResponse>, ApiError> {
    let Json(body) = body?;
    let (request, phones) = body.into_request()?;
    let result = state.messaging.broadcast(request).await;
    Ok(Json(BroadcastResponse::new(result, &phones)))
}

pub async fn inbound(
    State(state): State<AppState>,
    body: Result<Json<InboundBody>, JsonRejection>,
) -> Result<Json<InboundResponse>, ApiError> {
    let Json(body) = body?;
    let replied = state.messaging.handle_inbound(&body.from, &body.body).await?;
    Ok(Json(InboundResponse { ok: true, replied }))
}
