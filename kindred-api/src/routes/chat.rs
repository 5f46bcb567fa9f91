use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;
use uuid::Uuid;

use kindred_shared::errors::{AppError, AppResult, ErrorCode};
use kindred_shared::types::auth::AuthUser;
use kindred_shared::types::ApiResponse;

use crate::models::{MatchRecord, MessageKind, NewMessage};
use crate::realtime::handlers::notify_new_message;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatPageQuery {
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_limit")]
    pub limit: u64,
}

fn default_page() -> u64 { 1 }
fn default_limit() -> u64 { 50 }

/// 404 for an unknown match, 403 for a valid match the requester is not
/// part of.
fn authorize_participant(
    state: &AppState,
    match_id: Uuid,
    user_id: Uuid,
) -> AppResult<MatchRecord> {
    let record = state
        .store
        .match_by_id(match_id)?
        .ok_or_else(|| AppError::new(ErrorCode::MatchNotFound, "match not found"))?;

    if !record.involves(user_id) {
        return Err(AppError::new(
            ErrorCode::NotMatchParticipant,
            "you are not part of this match",
        ));
    }

    Ok(record)
}

#[derive(Debug, Serialize)]
pub struct MessageView {
    pub id: Uuid,
    pub sender_id: Uuid,
    pub content: String,
    #[serde(rename = "type")]
    pub kind: MessageKind,
    pub created_at: DateTime<Utc>,
    pub is_mine: bool,
}

#[derive(Debug, Serialize)]
pub struct MessagesResponse {
    pub messages: Vec<MessageView>,
    pub total: u64,
}

/// Page boundaries are computed on the newest-first order, then each page
/// is reversed so it reads oldest-first: page 1 is always the most recent
/// `limit` messages in chronological order.
pub async fn get_messages(
    auth_user: AuthUser,
    State(state): State<Arc<AppState>>,
    Path(match_id): Path<Uuid>,
    Query(query): Query<ChatPageQuery>,
) -> AppResult<Json<ApiResponse<MessagesResponse>>> {
    if query.page < 1 || query.limit < 1 {
        return Err(AppError::new(
            ErrorCode::ValidationError,
            "page and limit must be positive",
        ));
    }

    authorize_participant(&state, match_id, auth_user.id)?;

    let offset = (query.page - 1) * query.limit;
    let (mut page, total) = state.store.messages_page(match_id, offset, query.limit)?;
    page.reverse();

    let messages = page
        .into_iter()
        .map(|m| MessageView {
            id: m.id,
            is_mine: m.sender_id == auth_user.id,
            sender_id: m.sender_id,
            content: m.content,
            kind: m.kind,
            created_at: m.created_at,
        })
        .collect();

    Ok(Json(ApiResponse::ok(MessagesResponse { messages, total })))
}

#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub content: String,
    #[serde(default = "default_kind")]
    pub message_type: String,
}

fn default_kind() -> String { "text".into() }

#[derive(Debug, Serialize)]
pub struct SendMessageResponse {
    pub message_id: Uuid,
    pub created_at: DateTime<Utc>,
}

pub async fn send_message(
    auth_user: AuthUser,
    State(state): State<Arc<AppState>>,
    Path(match_id): Path<Uuid>,
    Json(req): Json<SendMessageRequest>,
) -> AppResult<Json<ApiResponse<SendMessageResponse>>> {
    if req.content.trim().is_empty() {
        return Err(AppError::new(ErrorCode::EmptyMessage, "message content is required"));
    }

    let kind = MessageKind::from_str(&req.message_type).map_err(|_| {
        AppError::new(
            ErrorCode::InvalidMessageKind,
            "message type must be text, image or voice",
        )
    })?;

    authorize_participant(&state, match_id, auth_user.id)?;

    let message = state.store.append_message(NewMessage {
        match_id,
        sender_id: auth_user.id,
        content: req.content,
        kind,
    })?;

    // Best-effort push to whoever is in the room right now.
    notify_new_message(
        &state.io,
        match_id,
        &serde_json::json!({
            "match_id": match_id,
            "message_id": message.id,
            "sender_id": message.sender_id,
            "content": message.content,
            "type": message.kind,
            "created_at": message.created_at,
        }),
    );

    Ok(Json(ApiResponse::ok(SendMessageResponse {
        message_id: message.id,
        created_at: message.created_at,
    })))
}
