use axum::extract::State;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use kindred_shared::errors::{AppError, AppResult, ErrorCode};
use kindred_shared::types::auth::AuthUser;
use kindred_shared::types::ApiResponse;

use crate::matching::like::submit_like;
use crate::realtime::handlers::notify_new_match;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct LikeRequest {
    pub target_user_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct LikeResponse {
    pub already_liked: bool,
    #[serde(rename = "match")]
    pub matched: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_id: Option<Uuid>,
}

pub async fn like_user(
    auth_user: AuthUser,
    State(state): State<Arc<AppState>>,
    Json(req): Json<LikeRequest>,
) -> AppResult<Json<ApiResponse<LikeResponse>>> {
    if req.target_user_id == auth_user.id {
        return Err(AppError::new(ErrorCode::CannotLikeSelf, "cannot like yourself"));
    }

    if state.store.user_by_id(req.target_user_id)?.is_none() {
        return Err(AppError::new(ErrorCode::ProfileNotFound, "target user not found"));
    }

    let outcome = submit_like(state.store.as_ref(), auth_user.id, req.target_user_id)?;

    // Post-commit, fire-and-forget.
    if outcome.newly_matched {
        if let Some(match_id) = outcome.match_id {
            notify_new_match(&state.io, auth_user.id, req.target_user_id, match_id);
            tracing::info!(
                user_a = %auth_user.id,
                user_b = %req.target_user_id,
                match_id = %match_id,
                "mutual like, match created"
            );
        }
    }

    let message = if outcome.already_liked {
        "Already liked"
    } else if outcome.matched {
        "It's a match!"
    } else {
        "Like sent"
    };

    Ok(Json(ApiResponse::ok_with_message(
        LikeResponse {
            already_liked: outcome.already_liked,
            matched: outcome.matched,
            match_id: outcome.match_id,
        },
        message,
    )))
}

#[derive(Debug, Serialize)]
pub struct MatchPeer {
    pub id: Uuid,
    pub name: String,
    pub profile_photo: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MatchSummary {
    pub match_id: Uuid,
    pub user: MatchPeer,
    pub last_message: Option<String>,
    pub matched_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct MatchListResponse {
    pub matches: Vec<MatchSummary>,
}

pub async fn get_matches(
    auth_user: AuthUser,
    State(state): State<Arc<AppState>>,
) -> AppResult<Json<ApiResponse<MatchListResponse>>> {
    let matches = state.store.matches_for_user(auth_user.id)?;

    let mut summaries = Vec::with_capacity(matches.len());
    for record in matches {
        let peer_id = record.peer_of(auth_user.id);
        let Some(peer) = state.store.user_by_id(peer_id)? else {
            continue;
        };
        let channel = state.store.channel_for_match(record.id)?;

        summaries.push(MatchSummary {
            match_id: record.id,
            user: MatchPeer {
                id: peer.id,
                name: peer.name,
                profile_photo: peer.profile_photos.first().cloned(),
            },
            last_message: channel.and_then(|c| c.last_message),
            matched_at: record.matched_at,
        });
    }

    Ok(Json(ApiResponse::ok(MatchListResponse { matches: summaries })))
}
