use std::collections::HashSet;
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use kindred_shared::errors::{AppError, AppResult, ErrorCode};
use kindred_shared::types::auth::AuthUser;
use kindred_shared::types::pagination::PaginationParams;
use kindred_shared::types::ApiResponse;

use crate::models::NewFeedPost;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct FeedAuthor {
    pub id: Uuid,
    pub name: String,
    pub profile_photo: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct FeedView {
    pub id: Uuid,
    pub user: FeedAuthor,
    pub content: String,
    pub images: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub is_mine: bool,
}

#[derive(Debug, Serialize)]
pub struct FeedListResponse {
    pub feeds: Vec<FeedView>,
}

/// Author identity stays anonymous unless the viewer is matched with the
/// author.
pub async fn get_feeds(
    auth_user: AuthUser,
    State(state): State<Arc<AppState>>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<ApiResponse<FeedListResponse>>> {
    let posts = state.store.feeds_page(params.offset(), params.limit())?;

    let matched_ids: HashSet<Uuid> = state
        .store
        .matches_for_user(auth_user.id)?
        .into_iter()
        .map(|m| m.peer_of(auth_user.id))
        .collect();

    let mut feeds = Vec::with_capacity(posts.len());
    for post in posts {
        let Some(author) = state.store.user_by_id(post.user_id)? else {
            continue;
        };
        let is_matched = matched_ids.contains(&author.id);

        feeds.push(FeedView {
            id: post.id,
            user: FeedAuthor {
                id: author.id,
                name: if is_matched {
                    author.name
                } else {
                    "Anonymous User".to_string()
                },
                profile_photo: if is_matched {
                    author.profile_photos.first().cloned()
                } else {
                    None
                },
            },
            content: post.content,
            images: post.images,
            created_at: post.created_at,
            is_mine: post.user_id == auth_user.id,
        });
    }

    Ok(Json(ApiResponse::ok(FeedListResponse { feeds })))
}

#[derive(Debug, Deserialize)]
pub struct CreateFeedRequest {
    pub content: String,
    #[serde(default)]
    pub images: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct CreateFeedResponse {
    pub feed_id: Uuid,
}

pub async fn create_feed(
    auth_user: AuthUser,
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateFeedRequest>,
) -> AppResult<Json<ApiResponse<CreateFeedResponse>>> {
    if req.content.trim().is_empty() {
        return Err(AppError::new(ErrorCode::ValidationError, "content is required"));
    }

    let post = state.store.insert_feed(NewFeedPost {
        user_id: auth_user.id,
        content: req.content,
        images: req.images,
    })?;

    Ok(Json(ApiResponse::ok_with_message(
        CreateFeedResponse { feed_id: post.id },
        "Feed created successfully",
    )))
}
