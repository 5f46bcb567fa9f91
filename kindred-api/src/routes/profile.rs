use axum::extract::{Path, State};
use axum::Json;
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use kindred_shared::errors::{AppError, AppResult, ErrorCode};
use kindred_shared::types::auth::AuthUser;
use kindred_shared::types::ApiResponse;

use crate::matching::discover::age_on;
use crate::routes::current_user;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct OwnProfileResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub username: String,
    pub age: i32,
    pub gender: String,
    pub profile_photos: Vec<String>,
    pub bio: String,
    pub verified_face: bool,
    pub mbti: Option<String>,
    pub love_language: Option<String>,
    pub readiness: f64,
    pub temperament: Option<String>,
    pub disc: Option<String>,
    pub assessments_completed: bool,
}

pub async fn get_profile(
    auth_user: AuthUser,
    State(state): State<Arc<AppState>>,
) -> AppResult<Json<ApiResponse<OwnProfileResponse>>> {
    let user = current_user(state.store.as_ref(), &auth_user)?;

    Ok(Json(ApiResponse::ok(OwnProfileResponse {
        id: user.id,
        age: age_on(&user.date_of_birth, Utc::now().date_naive()),
        name: user.name,
        email: user.email,
        username: user.username,
        gender: user.gender,
        profile_photos: user.profile_photos,
        bio: user.bio,
        verified_face: user.verified_face,
        mbti: user.mbti,
        love_language: user.love_language,
        readiness: user.readiness.unwrap_or(0.0),
        temperament: user.temperament,
        disc: user.disc,
        assessments_completed: user.assessments_completed,
    })))
}

/// Peer view: no email, no readiness, no completion flag.
#[derive(Debug, Serialize)]
pub struct PeerProfileResponse {
    pub id: Uuid,
    pub name: String,
    pub username: String,
    pub age: i32,
    pub gender: String,
    pub profile_photos: Vec<String>,
    pub bio: String,
    pub verified_face: bool,
    pub mbti: Option<String>,
    pub love_language: Option<String>,
    pub temperament: Option<String>,
    pub disc: Option<String>,
}

pub async fn get_user_profile(
    _auth_user: AuthUser,
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<PeerProfileResponse>>> {
    let user = state
        .store
        .user_by_id(user_id)?
        .ok_or_else(|| AppError::new(ErrorCode::ProfileNotFound, "user not found"))?;

    Ok(Json(ApiResponse::ok(PeerProfileResponse {
        id: user.id,
        age: age_on(&user.date_of_birth, Utc::now().date_naive()),
        name: user.name,
        username: user.username,
        gender: user.gender,
        profile_photos: user.profile_photos,
        bio: user.bio,
        verified_face: user.verified_face,
        mbti: user.mbti,
        love_language: user.love_language,
        temperament: user.temperament,
        disc: user.disc,
    })))
}
