use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use kindred_shared::errors::{AppError, AppResult, ErrorCode};
use kindred_shared::types::auth::AuthUser;
use kindred_shared::types::ApiResponse;

use crate::models::NewUser;
use crate::routes::current_user;
use crate::services::{auth_service, token_service};
use crate::store::StoreError;
use crate::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    pub name: String,
    #[validate(email(message = "invalid email format"))]
    pub email: String,
    pub password: String,
    /// `YYYY-MM-DD`
    pub date_of_birth: String,
    pub gender: String,
    pub username: String,
    pub profile_photo: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub token: String,
    pub user_id: Uuid,
    pub needs_face_verification: bool,
    pub needs_assessment: bool,
}

pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegisterRequest>,
) -> AppResult<Json<ApiResponse<RegisterResponse>>> {
    req.validate()
        .map_err(|e| AppError::new(ErrorCode::ValidationError, e.to_string()))?;

    auth_service::validate_password(&req.password)?;

    if req.name.trim().is_empty() || req.username.trim().is_empty() {
        return Err(AppError::new(ErrorCode::ValidationError, "name and username are required"));
    }

    let email = req.email.to_lowercase();

    if state.store.user_by_email(&email)?.is_some() {
        return Err(AppError::new(ErrorCode::EmailAlreadyExists, "email already registered"));
    }
    if state.store.username_exists(&req.username)? {
        return Err(AppError::new(ErrorCode::UsernameTaken, "username already taken"));
    }

    let password_hash = auth_service::hash_password(&req.password)?;

    let user = state
        .store
        .create_user(NewUser {
            name: req.name,
            email,
            username: req.username,
            password_hash,
            date_of_birth: req.date_of_birth,
            gender: req.gender,
            latitude: req.latitude,
            longitude: req.longitude,
            profile_photo: req.profile_photo,
        })
        .map_err(|e| match e {
            StoreError::Duplicate("email") => {
                AppError::new(ErrorCode::EmailAlreadyExists, "email already registered")
            }
            StoreError::Duplicate("username") => {
                AppError::new(ErrorCode::UsernameTaken, "username already taken")
            }
            other => other.into(),
        })?;

    let token = token_service::create_access_token(user.id, user.role, &state.config.jwt_secret)?;

    tracing::info!(user_id = %user.id, "user registered");

    Ok(Json(ApiResponse::ok_with_message(
        RegisterResponse {
            token,
            user_id: user.id,
            needs_face_verification: true,
            needs_assessment: true,
        },
        "Registration successful",
    )))
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user_id: Uuid,
    pub verified_face: bool,
    pub assessments_completed: bool,
    pub readiness: f64,
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<ApiResponse<LoginResponse>>> {
    let user = state
        .store
        .user_by_email(&req.email.to_lowercase())?
        .ok_or_else(|| AppError::new(ErrorCode::InvalidCredentials, "invalid credentials"))?;

    if !auth_service::verify_password(&req.password, &user.password_hash)? {
        return Err(AppError::new(ErrorCode::InvalidCredentials, "invalid credentials"));
    }

    let token = token_service::create_access_token(user.id, user.role, &state.config.jwt_secret)?;

    Ok(Json(ApiResponse::ok_with_message(
        LoginResponse {
            token,
            user_id: user.id,
            verified_face: user.verified_face,
            assessments_completed: user.assessments_completed,
            readiness: user.readiness.unwrap_or(0.0),
        },
        "Login successful",
    )))
}

#[derive(Debug, Deserialize)]
pub struct FaceVerificationRequest {
    pub selfie_photo: String,
}

#[derive(Debug, Serialize)]
pub struct FaceVerificationResponse {
    pub verified: bool,
}

pub async fn verify_face(
    auth_user: AuthUser,
    State(state): State<Arc<AppState>>,
    Json(req): Json<FaceVerificationRequest>,
) -> AppResult<Json<ApiResponse<FaceVerificationResponse>>> {
    let user = current_user(state.store.as_ref(), &auth_user)?;

    let portrait = user
        .profile_photos
        .first()
        .ok_or_else(|| AppError::new(ErrorCode::ValidationError, "no profile photo on record"))?;

    let result = state.face.compare(portrait, &req.selfie_photo).await?;

    if result.matched {
        state.store.mark_face_verified(user.id, &req.selfie_photo)?;
        tracing::info!(user_id = %user.id, similarity = result.similarity, "face verified");
        Ok(Json(ApiResponse::ok_with_message(
            FaceVerificationResponse { verified: true },
            "Face verified successfully",
        )))
    } else {
        Ok(Json(ApiResponse::ok_with_message(
            FaceVerificationResponse { verified: false },
            "Face verification failed",
        )))
    }
}
