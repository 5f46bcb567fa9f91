use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use kindred_shared::errors::{AppError, AppResult, ErrorCode};
use kindred_shared::types::auth::AuthUser;
use kindred_shared::types::ApiResponse;

use crate::models::{NewReport, ReportTarget};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ReportRequest {
    pub target_type: ReportTarget,
    pub target_id: Uuid,
    pub reason: String,
}

#[derive(Debug, Serialize)]
pub struct ReportResponse {
    pub report_id: Uuid,
}

pub async fn report(
    auth_user: AuthUser,
    State(state): State<Arc<AppState>>,
    Json(req): Json<ReportRequest>,
) -> AppResult<Json<ApiResponse<ReportResponse>>> {
    if req.reason.trim().is_empty() {
        return Err(AppError::new(ErrorCode::ValidationError, "reason is required"));
    }

    let target_exists = match req.target_type {
        ReportTarget::User => {
            if req.target_id == auth_user.id {
                return Err(AppError::new(ErrorCode::CannotReportSelf, "cannot report yourself"));
            }
            state.store.user_by_id(req.target_id)?.is_some()
        }
        ReportTarget::Feed => state.store.feed_exists(req.target_id)?,
    };

    if !target_exists {
        return Err(AppError::new(
            ErrorCode::ReportTargetNotFound,
            "report target not found",
        ));
    }

    let record = state.store.insert_report(NewReport {
        reporter_id: auth_user.id,
        target_type: req.target_type,
        target_id: req.target_id,
        reason: req.reason,
    })?;

    tracing::info!(
        reporter = %auth_user.id,
        target = %req.target_id,
        target_type = ?req.target_type,
        "report submitted"
    );

    Ok(Json(ApiResponse::ok_with_message(
        ReportResponse { report_id: record.id },
        "Report submitted successfully",
    )))
}

#[derive(Debug, Serialize)]
pub struct BlockResponse {
    pub blocked_user_id: Uuid,
}

pub async fn block_user(
    auth_user: AuthUser,
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<BlockResponse>>> {
    if user_id == auth_user.id {
        return Err(AppError::new(ErrorCode::CannotBlockSelf, "cannot block yourself"));
    }

    if state.store.user_by_id(user_id)?.is_none() {
        return Err(AppError::new(ErrorCode::ProfileNotFound, "user not found"));
    }

    state.store.add_blocked_user(auth_user.id, user_id)?;

    tracing::info!(blocker = %auth_user.id, blocked = %user_id, "user blocked");

    Ok(Json(ApiResponse::ok_with_message(
        BlockResponse { blocked_user_id: user_id },
        "User blocked successfully",
    )))
}
