use std::collections::HashSet;
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use kindred_shared::errors::{AppError, AppResult, ErrorCode};
use kindred_shared::types::auth::AuthUser;
use kindred_shared::types::ApiResponse;

use crate::matching::discover::{paginate, rank_candidates, DiscoverPage};
use crate::routes::current_user;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct DiscoverQuery {
    #[serde(default = "default_radius")]
    pub radius: f64,
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_limit")]
    pub limit: u64,
}

fn default_radius() -> f64 { 50.0 }
fn default_page() -> u64 { 1 }
fn default_limit() -> u64 { 20 }

pub async fn discover(
    auth_user: AuthUser,
    State(state): State<Arc<AppState>>,
    Query(query): Query<DiscoverQuery>,
) -> AppResult<Json<ApiResponse<DiscoverPage>>> {
    if query.page < 1 || query.limit < 1 {
        return Err(AppError::new(
            ErrorCode::ValidationError,
            "page and limit must be positive",
        ));
    }
    if !query.radius.is_finite() || query.radius < 0.0 {
        return Err(AppError::new(ErrorCode::ValidationError, "invalid radius"));
    }

    let requester = current_user(state.store.as_ref(), &auth_user)?;

    // Eligibility, not validation: the requester is authenticated but has
    // not finished onboarding.
    if !requester.assessments_completed {
        return Err(AppError::new(
            ErrorCode::AssessmentsIncomplete,
            "complete all assessments first",
        ));
    }

    let pool = state.store.assessed_profiles_excluding(requester.id)?;
    let liked: HashSet<Uuid> = state.store.likes_from(requester.id)?.into_iter().collect();

    let ranked = rank_candidates(
        &requester,
        pool,
        &liked,
        query.radius,
        Utc::now().date_naive(),
    );
    let page = paginate(ranked, query.page, query.limit);

    tracing::debug!(
        user_id = %requester.id,
        radius_km = query.radius,
        total = page.total,
        "discover page served"
    );

    Ok(Json(ApiResponse::ok(page)))
}
