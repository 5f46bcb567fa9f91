use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;

use kindred_shared::errors::{AppError, AppResult, ErrorCode};
use kindred_shared::types::auth::AuthUser;
use kindred_shared::types::ApiResponse;

use crate::assessment::questions::{questions_for, Question};
use crate::assessment::scoring::{score, ScoreOutcome, ScoringError};
use crate::models::{NewAssessment, TestType};
use crate::routes::current_user;
use crate::AppState;

fn parse_test_type(raw: &str) -> AppResult<TestType> {
    TestType::from_str(raw)
        .map_err(|_| AppError::new(ErrorCode::UnknownTestType, format!("unknown test type: {raw}")))
}

#[derive(Debug, Serialize)]
pub struct QuestionsResponse {
    pub test_type: TestType,
    pub questions: &'static [Question],
}

pub async fn get_questions(
    _auth_user: AuthUser,
    Path(test_type): Path<String>,
) -> AppResult<Json<ApiResponse<QuestionsResponse>>> {
    let test_type = parse_test_type(&test_type)?;
    Ok(Json(ApiResponse::ok(QuestionsResponse {
        test_type,
        questions: questions_for(test_type),
    })))
}

#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    pub test_type: String,
    pub answers: Vec<i32>,
}

#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub result: ScoreOutcome,
    pub all_completed: bool,
}

pub async fn submit(
    auth_user: AuthUser,
    State(state): State<Arc<AppState>>,
    Json(req): Json<SubmitRequest>,
) -> AppResult<Json<ApiResponse<SubmitResponse>>> {
    let test_type = parse_test_type(&req.test_type)?;

    // Reject before anything persists.
    let outcome = score(test_type, &req.answers).map_err(|e| match e {
        ScoringError::WrongAnswerCount(_) => {
            AppError::new(ErrorCode::WrongAnswerCount, "must provide 10 answers")
        }
        ScoringError::AnswerOutOfRange { .. } => {
            AppError::new(ErrorCode::AnswerOutOfRange, e.to_string())
        }
    })?;

    state.store.append_assessment(NewAssessment {
        user_id: auth_user.id,
        test_type,
        answers: req.answers,
        result_label: outcome.label.clone(),
        result_score: outcome.score,
    })?;

    let updated = state.store.record_assessment_result(
        auth_user.id,
        test_type,
        &outcome.label,
        outcome.score,
    )?;

    tracing::info!(
        user_id = %auth_user.id,
        test_type = %test_type,
        result = %outcome.label,
        "assessment submitted"
    );

    Ok(Json(ApiResponse::ok_with_message(
        SubmitResponse {
            result: outcome,
            all_completed: updated.assessments_completed,
        },
        "Assessment submitted successfully",
    )))
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub mbti: bool,
    pub love_language: bool,
    pub readiness: f64,
    pub temperament: bool,
    pub disc: bool,
    pub all_completed: bool,
}

pub async fn status(
    auth_user: AuthUser,
    State(state): State<Arc<AppState>>,
) -> AppResult<Json<ApiResponse<StatusResponse>>> {
    let user = current_user(state.store.as_ref(), &auth_user)?;

    Ok(Json(ApiResponse::ok(StatusResponse {
        mbti: user.mbti.is_some(),
        love_language: user.love_language.is_some(),
        readiness: user.readiness.unwrap_or(0.0),
        temperament: user.temperament.is_some(),
        disc: user.disc.is_some(),
        all_completed: user.assessments_completed,
    })))
}
