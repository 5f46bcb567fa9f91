use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use kindred_shared::errors::{AppError, AppResult, ErrorCode};
use kindred_shared::types::auth::AuthUser;
use kindred_shared::types::ApiResponse;

use crate::models::{NewConsultation, SessionType};
use crate::routes::current_user;
use crate::AppState;

/// Consultations unlock at this readiness score; the boundary is inclusive.
const READINESS_THRESHOLD: f64 = 80.0;

#[derive(Debug, Clone, Serialize)]
pub struct Counselor {
    pub id: &'static str,
    pub name: &'static str,
    pub specialization: &'static str,
    pub price: f64,
    pub rating: f64,
}

const COUNSELORS: [Counselor; 2] = [
    Counselor {
        id: "counselor-1",
        name: "Dr. Sarah Johnson",
        specialization: "Relationship Counseling",
        price: 150_000.0,
        rating: 4.8,
    },
    Counselor {
        id: "counselor-2",
        name: "Dr. Michael Chen",
        specialization: "Marriage Therapy",
        price: 200_000.0,
        rating: 4.9,
    },
];

fn require_readiness(readiness: Option<f64>) -> AppResult<()> {
    if readiness.unwrap_or(0.0) >= READINESS_THRESHOLD {
        Ok(())
    } else {
        Err(AppError::new(
            ErrorCode::ReadinessTooLow,
            "consultation requires a readiness score of 80 or higher",
        ))
    }
}

#[derive(Debug, Serialize)]
pub struct CounselorListResponse {
    pub counselors: Vec<Counselor>,
}

pub async fn list_counselors(
    auth_user: AuthUser,
    State(state): State<Arc<AppState>>,
) -> AppResult<Json<ApiResponse<CounselorListResponse>>> {
    let user = current_user(state.store.as_ref(), &auth_user)?;
    require_readiness(user.readiness)?;

    Ok(Json(ApiResponse::ok(CounselorListResponse {
        counselors: COUNSELORS.to_vec(),
    })))
}

#[derive(Debug, Deserialize)]
pub struct BookRequest {
    pub counselor_id: String,
    pub schedule: String,
    pub session_type: SessionType,
}

#[derive(Debug, Serialize)]
pub struct BookResponse {
    pub consult_id: Uuid,
    pub payment_id: String,
    pub status: String,
}

pub async fn book_consultation(
    auth_user: AuthUser,
    State(state): State<Arc<AppState>>,
    Json(req): Json<BookRequest>,
) -> AppResult<Json<ApiResponse<BookResponse>>> {
    let user = current_user(state.store.as_ref(), &auth_user)?;
    require_readiness(user.readiness)?;

    let counselor = COUNSELORS
        .iter()
        .find(|c| c.id == req.counselor_id)
        .ok_or_else(|| AppError::new(ErrorCode::CounselorNotFound, "counselor not found"))?;

    let external_id = Uuid::new_v4().to_string();
    let invoice = state
        .payment
        .create_invoice(
            &external_id,
            counselor.price,
            &user.email,
            &format!("Consultation with {}", counselor.name),
        )
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "payment provider failure");
            AppError::new(ErrorCode::PaymentFailed, "payment could not be processed")
        })?;

    let consultation = state.store.insert_consultation(NewConsultation {
        user_id: user.id,
        counselor_id: req.counselor_id,
        schedule: req.schedule,
        session_type: req.session_type,
        payment_id: invoice.payment_id.clone(),
        status: invoice.status.clone(),
    })?;

    tracing::info!(
        user_id = %user.id,
        consult_id = %consultation.id,
        payment_id = %invoice.payment_id,
        "consultation booked"
    );

    Ok(Json(ApiResponse::ok_with_message(
        BookResponse {
            consult_id: consultation.id,
            payment_id: invoice.payment_id,
            status: invoice.status,
        },
        "Consultation booked successfully",
    )))
}
