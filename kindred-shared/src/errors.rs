use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::types::ApiErrorResponse;

/// Application error codes following the pattern E{area}{sequence}
///
/// Ranges:
/// - E0xxx: Shared/infrastructure errors
/// - E1xxx: Auth errors
/// - E2xxx: Profile errors
/// - E3xxx: Assessment errors
/// - E4xxx: Discovery/matching errors
/// - E5xxx: Chat errors
/// - E6xxx: Moderation errors
/// - E7xxx: Consultation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    // Shared (E0xxx)
    InternalError,
    ValidationError,
    NotFound,
    Unauthorized,
    Forbidden,
    BadRequest,
    DependencyFailure,
    ProviderUnavailable,

    // Auth (E1xxx)
    InvalidCredentials,
    EmailAlreadyExists,
    UsernameTaken,
    TokenExpired,
    TokenInvalid,
    PasswordTooWeak,

    // Profile (E2xxx)
    ProfileNotFound,
    CannotBlockSelf,

    // Assessment (E3xxx)
    UnknownTestType,
    WrongAnswerCount,
    AnswerOutOfRange,
    AssessmentsIncomplete,

    // Matching (E4xxx)
    CannotLikeSelf,
    MatchNotFound,

    // Chat (E5xxx)
    NotMatchParticipant,
    InvalidMessageKind,
    EmptyMessage,

    // Moderation (E6xxx)
    ReportTargetNotFound,
    CannotReportSelf,

    // Consultation (E7xxx)
    ReadinessTooLow,
    CounselorNotFound,
    PaymentFailed,
}

impl ErrorCode {
    pub fn code(&self) -> &'static str {
        match self {
            // Shared
            Self::InternalError => "E0001",
            Self::ValidationError => "E0002",
            Self::NotFound => "E0003",
            Self::Unauthorized => "E0004",
            Self::Forbidden => "E0005",
            Self::BadRequest => "E0006",
            Self::DependencyFailure => "E0007",
            Self::ProviderUnavailable => "E0008",

            // Auth
            Self::InvalidCredentials => "E1001",
            Self::EmailAlreadyExists => "E1002",
            Self::UsernameTaken => "E1003",
            Self::TokenExpired => "E1004",
            Self::TokenInvalid => "E1005",
            Self::PasswordTooWeak => "E1006",

            // Profile
            Self::ProfileNotFound => "E2001",
            Self::CannotBlockSelf => "E2002",

            // Assessment
            Self::UnknownTestType => "E3001",
            Self::WrongAnswerCount => "E3002",
            Self::AnswerOutOfRange => "E3003",
            Self::AssessmentsIncomplete => "E3004",

            // Matching
            Self::CannotLikeSelf => "E4001",
            Self::MatchNotFound => "E4002",

            // Chat
            Self::NotMatchParticipant => "E5001",
            Self::InvalidMessageKind => "E5002",
            Self::EmptyMessage => "E5003",

            // Moderation
            Self::ReportTargetNotFound => "E6001",
            Self::CannotReportSelf => "E6002",

            // Consultation
            Self::ReadinessTooLow => "E7001",
            Self::CounselorNotFound => "E7002",
            Self::PaymentFailed => "E7003",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InternalError | Self::DependencyFailure => StatusCode::INTERNAL_SERVER_ERROR,
            Self::ProviderUnavailable | Self::PaymentFailed => StatusCode::BAD_GATEWAY,
            Self::ValidationError | Self::BadRequest | Self::PasswordTooWeak
            | Self::WrongAnswerCount | Self::AnswerOutOfRange | Self::CannotLikeSelf
            | Self::CannotBlockSelf | Self::InvalidMessageKind | Self::EmptyMessage => {
                StatusCode::BAD_REQUEST
            }
            Self::NotFound | Self::ProfileNotFound | Self::UnknownTestType
            | Self::MatchNotFound | Self::ReportTargetNotFound | Self::CounselorNotFound => {
                StatusCode::NOT_FOUND
            }
            Self::Unauthorized | Self::InvalidCredentials | Self::TokenExpired
            | Self::TokenInvalid => StatusCode::UNAUTHORIZED,
            Self::Forbidden | Self::AssessmentsIncomplete | Self::NotMatchParticipant
            | Self::ReadinessTooLow | Self::CannotReportSelf => StatusCode::FORBIDDEN,
            Self::EmailAlreadyExists | Self::UsernameTaken => StatusCode::CONFLICT,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    Known {
        code: ErrorCode,
        message: String,
        details: Option<serde_json::Value>,
    },

    #[error("internal server error")]
    Internal(#[from] anyhow::Error),

    #[error("database error: {0}")]
    Database(#[from] diesel::result::Error),

    #[error("validation error: {0}")]
    Validation(String),
}

impl AppError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::Known {
            code,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(code: ErrorCode, message: impl Into<String>, details: serde_json::Value) -> Self {
        Self::Known {
            code,
            message: message.into(),
            details: Some(details),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthorized, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::BadRequest, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Forbidden, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_response) = match &self {
            AppError::Known { code, message, details } => {
                let status = code.status_code();
                let mut resp = ApiErrorResponse::new(code.code(), message);
                if let Some(d) = details {
                    resp = resp.with_details(d.clone());
                }
                (status, resp)
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiErrorResponse::new("E0001", "internal server error"),
                )
            }
            AppError::Database(err) => {
                tracing::error!(error = %err, "database error");
                match err {
                    diesel::result::Error::NotFound => (
                        StatusCode::NOT_FOUND,
                        ApiErrorResponse::new("E0003", "resource not found"),
                    ),
                    _ => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        ApiErrorResponse::new("E0007", "database error"),
                    ),
                }
            }
            AppError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                ApiErrorResponse::new("E0002", msg),
            ),
        };

        (status, Json(error_response)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
