//! Persistence boundary. The document store is an external collaborator:
//! the engine and routes only ever see this trait, and hold no
//! authoritative state of their own.

use uuid::Uuid;

use kindred_shared::errors::{AppError, ErrorCode};

use crate::models::{
    AssessmentRecord, ChatChannel, Consultation, FeedPost, MatchRecord, MessageRecord,
    NewAssessment, NewConsultation, NewFeedPost, NewMessage, NewReport, NewUser, Report, TestType,
    UserRecord,
};

mod memory;
mod postgres;
pub mod schema;

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,
    #[error("duplicate {0}")]
    Duplicate(&'static str),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => AppError::new(ErrorCode::NotFound, "resource not found"),
            StoreError::Duplicate(field) => {
                AppError::new(ErrorCode::BadRequest, format!("duplicate {field}"))
            }
            StoreError::Unavailable(reason) => {
                tracing::error!(error = %reason, "store unavailable");
                AppError::new(ErrorCode::DependencyFailure, "store unavailable")
            }
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Result of an insert-or-detect match creation.
#[derive(Debug, Clone)]
pub struct MatchOutcome {
    pub record: MatchRecord,
    /// False when a concurrent or earlier call already created the pair.
    pub created: bool,
}

/// Every method is a single short round-trip; handlers run them inline the
/// same way the rest of the service runs its database calls.
pub trait Store: Send + Sync {
    /// Cheap liveness probe for the health endpoint.
    fn ping(&self) -> StoreResult<()>;

    // --- Users ---

    /// Fails with `Duplicate("email")` / `Duplicate("username")`.
    fn create_user(&self, new_user: NewUser) -> StoreResult<UserRecord>;
    fn user_by_id(&self, id: Uuid) -> StoreResult<Option<UserRecord>>;
    fn user_by_email(&self, email: &str) -> StoreResult<Option<UserRecord>>;
    fn username_exists(&self, username: &str) -> StoreResult<bool>;
    fn mark_face_verified(&self, user_id: Uuid, selfie_photo: &str) -> StoreResult<()>;

    /// Writes one axis and recomputes the derived completeness flag from the
    /// five axis fields. Returns the updated record.
    fn record_assessment_result(
        &self,
        user_id: Uuid,
        test_type: TestType,
        label: &str,
        score: f64,
    ) -> StoreResult<UserRecord>;

    fn add_blocked_user(&self, user_id: Uuid, blocked: Uuid) -> StoreResult<()>;

    /// All fully-assessed profiles except the requester's own.
    fn assessed_profiles_excluding(&self, requester: Uuid) -> StoreResult<Vec<UserRecord>>;

    // --- Assessment history (append-only) ---

    fn append_assessment(&self, rec: NewAssessment) -> StoreResult<AssessmentRecord>;

    // --- Likes and matches ---

    /// Returns false when the ordered pair already existed (idempotent).
    fn insert_like(&self, from: Uuid, to: Uuid) -> StoreResult<bool>;
    fn like_exists(&self, from: Uuid, to: Uuid) -> StoreResult<bool>;
    fn likes_from(&self, from: Uuid) -> StoreResult<Vec<Uuid>>;

    /// Atomic per unordered pair: concurrent calls for the same two users
    /// yield exactly one Match and one ChatChannel. The loser gets the
    /// winner's record with `created: false`.
    fn create_match_with_channel(&self, a: Uuid, b: Uuid) -> StoreResult<MatchOutcome>;

    fn match_by_id(&self, id: Uuid) -> StoreResult<Option<MatchRecord>>;
    fn matches_for_user(&self, user_id: Uuid) -> StoreResult<Vec<MatchRecord>>;
    fn channel_for_match(&self, match_id: Uuid) -> StoreResult<Option<ChatChannel>>;

    // --- Messages ---

    /// Appends the message and refreshes the owning channel's cached
    /// last-message fields in the same store operation.
    fn append_message(&self, new_msg: NewMessage) -> StoreResult<MessageRecord>;

    /// One page ordered by creation time descending, plus the total count.
    fn messages_page(
        &self,
        match_id: Uuid,
        offset: u64,
        limit: u64,
    ) -> StoreResult<(Vec<MessageRecord>, u64)>;

    // --- Feeds ---

    fn insert_feed(&self, new_feed: NewFeedPost) -> StoreResult<FeedPost>;
    /// Public posts, newest first.
    fn feeds_page(&self, offset: u64, limit: u64) -> StoreResult<Vec<FeedPost>>;
    fn feed_exists(&self, id: Uuid) -> StoreResult<bool>;

    // --- Moderation ---

    fn insert_report(&self, new_report: NewReport) -> StoreResult<Report>;

    // --- Consultations ---

    fn insert_consultation(&self, new_consultation: NewConsultation) -> StoreResult<Consultation>;
}
