use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use kindred_shared::types::auth::UserRole;

// --- Assessment test types ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestType {
    Mbti,
    LoveLanguage,
    Readiness,
    Temperament,
    Disc,
}

impl TestType {
    pub const ALL: [TestType; 5] = [
        TestType::Mbti,
        TestType::LoveLanguage,
        TestType::Readiness,
        TestType::Temperament,
        TestType::Disc,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TestType::Mbti => "mbti",
            TestType::LoveLanguage => "love_language",
            TestType::Readiness => "readiness",
            TestType::Temperament => "temperament",
            TestType::Disc => "disc",
        }
    }
}

impl std::fmt::Display for TestType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TestType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mbti" => Ok(TestType::Mbti),
            "love_language" => Ok(TestType::LoveLanguage),
            "readiness" => Ok(TestType::Readiness),
            "temperament" => Ok(TestType::Temperament),
            "disc" => Ok(TestType::Disc),
            _ => Err(format!("unknown test type: {s}")),
        }
    }
}

// --- User ---

#[derive(Debug, Clone)]
pub struct UserRecord {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub username: String,
    pub password_hash: String,
    /// `YYYY-MM-DD`; malformed values are tolerated and read as age 0.
    pub date_of_birth: String,
    pub gender: String,
    pub latitude: f64,
    pub longitude: f64,
    pub profile_photos: Vec<String>,
    pub selfie_photo: Option<String>,
    pub verified_face: bool,
    pub mbti: Option<String>,
    pub love_language: Option<String>,
    /// None until a readiness test has been explicitly submitted;
    /// an all-zero submission stores Some(0.0) and counts as present.
    pub readiness: Option<f64>,
    pub temperament: Option<String>,
    pub disc: Option<String>,
    pub assessments_completed: bool,
    pub blocked_users: Vec<Uuid>,
    pub bio: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
}

impl UserRecord {
    /// The completeness flag is derived state: it must always equal this
    /// predicate over the five axis fields.
    pub fn assessments_complete(&self) -> bool {
        self.mbti.is_some()
            && self.love_language.is_some()
            && self.readiness.is_some()
            && self.temperament.is_some()
            && self.disc.is_some()
    }

    pub fn has_blocked(&self, other: Uuid) -> bool {
        self.blocked_users.contains(&other)
    }
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub username: String,
    pub password_hash: String,
    pub date_of_birth: String,
    pub gender: String,
    pub latitude: f64,
    pub longitude: f64,
    pub profile_photo: String,
}

// --- Assessment history ---

#[derive(Debug, Clone)]
pub struct AssessmentRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub test_type: TestType,
    pub answers: Vec<i32>,
    pub result_label: String,
    pub result_score: f64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewAssessment {
    pub user_id: Uuid,
    pub test_type: TestType,
    pub answers: Vec<i32>,
    pub result_label: String,
    pub result_score: f64,
}

// --- Like ---

#[derive(Debug, Clone)]
pub struct Like {
    pub id: Uuid,
    pub from_user_id: Uuid,
    pub to_user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

// --- Match ---

/// Undirected pairing, stored with `user_a_id < user_b_id` so the
/// unordered-pair uniqueness invariant is a plain unique key.
#[derive(Debug, Clone)]
pub struct MatchRecord {
    pub id: Uuid,
    pub user_a_id: Uuid,
    pub user_b_id: Uuid,
    pub matched_at: DateTime<Utc>,
}

impl MatchRecord {
    pub fn involves(&self, user_id: Uuid) -> bool {
        self.user_a_id == user_id || self.user_b_id == user_id
    }

    pub fn peer_of(&self, user_id: Uuid) -> Uuid {
        if self.user_a_id == user_id {
            self.user_b_id
        } else {
            self.user_a_id
        }
    }
}

/// Normalize an unordered pair to its storage order.
pub fn sorted_pair(a: Uuid, b: Uuid) -> (Uuid, Uuid) {
    if a < b { (a, b) } else { (b, a) }
}

// --- Chat ---

#[derive(Debug, Clone)]
pub struct ChatChannel {
    pub id: Uuid,
    pub match_id: Uuid,
    pub user_a_id: Uuid,
    pub user_b_id: Uuid,
    pub last_message: Option<String>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Text,
    Image,
    Voice,
}

impl MessageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageKind::Text => "text",
            MessageKind::Image => "image",
            MessageKind::Voice => "voice",
        }
    }
}

impl std::str::FromStr for MessageKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(MessageKind::Text),
            "image" => Ok(MessageKind::Image),
            "voice" => Ok(MessageKind::Voice),
            _ => Err(format!("unknown message kind: {s}")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MessageRecord {
    pub id: Uuid,
    pub match_id: Uuid,
    pub sender_id: Uuid,
    pub content: String,
    pub kind: MessageKind,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewMessage {
    pub match_id: Uuid,
    pub sender_id: Uuid,
    pub content: String,
    pub kind: MessageKind,
}

// --- Feed ---

#[derive(Debug, Clone)]
pub struct FeedPost {
    pub id: Uuid,
    pub user_id: Uuid,
    pub content: String,
    pub images: Vec<String>,
    pub visibility: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewFeedPost {
    pub user_id: Uuid,
    pub content: String,
    pub images: Vec<String>,
}

// --- Moderation ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportTarget {
    User,
    Feed,
}

#[derive(Debug, Clone)]
pub struct Report {
    pub id: Uuid,
    pub reporter_id: Uuid,
    pub target_type: ReportTarget,
    pub target_id: Uuid,
    pub reason: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewReport {
    pub reporter_id: Uuid,
    pub target_type: ReportTarget,
    pub target_id: Uuid,
    pub reason: String,
}

// --- Consultation ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionType {
    Chat,
    Video,
}

#[derive(Debug, Clone)]
pub struct Consultation {
    pub id: Uuid,
    pub user_id: Uuid,
    pub counselor_id: String,
    pub schedule: String,
    pub session_type: SessionType,
    pub payment_id: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewConsultation {
    pub user_id: Uuid,
    pub counselor_id: String,
    pub schedule: String,
    pub session_type: SessionType,
    pub payment_id: String,
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_user() -> UserRecord {
        UserRecord {
            id: Uuid::now_v7(),
            name: "Test".into(),
            email: "test@example.com".into(),
            username: "test".into(),
            password_hash: "x".into(),
            date_of_birth: "1995-06-15".into(),
            gender: "female".into(),
            latitude: 0.0,
            longitude: 0.0,
            profile_photos: vec!["photo".into()],
            selfie_photo: None,
            verified_face: false,
            mbti: None,
            love_language: None,
            readiness: None,
            temperament: None,
            disc: None,
            assessments_completed: false,
            blocked_users: vec![],
            bio: String::new(),
            role: UserRole::User,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn completeness_requires_all_five_axes() {
        let mut user = base_user();
        assert!(!user.assessments_complete());

        user.mbti = Some("ENFP".into());
        user.love_language = Some("Gifts".into());
        user.temperament = Some("Sanguine".into());
        user.disc = Some("Influence".into());
        assert!(!user.assessments_complete());

        // An explicitly submitted zero counts as present.
        user.readiness = Some(0.0);
        assert!(user.assessments_complete());
    }

    #[test]
    fn sorted_pair_is_order_independent() {
        let a = Uuid::now_v7();
        let b = Uuid::now_v7();
        assert_eq!(sorted_pair(a, b), sorted_pair(b, a));
        assert!(sorted_pair(a, b).0 < sorted_pair(a, b).1);
    }
}
