//! In-memory store backend. One mutex over the whole dataset keeps every
//! operation trivially atomic, which is exactly what the match-creation
//! contract needs. Used by the test suites and selectable with
//! `store = "memory"` for local development.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use uuid::Uuid;

use kindred_shared::types::auth::UserRole;

use crate::models::{
    sorted_pair, AssessmentRecord, ChatChannel, Consultation, FeedPost, MatchRecord,
    MessageRecord, NewAssessment, NewConsultation, NewFeedPost, NewMessage, NewReport, NewUser,
    Report, TestType, UserRecord,
};

use super::{MatchOutcome, Store, StoreError, StoreResult};

#[derive(Default)]
struct Inner {
    users: HashMap<Uuid, UserRecord>,
    assessments: Vec<AssessmentRecord>,
    likes: HashMap<(Uuid, Uuid), Uuid>,
    matches: HashMap<Uuid, MatchRecord>,
    match_pairs: HashMap<(Uuid, Uuid), Uuid>,
    channels: HashMap<Uuid, ChatChannel>,
    /// Append order is creation order.
    messages: Vec<MessageRecord>,
    feeds: Vec<FeedPost>,
    reports: Vec<Report>,
    consultations: Vec<Consultation>,
}

#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, Inner>> {
        self.inner
            .lock()
            .map_err(|_| StoreError::Unavailable("store lock poisoned".into()))
    }
}

impl Store for MemoryStore {
    fn ping(&self) -> StoreResult<()> {
        self.lock().map(|_| ())
    }

    fn create_user(&self, new_user: NewUser) -> StoreResult<UserRecord> {
        let mut inner = self.lock()?;

        if inner.users.values().any(|u| u.email == new_user.email) {
            return Err(StoreError::Duplicate("email"));
        }
        if inner.users.values().any(|u| u.username == new_user.username) {
            return Err(StoreError::Duplicate("username"));
        }

        let user = UserRecord {
            id: Uuid::now_v7(),
            name: new_user.name,
            email: new_user.email,
            username: new_user.username,
            password_hash: new_user.password_hash,
            date_of_birth: new_user.date_of_birth,
            gender: new_user.gender,
            latitude: new_user.latitude,
            longitude: new_user.longitude,
            profile_photos: vec![new_user.profile_photo],
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
        };
        inner.users.insert(user.id, user.clone());
        Ok(user)
    }

    fn user_by_id(&self, id: Uuid) -> StoreResult<Option<UserRecord>> {
        Ok(self.lock()?.users.get(&id).cloned())
    }

    fn user_by_email(&self, email: &str) -> StoreResult<Option<UserRecord>> {
        Ok(self.lock()?.users.values().find(|u| u.email == email).cloned())
    }

    fn username_exists(&self, username: &str) -> StoreResult<bool> {
        Ok(self.lock()?.users.values().any(|u| u.username == username))
    }

    fn mark_face_verified(&self, user_id: Uuid, selfie_photo: &str) -> StoreResult<()> {
        let mut inner = self.lock()?;
        let user = inner.users.get_mut(&user_id).ok_or(StoreError::NotFound)?;
        user.verified_face = true;
        user.selfie_photo = Some(selfie_photo.to_string());
        Ok(())
    }

    fn record_assessment_result(
        &self,
        user_id: Uuid,
        test_type: TestType,
        label: &str,
        score: f64,
    ) -> StoreResult<UserRecord> {
        let mut inner = self.lock()?;
        let user = inner.users.get_mut(&user_id).ok_or(StoreError::NotFound)?;

        match test_type {
            TestType::Mbti => user.mbti = Some(label.to_string()),
            TestType::LoveLanguage => user.love_language = Some(label.to_string()),
            TestType::Readiness => user.readiness = Some(score),
            TestType::Temperament => user.temperament = Some(label.to_string()),
            TestType::Disc => user.disc = Some(label.to_string()),
        }
        user.assessments_completed = user.assessments_complete();

        Ok(user.clone())
    }

    fn add_blocked_user(&self, user_id: Uuid, blocked: Uuid) -> StoreResult<()> {
        let mut inner = self.lock()?;
        let user = inner.users.get_mut(&user_id).ok_or(StoreError::NotFound)?;
        if !user.blocked_users.contains(&blocked) {
            user.blocked_users.push(blocked);
        }
        Ok(())
    }

    fn assessed_profiles_excluding(&self, requester: Uuid) -> StoreResult<Vec<UserRecord>> {
        Ok(self
            .lock()?
            .users
            .values()
            .filter(|u| u.id != requester && u.assessments_completed)
            .cloned()
            .collect())
    }

    fn append_assessment(&self, rec: NewAssessment) -> StoreResult<AssessmentRecord> {
        let mut inner = self.lock()?;
        let record = AssessmentRecord {
            id: Uuid::now_v7(),
            user_id: rec.user_id,
            test_type: rec.test_type,
            answers: rec.answers,
            result_label: rec.result_label,
            result_score: rec.result_score,
            created_at: Utc::now(),
        };
        inner.assessments.push(record.clone());
        Ok(record)
    }

    fn insert_like(&self, from: Uuid, to: Uuid) -> StoreResult<bool> {
        let mut inner = self.lock()?;
        if inner.likes.contains_key(&(from, to)) {
            return Ok(false);
        }
        inner.likes.insert((from, to), Uuid::now_v7());
        Ok(true)
    }

    fn like_exists(&self, from: Uuid, to: Uuid) -> StoreResult<bool> {
        Ok(self.lock()?.likes.contains_key(&(from, to)))
    }

    fn likes_from(&self, from: Uuid) -> StoreResult<Vec<Uuid>> {
        Ok(self
            .lock()?
            .likes
            .keys()
            .filter(|(f, _)| *f == from)
            .map(|(_, t)| *t)
            .collect())
    }

    fn create_match_with_channel(&self, a: Uuid, b: Uuid) -> StoreResult<MatchOutcome> {
        let mut inner = self.lock()?;
        let pair = sorted_pair(a, b);

        if let Some(existing_id) = inner.match_pairs.get(&pair) {
            let record = inner
                .matches
                .get(existing_id)
                .cloned()
                .ok_or(StoreError::NotFound)?;
            return Ok(MatchOutcome { record, created: false });
        }

        let now = Utc::now();
        let record = MatchRecord {
            id: Uuid::now_v7(),
            user_a_id: pair.0,
            user_b_id: pair.1,
            matched_at: now,
        };
        let channel = ChatChannel {
            id: Uuid::now_v7(),
            match_id: record.id,
            user_a_id: pair.0,
            user_b_id: pair.1,
            last_message: None,
            updated_at: now,
        };

        inner.match_pairs.insert(pair, record.id);
        inner.matches.insert(record.id, record.clone());
        inner.channels.insert(record.id, channel);

        Ok(MatchOutcome { record, created: true })
    }

    fn match_by_id(&self, id: Uuid) -> StoreResult<Option<MatchRecord>> {
        Ok(self.lock()?.matches.get(&id).cloned())
    }

    fn matches_for_user(&self, user_id: Uuid) -> StoreResult<Vec<MatchRecord>> {
        let inner = self.lock()?;
        let mut found: Vec<MatchRecord> = inner
            .matches
            .values()
            .filter(|m| m.involves(user_id))
            .cloned()
            .collect();
        found.sort_by(|a, b| b.matched_at.cmp(&a.matched_at));
        Ok(found)
    }

    fn channel_for_match(&self, match_id: Uuid) -> StoreResult<Option<ChatChannel>> {
        Ok(self.lock()?.channels.get(&match_id).cloned())
    }

    fn append_message(&self, new_msg: NewMessage) -> StoreResult<MessageRecord> {
        let mut inner = self.lock()?;
        let now = Utc::now();
        let record = MessageRecord {
            id: Uuid::now_v7(),
            match_id: new_msg.match_id,
            sender_id: new_msg.sender_id,
            content: new_msg.content,
            kind: new_msg.kind,
            created_at: now,
        };
        inner.messages.push(record.clone());

        if let Some(channel) = inner.channels.get_mut(&new_msg.match_id) {
            channel.last_message = Some(record.content.clone());
            channel.updated_at = now;
        }

        Ok(record)
    }

    fn messages_page(
        &self,
        match_id: Uuid,
        offset: u64,
        limit: u64,
    ) -> StoreResult<(Vec<MessageRecord>, u64)> {
        let inner = self.lock()?;
        let all: Vec<&MessageRecord> = inner
            .messages
            .iter()
            .filter(|m| m.match_id == match_id)
            .collect();
        let total = all.len() as u64;

        // Newest first; append order is creation order.
        let page: Vec<MessageRecord> = all
            .into_iter()
            .rev()
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect();

        Ok((page, total))
    }

    fn insert_feed(&self, new_feed: NewFeedPost) -> StoreResult<FeedPost> {
        let mut inner = self.lock()?;
        let post = FeedPost {
            id: Uuid::now_v7(),
            user_id: new_feed.user_id,
            content: new_feed.content,
            images: new_feed.images,
            visibility: "public".to_string(),
            created_at: Utc::now(),
        };
        inner.feeds.push(post.clone());
        Ok(post)
    }

    fn feeds_page(&self, offset: u64, limit: u64) -> StoreResult<Vec<FeedPost>> {
        let inner = self.lock()?;
        Ok(inner
            .feeds
            .iter()
            .filter(|f| f.visibility == "public")
            .rev()
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    fn feed_exists(&self, id: Uuid) -> StoreResult<bool> {
        Ok(self.lock()?.feeds.iter().any(|f| f.id == id))
    }

    fn insert_report(&self, new_report: NewReport) -> StoreResult<Report> {
        let mut inner = self.lock()?;
        let report = Report {
            id: Uuid::now_v7(),
            reporter_id: new_report.reporter_id,
            target_type: new_report.target_type,
            target_id: new_report.target_id,
            reason: new_report.reason,
            status: "pending".to_string(),
            created_at: Utc::now(),
        };
        inner.reports.push(report.clone());
        Ok(report)
    }

    fn insert_consultation(&self, new_consultation: NewConsultation) -> StoreResult<Consultation> {
        let mut inner = self.lock()?;
        let consultation = Consultation {
            id: Uuid::now_v7(),
            user_id: new_consultation.user_id,
            counselor_id: new_consultation.counselor_id,
            schedule: new_consultation.schedule,
            session_type: new_consultation.session_type,
            payment_id: new_consultation.payment_id,
            status: new_consultation.status,
            created_at: Utc::now(),
        };
        inner.consultations.push(consultation.clone());
        Ok(consultation)
    }
}
