//! Postgres store backend over diesel/r2d2. Match-pair uniqueness relies on
//! the unique index over the sorted `(user_a_id, user_b_id)` columns; the
//! like table carries the same constraint on `(from_user_id, to_user_id)`.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool, PooledConnection};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use uuid::Uuid;

use kindred_shared::types::auth::UserRole;

use crate::models::{
    sorted_pair, AssessmentRecord, ChatChannel, Consultation, FeedPost, MatchRecord, MessageKind,
    MessageRecord, NewAssessment, NewConsultation, NewFeedPost, NewMessage, NewReport, NewUser,
    Report, ReportTarget, SessionType, TestType, UserRecord,
};

use super::schema::{assessment_tests, chats, consults, feeds, likes, matches, messages, reports, users};
use super::{MatchOutcome, Store, StoreError, StoreResult};

pub type DbPool = Pool<ConnectionManager<PgConnection>>;

pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn connect(database_url: &str) -> anyhow::Result<Self> {
        let manager = ConnectionManager::<PgConnection>::new(database_url);
        let pool = Pool::builder().max_size(10).build(manager)?;
        Ok(Self { pool })
    }

    pub fn from_pool(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> StoreResult<PooledConnection<ConnectionManager<PgConnection>>> {
        self.pool
            .get()
            .map_err(|e| StoreError::Unavailable(e.to_string()))
    }
}

fn map_db_err(err: DieselError) -> StoreError {
    match err {
        DieselError::NotFound => StoreError::NotFound,
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            let constraint = info.constraint_name().unwrap_or_default();
            if constraint.contains("email") {
                StoreError::Duplicate("email")
            } else if constraint.contains("username") {
                StoreError::Duplicate("username")
            } else {
                StoreError::Duplicate("record")
            }
        }
        other => StoreError::Unavailable(other.to_string()),
    }
}

// --- Row types ---

#[derive(Debug, Queryable, Identifiable)]
#[diesel(table_name = users)]
struct UserRow {
    id: Uuid,
    name: String,
    email: String,
    username: String,
    password_hash: String,
    date_of_birth: String,
    gender: String,
    latitude: f64,
    longitude: f64,
    profile_photos: serde_json::Value,
    selfie_photo: Option<String>,
    verified_face: bool,
    mbti: Option<String>,
    love_language: Option<String>,
    readiness: Option<f64>,
    temperament: Option<String>,
    disc: Option<String>,
    assessments_completed: bool,
    blocked_users: serde_json::Value,
    bio: String,
    role: String,
    created_at: DateTime<Utc>,
}

impl From<UserRow> for UserRecord {
    fn from(row: UserRow) -> Self {
        UserRecord {
            id: row.id,
            name: row.name,
            email: row.email,
            username: row.username,
            password_hash: row.password_hash,
            date_of_birth: row.date_of_birth,
            gender: row.gender,
            latitude: row.latitude,
            longitude: row.longitude,
            profile_photos: serde_json::from_value(row.profile_photos).unwrap_or_default(),
            selfie_photo: row.selfie_photo,
            verified_face: row.verified_face,
            mbti: row.mbti,
            love_language: row.love_language,
            readiness: row.readiness,
            temperament: row.temperament,
            disc: row.disc,
            assessments_completed: row.assessments_completed,
            blocked_users: serde_json::from_value(row.blocked_users).unwrap_or_default(),
            bio: row.bio,
            role: UserRole::from_str(&row.role).unwrap_or(UserRole::User),
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = users)]
struct NewUserRow {
    name: String,
    email: String,
    username: String,
    password_hash: String,
    date_of_birth: String,
    gender: String,
    latitude: f64,
    longitude: f64,
    profile_photos: serde_json::Value,
    blocked_users: serde_json::Value,
}

#[derive(Debug, Queryable)]
struct AssessmentRow {
    id: Uuid,
    user_id: Uuid,
    test_type: String,
    answers: serde_json::Value,
    result_label: String,
    result_score: f64,
    created_at: DateTime<Utc>,
}

impl From<AssessmentRow> for AssessmentRecord {
    fn from(row: AssessmentRow) -> Self {
        AssessmentRecord {
            id: row.id,
            user_id: row.user_id,
            test_type: TestType::from_str(&row.test_type).unwrap_or(TestType::Mbti),
            answers: serde_json::from_value(row.answers).unwrap_or_default(),
            result_label: row.result_label,
            result_score: row.result_score,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = assessment_tests)]
struct NewAssessmentRow {
    user_id: Uuid,
    test_type: String,
    answers: serde_json::Value,
    result_label: String,
    result_score: f64,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = likes)]
struct NewLikeRow {
    from_user_id: Uuid,
    to_user_id: Uuid,
}

#[derive(Debug, Queryable)]
struct MatchRow {
    id: Uuid,
    user_a_id: Uuid,
    user_b_id: Uuid,
    matched_at: DateTime<Utc>,
}

impl From<MatchRow> for MatchRecord {
    fn from(row: MatchRow) -> Self {
        MatchRecord {
            id: row.id,
            user_a_id: row.user_a_id,
            user_b_id: row.user_b_id,
            matched_at: row.matched_at,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = matches)]
struct NewMatchRow {
    user_a_id: Uuid,
    user_b_id: Uuid,
}

#[derive(Debug, Queryable)]
struct ChatRow {
    id: Uuid,
    match_id: Uuid,
    user_a_id: Uuid,
    user_b_id: Uuid,
    last_message: Option<String>,
    updated_at: DateTime<Utc>,
}

impl From<ChatRow> for ChatChannel {
    fn from(row: ChatRow) -> Self {
        ChatChannel {
            id: row.id,
            match_id: row.match_id,
            user_a_id: row.user_a_id,
            user_b_id: row.user_b_id,
            last_message: row.last_message,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = chats)]
struct NewChatRow {
    match_id: Uuid,
    user_a_id: Uuid,
    user_b_id: Uuid,
}

#[derive(Debug, Queryable)]
struct MessageRow {
    id: Uuid,
    match_id: Uuid,
    sender_id: Uuid,
    content: String,
    kind: String,
    created_at: DateTime<Utc>,
}

impl From<MessageRow> for MessageRecord {
    fn from(row: MessageRow) -> Self {
        MessageRecord {
            id: row.id,
            match_id: row.match_id,
            sender_id: row.sender_id,
            content: row.content,
            kind: MessageKind::from_str(&row.kind).unwrap_or(MessageKind::Text),
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = messages)]
struct NewMessageRow {
    match_id: Uuid,
    sender_id: Uuid,
    content: String,
    kind: String,
}

#[derive(Debug, Queryable)]
struct FeedRow {
    id: Uuid,
    user_id: Uuid,
    content: String,
    images: serde_json::Value,
    visibility: String,
    created_at: DateTime<Utc>,
}

impl From<FeedRow> for FeedPost {
    fn from(row: FeedRow) -> Self {
        FeedPost {
            id: row.id,
            user_id: row.user_id,
            content: row.content,
            images: serde_json::from_value(row.images).unwrap_or_default(),
            visibility: row.visibility,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = feeds)]
struct NewFeedRow {
    user_id: Uuid,
    content: String,
    images: serde_json::Value,
    visibility: String,
}

#[derive(Debug, Queryable)]
struct ReportRow {
    id: Uuid,
    reporter_id: Uuid,
    target_type: String,
    target_id: Uuid,
    reason: String,
    status: String,
    created_at: DateTime<Utc>,
}

impl From<ReportRow> for Report {
    fn from(row: ReportRow) -> Self {
        Report {
            id: row.id,
            reporter_id: row.reporter_id,
            target_type: if row.target_type == "feed" {
                ReportTarget::Feed
            } else {
                ReportTarget::User
            },
            target_id: row.target_id,
            reason: row.reason,
            status: row.status,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = reports)]
struct NewReportRow {
    reporter_id: Uuid,
    target_type: String,
    target_id: Uuid,
    reason: String,
    status: String,
}

#[derive(Debug, Queryable)]
struct ConsultRow {
    id: Uuid,
    user_id: Uuid,
    counselor_id: String,
    schedule: String,
    session_type: String,
    payment_id: String,
    status: String,
    created_at: DateTime<Utc>,
}

impl From<ConsultRow> for Consultation {
    fn from(row: ConsultRow) -> Self {
        Consultation {
            id: row.id,
            user_id: row.user_id,
            counselor_id: row.counselor_id,
            schedule: row.schedule,
            session_type: if row.session_type == "video" {
                SessionType::Video
            } else {
                SessionType::Chat
            },
            payment_id: row.payment_id,
            status: row.status,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = consults)]
struct NewConsultRow {
    user_id: Uuid,
    counselor_id: String,
    schedule: String,
    session_type: String,
    payment_id: String,
    status: String,
}

// --- Store impl ---

impl Store for PgStore {
    fn ping(&self) -> StoreResult<()> {
        let mut conn = self.conn()?;
        diesel::sql_query("SELECT 1")
            .execute(&mut conn)
            .map(|_| ())
            .map_err(map_db_err)
    }

    fn create_user(&self, new_user: NewUser) -> StoreResult<UserRecord> {
        let mut conn = self.conn()?;

        let row: UserRow = diesel::insert_into(users::table)
            .values(&NewUserRow {
                name: new_user.name,
                email: new_user.email,
                username: new_user.username,
                password_hash: new_user.password_hash,
                date_of_birth: new_user.date_of_birth,
                gender: new_user.gender,
                latitude: new_user.latitude,
                longitude: new_user.longitude,
                profile_photos: serde_json::json!([new_user.profile_photo]),
                blocked_users: serde_json::json!([]),
            })
            .get_result(&mut conn)
            .map_err(map_db_err)?;

        Ok(row.into())
    }

    fn user_by_id(&self, id: Uuid) -> StoreResult<Option<UserRecord>> {
        let mut conn = self.conn()?;
        users::table
            .find(id)
            .first::<UserRow>(&mut conn)
            .optional()
            .map(|row| row.map(UserRecord::from))
            .map_err(map_db_err)
    }

    fn user_by_email(&self, email: &str) -> StoreResult<Option<UserRecord>> {
        let mut conn = self.conn()?;
        users::table
            .filter(users::email.eq(email))
            .first::<UserRow>(&mut conn)
            .optional()
            .map(|row| row.map(UserRecord::from))
            .map_err(map_db_err)
    }

    fn username_exists(&self, username: &str) -> StoreResult<bool> {
        let mut conn = self.conn()?;
        users::table
            .filter(users::username.eq(username))
            .count()
            .get_result::<i64>(&mut conn)
            .map(|c| c > 0)
            .map_err(map_db_err)
    }

    fn mark_face_verified(&self, user_id: Uuid, selfie_photo: &str) -> StoreResult<()> {
        let mut conn = self.conn()?;
        let updated = diesel::update(users::table.find(user_id))
            .set((
                users::verified_face.eq(true),
                users::selfie_photo.eq(selfie_photo),
            ))
            .execute(&mut conn)
            .map_err(map_db_err)?;
        if updated == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    fn record_assessment_result(
        &self,
        user_id: Uuid,
        test_type: TestType,
        label: &str,
        score: f64,
    ) -> StoreResult<UserRecord> {
        let mut conn = self.conn()?;

        let row: UserRow = match test_type {
            TestType::Mbti => diesel::update(users::table.find(user_id))
                .set(users::mbti.eq(label))
                .get_result(&mut conn),
            TestType::LoveLanguage => diesel::update(users::table.find(user_id))
                .set(users::love_language.eq(label))
                .get_result(&mut conn),
            TestType::Readiness => diesel::update(users::table.find(user_id))
                .set(users::readiness.eq(score))
                .get_result(&mut conn),
            TestType::Temperament => diesel::update(users::table.find(user_id))
                .set(users::temperament.eq(label))
                .get_result(&mut conn),
            TestType::Disc => diesel::update(users::table.find(user_id))
                .set(users::disc.eq(label))
                .get_result(&mut conn),
        }
        .map_err(map_db_err)?;

        // Recompute the derived flag from the axis fields just written.
        let record = UserRecord::from(row);
        let complete = record.assessments_complete();
        if complete != record.assessments_completed {
            let row: UserRow = diesel::update(users::table.find(user_id))
                .set(users::assessments_completed.eq(complete))
                .get_result(&mut conn)
                .map_err(map_db_err)?;
            return Ok(row.into());
        }

        Ok(record)
    }

    fn add_blocked_user(&self, user_id: Uuid, blocked: Uuid) -> StoreResult<()> {
        let mut conn = self.conn()?;
        let row: UserRow = users::table
            .find(user_id)
            .first(&mut conn)
            .map_err(map_db_err)?;

        let mut blocked_list: Vec<Uuid> =
            serde_json::from_value(row.blocked_users).unwrap_or_default();
        if !blocked_list.contains(&blocked) {
            blocked_list.push(blocked);
            diesel::update(users::table.find(user_id))
                .set(users::blocked_users.eq(serde_json::json!(blocked_list)))
                .execute(&mut conn)
                .map_err(map_db_err)?;
        }
        Ok(())
    }

    fn assessed_profiles_excluding(&self, requester: Uuid) -> StoreResult<Vec<UserRecord>> {
        let mut conn = self.conn()?;
        users::table
            .filter(users::id.ne(requester))
            .filter(users::assessments_completed.eq(true))
            .order(users::created_at.asc())
            .load::<UserRow>(&mut conn)
            .map(|rows| rows.into_iter().map(UserRecord::from).collect())
            .map_err(map_db_err)
    }

    fn append_assessment(&self, rec: NewAssessment) -> StoreResult<AssessmentRecord> {
        let mut conn = self.conn()?;
        diesel::insert_into(assessment_tests::table)
            .values(&NewAssessmentRow {
                user_id: rec.user_id,
                test_type: rec.test_type.to_string(),
                answers: serde_json::json!(rec.answers),
                result_label: rec.result_label,
                result_score: rec.result_score,
            })
            .get_result::<AssessmentRow>(&mut conn)
            .map(AssessmentRecord::from)
            .map_err(map_db_err)
    }

    fn insert_like(&self, from: Uuid, to: Uuid) -> StoreResult<bool> {
        let mut conn = self.conn()?;
        let inserted = diesel::insert_into(likes::table)
            .values(&NewLikeRow {
                from_user_id: from,
                to_user_id: to,
            })
            .on_conflict((likes::from_user_id, likes::to_user_id))
            .do_nothing()
            .execute(&mut conn)
            .map_err(map_db_err)?;
        Ok(inserted > 0)
    }

    fn like_exists(&self, from: Uuid, to: Uuid) -> StoreResult<bool> {
        let mut conn = self.conn()?;
        likes::table
            .filter(likes::from_user_id.eq(from))
            .filter(likes::to_user_id.eq(to))
            .count()
            .get_result::<i64>(&mut conn)
            .map(|c| c > 0)
            .map_err(map_db_err)
    }

    fn likes_from(&self, from: Uuid) -> StoreResult<Vec<Uuid>> {
        let mut conn = self.conn()?;
        likes::table
            .filter(likes::from_user_id.eq(from))
            .select(likes::to_user_id)
            .load::<Uuid>(&mut conn)
            .map_err(map_db_err)
    }

    fn create_match_with_channel(&self, a: Uuid, b: Uuid) -> StoreResult<MatchOutcome> {
        let (lo, hi) = sorted_pair(a, b);
        let mut conn = self.conn()?;

        conn.transaction::<MatchOutcome, DieselError, _>(|conn| {
            let inserted: Option<MatchRow> = diesel::insert_into(matches::table)
                .values(&NewMatchRow {
                    user_a_id: lo,
                    user_b_id: hi,
                })
                .on_conflict((matches::user_a_id, matches::user_b_id))
                .do_nothing()
                .get_result(conn)
                .optional()?;

            match inserted {
                Some(row) => {
                    diesel::insert_into(chats::table)
                        .values(&NewChatRow {
                            match_id: row.id,
                            user_a_id: lo,
                            user_b_id: hi,
                        })
                        .execute(conn)?;
                    Ok(MatchOutcome {
                        record: row.into(),
                        created: true,
                    })
                }
                None => {
                    let row: MatchRow = matches::table
                        .filter(matches::user_a_id.eq(lo))
                        .filter(matches::user_b_id.eq(hi))
                        .first(conn)?;
                    Ok(MatchOutcome {
                        record: row.into(),
                        created: false,
                    })
                }
            }
        })
        .map_err(map_db_err)
    }

    fn match_by_id(&self, id: Uuid) -> StoreResult<Option<MatchRecord>> {
        let mut conn = self.conn()?;
        matches::table
            .find(id)
            .first::<MatchRow>(&mut conn)
            .optional()
            .map(|row| row.map(MatchRecord::from))
            .map_err(map_db_err)
    }

    fn matches_for_user(&self, user_id: Uuid) -> StoreResult<Vec<MatchRecord>> {
        let mut conn = self.conn()?;
        matches::table
            .filter(
                matches::user_a_id
                    .eq(user_id)
                    .or(matches::user_b_id.eq(user_id)),
            )
            .order(matches::matched_at.desc())
            .load::<MatchRow>(&mut conn)
            .map(|rows| rows.into_iter().map(MatchRecord::from).collect())
            .map_err(map_db_err)
    }

    fn channel_for_match(&self, match_id: Uuid) -> StoreResult<Option<ChatChannel>> {
        let mut conn = self.conn()?;
        chats::table
            .filter(chats::match_id.eq(match_id))
            .first::<ChatRow>(&mut conn)
            .optional()
            .map(|row| row.map(ChatChannel::from))
            .map_err(map_db_err)
    }

    fn append_message(&self, new_msg: NewMessage) -> StoreResult<MessageRecord> {
        let mut conn = self.conn()?;

        conn.transaction::<MessageRecord, DieselError, _>(|conn| {
            let row: MessageRow = diesel::insert_into(messages::table)
                .values(&NewMessageRow {
                    match_id: new_msg.match_id,
                    sender_id: new_msg.sender_id,
                    content: new_msg.content.clone(),
                    kind: new_msg.kind.as_str().to_string(),
                })
                .get_result(conn)?;

            diesel::update(chats::table.filter(chats::match_id.eq(new_msg.match_id)))
                .set((
                    chats::last_message.eq(&new_msg.content),
                    chats::updated_at.eq(row.created_at),
                ))
                .execute(conn)?;

            Ok(row.into())
        })
        .map_err(map_db_err)
    }

    fn messages_page(
        &self,
        match_id: Uuid,
        offset: u64,
        limit: u64,
    ) -> StoreResult<(Vec<MessageRecord>, u64)> {
        let mut conn = self.conn()?;

        let total: i64 = messages::table
            .filter(messages::match_id.eq(match_id))
            .count()
            .get_result(&mut conn)
            .map_err(map_db_err)?;

        let page = messages::table
            .filter(messages::match_id.eq(match_id))
            .order(messages::created_at.desc())
            .offset(offset as i64)
            .limit(limit as i64)
            .load::<MessageRow>(&mut conn)
            .map(|rows| rows.into_iter().map(MessageRecord::from).collect())
            .map_err(map_db_err)?;

        Ok((page, total as u64))
    }

    fn insert_feed(&self, new_feed: NewFeedPost) -> StoreResult<FeedPost> {
        let mut conn = self.conn()?;
        diesel::insert_into(feeds::table)
            .values(&NewFeedRow {
                user_id: new_feed.user_id,
                content: new_feed.content,
                images: serde_json::json!(new_feed.images),
                visibility: "public".to_string(),
            })
            .get_result::<FeedRow>(&mut conn)
            .map(FeedPost::from)
            .map_err(map_db_err)
    }

    fn feeds_page(&self, offset: u64, limit: u64) -> StoreResult<Vec<FeedPost>> {
        let mut conn = self.conn()?;
        feeds::table
            .filter(feeds::visibility.eq("public"))
            .order(feeds::created_at.desc())
            .offset(offset as i64)
            .limit(limit as i64)
            .load::<FeedRow>(&mut conn)
            .map(|rows| rows.into_iter().map(FeedPost::from).collect())
            .map_err(map_db_err)
    }

    fn feed_exists(&self, id: Uuid) -> StoreResult<bool> {
        let mut conn = self.conn()?;
        feeds::table
            .find(id)
            .count()
            .get_result::<i64>(&mut conn)
            .map(|c| c > 0)
            .map_err(map_db_err)
    }

    fn insert_report(&self, new_report: NewReport) -> StoreResult<Report> {
        let mut conn = self.conn()?;
        diesel::insert_into(reports::table)
            .values(&NewReportRow {
                reporter_id: new_report.reporter_id,
                target_type: match new_report.target_type {
                    ReportTarget::User => "user".to_string(),
                    ReportTarget::Feed => "feed".to_string(),
                },
                target_id: new_report.target_id,
                reason: new_report.reason,
                status: "pending".to_string(),
            })
            .get_result::<ReportRow>(&mut conn)
            .map(Report::from)
            .map_err(map_db_err)
    }

    fn insert_consultation(&self, new_consultation: NewConsultation) -> StoreResult<Consultation> {
        let mut conn = self.conn()?;
        diesel::insert_into(consults::table)
            .values(&NewConsultRow {
                user_id: new_consultation.user_id,
                counselor_id: new_consultation.counselor_id,
                schedule: new_consultation.schedule,
                session_type: match new_consultation.session_type {
                    SessionType::Chat => "chat".to_string(),
                    SessionType::Video => "video".to_string(),
                },
                payment_id: new_consultation.payment_id,
                status: new_consultation.status,
            })
            .get_result::<ConsultRow>(&mut conn)
            .map(Consultation::from)
            .map_err(map_db_err)
    }
}
