//! Candidate ranking for the discover surface: blocking filter, radius
//! filter, compatibility scoring, stable sort, pagination. Pure over the
//! profile snapshots handed to it; the route supplies store reads.

use std::collections::HashSet;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use uuid::Uuid;

use crate::matching::compatibility::{compatibility, AssessmentView};
use crate::matching::geo::distance_km;
use crate::models::UserRecord;

#[derive(Debug, Clone, Serialize)]
pub struct Candidate {
    pub id: Uuid,
    pub name: String,
    pub age: i32,
    pub gender: String,
    pub profile_photos: Vec<String>,
    pub bio: String,
    pub distance: f64,
    pub compatibility: f64,
    pub mbti: Option<String>,
    pub love_language: Option<String>,
    pub temperament: Option<String>,
    pub disc: Option<String>,
    pub verified_face: bool,
    pub already_liked: bool,
}

#[derive(Debug, Serialize)]
pub struct DiscoverPage {
    pub users: Vec<Candidate>,
    pub total: u64,
    pub page: u64,
    pub total_pages: u64,
}

/// Calendar-aware age. Malformed dates of birth read as age 0 rather than
/// failing the whole request.
pub fn age_on(date_of_birth: &str, today: NaiveDate) -> i32 {
    let Ok(dob) = NaiveDate::parse_from_str(date_of_birth, "%Y-%m-%d") else {
        tracing::debug!(date_of_birth, "unparseable date of birth, reporting age 0");
        return 0;
    };

    let mut age = today.year() - dob.year();
    if (today.month(), today.day()) < (dob.month(), dob.day()) {
        age -= 1;
    }
    age
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Filter and score the candidate pool for one requester.
///
/// Blocking is symmetric: a block by either party hides both. The sort is
/// stable, so equal compatibility keeps the pool's retrieval order.
pub fn rank_candidates(
    requester: &UserRecord,
    pool: Vec<UserRecord>,
    liked: &HashSet<Uuid>,
    radius_km: f64,
    today: NaiveDate,
) -> Vec<Candidate> {
    let requester_view = AssessmentView::from(requester);

    let mut candidates: Vec<Candidate> = pool
        .into_iter()
        .filter(|user| user.id != requester.id)
        .filter(|user| user.assessments_complete())
        .filter(|user| !user.has_blocked(requester.id) && !requester.has_blocked(user.id))
        .filter_map(|user| {
            let distance = distance_km(
                requester.latitude,
                requester.longitude,
                user.latitude,
                user.longitude,
            );
            if distance > radius_km {
                return None;
            }

            let score = compatibility(&requester_view, &AssessmentView::from(&user));

            Some(Candidate {
                id: user.id,
                age: age_on(&user.date_of_birth, today),
                already_liked: liked.contains(&user.id),
                distance: round1(distance),
                compatibility: round1(score),
                name: user.name,
                gender: user.gender,
                profile_photos: user.profile_photos,
                bio: user.bio,
                mbti: user.mbti,
                love_language: user.love_language,
                temperament: user.temperament,
                disc: user.disc,
                verified_face: user.verified_face,
            })
        })
        .collect();

    candidates.sort_by(|a, b| {
        b.compatibility
            .partial_cmp(&a.compatibility)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    candidates
}

/// 1-indexed pagination; out-of-range pages return an empty slice.
pub fn paginate(candidates: Vec<Candidate>, page: u64, limit: u64) -> DiscoverPage {
    let total = candidates.len() as u64;
    let total_pages = if total == 0 { 0 } else { (total + limit - 1) / limit };

    let start = (page - 1).saturating_mul(limit);
    let users = candidates
        .into_iter()
        .skip(start as usize)
        .take(limit as usize)
        .collect();

    DiscoverPage {
        users,
        total,
        page,
        total_pages,
    }
}
