//! Like/match controller. A directed like is recorded first, then the
//! reverse edge is checked; this order guarantees that at least one of two
//! concurrent reciprocal submissions observes the other. The store closes
//! the remaining race: match+channel creation is insert-or-detect on the
//! unordered pair, so exactly one pair of records can ever exist.

use uuid::Uuid;

use crate::store::{Store, StoreResult};

#[derive(Debug, Clone, PartialEq)]
pub struct LikeOutcome {
    pub already_liked: bool,
    pub matched: bool,
    pub match_id: Option<Uuid>,
    /// True only for the call that actually created the match record; used
    /// to fire the new-match notification exactly once.
    pub newly_matched: bool,
}

pub fn submit_like(store: &dyn Store, from: Uuid, to: Uuid) -> StoreResult<LikeOutcome> {
    if !store.insert_like(from, to)? {
        return Ok(LikeOutcome {
            already_liked: true,
            matched: false,
            match_id: None,
            newly_matched: false,
        });
    }

    if !store.like_exists(to, from)? {
        return Ok(LikeOutcome {
            already_liked: false,
            matched: false,
            match_id: None,
            newly_matched: false,
        });
    }

    let outcome = store.create_match_with_channel(from, to)?;
    Ok(LikeOutcome {
        already_liked: false,
        matched: true,
        match_id: Some(outcome.record.id),
        newly_matched: outcome.created,
    })
}
