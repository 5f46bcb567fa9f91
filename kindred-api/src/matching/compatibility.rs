//! Five-axis compatibility scoring. Each axis contributes independently
//! according to the fixed weight table; the raw sum is clamped to 100 at
//! the very end. The formula is symmetric under swapping the two views.

use crate::models::UserRecord;

// -- Axis weights, in percentage points --
const W_MBTI: f64 = 25.0;
const W_LOVE_LANGUAGE: f64 = 20.0;
const W_READINESS: f64 = 30.0;
const W_TEMPERAMENT: f64 = 15.0;
const W_DISC: f64 = 10.0;

// Partial credit when both sides answered but differ.
const PARTIAL_LOVE_LANGUAGE: f64 = 5.0;
const PARTIAL_TEMPERAMENT: f64 = 5.0;
const PARTIAL_DISC: f64 = 3.0;

// MBTI positional credit: first letter dominates.
const MBTI_LETTER_WEIGHTS: [f64; 4] = [10.0, 5.0, 5.0, 5.0];

/// The five optional axis values of one user, as seen by the scorer.
#[derive(Debug, Clone, Default)]
pub struct AssessmentView<'a> {
    pub mbti: Option<&'a str>,
    pub love_language: Option<&'a str>,
    pub readiness: Option<f64>,
    pub temperament: Option<&'a str>,
    pub disc: Option<&'a str>,
}

impl<'a> From<&'a UserRecord> for AssessmentView<'a> {
    fn from(user: &'a UserRecord) -> Self {
        Self {
            mbti: user.mbti.as_deref(),
            love_language: user.love_language.as_deref(),
            readiness: user.readiness,
            temperament: user.temperament.as_deref(),
            disc: user.disc.as_deref(),
        }
    }
}

pub fn compatibility(a: &AssessmentView<'_>, b: &AssessmentView<'_>) -> f64 {
    let mut score = 0.0;

    score += mbti_score(a.mbti, b.mbti);
    score += categorical_score(a.love_language, b.love_language, W_LOVE_LANGUAGE, PARTIAL_LOVE_LANGUAGE);
    score += readiness_score(a.readiness, b.readiness);
    score += categorical_score(a.temperament, b.temperament, W_TEMPERAMENT, PARTIAL_TEMPERAMENT);
    score += categorical_score(a.disc, b.disc, W_DISC, PARTIAL_DISC);

    score.min(100.0)
}

fn mbti_score(a: Option<&str>, b: Option<&str>) -> f64 {
    match (a, b) {
        (Some(a), Some(b)) if a == b => W_MBTI,
        (Some(a), Some(b)) => {
            // Positional letter comparison over the four axes.
            a.chars()
                .zip(b.chars())
                .zip(MBTI_LETTER_WEIGHTS)
                .filter(|((ca, cb), _)| ca == cb)
                .map(|(_, weight)| weight)
                .sum()
        }
        _ => 0.0,
    }
}

fn categorical_score(a: Option<&str>, b: Option<&str>, exact: f64, partial: f64) -> f64 {
    match (a, b) {
        (Some(a), Some(b)) if a == b => exact,
        (Some(_), Some(_)) => partial,
        _ => 0.0,
    }
}

fn readiness_score(a: Option<f64>, b: Option<f64>) -> f64 {
    match (a, b) {
        (Some(a), Some(b)) => {
            let avg = (a + b) / 2.0;
            avg / 100.0 * W_READINESS
        }
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full(mbti: &'static str, love: &'static str, readiness: f64, temperament: &'static str, disc: &'static str) -> AssessmentView<'static> {
        AssessmentView {
            mbti: Some(mbti),
            love_language: Some(love),
            readiness: Some(readiness),
            temperament: Some(temperament),
            disc: Some(disc),
        }
    }

    #[test]
    fn identical_fully_assessed_profiles_hit_the_cap() {
        let view = full("ENFP", "Gifts", 100.0, "Sanguine", "Influence");
        assert_eq!(compatibility(&view, &view), 100.0);
    }

    #[test]
    fn identical_profiles_with_low_readiness_score_below_cap() {
        let view = full("ENFP", "Gifts", 50.0, "Sanguine", "Influence");
        // 25 + 20 + 15 + 15 + 10 = 85
        assert!((compatibility(&view, &view) - 85.0).abs() < 1e-9);
    }

    #[test]
    fn mbti_partial_credit_per_letter_position() {
        let mut a = full("ENFP", "Gifts", 0.0, "Sanguine", "Dominance");
        let mut b = full("INFP", "Quality Time", 0.0, "Choleric", "Influence");

        // Letters 2,3,4 match: 5+5+5. Love/temperament/disc differ: 5+5+3.
        // Readiness avg 0 contributes 0. Total 28.
        assert!((compatibility(&a, &b) - 28.0).abs() < 1e-9);

        // Only the first letter matches, and it carries the heavier weight.
        a.mbti = Some("ENFP");
        b.mbti = Some("ESTJ");
        assert!((compatibility(&a, &b) - 23.0).abs() < 1e-9);
    }

    #[test]
    fn missing_axes_contribute_nothing() {
        let empty = AssessmentView::default();
        let view = full("ENFP", "Gifts", 100.0, "Sanguine", "Influence");

        assert_eq!(compatibility(&empty, &empty), 0.0);
        assert_eq!(compatibility(&view, &empty), 0.0);
        assert_eq!(compatibility(&empty, &view), 0.0);

        // Readiness on one side only still contributes zero.
        let only_readiness = AssessmentView {
            readiness: Some(100.0),
            ..Default::default()
        };
        assert_eq!(compatibility(&only_readiness, &empty), 0.0);
    }

    #[test]
    fn symmetric_under_swap() {
        let cases = [
            (full("ENFP", "Gifts", 80.0, "Sanguine", "Influence"),
             full("ISTJ", "Quality Time", 40.0, "Choleric", "Dominance")),
            (full("ENFP", "Gifts", 100.0, "Sanguine", "Influence"),
             AssessmentView::default()),
            (full("ENTP", "Words of Affirmation", 62.5, "Phlegmatic", "Steadiness"),
             full("ENTJ", "Words of Affirmation", 75.0, "Phlegmatic", "Compliance")),
        ];

        for (a, b) in &cases {
            assert_eq!(compatibility(a, b), compatibility(b, a));
        }
    }

    #[test]
    fn bounded_between_zero_and_one_hundred() {
        let views = [
            AssessmentView::default(),
            full("ENFP", "Gifts", 0.0, "Sanguine", "Influence"),
            full("ENFP", "Gifts", 100.0, "Sanguine", "Influence"),
            // Bucket rescaling can legitimately exceed the nominal range.
            full("ISTJ", "Physical Touch", 120.0, "Melancholic", "Compliance"),
        ];

        for a in &views {
            for b in &views {
                let score = compatibility(a, b);
                assert!((0.0..=100.0).contains(&score), "out of bounds: {score}");
            }
        }
    }
}
