//! Pure assessment scorers. Deterministic, no state: the same answer vector
//! always produces the same result, which the reproducibility tests rely on.

use serde::Serialize;

use crate::models::TestType;

pub const QUESTION_COUNT: usize = 10;
pub const MAX_ANSWER: i32 = 4;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScoringError {
    #[error("expected 10 answers, got {0}")]
    WrongAnswerCount(usize),
    #[error("answer {value} at position {index} is outside 0..=4")]
    AnswerOutOfRange { index: usize, value: i32 },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreOutcome {
    /// Categorical result ("ENFP", "Gifts", ...) or the constant
    /// "readiness" label for the continuous test.
    #[serde(rename = "type")]
    pub label: String,
    pub score: f64,
}

/// Bucket average on the 0-4 ordinal scale, rescaled by the fixed x20
/// factor. The result can exceed 100 after later rescaling; storage keeps
/// it unclamped and display layers clamp.
const BUCKET_SCALE: f64 = 20.0;

const LOVE_LANGUAGE_BUCKETS: [(&str, &[usize]); 5] = [
    ("Gifts", &[0, 5]),
    ("Words of Affirmation", &[1, 6]),
    ("Quality Time", &[2, 7]),
    ("Physical Touch", &[3, 8]),
    ("Acts of Service", &[4, 9]),
];

const TEMPERAMENT_BUCKETS: [(&str, &[usize]); 4] = [
    ("Sanguine", &[0, 4, 8]),
    ("Choleric", &[1, 5, 9]),
    ("Phlegmatic", &[2, 6]),
    ("Melancholic", &[3, 7]),
];

const DISC_BUCKETS: [(&str, &[usize]); 4] = [
    ("Dominance", &[0, 4, 8]),
    ("Influence", &[1, 5, 9]),
    ("Steadiness", &[2, 6]),
    ("Compliance", &[3, 7]),
];

pub fn score(test_type: TestType, answers: &[i32]) -> Result<ScoreOutcome, ScoringError> {
    validate(answers)?;

    let outcome = match test_type {
        TestType::Mbti => score_mbti(answers),
        TestType::LoveLanguage => dominant_bucket(answers, &LOVE_LANGUAGE_BUCKETS),
        TestType::Readiness => score_readiness(answers),
        TestType::Temperament => dominant_bucket(answers, &TEMPERAMENT_BUCKETS),
        TestType::Disc => dominant_bucket(answers, &DISC_BUCKETS),
    };

    Ok(outcome)
}

fn validate(answers: &[i32]) -> Result<(), ScoringError> {
    if answers.len() != QUESTION_COUNT {
        return Err(ScoringError::WrongAnswerCount(answers.len()));
    }
    for (index, &value) in answers.iter().enumerate() {
        if !(0..=MAX_ANSWER).contains(&value) {
            return Err(ScoringError::AnswerOutOfRange { index, value });
        }
    }
    Ok(())
}

fn score_mbti(answers: &[i32]) -> ScoreOutcome {
    let e_score = answers[0] + answers[4] + answers[8];
    let n_score = answers[1] + answers[5] + answers[9];
    let t_score = answers[2];
    let j_score = answers[3];

    let mut code = String::with_capacity(4);
    code.push(if e_score >= 6 { 'E' } else { 'I' });
    code.push(if n_score >= 6 { 'N' } else { 'S' });
    code.push(if t_score >= 3 { 'T' } else { 'F' });
    code.push(if j_score >= 3 { 'J' } else { 'P' });

    let mean = answers.iter().sum::<i32>() as f64 / answers.len() as f64;
    ScoreOutcome {
        label: code,
        score: mean / MAX_ANSWER as f64 * 100.0,
    }
}

fn score_readiness(answers: &[i32]) -> ScoreOutcome {
    let total: i32 = answers.iter().sum();
    let max_score = (answers.len() as i32 * MAX_ANSWER) as f64;
    ScoreOutcome {
        label: "readiness".to_string(),
        score: total as f64 / max_score * 100.0,
    }
}

/// Arg-max over fixed buckets; on ties the first bucket in enumeration
/// order wins.
fn dominant_bucket(answers: &[i32], buckets: &[(&str, &[usize])]) -> ScoreOutcome {
    let mut best_label = buckets[0].0;
    let mut best_avg = f64::MIN;

    for (label, positions) in buckets {
        let sum: i32 = positions.iter().map(|&i| answers[i]).sum();
        let avg = sum as f64 / positions.len() as f64;
        if avg > best_avg {
            best_avg = avg;
            best_label = label;
        }
    }

    ScoreOutcome {
        label: best_label.to_string(),
        score: best_avg * BUCKET_SCALE,
    }
}
