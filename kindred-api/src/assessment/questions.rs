//! Fixed question bank. Order matters: the scorers map question positions
//! to axes and buckets, so reordering a bank is a breaking change.

use serde::Serialize;

use crate::models::TestType;

#[derive(Debug, Clone, Serialize)]
pub struct Question {
    pub question: &'static str,
    pub options: [&'static str; 5],
}

const LIKERT: [&'static str; 5] = [
    "Strongly Disagree",
    "Disagree",
    "Neutral",
    "Agree",
    "Strongly Agree",
];

const fn q(question: &'static str) -> Question {
    Question {
        question,
        options: LIKERT,
    }
}

// Positions 0,4,8 feed E/I; 1,5,9 feed N/S; 2 feeds T/F; 3 feeds J/P.
static MBTI: [Question; 10] = [
    q("I prefer spending time in large groups of people"),
    q("I trust my intuition more than concrete facts"),
    q("I make decisions based on logic rather than feelings"),
    q("I like to plan everything out in detail"),
    q("I feel energized after socializing with others"),
    q("I focus on the big picture rather than the details"),
    q("I put other people's feelings first"),
    q("I enjoy spontaneity and keeping my options open"),
    q("I tend to speak before I think"),
    q("I prefer abstract theory over practical matters"),
];

// Bucket pairs: gifts 0/5, words 1/6, quality time 2/7, touch 3/8, service 4/9.
static LOVE_LANGUAGE: [Question; 10] = [
    q("I feel loved when my partner gives me gifts"),
    q("Words of praise mean a great deal to me"),
    q("I feel loved when my partner sets aside time for us"),
    q("Physical touch makes me feel connected"),
    q("Small acts like helping with chores mean a lot to me"),
    q("Gifts are an important symbol of affection"),
    q("I love hearing romantic words from my partner"),
    q("Quality time together matters more than expensive gifts"),
    q("Hugs and kisses are essential in a relationship"),
    q("I appreciate when my partner helps without being asked"),
];

static READINESS: [Question; 10] = [
    q("I am ready to commit to a long-term relationship"),
    q("I have worked through the hurt from my past relationships"),
    q("I know what I am looking for in a partner"),
    q("I am ready to share my life with someone else"),
    q("I have time in my life for a serious relationship"),
    q("I am ready to communicate openly with a partner"),
    q("I am willing to give up personal time for a partner"),
    q("I am confident in who I am"),
    q("I am ready to build a future together with someone"),
    q("I can face conflict in a mature way"),
];

// Bucket positions: sanguine 0/4/8, choleric 1/5/9, phlegmatic 2/6, melancholic 3/7.
static TEMPERAMENT: [Question; 10] = [
    q("I am very social and love to talk"),
    q("I like to take control of situations"),
    q("I prefer to avoid conflict"),
    q("I enjoy analyzing details and data"),
    q("I get excited easily and stay optimistic"),
    q("I enjoy challenges and competition"),
    q("I am a good and patient listener"),
    q("I am a perfectionist and detail-oriented"),
    q("I am spontaneous and expressive"),
    q("I am decisive when making choices"),
];

// Bucket positions: dominance 0/4/8, influence 1/5/9, steadiness 2/6, compliance 3/7.
static DISC: [Question; 10] = [
    q("I like to take the initiative and lead"),
    q("I enjoy influencing and persuading other people"),
    q("I prefer stability and routine"),
    q("I am very thorough and careful"),
    q("I am results-driven and value efficiency"),
    q("I am enthusiastic and love socializing"),
    q("I am loyal and supportive of my team"),
    q("I like following rules and procedures"),
    q("I am comfortable taking risks"),
    q("I enjoy working with other people"),
];

pub fn questions_for(test_type: TestType) -> &'static [Question; 10] {
    match test_type {
        TestType::Mbti => &MBTI,
        TestType::LoveLanguage => &LOVE_LANGUAGE,
        TestType::Readiness => &READINESS,
        TestType::Temperament => &TEMPERAMENT,
        TestType::Disc => &DISC,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_bank_has_ten_questions_with_five_options() {
        for test_type in TestType::ALL {
            let bank = questions_for(test_type);
            assert_eq!(bank.len(), 10);
            for question in bank {
                assert_eq!(question.options.len(), 5);
                assert!(!question.question.is_empty());
            }
        }
    }
}
