use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::form::{ParentAnswers, ParentQuestion};

/// Skill categories reported for the parent questionnaire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParentSkill {
    SelfAwareness,
    SocialManagement,
    SocialAwareness,
    RelationshipSkills,
    ResponsibleDecisionMaking,
    Metacognition,
    Empathy,
    CriticalThinking,
}

impl ParentSkill {
    pub const ALL: [ParentSkill; 8] = [
        ParentSkill::SelfAwareness,
        ParentSkill::SocialManagement,
        ParentSkill::SocialAwareness,
        ParentSkill::RelationshipSkills,
        ParentSkill::ResponsibleDecisionMaking,
        ParentSkill::Metacognition,
        ParentSkill::Empathy,
        ParentSkill::CriticalThinking,
    ];

    pub const fn key(self) -> &'static str {
        match self {
            ParentSkill::SelfAwareness => "self_awareness",
            ParentSkill::SocialManagement => "social_management",
            ParentSkill::SocialAwareness => "social_awareness",
            ParentSkill::RelationshipSkills => "relationship_skills",
            ParentSkill::ResponsibleDecisionMaking => "responsible_decision_making",
            ParentSkill::Metacognition => "metacognition",
            ParentSkill::Empathy => "empathy",
            ParentSkill::CriticalThinking => "critical_thinking",
        }
    }
}

/// Questions contributing to each skill, fixed at build time.
///
/// The pool is shared across skills and a list may repeat a question; a
/// repeated key counts in both the numerator and the denominator of the
/// average, matching the data already persisted for this questionnaire.
pub fn contributing_questions(skill: ParentSkill) -> &'static [ParentQuestion] {
    use ParentQuestion::*;

    match skill {
        ParentSkill::SelfAwareness => &[Feelings, Preferences],
        ParentSkill::SocialManagement => &[SelfRegulation, ImpulseControl],
        ParentSkill::SocialAwareness => &[Empathy, Comforting],
        ParentSkill::RelationshipSkills => &[ProblemSolving],
        ParentSkill::ResponsibleDecisionMaking => &[HelpSeeking, ImpulseControl],
        ParentSkill::Metacognition => &[LearningGoals, SelfAwareness, LearningGoals],
        ParentSkill::Empathy => &[Comforting, Empathy, ProblemSolving],
        ParentSkill::CriticalThinking => &[Persistence, HelpSeeking, ImpulseControl],
    }
}

/// Numeric value of one stored answer. Unanswered or non-numeric text is
/// worth 0 and still occupies its slot in any average it belongs to.
pub fn answer_points(raw: &str) -> i64 {
    raw.trim().parse::<i64>().unwrap_or(0)
}

/// Arithmetic mean of the given questions' answers; 0 for an empty list.
pub fn score_questions(questions: &[ParentQuestion], answers: &ParentAnswers) -> f64 {
    if questions.is_empty() {
        return 0.0;
    }

    let total: i64 = questions
        .iter()
        .map(|question| answer_points(answers.get(*question)))
        .sum();

    total as f64 / questions.len() as f64
}

pub fn skill_score(skill: ParentSkill, answers: &ParentAnswers) -> f64 {
    score_questions(contributing_questions(skill), answers)
}

/// Full per-skill score set, recomputed from scratch on every call.
pub fn skill_scores(answers: &ParentAnswers) -> BTreeMap<ParentSkill, f64> {
    ParentSkill::ALL
        .into_iter()
        .map(|skill| (skill, skill_score(skill, answers)))
        .collect()
}

/// Mean across every answerable item, answered or not.
pub fn overall_score(answers: &ParentAnswers) -> f64 {
    score_questions(&ParentQuestion::ALL, answers)
}

/// Skill scores keyed by their wire names for payloads.
pub fn keyed(scores: &BTreeMap<ParentSkill, f64>) -> BTreeMap<String, f64> {
    scores
        .iter()
        .map(|(skill, score)| (skill.key().to_string(), *score))
        .collect()
}
