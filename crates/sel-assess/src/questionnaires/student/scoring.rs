use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::form::StudentQuestion;

/// Skill categories reported for the student questionnaire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StudentSkill {
    SelfAwareness,
    SelfManagement,
    SocialAwareness,
    RelationshipSkills,
    ResponsibleDecisionMaking,
}

impl StudentSkill {
    pub const ALL: [StudentSkill; 5] = [
        StudentSkill::SelfAwareness,
        StudentSkill::SelfManagement,
        StudentSkill::SocialAwareness,
        StudentSkill::RelationshipSkills,
        StudentSkill::ResponsibleDecisionMaking,
    ];

    pub const fn key(self) -> &'static str {
        match self {
            StudentSkill::SelfAwareness => "self_awareness",
            StudentSkill::SelfManagement => "self_management",
            StudentSkill::SocialAwareness => "social_awareness",
            StudentSkill::RelationshipSkills => "relationship_skills",
            StudentSkill::ResponsibleDecisionMaking => "responsible_decision_making",
        }
    }
}

/// Questions contributing to each skill. Unlike the parent variant the
/// groups are disjoint: three statements per skill, no sharing.
pub fn contributing_questions(skill: StudentSkill) -> &'static [StudentQuestion] {
    use StudentQuestion::*;

    match skill {
        StudentSkill::SelfAwareness => &[Emotions, Strengths, Mistakes],
        StudentSkill::SelfManagement => &[CalmDown, Goals, Distractions],
        StudentSkill::SocialAwareness => &[OthersFeelings, DifferentViews, Kindness],
        StudentSkill::RelationshipSkills => &[Sharing, Listening, Conflicts],
        StudentSkill::ResponsibleDecisionMaking => &[Consequences, Rules, Helping],
    }
}

/// Arithmetic mean of the given questions' recorded points; a question with
/// no recorded choice contributes 0 and stays in the denominator. Returns 0
/// for an empty list.
pub fn score_questions(
    questions: &[StudentQuestion],
    scores: &BTreeMap<StudentQuestion, u8>,
) -> f64 {
    if questions.is_empty() {
        return 0.0;
    }

    let total: u32 = questions
        .iter()
        .map(|question| u32::from(scores.get(question).copied().unwrap_or(0)))
        .sum();

    f64::from(total) / questions.len() as f64
}

pub fn skill_score(skill: StudentSkill, scores: &BTreeMap<StudentQuestion, u8>) -> f64 {
    score_questions(contributing_questions(skill), scores)
}

/// Full per-skill score set, recomputed from scratch on every call.
pub fn skill_scores(scores: &BTreeMap<StudentQuestion, u8>) -> BTreeMap<StudentSkill, f64> {
    StudentSkill::ALL
        .into_iter()
        .map(|skill| (skill, skill_score(skill, scores)))
        .collect()
}

/// Mean across only the questions actually answered so far; items without a
/// recorded choice (including the free-response warm-ups, which never enter
/// the score map) are not part of the denominator.
pub fn overall_score(scores: &BTreeMap<StudentQuestion, u8>) -> f64 {
    if scores.is_empty() {
        return 0.0;
    }

    let total: u32 = scores.values().map(|points| u32::from(*points)).sum();
    f64::from(total) / scores.len() as f64
}

/// Skill scores keyed by their wire names for payloads.
pub fn keyed(scores: &BTreeMap<StudentSkill, f64>) -> BTreeMap<String, f64> {
    scores
        .iter()
        .map(|(skill, score)| (skill.key().to_string(), *score))
        .collect()
}
