use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One student's questionnaire input.
///
/// Choice answers are recorded twice: the chosen option key lands in
/// [`StudentAnswers`] for the persisted answers mapping, and the option's
/// point value lands in the score map the scorer reads. The two warm-up
/// free-response items only ever touch the answers record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StudentForm {
    pub zone: String,
    pub school: String,
    pub grade: String,
    pub section: String,
    pub answers: StudentAnswers,
    scores: BTreeMap<StudentQuestion, u8>,
}

impl StudentForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total replacement of one single-value entry.
    pub fn apply_edit(&mut self, field: StudentField, value: impl Into<String>) {
        let value = value.into();
        match field {
            StudentField::Zone => self.zone = value,
            StudentField::School => self.school = value,
            StudentField::Grade => self.grade = value,
            StudentField::Section => self.section = value,
            StudentField::ThreeWords => self.answers.q1_three_words = value,
            StudentField::FavoriteActivity => self.answers.q2_favorite_activity = value,
        }
    }

    /// Records a choice answer and its point value in the same step.
    /// Re-selecting replaces the previous choice for that question.
    pub fn record_answer(&mut self, question: StudentQuestion, choice: AnswerChoice) {
        self.answers.set(question, choice.key());
        self.scores.insert(question, choice.points());
    }

    /// Point values of every question answered so far.
    pub fn scores(&self) -> &BTreeMap<StudentQuestion, u8> {
        &self.scores
    }
}

/// Stored answers for all seventeen items, keyed as persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentAnswers {
    pub q1_three_words: String,
    pub q2_favorite_activity: String,
    pub q3_emotions: String,
    pub q4_strengths: String,
    pub q5_mistakes: String,
    pub q6_calm_down: String,
    pub q7_goals: String,
    pub q8_distractions: String,
    pub q9_others_feelings: String,
    pub q10_different_views: String,
    pub q11_kindness: String,
    pub q12_sharing: String,
    pub q13_listening: String,
    pub q14_conflicts: String,
    pub q15_consequences: String,
    pub q16_rules: String,
    pub q17_helping: String,
}

impl StudentAnswers {
    fn set(&mut self, question: StudentQuestion, value: &str) {
        let slot = match question {
            StudentQuestion::Emotions => &mut self.q3_emotions,
            StudentQuestion::Strengths => &mut self.q4_strengths,
            StudentQuestion::Mistakes => &mut self.q5_mistakes,
            StudentQuestion::CalmDown => &mut self.q6_calm_down,
            StudentQuestion::Goals => &mut self.q7_goals,
            StudentQuestion::Distractions => &mut self.q8_distractions,
            StudentQuestion::OthersFeelings => &mut self.q9_others_feelings,
            StudentQuestion::DifferentViews => &mut self.q10_different_views,
            StudentQuestion::Kindness => &mut self.q11_kindness,
            StudentQuestion::Sharing => &mut self.q12_sharing,
            StudentQuestion::Listening => &mut self.q13_listening,
            StudentQuestion::Conflicts => &mut self.q14_conflicts,
            StudentQuestion::Consequences => &mut self.q15_consequences,
            StudentQuestion::Rules => &mut self.q16_rules,
            StudentQuestion::Helping => &mut self.q17_helping,
        };
        *slot = value.to_string();
    }
}

/// The fifteen scored statements (q3 through q17).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum StudentQuestion {
    Emotions,
    Strengths,
    Mistakes,
    CalmDown,
    Goals,
    Distractions,
    OthersFeelings,
    DifferentViews,
    Kindness,
    Sharing,
    Listening,
    Conflicts,
    Consequences,
    Rules,
    Helping,
}

impl StudentQuestion {
    pub const ALL: [StudentQuestion; 15] = [
        StudentQuestion::Emotions,
        StudentQuestion::Strengths,
        StudentQuestion::Mistakes,
        StudentQuestion::CalmDown,
        StudentQuestion::Goals,
        StudentQuestion::Distractions,
        StudentQuestion::OthersFeelings,
        StudentQuestion::DifferentViews,
        StudentQuestion::Kindness,
        StudentQuestion::Sharing,
        StudentQuestion::Listening,
        StudentQuestion::Conflicts,
        StudentQuestion::Consequences,
        StudentQuestion::Rules,
        StudentQuestion::Helping,
    ];

    pub const fn key(self) -> &'static str {
        match self {
            StudentQuestion::Emotions => "q3_emotions",
            StudentQuestion::Strengths => "q4_strengths",
            StudentQuestion::Mistakes => "q5_mistakes",
            StudentQuestion::CalmDown => "q6_calm_down",
            StudentQuestion::Goals => "q7_goals",
            StudentQuestion::Distractions => "q8_distractions",
            StudentQuestion::OthersFeelings => "q9_others_feelings",
            StudentQuestion::DifferentViews => "q10_different_views",
            StudentQuestion::Kindness => "q11_kindness",
            StudentQuestion::Sharing => "q12_sharing",
            StudentQuestion::Listening => "q13_listening",
            StudentQuestion::Conflicts => "q14_conflicts",
            StudentQuestion::Consequences => "q15_consequences",
            StudentQuestion::Rules => "q16_rules",
            StudentQuestion::Helping => "q17_helping",
        }
    }

    pub fn parse(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|question| question.key() == key)
    }
}

/// Single-value fields addressable by wire key, including the two unscored
/// free-response items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StudentField {
    Zone,
    School,
    Grade,
    Section,
    ThreeWords,
    FavoriteActivity,
}

impl StudentField {
    pub fn parse(key: &str) -> Option<Self> {
        let field = match key {
            "zone" => StudentField::Zone,
            "school" => StudentField::School,
            "grade" => StudentField::Grade,
            "section" => StudentField::Section,
            "q1_three_words" => StudentField::ThreeWords,
            "q2_favorite_activity" => StudentField::FavoriteActivity,
            _ => return None,
        };
        Some(field)
    }
}

/// The three-point frequency scale offered for every scored statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerChoice {
    Rarely,
    Sometimes,
    Often,
}

impl AnswerChoice {
    pub const fn points(self) -> u8 {
        match self {
            AnswerChoice::Rarely => 1,
            AnswerChoice::Sometimes => 2,
            AnswerChoice::Often => 3,
        }
    }

    pub const fn key(self) -> &'static str {
        match self {
            AnswerChoice::Rarely => "rarely",
            AnswerChoice::Sometimes => "sometimes",
            AnswerChoice::Often => "often",
        }
    }

    pub fn parse(key: &str) -> Option<Self> {
        match key {
            "rarely" => Some(AnswerChoice::Rarely),
            "sometimes" => Some(AnswerChoice::Sometimes),
            "often" => Some(AnswerChoice::Often),
            _ => None,
        }
    }
}
