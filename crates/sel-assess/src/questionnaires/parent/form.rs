use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Schools currently enrolled in the program.
pub const SCHOOLS: [&str; 3] = ["School 1", "School 2", "School 3"];

/// Grades currently assessed.
pub const GRADES: [&str; 1] = ["Grade 1"];

/// One questionnaire session's worth of parent input.
///
/// The record is explicit rather than a string-keyed map; field identity is
/// the [`ParentField`] enum and the serde renames reproduce the wire keys the
/// hosted collections already hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParentForm {
    pub school: String,
    pub grade: String,
    pub demographics: Demographics,
    pub answers: ParentAnswers,
}

impl ParentForm {
    pub fn new() -> Self {
        Self {
            school: SCHOOLS[0].to_string(),
            grade: GRADES[0].to_string(),
            demographics: Demographics::default(),
            answers: ParentAnswers::default(),
        }
    }

    /// Total replacement of one single-value entry.
    pub fn apply_edit(&mut self, field: ParentField, value: impl Into<String>) {
        let value = value.into();
        match field {
            ParentField::School => self.school = value,
            ParentField::Grade => self.grade = value,
            ParentField::Relation => self.demographics.relation = value,
            ParentField::Age => self.demographics.age = value,
            ParentField::Education => self.demographics.education = value,
            ParentField::Occupation => self.demographics.occupation = value,
            ParentField::Income => self.demographics.income = value,
            ParentField::ChildrenAtHome => self.demographics.children_at_home = value,
            ParentField::AdultsAtHome => self.demographics.adults_at_home = value,
            ParentField::ReadingFrequency => self.demographics.reading_frequency = value,
            ParentField::ScreenTime => self.demographics.screen_time = value,
            ParentField::Answer(question) => self.answers.set(question, value),
        }
    }

    /// Adds the value to a multi-select set when checked, removes it
    /// otherwise. Idempotent by set construction.
    pub fn toggle(&mut self, field: ParentMultiField, value: &str, checked: bool) {
        let set = match field {
            ParentMultiField::Languages => &mut self.demographics.languages,
            ParentMultiField::ScreenActivities => &mut self.demographics.screen_activities,
        };
        if checked {
            set.insert(value.to_string());
        } else {
            set.remove(value);
        }
    }
}

impl Default for ParentForm {
    fn default() -> Self {
        Self::new()
    }
}

/// Household demographics section, serialized under its original wire keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Demographics {
    #[serde(rename = "d1_relation")]
    pub relation: String,
    #[serde(rename = "d2_age")]
    pub age: String,
    #[serde(rename = "d3_education")]
    pub education: String,
    #[serde(rename = "d4_occupation")]
    pub occupation: String,
    #[serde(rename = "d5_income")]
    pub income: String,
    #[serde(rename = "d6_childrenAtHome")]
    pub children_at_home: String,
    #[serde(rename = "d7_adultsAtHome")]
    pub adults_at_home: String,
    #[serde(rename = "d8_languages")]
    pub languages: BTreeSet<String>,
    #[serde(rename = "d9_readingFrequency")]
    pub reading_frequency: String,
    #[serde(rename = "d10_screenActivities")]
    pub screen_activities: BTreeSet<String>,
    #[serde(rename = "d11_screenTime")]
    pub screen_time: String,
}

/// Stored option keys for the eleven child-development items. An empty
/// string means unanswered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParentAnswers {
    pub q1_feelings: String,
    pub q2_preferences: String,
    pub q3_persistence: String,
    pub q4_help_seeking: String,
    pub q5_empathy: String,
    pub q6_comforting: String,
    pub q7_problem_solving: String,
    pub q8_self_regulation: String,
    pub q9_impulse_control: String,
    pub q10_self_awareness: String,
    pub q11_learning_goals: String,
}

impl ParentAnswers {
    pub fn get(&self, question: ParentQuestion) -> &str {
        match question {
            ParentQuestion::Feelings => &self.q1_feelings,
            ParentQuestion::Preferences => &self.q2_preferences,
            ParentQuestion::Persistence => &self.q3_persistence,
            ParentQuestion::HelpSeeking => &self.q4_help_seeking,
            ParentQuestion::Empathy => &self.q5_empathy,
            ParentQuestion::Comforting => &self.q6_comforting,
            ParentQuestion::ProblemSolving => &self.q7_problem_solving,
            ParentQuestion::SelfRegulation => &self.q8_self_regulation,
            ParentQuestion::ImpulseControl => &self.q9_impulse_control,
            ParentQuestion::SelfAwareness => &self.q10_self_awareness,
            ParentQuestion::LearningGoals => &self.q11_learning_goals,
        }
    }

    pub fn set(&mut self, question: ParentQuestion, value: impl Into<String>) {
        let slot = match question {
            ParentQuestion::Feelings => &mut self.q1_feelings,
            ParentQuestion::Preferences => &mut self.q2_preferences,
            ParentQuestion::Persistence => &mut self.q3_persistence,
            ParentQuestion::HelpSeeking => &mut self.q4_help_seeking,
            ParentQuestion::Empathy => &mut self.q5_empathy,
            ParentQuestion::Comforting => &mut self.q6_comforting,
            ParentQuestion::ProblemSolving => &mut self.q7_problem_solving,
            ParentQuestion::SelfRegulation => &mut self.q8_self_regulation,
            ParentQuestion::ImpulseControl => &mut self.q9_impulse_control,
            ParentQuestion::SelfAwareness => &mut self.q10_self_awareness,
            ParentQuestion::LearningGoals => &mut self.q11_learning_goals,
        };
        *slot = value.into();
    }
}

/// The eleven answerable child-development items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ParentQuestion {
    Feelings,
    Preferences,
    Persistence,
    HelpSeeking,
    Empathy,
    Comforting,
    ProblemSolving,
    SelfRegulation,
    ImpulseControl,
    SelfAwareness,
    LearningGoals,
}

impl ParentQuestion {
    pub const ALL: [ParentQuestion; 11] = [
        ParentQuestion::Feelings,
        ParentQuestion::Preferences,
        ParentQuestion::Persistence,
        ParentQuestion::HelpSeeking,
        ParentQuestion::Empathy,
        ParentQuestion::Comforting,
        ParentQuestion::ProblemSolving,
        ParentQuestion::SelfRegulation,
        ParentQuestion::ImpulseControl,
        ParentQuestion::SelfAwareness,
        ParentQuestion::LearningGoals,
    ];

    pub const fn key(self) -> &'static str {
        match self {
            ParentQuestion::Feelings => "q1_feelings",
            ParentQuestion::Preferences => "q2_preferences",
            ParentQuestion::Persistence => "q3_persistence",
            ParentQuestion::HelpSeeking => "q4_help_seeking",
            ParentQuestion::Empathy => "q5_empathy",
            ParentQuestion::Comforting => "q6_comforting",
            ParentQuestion::ProblemSolving => "q7_problem_solving",
            ParentQuestion::SelfRegulation => "q8_self_regulation",
            ParentQuestion::ImpulseControl => "q9_impulse_control",
            ParentQuestion::SelfAwareness => "q10_self_awareness",
            ParentQuestion::LearningGoals => "q11_learning_goals",
        }
    }

    pub fn parse(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|question| question.key() == key)
    }
}

/// Single-value fields addressable by wire key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParentField {
    School,
    Grade,
    Relation,
    Age,
    Education,
    Occupation,
    Income,
    ChildrenAtHome,
    AdultsAtHome,
    ReadingFrequency,
    ScreenTime,
    Answer(ParentQuestion),
}

impl ParentField {
    pub fn parse(key: &str) -> Option<Self> {
        let field = match key {
            "school" => ParentField::School,
            "grade" => ParentField::Grade,
            "d1_relation" => ParentField::Relation,
            "d2_age" => ParentField::Age,
            "d3_education" => ParentField::Education,
            "d4_occupation" => ParentField::Occupation,
            "d5_income" => ParentField::Income,
            "d6_childrenAtHome" => ParentField::ChildrenAtHome,
            "d7_adultsAtHome" => ParentField::AdultsAtHome,
            "d9_readingFrequency" => ParentField::ReadingFrequency,
            "d11_screenTime" => ParentField::ScreenTime,
            other => return ParentQuestion::parse(other).map(ParentField::Answer),
        };
        Some(field)
    }
}

/// Multi-select checkbox fields backed by string sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParentMultiField {
    Languages,
    ScreenActivities,
}

impl ParentMultiField {
    pub fn parse(key: &str) -> Option<Self> {
        match key {
            "d8_languages" => Some(ParentMultiField::Languages),
            "d10_screenActivities" => Some(ParentMultiField::ScreenActivities),
            _ => None,
        }
    }
}
