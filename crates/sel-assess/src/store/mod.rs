//! Document-store boundary for finished questionnaire submissions.
//!
//! The store is injected into the submission service so flows can be
//! exercised against recording doubles; the one production adapter lives in
//! [`appwrite`].

pub mod appwrite;

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use appwrite::AppwriteStore;

/// Identifier of a document collection inside the hosted database.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CollectionId(pub String);

/// Identifier assigned by the store when a document is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentId(pub String);

/// Target collections for the two questionnaire variants.
#[derive(Debug, Clone)]
pub struct AssessmentCollections {
    pub parents: CollectionId,
    pub students: CollectionId,
}

/// Which questionnaire produced a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssessmentKind {
    Parent,
    Student,
}

impl AssessmentKind {
    pub const fn label(self) -> &'static str {
        match self {
            AssessmentKind::Parent => "parent",
            AssessmentKind::Student => "student",
        }
    }
}

/// Administration tag carried through submissions untouched (e.g. PRE/POST).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TestPhase(pub String);

impl TestPhase {
    /// Reads the tag from an optional query value, keeping it opaque.
    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag {
            Some(value) if !value.is_empty() => Self(value.to_string()),
            _ => Self::default(),
        }
    }
}

impl Default for TestPhase {
    fn default() -> Self {
        Self("PRE".to_string())
    }
}

/// Flattened assessment record written on the first of the two store calls.
///
/// The hosted collections store `skill_scores`, `demographics`, and `answers`
/// as JSON-encoded text columns, so those fields are pre-serialized strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentDocument {
    pub school: String,
    pub grade: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    #[serde(rename = "overallScore")]
    pub overall_score: f64,
    #[serde(rename = "skillScores")]
    pub skill_scores: String,
    pub demographics: String,
    pub answers: String,
    #[serde(rename = "testType")]
    pub test_phase: TestPhase,
    #[serde(rename = "submittedAt")]
    pub submitted_at: DateTime<Utc>,
}

/// Aggregate-score record written on the second store call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreUpdate {
    #[serde(rename = "skillScores")]
    pub skill_scores: BTreeMap<String, f64>,
    pub school: String,
    pub grade: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    pub assessment: AssessmentKind,
    #[serde(rename = "testType")]
    pub test_phase: TestPhase,
    #[serde(rename = "overallScore")]
    pub overall_score: f64,
}

/// Opaque store failures; callers never branch on the payload.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("document store unavailable: {0}")]
    Unavailable(String),
    #[error("document store rejected the write: {0}")]
    Rejected(String),
}

/// Persistence collaborator consumed by the submission service.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn create_assessment(
        &self,
        collection: &CollectionId,
        document: &AssessmentDocument,
    ) -> Result<DocumentId, StoreError>;

    async fn update_scores(&self, update: &ScoreUpdate) -> Result<(), StoreError>;
}
