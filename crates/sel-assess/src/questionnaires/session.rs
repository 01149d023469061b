use std::sync::Arc;

use chrono::Utc;
use tracing::{error, info};

use crate::locale;
use crate::store::{
    AssessmentCollections, AssessmentDocument, AssessmentKind, CollectionId, DocumentId,
    DocumentStore, ScoreUpdate, StoreError,
};

use super::parent::submit as parent_submit;
use super::parent::ParentSession;
use super::student::submit as student_submit;
use super::student::StudentSession;

/// Where a questionnaire session stands with respect to submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionPhase {
    Idle,
    InFlight,
    Submitted,
    Failed { message: String },
}

impl SubmissionPhase {
    pub const fn label(&self) -> &'static str {
        match self {
            SubmissionPhase::Idle => "idle",
            SubmissionPhase::InFlight => "in_flight",
            SubmissionPhase::Submitted => "submitted",
            SubmissionPhase::Failed { .. } => "failed",
        }
    }

    /// The user-facing message attached to a failed submission.
    pub fn message(&self) -> Option<&str> {
        match self {
            SubmissionPhase::Failed { message } => Some(message),
            _ => None,
        }
    }

    /// A submit trigger is accepted when idle or after a failure; an
    /// in-flight or completed session rejects re-entry.
    pub fn accepts_submission(&self) -> bool {
        matches!(self, SubmissionPhase::Idle | SubmissionPhase::Failed { .. })
    }
}

/// Error raised by the submission service.
#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error("a submission is already in flight")]
    AlreadyInFlight,
    #[error("questionnaire already submitted")]
    AlreadySubmitted,
    #[error("failed to encode payload: {0}")]
    Encode(#[from] serde_json::Error),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Drives a finished form through the two sequential store writes.
///
/// The store is injected so flows run unchanged against recording doubles.
pub struct SubmissionService<S> {
    store: Arc<S>,
    collections: AssessmentCollections,
}

impl<S> SubmissionService<S>
where
    S: DocumentStore,
{
    pub fn new(store: Arc<S>, collections: AssessmentCollections) -> Self {
        Self { store, collections }
    }

    pub async fn submit_parent(
        &self,
        session: &mut ParentSession,
    ) -> Result<DocumentId, SubmissionError> {
        gate(&session.phase)?;
        session.phase = SubmissionPhase::InFlight;

        let built = parent_submit::build_documents(&session.form, &session.test_phase, Utc::now());
        let outcome = self.execute(&self.collections.parents, built).await;
        session.phase = conclude(outcome.as_ref(), AssessmentKind::Parent, session.lang);
        outcome
    }

    pub async fn submit_student(
        &self,
        session: &mut StudentSession,
    ) -> Result<DocumentId, SubmissionError> {
        gate(&session.phase)?;
        session.phase = SubmissionPhase::InFlight;

        let built = student_submit::build_documents(&session.form, &session.test_phase, Utc::now());
        let outcome = self.execute(&self.collections.students, built).await;
        session.phase = conclude(outcome.as_ref(), AssessmentKind::Student, session.lang);
        outcome
    }

    /// The two writes, strictly one after the other. A failed assessment
    /// create short-circuits; the score update is never issued after it.
    async fn execute(
        &self,
        collection: &CollectionId,
        built: Result<(AssessmentDocument, ScoreUpdate), serde_json::Error>,
    ) -> Result<DocumentId, SubmissionError> {
        let (document, update) = built?;
        let document_id = self.store.create_assessment(collection, &document).await?;
        self.store.update_scores(&update).await?;
        Ok(document_id)
    }
}

fn gate(phase: &SubmissionPhase) -> Result<(), SubmissionError> {
    match phase {
        SubmissionPhase::InFlight => Err(SubmissionError::AlreadyInFlight),
        SubmissionPhase::Submitted => Err(SubmissionError::AlreadySubmitted),
        _ => Ok(()),
    }
}

/// Terminal phase after a submission attempt. The cause of a failure is
/// logged here and never surfaced beyond a generic localized message.
fn conclude(
    outcome: Result<&DocumentId, &SubmissionError>,
    kind: AssessmentKind,
    lang: locale::Lang,
) -> SubmissionPhase {
    match outcome {
        Ok(document_id) => {
            info!(
                assessment = kind.label(),
                document = %document_id.0,
                "questionnaire submission stored"
            );
            SubmissionPhase::Submitted
        }
        Err(err) => {
            error!(
                assessment = kind.label(),
                error = %err,
                "questionnaire submission failed"
            );
            let key = match kind {
                AssessmentKind::Parent => "parent.error",
                AssessmentKind::Student => "student.error",
            };
            SubmissionPhase::Failed {
                message: locale::text(lang, key),
            }
        }
    }
}
