use chrono::{DateTime, Utc};

use crate::locale::Lang;
use crate::store::{AssessmentDocument, AssessmentKind, ScoreUpdate, TestPhase};

use super::super::session::SubmissionPhase;
use super::form::ParentForm;
use super::scoring;

/// Documents already persisted for this questionnaire carry the overall
/// score divided by this on top of the per-question average; the divisor is
/// applied here, at the call site, and nowhere inside the scorer.
const OVERALL_DIVISOR: f64 = 8.0;

/// One parent's active questionnaire session.
#[derive(Debug, Clone)]
pub struct ParentSession {
    pub form: ParentForm,
    pub lang: Lang,
    pub test_phase: TestPhase,
    pub phase: SubmissionPhase,
}

impl ParentSession {
    pub fn new(lang: Lang, test_phase: TestPhase) -> Self {
        Self {
            form: ParentForm::new(),
            lang,
            test_phase,
            phase: SubmissionPhase::Idle,
        }
    }
}

/// Shapes the two outbound payloads from the current form state.
///
/// Demographics, answers, and skill scores travel as JSON-encoded strings in
/// the assessment document; the score update carries the mapping directly.
pub(crate) fn build_documents(
    form: &ParentForm,
    test_phase: &TestPhase,
    submitted_at: DateTime<Utc>,
) -> Result<(AssessmentDocument, ScoreUpdate), serde_json::Error> {
    let skill_scores = scoring::skill_scores(&form.answers);
    let overall_score = scoring::overall_score(&form.answers) / OVERALL_DIVISOR;
    let keyed_scores = scoring::keyed(&skill_scores);

    let document = AssessmentDocument {
        school: form.school.clone(),
        grade: form.grade.clone(),
        zone: None,
        section: None,
        overall_score,
        skill_scores: serde_json::to_string(&keyed_scores)?,
        demographics: serde_json::to_string(&form.demographics)?,
        answers: serde_json::to_string(&form.answers)?,
        test_phase: test_phase.clone(),
        submitted_at,
    };

    let update = ScoreUpdate {
        skill_scores: keyed_scores,
        school: form.school.clone(),
        grade: form.grade.clone(),
        zone: None,
        section: None,
        assessment: AssessmentKind::Parent,
        test_phase: test_phase.clone(),
        overall_score,
    };

    Ok((document, update))
}
