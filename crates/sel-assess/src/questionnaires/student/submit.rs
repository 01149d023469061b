use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::locale::Lang;
use crate::store::{AssessmentDocument, AssessmentKind, ScoreUpdate, TestPhase};

use super::super::session::SubmissionPhase;
use super::form::StudentForm;
use super::scoring;

/// One student's active questionnaire session.
#[derive(Debug, Clone)]
pub struct StudentSession {
    pub form: StudentForm,
    pub lang: Lang,
    pub test_phase: TestPhase,
    pub phase: SubmissionPhase,
}

impl StudentSession {
    pub fn new(lang: Lang, test_phase: TestPhase) -> Self {
        Self {
            form: StudentForm::new(),
            lang,
            test_phase,
            phase: SubmissionPhase::Idle,
        }
    }
}

#[derive(Serialize)]
struct StudentDemographics<'a> {
    zone: &'a str,
    school: &'a str,
    grade: &'a str,
    section: &'a str,
}

/// Shapes the two outbound payloads from the current form state. The overall
/// score averages only the explicitly scored items; no extra normalization
/// is applied for this variant.
pub(crate) fn build_documents(
    form: &StudentForm,
    test_phase: &TestPhase,
    submitted_at: DateTime<Utc>,
) -> Result<(AssessmentDocument, ScoreUpdate), serde_json::Error> {
    let skill_scores = scoring::skill_scores(form.scores());
    let overall_score = scoring::overall_score(form.scores());
    let keyed_scores = scoring::keyed(&skill_scores);

    let demographics = StudentDemographics {
        zone: &form.zone,
        school: &form.school,
        grade: &form.grade,
        section: &form.section,
    };

    let document = AssessmentDocument {
        school: form.school.clone(),
        grade: form.grade.clone(),
        zone: Some(form.zone.clone()),
        section: Some(form.section.clone()),
        overall_score,
        skill_scores: serde_json::to_string(&keyed_scores)?,
        demographics: serde_json::to_string(&demographics)?,
        answers: serde_json::to_string(&form.answers)?,
        test_phase: test_phase.clone(),
        submitted_at,
    };

    let update = ScoreUpdate {
        skill_scores: keyed_scores,
        school: form.school.clone(),
        grade: form.grade.clone(),
        zone: Some(form.zone.clone()),
        section: Some(form.section.clone()),
        assessment: AssessmentKind::Student,
        test_phase: test_phase.clone(),
        overall_score,
    };

    Ok((document, update))
}
