use std::sync::Arc;

use clap::Args;

use sel_assess::error::AppError;
use sel_assess::locale::{self, Lang};
use sel_assess::questionnaires::parent::{
    scoring as parent_scoring, ParentField, ParentMultiField, ParentQuestion, ParentSession,
};
use sel_assess::questionnaires::student::{
    scoring as student_scoring, AnswerChoice, StudentField, StudentQuestion, StudentSession,
};
use sel_assess::questionnaires::SubmissionService;
use sel_assess::store::{AssessmentCollections, CollectionId, TestPhase};

use crate::infra::InMemoryDocumentStore;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Locale used for rendered labels (en or ar)
    #[arg(long)]
    pub(crate) lang: Option<String>,
    /// Administration tag stamped onto the submissions (defaults to PRE)
    #[arg(long)]
    pub(crate) test_type: Option<String>,
    /// Skip the student questionnaire portion of the demo
    #[arg(long)]
    pub(crate) skip_student: bool,
}

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let lang = Lang::from_tag(args.lang.as_deref());
    let test_phase = TestPhase::from_tag(args.test_type.as_deref());

    let store = Arc::new(InMemoryDocumentStore::default());
    let collections = AssessmentCollections {
        parents: CollectionId("parent_assessments".to_string()),
        students: CollectionId("student_assessments".to_string()),
    };
    let service = SubmissionService::new(store.clone(), collections);

    println!("Questionnaire demo ({})", lang.tag());

    println!("\n{}", locale::text(lang, "parent.title"));
    let mut parent = ParentSession::new(lang, test_phase.clone());
    fill_parent(&mut parent);
    for (skill, score) in parent_scoring::skill_scores(&parent.form.answers) {
        println!("- {:<28} {score:.2}", skill.key());
    }
    let document_id = service.submit_parent(&mut parent).await?;
    println!(
        "{} ({})",
        locale::text(lang, "parent.submissionSuccess"),
        document_id.0
    );

    if !args.skip_student {
        println!("\n{}", locale::text(lang, "student.title"));
        let mut student = StudentSession::new(lang, test_phase);
        fill_student(&mut student);
        for (skill, score) in student_scoring::skill_scores(student.form.scores()) {
            println!("- {:<28} {score:.2}", skill.key());
        }
        let document_id = service.submit_student(&mut student).await?;
        println!(
            "{} ({})",
            locale::text(lang, "student.submissionSuccess"),
            document_id.0
        );
    }

    println!(
        "\nStored {} assessment document(s) and {} score update(s)",
        store.documents().len(),
        store.updates().len()
    );

    Ok(())
}

fn fill_parent(session: &mut ParentSession) {
    let form = &mut session.form;
    form.apply_edit(ParentField::School, "School 1");
    form.apply_edit(ParentField::Relation, "mother");
    form.apply_edit(ParentField::Age, "36");
    form.apply_edit(ParentField::Education, "bachelor");
    form.apply_edit(ParentField::Occupation, "professional");
    form.apply_edit(ParentField::Income, "15000to19999");
    form.apply_edit(ParentField::ChildrenAtHome, "2");
    form.apply_edit(ParentField::AdultsAtHome, "2");
    form.apply_edit(ParentField::ReadingFrequency, "daily");
    form.apply_edit(ParentField::ScreenTime, "1to2hours");
    form.toggle(ParentMultiField::Languages, "arabic", true);
    form.toggle(ParentMultiField::Languages, "english", true);
    form.toggle(ParentMultiField::ScreenActivities, "educational_apps", true);
    form.toggle(ParentMultiField::ScreenActivities, "videos", true);

    // A mixed answer profile so the skill table shows some spread.
    let answers: [(ParentQuestion, &str); 11] = [
        (ParentQuestion::Feelings, "3"),
        (ParentQuestion::Preferences, "2"),
        (ParentQuestion::Persistence, "1"),
        (ParentQuestion::HelpSeeking, "2"),
        (ParentQuestion::Empathy, "3"),
        (ParentQuestion::Comforting, "2"),
        (ParentQuestion::ProblemSolving, "1"),
        (ParentQuestion::SelfRegulation, "2"),
        (ParentQuestion::ImpulseControl, "1"),
        (ParentQuestion::SelfAwareness, "3"),
        (ParentQuestion::LearningGoals, "2"),
    ];
    for (question, value) in answers {
        form.apply_edit(ParentField::Answer(question), value);
    }
}

fn fill_student(session: &mut StudentSession) {
    let form = &mut session.form;
    form.apply_edit(StudentField::Zone, "Zone North");
    form.apply_edit(StudentField::School, "School 1");
    form.apply_edit(StudentField::Grade, "Grade 1");
    form.apply_edit(StudentField::Section, "A");
    form.apply_edit(StudentField::ThreeWords, "curious kind fast");
    form.apply_edit(StudentField::FavoriteActivity, "building blocks");

    for (index, question) in StudentQuestion::ALL.into_iter().enumerate() {
        let choice = match index % 3 {
            0 => AnswerChoice::Often,
            1 => AnswerChoice::Sometimes,
            _ => AnswerChoice::Rarely,
        };
        form.record_answer(question, choice);
    }
}
