use crate::questionnaires::parent::form::{ParentAnswers, ParentQuestion};
use crate::questionnaires::parent::scoring::{
    answer_points, contributing_questions, overall_score, score_questions, skill_score,
    skill_scores, ParentSkill,
};

#[test]
fn skill_score_is_the_arithmetic_mean() {
    let mut answers = ParentAnswers::default();
    answers.set(ParentQuestion::Feelings, "2");
    answers.set(ParentQuestion::Preferences, "1");

    assert_eq!(skill_score(ParentSkill::SelfAwareness, &answers), 1.5);
}

#[test]
fn empty_question_list_scores_zero() {
    let answers = ParentAnswers::default();
    assert_eq!(score_questions(&[], &answers), 0.0);
}

#[test]
fn unparseable_answers_are_worth_zero_but_keep_their_slot() {
    assert_eq!(answer_points(""), 0);
    assert_eq!(answer_points("often"), 0);
    assert_eq!(answer_points(" 3 "), 3);

    let mut answers = ParentAnswers::default();
    answers.set(ParentQuestion::Empathy, "3");
    // Comforting stays unanswered; the average drops rather than shrinking
    // the denominator.
    assert_eq!(skill_score(ParentSkill::SocialAwareness, &answers), 1.5);
}

#[test]
fn repeated_question_double_counts_numerator_and_denominator() {
    let mut answers = ParentAnswers::default();
    answers.set(ParentQuestion::LearningGoals, "3");
    answers.set(ParentQuestion::SelfAwareness, "3");

    // Metacognition lists LearningGoals twice; the duplication cancels out.
    assert_eq!(skill_score(ParentSkill::Metacognition, &answers), 3.0);

    // With the shared question unanswered, the duplicate still occupies two
    // of the three slots.
    let mut partial = ParentAnswers::default();
    partial.set(ParentQuestion::LearningGoals, "3");
    assert_eq!(skill_score(ParentSkill::Metacognition, &partial), 2.0);

    let repeated = [ParentQuestion::Comforting, ParentQuestion::Comforting];
    let mut single = ParentAnswers::default();
    single.set(ParentQuestion::Comforting, "3");
    assert_eq!(score_questions(&repeated, &single), 3.0);
}

#[test]
fn overall_score_averages_every_item() {
    let mut answers = ParentAnswers::default();
    for question in ParentQuestion::ALL {
        answers.set(question, "3");
    }
    assert_eq!(overall_score(&answers), 3.0);

    let mut half = ParentAnswers::default();
    half.set(ParentQuestion::Feelings, "3");
    // 3 over 11 slots.
    assert!((overall_score(&half) - 3.0 / 11.0).abs() < 1e-12);
}

#[test]
fn every_skill_is_present_in_the_score_set() {
    let answers = ParentAnswers::default();
    let scores = skill_scores(&answers);
    assert_eq!(scores.len(), ParentSkill::ALL.len());
    for skill in ParentSkill::ALL {
        assert_eq!(scores[&skill], 0.0);
        assert!(!contributing_questions(skill).is_empty());
    }
}
