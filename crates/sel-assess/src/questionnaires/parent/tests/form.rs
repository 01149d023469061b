use super::common::filled_form;
use crate::questionnaires::parent::form::{
    ParentField, ParentForm, ParentMultiField, ParentQuestion, GRADES, SCHOOLS,
};

#[test]
fn new_form_starts_on_the_first_school_and_grade() {
    let form = ParentForm::new();
    assert_eq!(form.school, SCHOOLS[0]);
    assert_eq!(form.grade, GRADES[0]);
    assert!(form.demographics.relation.is_empty());
    assert!(form.answers.q1_feelings.is_empty());
}

#[test]
fn apply_edit_replaces_the_whole_value() {
    let mut form = ParentForm::new();
    form.apply_edit(ParentField::Relation, "father");
    form.apply_edit(ParentField::Relation, "grandparent");
    assert_eq!(form.demographics.relation, "grandparent");

    form.apply_edit(ParentField::Answer(ParentQuestion::Feelings), "3");
    form.apply_edit(ParentField::Answer(ParentQuestion::Feelings), "1");
    assert_eq!(form.answers.q1_feelings, "1");
}

#[test]
fn toggle_on_then_off_restores_the_original_set() {
    let mut form = filled_form();
    let before = form.demographics.languages.clone();

    form.toggle(ParentMultiField::Languages, "hindi", true);
    assert!(form.demographics.languages.contains("hindi"));
    form.toggle(ParentMultiField::Languages, "hindi", false);

    assert_eq!(form.demographics.languages, before);
}

#[test]
fn toggle_is_idempotent_in_both_directions() {
    let mut form = ParentForm::new();
    form.toggle(ParentMultiField::ScreenActivities, "games", true);
    form.toggle(ParentMultiField::ScreenActivities, "games", true);
    assert_eq!(form.demographics.screen_activities.len(), 1);

    form.toggle(ParentMultiField::ScreenActivities, "games", false);
    form.toggle(ParentMultiField::ScreenActivities, "games", false);
    assert!(form.demographics.screen_activities.is_empty());
}

#[test]
fn every_wire_key_parses_back_to_its_field() {
    for question in ParentQuestion::ALL {
        assert_eq!(
            ParentField::parse(question.key()),
            Some(ParentField::Answer(question))
        );
    }
    assert_eq!(ParentField::parse("school"), Some(ParentField::School));
    assert_eq!(
        ParentField::parse("d6_childrenAtHome"),
        Some(ParentField::ChildrenAtHome)
    );
    assert_eq!(ParentField::parse("d8_languages"), None);
    assert_eq!(
        ParentMultiField::parse("d8_languages"),
        Some(ParentMultiField::Languages)
    );
    assert_eq!(ParentField::parse("q99_unknown"), None);
}
