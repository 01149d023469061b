use crate::questionnaires::parent::form::{ParentField, ParentForm, ParentMultiField, ParentQuestion};

/// A form filled the way a real session fills it: every mutation goes
/// through the edit and toggle operations.
pub(super) fn filled_form() -> ParentForm {
    let mut form = ParentForm::new();
    form.apply_edit(ParentField::School, "School 2");
    form.apply_edit(ParentField::Relation, "mother");
    form.apply_edit(ParentField::Age, "34");
    form.apply_edit(ParentField::Education, "bachelor");
    form.apply_edit(ParentField::Occupation, "professional");
    form.apply_edit(ParentField::Income, "10000to14999");
    form.apply_edit(ParentField::ChildrenAtHome, "2");
    form.apply_edit(ParentField::AdultsAtHome, "2");
    form.apply_edit(ParentField::ReadingFrequency, "often");
    form.apply_edit(ParentField::ScreenTime, "1to2hours");
    form.toggle(ParentMultiField::Languages, "arabic", true);
    form.toggle(ParentMultiField::Languages, "english", true);
    form.toggle(ParentMultiField::ScreenActivities, "educational_apps", true);

    for question in ParentQuestion::ALL {
        form.apply_edit(ParentField::Answer(question), "2");
    }
    form
}
