//! Parent-facing questionnaire: household demographics plus eleven
//! child-development items answered on a 0-3 frequency scale.

pub mod form;
pub mod scoring;
pub mod submit;

#[cfg(test)]
mod tests;

pub use form::{
    Demographics, ParentAnswers, ParentField, ParentForm, ParentMultiField, ParentQuestion,
};
pub use scoring::ParentSkill;
pub use submit::ParentSession;
