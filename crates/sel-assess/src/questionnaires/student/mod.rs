//! Student self-assessment: two free-response warm-up items followed by
//! fifteen statements answered on a three-point frequency scale.

pub mod form;
pub mod scoring;
pub mod submit;


pub use form::{AnswerChoice, StudentAnswers, StudentField, StudentForm, StudentQuestion};
pub use scoring::StudentSkill;
pub use submit::StudentSession;
