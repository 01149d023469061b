//! The two questionnaire flows and the session machinery they share.
//!
//! Each flow owns its typed form record and scoring tables; the submission
//! service and the HTTP session router are common to both.

pub mod parent;
pub mod router;
pub mod session;
pub mod student;

pub use router::{questionnaire_router, SessionHub};
pub use session::{SubmissionError, SubmissionPhase, SubmissionService};
