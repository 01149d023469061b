use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::locale::Lang;
use crate::store::{AssessmentKind, DocumentStore, TestPhase};

use super::parent::{ParentField, ParentMultiField, ParentSession};
use super::session::{SubmissionPhase, SubmissionService};
use super::student::{AnswerChoice, StudentField, StudentQuestion, StudentSession};

static SESSION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_session_id() -> String {
    let id = SESSION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    format!("sess-{id:06}")
}

/// In-process owner of active questionnaire sessions.
///
/// Sessions exist only in memory and die with the process; each form is
/// owned by exactly one session and every mutation goes through the hub.
pub struct SessionHub<S> {
    service: SubmissionService<S>,
    sessions: Mutex<HashMap<String, SessionEntry>>,
}

#[derive(Debug, Clone)]
enum SessionEntry {
    Parent(ParentSession),
    Student(StudentSession),
}

impl SessionEntry {
    fn kind(&self) -> AssessmentKind {
        match self {
            SessionEntry::Parent(_) => AssessmentKind::Parent,
            SessionEntry::Student(_) => AssessmentKind::Student,
        }
    }

    fn phase(&self) -> &SubmissionPhase {
        match self {
            SessionEntry::Parent(session) => &session.phase,
            SessionEntry::Student(session) => &session.phase,
        }
    }

    fn set_phase(&mut self, phase: SubmissionPhase) {
        match self {
            SessionEntry::Parent(session) => session.phase = phase,
            SessionEntry::Student(session) => session.phase = phase,
        }
    }
}

/// Sanitized representation of a session's externally visible state.
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub session_id: String,
    pub variant: AssessmentKind,
    pub phase: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

fn view_of(session_id: &str, entry: &SessionEntry) -> SessionView {
    SessionView {
        session_id: session_id.to_string(),
        variant: entry.kind(),
        phase: entry.phase().label(),
        message: entry.phase().message().map(str::to_string),
    }
}

/// Error raised by session operations.
#[derive(Debug, thiserror::Error)]
pub enum SessionHubError {
    #[error("session not found")]
    NotFound,
    #[error("unknown questionnaire variant: {0}")]
    UnknownVariant(String),
    #[error("unknown field: {0}")]
    UnknownField(String),
    #[error("unknown question: {0}")]
    UnknownQuestion(String),
    #[error("unknown answer choice: {0}")]
    UnknownChoice(String),
    #[error("operation not available for this questionnaire variant")]
    WrongVariant,
    #[error("a submission is already in flight")]
    SubmissionInFlight,
    #[error("questionnaire already submitted")]
    AlreadySubmitted,
}

impl<S> SessionHub<S>
where
    S: DocumentStore,
{
    pub fn new(service: SubmissionService<S>) -> Self {
        Self {
            service,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, SessionEntry>> {
        self.sessions.lock().expect("session mutex poisoned")
    }

    pub fn create(&self, kind: AssessmentKind, lang: Lang, test_phase: TestPhase) -> SessionView {
        let session_id = next_session_id();
        let entry = match kind {
            AssessmentKind::Parent => SessionEntry::Parent(ParentSession::new(lang, test_phase)),
            AssessmentKind::Student => SessionEntry::Student(StudentSession::new(lang, test_phase)),
        };
        let view = view_of(&session_id, &entry);
        self.lock().insert(session_id, entry);
        view
    }

    pub fn view(&self, session_id: &str) -> Result<SessionView, SessionHubError> {
        let sessions = self.lock();
        let entry = sessions.get(session_id).ok_or(SessionHubError::NotFound)?;
        Ok(view_of(session_id, entry))
    }

    pub fn edit_field(
        &self,
        session_id: &str,
        field: &str,
        value: &str,
    ) -> Result<SessionView, SessionHubError> {
        let mut sessions = self.lock();
        let entry = sessions
            .get_mut(session_id)
            .ok_or(SessionHubError::NotFound)?;

        match entry {
            SessionEntry::Parent(session) => {
                let field = ParentField::parse(field)
                    .ok_or_else(|| SessionHubError::UnknownField(field.to_string()))?;
                session.form.apply_edit(field, value);
            }
            SessionEntry::Student(session) => {
                let field = StudentField::parse(field)
                    .ok_or_else(|| SessionHubError::UnknownField(field.to_string()))?;
                session.form.apply_edit(field, value);
            }
        }

        Ok(view_of(session_id, entry))
    }

    pub fn toggle_value(
        &self,
        session_id: &str,
        field: &str,
        value: &str,
        checked: bool,
    ) -> Result<SessionView, SessionHubError> {
        let mut sessions = self.lock();
        let entry = sessions
            .get_mut(session_id)
            .ok_or(SessionHubError::NotFound)?;

        match entry {
            SessionEntry::Parent(session) => {
                let field = ParentMultiField::parse(field)
                    .ok_or_else(|| SessionHubError::UnknownField(field.to_string()))?;
                session.form.toggle(field, value, checked);
            }
            SessionEntry::Student(_) => return Err(SessionHubError::WrongVariant),
        }

        Ok(view_of(session_id, entry))
    }

    pub fn record_choice(
        &self,
        session_id: &str,
        question: &str,
        choice: &str,
    ) -> Result<SessionView, SessionHubError> {
        let mut sessions = self.lock();
        let entry = sessions
            .get_mut(session_id)
            .ok_or(SessionHubError::NotFound)?;

        match entry {
            SessionEntry::Student(session) => {
                let question = StudentQuestion::parse(question)
                    .ok_or_else(|| SessionHubError::UnknownQuestion(question.to_string()))?;
                let choice = AnswerChoice::parse(choice)
                    .ok_or_else(|| SessionHubError::UnknownChoice(choice.to_string()))?;
                session.form.record_answer(question, choice);
            }
            SessionEntry::Parent(_) => return Err(SessionHubError::WrongVariant),
        }

        Ok(view_of(session_id, entry))
    }

    /// Runs the submission for one session. The in-flight marker left in the
    /// map is what rejects a concurrent re-trigger while the store calls run
    /// outside the hub lock; the session's terminal phase (including the
    /// localized failure message) is written back afterwards.
    pub async fn submit(&self, session_id: &str) -> Result<SessionView, SessionHubError> {
        let mut snapshot = {
            let mut sessions = self.lock();
            let entry = sessions
                .get_mut(session_id)
                .ok_or(SessionHubError::NotFound)?;
            match entry.phase() {
                SubmissionPhase::InFlight => return Err(SessionHubError::SubmissionInFlight),
                SubmissionPhase::Submitted => return Err(SessionHubError::AlreadySubmitted),
                _ => {}
            }
            let snapshot = entry.clone();
            entry.set_phase(SubmissionPhase::InFlight);
            snapshot
        };

        let outcome = match &mut snapshot {
            SessionEntry::Parent(session) => {
                self.service.submit_parent(session).await.map(|_| ())
            }
            SessionEntry::Student(session) => {
                self.service.submit_student(session).await.map(|_| ())
            }
        };
        // The cause is already logged by the service; the phase carries the
        // user-facing outcome.
        drop(outcome);

        let phase = snapshot.phase().clone();
        let mut sessions = self.lock();
        if let Some(entry) = sessions.get_mut(session_id) {
            entry.set_phase(phase);
        }
        Ok(view_of(session_id, &snapshot))
    }
}

/// Router builder exposing the questionnaire session endpoints.
pub fn questionnaire_router<S>(hub: Arc<SessionHub<S>>) -> Router
where
    S: DocumentStore + 'static,
{
    Router::new()
        .route(
            "/api/v1/questionnaires/:variant/sessions",
            post(create_handler::<S>),
        )
        .route("/api/v1/sessions/:session_id", get(view_handler::<S>))
        .route(
            "/api/v1/sessions/:session_id/fields",
            patch(field_handler::<S>),
        )
        .route(
            "/api/v1/sessions/:session_id/selections",
            patch(selection_handler::<S>),
        )
        .route(
            "/api/v1/sessions/:session_id/answers",
            patch(answer_handler::<S>),
        )
        .route(
            "/api/v1/sessions/:session_id/submit",
            post(submit_handler::<S>),
        )
        .with_state(hub)
}

#[derive(Debug, Deserialize)]
struct CreateQuery {
    lang: Option<String>,
    #[serde(rename = "testType")]
    test_type: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FieldEdit {
    field: String,
    value: String,
}

#[derive(Debug, Deserialize)]
struct SelectionEdit {
    field: String,
    value: String,
    checked: bool,
}

#[derive(Debug, Deserialize)]
struct AnswerEdit {
    question: String,
    choice: String,
}

fn error_response(err: SessionHubError) -> Response {
    let status = match err {
        SessionHubError::NotFound | SessionHubError::UnknownVariant(_) => StatusCode::NOT_FOUND,
        SessionHubError::SubmissionInFlight | SessionHubError::AlreadySubmitted => {
            StatusCode::CONFLICT
        }
        _ => StatusCode::UNPROCESSABLE_ENTITY,
    };
    let body = Json(json!({ "error": err.to_string() }));
    (status, body).into_response()
}

async fn create_handler<S>(
    State(hub): State<Arc<SessionHub<S>>>,
    Path(variant): Path<String>,
    Query(query): Query<CreateQuery>,
) -> Response
where
    S: DocumentStore + 'static,
{
    let kind = match variant.as_str() {
        "parent" => AssessmentKind::Parent,
        "student" => AssessmentKind::Student,
        other => return error_response(SessionHubError::UnknownVariant(other.to_string())),
    };

    let lang = Lang::from_tag(query.lang.as_deref());
    let test_phase = TestPhase::from_tag(query.test_type.as_deref());
    let view = hub.create(kind, lang, test_phase);
    (StatusCode::CREATED, Json(view)).into_response()
}

async fn view_handler<S>(
    State(hub): State<Arc<SessionHub<S>>>,
    Path(session_id): Path<String>,
) -> Response
where
    S: DocumentStore + 'static,
{
    match hub.view(&session_id) {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(err) => error_response(err),
    }
}

async fn field_handler<S>(
    State(hub): State<Arc<SessionHub<S>>>,
    Path(session_id): Path<String>,
    Json(edit): Json<FieldEdit>,
) -> Response
where
    S: DocumentStore + 'static,
{
    match hub.edit_field(&session_id, &edit.field, &edit.value) {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(err) => error_response(err),
    }
}

async fn selection_handler<S>(
    State(hub): State<Arc<SessionHub<S>>>,
    Path(session_id): Path<String>,
    Json(edit): Json<SelectionEdit>,
) -> Response
where
    S: DocumentStore + 'static,
{
    match hub.toggle_value(&session_id, &edit.field, &edit.value, edit.checked) {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(err) => error_response(err),
    }
}

async fn answer_handler<S>(
    State(hub): State<Arc<SessionHub<S>>>,
    Path(session_id): Path<String>,
    Json(edit): Json<AnswerEdit>,
) -> Response
where
    S: DocumentStore + 'static,
{
    match hub.record_choice(&session_id, &edit.question, &edit.choice) {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(err) => error_response(err),
    }
}

async fn submit_handler<S>(
    State(hub): State<Arc<SessionHub<S>>>,
    Path(session_id): Path<String>,
) -> Response
where
    S: DocumentStore + 'static,
{
    match hub.submit(&session_id).await {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(err) => error_response(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{header, Request};
    use serde_json::Value;
    use tower::util::ServiceExt;

    use crate::store::{
        AssessmentCollections, AssessmentDocument, CollectionId, DocumentId, ScoreUpdate,
        StoreError,
    };

    #[derive(Default)]
    struct StubStore {
        fail_create: bool,
        calls: Mutex<Vec<&'static str>>,
    }

    #[async_trait]
    impl DocumentStore for StubStore {
        async fn create_assessment(
            &self,
            _collection: &CollectionId,
            _document: &AssessmentDocument,
        ) -> Result<DocumentId, StoreError> {
            self.calls.lock().expect("calls mutex poisoned").push("create");
            if self.fail_create {
                Err(StoreError::Unavailable("store offline".to_string()))
            } else {
                Ok(DocumentId("doc-1".to_string()))
            }
        }

        async fn update_scores(&self, _update: &ScoreUpdate) -> Result<(), StoreError> {
            self.calls.lock().expect("calls mutex poisoned").push("update");
            Ok(())
        }
    }

    fn router(fail_create: bool) -> Router {
        let store = Arc::new(StubStore {
            fail_create,
            calls: Mutex::new(Vec::new()),
        });
        let collections = AssessmentCollections {
            parents: CollectionId("parent_assessments".to_string()),
            students: CollectionId("student_assessments".to_string()),
        };
        let hub = Arc::new(SessionHub::new(SubmissionService::new(store, collections)));
        questionnaire_router(hub)
    }

    async fn send(router: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = match body {
            Some(json_body) => Request::builder()
                .method(method)
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json_body.to_string()))
                .expect("request builds"),
            None => Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .expect("request builds"),
        };

        let response = router
            .clone()
            .oneshot(request)
            .await
            .expect("router responds");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .expect("read body");
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("json payload")
        };
        (status, value)
    }

    #[tokio::test]
    async fn creates_a_parent_session_with_defaults() {
        let router = router(false);
        let (status, body) = send(
            &router,
            "POST",
            "/api/v1/questionnaires/parent/sessions",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["variant"], "parent");
        assert_eq!(body["phase"], "idle");
        assert!(body["session_id"].as_str().expect("id").starts_with("sess-"));
    }

    #[tokio::test]
    async fn unknown_variant_is_not_found() {
        let router = router(false);
        let (status, _) = send(
            &router,
            "POST",
            "/api/v1/questionnaires/teacher/sessions",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn edits_and_toggles_flow_through_a_parent_session() {
        let router = router(false);
        let (_, created) = send(
            &router,
            "POST",
            "/api/v1/questionnaires/parent/sessions",
            None,
        )
        .await;
        let id = created["session_id"].as_str().expect("id").to_string();

        let (status, _) = send(
            &router,
            "PATCH",
            &format!("/api/v1/sessions/{id}/fields"),
            Some(serde_json::json!({ "field": "q1_feelings", "value": "2" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = send(
            &router,
            "PATCH",
            &format!("/api/v1/sessions/{id}/selections"),
            Some(serde_json::json!({ "field": "d8_languages", "value": "arabic", "checked": true })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send(
            &router,
            "PATCH",
            &format!("/api/v1/sessions/{id}/fields"),
            Some(serde_json::json!({ "field": "nope", "value": "x" })),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["error"].as_str().expect("error").contains("nope"));
    }

    #[tokio::test]
    async fn submit_reaches_a_terminal_phase_and_blocks_resubmission() {
        let router = router(false);
        let (_, created) = send(
            &router,
            "POST",
            "/api/v1/questionnaires/parent/sessions",
            None,
        )
        .await;
        let id = created["session_id"].as_str().expect("id").to_string();

        let (status, body) = send(
            &router,
            "POST",
            &format!("/api/v1/sessions/{id}/submit"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["phase"], "submitted");

        let (status, _) = send(
            &router,
            "POST",
            &format!("/api/v1/sessions/{id}/submit"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn failed_store_yields_a_localized_failure_phase() {
        let router = router(true);
        let (_, created) = send(
            &router,
            "POST",
            "/api/v1/questionnaires/student/sessions?lang=ar",
            None,
        )
        .await;
        let id = created["session_id"].as_str().expect("id").to_string();

        let (status, body) = send(
            &router,
            "POST",
            &format!("/api/v1/sessions/{id}/submit"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["phase"], "failed");
        let message = body["message"].as_str().expect("failure message");
        assert!(!message.is_empty());
        // The generic message, not the store cause.
        assert!(!message.contains("offline"));
    }
}
