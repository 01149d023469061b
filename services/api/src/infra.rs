use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use metrics_exporter_prometheus::PrometheusHandle;

use sel_assess::store::{
    AssessmentDocument, CollectionId, DocumentId, DocumentStore, ScoreUpdate, StoreError,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Store double for demos and route tests: keeps every write in memory and
/// hands out sequential document ids.
#[derive(Default)]
pub(crate) struct InMemoryDocumentStore {
    sequence: AtomicU64,
    documents: Mutex<Vec<(CollectionId, AssessmentDocument)>>,
    updates: Mutex<Vec<ScoreUpdate>>,
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn create_assessment(
        &self,
        collection: &CollectionId,
        document: &AssessmentDocument,
    ) -> Result<DocumentId, StoreError> {
        let id = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        self.documents
            .lock()
            .expect("documents mutex poisoned")
            .push((collection.clone(), document.clone()));
        Ok(DocumentId(format!("doc-{id:06}")))
    }

    async fn update_scores(&self, update: &ScoreUpdate) -> Result<(), StoreError> {
        self.updates
            .lock()
            .expect("updates mutex poisoned")
            .push(update.clone());
        Ok(())
    }
}

impl InMemoryDocumentStore {
    pub(crate) fn documents(&self) -> Vec<(CollectionId, AssessmentDocument)> {
        self.documents
            .lock()
            .expect("documents mutex poisoned")
            .clone()
    }

    pub(crate) fn updates(&self) -> Vec<ScoreUpdate> {
        self.updates.lock().expect("updates mutex poisoned").clone()
    }
}
