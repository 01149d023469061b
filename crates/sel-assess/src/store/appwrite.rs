use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::config::StoreConfig;

use super::{AssessmentDocument, CollectionId, DocumentId, DocumentStore, ScoreUpdate, StoreError};

/// REST adapter for an Appwrite-compatible hosted document store.
#[derive(Clone)]
pub struct AppwriteStore {
    client: reqwest::Client,
    config: StoreConfig,
}

impl AppwriteStore {
    pub fn new(config: StoreConfig) -> Result<Self, StoreError> {
        let client = reqwest::ClientBuilder::new()
            .build()
            .map_err(|err| StoreError::Unavailable(err.to_string()))?;

        Ok(Self { client, config })
    }

    fn documents_url(&self, collection: &CollectionId) -> String {
        format!(
            "{}/databases/{}/collections/{}/documents",
            self.config.endpoint.trim_end_matches('/'),
            self.config.database_id,
            collection.0
        )
    }

    async fn create_document<T: Serialize + Sync>(
        &self,
        collection: &CollectionId,
        data: &T,
    ) -> Result<DocumentId, StoreError> {
        let body = json!({
            "documentId": "unique()",
            "data": data,
        });

        let response = self
            .client
            .post(self.documents_url(collection))
            .header("X-Appwrite-Project", &self.config.project_id)
            .header("X-Appwrite-Key", &self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|err| StoreError::Unavailable(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(StoreError::Rejected(format!("status {status}: {detail}")));
        }

        let created: CreatedDocument = response
            .json()
            .await
            .map_err(|err| StoreError::Unavailable(err.to_string()))?;

        Ok(DocumentId(created.id))
    }
}

#[derive(Debug, Deserialize)]
struct CreatedDocument {
    #[serde(rename = "$id")]
    id: String,
}

#[async_trait]
impl DocumentStore for AppwriteStore {
    async fn create_assessment(
        &self,
        collection: &CollectionId,
        document: &AssessmentDocument,
    ) -> Result<DocumentId, StoreError> {
        self.create_document(collection, document).await
    }

    async fn update_scores(&self, update: &ScoreUpdate) -> Result<(), StoreError> {
        self.create_document(&self.config.scores_collection, update)
            .await
            .map(|_| ())
    }
}
