//! REST operations against the Firestore document API.
//!
//! Full-collection listing (paginated) and per-document delete — the only
//! two operations the engine needs. All filtering happens in the engine,
//! never in the store query.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use common::{Error, QueueItem, QueueStore, Result, Subscriber, SubscriberDefaults, SubscriberStore};

use crate::auth::FirestoreAuth;
use crate::value::{decode_queue_item, decode_subscriber, Document};

const SUBSCRIBERS_COLLECTION: &str = "users";
const QUEUE_COLLECTION: &str = "mail_queue";
const PAGE_SIZE: u32 = 300;

/// Async client for one Firestore database.
#[derive(Debug, Clone)]
pub struct FirestoreClient {
    client: reqwest::Client,
    auth: Arc<FirestoreAuth>,
    base_url: String,
    defaults: SubscriberDefaults,
}

impl FirestoreClient {
    pub fn new(auth: FirestoreAuth, project_id: &str, defaults: SubscriberDefaults) -> Self {
        let client = reqwest::Client::builder()
            .pool_max_idle_per_host(4)
            .tcp_keepalive(std::time::Duration::from_secs(30))
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("failed to build Firestore HTTP client");

        let base_url = format!(
            "https://firestore.googleapis.com/v1/projects/{}/databases/(default)/documents",
            project_id
        );

        Self {
            client,
            auth: Arc::new(auth),
            base_url,
            defaults,
        }
    }

    /// Fetch every document in a collection, following page tokens.
    async fn list_documents(&self, collection: &str) -> Result<Vec<Document>> {
        let mut all_documents = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let token = self.auth.bearer_token().await?;

            let mut req = self
                .client
                .get(format!("{}/{}", self.base_url, collection))
                .bearer_auth(&token)
                .query(&[("pageSize", PAGE_SIZE.to_string())]);

            if let Some(ref t) = page_token {
                req = req.query(&[("pageToken", t.as_str())]);
            }

            let resp = req.send().await.map_err(|e| Error::Http(e.to_string()))?;

            let status_code = resp.status().as_u16();
            if status_code != 200 {
                let body = resp.text().await.unwrap_or_default();
                return Err(Error::Firestore {
                    status: status_code,
                    message: body.chars().take(500).collect(),
                });
            }

            #[derive(Deserialize)]
            struct ListResponse {
                #[serde(default)]
                documents: Vec<Document>,
                #[serde(default, rename = "nextPageToken")]
                next_page_token: Option<String>,
            }

            let body: ListResponse = resp.json().await.map_err(|e| Error::Http(e.to_string()))?;

            let count = body.documents.len();
            all_documents.extend(body.documents);

            debug!(
                "Fetched {} documents from {} (total: {})",
                count,
                collection,
                all_documents.len()
            );

            match body.next_page_token {
                Some(t) if !t.is_empty() => page_token = Some(t),
                _ => break,
            }
        }

        Ok(all_documents)
    }

    /// Delete one document by collection and id.
    async fn delete_document(&self, collection: &str, id: &str) -> Result<()> {
        let token = self.auth.bearer_token().await?;

        let resp = self
            .client
            .delete(format!("{}/{}/{}", self.base_url, collection, id))
            .bearer_auth(&token)
            .send()
            .await
            .map_err(|e| Error::Http(e.to_string()))?;

        let status_code = resp.status().as_u16();
        if status_code != 200 && status_code != 204 {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Firestore {
                status: status_code,
                message: body.chars().take(500).collect(),
            });
        }

        debug!("Deleted document {}/{}", collection, id);
        Ok(())
    }
}

#[async_trait]
impl SubscriberStore for FirestoreClient {
    async fn list_subscribers(&self) -> Result<Vec<Subscriber>> {
        let documents = self.list_documents(SUBSCRIBERS_COLLECTION).await?;
        Ok(documents
            .iter()
            .map(|doc| decode_subscriber(doc, &self.defaults))
            .collect())
    }
}

#[async_trait]
impl QueueStore for FirestoreClient {
    async fn list_queue_items(&self) -> Result<Vec<QueueItem>> {
        let documents = self.list_documents(QUEUE_COLLECTION).await?;
        Ok(documents.iter().map(decode_queue_item).collect())
    }

    async fn delete_queue_item(&self, id: &str) -> Result<()> {
        self.delete_document(QUEUE_COLLECTION, id).await
    }
}
