//! Assignment update service and its HTTP collaborators

use super::{
    AssignmentDetails, AssignmentDocument, SearchIndexWriter, UserDetails, UserDirectory,
};
use crate::adapters::store::DocumentStore;
use crate::config::UserApiConfig;
use crate::domain::records::{find_extension, HumanName, TaskRecord};
use crate::domain::vocabulary::{LAST_OFFICE_EXTENSION, LAST_USER_EXTENSION};
use crate::domain::{Result, StoreError, VitalexError};
use async_trait::async_trait;
use chrono::Utc;
use reqwest::{Client, ClientBuilder, StatusCode};
use secrecy::ExposeSecret;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

/// Derives and upserts one record's assignment document
pub struct AssignmentService {
    store: Arc<dyn DocumentStore>,
    users: Arc<dyn UserDirectory>,
    writer: Arc<dyn SearchIndexWriter>,
}

impl AssignmentService {
    /// Creates a service over its three collaborators
    pub fn new(
        store: Arc<dyn DocumentStore>,
        users: Arc<dyn UserDirectory>,
        writer: Arc<dyn SearchIndexWriter>,
    ) -> Self {
        Self {
            store,
            users,
            writer,
        }
    }

    /// Updates the assignment document for the record a task tracks
    ///
    /// Reads the task's last-assigned-user and last-office extensions,
    /// resolves the user's name and the office name, and performs a
    /// single upsert. A task without an assigned user takes the removal
    /// path.
    ///
    /// # Errors
    ///
    /// Returns an error when the task has no focus reference, or when
    /// the user lookup or the upsert fails. No retries are performed.
    pub async fn update_assignment(&self, task: &TaskRecord) -> Result<()> {
        let record_id = task
            .focus
            .as_ref()
            .map(|reference| reference.id().to_string())
            .ok_or_else(|| {
                VitalexError::Resolution(format!("task {} has no focus reference", task.id))
            })?;

        let user_reference = find_extension(&task.extension, LAST_USER_EXTENSION)
            .and_then(|e| e.value_reference.as_ref());

        let document = match user_reference {
            None => AssignmentDocument::removed(),
            Some(user_reference) => {
                let practitioner_id = user_reference.id().to_string();
                let user = self.users.user_by_id(&practitioner_id).await?;
                let office_name = self.office_name(task).await?;

                AssignmentDocument::assigned(
                    Utc::now().timestamp_millis(),
                    AssignmentDetails {
                        office_name,
                        practitioner_id: practitioner_id.clone(),
                        first_name: user.first_name,
                        last_name: user.last_name,
                    },
                    practitioner_id,
                )
            }
        };

        self.writer.upsert_assignment(&record_id, &document).await?;
        tracing::info!(
            record_id = %record_id,
            removed = document.assignment.is_none(),
            "Assignment document upserted"
        );
        Ok(())
    }

    /// Name of the task's last office, empty when the extension is
    /// absent or the location unknown
    async fn office_name(&self, task: &TaskRecord) -> Result<String> {
        let Some(reference) = find_extension(&task.extension, LAST_OFFICE_EXTENSION)
            .and_then(|e| e.value_reference.as_ref())
        else {
            return Ok(String::new());
        };

        let locations = self
            .store
            .locations_by_ids(&[reference.id().to_string()])
            .await?;
        Ok(locations.first().map(|l| l.name.clone()).unwrap_or_default())
    }
}

/// HTTP user directory client
pub struct HttpUserDirectory {
    base_url: String,
    client: Client,
    config: UserApiConfig,
}

#[derive(Debug, Deserialize)]
struct UserLookupResponse {
    #[serde(default)]
    name: Vec<HumanName>,
}

impl HttpUserDirectory {
    /// Creates a client from user-API configuration
    pub fn new(config: UserApiConfig) -> Result<Self> {
        let base_url = config.base_url.trim_end_matches('/').to_string();
        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| StoreError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            base_url,
            client,
            config,
        })
    }

    fn bearer(&self) -> Option<String> {
        self.config
            .auth_token
            .as_ref()
            .map(|token| format!("Bearer {}", token.expose_secret()))
    }
}

#[async_trait]
impl UserDirectory for HttpUserDirectory {
    async fn user_by_id(&self, user_id: &str) -> Result<UserDetails> {
        let url = format!("{}/getUser", self.base_url);
        let mut request = self
            .client
            .post(&url)
            .json(&serde_json::json!({ "practitionerId": user_id }));
        if let Some(auth) = self.bearer() {
            request = request.header("Authorization", auth);
        }

        let response = request
            .send()
            .await
            .map_err(|e| StoreError::ConnectionFailed(e.to_string()))?;

        if response.status() != StatusCode::OK {
            return Err(StoreError::ClientError {
                status: response.status().as_u16(),
                message: format!("user lookup failed for {user_id}"),
            }
            .into());
        }

        let user: UserLookupResponse = response
            .json()
            .await
            .map_err(|e| StoreError::InvalidResponse(e.to_string()))?;

        let name = user.name.first();
        Ok(UserDetails {
            first_name: name
                .and_then(|n| n.given.first().cloned())
                .unwrap_or_default(),
            last_name: name.and_then(|n| n.family.clone()).unwrap_or_default(),
        })
    }
}

/// HTTP search-index writer
pub struct HttpSearchIndexWriter {
    base_url: String,
    client: Client,
    config: UserApiConfig,
}

impl HttpSearchIndexWriter {
    /// Creates a writer targeting the search-index service
    pub fn new(config: UserApiConfig) -> Result<Self> {
        let base_url = config.base_url.trim_end_matches('/').to_string();
        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| StoreError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            base_url,
            client,
            config,
        })
    }

    fn bearer(&self) -> Option<String> {
        self.config
            .auth_token
            .as_ref()
            .map(|token| format!("Bearer {}", token.expose_secret()))
    }
}

#[async_trait]
impl SearchIndexWriter for HttpSearchIndexWriter {
    async fn upsert_assignment(
        &self,
        record_id: &str,
        document: &AssignmentDocument,
    ) -> Result<()> {
        let url = format!("{}/SearchAssignment/{record_id}", self.base_url);
        let mut request = self.client.put(&url).json(document);
        if let Some(auth) = self.bearer() {
            request = request.header("Authorization", auth);
        }

        let response = request
            .send()
            .await
            .map_err(|e| StoreError::ConnectionFailed(e.to_string()))?;

        match response.status() {
            StatusCode::OK | StatusCode::CREATED => Ok(()),
            status => Err(StoreError::ClientError {
                status: status.as_u16(),
                message: format!("assignment upsert failed for {record_id}"),
            }
            .into()),
        }
    }
}
