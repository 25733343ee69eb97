//! HTTP document store implementation
//!
//! This module implements the [`DocumentStore`] contract over a FHIR-style
//! search API: each collection is exposed at `{base_url}/{collection}` and
//! queries return search bundles with a `total` and an `entry` list.
//!
//! Every request runs inside a bounded exponential-backoff retry loop;
//! a request that exhausts its retries surfaces as a [`StoreError`] and is
//! handled by the caller's failure taxonomy (per-record skip, or window
//! abort at cursor-advance time).

use super::traits::DocumentStore;
use crate::config::StoreConfig;
use crate::domain::records::{
    EncounterRecord, EventRecord, LocationRecord, ObservationRecord, PatientRecord,
    RelatedPersonRecord, TaskRecord,
};
use crate::domain::{Result, StoreError};
use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use reqwest::{Client, ClientBuilder, StatusCode};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

/// Collection names as exposed by the store
mod collections {
    pub const EVENT: &str = "Composition";
    pub const TASK: &str = "Task";
    pub const PATIENT: &str = "Patient";
    pub const ENCOUNTER: &str = "Encounter";
    pub const OBSERVATION: &str = "Observation";
    pub const RELATED_PERSON: &str = "RelatedPerson";
    pub const LOCATION: &str = "Location";
}

/// One page of search results as returned by the store
#[derive(Debug, Deserialize)]
struct SearchBundle {
    #[serde(default)]
    total: Option<u64>,
    #[serde(default)]
    entry: Vec<BundleEntry>,
}

#[derive(Debug, Deserialize)]
struct BundleEntry {
    resource: serde_json::Value,
}

/// HTTP-backed document store
pub struct HttpDocumentStore {
    base_url: String,
    client: Client,
    config: StoreConfig,
}

impl HttpDocumentStore {
    /// Creates a store handle from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: StoreConfig) -> Result<Self> {
        let base_url = config.base_url.trim_end_matches('/').to_string();

        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| StoreError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            base_url,
            client,
            config,
        })
    }

    /// Base URL of the store
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build authorization header value
    fn auth_header_value(&self) -> Option<String> {
        if let Some(ref token) = self.config.auth_token {
            Some(format!("Bearer {}", token.expose_secret()))
        } else if let (Some(ref username), Some(ref password)) =
            (&self.config.username, &self.config.password)
        {
            let credentials = format!("{username}:{}", password.expose_secret());
            let encoded = general_purpose::STANDARD.encode(credentials.as_bytes());
            Some(format!("Basic {encoded}"))
        } else {
            None
        }
    }

    /// Retry a request with exponential backoff
    async fn retry_request<F, T, Fut>(&self, operation: F) -> Result<T>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = Result<T>>,
    {
        let max_retries = self.config.retry.max_retries;
        let mut attempt = 0;

        loop {
            match operation().await {
                Ok(result) => return Ok(result),
                Err(e) => {
                    attempt += 1;
                    if attempt >= max_retries {
                        return Err(e);
                    }

                    let delay_ms = self.config.retry.initial_delay_ms
                        * (self
                            .config
                            .retry
                            .backoff_multiplier
                            .powf((attempt - 1) as f64) as u64);
                    let delay_ms = delay_ms.min(self.config.retry.max_delay_ms);

                    tracing::warn!(
                        attempt = attempt,
                        max_retries = max_retries,
                        delay_ms = delay_ms,
                        error = %e,
                        "Retrying store request after error"
                    );

                    tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                }
            }
        }
    }

    /// Executes one search request against a collection
    async fn search(&self, collection: &str, params: &[(String, String)]) -> Result<SearchBundle> {
        let url = format!("{}/{collection}", self.base_url);

        self.retry_request(|| async {
            let mut request = self.client.get(&url).query(params);
            if let Some(auth) = self.auth_header_value() {
                request = request.header("Authorization", auth);
            }

            let response = request.send().await.map_err(|e| {
                if e.is_timeout() {
                    StoreError::Timeout(e.to_string())
                } else {
                    StoreError::ConnectionFailed(e.to_string())
                }
            })?;

            let status = response.status();
            match status {
                StatusCode::OK => {
                    let bundle: SearchBundle = response
                        .json()
                        .await
                        .map_err(|e| StoreError::InvalidResponse(e.to_string()))?;
                    Ok(bundle)
                }
                s if s.is_server_error() => Err(StoreError::ServerError {
                    status: s.as_u16(),
                    message: response.text().await.unwrap_or_default(),
                }
                .into()),
                s => Err(StoreError::ClientError {
                    status: s.as_u16(),
                    message: response.text().await.unwrap_or_default(),
                }
                .into()),
            }
        })
        .await
    }

    /// Batch find-by-id-list. An empty list queries the whole collection.
    async fn find_by_ids(&self, collection: &str, ids: &[String]) -> Result<SearchBundle> {
        let mut params = Vec::new();
        if !ids.is_empty() {
            params.push(("_id".to_string(), ids.join(",")));
        }
        self.search(collection, &params).await
    }

    /// Find-by-exact-field query
    async fn find_by_field(
        &self,
        collection: &str,
        field: &str,
        value: &str,
    ) -> Result<SearchBundle> {
        let params = vec![(field.to_string(), value.to_string())];
        self.search(collection, &params).await
    }

    /// Date-range query parameters for the event collection
    fn range_params(from: &str, to: &str) -> Vec<(String, String)> {
        vec![
            ("date".to_string(), format!("ge{from}")),
            ("date".to_string(), format!("le{to}")),
        ]
    }
}

/// Decodes bundle resources into a typed record list
///
/// This is the boundary where documents are validated: a resource that
/// doesn't fit its collection's shape becomes an `InvalidDocument` error
/// instead of an untyped value leaking into resolution.
fn decode_resources<T: DeserializeOwned>(collection: &str, bundle: SearchBundle) -> Result<Vec<T>> {
    bundle
        .entry
        .into_iter()
        .map(|entry| {
            serde_json::from_value(entry.resource).map_err(|e| {
                StoreError::InvalidDocument {
                    collection: collection.to_string(),
                    message: e.to_string(),
                }
                .into()
            })
        })
        .collect()
}

/// Decodes a bundle expected to hold at most one resource
fn decode_single<T: DeserializeOwned>(collection: &str, bundle: SearchBundle) -> Result<Option<T>> {
    let mut records: Vec<T> = decode_resources(collection, bundle)?;
    if records.is_empty() {
        Ok(None)
    } else {
        Ok(Some(records.swap_remove(0)))
    }
}

#[async_trait]
impl DocumentStore for HttpDocumentStore {
    async fn ping(&self) -> Result<()> {
        // A one-item location query doubles as the reachability check
        let params = vec![("_count".to_string(), "1".to_string())];
        self.search(collections::LOCATION, &params).await?;
        tracing::debug!(base_url = %self.base_url, "Document store reachable");
        Ok(())
    }

    async fn count_events(&self, from: &str, to: &str) -> Result<u64> {
        let mut params = Self::range_params(from, to);
        params.push(("_count".to_string(), "0".to_string()));

        let bundle = self.search(collections::EVENT, &params).await?;
        bundle.total.ok_or_else(|| {
            StoreError::InvalidResponse("search bundle carried no total".to_string()).into()
        })
    }

    async fn events_page(
        &self,
        from: &str,
        to: &str,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<EventRecord>> {
        let mut params = Self::range_params(from, to);
        params.push(("_count".to_string(), limit.to_string()));
        params.push(("_getpagesoffset".to_string(), offset.to_string()));

        let bundle = self.search(collections::EVENT, &params).await?;
        decode_resources(collections::EVENT, bundle)
    }

    async fn task_for_event(&self, event_id: &str) -> Result<Option<TaskRecord>> {
        let reference = format!("Composition/{event_id}");
        let bundle = self
            .find_by_field(collections::TASK, "focus.reference", &reference)
            .await?;
        decode_single(collections::TASK, bundle)
    }

    async fn patients_by_ids(&self, ids: &[String]) -> Result<Vec<PatientRecord>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let bundle = self.find_by_ids(collections::PATIENT, ids).await?;
        decode_resources(collections::PATIENT, bundle)
    }

    async fn locations_by_ids(&self, ids: &[String]) -> Result<Vec<LocationRecord>> {
        let bundle = self.find_by_ids(collections::LOCATION, ids).await?;
        decode_resources(collections::LOCATION, bundle)
    }

    async fn encounter_by_id(&self, id: &str) -> Result<Option<EncounterRecord>> {
        let bundle = self
            .find_by_ids(collections::ENCOUNTER, &[id.to_string()])
            .await?;
        decode_single(collections::ENCOUNTER, bundle)
    }

    async fn observations_for_encounter(
        &self,
        encounter_reference: &str,
    ) -> Result<Vec<ObservationRecord>> {
        let bundle = self
            .find_by_field(
                collections::OBSERVATION,
                "context.reference",
                encounter_reference,
            )
            .await?;
        decode_resources(collections::OBSERVATION, bundle)
    }

    async fn related_person_by_id(&self, id: &str) -> Result<Option<RelatedPersonRecord>> {
        let bundle = self
            .find_by_ids(collections::RELATED_PERSON, &[id.to_string()])
            .await?;
        decode_single(collections::RELATED_PERSON, bundle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn store_config(base_url: &str) -> StoreConfig {
        toml::from_str(&format!("base_url = \"{base_url}\"")).unwrap()
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let store = HttpDocumentStore::new(store_config("http://localhost:3447/fhir/")).unwrap();
        assert_eq!(store.base_url(), "http://localhost:3447/fhir");
    }

    #[test]
    fn test_auth_header_bearer_token() {
        let mut config = store_config("http://localhost:3447/fhir");
        config.auth_token = Some(secrecy::SecretString::new("tok-123".to_string()));
        let store = HttpDocumentStore::new(config).unwrap();
        assert_eq!(store.auth_header_value(), Some("Bearer tok-123".to_string()));
    }

    #[test]
    fn test_auth_header_basic() {
        let mut config = store_config("http://localhost:3447/fhir");
        config.username = Some("exporter".to_string());
        config.password = Some(secrecy::SecretString::new("secret".to_string()));
        let store = HttpDocumentStore::new(config).unwrap();
        let header = store.auth_header_value().unwrap();
        assert!(header.starts_with("Basic "));
    }

    #[test]
    fn test_auth_header_absent_without_credentials() {
        let store = HttpDocumentStore::new(store_config("http://localhost:3447/fhir")).unwrap();
        assert_eq!(store.auth_header_value(), None);
    }

    #[test]
    fn test_range_params() {
        let params =
            HttpDocumentStore::range_params("2022-01-01T00:00:00.000", "2022-01-31T23:59:59.000");
        assert_eq!(params[0].1, "ge2022-01-01T00:00:00.000");
        assert_eq!(params[1].1, "le2022-01-31T23:59:59.000");
    }

    #[test]
    fn test_decode_resources_valid() {
        let bundle: SearchBundle = serde_json::from_value(json!({
            "total": 1,
            "entry": [{"resource": {"id": "p-1", "gender": "female"}}]
        }))
        .unwrap();

        let patients: Vec<PatientRecord> = decode_resources("Patient", bundle).unwrap();
        assert_eq!(patients.len(), 1);
        assert_eq!(patients[0].id, "p-1");
    }

    #[test]
    fn test_decode_resources_invalid_document() {
        let bundle: SearchBundle = serde_json::from_value(json!({
            "entry": [{"resource": {"gender": "female"}}]
        }))
        .unwrap();

        let result: Result<Vec<PatientRecord>> = decode_resources("Patient", bundle);
        let err = result.unwrap_err();
        assert!(err.to_string().contains("Invalid Patient document"));
    }

    #[test]
    fn test_decode_single_empty_bundle() {
        let bundle: SearchBundle = serde_json::from_value(json!({"entry": []})).unwrap();
        let record: Option<TaskRecord> = decode_single("Task", bundle).unwrap();
        assert!(record.is_none());
    }
}
