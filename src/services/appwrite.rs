use crate::models::ChartRecord;
use crate::services::store::{ProfileStore, StoreError};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use std::time::Duration;

/// Appwrite API client reading chart documents
///
/// Each profile has one document in the charts collection, keyed by its
/// `profileId` attribute.
pub struct AppwriteClient {
    base_url: String,
    api_key: String,
    project_id: String,
    database_id: String,
    charts_collection: String,
    client: Client,
}

impl AppwriteClient {
    /// Create a new Appwrite client
    pub fn new(
        base_url: String,
        api_key: String,
        project_id: String,
        database_id: String,
        charts_collection: String,
        timeout_secs: u64,
    ) -> Result<Self, StoreError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            base_url,
            api_key,
            project_id,
            database_id,
            charts_collection,
            client,
        })
    }

    fn documents_url(&self, profile_id: &str) -> String {
        // The id is embedded as a JSON string so quotes cannot add values
        let queries = vec![
            format!(r#"equal("profileId", {})"#, json!([profile_id])),
            "limit(1)".to_string(),
        ];
        let query_json = Value::from(queries).to_string();
        let encoded_query = urlencoding::encode(&query_json);

        format!(
            "{}/databases/{}/collections/{}/documents?queries={}",
            self.base_url.trim_end_matches('/'),
            self.database_id,
            self.charts_collection,
            encoded_query
        )
    }
}

#[async_trait]
impl ProfileStore for AppwriteClient {
    async fn fetch_chart(&self, profile_id: &str) -> Result<Option<ChartRecord>, StoreError> {
        let url = self.documents_url(profile_id);

        tracing::debug!("Fetching chart for profile: {}", profile_id);

        let response = self
            .client
            .get(&url)
            .header("X-Appwrite-Key", &self.api_key)
            .header("X-Appwrite-Project", &self.project_id)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(StoreError::Unauthorized);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|_| "Unable to read body".to_string());
            tracing::error!("Failed to fetch chart for {}: {} - {}", profile_id, status, body);
            return Err(StoreError::ApiError(format!("Failed to fetch chart: {}", status)));
        }

        let json: Value = response.json().await?;

        let documents = json
            .get("documents")
            .and_then(|d| d.as_array())
            .ok_or_else(|| StoreError::InvalidResponse("Missing documents array".into()))?;

        let Some(doc) = documents.first() else {
            tracing::debug!("No chart document for profile {}", profile_id);
            return Ok(None);
        };

        // Older documents nest the attributes under `data`
        let data = doc.get("data").unwrap_or(doc);

        serde_json::from_value(data.clone())
            .map(Some)
            .map_err(|e| StoreError::InvalidResponse(format!("Failed to parse chart: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn create_test_client(base_url: &str) -> AppwriteClient {
        AppwriteClient::new(
            base_url.to_string(),
            "test_key".to_string(),
            "test_project".to_string(),
            "test_db".to_string(),
            "charts".to_string(),
            5,
        )
        .unwrap()
    }

    #[test]
    fn test_documents_url_encodes_query() {
        let client = create_test_client("https://appwrite.test/v1/");
        let url = client.documents_url("abc");

        assert!(url.starts_with("https://appwrite.test/v1/databases/test_db/collections/charts/documents?queries="));
        assert!(url.contains("profileId"));
        assert!(!url.contains(' '));
    }

    fn decoded_queries(url: &str) -> Vec<String> {
        let encoded = url.split("queries=").nth(1).unwrap();
        let decoded = urlencoding::decode(encoded).unwrap();
        serde_json::from_str(&decoded).unwrap()
    }

    #[test]
    fn test_documents_url_escapes_quotes_in_id() {
        let client = create_test_client("https://appwrite.test/v1");
        let queries = decoded_queries(&client.documents_url(r#"p1", "p2"#));

        assert_eq!(queries.len(), 2);
        assert_eq!(queries[0], r#"equal("profileId", ["p1\", \"p2"])"#);

        let values: Vec<String> = serde_json::from_str(
            queries[0]
                .trim_start_matches(r#"equal("profileId", "#)
                .trim_end_matches(')'),
        )
        .unwrap();
        assert_eq!(values, vec![r#"p1", "p2"#.to_string()]);
    }

    #[tokio::test]
    async fn test_fetch_chart_parses_document() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/databases/test_db/collections/charts/documents")
            .match_query(Matcher::Any)
            .match_header("X-Appwrite-Key", "test_key")
            .match_header("X-Appwrite-Project", "test_project")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"total":1,"documents":[{"$id":"doc1","profileId":"p1","nakshatra":4,"pada":2,"isManglik":false}]}"#,
            )
            .create_async()
            .await;

        let client = create_test_client(&server.url());
        let record = client.fetch_chart("p1").await.unwrap().unwrap();

        assert_eq!(record.nakshatra, Some(4));
        assert_eq!(record.pada, Some(2));
        assert_eq!(record.is_manglik, Some(false));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_chart_empty_result_is_none() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/databases/test_db/collections/charts/documents")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"total":0,"documents":[]}"#)
            .create_async()
            .await;

        let client = create_test_client(&server.url());
        assert!(client.fetch_chart("nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_fetch_chart_maps_auth_failure() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/databases/test_db/collections/charts/documents")
            .match_query(Matcher::Any)
            .with_status(401)
            .create_async()
            .await;

        let client = create_test_client(&server.url());
        let err = client.fetch_chart("p1").await.unwrap_err();
        assert!(matches!(err, StoreError::Unauthorized));
    }

    #[tokio::test]
    async fn test_fetch_chart_rejects_malformed_body() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/databases/test_db/collections/charts/documents")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"unexpected":true}"#)
            .create_async()
            .await;

        let client = create_test_client(&server.url());
        let err = client.fetch_chart("p1").await.unwrap_err();
        assert!(matches!(err, StoreError::InvalidResponse(_)));
    }
}
