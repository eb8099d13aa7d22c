// Feature service repository implementation
use crate::application::time_series_repository::CasesByTimeRepository;
use crate::domain::cases_by_time::CasesByTimeFeature;
use crate::domain::feature_query::FeatureQuery;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone)]
pub struct FeatureServiceRepository {
    base_url: String,
    client: reqwest::Client,
}

#[derive(Debug, Error, PartialEq)]
pub enum FeatureResponseError {
    #[error("feature service error {code}: {message}")]
    Service { code: i64, message: String },

    #[error("response has no features array")]
    MissingFeatures,
}

#[derive(Debug, Deserialize)]
struct FeatureQueryResponse {
    #[serde(default)]
    features: Option<Vec<FeatureRecord>>,
    #[serde(default)]
    error: Option<ServiceError>,
}

#[derive(Debug, Deserialize)]
struct FeatureRecord {
    attributes: CasesByTimeFeature,
}

#[derive(Debug, Deserialize)]
struct ServiceError {
    #[serde(default)]
    code: i64,
    #[serde(default)]
    message: String,
}

impl FeatureServiceRepository {
    pub fn new(base_url: String, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: builder.build().context("Failed to build HTTP client")?,
        })
    }

    fn build_query_url(&self, query: &FeatureQuery) -> String {
        format!("{}/query?{}", self.base_url, query.to_query_string())
    }
}

/// Unwrap the `features` array. The service reports query errors with a 200
/// and an `error` object, so that is checked first.
fn parse_features(body: &str) -> Result<Vec<CasesByTimeFeature>> {
    let response: FeatureQueryResponse =
        serde_json::from_str(body).context("Failed to parse feature service response")?;

    if let Some(error) = response.error {
        return Err(FeatureResponseError::Service {
            code: error.code,
            message: error.message,
        }
        .into());
    }

    let features = response
        .features
        .ok_or(FeatureResponseError::MissingFeatures)?;

    Ok(features.into_iter().map(|f| f.attributes).collect())
}

#[async_trait]
impl CasesByTimeRepository for FeatureServiceRepository {
    async fn query_cases_by_time(&self, query: &FeatureQuery) -> Result<Vec<CasesByTimeFeature>> {
        let url = self.build_query_url(query);
        tracing::debug!(
            "Querying feature service where {}",
            query.param("where").unwrap_or_default()
        );

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await
            .context("Failed to send request to feature service")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Feature service query failed with status {}: {}", status, body);
        }

        let body = response
            .text()
            .await
            .context("Failed to read feature service response")?;

        parse_features(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::selection::Selector;

    #[test]
    fn test_build_query_url_trims_slash() {
        let repository = FeatureServiceRepository::new(
            "https://example.org/rest/services/Cases/FeatureServer/1/".to_string(),
            None,
        )
        .unwrap();
        let query = FeatureQuery::for_selector(&Selector::County {
            fips: "06037".to_string(),
        });

        let url = repository.build_query_url(&query);
        assert!(url.starts_with("https://example.org/rest/services/Cases/FeatureServer/1/query?f=json&where=FIPS%3D%2706037%27"));
    }

    #[test]
    fn test_parse_features() {
        let body = r#"{
            "features": [
                {"attributes": {"dt": 1584230400000, "Confirmed": 144, "Deaths": 1, "NewCases": 50, "Population": 10039107}},
                {"attributes": {"dt": 1584316800000, "Confirmed": 190, "Deaths": 1, "NewCases": 46, "Population": 10039107}}
            ]
        }"#;

        let features = parse_features(body).unwrap();
        assert_eq!(features.len(), 2);
        assert_eq!(features[1].confirmed, 190);
    }

    #[test]
    fn test_parse_missing_features() {
        let err = parse_features(r#"{"fields": []}"#).unwrap_err();
        assert_eq!(
            err.downcast_ref::<FeatureResponseError>(),
            Some(&FeatureResponseError::MissingFeatures)
        );
    }

    #[test]
    fn test_parse_service_error() {
        let body = r#"{"error": {"code": 400, "message": "Unable to complete operation.", "details": []}}"#;
        let err = parse_features(body).unwrap_err();

        assert_eq!(
            err.to_string(),
            "feature service error 400: Unable to complete operation."
        );
    }

    #[test]
    fn test_parse_invalid_json() {
        assert!(parse_features("<html>").is_err());
    }
}
