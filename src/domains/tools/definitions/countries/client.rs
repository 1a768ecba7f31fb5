//! Upstream country-data API client.
//!
//! Tools never talk to the network directly: they go through the
//! [`CountryApi`] trait so that a fake can be substituted in tests.

use async_trait::async_trait;
use tracing::{debug, info};

use super::error::CountryError;
use super::record::CountryRecord;
use crate::core::config::CountriesConfig;

/// Upstream routes used by the tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// `/name/{value}`
    Name,
    /// `/capital/{value}`
    Capital,
    /// `/currency/{value}`
    Currency,
}

impl Endpoint {
    pub fn segment(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Capital => "capital",
            Self::Currency => "currency",
        }
    }
}

/// Raw upstream answer: status code and undecoded body.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decode the body as a JSON array of country records.
    pub fn records(&self) -> Result<Vec<CountryRecord>, CountryError> {
        CountryRecord::list_from_json(&self.body)
    }

    /// First record of the body, which must carry a common name.
    pub fn first_named_record(&self) -> Result<CountryRecord, CountryError> {
        let records = self.records().map_err(|e| match e {
            CountryError::UnexpectedShape => CountryError::InvalidData,
            other => other,
        })?;

        records
            .into_iter()
            .next()
            .filter(|record| record.common_name().is_some())
            .ok_or(CountryError::InvalidData)
    }
}

/// Read-only access to the country-data API.
#[async_trait]
pub trait CountryApi: Send + Sync {
    /// Issue a GET to `endpoint` for `value`.
    ///
    /// `value` is passed unencoded; implementations take care of escaping.
    /// A non-success status is not an error at this level.
    async fn get(&self, endpoint: Endpoint, value: &str) -> Result<ApiResponse, CountryError>;
}

/// [`CountryApi`] backed by the REST Countries HTTP service.
#[derive(Debug, Clone)]
pub struct RestCountriesClient {
    client: reqwest::Client,
    base_url: String,
}

impl RestCountriesClient {
    pub fn new(config: &CountriesConfig) -> Self {
        Self::with_client(reqwest::Client::new(), &config.base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the full URL for `endpoint` and `value`.
    pub fn url(&self, endpoint: Endpoint, value: &str) -> String {
        format!(
            "{}/{}/{}",
            self.base_url,
            endpoint.segment(),
            urlencoding::encode(value)
        )
    }
}

#[async_trait]
impl CountryApi for RestCountriesClient {
    async fn get(&self, endpoint: Endpoint, value: &str) -> Result<ApiResponse, CountryError> {
        let url = self.url(endpoint, value);
        info!("Fetching: {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        debug!("{} answered {} ({} bytes)", url, status, body.len());

        Ok(ApiResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_url_encodes_value() {
        let client = RestCountriesClient::with_client(
            reqwest::Client::new(),
            "https://restcountries.com/v3.1/",
        );
        assert_eq!(client.base_url(), "https://restcountries.com/v3.1");
        assert_eq!(
            client.url(Endpoint::Name, "United States"),
            "https://restcountries.com/v3.1/name/United%20States"
        );
        assert_eq!(
            client.url(Endpoint::Currency, "USD"),
            "https://restcountries.com/v3.1/currency/USD"
        );
    }

    #[test]
    fn test_response_success_range() {
        assert!(ApiResponse::new(200, "[]").is_success());
        assert!(ApiResponse::new(204, "").is_success());
        assert!(!ApiResponse::new(404, "").is_success());
        assert!(!ApiResponse::new(500, "").is_success());
    }

    #[tokio::test]
    async fn test_get_returns_status_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/capital/Paris"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(r#"[{"name": {"common": "France"}, "cca3": "FRA"}]"#),
            )
            .mount(&server)
            .await;

        let client = RestCountriesClient::with_client(reqwest::Client::new(), &server.uri());
        let response = client.get(Endpoint::Capital, "Paris").await.unwrap();

        assert!(response.is_success());
        let records = response.records().unwrap();
        assert_eq!(records[0].common_name(), Some("France"));
    }

    #[tokio::test]
    async fn test_get_passes_through_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/name/Wakanda"))
            .respond_with(
                ResponseTemplate::new(404).set_body_string(r#"{"status":404,"message":"Not Found"}"#),
            )
            .mount(&server)
            .await;

        let client = RestCountriesClient::with_client(reqwest::Client::new(), &server.uri());
        let response = client.get(Endpoint::Name, "Wakanda").await.unwrap();

        assert_eq!(response.status, 404);
        assert!(!response.is_success());
    }

    #[tokio::test]
    async fn test_get_reports_connection_failure() {
        // Nothing listens on port 9 (discard) on the loopback interface.
        let client = RestCountriesClient::with_client(reqwest::Client::new(), "http://127.0.0.1:9");
        let result = client.get(Endpoint::Name, "France").await;
        assert!(matches!(result, Err(CountryError::Http(_))));
    }
}
