//! In-memory `CountryApi` used by the tool, registry and transport tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use rmcp::model::{CallToolResult, RawContent};
use serde_json::{Value, json};

use super::client::{ApiResponse, CountryApi, Endpoint};
use super::error::CountryError;

/// Canned upstream. Unregistered requests answer 404 like the real API.
#[derive(Default)]
pub struct FakeCountryApi {
    responses: HashMap<(Endpoint, String), Result<ApiResponse, String>>,
    requests: Mutex<Vec<(Endpoint, String)>>,
}

impl FakeCountryApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_json(self, endpoint: Endpoint, value: &str, body: Value) -> Self {
        self.with_body(endpoint, value, 200, &body.to_string())
    }

    pub fn with_status(self, endpoint: Endpoint, value: &str, status: u16) -> Self {
        self.with_body(endpoint, value, status, r#"{"status":404,"message":"Not Found"}"#)
    }

    pub fn with_body(mut self, endpoint: Endpoint, value: &str, status: u16, body: &str) -> Self {
        self.responses.insert(
            (endpoint, value.to_string()),
            Ok(ApiResponse::new(status, body)),
        );
        self
    }

    pub fn with_failure(mut self, endpoint: Endpoint, value: &str, message: &str) -> Self {
        self.responses
            .insert((endpoint, value.to_string()), Err(message.to_string()));
        self
    }

    /// Every `(endpoint, value)` pair requested so far, in call order.
    pub fn requests(&self) -> Vec<(Endpoint, String)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl CountryApi for FakeCountryApi {
    async fn get(&self, endpoint: Endpoint, value: &str) -> Result<ApiResponse, CountryError> {
        self.requests
            .lock()
            .unwrap()
            .push((endpoint, value.to_string()));

        match self.responses.get(&(endpoint, value.to_string())) {
            Some(Ok(response)) => Ok(response.clone()),
            Some(Err(message)) => Err(CountryError::transport(message.clone())),
            None => Ok(ApiResponse::new(
                404,
                r#"{"status":404,"message":"Not Found"}"#,
            )),
        }
    }
}

/// Minimal upstream record with the fields most tests look at.
pub fn country(common: &str, cca3: &str, population: Option<u64>) -> Value {
    let mut record = json!({
        "name": { "common": common, "official": format!("Official {}", common) },
        "cca3": cca3,
    });
    if let Some(population) = population {
        record["population"] = json!(population);
    }
    record
}

/// Text of the single content item of a tool result.
pub fn text_of(result: &CallToolResult) -> String {
    assert_eq!(result.content.len(), 1, "expected exactly one content item");
    match &result.content[0].raw {
        RawContent::Text(text) => text.text.clone(),
        other => panic!("expected text content, got {:?}", other),
    }
}

/// Shared buffer the captured log lines are written into.
#[derive(Clone, Default)]
pub struct LogBuffer(std::sync::Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl std::io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Route this thread's `tracing` output into a buffer until the guard drops.
pub fn capture_logs() -> (tracing::subscriber::DefaultGuard, LogBuffer) {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::INFO)
        .finish();
    (tracing::subscriber::set_default(subscriber), buffer)
}
