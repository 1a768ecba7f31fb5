//! Tool Registry - central registration and dispatch for all tools.
//!
//! This module provides:
//! - A registry of all available tools
//! - HTTP dispatch for tool calls (when http feature is enabled)
//! - Tool metadata for listing

use std::sync::Arc;
#[cfg(feature = "http")]
use tracing::warn;

use rmcp::model::Tool;

use crate::core::config::Config;

use super::definitions::countries::{CountryApi, RestCountriesClient};
use super::definitions::{
    CompareCountriesTool, GetCountryInfoTool, GetCurrencyInfoTool, SearchCountriesTool,
};
use super::handlers::{CountryTool, to_tool};
#[cfg(feature = "http")]
use super::{ToolError, handlers::http_handler};

// ============================================================================
// Tool Registry
// ============================================================================

/// Tool registry - manages all available tools.
///
/// Holds the upstream client every tool call goes through. The registry
/// itself has no other state, so calls are independent of each other.
#[derive(Clone)]
pub struct ToolRegistry {
    api: Arc<dyn CountryApi>,
}

impl ToolRegistry {
    /// Create a registry whose tools use `api` for upstream requests.
    pub fn new(api: Arc<dyn CountryApi>) -> Self {
        Self { api }
    }

    /// Create a registry talking to the configured REST Countries endpoint.
    pub fn from_config(config: &Config) -> Self {
        Self::new(Arc::new(RestCountriesClient::new(&config.countries)))
    }

    /// The upstream client shared by all tools.
    pub fn api(&self) -> Arc<dyn CountryApi> {
        self.api.clone()
    }

    /// Get all tool names.
    pub fn tool_names(&self) -> Vec<&'static str> {
        vec![
            GetCountryInfoTool::NAME,
            GetCurrencyInfoTool::NAME,
            CompareCountriesTool::NAME,
            SearchCountriesTool::NAME,
        ]
    }

    /// Get all tools as Tool models (metadata).
    pub fn get_all_tools() -> Vec<Tool> {
        vec![
            to_tool::<GetCountryInfoTool>(),
            to_tool::<GetCurrencyInfoTool>(),
            to_tool::<CompareCountriesTool>(),
            to_tool::<SearchCountriesTool>(),
        ]
    }

    /// Dispatch an HTTP tool call to the appropriate handler.
    ///
    /// Only an unknown name or mismatched arguments produce an error; tool
    /// failures come back as a normal result with error text.
    #[cfg(feature = "http")]
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<serde_json::Value, ToolError> {
        let api = self.api.as_ref();
        match name {
            GetCountryInfoTool::NAME => http_handler::<GetCountryInfoTool>(arguments, api).await,
            GetCurrencyInfoTool::NAME => http_handler::<GetCurrencyInfoTool>(arguments, api).await,
            CompareCountriesTool::NAME => {
                http_handler::<CompareCountriesTool>(arguments, api).await
            }
            SearchCountriesTool::NAME => http_handler::<SearchCountriesTool>(arguments, api).await,
            _ => {
                warn!("Unknown tool requested: {}", name);
                Err(ToolError::not_found(name))
            }
        }
    }
}
