//! Shared plumbing for the country tools.
//!
//! Every tool implements [`CountryTool`]; the free functions here turn such
//! a tool into rmcp metadata, an rmcp route and an HTTP handler, and wrap
//! its body so that failures become text instead of protocol errors.

use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use async_trait::async_trait;
use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Content, Tool},
};
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use tracing::{error, info};

#[cfg(feature = "http")]
use super::ToolError;
use super::definitions::countries::{CountryApi, CountryError};

/// Detail used when a failure carries no message of its own.
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// A tool that answers with a single block of text built from upstream data.
#[async_trait]
pub trait CountryTool: Send + Sync + 'static {
    /// Input arguments, deserialized from the call's JSON object.
    type Params: DeserializeOwned + JsonSchema + Send + 'static;

    /// Tool name as registered in MCP.
    const NAME: &'static str;

    /// Tool description shown to clients.
    const DESCRIPTION: &'static str;

    /// What the tool was doing, as it appears in `"Error {action}: ..."`.
    const ACTION: &'static str;

    /// Tool body. Any error returned here is rendered as text by [`execute`].
    async fn run(params: Self::Params, api: &dyn CountryApi) -> Result<String, CountryError>;
}

/// Format the uniform error text for a failed tool body.
pub fn error_text(action: &str, detail: &str) -> String {
    let detail = if detail.is_empty() { UNKNOWN_ERROR } else { detail };
    format!("Error {}: {}", action, detail)
}

/// Run `body`, turning any failure (including a panic) into error text.
///
/// The returned result is always a success with exactly one text item.
pub async fn respond<F>(action: &str, body: F) -> CallToolResult
where
    F: Future<Output = Result<String, CountryError>>,
{
    let text = match AssertUnwindSafe(body).catch_unwind().await {
        Ok(Ok(text)) => text,
        Ok(Err(e)) => {
            error!("Error {}: {}", action, e);
            error_text(action, &e.to_string())
        }
        Err(_) => {
            error!("Tool body panicked while {}", action);
            error_text(action, "")
        }
    };

    CallToolResult::success(vec![Content::text(text)])
}

/// Execute a tool body behind the error-as-text boundary.
pub async fn execute<T: CountryTool>(params: T::Params, api: &dyn CountryApi) -> CallToolResult {
    respond(T::ACTION, T::run(params, api)).await
}

/// Create a Tool model for `T` (metadata).
pub fn to_tool<T: CountryTool>() -> Tool {
    Tool {
        name: T::NAME.into(),
        description: Some(T::DESCRIPTION.into()),
        input_schema: cached_schema_for_type::<T::Params>(),
        annotations: None,
        output_schema: None,
        icons: None,
        meta: None,
        title: None,
    }
}

/// Create a ToolRoute for STDIO/TCP transport.
pub fn create_route<T, S>(api: Arc<dyn CountryApi>) -> ToolRoute<S>
where
    T: CountryTool,
    S: Send + Sync + 'static,
{
    ToolRoute::new_dyn(to_tool::<T>(), move |ctx: ToolCallContext<'_, S>| {
        let args = ctx.arguments.clone().unwrap_or_default();
        let api = api.clone();
        async move {
            let params: T::Params = serde_json::from_value(serde_json::Value::Object(args))
                .map_err(|e| McpError::invalid_params(e.to_string(), None))?;

            info!("Calling tool {}", T::NAME);
            Ok(execute::<T>(params, api.as_ref()).await)
        }
        .boxed()
    })
}

/// HTTP handler for `T` (for HTTP transport).
///
/// Arguments that do not match the tool's schema are a dispatch error;
/// everything after that is answered in-band.
#[cfg(feature = "http")]
pub async fn http_handler<T: CountryTool>(
    arguments: serde_json::Value,
    api: &dyn CountryApi,
) -> Result<serde_json::Value, ToolError> {
    let params: T::Params = serde_json::from_value(arguments)
        .map_err(|e| ToolError::invalid_arguments(e.to_string()))?;

    info!("Calling tool {}", T::NAME);
    let result = execute::<T>(params, api).await;

    Ok(serde_json::json!({
        "content": result.content,
        "isError": result.is_error.unwrap_or(false)
    }))
}
