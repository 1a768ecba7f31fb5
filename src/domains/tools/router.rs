//! Tool Router - builds the rmcp ToolRouter from the tool definitions.
//!
//! This module builds the ToolRouter for STDIO/TCP transport. Every route
//! shares the same upstream client.

use std::sync::Arc;

use rmcp::handler::server::tool::ToolRouter;

use super::definitions::countries::CountryApi;
use super::definitions::{
    CompareCountriesTool, GetCountryInfoTool, GetCurrencyInfoTool, SearchCountriesTool,
};
use super::handlers::create_route;

/// Build the tool router with all registered tools.
pub fn build_tool_router<S>(api: Arc<dyn CountryApi>) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    ToolRouter::new()
        .with_route(create_route::<GetCountryInfoTool, S>(api.clone()))
        .with_route(create_route::<GetCurrencyInfoTool, S>(api.clone()))
        .with_route(create_route::<CompareCountriesTool, S>(api.clone()))
        .with_route(create_route::<SearchCountriesTool, S>(api))
}
