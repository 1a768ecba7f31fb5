//! Country search tool.
//!
//! Queries the name and capital endpoints concurrently, merges the hits and
//! keeps the first record seen for each three-letter country code.

use std::collections::HashSet;

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use super::client::{ApiResponse, CountryApi, Endpoint};
use super::error::CountryError;
use super::format::{group_thousands, or_na};
use super::record::CountryRecord;
use crate::domains::tools::handlers::CountryTool;

/// Maximum number of results rendered.
pub const MAX_RESULTS: usize = 5;

/// Parameters for a free-text country search.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SearchCountriesParams {
    #[schemars(description = "Search term for countries (name, capital, region, etc.)")]
    pub query: String,
}

/// Country search tool implementation.
#[derive(Debug, Clone, Default)]
pub struct SearchCountriesTool;

#[async_trait]
impl CountryTool for SearchCountriesTool {
    type Params = SearchCountriesParams;

    const NAME: &'static str = "search_countries";

    const DESCRIPTION: &'static str = "Search countries by name or capital. Returns up to five \
         matches with their capital, region and population.";

    const ACTION: &'static str = "searching countries";

    #[instrument(skip_all, fields(query = %params.query))]
    async fn run(params: Self::Params, api: &dyn CountryApi) -> Result<String, CountryError> {
        let query = params.query;

        let (by_name, by_capital) = tokio::join!(
            api.get(Endpoint::Name, &query),
            api.get(Endpoint::Capital, &query),
        );

        let mut merged = Self::endpoint_records(Endpoint::Name, by_name);
        merged.extend(Self::endpoint_records(Endpoint::Capital, by_capital));

        let unique = dedup_by_cca3(merged);
        if unique.is_empty() {
            return Ok(format!("No countries found for query: \"{}\"", query));
        }

        let results = unique
            .iter()
            .take(MAX_RESULTS)
            .enumerate()
            .map(|(i, country)| Self::render_entry(i + 1, country))
            .collect::<Vec<_>>()
            .join("\n\n");

        Ok(format!("Search results for \"{}\":\n\n{}", query, results))
    }
}

impl SearchCountriesTool {
    /// Records contributed by one endpoint. Any failure contributes nothing.
    fn endpoint_records(
        endpoint: Endpoint,
        outcome: Result<ApiResponse, CountryError>,
    ) -> Vec<CountryRecord> {
        match outcome {
            Ok(response) if response.is_success() => match response.records() {
                Ok(records) => records,
                Err(e) => {
                    warn!("Ignoring /{} results: {}", endpoint.segment(), e);
                    Vec::new()
                }
            },
            Ok(response) => {
                debug!("/{} answered {}", endpoint.segment(), response.status);
                Vec::new()
            }
            Err(e) => {
                warn!("/{} request failed: {}", endpoint.segment(), e);
                Vec::new()
            }
        }
    }

    pub fn render_entry(rank: usize, country: &CountryRecord) -> String {
        format!(
            "{}. {}\n   Capital: {}\n   Region: {}\n   Population: {}",
            rank,
            or_na(country.common_name()),
            or_na(country.first_capital()),
            or_na(country.region()),
            or_na(country.population.map(group_thousands)),
        )
    }
}

/// Keep the first record for each `cca3`, preserving order.
///
/// Records without a code all share the same (missing) key.
pub fn dedup_by_cca3(records: Vec<CountryRecord>) -> Vec<CountryRecord> {
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter(|record| seen.insert(record.cca3.clone()))
        .collect()
}
