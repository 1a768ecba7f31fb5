//! Country comparison tool.
//!
//! Fetches two countries concurrently and renders them side by side.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{info, instrument};

use super::client::{CountryApi, Endpoint};
use super::error::CountryError;
use super::format::{format_number, group_thousands, or_na};
use super::record::CountryRecord;
use crate::domains::tools::handlers::CountryTool;

/// Parameters for a two-country comparison.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CompareCountriesParams {
    #[schemars(description = "First country to compare")]
    pub country1: String,

    #[schemars(description = "Second country to compare")]
    pub country2: String,
}

/// Country comparison tool implementation.
#[derive(Debug, Clone, Default)]
pub struct CompareCountriesTool;

#[async_trait]
impl CountryTool for CompareCountriesTool {
    type Params = CompareCountriesParams;

    const NAME: &'static str = "compare_countries";

    const DESCRIPTION: &'static str = "Compare two countries side by side: population \
         (with the difference), area, region and capital.";

    const ACTION: &'static str = "comparing countries";

    #[instrument(skip_all, fields(country1 = %params.country1, country2 = %params.country2))]
    async fn run(params: Self::Params, api: &dyn CountryApi) -> Result<String, CountryError> {
        info!("Comparing: {} vs {}", params.country1, params.country2);

        let (first, second) = tokio::join!(
            api.get(Endpoint::Name, &params.country1),
            api.get(Endpoint::Name, &params.country2),
        );
        let (first, second) = (first?, second?);

        if !first.is_success() || !second.is_success() {
            return Err(CountryError::CountriesNotFound);
        }

        let first = first.first_named_record()?;
        let second = second.first_named_record()?;

        Ok(Self::render(&first, &second))
    }
}

impl CompareCountriesTool {
    /// Absolute population difference. A missing population counts as zero.
    pub fn population_difference(a: &CountryRecord, b: &CountryRecord) -> u64 {
        a.population.unwrap_or(0).abs_diff(b.population.unwrap_or(0))
    }

    pub fn render(a: &CountryRecord, b: &CountryRecord) -> String {
        let name_a = or_na(a.common_name());
        let name_b = or_na(b.common_name());
        let population = |c: &CountryRecord| or_na(c.population.map(group_thousands));
        let area = |c: &CountryRecord| or_na(c.area.map(format_number));
        let region = |c: &CountryRecord| format!("{} ({})", or_na(c.region()), or_na(c.subregion()));
        let capital = |c: &CountryRecord| or_na(c.first_capital());

        format!(
            "Comparison: {name_a} vs {name_b}\n\
             \n\
             Population:\n\
             • {name_a}: {pop_a}\n\
             • {name_b}: {pop_b}\n\
             • Difference: {difference}\n\
             \n\
             Area:\n\
             • {name_a}: {area_a} km²\n\
             • {name_b}: {area_b} km²\n\
             \n\
             Regions:\n\
             • {name_a}: {region_a}\n\
             • {name_b}: {region_b}\n\
             \n\
             Capitals:\n\
             • {name_a}: {capital_a}\n\
             • {name_b}: {capital_b}",
            pop_a = population(a),
            pop_b = population(b),
            difference = group_thousands(Self::population_difference(a, b)),
            area_a = area(a),
            area_b = area(b),
            region_a = region(a),
            region_b = region(b),
            capital_a = capital(a),
            capital_b = capital(b),
        )
    }
}
