//! Country information tool.
//!
//! Looks a country up by name and renders a multi-section report.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{info, instrument};

use super::client::{CountryApi, Endpoint};
use super::error::CountryError;
use super::format::{NOT_AVAILABLE, format_number, group_thousands, join_or, or_default, or_na};
use super::record::CountryRecord;
use crate::domains::tools::handlers::CountryTool;

/// Parameters for a country lookup.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetCountryInfoParams {
    #[schemars(description = "Country name (in English or Spanish)")]
    pub country: String,
}

/// Country information tool implementation.
#[derive(Debug, Clone, Default)]
pub struct GetCountryInfoTool;

#[async_trait]
impl CountryTool for GetCountryInfoTool {
    type Params = GetCountryInfoParams;

    const NAME: &'static str = "get_country_info";

    const DESCRIPTION: &'static str = "Get detailed information about a country: capital, \
         population, region, area, currencies, languages, timezone, country code, land borders \
         and geographic location.";

    const ACTION: &'static str = "getting country information";

    #[instrument(skip_all, fields(country = %params.country))]
    async fn run(params: Self::Params, api: &dyn CountryApi) -> Result<String, CountryError> {
        info!("Looking up country: {}", params.country);

        let response = api.get(Endpoint::Name, &params.country).await?;
        if !response.is_success() {
            return Err(CountryError::CountryNotFound(params.country));
        }

        let country = response.first_named_record()?;
        Ok(Self::render(&country))
    }
}

impl GetCountryInfoTool {
    /// Render the report for a single country.
    pub fn render(country: &CountryRecord) -> String {
        let currencies = join_or(
            country.currencies().map(|c| {
                format!(
                    "{} ({})",
                    or_na(c.name.as_deref()),
                    or_na(c.symbol.as_deref())
                )
            }),
            NOT_AVAILABLE,
        );
        let location = join_or(country.latlng().iter().map(f64::to_string), NOT_AVAILABLE);

        format!(
            "{name} ({official})\n\
             \n\
             General Information:\n\
             • Capital: {capital}\n\
             • Population: {population}\n\
             • Region: {region}\n\
             • Subregion: {subregion}\n\
             • Area: {area} km²\n\
             \n\
             Details:\n\
             • Currencies: {currencies}\n\
             • Languages: {languages}\n\
             • Timezone: {timezone}\n\
             • Country Code: {code}\n\
             \n\
             Geography:\n\
             • Borders: {borders}\n\
             • Location: {location}",
            name = or_na(country.common_name()),
            official = or_na(country.official_name()),
            capital = or_na(country.first_capital()),
            population = or_na(country.population.map(group_thousands)),
            region = or_na(country.region()),
            subregion = or_na(country.subregion()),
            area = or_na(country.area.map(format_number)),
            currencies = currencies,
            languages = join_or(country.languages(), NOT_AVAILABLE),
            timezone = or_na(country.first_timezone()),
            code = or_na(country.country_code()),
            borders = or_default(Some(country.borders().join(", ")), "No land borders"),
            location = location,
        )
    }
}
