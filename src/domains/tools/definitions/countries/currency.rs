//! Currency lookup tool.
//!
//! Lists every country that uses a given currency code.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{info, instrument};

use super::client::{CountryApi, Endpoint};
use super::error::CountryError;
use super::format::or_na;
use super::record::CountryRecord;
use crate::domains::tools::handlers::CountryTool;

/// Parameters for a currency lookup.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetCurrencyInfoParams {
    #[schemars(description = "Currency code (e.g., USD, EUR, MXN)")]
    pub currency_code: String,
}

/// Currency lookup tool implementation.
#[derive(Debug, Clone, Default)]
pub struct GetCurrencyInfoTool;

#[async_trait]
impl CountryTool for GetCurrencyInfoTool {
    type Params = GetCurrencyInfoParams;

    const NAME: &'static str = "get_currency_info";

    const DESCRIPTION: &'static str = "List the countries that use a currency, with the \
         currency's name and symbol in each of them. The code is case-insensitive.";

    const ACTION: &'static str = "getting currency information";

    #[instrument(skip_all, fields(currency_code = %params.currency_code))]
    async fn run(params: Self::Params, api: &dyn CountryApi) -> Result<String, CountryError> {
        let code = params.currency_code.to_uppercase();

        let response = api.get(Endpoint::Currency, &code).await?;
        if !response.is_success() {
            return Err(CountryError::CurrencyNotFound(params.currency_code));
        }

        let countries = response.records()?;
        info!("Response data length: {}", countries.len());

        let lines = countries
            .iter()
            .map(Self::render_line)
            .collect::<Vec<_>>()
            .join("\n");

        Ok(format!("Countries using {}:\n\n{}", code, lines))
    }
}

impl GetCurrencyInfoTool {
    /// `"{country}: {currency} ({symbol})"` using the country's first currency.
    pub fn render_line(country: &CountryRecord) -> String {
        let currency = country.first_currency();
        format!(
            "{}: {} ({})",
            or_na(country.common_name()),
            or_na(currency.and_then(|c| c.name.as_deref())),
            or_na(currency.and_then(|c| c.symbol.as_deref())),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::definitions::countries::testing::{FakeCountryApi, text_of};
    use crate::domains::tools::handlers::execute;
    use serde_json::json;
    use tokio_test::assert_ok;

    fn params(code: &str) -> GetCurrencyInfoParams {
        GetCurrencyInfoParams {
            currency_code: code.to_string(),
        }
    }

    fn euro_countries() -> serde_json::Value {
        json!([
            {"name": {"common": "France"}, "currencies": {"EUR": {"name": "Euro", "symbol": "€"}}},
            {"name": {"common": "Germany"}, "currencies": {"EUR": {"name": "Euro", "symbol": "€"}}},
            {"name": {"common": "Austria"}, "currencies": {"EUR": {"name": "Euro", "symbol": "€"}}}
        ])
    }

    #[test]
    fn test_params_deserialize() {
        let params = assert_ok!(serde_json::from_value::<GetCurrencyInfoParams>(
            json!({"currency_code": "mxn"})
        ));
        assert_eq!(params.currency_code, "mxn");
    }

    #[tokio::test]
    async fn test_code_is_uppercased() {
        let api = FakeCountryApi::new().with_json(
            Endpoint::Currency,
            "USD",
            json!([{"name": {"common": "United States"}, "currencies": {"USD": {"name": "United States dollar", "symbol": "$"}}}]),
        );

        let text = text_of(&execute::<GetCurrencyInfoTool>(params("usd"), &api).await);

        assert_eq!(api.requests(), vec![(Endpoint::Currency, "USD".to_string())]);
        assert_eq!(
            text,
            "Countries using USD:\n\nUnited States: United States dollar ($)"
        );
    }

    #[tokio::test]
    async fn test_lines_follow_upstream_order() {
        let api = FakeCountryApi::new().with_json(Endpoint::Currency, "EUR", euro_countries());

        let text = text_of(&execute::<GetCurrencyInfoTool>(params("EUR"), &api).await);

        assert_eq!(
            text,
            "Countries using EUR:\n\n\
             France: Euro (€)\n\
             Germany: Euro (€)\n\
             Austria: Euro (€)"
        );
    }

    #[tokio::test]
    async fn test_first_currency_only() {
        let api = FakeCountryApi::new().with_json(
            Endpoint::Currency,
            "CHF",
            json!([{
                "name": {"common": "Liechtenstein"},
                "currencies": {
                    "CHF": {"name": "Swiss franc", "symbol": "Fr"},
                    "EUR": {"name": "Euro", "symbol": "€"}
                }
            }]),
        );

        let text = text_of(&execute::<GetCurrencyInfoTool>(params("chf"), &api).await);
        assert!(text.ends_with("Liechtenstein: Swiss franc (Fr)"));
    }

    #[tokio::test]
    async fn test_missing_fields_render_placeholders() {
        let api = FakeCountryApi::new().with_json(
            Endpoint::Currency,
            "XXX",
            json!([{"currencies": {"XXX": {}}}, {"name": {"common": "Bare"}}]),
        );

        let text = text_of(&execute::<GetCurrencyInfoTool>(params("XXX"), &api).await);
        assert_eq!(text, "Countries using XXX:\n\nN/A: N/A (N/A)\nBare: N/A (N/A)");
    }

    #[tokio::test]
    async fn test_not_found_keeps_caller_spelling() {
        let api = FakeCountryApi::new().with_status(Endpoint::Currency, "ABC", 404);

        let text = text_of(&execute::<GetCurrencyInfoTool>(params("abc"), &api).await);
        assert_eq!(
            text,
            "Error getting currency information: Currency not found: abc"
        );
    }

    #[tokio::test]
    async fn test_non_array_body() {
        let api = FakeCountryApi::new().with_json(
            Endpoint::Currency,
            "EUR",
            json!({"message": "unexpected"}),
        );

        let text = text_of(&execute::<GetCurrencyInfoTool>(params("EUR"), &api).await);
        assert_eq!(
            text,
            "Error getting currency information: Invalid response format: expected array"
        );
    }

    #[tokio::test]
    async fn test_unparsable_body() {
        let api = FakeCountryApi::new().with_body(Endpoint::Currency, "EUR", 200, "<html>");

        let text = text_of(&execute::<GetCurrencyInfoTool>(params("EUR"), &api).await);
        assert!(text.starts_with("Error getting currency information: "));
        assert_ne!(text, "Error getting currency information: Unknown error");
    }
}
