//! Country data tools.
//!
//! This module provides the tools backed by the REST Countries API:
//! - `info`: detailed report for one country
//! - `currency`: countries using a currency
//! - `compare`: two countries side by side
//! - `search`: search by name or capital
//!
//! All of them reach the upstream through [`CountryApi`], parse its records
//! with [`CountryRecord`] and render text with the helpers in `format`.

pub mod client;
pub mod compare;
pub mod currency;
pub mod error;
pub mod format;
pub mod info;
pub mod record;
pub mod search;

#[cfg(test)]
pub(crate) mod testing;

pub use client::{ApiResponse, CountryApi, Endpoint, RestCountriesClient};
pub use compare::{CompareCountriesParams, CompareCountriesTool};
pub use currency::{GetCurrencyInfoParams, GetCurrencyInfoTool};
pub use error::CountryError;
pub use info::{GetCountryInfoParams, GetCountryInfoTool};
pub use record::CountryRecord;
pub use search::{SearchCountriesParams, SearchCountriesTool};
