//! Tool definitions module.
//!
//! This module exports all available tool definitions.
//! Each tool is defined in its own file for better maintainability.

pub mod countries;

pub use countries::{
    CompareCountriesParams, CompareCountriesTool, GetCountryInfoParams, GetCountryInfoTool,
    GetCurrencyInfoParams, GetCurrencyInfoTool, SearchCountriesParams, SearchCountriesTool,
};
