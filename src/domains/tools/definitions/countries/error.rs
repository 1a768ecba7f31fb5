//! Errors raised inside the country tools.
//!
//! The `Display` output of each variant is exactly the detail that ends up
//! after `"Error {action}: "` in the tool's text response.

use thiserror::Error;

/// Failures that can occur while running a country tool body.
#[derive(Debug, Error)]
pub enum CountryError {
    /// The name endpoint answered with a non-success status.
    #[error("Country not found: {0}")]
    CountryNotFound(String),

    /// The currency endpoint answered with a non-success status.
    #[error("Currency not found: {0}")]
    CurrencyNotFound(String),

    /// At least one side of a comparison answered with a non-success status.
    #[error("One or both countries were not found")]
    CountriesNotFound,

    /// The upstream answered, but the first record has no common name.
    #[error("Invalid country data received")]
    InvalidData,

    /// The upstream answered with something other than a JSON array.
    #[error("Invalid response format: expected array")]
    UnexpectedShape,

    /// The request could not be sent or its body could not be read.
    #[error("{0}")]
    Http(#[from] reqwest::Error),

    /// The response body was not valid JSON.
    #[error("{0}")]
    Json(#[from] serde_json::Error),

    /// Any other transport-level failure reported by a `CountryApi`.
    #[error("{0}")]
    Transport(String),
}

impl CountryError {
    /// Create a transport error from an arbitrary message.
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_match_response_details() {
        assert_eq!(
            CountryError::CountryNotFound("Wakanda".into()).to_string(),
            "Country not found: Wakanda"
        );
        assert_eq!(
            CountryError::CurrencyNotFound("xyz".into()).to_string(),
            "Currency not found: xyz"
        );
        assert_eq!(
            CountryError::CountriesNotFound.to_string(),
            "One or both countries were not found"
        );
        assert_eq!(
            CountryError::UnexpectedShape.to_string(),
            "Invalid response format: expected array"
        );
        assert_eq!(CountryError::transport("fetch failed").to_string(), "fetch failed");
    }
}
