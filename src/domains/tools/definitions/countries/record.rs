//! Country records as returned by the upstream API.
//!
//! Upstream records are loosely structured: any field may be missing, and
//! a field with an unexpected JSON type is treated as missing instead of
//! rejecting the whole record.

use std::fmt;
use std::marker::PhantomData;

use serde::de::{DeserializeOwned, MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::error::CountryError;

/// A single country as returned by `/name`, `/capital` or `/currency`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CountryRecord {
    #[serde(deserialize_with = "lenient")]
    pub name: Option<CountryName>,

    #[serde(deserialize_with = "lenient")]
    pub capital: Option<Vec<String>>,

    #[serde(deserialize_with = "lenient")]
    pub population: Option<u64>,

    #[serde(deserialize_with = "lenient")]
    pub region: Option<String>,

    #[serde(deserialize_with = "lenient")]
    pub subregion: Option<String>,

    /// Surface in km².
    #[serde(deserialize_with = "lenient")]
    pub area: Option<f64>,

    /// Currency code to currency, in upstream order.
    #[serde(deserialize_with = "lenient")]
    pub currencies: Option<OrderedMap<Currency>>,

    /// Language code to display name, in upstream order.
    #[serde(deserialize_with = "lenient")]
    pub languages: Option<OrderedMap<String>>,

    #[serde(deserialize_with = "lenient")]
    pub timezones: Option<Vec<String>>,

    #[serde(deserialize_with = "lenient")]
    pub cca2: Option<String>,

    #[serde(deserialize_with = "lenient")]
    pub cca3: Option<String>,

    #[serde(deserialize_with = "lenient")]
    pub borders: Option<Vec<String>>,

    #[serde(deserialize_with = "lenient")]
    pub latlng: Option<Vec<f64>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CountryName {
    #[serde(deserialize_with = "lenient")]
    pub common: Option<String>,

    #[serde(deserialize_with = "lenient")]
    pub official: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Currency {
    #[serde(deserialize_with = "lenient")]
    pub name: Option<String>,

    #[serde(deserialize_with = "lenient")]
    pub symbol: Option<String>,
}

/// A JSON object kept as an ordered list of entries.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderedMap<T>(pub Vec<(String, T)>);

impl<T> OrderedMap<T> {
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.0.iter().map(|(_, value)| value)
    }
}

impl<T> Default for OrderedMap<T> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<'de, T> Deserialize<'de> for OrderedMap<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct OrderedMapVisitor<T>(PhantomData<T>);

        impl<'de, T> Visitor<'de> for OrderedMapVisitor<T>
        where
            T: Deserialize<'de>,
        {
            type Value = OrderedMap<T>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a JSON object")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some(entry) = access.next_entry::<String, T>()? {
                    entries.push(entry);
                }
                Ok(OrderedMap(entries))
            }
        }

        deserializer.deserialize_map(OrderedMapVisitor(PhantomData))
    }
}

/// Deserialize a field, mapping any type mismatch to `None`.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).ok())
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

impl CountryRecord {
    /// Parse an upstream body that must be a JSON array of records.
    ///
    /// Array elements that are not objects become empty records.
    pub fn list_from_json(body: &str) -> Result<Vec<Self>, CountryError> {
        match serde_json::from_str::<Value>(body)? {
            Value::Array(items) => Ok(items
                .into_iter()
                .map(|item| Self::deserialize(item).unwrap_or_default())
                .collect()),
            _ => Err(CountryError::UnexpectedShape),
        }
    }

    pub fn common_name(&self) -> Option<&str> {
        self.name.as_ref().and_then(|n| non_empty(&n.common))
    }

    pub fn official_name(&self) -> Option<&str> {
        self.name.as_ref().and_then(|n| non_empty(&n.official))
    }

    pub fn region(&self) -> Option<&str> {
        non_empty(&self.region)
    }

    pub fn subregion(&self) -> Option<&str> {
        non_empty(&self.subregion)
    }

    pub fn country_code(&self) -> Option<&str> {
        non_empty(&self.cca2)
    }

    pub fn first_capital(&self) -> Option<&str> {
        self.capital
            .as_ref()
            .and_then(|c| c.first())
            .map(String::as_str)
    }

    pub fn first_timezone(&self) -> Option<&str> {
        self.timezones
            .as_ref()
            .and_then(|t| t.first())
            .map(String::as_str)
    }

    pub fn first_currency(&self) -> Option<&Currency> {
        self.currencies.as_ref().and_then(|c| c.values().next())
    }

    pub fn currencies(&self) -> impl Iterator<Item = &Currency> {
        self.currencies.iter().flat_map(|map| map.values())
    }

    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.languages
            .iter()
            .flat_map(|map| map.values())
            .map(String::as_str)
    }

    pub fn borders(&self) -> &[String] {
        self.borders.as_deref().unwrap_or_default()
    }

    pub fn latlng(&self) -> &[f64] {
        self.latlng.as_deref().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_full_record() {
        let body = r#"[{
            "name": {"common": "France", "official": "French Republic"},
            "capital": ["Paris"],
            "population": 67391582,
            "region": "Europe",
            "subregion": "Western Europe",
            "area": 551695,
            "currencies": {"EUR": {"name": "Euro", "symbol": "€"}},
            "languages": {"fra": "French"},
            "timezones": ["UTC-10:00", "UTC+01:00"],
            "cca2": "FR",
            "cca3": "FRA",
            "borders": ["AND", "BEL"],
            "latlng": [46.0, 2.0]
        }]"#;

        let records = CountryRecord::list_from_json(body).unwrap();
        assert_eq!(records.len(), 1);
        let france = &records[0];
        assert_eq!(france.common_name(), Some("France"));
        assert_eq!(france.official_name(), Some("French Republic"));
        assert_eq!(france.first_capital(), Some("Paris"));
        assert_eq!(france.population, Some(67_391_582));
        assert_eq!(france.area, Some(551_695.0));
        assert_eq!(france.first_currency().and_then(|c| c.symbol.as_deref()), Some("€"));
        assert_eq!(france.languages().collect::<Vec<_>>(), vec!["French"]);
        assert_eq!(france.first_timezone(), Some("UTC-10:00"));
        assert_eq!(france.borders(), ["AND".to_string(), "BEL".to_string()]);
        assert_eq!(france.latlng(), [46.0, 2.0]);
    }

    #[test]
    fn test_missing_fields_are_none() {
        let records = CountryRecord::list_from_json(r#"[{}]"#).unwrap();
        let empty = &records[0];
        assert_eq!(empty, &CountryRecord::default());
        assert!(empty.common_name().is_none());
        assert!(empty.borders().is_empty());
        assert_eq!(empty.currencies().count(), 0);
    }

    #[test]
    fn test_mistyped_fields_are_dropped() {
        let body = r#"[{
            "name": {"common": "Nowhere", "official": 42},
            "population": "lots",
            "capital": "Not a list",
            "area": 12.5
        }]"#;

        let record = &CountryRecord::list_from_json(body).unwrap()[0];
        assert_eq!(record.common_name(), Some("Nowhere"));
        assert!(record.official_name().is_none());
        assert!(record.population.is_none());
        assert!(record.first_capital().is_none());
        assert_eq!(record.area, Some(12.5));
    }

    #[test]
    fn test_map_fields_keep_upstream_order() {
        let body = r#"[{
            "currencies": {
                "ZZZ": {"name": "Last alphabetically", "symbol": "z"},
                "AAA": {"name": "First alphabetically", "symbol": "a"}
            },
            "languages": {"zul": "Zulu", "afr": "Afrikaans", "eng": "English"}
        }]"#;

        let record = &CountryRecord::list_from_json(body).unwrap()[0];
        let names: Vec<_> = record
            .currencies()
            .filter_map(|c| c.name.as_deref())
            .collect();
        assert_eq!(names, vec!["Last alphabetically", "First alphabetically"]);
        assert_eq!(
            record.languages().collect::<Vec<_>>(),
            vec!["Zulu", "Afrikaans", "English"]
        );
    }

    #[test]
    fn test_empty_strings_count_as_absent() {
        let body = r#"[{"name": {"common": ""}, "region": "", "cca2": ""}]"#;
        let record = &CountryRecord::list_from_json(body).unwrap()[0];
        assert!(record.common_name().is_none());
        assert!(record.region().is_none());
        assert!(record.country_code().is_none());
    }

    #[test]
    fn test_non_array_body_is_rejected() {
        let err = CountryRecord::list_from_json(r#"{"status": 404}"#).unwrap_err();
        assert!(matches!(err, CountryError::UnexpectedShape));
    }

    #[test]
    fn test_invalid_json_is_rejected() {
        let err = CountryRecord::list_from_json("not json").unwrap_err();
        assert!(matches!(err, CountryError::Json(_)));
    }

    #[test]
    fn test_non_object_elements_become_empty_records() {
        let records = CountryRecord::list_from_json(r#"[null, 3]"#).unwrap();
        assert_eq!(records, vec![CountryRecord::default(), CountryRecord::default()]);
    }
}
