use std::{env, fs};

use serde::{Deserialize, Serialize};

use crate::types::StringError;

/// Closed value sets the request boundary validates against, plus the row
/// ceilings. Loaded once at startup and handed to the handlers through
/// `AppState`; tests substitute their own instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default = "default_sources")]
    pub sources: Vec<String>,
    #[serde(default = "default_locations")]
    pub locations: Vec<String>,
    #[serde(default = "default_home_types")]
    pub home_types: Vec<String>,
    /// Rows returned when the caller doesn't pass `limit`.
    #[serde(default = "default_limit")]
    pub default_limit: u32,
    /// Upper bound on `limit` for the all-ads page. `None` removes the cap.
    #[serde(default = "default_all_ads_limit_cap")]
    pub all_ads_limit_cap: Option<u32>,
}

impl Default for Catalog {
    fn default() -> Self {
        Catalog {
            sources: default_sources(),
            locations: default_locations(),
            home_types: default_home_types(),
            default_limit: default_limit(),
            all_ads_limit_cap: default_all_ads_limit_cap(),
        }
    }
}

impl Catalog {
    /// Reads the catalog from the JSON file named by `CATALOG_FILE`.
    /// Fields missing from the file keep their built-in defaults; with no
    /// file set the whole catalog is the built-in one.
    pub fn from_env() -> anyhow::Result<Catalog> {
        let catalog = match env::var("CATALOG_FILE") {
            Ok(path) => serde_json::from_str(&fs::read_to_string(path)?)?,
            Err(_) => Catalog::default(),
        };

        if catalog.sources.is_empty() {
            return Err(StringError("Catalog must list at least one source".into()).into());
        }

        Ok(catalog)
    }

    pub fn is_known_source(&self, name: &str) -> bool {
        self.sources.iter().any(|source| source == name)
    }

    pub fn is_known_location(&self, name: &str) -> bool {
        self.locations.iter().any(|location| location == name)
    }

    pub fn is_known_home_type(&self, name: &str) -> bool {
        self.home_types.iter().any(|home_type| home_type == name)
    }
}

fn default_sources() -> Vec<String> {
    [
        "addressbg",
        "arcoreal",
        "avista",
        "bezkomisiona",
        "bulgarianproperties",
        "era",
        "galardo",
        "home2u",
        "imotbg",
        "luximmo",
        "mirelabg",
        "novdom1",
        "place2live",
        "primoplus",
        "superimoti",
        "ues",
        "yavlena",
        "yourhome",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_locations() -> Vec<String> {
    [
        "Банишора",
        "Белите Брези",
        "Връбница 2",
        "Горубляне",
        "Градина",
        "Димитър Миленков",
        "Дружба 2",
        "Дървеница",
        "Експериментален",
        "Зона Б-5-3",
        "Илинден",
        "Левски",
        "Люлин",
        "Люлин 3",
        "Люлин 6",
        "Люлин 9",
        "Младост 1",
        "Младост 1A",
        "Младост 2",
        "Младост 4",
        "Обеля 2",
        "Овча купел 1",
        "Овча купел 2",
        "Република 2",
        "Света троица",
        "Славия",
        "Слатина",
        "Стрелбище",
        "Суха река",
        "Хиподрума",
        "Център",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_home_types() -> Vec<String> {
    [
        "Студио",
        "Едностаен",
        "Двустаен",
        "Тристаен",
        "Многостаен",
        "Мезонет",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_limit() -> u32 {
    100
}

fn default_all_ads_limit_cap() -> Option<u32> {
    Some(100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catalog_is_populated() {
        let catalog = Catalog::default();
        assert!(!catalog.sources.is_empty());
        assert!(!catalog.locations.is_empty());
        assert!(!catalog.home_types.is_empty());
        assert_eq!(catalog.default_limit, 100);
        assert_eq!(catalog.all_ads_limit_cap, Some(100));
    }

    #[test]
    fn membership_checks_are_exact() {
        let catalog = Catalog::default();
        assert!(catalog.is_known_source("imotbg"));
        assert!(!catalog.is_known_source("imotbg "));
        assert!(catalog.is_known_location("Младост 2"));
        assert!(!catalog.is_known_location("Младост 1D"));
        assert!(catalog.is_known_home_type("Студио"));
        assert!(!catalog.is_known_home_type("Dvustaen"));
    }

    #[test]
    fn partial_file_keeps_defaults_for_missing_fields() {
        let catalog: Catalog =
            serde_json::from_str(r#"{"sources": ["imotbg"], "default_limit": 10000}"#).unwrap();
        assert_eq!(catalog.sources, vec!["imotbg".to_string()]);
        assert_eq!(catalog.default_limit, 10000);
        assert_eq!(catalog.home_types, default_home_types());
        assert_eq!(catalog.all_ads_limit_cap, Some(100));
    }

    #[test]
    fn cap_can_be_disabled() {
        let catalog: Catalog = serde_json::from_str(r#"{"all_ads_limit_cap": null}"#).unwrap();
        assert_eq!(catalog.all_ads_limit_cap, None);
    }
}
