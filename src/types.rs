use actix_web::web;
use libsql::Database;
use serde::{Deserialize, Serialize};

use crate::config::Catalog;

// DB Types

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ad {
    pub id: i32,
    pub source_name: String,
    pub url: String,
    pub price: i64,
    pub home_type: String,
    pub home_size: i64,
    pub location: String,
    pub image: String,
    pub scraping_date: String,
}

// Query Types

/// Optional filters taken from the query string. Keys that aren't listed
/// here are ignored, matching the behavior the frontend relies on.
#[derive(Debug, Default, Deserialize)]
pub struct AdQuery {
    pub source_name: Option<String>,
    pub price: Option<i64>,
    pub location: Option<String>,
    pub home_size: Option<i64>,
    pub home_type: Option<String>,
    pub limit: Option<u32>,
}

impl AdQuery {
    pub fn has_filters(&self) -> bool {
        self.source_name.is_some()
            || self.price.is_some()
            || self.location.is_some()
            || self.home_size.is_some()
            || self.home_type.is_some()
    }

    /// Checks every supplied filter against the catalog before anything
    /// reaches the database. `limit_cap` is only set for the all-ads page.
    pub fn validate(&self, catalog: &Catalog, limit_cap: Option<u32>) -> Result<(), FilterError> {
        if let Some(source) = &self.source_name {
            if !catalog.is_known_source(source) {
                return Err(FilterError::UnknownSource(source.clone()));
            }
        }
        if let Some(location) = &self.location {
            if !catalog.is_known_location(location) {
                return Err(FilterError::UnknownLocation(location.clone()));
            }
        }
        if let Some(home_type) = &self.home_type {
            if !catalog.is_known_home_type(home_type) {
                return Err(FilterError::UnknownHomeType(home_type.clone()));
            }
        }
        if let Some(price) = self.price {
            if price < 1 {
                return Err(FilterError::OutOfRange {
                    field: "price",
                    value: price,
                });
            }
        }
        if let Some(home_size) = self.home_size {
            if home_size < 1 {
                return Err(FilterError::OutOfRange {
                    field: "home_size",
                    value: home_size,
                });
            }
        }
        if let Some(limit) = self.limit {
            if limit < 1 {
                return Err(FilterError::OutOfRange {
                    field: "limit",
                    value: limit as i64,
                });
            }
            if let Some(cap) = limit_cap {
                if limit > cap {
                    return Err(FilterError::LimitTooLarge { cap, value: limit });
                }
            }
        }

        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FilterError {
    #[error("unknown source name: {0}")]
    UnknownSource(String),
    #[error("unknown location: {0}")]
    UnknownLocation(String),
    #[error("unknown home type: {0}")]
    UnknownHomeType(String),
    #[error("{field} must be at least 1, got {value}")]
    OutOfRange { field: &'static str, value: i64 },
    #[error("limit must be at most {cap}, got {value}")]
    LimitTooLarge { cap: u32, value: u32 },
}

// JSON Types

#[derive(Serialize)]
pub struct Failure {
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SourceCount {
    pub source_name: String,
    pub count: usize,
}

// Server Types

#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct StringError(pub String);

pub struct AppState {
    pub db: Database,
    pub catalog: Catalog,
}

pub type AppData = web::Data<AppState>;

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::default()
    }

    #[test]
    fn empty_query_has_no_filters() {
        let query = AdQuery::default();
        assert!(!query.has_filters());
        assert!(query.validate(&catalog(), None).is_ok());
    }

    #[test]
    fn limit_alone_is_not_a_filter() {
        let query = AdQuery {
            limit: Some(5),
            ..AdQuery::default()
        };
        assert!(!query.has_filters());
    }

    #[test]
    fn known_enum_values_pass() {
        let query = AdQuery {
            source_name: Some("yavlena".into()),
            location: Some("Младост 2".into()),
            home_type: Some("Двустаен".into()),
            ..AdQuery::default()
        };
        assert!(query.has_filters());
        assert!(query.validate(&catalog(), None).is_ok());
    }

    #[test]
    fn unknown_source_is_rejected() {
        let query = AdQuery {
            source_name: Some("invalid".into()),
            ..AdQuery::default()
        };
        assert!(matches!(
            query.validate(&catalog(), None),
            Err(FilterError::UnknownSource(_))
        ));
    }

    #[test]
    fn unknown_location_is_rejected() {
        let query = AdQuery {
            location: Some("Младост 1D".into()),
            ..AdQuery::default()
        };
        assert!(matches!(
            query.validate(&catalog(), None),
            Err(FilterError::UnknownLocation(_))
        ));
    }

    #[test]
    fn zero_price_is_rejected() {
        let query = AdQuery {
            price: Some(0),
            ..AdQuery::default()
        };
        assert!(matches!(
            query.validate(&catalog(), None),
            Err(FilterError::OutOfRange { field: "price", .. })
        ));
    }

    #[test]
    fn limit_cap_only_applies_when_set() {
        let query = AdQuery {
            limit: Some(500),
            ..AdQuery::default()
        };
        assert!(query.validate(&catalog(), None).is_ok());
        assert!(matches!(
            query.validate(&catalog(), Some(100)),
            Err(FilterError::LimitTooLarge {
                cap: 100,
                value: 500
            })
        ));
    }
}
