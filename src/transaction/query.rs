//! URL query parameters for the transaction list.

use serde::Deserialize;

use super::pipeline::{SortDirection, SortKey, TypeFilter, ViewParams};

/// The raw query parameters, any of which may be missing.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub search: Option<String>,
    #[serde(rename = "type")]
    pub type_filter: Option<TypeFilter>,
    pub sort: Option<SortKey>,
    pub dir: Option<SortDirection>,
}

impl From<ListQuery> for ViewParams {
    fn from(query: ListQuery) -> Self {
        Self {
            search: query.search.unwrap_or_default(),
            type_filter: query.type_filter.unwrap_or_default(),
            sort_key: query.sort.unwrap_or_default(),
            direction: query.dir.unwrap_or_default(),
        }
    }
}

impl ViewParams {
    /// Encode the params as a query string, without the leading '?'.
    pub fn to_query_string(&self) -> String {
        let pairs = [
            ("search", self.search.as_str()),
            ("type", self.type_filter.as_query_value()),
            ("sort", self.sort_key.as_query_value()),
            ("dir", self.direction.as_query_value()),
        ];

        match serde_urlencoded::to_string(pairs) {
            Ok(query) => query,
            Err(error) => {
                tracing::error!("Could not encode list query {self:?}: {error}");
                String::new()
            }
        }
    }

    /// `route` with the params appended as a query string.
    pub fn to_url(&self, route: &str) -> String {
        format!("{route}?{}", self.to_query_string())
    }
}
