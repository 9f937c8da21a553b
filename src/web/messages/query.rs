use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::erx::{Erx, Layouted, ResultE};
use crate::web::url::{FilterState, PAGE_KEY, SEARCH_KEY};

/// Query key overriding the source page size
pub const PAGE_SIZE_KEY: &str = "page_size";

pub const MAXIMUM_PAGE_SIZE: usize = 100;

/// 列表查询参数, decoded from a listing query string
#[derive(Clone, Debug, Serialize, Deserialize, Validate, PartialEq)]
pub struct ListQuery {
    #[validate(range(min = 1))]
    pub page: usize,
    #[validate(range(min = 1, max = MAXIMUM_PAGE_SIZE))]
    pub page_size: usize,
    #[validate(length(max = 120))]
    pub search: Option<String>,
    /// every other non-empty key, matched against item fields
    pub filters: Vec<(String, String)>,
}

impl ListQuery {
    /// Strict decode: a `page` or `page_size` present but not a number is rejected
    pub fn from_filters(filters: &FilterState, default_page_size: usize) -> ResultE<Self> {
        let number = |key: &str, default: usize| -> ResultE<usize> {
            match filters.get(key).map(|v| v.trim()).filter(|v| !v.is_empty()) {
                None => Ok(default),
                Some(v) => v
                    .parse::<usize>()
                    .map_err(|_| Erx::coded(Layouted::listing("QURY", "0001"), &format!("{} is not a number: {}", key, v))),
            }
        };

        let query = Self {
            page: number(PAGE_KEY, 1)?,
            page_size: number(PAGE_SIZE_KEY, default_page_size)?,
            search: filters.get(SEARCH_KEY).map(|s| s.trim().to_string()).filter(|s| !s.is_empty()),
            filters: filters
                .iter()
                .filter(|(k, v)| ![PAGE_KEY, PAGE_SIZE_KEY, SEARCH_KEY].contains(&k.as_str()) && !v.is_empty())
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        };

        query.validate().map_err(|e| Erx::coded(Layouted::listing("QURY", "0002"), &e.to_string()))?;
        Ok(query)
    }

    /// items skipped before this page, saturates for pages far past the end
    pub fn offset(&self) -> usize {
        self.page.saturating_sub(1).saturating_mul(self.page_size)
    }
}
