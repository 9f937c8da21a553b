// One page of a listing, as served by the list api and consumed by page sources

use serde::{Deserialize, Serialize};

use super::pagination::PageState;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PagedList<T> {
    pub items: Vec<T>,
    pub total_count: usize,
    pub page: usize,
    pub page_size: usize,
}

impl<T> PagedList<T> {
    pub fn new(items: Vec<T>, total_count: usize, page: usize, page_size: usize) -> Self {
        Self { items, total_count, page, page_size }
    }

    pub fn page_state(&self) -> PageState {
        PageState::new(self.page, self.total_count, self.page_size.max(1))
    }
}
