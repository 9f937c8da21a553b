use async_trait::async_trait;
use tracing::debug;

use crate::erx::ResultE;
use crate::web::messages::list::PagedList;
use crate::web::messages::query::ListQuery;
use crate::web::url::parse_query_state;

/// Anything able to answer a listing query string with one page of items.
/// Failures are returned to the owning page untouched.
#[async_trait]
pub trait PageSource<T>: Send + Sync {
    async fn fetch_page(&self, query: &str) -> ResultE<PagedList<T>>;
}

/// An item a memory source can search and filter
pub trait Listable {
    /// text the search box matches against
    fn search_text(&self) -> String;

    /// value of a filterable field, None when the item has no such field
    fn field(&self, key: &str) -> Option<String>;
}

/// Paged source over an in-memory collection
pub struct MemorySource<T> {
    items: Vec<T>,
    page_size: usize,
}

impl<T: Listable + Clone> MemorySource<T> {
    pub fn new(items: Vec<T>, page_size: usize) -> Self {
        Self { items, page_size: page_size.max(1) }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn matches(item: &T, query: &ListQuery) -> bool {
        if let Some(search) = &query.search {
            if !item.search_text().to_lowercase().contains(&search.to_lowercase()) {
                return false;
            }
        }

        query.filters.iter().all(|(key, wanted)| match item.field(key) {
            Some(value) => value.eq_ignore_ascii_case(wanted),
            None => true,
        })
    }

    /// Synchronous core of `fetch_page`
    pub fn page(&self, query: &str) -> ResultE<PagedList<T>> {
        let query = ListQuery::from_filters(&parse_query_state(query), self.page_size)?;
        let matched: Vec<&T> = self.items.iter().filter(|item| Self::matches(item, &query)).collect();

        let items: Vec<T> = matched.iter().skip(query.offset()).take(query.page_size).map(|item| (*item).clone()).collect();
        debug!("memory page {} size {} matched {} returned {}", query.page, query.page_size, matched.len(), items.len());

        Ok(PagedList::new(items, matched.len(), query.page, query.page_size))
    }
}

#[async_trait]
impl<T> PageSource<T> for MemorySource<T>
where
    T: Listable + Clone + Send + Sync,
{
    async fn fetch_page(&self, query: &str) -> ResultE<PagedList<T>> {
        self.page(query)
    }
}
