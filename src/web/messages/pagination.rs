use serde::{Deserialize, Serialize};

use crate::web::url::{build_query_string, FilterState};

/// Page position of a listing
/// `total_pages` is always derived from the item count, never set directly
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageState {
    pub current_page: usize,
    pub total_pages: usize,
    pub page_size: usize,
}

impl PageState {
    /// # Panics
    /// * if `page_size` is 0
    pub fn new(current_page: usize, total_items: usize, page_size: usize) -> Self {
        assert!(page_size > 0, "page_size must be positive");
        Self { current_page, total_pages: total_items.div_ceil(page_size), page_size }
    }

    /// current page pulled into `[1, max(total_pages, 1)]`
    pub fn clamped(self) -> Self {
        Self { current_page: self.current_page.clamp(1, self.total_pages.max(1)), ..self }
    }

    pub fn with_total_items(self, total_items: usize) -> Self {
        Self::new(self.current_page, total_items, self.page_size).clamped()
    }

    /// a single page (or none) renders no pagination control at all
    pub fn should_render(&self) -> bool {
        self.total_pages > 1
    }

    pub fn has_prev(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    pub fn contains(&self, page: usize) -> bool {
        page >= 1 && page <= self.total_pages
    }

    pub fn offset(&self) -> usize {
        self.current_page.saturating_sub(1).saturating_mul(self.page_size)
    }
}

/// Page numbers to render as clickable controls, ascending and contiguous.
///
/// The window is centred on `current_page` when possible and re-anchored
/// against either end. `current_page` is not validated: out of range input
/// produces the window nearest to it.
///
/// # Panics
/// * if `max_visible` is 0
///
/// ```
/// use mentorclap::web::messages::pagination::compute_window;
/// assert_eq!(compute_window(5, 10, 5), vec![3, 4, 5, 6, 7]);
/// ```
pub fn compute_window(current_page: usize, total_pages: usize, max_visible: usize) -> Vec<usize> {
    assert!(max_visible >= 1, "max_visible must be at least 1");
    if total_pages == 0 {
        return Vec::new();
    }

    let half = max_visible / 2;
    let mut start = current_page.saturating_sub(half).max(1);
    let end = total_pages.min(start.saturating_add(max_visible - 1));
    if end < start || end - start + 1 < max_visible {
        start = end.saturating_add(1).saturating_sub(max_visible).max(1);
    }

    (start..=end).collect()
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLink {
    pub page: usize,
    pub href: String,
    pub active: bool,
}

/// Render model of a pagination control
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationControls {
    pub prev: Option<PageLink>,
    pub next: Option<PageLink>,
    pub pages: Vec<PageLink>,
}

impl PaginationControls {
    /// None when the listing fits on a single page
    pub fn build(path: &str, filters: &FilterState, state: &PageState, max_visible: usize) -> Option<Self> {
        if !state.should_render() {
            return None;
        }

        let state = state.clamped();
        let link = |page: usize| PageLink {
            page,
            href: format!("{}?{}", path, build_query_string(filters, page, None)),
            active: page == state.current_page,
        };

        let pages = compute_window(state.current_page, state.total_pages, max_visible).into_iter().map(&link).collect();
        let prev = state.has_prev().then(|| link(state.current_page - 1));
        let next = state.has_next().then(|| link(state.current_page + 1));

        Some(Self { prev, next, pages })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_windows() {
        assert_eq!(compute_window(3, 10, 5), vec![1, 2, 3, 4, 5]);
        assert_eq!(compute_window(8, 10, 5), vec![6, 7, 8, 9, 10]);
        assert_eq!(compute_window(5, 10, 5), vec![3, 4, 5, 6, 7]);
    }

    #[test]
    fn test_short_listing_shows_every_page() {
        assert_eq!(compute_window(2, 3, 5), vec![1, 2, 3]);
        assert_eq!(compute_window(1, 1, 5), vec![1]);
        assert!(compute_window(1, 0, 5).is_empty());
    }

    #[test]
    fn test_window_properties_for_valid_pages() {
        for max_visible in 1..=7 {
            for total in 1..=15 {
                for current in 1..=total {
                    let w = compute_window(current, total, max_visible);
                    assert_eq!(w.len(), max_visible.min(total), "len {current}/{total}/{max_visible}");
                    assert!(w.contains(&current), "contains {current}/{total}/{max_visible}");
                    assert!(w.windows(2).all(|p| p[1] == p[0] + 1), "contiguous {current}/{total}/{max_visible}");
                }
            }
        }
    }

    #[test]
    fn test_out_of_range_current_is_tolerated() {
        assert_eq!(compute_window(0, 10, 5), vec![1, 2, 3, 4, 5]);
        assert_eq!(compute_window(42, 10, 5), vec![6, 7, 8, 9, 10]);
        assert_eq!(compute_window(usize::MAX, 10, 5), vec![6, 7, 8, 9, 10]);
        assert_eq!(compute_window(usize::MAX, 10, 1), vec![10]);
    }

    #[test]
    #[should_panic(expected = "max_visible")]
    fn test_zero_max_visible_panics() {
        compute_window(1, 10, 0);
    }

    #[test]
    fn test_page_state_derivation() {
        let s = PageState::new(9, 41, 10);
        assert_eq!(s.total_pages, 5);
        assert_eq!(s.clamped().current_page, 5);
        assert_eq!(PageState::new(0, 41, 10).clamped().current_page, 1);
        assert_eq!(PageState::new(3, 0, 10).clamped().current_page, 1);
        assert_eq!(PageState::new(2, 20, 10).offset(), 10);
        assert_eq!(PageState::new(usize::MAX, 20, 10).offset(), usize::MAX);
        assert!(!PageState::new(1, 10, 10).should_render());
        assert!(PageState::new(1, 11, 10).should_render());
    }

    #[test]
    fn test_controls_hidden_for_single_page() {
        let f = FilterState::new();
        assert!(PaginationControls::build("/blog", &f, &PageState::new(1, 7, 10), 5).is_none());
        assert!(PaginationControls::build("/blog", &f, &PageState::new(1, 0, 10), 5).is_none());
    }

    #[test]
    fn test_controls_links() {
        let mut f = FilterState::new();
        f.insert("search".into(), "exam".into());
        f.insert("page".into(), "1".into());

        let c = PaginationControls::build("/blog", &f, &PageState::new(1, 25, 10), 5).unwrap();
        assert!(c.prev.is_none());
        assert_eq!(c.next.as_ref().map(|l| l.href.as_str()), Some("/blog?search=exam&page=2"));
        assert_eq!(c.pages.iter().map(|l| l.page).collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(c.pages.iter().filter(|l| l.active).count(), 1);
        assert!(c.pages[0].active);

        let c = PaginationControls::build("/blog", &f, &PageState::new(3, 25, 10), 5).unwrap();
        assert_eq!(c.prev.map(|l| l.page), Some(2));
        assert!(c.next.is_none());
    }
}
