use indexmap::IndexMap;
use std::collections::HashMap;
use tracing::error;

/// Reserved filter key holding the stringified current page
pub const PAGE_KEY: &str = "page";

/// Filter key written by the debounced search box
pub const SEARCH_KEY: &str = "search";

/// Filter state of a listing page, in the order keys were first seen
pub type FilterState = IndexMap<String, String>;

/// Join two url path
pub fn join(base: &str, other: &str) -> String {
    let be = base.ends_with('/');
    let os = other.starts_with('/');
    if be && os {
        return format!("{}{}", base, &other[1..]);
    }

    if !be && !os {
        return format!("{}/{}", base, other);
    }

    format!("{}{}", base, other)
}

/// Url encode
pub fn url_encode(val: &str) -> String {
    url::form_urlencoded::byte_serialize(val.as_bytes()).collect::<String>()
}

/// Url decode
/// `+` is kept as is, use parse_query for form encoded input
pub fn url_decode(val: &str) -> String {
    percent_encoding::percent_decode(val.as_bytes()).decode_utf8().unwrap_or_default().into()
}

/// Parse url query string, return a hashmap
/// url must be a valid absolute url
pub fn parse_url_query(url: &str) -> HashMap<String, String> {
    match url::Url::parse(url) {
        Ok(url) => url.query_pairs().into_owned().collect(),

        Err(err) => {
            error!("error {} parse:{}", err, url);
            HashMap::new()
        },
    }
}

/// Parse a bare query string, return a hashmap
pub fn parse_query(query: &str) -> HashMap<String, String> {
    url::form_urlencoded::parse(query.trim_start_matches('?').as_bytes()).into_owned().collect()
}

pub fn get_query_value(query: &str, name: &str) -> Option<String> {
    parse_query(query).get(name).cloned()
}

/// Build the query string of a listing page.
///
/// Entries of `existing` are copied in order, skipping the reserved `page` key
/// and every empty value. `extra_changes` is applied on top: a non-empty value
/// sets the key, an empty value removes it. `page` is always written last.
///
/// ```
/// use mentorclap::web::url::{build_query_string, FilterState};
///
/// let mut filters = FilterState::new();
/// filters.insert("search".into(), "".into());
/// filters.insert("city".into(), "bangalore".into());
/// filters.insert("page".into(), "4".into());
/// assert_eq!(build_query_string(&filters, 2, None), "city=bangalore&page=2");
/// ```
pub fn build_query_string(existing: &FilterState, page: usize, extra_changes: Option<&FilterState>) -> String {
    let mut merged: FilterState =
        existing.iter().filter(|(k, v)| k.as_str() != PAGE_KEY && !v.is_empty()).map(|(k, v)| (k.clone(), v.clone())).collect();

    if let Some(changes) = extra_changes {
        for (k, v) in changes.iter().filter(|(k, _)| k.as_str() != PAGE_KEY) {
            if v.is_empty() {
                merged.shift_remove(k);
            } else {
                merged.insert(k.clone(), v.clone());
            }
        }
    }

    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    for (k, v) in merged.iter() {
        serializer.append_pair(k, v);
    }
    serializer.append_pair(PAGE_KEY, &page.to_string());
    serializer.finish()
}

/// Decode a query string into filter state, unknown keys pass through untouched.
/// A repeated key keeps its first position and its last value.
pub fn parse_query_state(query: &str) -> FilterState {
    let mut state = FilterState::new();
    for (k, v) in url::form_urlencoded::parse(query.trim_start_matches('?').as_bytes()).into_owned() {
        state.insert(k, v);
    }
    state
}

/// Page number held by `filters`, 1 when absent or not a positive integer
pub fn page_of(filters: &FilterState) -> usize {
    filters.get(PAGE_KEY).and_then(|p| p.trim().parse::<usize>().ok()).filter(|p| *p >= 1).unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filters(pairs: &[(&str, &str)]) -> FilterState {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_join() {
        assert_eq!(join("http://api", "/blogs"), "http://api/blogs");
        assert_eq!(join("http://api/", "/blogs"), "http://api/blogs");
        assert_eq!(join("http://api", "blogs"), "http://api/blogs");
    }

    #[test]
    fn test_encode_decode() {
        assert_eq!(url_encode("maths & physics"), "maths+%26+physics");
        assert_eq!(url_decode("maths%20%26%20physics"), "maths & physics");
    }

    #[test]
    fn test_parse_url_query() {
        let q = parse_url_query("https://mentorclap.com/blog?search=exam+tips&page=3");
        assert_eq!(q.get("search").map(String::as_str), Some("exam tips"));
        assert_eq!(q.get("page").map(String::as_str), Some("3"));
        assert!(parse_url_query("not a url").is_empty());
        assert_eq!(get_query_value("?city=pune", "city"), Some("pune".to_string()));
    }

    #[test]
    fn test_build_keeps_insertion_order_page_last() {
        let f = filters(&[("search", "algebra"), ("city", "bangalore")]);
        assert_eq!(build_query_string(&f, 1, None), "search=algebra&city=bangalore&page=1");
    }

    #[test]
    fn test_build_drops_empty_and_stale_page() {
        let f = filters(&[("search", ""), ("city", "bangalore"), ("page", "4")]);
        assert_eq!(build_query_string(&f, 2, None), "city=bangalore&page=2");
        assert_eq!(build_query_string(&FilterState::new(), 1, None), "page=1");
    }

    #[test]
    fn test_build_applies_extra_changes() {
        let f = filters(&[("search", "old"), ("city", "pune"), ("mode", "online")]);

        let set = filters(&[("search", "calculus"), ("subject", "maths"), ("page", "9")]);
        assert_eq!(build_query_string(&f, 1, Some(&set)), "search=calculus&city=pune&mode=online&subject=maths&page=1");

        let clear = filters(&[("search", "")]);
        assert_eq!(build_query_string(&f, 3, Some(&clear)), "city=pune&mode=online&page=3");
    }

    #[test]
    fn test_build_encodes_values() {
        let f = filters(&[("search", "a+b = c&d")]);
        assert_eq!(build_query_string(&f, 1, None), "search=a%2Bb+%3D+c%26d&page=1");
    }

    #[test]
    fn test_parse_passes_unknown_keys() {
        let s = parse_query_state("?search=exam+tips&board=cbse&page=2&board=icse");
        assert_eq!(s.keys().collect::<Vec<_>>(), vec!["search", "board", "page"]);
        assert_eq!(s["search"], "exam tips");
        assert_eq!(s["board"], "icse");
        assert!(parse_query_state("").is_empty());
    }

    #[test]
    fn test_roundtrip_restores_non_empty_keys() {
        let f = filters(&[("search", "a&b"), ("city", ""), ("subject", "physics"), ("page", "7")]);
        let back = parse_query_state(&build_query_string(&f, 3, None));
        assert_eq!(back, filters(&[("search", "a&b"), ("subject", "physics"), ("page", "3")]));
    }

    #[test]
    fn test_page_of() {
        assert_eq!(page_of(&filters(&[("page", "5")])), 5);
        assert_eq!(page_of(&filters(&[("page", "0")])), 1);
        assert_eq!(page_of(&filters(&[("page", "abc")])), 1);
        assert_eq!(page_of(&FilterState::new()), 1);
    }
}
