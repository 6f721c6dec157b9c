//! # Item Query Engine
//!
//! Filter → paginate over the full item collection. Everything here is pure;
//! the caller supplies the collection it loaded from the store.
//!
//! Two response modes share one shape:
//!
//! - **Paginated** when `page` or `pageSize` is given: page-bounded results
//!   plus navigation metadata.
//! - **Legacy** otherwise: optional `limit` truncation, metadata describing
//!   the single page actually returned. `limit=0` returns nothing; a negative
//!   or non-numeric limit returns everything.

use serde::{Deserialize, Serialize};

use super::item::Item;

/// Page size used when `pageSize` is absent or unusable
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Raw query parameters as received on `GET /api/items`
///
/// Numbers stay strings here: malformed values fall back to defaults instead
/// of rejecting the request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemQuery {
    pub q: Option<String>,
    pub page: Option<String>,
    pub page_size: Option<String>,
    pub limit: Option<String>,
}

impl ItemQuery {
    /// Build from decoded `key=value` pairs
    ///
    /// The first occurrence of a repeated key wins; unknown keys are ignored.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut query = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_ref() {
                "q" => &mut query.q,
                "page" => &mut query.page,
                "pageSize" => &mut query.page_size,
                "limit" => &mut query.limit,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into());
            }
        }
        query
    }

    /// Free-text search term, if any
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.q = Some(term.into());
        self
    }

    /// Request a page (1-based) of the given size
    pub fn paged(mut self, page: usize, page_size: usize) -> Self {
        self.page = Some(page.to_string());
        self.page_size = Some(page_size.to_string());
        self
    }

    /// Legacy truncation
    pub fn limited(mut self, limit: usize) -> Self {
        self.limit = Some(limit.to_string());
        self
    }

    /// Decide which response mode applies
    pub fn mode(&self, default_page_size: usize) -> QueryMode {
        if is_present(&self.page) || is_present(&self.page_size) {
            QueryMode::Paginated {
                page: parse_positive_int(self.page.as_deref(), 1),
                page_size: parse_positive_int(self.page_size.as_deref(), default_page_size),
            }
        } else {
            QueryMode::Legacy {
                limit: self
                    .limit
                    .as_deref()
                    .and_then(parse_leading_int)
                    .and_then(|n| usize::try_from(n).ok()),
            }
        }
    }
}

/// Response mode selected by the query parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryMode {
    Paginated { page: usize, page_size: usize },
    Legacy { limit: Option<usize> },
}

/// Navigation metadata for a result page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: usize,
    pub items_per_page: usize,
    pub total_items: usize,
    pub total_pages: usize,
    pub has_next_page: bool,
    pub has_prev_page: bool,
}

impl Pagination {
    /// Metadata for page `current_page` of `total_items` split into pages of
    /// `items_per_page`
    pub fn paged(current_page: usize, items_per_page: usize, total_items: usize) -> Self {
        let total_pages = match items_per_page {
            0 => 0,
            n => total_items.div_ceil(n),
        };
        Self {
            current_page,
            items_per_page,
            total_items,
            total_pages,
            has_next_page: current_page < total_pages,
            has_prev_page: current_page > 1,
        }
    }

    /// Metadata describing a single page holding everything returned
    pub fn single_page(returned: usize) -> Self {
        Self {
            current_page: 1,
            items_per_page: returned,
            total_items: returned,
            total_pages: 1,
            has_next_page: false,
            has_prev_page: false,
        }
    }
}

/// Response body of `GET /api/items`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemPage {
    pub items: Vec<Item>,
    pub pagination: Pagination,
}

/// Run a query over the full collection
pub fn run_query(items: Vec<Item>, query: &ItemQuery, default_page_size: usize) -> ItemPage {
    let filtered = filter_items(items, query.q.as_deref());

    match query.mode(default_page_size) {
        QueryMode::Paginated { page, page_size } => paginate(filtered, page, page_size),
        QueryMode::Legacy { limit } => truncate(filtered, limit),
    }
}

/// Keep items whose name or category contains `term`, ignoring case
///
/// An absent or empty term keeps everything. Order is preserved.
pub fn filter_items(items: Vec<Item>, term: Option<&str>) -> Vec<Item> {
    match term {
        Some(term) if !term.is_empty() => {
            let needle = term.to_lowercase();
            items.into_iter().filter(|item| item.matches(&needle)).collect()
        }
        _ => items,
    }
}

/// Cut page `page` (1-based) of size `page_size` out of `items`
///
/// A page past the end is empty rather than clamped.
pub fn paginate(items: Vec<Item>, page: usize, page_size: usize) -> ItemPage {
    let total_items = items.len();
    let start = page.saturating_sub(1).saturating_mul(page_size).min(total_items);
    let end = start.saturating_add(page_size).min(total_items);

    let page_items: Vec<Item> = items.into_iter().skip(start).take(end - start).collect();

    ItemPage {
        items: page_items,
        pagination: Pagination::paged(page, page_size, total_items),
    }
}

/// Legacy mode: first `limit` items, or everything
pub fn truncate(mut items: Vec<Item>, limit: Option<usize>) -> ItemPage {
    if let Some(limit) = limit {
        items.truncate(limit);
    }
    let returned = items.len();
    ItemPage {
        items,
        pagination: Pagination::single_page(returned),
    }
}

/// Parse a positive integer, falling back to `default`
///
/// Missing, unparseable, zero and negative values all yield the default.
pub fn parse_positive_int(raw: Option<&str>, default: usize) -> usize {
    raw.and_then(parse_leading_int)
        .and_then(positive)
        .unwrap_or(default)
}

/// Lenient integer parse: surrounding whitespace, an optional sign, then the
/// leading run of digits. Anything after the digits is ignored, so `"3abc"`
/// is 3 and `"abc"` is nothing.
pub fn parse_leading_int(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if digits_end == 0 {
        return None;
    }

    let magnitude: i64 = rest[..digits_end].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

fn positive(n: i64) -> Option<usize> {
    if n > 0 {
        usize::try_from(n).ok()
    } else {
        None
    }
}

fn is_present(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.is_empty())
}
