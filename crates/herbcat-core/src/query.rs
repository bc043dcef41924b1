//! Filter → sort → limit pipeline over an enriched catalog snapshot.
//!
//! [`query`] is pure: it borrows the catalog, never reorders or mutates it,
//! and returns references in result order. Calling it again with the same
//! inputs yields the same output, so callers simply re-run it whenever the
//! search term, filter, sort key or limit changes.

use std::cmp::Ordering;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::catalog::{Price, Product};

/// Category filter value meaning "do not filter by category".
pub const ALL_CATEGORIES: &str = "all";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    /// Keep products whose stringified `category_id` equals this value.
    Id(String),
}

impl CategoryFilter {
    /// `"all"` selects every category; any other value is an id to match.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        if raw == ALL_CATEGORIES {
            CategoryFilter::All
        } else {
            CategoryFilter::Id(raw.to_owned())
        }
    }

    fn matches(&self, product: &Product) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Id(wanted) => product
                .category_id
                .is_some_and(|id| id.to_string() == *wanted),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str(ALL_CATEGORIES),
            CategoryFilter::Id(id) => f.write_str(id),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Name,
    PriceLow,
    PriceHigh,
}

impl SortKey {
    /// Parses `"name"`, `"price-low"` or `"price-high"`. Anything else sorts
    /// by name.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw {
            "price-low" => SortKey::PriceLow,
            "price-high" => SortKey::PriceHigh,
            _ => SortKey::Name,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::Name => "name",
            SortKey::PriceLow => "price-low",
            SortKey::PriceHigh => "price-high",
        }
    }
}

impl FromStr for SortKey {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters for one catalog query.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CatalogQuery {
    /// Case-insensitive substring matched against name, latin name and
    /// category name. Empty matches everything.
    pub search_term: String,
    pub category_filter: CategoryFilter,
    pub sort_key: SortKey,
    pub limit: Option<usize>,
}

impl CatalogQuery {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The query behind the home-page preview.
    #[must_use]
    pub fn preview(limit: usize) -> Self {
        Self::new().with_limit(Some(limit))
    }

    #[must_use]
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search_term = term.into();
        self
    }

    #[must_use]
    pub fn with_category(mut self, filter: CategoryFilter) -> Self {
        self.category_filter = filter;
        self
    }

    #[must_use]
    pub fn with_sort(mut self, sort_key: SortKey) -> Self {
        self.sort_key = sort_key;
        self
    }

    #[must_use]
    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }
}

/// Filters, sorts and caps `catalog` according to `q`.
///
/// Steps run in a fixed order: search term, category filter, stable sort,
/// then limit. The result never holds more items than `catalog`, nor more
/// than `q.limit` when one is set.
#[must_use]
pub fn query<'a>(catalog: &'a [Product], q: &CatalogQuery) -> Vec<&'a Product> {
    let needle = q.search_term.to_lowercase();

    let mut results: Vec<&Product> = catalog
        .iter()
        .filter(|p| matches_search(p, &needle))
        .filter(|p| q.category_filter.matches(p))
        .collect();

    match q.sort_key {
        SortKey::Name => results.sort_by_cached_key(|p| collation_key(&p.name)),
        SortKey::PriceLow => results.sort_by(|a, b| compare_price(a.price, b.price, false)),
        SortKey::PriceHigh => results.sort_by(|a, b| compare_price(a.price, b.price, true)),
    }

    if let Some(limit) = q.limit {
        results.truncate(limit);
    }

    results
}

fn matches_search(product: &Product, needle: &str) -> bool {
    needle.is_empty()
        || product.name.to_lowercase().contains(needle)
        || product.latin_name.to_lowercase().contains(needle)
        || product.category_name.to_lowercase().contains(needle)
}

/// Accent-folded, lowercased form used for name ordering, so `Échinacea`
/// sorts with the `e`s. Equal keys keep input order.
fn collation_key(name: &str) -> String {
    name.nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

/// Orders amounts in the requested direction. Unavailable prices sort after
/// every amount in both directions.
fn compare_price(a: Price, b: Price, descending: bool) -> Ordering {
    match (a, b) {
        (Price::Amount(x), Price::Amount(y)) if descending => y.cmp(&x),
        (Price::Amount(x), Price::Amount(y)) => x.cmp(&y),
        (Price::Amount(_), Price::Unavailable) => Ordering::Less,
        (Price::Unavailable, Price::Amount(_)) => Ordering::Greater,
        (Price::Unavailable, Price::Unavailable) => Ordering::Equal,
    }
}

#[cfg(test)]
#[path = "query_test.rs"]
mod tests;
