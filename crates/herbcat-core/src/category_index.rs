//! Category id → name lookup used to denormalize products.
//!
//! The backend only returns `category_id` on products, so the name is joined
//! client-side. The index is always rebuilt from a freshly fetched category
//! list; it has no way to be patched.

use std::collections::HashMap;

use crate::catalog::Category;

#[derive(Debug, Clone, Default)]
pub struct CategoryIndex {
    names: HashMap<i64, String>,
}

impl CategoryIndex {
    /// Builds the index in one pass. If the list repeats an id, the last
    /// occurrence wins.
    #[must_use]
    pub fn build(categories: &[Category]) -> Self {
        let names = categories
            .iter()
            .map(|c| (c.id, c.name.clone()))
            .collect();
        Self { names }
    }

    /// Returns the category name for `id`, or `""` when the id is unknown.
    #[must_use]
    pub fn lookup(&self, id: i64) -> &str {
        self.names.get(&id).map_or("", String::as_str)
    }

    #[must_use]
    pub fn contains(&self, id: i64) -> bool {
        self.names.contains_key(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
