//! Read-only catalog of entries the overlay can display.
//!
//! The catalog is built once from a literal table and shared behind an `Arc`.
//! Its iteration order is the order entry navigation walks through.

use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::Lazy;
use thiserror::Error;
use tracing::error;

use super::builtin::builtin_entries;
use super::CatalogEntry;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("catalog entry at position {0} has an empty id")]
    EmptyId(usize),
    #[error("duplicate catalog id: {0}")]
    DuplicateId(String),
}

/// Ordered, immutable collection of catalog entries keyed by id.
#[derive(Debug, Default)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Validate the table and build the id index.
    pub fn new(entries: Vec<CatalogEntry>) -> Result<Self, CatalogError> {
        let mut index = HashMap::with_capacity(entries.len());
        for (position, entry) in entries.iter().enumerate() {
            if entry.id.is_empty() {
                return Err(CatalogError::EmptyId(position));
            }
            if index.insert(entry.id.clone(), position).is_some() {
                return Err(CatalogError::DuplicateId(entry.id.clone()));
            }
        }
        Ok(Self { entries, index })
    }

    pub fn get(&self, id: &str) -> Option<&CatalogEntry> {
        self.position(id).map(|position| &self.entries[position])
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.iter()
    }

    /// Id of the entry `offset` steps away from `id`, wrapping at both ends.
    pub fn neighbor(&self, id: &str, offset: isize) -> Option<&str> {
        let len = self.entries.len();
        if len == 0 {
            return None;
        }
        let position = self.position(id)? as isize;
        let next = (position + offset).rem_euclid(len as isize) as usize;
        Some(self.entries[next].id.as_str())
    }
}

static BUILTIN: Lazy<Arc<Catalog>> = Lazy::new(|| match Catalog::new(builtin_entries()) {
    Ok(catalog) => Arc::new(catalog),
    Err(err) => {
        error!("Built-in catalog is invalid, starting empty: {}", err);
        Arc::new(Catalog::default())
    }
});

/// Process-wide built-in catalog.
pub fn builtin() -> Arc<Catalog> {
    BUILTIN.clone()
}
