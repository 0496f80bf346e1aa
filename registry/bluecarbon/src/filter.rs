//! Text search and categorical filters shared by the console's list screens.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// The sentinel a filter menu uses for "no restriction".
pub const ALL: &str = "all";

/// Case-insensitive substring match of `query` against any of `fields`.
///
/// An empty query matches everything. Whitespace is matched literally.
pub fn matches_query(query: &str, fields: &[&str]) -> bool {
    let needle = query.to_lowercase();
    if needle.is_empty() {
        return true;
    }
    fields
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

/// Exact-match categorical filter with an "all" option.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum Filter<T> {
    All,
    Only(T),
}

impl<T> Default for Filter<T> {
    fn default() -> Self {
        Filter::All
    }
}

impl<T: PartialEq> Filter<T> {
    pub fn admits(&self, value: &T) -> bool {
        match self {
            Filter::All => true,
            Filter::Only(wanted) => wanted == value,
        }
    }
}

impl<T: FromStr> FromStr for Filter<T> {
    type Err = T::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == ALL {
            return Ok(Filter::All);
        }
        s.parse().map(Filter::Only)
    }
}

impl<T: fmt::Display> fmt::Display for Filter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Filter::All => f.write_str(ALL),
            Filter::Only(value) => fmt::Display::fmt(value, f),
        }
    }
}

/// Records that can be searched by free text.
pub trait Searchable {
    /// Fields the free-text query is matched against.
    fn search_fields(&self) -> Vec<&str>;

    fn matches(&self, query: &str) -> bool {
        matches_query(query, &self.search_fields())
    }
}

impl Searchable for crate::types::Project {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str()]
    }
}

impl Searchable for crate::queue::QueueProject {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.entity.as_str()]
    }
}

impl Searchable for crate::users::RegistryUser {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.email.as_str()]
    }
}

/// Records matching `query`, in their original order.
pub fn search<'a, T: Searchable>(records: &'a [T], query: &str) -> Vec<&'a T> {
    records.iter().filter(|record| record.matches(query)).collect()
}
