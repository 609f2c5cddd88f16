// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Derived views: the filtered subset of a collection a screen shows.

use std::fmt;

use crate::collection::{Collection, Record};

/// Fields a free-text query is matched against.
pub trait Searchable {
    fn search_fields(&self) -> Vec<&str>;
}

/// Status selector for one screen. Parsing never fails: unrecognized keys
/// select everything.
pub trait StatusKey<R>: Clone + Default + PartialEq + fmt::Debug {
    fn parse_key(raw: &str) -> Self;

    fn as_key(&self) -> &str;

    fn matches(&self, record: &R) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    Query,
    Status,
}

impl FilterField {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Query => "query",
            Self::Status => "status",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "query" | "search" => Some(Self::Query),
            "status" | "filter" | "study" => Some(Self::Status),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewFilters<S> {
    pub query: String,
    pub status: S,
}

impl<S: Default + PartialEq> ViewFilters<S> {
    pub fn is_empty(&self) -> bool {
        self.query.is_empty() && self.status == S::default()
    }
}

/// Case-insensitive substring match of `query` against any of `fields`.
pub fn matches_query(fields: &[&str], query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    fields
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

/// Projects `collection` through `filters`, keeping insertion order.
pub fn project<R, S>(collection: &Collection<R>, filters: &ViewFilters<S>) -> Collection<R>
where
    R: Record + Searchable,
    S: StatusKey<R>,
{
    let records = collection
        .shared()
        .iter()
        .filter(|record| {
            matches_query(&record.search_fields(), &filters.query)
                && filters.status.matches(record)
        })
        .cloned()
        .collect();
    Collection::from_shared(records)
}

#[cfg(test)]
mod tests {
    use super::{FilterField, matches_query};

    #[test]
    fn query_match_ignores_case() {
        assert!(matches_query(&["Advanced React Patterns"], "react"));
        assert!(matches_query(&["Advanced React Patterns"], "REACT"));
        assert!(!matches_query(&["Advanced React Patterns"], "rust"));
    }

    #[test]
    fn query_match_is_or_across_fields() {
        assert!(matches_query(&["John Doe", "john@example.com"], "EXAMPLE.COM"));
        assert!(matches_query(&[], ""));
        assert!(!matches_query(&[], "x"));
    }

    #[test]
    fn filter_field_aliases() {
        assert_eq!(FilterField::parse("search"), Some(FilterField::Query));
        assert_eq!(FilterField::parse("study"), Some(FilterField::Status));
        assert_eq!(FilterField::parse("order"), None);
    }
}
