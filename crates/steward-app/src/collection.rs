// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Ordered, id-keyed record collections with copy-on-write mutations.
//!
//! Every mutation returns a fresh [`Collection`] and leaves the receiver
//! untouched. Records that a mutation does not target are shared with the
//! previous collection through their `Arc`, so unaffected rows keep their
//! identity across updates.

use std::collections::HashSet;
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

use crate::error::CollectionError;

pub trait Record {
    type Id: Copy + Eq + Hash + fmt::Debug + fmt::Display;

    fn id(&self) -> Self::Id;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOutcome {
    Applied,
    NotFound,
}

impl MutationOutcome {
    pub const fn is_applied(self) -> bool {
        matches!(self, Self::Applied)
    }
}

#[derive(Debug)]
pub struct Mutation<R> {
    pub collection: Collection<R>,
    pub outcome: MutationOutcome,
}

#[derive(Debug, PartialEq)]
pub struct Collection<R> {
    records: Vec<Arc<R>>,
}

impl<R> Clone for Collection<R> {
    fn clone(&self) -> Self {
        Self {
            records: self.records.clone(),
        }
    }
}

impl<R> Default for Collection<R> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
        }
    }
}

impl<R: Record> Collection<R> {
    pub fn from_records<I>(records: I) -> Result<Self, CollectionError>
    where
        I: IntoIterator<Item = R>,
    {
        let mut seen = HashSet::new();
        let mut shared = Vec::new();
        for record in records {
            let id = record.id();
            if !seen.insert(id) {
                return Err(CollectionError::DuplicateId { id: id.to_string() });
            }
            shared.push(Arc::new(record));
        }
        Ok(Self { records: shared })
    }

    /// Builds a collection from records already known to carry unique ids,
    /// such as a filtered subset of another collection.
    pub(crate) fn from_shared(records: Vec<Arc<R>>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &R> {
        self.records.iter().map(Arc::as_ref)
    }

    pub fn shared(&self) -> &[Arc<R>] {
        &self.records
    }

    pub fn ids(&self) -> Vec<R::Id> {
        self.iter().map(Record::id).collect()
    }

    pub fn get(&self, id: R::Id) -> Option<&R> {
        self.iter().find(|record| record.id() == id)
    }

    pub fn contains(&self, id: R::Id) -> bool {
        self.position(id).is_some()
    }

    fn position(&self, id: R::Id) -> Option<usize> {
        self.records.iter().position(|record| record.id() == id)
    }

    /// Replaces the record matching `id` with `update(record)`. The updated
    /// record keeps its position; its id must not change.
    pub fn with_updated<F>(&self, id: R::Id, update: F) -> Mutation<R>
    where
        F: FnOnce(&R) -> R,
    {
        let Some(index) = self.position(id) else {
            return self.unchanged();
        };

        let replacement = update(&self.records[index]);
        debug_assert!(replacement.id() == id, "update must preserve record id");

        let mut records = self.records.clone();
        records[index] = Arc::new(replacement);
        Mutation {
            collection: Self { records },
            outcome: MutationOutcome::Applied,
        }
    }

    pub fn without(&self, id: R::Id) -> Mutation<R> {
        let Some(index) = self.position(id) else {
            return self.unchanged();
        };

        let mut records = self.records.clone();
        records.remove(index);
        Mutation {
            collection: Self { records },
            outcome: MutationOutcome::Applied,
        }
    }

    fn unchanged(&self) -> Mutation<R> {
        Mutation {
            collection: self.clone(),
            outcome: MutationOutcome::NotFound,
        }
    }
}
