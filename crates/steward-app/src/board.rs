// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use time::{Date, OffsetDateTime};
use tracing::{debug, warn};

use crate::collection::{Collection, Mutation, MutationOutcome, Record};
use crate::error::TransitionError;
use crate::view::{FilterField, Searchable, StatusKey, ViewFilters, project};
use crate::{
    PrayerRequest, ProgressRecord, RequestFilter, RequestId, RequestStatus, Study, StudyFilter,
    StudyId, StudyScope, StudyStatus,
};

/// One management screen: a collection plus the filters its view is
/// projected through.
#[derive(Debug, Clone)]
pub struct Board<R, S> {
    collection: Collection<R>,
    filters: ViewFilters<S>,
}

pub type StudyBoard = Board<Study, StudyFilter>;
pub type ProgressBoard = Board<ProgressRecord, StudyScope>;
pub type RequestInbox = Board<PrayerRequest, RequestFilter>;

impl<R, S> Board<R, S>
where
    R: Record + Searchable,
    S: StatusKey<R>,
{
    pub fn new(collection: Collection<R>) -> Self {
        Self {
            collection,
            filters: ViewFilters::default(),
        }
    }

    pub fn collection(&self) -> &Collection<R> {
        &self.collection
    }

    pub fn filters(&self) -> &ViewFilters<S> {
        &self.filters
    }

    pub fn set_filter(&mut self, field: FilterField, value: &str) {
        match field {
            FilterField::Query => self.filters.query = value.to_owned(),
            FilterField::Status => self.filters.status = S::parse_key(value),
        }
        debug!(
            field = field.as_str(),
            query = %self.filters.query,
            status = self.filters.status.as_key(),
            "filter changed"
        );
    }

    pub fn clear_filters(&mut self) {
        self.filters = ViewFilters::default();
    }

    pub fn replace_collection(&mut self, collection: Collection<R>) {
        debug!(records = collection.len(), "collection replaced");
        self.collection = collection;
    }

    pub fn view(&self) -> Collection<R> {
        project(&self.collection, &self.filters)
    }

    pub fn delete(&mut self, id: R::Id) -> MutationOutcome {
        let mutation = self.collection.without(id);
        self.commit("delete", id, mutation)
    }

    fn commit(
        &mut self,
        operation: &'static str,
        id: R::Id,
        mutation: Mutation<R>,
    ) -> MutationOutcome {
        match mutation.outcome {
            MutationOutcome::Applied => debug!(operation, %id, "mutation applied"),
            MutationOutcome::NotFound => warn!(operation, %id, "mutation target not found"),
        }
        self.collection = mutation.collection;
        mutation.outcome
    }
}

impl Board<Study, StudyFilter> {
    pub fn toggle_lock(&mut self, id: StudyId, today: Date) -> MutationOutcome {
        let mutation = self.collection.with_updated(id, |study| Study {
            is_locked: !study.is_locked,
            last_modified: today,
            ..study.clone()
        });
        self.commit("toggle_lock", id, mutation)
    }

    /// Sets the lock flag. A study already in the requested state is left
    /// untouched, `last_modified` included.
    pub fn set_lock(&mut self, id: StudyId, locked: bool, today: Date) -> MutationOutcome {
        if self.is_locked(id) == Some(locked) {
            debug!(%id, locked, "lock already in requested state");
            return MutationOutcome::Applied;
        }
        let mutation = self.collection.with_updated(id, |study| Study {
            is_locked: locked,
            last_modified: today,
            ..study.clone()
        });
        self.commit("set_lock", id, mutation)
    }

    pub fn set_status(&mut self, id: StudyId, status: StudyStatus, today: Date) -> MutationOutcome {
        let mutation = self.collection.with_updated(id, |study| Study {
            status,
            last_modified: today,
            ..study.clone()
        });
        self.commit("set_status", id, mutation)
    }

    pub fn is_locked(&self, id: StudyId) -> Option<bool> {
        self.collection.get(id).map(|study| study.is_locked)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProgressSummary {
    pub total: usize,
    pub completed: usize,
    pub average_percent: u8,
    pub active: usize,
}

impl Board<ProgressRecord, StudyScope> {
    /// Summary over the whole collection, independent of the active filters.
    pub fn summary(&self, now: OffsetDateTime) -> ProgressSummary {
        let total = self.collection.len();
        if total == 0 {
            return ProgressSummary::default();
        }
        let percent_sum: usize = self
            .collection
            .iter()
            .map(|row| usize::from(row.percent_complete()))
            .sum();
        ProgressSummary {
            total,
            completed: self.collection.iter().filter(|row| row.is_complete()).count(),
            average_percent: ((percent_sum + total / 2) / total) as u8,
            active: self.collection.iter().filter(|row| row.is_active(now)).count(),
        }
    }

    /// Distinct study names in first-seen order, for the study selector.
    pub fn study_options(&self) -> Vec<String> {
        let mut options: Vec<String> = Vec::new();
        for row in self.collection.iter() {
            if !options.contains(&row.study_name) {
                options.push(row.study_name.clone());
            }
        }
        options
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RequestCounts {
    pub unread: usize,
    pub read: usize,
    pub responded: usize,
}

impl RequestCounts {
    pub const fn get(self, status: RequestStatus) -> usize {
        match status {
            RequestStatus::Unread => self.unread,
            RequestStatus::Read => self.read,
            RequestStatus::Responded => self.responded,
        }
    }

    pub const fn total(self) -> usize {
        self.unread + self.read + self.responded
    }
}

impl Board<PrayerRequest, RequestFilter> {
    pub fn update_status(
        &mut self,
        id: RequestId,
        next: RequestStatus,
    ) -> Result<MutationOutcome, TransitionError> {
        if let Some(request) = self.collection.get(id)
            && !request.status.can_transition_to(next)
        {
            warn!(%id, from = %request.status, to = %next, "request transition rejected");
            return Err(TransitionError::Backwards {
                id,
                from: request.status,
                to: next,
            });
        }

        let mutation = self.collection.with_updated(id, |request| PrayerRequest {
            status: next,
            ..request.clone()
        });
        Ok(self.commit("update_status", id, mutation))
    }

    pub fn counts(&self) -> RequestCounts {
        let mut counts = RequestCounts::default();
        for request in self.collection.iter() {
            match request.status {
                RequestStatus::Unread => counts.unread += 1,
                RequestStatus::Read => counts.read += 1,
                RequestStatus::Responded => counts.responded += 1,
            }
        }
        counts
    }
}
