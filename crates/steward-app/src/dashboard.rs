// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use time::OffsetDateTime;

use crate::{ProgressBoard, RequestInbox, StudyBoard, StudyStatus};

/// Headline numbers for the dashboard, read from live board state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DashboardSnapshot {
    pub total_studies: usize,
    pub published: usize,
    pub drafts: usize,
    pub locked: usize,
    pub enrolled_users: u64,
    pub learners: usize,
    pub active_learners: usize,
    pub completion_rate: u8,
    pub unread_requests: usize,
}

impl DashboardSnapshot {
    pub fn capture(
        studies: &StudyBoard,
        progress: &ProgressBoard,
        requests: &RequestInbox,
        now: OffsetDateTime,
    ) -> Self {
        let collection = studies.collection();
        let count_status = |status: StudyStatus| {
            collection
                .iter()
                .filter(|study| study.status == status)
                .count()
        };
        let summary = progress.summary(now);
        Self {
            total_studies: collection.len(),
            published: count_status(StudyStatus::Published),
            drafts: count_status(StudyStatus::Draft),
            locked: collection.iter().filter(|study| study.is_locked).count(),
            enrolled_users: collection
                .iter()
                .map(|study| u64::from(study.enrolled_users))
                .sum(),
            learners: summary.total,
            active_learners: summary.active,
            completion_rate: summary.average_percent,
            unread_requests: requests.counts().unread,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::DashboardSnapshot;
    use crate::seed::{self, REFERENCE_NOW, reference_today};
    use crate::{Collection, ProgressBoard, RequestInbox, StudyBoard, StudyId};

    fn boards() -> (StudyBoard, ProgressBoard, RequestInbox) {
        (
            StudyBoard::new(Collection::from_records(seed::studies()).expect("seed studies")),
            ProgressBoard::new(Collection::from_records(seed::progress()).expect("seed progress")),
            RequestInbox::new(Collection::from_records(seed::requests()).expect("seed requests")),
        )
    }

    #[test]
    fn snapshot_of_seed_state() {
        let (studies, progress, requests) = boards();
        let snapshot = DashboardSnapshot::capture(&studies, &progress, &requests, REFERENCE_NOW);
        assert_eq!(
            snapshot,
            DashboardSnapshot {
                total_studies: 4,
                published: 3,
                drafts: 1,
                locked: 1,
                enrolled_users: 791,
                learners: 5,
                active_learners: 4,
                completion_rate: 82,
                unread_requests: 2,
            }
        );
    }

    #[test]
    fn snapshot_follows_mutations() {
        let (mut studies, progress, requests) = boards();
        studies.delete(StudyId::new(1));
        studies.toggle_lock(StudyId::new(2), reference_today());

        let snapshot = DashboardSnapshot::capture(&studies, &progress, &requests, REFERENCE_NOW);
        assert_eq!(snapshot.total_studies, 3);
        assert_eq!(snapshot.locked, 0);
        assert_eq!(snapshot.enrolled_users, 557);
    }
}
