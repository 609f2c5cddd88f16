// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use std::path::PathBuf;
use steward_app::seed::REFERENCE_NOW;
use steward_app::{
    Collection, PrayerRequest, ProgressRecord, ProgressRecordId, RequestId, RequestStatus, Study,
    StudyBoard, StudyId, StudyStatus,
};
use time::{Date, Duration, OffsetDateTime};

const STUDY_SUBJECTS: [&str; 12] = [
    "Genesis",
    "Exodus",
    "Psalms",
    "Proverbs",
    "Isaiah",
    "Matthew",
    "Mark",
    "Luke",
    "John",
    "Romans",
    "Ephesians",
    "Revelation",
];

const STUDY_FORMATS: [&str; 6] = [
    "Foundations",
    "Verse by Verse",
    "Deep Dive",
    "For New Believers",
    "Small Group Guide",
    "in Context",
];

const FIRST_NAMES: [&str; 12] = [
    "Grace", "Daniel", "Ruth", "Samuel", "Esther", "Caleb", "Naomi", "Levi", "Hannah", "Micah",
    "Lydia", "Isaac",
];

const LAST_NAMES: [&str; 10] = [
    "Okafor", "Martinez", "Nguyen", "Schmidt", "Campbell", "Adeyemi", "Kowalski", "Rivera",
    "Park", "Osei",
];

const REQUEST_CATEGORIES: [&str; 5] = [
    "Prayer Request",
    "Spiritual Guidance",
    "Feedback",
    "Counseling",
    "Volunteering",
];

const WORDS: [&str; 24] = [
    "pray",
    "family",
    "healing",
    "strength",
    "guidance",
    "church",
    "faith",
    "hope",
    "community",
    "question",
    "study",
    "group",
    "week",
    "grateful",
    "support",
    "journey",
    "scripture",
    "sermon",
    "peace",
    "work",
    "comfort",
    "together",
    "encourage",
    "serve",
];

struct DeterministicRng {
    state: u64,
}

impl DeterministicRng {
    fn new(seed: u64) -> Self {
        let mut state = seed ^ 0x9E37_79B9_7F4A_7C15;
        if state == 0 {
            state = 0xA409_3822_299F_31D0;
        }
        Self { state }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);

        let mut x = self.state;
        x ^= x >> 13;
        x ^= x << 7;
        x ^= x >> 17;
        x
    }

    fn int_n(&mut self, n: usize) -> usize {
        if n <= 1 {
            return 0;
        }
        (self.next_u64() % (n as u64)) as usize
    }

    fn bool(&mut self) -> bool {
        (self.next_u64() & 1) == 1
    }
}

/// Generates plausible studies, learner progress and prayer requests from a
/// fixed seed. The same seed always yields the same records.
pub struct MinistryFaker {
    rng: DeterministicRng,
}

impl MinistryFaker {
    pub fn new(seed: u64) -> Self {
        let normalized = if seed == 0 { 1 } else { seed };
        Self {
            rng: DeterministicRng::new(normalized),
        }
    }

    pub fn int_n(&mut self, n: usize) -> usize {
        self.rng.int_n(n)
    }

    pub fn bool(&mut self) -> bool {
        self.rng.bool()
    }

    pub fn study(&mut self, id: i64) -> Study {
        let subject = self.pick(&STUDY_SUBJECTS);
        let format = self.pick(&STUDY_FORMATS);
        let created_at = self.date_before(REFERENCE_NOW.date(), 120);
        let last_modified = self.date_between(created_at, REFERENCE_NOW.date());
        Study {
            id: StudyId::new(id),
            title: format!("{subject} {format}"),
            description: self.sentence(6, 14),
            chapters: self.int_range(1, 24) as u32,
            enrolled_users: self.int_range(0, 400) as u32,
            is_locked: self.int_n(4) == 0,
            created_at,
            last_modified,
            status: if self.bool() {
                StudyStatus::Published
            } else {
                StudyStatus::Draft
            },
        }
    }

    pub fn progress_record(&mut self, id: i64, study_name: &str) -> ProgressRecord {
        let (first, last) = (self.pick(&FIRST_NAMES), self.pick(&LAST_NAMES));
        let total_chapters = self.int_range(1, 20) as u32;
        let chapters_completed = self.int_range(0, i64::from(total_chapters)) as u32;
        ProgressRecord {
            id: ProgressRecordId::new(id),
            username: format!("{first} {last}"),
            email: email_for(first, last),
            study_name: study_name.to_owned(),
            chapters_completed,
            total_chapters,
            last_activity: REFERENCE_NOW - Duration::minutes(self.int_range(0, 7 * 24 * 60)),
            enrolled_date: self.date_before(REFERENCE_NOW.date(), 90),
            time_spent: Duration::minutes(self.int_range(0, 60 * 60)),
        }
    }

    pub fn prayer_request(&mut self, id: i64) -> PrayerRequest {
        let (first, last) = (self.pick(&FIRST_NAMES), self.pick(&LAST_NAMES));
        PrayerRequest {
            id: RequestId::new(id),
            requester_name: format!("{first} {last}"),
            requester_email: email_for(first, last),
            message: self.sentence(8, 20),
            date: self.date_before(REFERENCE_NOW.date(), 30),
            status: RequestStatus::ALL[self.int_n(RequestStatus::ALL.len())],
            category: self.pick(&REQUEST_CATEGORIES).to_owned(),
        }
    }

    /// `count` studies with ids `1..=count`.
    pub fn studies(&mut self, count: usize) -> Vec<Study> {
        (1..=count as i64).map(|id| self.study(id)).collect()
    }

    /// `count` progress rows, each enrolled in one of `studies`.
    pub fn progress_records(&mut self, count: usize, studies: &[Study]) -> Vec<ProgressRecord> {
        (1..=count as i64)
            .map(|id| {
                let study_name = if studies.is_empty() {
                    self.pick(&STUDY_SUBJECTS).to_owned()
                } else {
                    studies[self.int_n(studies.len())].title.clone()
                };
                self.progress_record(id, &study_name)
            })
            .collect()
    }

    pub fn prayer_requests(&mut self, count: usize) -> Vec<PrayerRequest> {
        (1..=count as i64).map(|id| self.prayer_request(id)).collect()
    }

    /// A short substring of `text`, usable as a query that must match it.
    pub fn fragment_of(&mut self, text: &str) -> String {
        let chars: Vec<char> = text.chars().collect();
        if chars.is_empty() {
            return String::new();
        }
        let start = self.int_n(chars.len());
        let len = 1 + self.int_n((chars.len() - start).min(6));
        chars[start..start + len].iter().collect()
    }

    /// Randomly flips the ASCII case of each letter.
    pub fn scramble_case(&mut self, text: &str) -> String {
        text.chars()
            .map(|c| {
                if self.bool() {
                    c.to_ascii_uppercase()
                } else {
                    c.to_ascii_lowercase()
                }
            })
            .collect()
    }

    fn pick<'a>(&mut self, items: &'a [&'a str]) -> &'a str {
        items[self.rng.int_n(items.len())]
    }

    fn int_range(&mut self, min: i64, max: i64) -> i64 {
        if max <= min {
            return min;
        }
        let span = max - min + 1;
        min + (self.rng.next_u64() % (span as u64)) as i64
    }

    fn date_before(&mut self, end: Date, max_days: i64) -> Date {
        end - Duration::days(self.int_range(0, max_days))
    }

    fn date_between(&mut self, start: Date, end: Date) -> Date {
        let span = (end - start).whole_days();
        start + Duration::days(self.int_range(0, span))
    }

    fn sentence(&mut self, min_words: usize, max_words: usize) -> String {
        let count = self.int_range(min_words as i64, max_words as i64) as usize;
        let mut parts = Vec::with_capacity(count);
        for _ in 0..count {
            parts.push(self.pick(&WORDS).to_owned());
        }
        let mut sentence = parts.join(" ");
        if let Some(first) = sentence.get_mut(0..1) {
            first.make_ascii_uppercase();
        }
        sentence.push('.');
        sentence
    }
}

fn email_for(first: &str, last: &str) -> String {
    format!("{}.{}@example.com", first.to_lowercase(), last.to_lowercase())
}

/// A study board over `count` generated studies.
pub fn study_board(faker: &mut MinistryFaker, count: usize) -> Result<StudyBoard> {
    let studies = Collection::from_records(faker.studies(count)).context("build study board")?;
    Ok(StudyBoard::new(studies))
}

pub fn temp_config_path() -> Result<(tempfile::TempDir, PathBuf)> {
    let dir = tempfile::tempdir().context("create temp dir")?;
    let path = dir.path().join("config.toml");
    Ok((dir, path))
}

pub fn fixture_now() -> OffsetDateTime {
    REFERENCE_NOW
}

#[cfg(test)]
mod tests {
    use super::{MinistryFaker, study_board};
    use std::collections::{BTreeSet, HashSet};

    #[test]
    fn new_deterministic_seed() {
        let mut left = MinistryFaker::new(42);
        let mut right = MinistryFaker::new(42);
        assert_eq!(left.study(1), right.study(1));
        assert_eq!(left.prayer_request(1), right.prayer_request(1));
    }

    #[test]
    fn study() {
        let mut faker = MinistryFaker::new(1);
        let study = faker.study(7);
        assert_eq!(study.id.get(), 7);
        assert!(!study.title.is_empty());
        assert!(study.description.ends_with('.'));
        assert!((1..=24).contains(&study.chapters));
        assert!(study.created_at <= study.last_modified);
    }

    #[test]
    fn progress_record_never_exceeds_total() {
        let mut faker = MinistryFaker::new(3);
        for id in 0..200 {
            let row = faker.progress_record(id, "Romans Foundations");
            assert!(row.chapters_completed <= row.total_chapters);
            assert!(row.percent_complete() <= 100);
            assert!(row.email.ends_with("@example.com"));
        }
    }

    #[test]
    fn generated_ids_are_unique() {
        let mut faker = MinistryFaker::new(5);
        let studies = faker.studies(30);
        let ids: HashSet<_> = studies.iter().map(|study| study.id).collect();
        assert_eq!(ids.len(), 30);

        let rows = faker.progress_records(40, &studies);
        let titles: HashSet<_> = studies.iter().map(|study| study.title.as_str()).collect();
        assert!(rows.iter().all(|row| titles.contains(row.study_name.as_str())));
    }

    #[test]
    fn fragment_is_substring() {
        let mut faker = MinistryFaker::new(9);
        for _ in 0..100 {
            let text = faker.study(1).title;
            let fragment = faker.fragment_of(&text);
            assert!(!fragment.is_empty());
            assert!(text.contains(&fragment), "{fragment:?} not in {text:?}");
        }
        assert!(faker.fragment_of("").is_empty());
    }

    #[test]
    fn scramble_case_preserves_letters() {
        let mut faker = MinistryFaker::new(11);
        let scrambled = faker.scramble_case("Verse by Verse");
        assert_eq!(scrambled.to_lowercase(), "verse by verse");
    }

    #[test]
    fn variety_across_seeds() {
        let mut titles = BTreeSet::new();
        for seed in 0_u64..20_u64 {
            titles.insert(MinistryFaker::new(seed).study(1).title);
        }
        assert!(titles.len() >= 10, "got {}", titles.len());
    }

    #[test]
    fn study_board_fixture() {
        let mut faker = MinistryFaker::new(13);
        let board = study_board(&mut faker, 12).expect("board");
        assert_eq!(board.collection().len(), 12);
    }

    #[test]
    fn int_n() {
        let mut faker = MinistryFaker::new(42);
        for _ in 0..100 {
            assert!(faker.int_n(5) < 5);
        }
    }
}
