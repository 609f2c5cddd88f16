// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::view::{Searchable, StatusKey};
use crate::{PrayerRequest, ProgressRecord, RequestStatus, Study, StudyStatus};

const ALL_KEY: &str = "all";
const ALL_STUDIES_LABEL: &str = "All Studies";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StudyFilter {
    #[default]
    All,
    Published,
    Draft,
    Locked,
}

impl StudyFilter {
    pub const ALL: [Self; 4] = [Self::All, Self::Published, Self::Draft, Self::Locked];

    pub const fn label(self) -> &'static str {
        match self {
            Self::All => ALL_STUDIES_LABEL,
            Self::Published => "Published",
            Self::Draft => "Drafts",
            Self::Locked => "Locked",
        }
    }
}

impl StatusKey<Study> for StudyFilter {
    fn parse_key(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "published" => Self::Published,
            "draft" | "drafts" => Self::Draft,
            "locked" => Self::Locked,
            _ => Self::All,
        }
    }

    fn as_key(&self) -> &str {
        match self {
            Self::All => ALL_KEY,
            Self::Published => "published",
            Self::Draft => "draft",
            Self::Locked => "locked",
        }
    }

    fn matches(&self, study: &Study) -> bool {
        match self {
            Self::All => true,
            Self::Published => study.status == StudyStatus::Published,
            Self::Draft => study.status == StudyStatus::Draft,
            Self::Locked => study.is_locked,
        }
    }
}

impl Searchable for Study {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.title.as_str(), self.description.as_str()]
    }
}

/// Restricts the progress table to one study by exact name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum StudyScope {
    #[default]
    All,
    Study(String),
}

impl StatusKey<ProgressRecord> for StudyScope {
    fn parse_key(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty()
            || trimmed.eq_ignore_ascii_case(ALL_KEY)
            || trimmed.eq_ignore_ascii_case(ALL_STUDIES_LABEL)
        {
            return Self::All;
        }
        Self::Study(trimmed.to_owned())
    }

    fn as_key(&self) -> &str {
        match self {
            Self::All => ALL_KEY,
            Self::Study(name) => name,
        }
    }

    fn matches(&self, record: &ProgressRecord) -> bool {
        match self {
            Self::All => true,
            Self::Study(name) => record.study_name == *name,
        }
    }
}

impl Searchable for ProgressRecord {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.username.as_str(),
            self.email.as_str(),
            self.study_name.as_str(),
        ]
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RequestFilter {
    #[default]
    All,
    Status(RequestStatus),
}

impl RequestFilter {
    pub const ALL: [Self; 4] = [
        Self::All,
        Self::Status(RequestStatus::Unread),
        Self::Status(RequestStatus::Read),
        Self::Status(RequestStatus::Responded),
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "All Requests",
            Self::Status(RequestStatus::Unread) => "Unread",
            Self::Status(RequestStatus::Read) => "Read",
            Self::Status(RequestStatus::Responded) => "Responded",
        }
    }
}

impl StatusKey<PrayerRequest> for RequestFilter {
    fn parse_key(raw: &str) -> Self {
        RequestStatus::parse(raw.trim().to_ascii_lowercase().as_str())
            .map_or(Self::All, Self::Status)
    }

    fn as_key(&self) -> &str {
        match self {
            Self::All => ALL_KEY,
            Self::Status(status) => status.as_str(),
        }
    }

    fn matches(&self, request: &PrayerRequest) -> bool {
        match self {
            Self::All => true,
            Self::Status(status) => request.status == *status,
        }
    }
}

impl Searchable for PrayerRequest {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.requester_name.as_str(),
            self.requester_email.as_str(),
            self.message.as_str(),
            self.category.as_str(),
        ]
    }
}
