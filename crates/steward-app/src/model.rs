// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};
use std::fmt;
use time::{Date, Duration, OffsetDateTime};

use crate::collection::Record;
use crate::ids::*;

/// Learners whose last activity falls inside this window count as active.
pub const ACTIVE_WINDOW: Duration = Duration::DAY;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tone {
    Success,
    Info,
    Warning,
    Danger,
}

impl Tone {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Danger => "danger",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StudyStatus {
    Published,
    Draft,
}

impl StudyStatus {
    pub const ALL: [Self; 2] = [Self::Published, Self::Draft];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Published => "published",
            Self::Draft => "draft",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "published" => Some(Self::Published),
            "draft" => Some(Self::Draft),
            _ => None,
        }
    }
}

impl fmt::Display for StudyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Badge shown next to a study. A lock overrides the stored status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StudyBadge {
    Locked,
    Published,
    Draft,
}

impl StudyBadge {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Locked => "Locked",
            Self::Published => "Published",
            Self::Draft => "Draft",
        }
    }

    pub const fn tone(self) -> Tone {
        match self {
            Self::Locked => Tone::Danger,
            Self::Published => Tone::Success,
            Self::Draft => Tone::Warning,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Study {
    pub id: StudyId,
    pub title: String,
    pub description: String,
    pub chapters: u32,
    pub enrolled_users: u32,
    pub is_locked: bool,
    pub created_at: Date,
    pub last_modified: Date,
    pub status: StudyStatus,
}

impl Study {
    pub fn badge(&self) -> StudyBadge {
        if self.is_locked {
            return StudyBadge::Locked;
        }
        match self.status {
            StudyStatus::Published => StudyBadge::Published,
            StudyStatus::Draft => StudyBadge::Draft,
        }
    }
}

impl Record for Study {
    type Id = StudyId;

    fn id(&self) -> StudyId {
        self.id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProgressBand {
    Complete,
    High,
    Medium,
    Low,
}

impl ProgressBand {
    pub const fn from_percent(percent: u8) -> Self {
        match percent {
            100..=u8::MAX => Self::Complete,
            75..=99 => Self::High,
            50..=74 => Self::Medium,
            _ => Self::Low,
        }
    }

    pub const fn tone(self) -> Tone {
        match self {
            Self::Complete => Tone::Success,
            Self::High => Tone::Info,
            Self::Medium => Tone::Warning,
            Self::Low => Tone::Danger,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressRecord {
    pub id: ProgressRecordId,
    pub username: String,
    pub email: String,
    pub study_name: String,
    pub chapters_completed: u32,
    pub total_chapters: u32,
    pub last_activity: OffsetDateTime,
    pub enrolled_date: Date,
    pub time_spent: Duration,
}

impl ProgressRecord {
    /// Rounded completion percentage derived from the chapter counts.
    pub fn percent_complete(&self) -> u8 {
        if self.total_chapters == 0 {
            return 0;
        }
        let total = u64::from(self.total_chapters);
        let done = u64::from(self.chapters_completed.min(self.total_chapters));
        ((done * 100 + total / 2) / total) as u8
    }

    pub fn is_complete(&self) -> bool {
        self.percent_complete() == 100
    }

    pub fn band(&self) -> ProgressBand {
        ProgressBand::from_percent(self.percent_complete())
    }

    pub fn is_active(&self, now: OffsetDateTime) -> bool {
        now - self.last_activity < ACTIVE_WINDOW
    }
}

impl Record for ProgressRecord {
    type Id = ProgressRecordId;

    fn id(&self) -> ProgressRecordId {
        self.id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestStatus {
    Unread,
    Read,
    Responded,
}

impl RequestStatus {
    pub const ALL: [Self; 3] = [Self::Unread, Self::Read, Self::Responded];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unread => "unread",
            Self::Read => "read",
            Self::Responded => "responded",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "unread" => Some(Self::Unread),
            "read" => Some(Self::Read),
            "responded" => Some(Self::Responded),
            _ => None,
        }
    }

    pub const fn tone(self) -> Tone {
        match self {
            Self::Unread => Tone::Warning,
            Self::Read => Tone::Info,
            Self::Responded => Tone::Success,
        }
    }

    /// Statuses only move forward. Re-applying the current status is allowed.
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Unread, _)
                | (Self::Read, Self::Read | Self::Responded)
                | (Self::Responded, Self::Responded)
        )
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrayerRequest {
    pub id: RequestId,
    pub requester_name: String,
    pub requester_email: String,
    pub message: String,
    pub date: Date,
    pub status: RequestStatus,
    pub category: String,
}

impl Record for PrayerRequest {
    type Id = RequestId;

    fn id(&self) -> RequestId {
        self.id
    }
}

pub fn format_time_spent(spent: Duration) -> String {
    let minutes = spent.whole_minutes().max(0);
    format!("{}h {}m", minutes / 60, minutes % 60)
}

pub fn format_last_activity(last_activity: OffsetDateTime, now: OffsetDateTime) -> String {
    let elapsed = now - last_activity;
    let plural = |count: i64, unit: &str| {
        if count == 1 {
            format!("1 {unit} ago")
        } else {
            format!("{count} {unit}s ago")
        }
    };
    if elapsed < Duration::MINUTE {
        "just now".to_owned()
    } else if elapsed < Duration::HOUR {
        plural(elapsed.whole_minutes(), "minute")
    } else if elapsed < Duration::DAY {
        plural(elapsed.whole_hours(), "hour")
    } else {
        plural(elapsed.whole_days(), "day")
    }
}
