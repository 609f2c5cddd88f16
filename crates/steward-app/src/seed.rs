// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Fixed records every session starts from. Relative values such as
//! "last active two hours ago" are anchored to [`REFERENCE_NOW`].

use time::macros::{date, datetime};
use time::{Date, Duration, OffsetDateTime};

use crate::{
    PrayerRequest, ProgressRecord, ProgressRecordId, RequestId, RequestStatus, Study, StudyId,
    StudyStatus,
};

pub const REFERENCE_NOW: OffsetDateTime = datetime!(2024-01-20 12:00 UTC);

pub fn reference_today() -> Date {
    REFERENCE_NOW.date()
}

pub fn studies() -> Vec<Study> {
    vec![
        Study {
            id: StudyId::new(1),
            title: "Advanced React Patterns".to_owned(),
            description: "Master advanced React concepts including hooks, context, and performance optimization.".to_owned(),
            chapters: 12,
            enrolled_users: 234,
            is_locked: false,
            created_at: date!(2024 - 01 - 15),
            last_modified: date!(2024 - 01 - 20),
            status: StudyStatus::Published,
        },
        Study {
            id: StudyId::new(2),
            title: "TypeScript Fundamentals".to_owned(),
            description: "Learn TypeScript from basics to advanced type system features.".to_owned(),
            chapters: 8,
            enrolled_users: 156,
            is_locked: true,
            created_at: date!(2024 - 01 - 10),
            last_modified: date!(2024 - 01 - 18),
            status: StudyStatus::Published,
        },
        Study {
            id: StudyId::new(3),
            title: "Node.js Backend Development".to_owned(),
            description: "Build scalable backend applications with Node.js and Express.".to_owned(),
            chapters: 15,
            enrolled_users: 89,
            is_locked: false,
            created_at: date!(2024 - 01 - 12),
            last_modified: date!(2024 - 01 - 19),
            status: StudyStatus::Draft,
        },
        Study {
            id: StudyId::new(4),
            title: "CSS Grid and Flexbox Mastery".to_owned(),
            description: "Modern CSS layout techniques for responsive web design.".to_owned(),
            chapters: 6,
            enrolled_users: 312,
            is_locked: false,
            created_at: date!(2024 - 01 - 08),
            last_modified: date!(2024 - 01 - 16),
            status: StudyStatus::Published,
        },
    ]
}

pub fn progress() -> Vec<ProgressRecord> {
    let row = |id: i64,
               username: &str,
               email: &str,
               study_name: &str,
               (completed, total): (u32, u32),
               active_ago: Duration,
               enrolled_date: Date,
               time_spent: Duration| ProgressRecord {
        id: ProgressRecordId::new(id),
        username: username.to_owned(),
        email: email.to_owned(),
        study_name: study_name.to_owned(),
        chapters_completed: completed,
        total_chapters: total,
        last_activity: REFERENCE_NOW - active_ago,
        enrolled_date,
        time_spent,
    };

    vec![
        row(
            1,
            "John Doe",
            "john@example.com",
            "Advanced React Patterns",
            (8, 12),
            Duration::hours(2),
            date!(2024 - 01 - 15),
            Duration::minutes(24 * 60 + 30),
        ),
        row(
            2,
            "Sarah Wilson",
            "sarah@example.com",
            "TypeScript Fundamentals",
            (6, 8),
            Duration::days(1),
            date!(2024 - 01 - 12),
            Duration::minutes(18 * 60 + 45),
        ),
        row(
            3,
            "Mike Johnson",
            "mike@example.com",
            "Node.js Backend Development",
            (15, 15),
            Duration::hours(3),
            date!(2024 - 01 - 10),
            Duration::minutes(42 * 60 + 15),
        ),
        row(
            4,
            "Emma Davis",
            "emma@example.com",
            "CSS Grid and Flexbox Mastery",
            (4, 6),
            Duration::hours(5),
            date!(2024 - 01 - 18),
            Duration::minutes(12 * 60 + 20),
        ),
        row(
            5,
            "Alex Chen",
            "alex@example.com",
            "Advanced React Patterns",
            (12, 12),
            Duration::hours(1),
            date!(2024 - 01 - 05),
            Duration::minutes(38 * 60 + 50),
        ),
    ]
}

pub fn requests() -> Vec<PrayerRequest> {
    vec![
        PrayerRequest {
            id: RequestId::new(1),
            requester_name: "Sarah Johnson".to_owned(),
            requester_email: "sarah.j@example.com".to_owned(),
            message: "Please pray for my family during this difficult time. My father is in the hospital and we need strength and healing.".to_owned(),
            date: date!(2024 - 01 - 15),
            status: RequestStatus::Unread,
            category: "Prayer Request".to_owned(),
        },
        PrayerRequest {
            id: RequestId::new(2),
            requester_name: "Michael Chen".to_owned(),
            requester_email: "michael.chen@example.com".to_owned(),
            message: "I would like to know more about baptism and what it means in our faith. Can someone guide me through this?".to_owned(),
            date: date!(2024 - 01 - 14),
            status: RequestStatus::Read,
            category: "Spiritual Guidance".to_owned(),
        },
        PrayerRequest {
            id: RequestId::new(3),
            requester_name: "Emma Davis".to_owned(),
            requester_email: "emma.davis@example.com".to_owned(),
            message: "Thank you for the wonderful sermon last Sunday. It really spoke to my heart and helped me through a tough week.".to_owned(),
            date: date!(2024 - 01 - 13),
            status: RequestStatus::Responded,
            category: "Feedback".to_owned(),
        },
        PrayerRequest {
            id: RequestId::new(4),
            requester_name: "James Wilson".to_owned(),
            requester_email: "james.w@example.com".to_owned(),
            message: "I am struggling with doubt and would appreciate counseling or someone to talk to about my faith journey.".to_owned(),
            date: date!(2024 - 01 - 12),
            status: RequestStatus::Unread,
            category: "Counseling".to_owned(),
        },
    ]
}
