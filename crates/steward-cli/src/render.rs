// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::fmt::Write as _;
use steward_app::view::StatusKey;
use steward_app::{
    DashboardSnapshot, ProgressBoard, ProgressSummary, RequestCounts, RequestInbox, RequestStatus,
    StudyBoard, format_last_activity, format_time_spent,
};
use time::OffsetDateTime;

pub fn help() -> &'static str {
    "commands:
  dashboard                         headline numbers
  studies [search <text>|filter <all|published|draft|locked>|clear]
  studies lock|unlock|toggle|delete|publish|unpublish <id>
  progress [search <text>|study <name>|summary|clear]
  requests [search <text>|filter <all|unread|read|responded>|clear|counts]
  requests read|respond <id>
  upload study title=..; description=..; chapter=..; page=..; file=..
  upload devotion title=..; description=..; date=YYYY-MM-DD; category=..; file=..
  upload sermon title=..; speaker=..; date=YYYY-MM-DD; url=..|file=..; summary=..
  wait                              block until the running upload finishes
  quit
"
}

fn header(out: &mut String, name: &str, shown: usize, total: usize, status: &str, query: &str) {
    let _ = write!(out, "{name}: {shown} of {total}");
    if status != "all" {
        let _ = write!(out, " | filter: {status}");
    }
    if !query.is_empty() {
        let _ = write!(out, " | search: {query:?}");
    }
    out.push('\n');
}

pub fn studies(board: &StudyBoard) -> String {
    let view = board.view();
    let filters = board.filters();
    let mut out = String::new();
    header(
        &mut out,
        "studies",
        view.len(),
        board.collection().len(),
        filters.status.as_key(),
        &filters.query,
    );
    if view.is_empty() {
        out.push_str("  no studies match\n");
    }
    for study in view.iter() {
        let _ = writeln!(
            out,
            "  #{:<3} {:<32} [{}] {} chapters, {} enrolled, modified {}",
            study.id.get(),
            study.title,
            study.badge().label(),
            study.chapters,
            study.enrolled_users,
            study.last_modified,
        );
    }
    out
}

pub fn progress(board: &ProgressBoard, now: OffsetDateTime) -> String {
    let view = board.view();
    let filters = board.filters();
    let mut out = String::new();
    header(
        &mut out,
        "progress",
        view.len(),
        board.collection().len(),
        filters.status.as_key(),
        &filters.query,
    );
    if view.is_empty() {
        out.push_str("  no learners match\n");
    }
    for row in view.iter() {
        let _ = writeln!(
            out,
            "  #{:<3} {} <{}> | {} | {}/{} ({}%, {}) | {} | {}",
            row.id.get(),
            row.username,
            row.email,
            row.study_name,
            row.chapters_completed,
            row.total_chapters,
            row.percent_complete(),
            row.band().tone().as_str(),
            format_time_spent(row.time_spent),
            format_last_activity(row.last_activity, now),
        );
    }
    out
}

pub fn requests(inbox: &RequestInbox) -> String {
    let view = inbox.view();
    let filters = inbox.filters();
    let mut out = String::new();
    header(
        &mut out,
        "requests",
        view.len(),
        inbox.collection().len(),
        filters.status.as_key(),
        &filters.query,
    );
    if view.is_empty() {
        out.push_str("  no requests match\n");
    }
    for request in view.iter() {
        let _ = writeln!(
            out,
            "  #{:<3} [{}] {} <{}> | {} | {}\n        {}",
            request.id.get(),
            request.status,
            request.requester_name,
            request.requester_email,
            request.category,
            request.date,
            request.message,
        );
    }
    out
}

pub fn dashboard(snapshot: &DashboardSnapshot) -> String {
    format!(
        "dashboard
  studies: {} ({} published, {} drafts, {} locked)
  enrolled users: {}
  learners: {} ({} active today), completion rate {}%
  unread requests: {}
",
        snapshot.total_studies,
        snapshot.published,
        snapshot.drafts,
        snapshot.locked,
        snapshot.enrolled_users,
        snapshot.learners,
        snapshot.active_learners,
        snapshot.completion_rate,
        snapshot.unread_requests,
    )
}

pub fn progress_summary(summary: &ProgressSummary) -> String {
    format!(
        "learners: {} | completed: {} | average progress: {}% | active today: {}\n",
        summary.total, summary.completed, summary.average_percent, summary.active,
    )
}

pub fn request_counts(counts: RequestCounts) -> String {
    let mut out = String::new();
    for status in RequestStatus::ALL {
        let _ = write!(out, "{}: {} | ", status, counts.get(status));
    }
    let _ = writeln!(out, "total: {}", counts.total());
    out
}
