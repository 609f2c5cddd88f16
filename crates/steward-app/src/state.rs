// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use time::{Date, OffsetDateTime};

use crate::seed;
use crate::{
    Collection, DashboardSnapshot, FilterField, FormPayload, MutationOutcome, ProgressBoard,
    RequestId, RequestInbox, RequestStatus, StudyBoard, StudyId, StudyStatus, UploadReceipt,
    UploadSlot, UploadTicket,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Studies,
    Progress,
    Requests,
}

impl Screen {
    pub const ALL: [Self; 3] = [Self::Studies, Self::Progress, Self::Requests];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Studies => "studies",
            Self::Progress => "progress",
            Self::Requests => "requests",
        }
    }

    const fn noun(self) -> &'static str {
        match self {
            Self::Studies => "study",
            Self::Progress => "progress record",
            Self::Requests => "request",
        }
    }
}

#[derive(Debug, Clone)]
pub struct AdminState {
    pub studies: StudyBoard,
    pub progress: ProgressBoard,
    pub requests: RequestInbox,
    pub upload: UploadSlot,
    pub status_line: Option<String>,
    pub now: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminCommand {
    SetFilter {
        screen: Screen,
        field: FilterField,
        value: String,
    },
    ClearFilters(Screen),
    ToggleStudyLock(StudyId),
    SetStudyLock {
        id: StudyId,
        locked: bool,
    },
    SetStudyStatus {
        id: StudyId,
        status: StudyStatus,
    },
    DeleteStudy(StudyId),
    SetRequestStatus {
        id: RequestId,
        status: RequestStatus,
    },
    BeginUpload(FormPayload),
    FinishUpload(UploadTicket),
    ClearStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminEvent {
    FilterChanged {
        screen: Screen,
        field: FilterField,
        value: String,
    },
    FiltersCleared(Screen),
    StudyLockChanged {
        id: StudyId,
        locked: bool,
    },
    StudyStatusChanged {
        id: StudyId,
        status: StudyStatus,
    },
    StudyDeleted(StudyId),
    RequestStatusChanged {
        id: RequestId,
        status: RequestStatus,
    },
    NotFound {
        screen: Screen,
        id: i64,
    },
    Rejected(String),
    UploadStarted(UploadTicket),
    UploadFinished(UploadReceipt),
    StatusUpdated(String),
    StatusCleared,
}

impl AdminState {
    pub fn new(
        studies: StudyBoard,
        progress: ProgressBoard,
        requests: RequestInbox,
        now: OffsetDateTime,
    ) -> Self {
        Self {
            studies,
            progress,
            requests,
            upload: UploadSlot::default(),
            status_line: None,
            now,
        }
    }

    /// State loaded with the built-in records, clocked at
    /// [`seed::REFERENCE_NOW`] so relative timestamps stay stable.
    pub fn seeded() -> Result<Self> {
        let studies = Collection::from_records(seed::studies()).context("load seed studies")?;
        let progress = Collection::from_records(seed::progress()).context("load seed progress")?;
        let requests = Collection::from_records(seed::requests()).context("load seed requests")?;
        Ok(Self::new(
            StudyBoard::new(studies),
            ProgressBoard::new(progress),
            RequestInbox::new(requests),
            seed::REFERENCE_NOW,
        ))
    }

    pub fn today(&self) -> Date {
        self.now.date()
    }

    pub fn dashboard(&self) -> DashboardSnapshot {
        DashboardSnapshot::capture(&self.studies, &self.progress, &self.requests, self.now)
    }

    pub fn dispatch(&mut self, command: AdminCommand) -> Vec<AdminEvent> {
        match command {
            AdminCommand::SetFilter {
                screen,
                field,
                value,
            } => {
                match screen {
                    Screen::Studies => self.studies.set_filter(field, &value),
                    Screen::Progress => self.progress.set_filter(field, &value),
                    Screen::Requests => self.requests.set_filter(field, &value),
                }
                vec![AdminEvent::FilterChanged {
                    screen,
                    field,
                    value,
                }]
            }
            AdminCommand::ClearFilters(screen) => {
                match screen {
                    Screen::Studies => self.studies.clear_filters(),
                    Screen::Progress => self.progress.clear_filters(),
                    Screen::Requests => self.requests.clear_filters(),
                }
                vec![AdminEvent::FiltersCleared(screen)]
            }
            AdminCommand::ToggleStudyLock(id) => {
                let today = self.today();
                if !self.studies.toggle_lock(id, today).is_applied() {
                    return self.not_found(Screen::Studies, id.get());
                }
                let locked = self.studies.is_locked(id).unwrap_or_default();
                let label = if locked { "locked" } else { "unlocked" };
                vec![
                    AdminEvent::StudyLockChanged { id, locked },
                    self.set_status(format!("study {id} {label}")),
                ]
            }
            AdminCommand::SetStudyLock { id, locked } => {
                let today = self.today();
                if !self.studies.set_lock(id, locked, today).is_applied() {
                    return self.not_found(Screen::Studies, id.get());
                }
                let label = if locked { "locked" } else { "unlocked" };
                vec![
                    AdminEvent::StudyLockChanged { id, locked },
                    self.set_status(format!("study {id} {label}")),
                ]
            }
            AdminCommand::SetStudyStatus { id, status } => {
                let today = self.today();
                match self.studies.set_status(id, status, today) {
                    MutationOutcome::Applied => vec![
                        AdminEvent::StudyStatusChanged { id, status },
                        self.set_status(format!("study {id} marked {status}")),
                    ],
                    MutationOutcome::NotFound => self.not_found(Screen::Studies, id.get()),
                }
            }
            AdminCommand::DeleteStudy(id) => match self.studies.delete(id) {
                MutationOutcome::Applied => vec![
                    AdminEvent::StudyDeleted(id),
                    self.set_status(format!("study {id} deleted")),
                ],
                MutationOutcome::NotFound => self.not_found(Screen::Studies, id.get()),
            },
            AdminCommand::SetRequestStatus { id, status } => {
                match self.requests.update_status(id, status) {
                    Ok(MutationOutcome::Applied) => vec![
                        AdminEvent::RequestStatusChanged { id, status },
                        self.set_status(format!("request {id} marked {status}")),
                    ],
                    Ok(MutationOutcome::NotFound) => self.not_found(Screen::Requests, id.get()),
                    Err(error) => self.reject(error.to_string()),
                }
            }
            AdminCommand::BeginUpload(payload) => {
                if let Err(error) = payload.validate() {
                    return self.reject(error.to_string());
                }
                let kind = payload.kind();
                match self.upload.begin(kind, payload.title()) {
                    Ok(ticket) => vec![
                        AdminEvent::UploadStarted(ticket),
                        self.set_status(format!("uploading {kind}...")),
                    ],
                    Err(error) => self.reject(error.to_string()),
                }
            }
            AdminCommand::FinishUpload(ticket) => match self.upload.finish(ticket) {
                Ok(receipt) => {
                    let status = self.set_status(receipt.message.clone());
                    vec![AdminEvent::UploadFinished(receipt), status]
                }
                Err(error) => self.reject(error.to_string()),
            },
            AdminCommand::ClearStatus => {
                self.status_line = None;
                vec![AdminEvent::StatusCleared]
            }
        }
    }

    fn not_found(&mut self, screen: Screen, id: i64) -> Vec<AdminEvent> {
        vec![
            AdminEvent::NotFound { screen, id },
            self.set_status(format!("no {} with id {id}", screen.noun())),
        ]
    }

    fn reject(&mut self, message: String) -> Vec<AdminEvent> {
        vec![
            AdminEvent::Rejected(message.clone()),
            self.set_status(message),
        ]
    }

    fn set_status(&mut self, message: String) -> AdminEvent {
        self.status_line = Some(message.clone());
        AdminEvent::StatusUpdated(message)
    }
}
