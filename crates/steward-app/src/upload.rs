// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::info;

use crate::error::UploadError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UploadKind {
    Study,
    Devotion,
    Sermon,
}

impl UploadKind {
    pub const ALL: [Self; 3] = [Self::Study, Self::Devotion, Self::Sermon];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Study => "study",
            Self::Devotion => "devotion",
            Self::Sermon => "sermon",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "study" => Some(Self::Study),
            "devotion" => Some(Self::Devotion),
            "sermon" => Some(Self::Sermon),
            _ => None,
        }
    }

    pub const fn confirmation(self) -> &'static str {
        match self {
            Self::Study => "Study uploaded successfully!",
            Self::Devotion => "Devotion uploaded successfully!",
            Self::Sermon => "Sermon uploaded successfully!",
        }
    }
}

impl fmt::Display for UploadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadTicket {
    id: u64,
    kind: UploadKind,
}

impl UploadTicket {
    pub const fn id(self) -> u64 {
        self.id
    }

    pub const fn kind(self) -> UploadKind {
        self.kind
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadReceipt {
    pub ticket: UploadTicket,
    pub title: String,
    pub message: String,
}

/// Tracks the single simulated upload allowed at a time. The delay itself is
/// owned by whoever drives the slot; the slot only enforces ordering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadSlot {
    in_flight: Option<(UploadTicket, String)>,
    issued: u64,
}

impl UploadSlot {
    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn in_flight(&self) -> Option<UploadTicket> {
        self.in_flight.as_ref().map(|(ticket, _)| *ticket)
    }

    pub fn begin(&mut self, kind: UploadKind, title: &str) -> Result<UploadTicket, UploadError> {
        if let Some((ticket, _)) = &self.in_flight {
            return Err(UploadError::Busy { kind: ticket.kind });
        }
        self.issued += 1;
        let ticket = UploadTicket {
            id: self.issued,
            kind,
        };
        self.in_flight = Some((ticket, title.to_owned()));
        info!(ticket = ticket.id, %kind, title, "upload started");
        Ok(ticket)
    }

    pub fn finish(&mut self, ticket: UploadTicket) -> Result<UploadReceipt, UploadError> {
        match self.in_flight.take() {
            Some((current, title)) if current == ticket => {
                info!(ticket = ticket.id, kind = %ticket.kind, title = %title, "upload finished");
                Ok(UploadReceipt {
                    ticket,
                    title,
                    message: ticket.kind.confirmation().to_owned(),
                })
            }
            other => {
                self.in_flight = other;
                Err(UploadError::StaleTicket { ticket: ticket.id })
            }
        }
    }
}
