// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use thiserror::Error;

use crate::{RequestId, RequestStatus, UploadKind};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollectionError {
    #[error("duplicate record id {id} -- ids must be unique within a collection")]
    DuplicateId { id: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("request {id} is {from} and cannot move back to {to}")]
    Backwards {
        id: RequestId,
        from: RequestStatus,
        to: RequestStatus,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    #[error("a {kind} upload is already in progress -- wait for it to finish and retry")]
    Busy { kind: UploadKind },
    #[error("upload ticket {ticket} is not in flight")]
    StaleTicket { ticket: u64 },
}
