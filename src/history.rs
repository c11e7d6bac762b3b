//! History and audit trails.
//!
//! History is the source of truth for reconstructing a request's status:
//! it must be written in the same atomic unit as the state change, and
//! replaying a request's entries in order reproduces its current status.
//! The audit log is a coarser best-effort side channel across entities;
//! its failures never abort the primary operation.

use crate::dates::TimeStamp;
use crate::request::{Role, Status};

#[derive(Debug, Clone, Copy, PartialEq, Eq, minicbor::Encode, minicbor::Decode)]
pub enum HistoryAction {
    #[n(0)]
    Create,
    /// A pending-to-pending hop (department head passing the request on).
    #[n(1)]
    Advance,
    #[n(2)]
    Approve,
    #[n(3)]
    Reject,
    #[n(4)]
    Cancel,
    #[n(5)]
    Edit,
}

impl HistoryAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            HistoryAction::Create => "create",
            HistoryAction::Advance => "advance",
            HistoryAction::Approve => "approve",
            HistoryAction::Reject => "reject",
            HistoryAction::Cancel => "cancel",
            HistoryAction::Edit => "edit",
        }
    }
}

/// One immutable record of a transition (or in-place edit) on a request.
#[derive(Debug, Clone, minicbor::Encode, minicbor::Decode)]
pub struct HistoryEntry {
    #[n(0)]
    pub request_id: String,
    #[n(1)]
    pub action: HistoryAction,
    /// `None` only for the creating entry.
    #[n(2)]
    pub from_status: Option<Status>,
    #[n(3)]
    pub to_status: Status,
    #[n(4)]
    pub actor_role: Option<Role>,
    #[n(5)]
    pub actor_id: Option<String>,
    #[n(6)]
    pub note: Option<String>,
    #[n(7)]
    pub created_at: TimeStamp,
}

/// Replay an ordered history chain and return the status it reconstructs.
///
/// Each entry's `from_status` must match the running status (edits record
/// `from == to`). Returns `None` for an empty or inconsistent chain.
pub fn replay_status(entries: &[HistoryEntry]) -> Option<Status> {
    let mut current: Option<Status> = None;
    for entry in entries {
        if entry.from_status != current {
            return None;
        }
        current = Some(entry.to_status);
    }
    current
}

/// Best-effort log row for any mutating action across entities.
#[derive(Debug, Clone, minicbor::Encode, minicbor::Decode)]
pub struct AuditEntry {
    /// CREATE / TRANSITION / EDIT / DELETE / ACCRUAL / RESET.
    #[n(0)]
    pub action: String,
    /// Logical table the action touched (`leave_requests`, `employees`).
    #[n(1)]
    pub entity: String,
    #[n(2)]
    pub record_id: String,
    #[n(3)]
    pub changes: String,
    /// sha256 of `changes`, for tamper evidence.
    #[n(4)]
    pub digest: String,
    #[n(5)]
    pub created_at: TimeStamp,
}

impl AuditEntry {
    pub fn new(
        action: impl Into<String>,
        entity: impl Into<String>,
        record_id: impl Into<String>,
        changes: impl Into<String>,
    ) -> Self {
        let changes = changes.into();
        Self {
            action: action.into(),
            entity: entity.into(),
            record_id: record_id.into(),
            digest: sha256::digest(changes.as_bytes()),
            changes,
            created_at: TimeStamp::now(),
        }
    }
}
