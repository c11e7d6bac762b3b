//! Leave request entity and the approval state machine.
//!
//! The transition table is the single source of legality; who may drive a
//! transition is a separate capability table so the orchestrator can apply
//! ownership and department scoping on top.

use crate::dates::{Day, TimeStamp};

/// Approval workflow states. A request starts in `PendingDept` and walks
/// the department-then-manager chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, minicbor::Encode, minicbor::Decode)]
pub enum Status {
    #[n(0)]
    PendingDept,
    #[n(1)]
    PendingManager,
    #[n(2)]
    Approved,
    #[n(3)]
    RejectedDept,
    #[n(4)]
    RejectedManager,
    #[n(5)]
    Cancelled,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::PendingDept => "pending_dept",
            Status::PendingManager => "pending_manager",
            Status::Approved => "approved",
            Status::RejectedDept => "rejected_dept",
            Status::RejectedManager => "rejected_manager",
            Status::Cancelled => "cancelled",
        }
    }

    pub fn parse(s: &str) -> Option<Status> {
        match s {
            "pending_dept" => Some(Status::PendingDept),
            "pending_manager" => Some(Status::PendingManager),
            "approved" => Some(Status::Approved),
            "rejected_dept" => Some(Status::RejectedDept),
            "rejected_manager" => Some(Status::RejectedManager),
            "cancelled" => Some(Status::Cancelled),
            _ => None,
        }
    }

    /// Active requests block overlapping ranges. Everything outside the
    /// terminal-non-approved set counts.
    pub fn is_active(&self) -> bool {
        !matches!(
            self,
            Status::Cancelled | Status::RejectedDept | Status::RejectedManager
        )
    }

    /// No outgoing transitions at all. `Approved` is excluded because it
    /// can still be cancelled.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Status::RejectedDept | Status::RejectedManager | Status::Cancelled
        )
    }
}

/// Legal status transitions.
pub fn can_transition(from: Status, to: Status) -> bool {
    use Status::*;

    match from {
        PendingDept => matches!(to, PendingManager | RejectedDept | Cancelled),
        PendingManager => matches!(to, Approved | RejectedManager | Cancelled),
        Approved => matches!(to, Cancelled),
        RejectedDept | RejectedManager | Cancelled => false,
    }
}

/// Closed set of actor roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, minicbor::Encode, minicbor::Decode)]
pub enum Role {
    #[n(0)]
    Employee,
    #[n(1)]
    DepartmentHead,
    #[n(2)]
    Manager,
    #[n(3)]
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Employee => "employee",
            Role::DepartmentHead => "department_head",
            Role::Manager => "manager",
            Role::Admin => "admin",
        }
    }
}

/// Capability table: may `role` drive `from -> to` at all? Ownership and
/// department scoping are layered on by the orchestrator.
pub fn role_may(role: Role, from: Status, to: Status) -> bool {
    use Status::*;

    if !can_transition(from, to) {
        return false;
    }
    match (from, to) {
        (PendingDept, PendingManager) | (PendingDept, RejectedDept) => {
            matches!(role, Role::DepartmentHead)
        }
        (PendingManager, Approved) | (PendingManager, RejectedManager) => {
            matches!(role, Role::Manager | Role::Admin)
        }
        // any role may request cancellation, subject to scoping
        (_, Cancelled) => true,
        _ => false,
    }
}

/// The central mutable entity of the engine. Mutated only through
/// state-machine-governed transitions or the constrained edit path.
#[derive(Debug, Clone, minicbor::Encode, minicbor::Decode)]
pub struct LeaveRequest {
    #[n(0)]
    pub id: String,
    #[n(1)]
    pub employee_id: String,
    #[n(2)]
    pub type_code: String,
    #[n(3)]
    pub relation: Option<String>,
    #[n(4)]
    pub start_date: Day,
    /// Inclusive; always >= `start_date`.
    #[n(5)]
    pub end_date: Day,
    /// Derived from the range and the type policy, never trusted from the
    /// caller.
    #[n(6)]
    pub requested_days: i64,
    #[n(7)]
    pub status: Status,
    #[n(8)]
    pub rejection_reason: Option<String>,
    #[n(9)]
    pub notes: String,
    #[n(10)]
    pub created_at: TimeStamp,
    #[n(11)]
    pub dept_decision_at: Option<TimeStamp>,
    #[n(12)]
    pub manager_decision_at: Option<TimeStamp>,
}

impl LeaveRequest {
    /// Closed-interval overlap with `[start, end]`.
    pub fn overlaps(&self, start: Day, end: Day) -> bool {
        !(self.end_date < start || self.start_date > end)
    }

    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Status; 6] = [
        Status::PendingDept,
        Status::PendingManager,
        Status::Approved,
        Status::RejectedDept,
        Status::RejectedManager,
        Status::Cancelled,
    ];

    #[test]
    fn transition_table_matches_workflow() {
        use Status::*;

        assert!(can_transition(PendingDept, PendingManager));
        assert!(can_transition(PendingDept, RejectedDept));
        assert!(can_transition(PendingDept, Cancelled));
        assert!(can_transition(PendingManager, Approved));
        assert!(can_transition(PendingManager, RejectedManager));
        assert!(can_transition(PendingManager, Cancelled));
        assert!(can_transition(Approved, Cancelled));

        assert!(!can_transition(PendingDept, Approved));
        assert!(!can_transition(Approved, PendingDept));
    }

    #[test]
    fn terminal_states_have_no_exits() {
        for from in ALL.iter().filter(|s| s.is_terminal()) {
            for to in ALL {
                assert!(!can_transition(*from, to), "{from:?} -> {to:?} should be illegal");
            }
        }
    }

    #[test]
    fn stage_gating_by_role() {
        use Status::*;

        assert!(role_may(Role::DepartmentHead, PendingDept, PendingManager));
        assert!(!role_may(Role::Manager, PendingDept, PendingManager));
        assert!(!role_may(Role::Employee, PendingDept, RejectedDept));

        assert!(role_may(Role::Manager, PendingManager, Approved));
        assert!(role_may(Role::Admin, PendingManager, RejectedManager));
        assert!(!role_may(Role::DepartmentHead, PendingManager, Approved));

        assert!(role_may(Role::Employee, Approved, Cancelled));
        assert!(role_may(Role::DepartmentHead, PendingDept, Cancelled));
    }

    #[test]
    fn status_round_trips_through_strings() {
        for s in ALL {
            assert_eq!(Status::parse(s.as_str()), Some(s));
        }
        assert_eq!(Status::parse("draft"), None);
    }

    #[test]
    fn overlap_is_closed_interval() {
        let req = LeaveRequest {
            id: "req1".into(),
            employee_id: "emp1".into(),
            type_code: "sick".into(),
            relation: None,
            start_date: Day::new(2025, 1, 10),
            end_date: Day::new(2025, 1, 12),
            requested_days: 3,
            status: Status::PendingDept,
            rejection_reason: None,
            notes: String::new(),
            created_at: TimeStamp::now(),
            dept_decision_at: None,
            manager_decision_at: None,
        };

        // touching endpoints count as overlap
        assert!(req.overlaps(Day::new(2025, 1, 12), Day::new(2025, 1, 20)));
        assert!(req.overlaps(Day::new(2025, 1, 1), Day::new(2025, 1, 10)));
        assert!(req.overlaps(Day::new(2025, 1, 1), Day::new(2025, 1, 31)));
        assert!(!req.overlaps(Day::new(2025, 1, 13), Day::new(2025, 1, 20)));
        assert!(!req.overlaps(Day::new(2025, 1, 1), Day::new(2025, 1, 9)));
    }
}
