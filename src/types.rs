//! Leave type catalog and per-type policy rules.
//!
//! The catalog is an explicitly constructed registry handed to the engine
//! at startup. It is read-only at request time; an explicit [`reload`]
//! swaps the whole snapshot. Nothing here is lazily cached.
//!
//! [`reload`]: LeaveTypeRegistry::reload

use crate::dates::Day;
use crate::error::{EngineError, Result};
use crate::ledger::BalanceAccount;
use std::collections::HashMap;
use std::sync::RwLock;

/// Immutable policy record for one leave type.
#[derive(Debug, Clone, PartialEq)]
pub struct LeaveType {
    /// Unique key, lowercase (`annual`, `sick`, ...).
    pub code: String,
    pub label: String,
    /// Exact day count that overrides any caller-supplied end date.
    pub fixed_duration: Option<i64>,
    /// Per-request cap; `None` or zero means unbounded.
    pub max_per_request: Option<i64>,
    /// Request must carry a kinship/relation tag.
    pub requires_relation: bool,
    pub affects_annual_balance: bool,
    pub affects_emergency_balance: bool,
    /// Grantable at most once per employee, lifetime.
    pub is_one_time: bool,
}

impl LeaveType {
    /// Which ledger account final approval debits, if any. The seed data
    /// never sets both flags; annual wins if a reloaded catalog does.
    pub fn balance_account(&self) -> Option<BalanceAccount> {
        if self.affects_annual_balance {
            Some(BalanceAccount::Annual)
        } else if self.affects_emergency_balance {
            Some(BalanceAccount::Emergency)
        } else {
            None
        }
    }

    /// Apply the duration policy to a requested range.
    ///
    /// Fixed-duration types recompute the end date from the start date and
    /// ignore whatever end the caller supplied; free-duration types count
    /// the inclusive range. Returns `(start, effective_end, requested_days)`.
    pub fn derive_span(&self, start: Day, end: Day) -> Result<(Day, Day, i64)> {
        let (end, days) = match self.fixed_duration {
            Some(d) => (start.plus_days(d - 1), d),
            None => (end, start.inclusive_days_until(end)?),
        };

        if let Some(cap) = self.max_per_request {
            if cap > 0 && days > cap {
                return Err(EngineError::Policy(format!(
                    "{} requests are capped at {cap} days, got {days}",
                    self.code
                )));
            }
        }

        Ok((start, end, days))
    }
}

/// Catalog of leave-type policies keyed by code.
pub struct LeaveTypeRegistry {
    types: RwLock<HashMap<String, LeaveType>>,
}

impl LeaveTypeRegistry {
    pub fn new(types: Vec<LeaveType>) -> Self {
        Self {
            types: RwLock::new(types.into_iter().map(|t| (t.code.clone(), t)).collect()),
        }
    }

    /// Registry seeded with the standard catalog.
    pub fn seeded() -> Self {
        Self::new(seed_types())
    }

    pub fn resolve(&self, code: &str) -> Result<LeaveType> {
        self.types
            .read()
            .expect("leave type registry lock poisoned")
            .get(code)
            .cloned()
            .ok_or_else(|| EngineError::NotFound(format!("unknown leave type {code:?}")))
    }

    /// Replace the whole catalog. This is the only mutation path.
    pub fn reload(&self, types: Vec<LeaveType>) {
        let mut guard = self
            .types
            .write()
            .expect("leave type registry lock poisoned");
        *guard = types.into_iter().map(|t| (t.code.clone(), t)).collect();
    }

    pub fn all(&self) -> Vec<LeaveType> {
        let mut all: Vec<LeaveType> = self
            .types
            .read()
            .expect("leave type registry lock poisoned")
            .values()
            .cloned()
            .collect();
        all.sort_by(|a, b| a.code.cmp(&b.code));
        all
    }
}

fn leave_type(
    code: &str,
    label: &str,
    fixed_duration: Option<i64>,
    max_per_request: Option<i64>,
    requires_relation: bool,
    account: Option<BalanceAccount>,
    is_one_time: bool,
) -> LeaveType {
    LeaveType {
        code: code.to_string(),
        label: label.to_string(),
        fixed_duration,
        max_per_request,
        requires_relation,
        affects_annual_balance: account == Some(BalanceAccount::Annual),
        affects_emergency_balance: account == Some(BalanceAccount::Emergency),
        is_one_time,
    }
}

/// The standard seeded catalog.
pub fn seed_types() -> Vec<LeaveType> {
    use BalanceAccount::{Annual, Emergency};

    vec![
        leave_type("annual", "Annual leave", None, Some(90), false, Some(Annual), false),
        leave_type("emergency", "Emergency leave", None, Some(3), false, Some(Emergency), false),
        leave_type("death1", "Bereavement (first degree)", Some(7), Some(7), true, None, false),
        leave_type("death2", "Bereavement (second degree)", Some(3), Some(3), false, None, false),
        leave_type("death_spouse", "Bereavement (spouse)", Some(130), Some(130), false, None, true),
        leave_type("birth_single", "Maternity", Some(98), Some(98), false, None, false),
        leave_type("birth_twins", "Maternity (twins)", Some(112), Some(112), false, None, false),
        leave_type("hajj", "Pilgrimage", Some(20), Some(20), false, None, true),
        leave_type("marriage", "Marriage", Some(14), Some(14), false, None, true),
        leave_type("sick", "Sick leave", None, None, false, None, false),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_known_and_unknown_codes() {
        let registry = LeaveTypeRegistry::seeded();
        assert_eq!(registry.resolve("annual").unwrap().code, "annual");
        assert!(matches!(
            registry.resolve("sabbatical"),
            Err(EngineError::NotFound(_))
        ));
    }

    #[test]
    fn fixed_duration_overrides_caller_end() {
        let registry = LeaveTypeRegistry::seeded();
        let marriage = registry.resolve("marriage").unwrap();

        let start = Day::new(2025, 3, 1);
        // caller-supplied end is ignored entirely
        let (s, e, days) = marriage.derive_span(start, Day::new(2025, 3, 1)).unwrap();
        assert_eq!(s, start);
        assert_eq!(e, Day::new(2025, 3, 14));
        assert_eq!(days, 14);
    }

    #[test]
    fn free_duration_counts_inclusive_days() {
        let sick = LeaveTypeRegistry::seeded().resolve("sick").unwrap();
        let (_, _, days) = sick
            .derive_span(Day::new(2025, 1, 10), Day::new(2025, 1, 12))
            .unwrap();
        assert_eq!(days, 3);
    }

    #[test]
    fn negative_range_is_a_validation_error() {
        let sick = LeaveTypeRegistry::seeded().resolve("sick").unwrap();
        let err = sick
            .derive_span(Day::new(2025, 1, 12), Day::new(2025, 1, 10))
            .unwrap_err();
        assert!(matches!(err, EngineError::Validation(_)));
    }

    #[test]
    fn cap_is_enforced() {
        let emergency = LeaveTypeRegistry::seeded().resolve("emergency").unwrap();
        let err = emergency
            .derive_span(Day::new(2025, 5, 1), Day::new(2025, 5, 5))
            .unwrap_err();
        assert!(matches!(err, EngineError::Policy(_)));
    }

    #[test]
    fn zero_cap_means_unbounded() {
        let lt = leave_type("study", "Study leave", None, Some(0), false, None, false);
        let (_, _, days) = lt
            .derive_span(Day::new(2025, 1, 1), Day::new(2025, 12, 31))
            .unwrap();
        assert_eq!(days, 365);
    }

    #[test]
    fn reload_replaces_the_catalog() {
        let registry = LeaveTypeRegistry::seeded();
        registry.reload(vec![leave_type(
            "annual",
            "Annual leave",
            None,
            Some(45),
            false,
            Some(BalanceAccount::Annual),
            false,
        )]);

        assert_eq!(registry.all().len(), 1);
        assert!(registry.resolve("sick").is_err());
        assert_eq!(registry.resolve("annual").unwrap().max_per_request, Some(45));
    }

    #[test]
    fn seed_catalog_balance_effects() {
        let registry = LeaveTypeRegistry::seeded();
        assert_eq!(
            registry.resolve("annual").unwrap().balance_account(),
            Some(BalanceAccount::Annual)
        );
        assert_eq!(
            registry.resolve("emergency").unwrap().balance_account(),
            Some(BalanceAccount::Emergency)
        );
        assert_eq!(registry.resolve("sick").unwrap().balance_account(), None);
    }
}
