//! Balance ledger: debit/credit on the two entitlement accounts plus the
//! accrual and reset arithmetic used by the periodic batch jobs.
//!
//! Debits are deliberately not floor-clamped. A debit may drive a balance
//! negative when a prior approval over-committed the entitlement; the
//! overdraft is surfaced to callers, not silently corrected. Sufficiency
//! gating happens in the orchestrator before the debit.

use crate::dates::Day;
use crate::employee::Employee;

/// Emergency balances reset to this many days every January 1st.
pub const EMERGENCY_RESET_DAYS: f64 = 12.0;

const LONG_SERVICE_YEARS: i32 = 20;
const LONG_SERVICE_ANNUAL_CAP: f64 = 45.0;
const BASE_ANNUAL_CAP: f64 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BalanceAccount {
    Annual,
    Emergency,
}

impl BalanceAccount {
    pub fn as_str(&self) -> &'static str {
        match self {
            BalanceAccount::Annual => "annual",
            BalanceAccount::Emergency => "emergency",
        }
    }
}

pub fn available(employee: &Employee, account: BalanceAccount) -> f64 {
    match account {
        BalanceAccount::Annual => employee.annual_balance,
        BalanceAccount::Emergency => employee.emergency_balance,
    }
}

pub fn debit(employee: &mut Employee, account: BalanceAccount, amount: f64) {
    match account {
        BalanceAccount::Annual => employee.annual_balance -= amount,
        BalanceAccount::Emergency => employee.emergency_balance -= amount,
    }
}

pub fn credit(employee: &mut Employee, account: BalanceAccount, amount: f64) {
    match account {
        BalanceAccount::Annual => employee.annual_balance += amount,
        BalanceAccount::Emergency => employee.emergency_balance += amount,
    }
}

/// Completed years of service as of `today`. Negative when the hire date
/// lies in the future.
pub fn years_of_service(hire_date: Day, today: Day) -> i32 {
    let correction = if today.month() < hire_date.month() { 1 } else { 0 };
    today.year() - hire_date.year() - correction
}

/// Yearly entitlement cap by tenure.
pub fn annual_cap(years: i32) -> f64 {
    if years >= LONG_SERVICE_YEARS {
        LONG_SERVICE_ANNUAL_CAP
    } else {
        BASE_ANNUAL_CAP
    }
}

/// The amount one monthly accrual run credits to an employee's annual
/// balance, or `None` when the hire date disqualifies them.
pub fn monthly_accrual(hire_date: Day, today: Day) -> Option<f64> {
    let years = years_of_service(hire_date, today);
    if years < 0 {
        return None;
    }
    Some(annual_cap(years) / 12.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debit_and_credit_are_symmetric() {
        let mut emp = Employee::new("emp1", "Omar").with_balances(30.0, 12.0);

        debit(&mut emp, BalanceAccount::Annual, 10.0);
        assert_eq!(emp.annual_balance, 20.0);
        credit(&mut emp, BalanceAccount::Annual, 10.0);
        assert_eq!(emp.annual_balance, 30.0);
        assert_eq!(emp.emergency_balance, 12.0);
    }

    #[test]
    fn debits_may_overdraw() {
        let mut emp = Employee::new("emp1", "Omar").with_balances(2.0, 0.0);
        debit(&mut emp, BalanceAccount::Annual, 5.0);
        assert_eq!(emp.annual_balance, -3.0);
    }

    #[test]
    fn service_years_count_completed_years() {
        let hire = Day::new(2010, 6, 1);
        assert_eq!(years_of_service(hire, Day::new(2025, 7, 15)), 15);
        // anniversary month not yet reached
        assert_eq!(years_of_service(hire, Day::new(2025, 5, 15)), 14);
        assert_eq!(years_of_service(hire, Day::new(2025, 6, 1)), 15);
    }

    #[test]
    fn long_service_raises_the_cap() {
        assert_eq!(annual_cap(19), 30.0);
        assert_eq!(annual_cap(20), 45.0);
        assert_eq!(annual_cap(35), 45.0);
    }

    #[test]
    fn monthly_accrual_is_one_twelfth_of_cap() {
        let today = Day::new(2025, 8, 1);
        assert_eq!(monthly_accrual(Day::new(2015, 3, 1), today), Some(2.5));
        assert_eq!(monthly_accrual(Day::new(2000, 3, 1), today), Some(3.75));
    }

    #[test]
    fn future_hire_dates_accrue_nothing() {
        assert_eq!(monthly_accrual(Day::new(2030, 1, 1), Day::new(2025, 8, 1)), None);
    }
}
