//! Employee record, owned by the HR master-data collaborator.
//!
//! The engine reads identity and department and mutates only the two
//! balance fields, and those only through the ledger.

use crate::dates::Day;

#[derive(Debug, Clone, PartialEq, minicbor::Encode, minicbor::Decode)]
pub struct Employee {
    #[n(0)]
    pub id: String,
    #[n(1)]
    pub name: String,
    #[n(2)]
    pub department_id: Option<String>,
    /// Missing hire dates are tolerated; such employees are skipped by the
    /// monthly accrual rather than failing the batch.
    #[n(3)]
    pub hire_date: Option<Day>,
    #[n(4)]
    pub job_grade: Option<String>,
    /// Annual entitlement in days. Fractional because accrual credits
    /// one twelfth of the yearly cap per month.
    #[n(5)]
    pub annual_balance: f64,
    #[n(6)]
    pub emergency_balance: f64,
}

impl Employee {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            department_id: None,
            hire_date: None,
            job_grade: None,
            annual_balance: 0.0,
            emergency_balance: 0.0,
        }
    }

    pub fn in_department(mut self, department_id: impl Into<String>) -> Self {
        self.department_id = Some(department_id.into());
        self
    }

    pub fn hired_on(mut self, hire_date: Day) -> Self {
        self.hire_date = Some(hire_date);
        self
    }

    pub fn with_balances(mut self, annual: f64, emergency: f64) -> Self {
        self.annual_balance = annual;
        self.emergency_balance = emergency;
        self
    }
}
