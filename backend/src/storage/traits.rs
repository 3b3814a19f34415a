//! # Storage Traits
//!
//! Storage abstractions used by the domain layer. Implementations decide
//! where the records live; the domain only filters and aggregates them.

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::models::pay_record::{PayRecord, PayRecordFilter};
use crate::domain::models::submitted_reversal::SubmittedReversal;

/// Read access to salary slips
#[async_trait]
pub trait PayRecordStorage: Send + Sync {
    /// List slips matching every field of the filter
    async fn list_pay_records(&self, filter: &PayRecordFilter) -> Result<Vec<PayRecord>>;

    /// Retrieve a specific slip by name
    async fn get_pay_record(&self, name: &str) -> Result<Option<PayRecord>>;
}

/// Read access to payroll corrections that were already submitted
#[async_trait]
pub trait CorrectionStorage: Send + Sync {
    /// Submitted reversals of one employee and payroll period against one slip
    async fn list_submitted_reversals(
        &self,
        employee: &str,
        payroll_period: &str,
        salary_slip_reference: &str,
    ) -> Result<Vec<SubmittedReversal>>;
}
