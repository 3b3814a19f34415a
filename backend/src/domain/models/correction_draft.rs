//! Domain model for the in-progress payroll correction being edited.
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::month_bucket::MonthBucket;

/// Whether the correction document can still be changed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DocumentState {
    #[default]
    Editable,
    Finalized,
}

/// The three keys that select which salary slips are candidates for reversal
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SelectionKeys {
    pub employee: Option<String>,
    pub payroll_period: Option<String>,
    pub company: Option<String>,
}

impl SelectionKeys {
    pub fn new(employee: &str, payroll_period: &str, company: &str) -> Self {
        Self {
            employee: Some(employee.to_string()),
            payroll_period: Some(payroll_period.to_string()),
            company: Some(company.to_string()),
        }
    }

    /// All three keys present and non-blank
    pub fn is_complete(&self) -> bool {
        self.complete().is_some()
    }

    /// Borrow the keys as (employee, payroll_period, company) when complete
    pub fn complete(&self) -> Option<(&str, &str, &str)> {
        fn present(value: &Option<String>) -> Option<&str> {
            value.as_deref().map(str::trim).filter(|v| !v.is_empty())
        }

        Some((
            present(&self.employee)?,
            present(&self.payroll_period)?,
            present(&self.company)?,
        ))
    }
}

/// Working state of a payroll correction for the whole editing session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrectionDraft {
    pub employee: Option<String>,
    pub payroll_period: Option<String>,
    pub company: Option<String>,
    /// Month options; the first entry is always the empty "no selection" label
    pub available_months: Vec<String>,
    pub selected_month: Option<String>,
    pub record_reference: Option<String>,
    pub absent_days: Option<u32>,
    pub working_days: Option<u32>,
    pub lwp_days: Option<u32>,
    pub total_days_applied: Option<u32>,
    pub days_to_reverse: Option<i64>,
    pub additional_salary_date: Option<NaiveDate>,
    pub document_state: DocumentState,
}

impl Default for CorrectionDraft {
    fn default() -> Self {
        Self::new()
    }
}

impl CorrectionDraft {
    /// An empty draft, as created when the correction form opens
    pub fn new() -> Self {
        Self {
            employee: None,
            payroll_period: None,
            company: None,
            available_months: vec![String::new()],
            selected_month: None,
            record_reference: None,
            absent_days: None,
            working_days: None,
            lwp_days: None,
            total_days_applied: None,
            days_to_reverse: None,
            additional_salary_date: None,
            document_state: DocumentState::Editable,
        }
    }

    pub fn selection_keys(&self) -> SelectionKeys {
        SelectionKeys {
            employee: self.employee.clone(),
            payroll_period: self.payroll_period.clone(),
            company: self.company.clone(),
        }
    }

    pub fn is_editable(&self) -> bool {
        self.document_state == DocumentState::Editable
    }

    /// Clear the selected month and every field projected from it
    pub fn clear_selection(&mut self) {
        self.selected_month = None;
        self.clear_bucket_fields();
    }

    pub fn clear_bucket_fields(&mut self) {
        self.record_reference = None;
        self.absent_days = None;
        self.working_days = None;
        self.lwp_days = None;
        self.total_days_applied = None;
    }

    /// Copy a bucket's fields into the draft
    pub fn project_bucket(&mut self, bucket: &MonthBucket) {
        self.record_reference = Some(bucket.record_reference.clone());
        self.absent_days = Some(bucket.absent_days);
        self.working_days = Some(bucket.working_days);
        self.lwp_days = Some(bucket.lwp_days);
        self.total_days_applied = Some(bucket.total_days_applied);
    }

    /// Total days of the selected bucket, 0 when nothing is selected
    pub fn available_days(&self) -> u32 {
        self.total_days_applied.unwrap_or(0)
    }
}
