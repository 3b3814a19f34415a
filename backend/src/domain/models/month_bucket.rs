//! Domain model for a month bucket: the reversal-relevant fields of one
//! salary slip, keyed by the calendar month of its posting date.
use chrono::NaiveDate;
use log::warn;
use serde::{Deserialize, Serialize};

use super::pay_record::PayRecord;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthBucket {
    /// Long month name, e.g. "January"
    pub month_label: String,
    /// Name of the salary slip this bucket was derived from
    pub record_reference: String,
    pub absent_days: u32,
    pub lwp_days: u32,
    pub working_days: u32,
    /// Always `absent_days + lwp_days`, and never zero
    pub total_days_applied: u32,
    pub posting_date: NaiveDate,
}

impl MonthBucket {
    /// Build a bucket, returning `None` when no days were applied or the
    /// total does not fit in a `u32`
    pub fn new(
        record_reference: String,
        absent_days: u32,
        lwp_days: u32,
        working_days: u32,
        posting_date: NaiveDate,
    ) -> Option<Self> {
        let Some(total_days_applied) = absent_days.checked_add(lwp_days) else {
            warn!(
                "Dropping slip {}: {} absent + {} LWP days overflows",
                record_reference, absent_days, lwp_days
            );
            return None;
        };
        if total_days_applied == 0 {
            return None;
        }

        Some(Self {
            month_label: Self::month_label_for(posting_date),
            record_reference,
            absent_days,
            lwp_days,
            working_days,
            total_days_applied,
            posting_date,
        })
    }

    pub fn from_record(record: &PayRecord) -> Option<Self> {
        Self::new(
            record.name.clone(),
            record.absent_days,
            record.leave_without_pay_days,
            record.total_working_days,
            record.posting_date,
        )
    }

    /// Long-form month name of a date
    pub fn month_label_for(date: NaiveDate) -> String {
        date.format("%B").to_string()
    }

    /// Check a bucket received from elsewhere against the bucket invariant
    pub fn is_consistent(&self) -> bool {
        self.total_days_applied > 0
            && self.absent_days.checked_add(self.lwp_days) == Some(self.total_days_applied)
            && !self.month_label.is_empty()
    }
}
