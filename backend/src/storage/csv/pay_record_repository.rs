//! # CSV Salary Slip Repository
//!
//! Reads salary slips from `salary_slips.csv` in the data directory.
//!
//! ## CSV Format
//!
//! ```csv
//! name,employee,company,payroll_period,docstatus,absent_days,leave_without_pay,posting_date,total_working_days
//! SS-1,EMP-001,Acme,FY-2025,1,2,1,2025-01-15,22
//! ```
//!
//! `docstatus` uses 0 = draft, 1 = submitted, 2 = cancelled. Rows that do not
//! parse are skipped with a warning so one bad line cannot hide every slip.

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use csv::Reader;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use shared::DocStatus;
use std::fs::File;
use std::io::BufReader;

use super::connection::CsvConnection;
use crate::domain::models::pay_record::{PayRecord, PayRecordFilter};
use crate::storage::PayRecordStorage;

/// CSV record structure for salary slips
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SalarySlipRecord {
    name: String,
    employee: String,
    company: String,
    payroll_period: String,
    docstatus: u8,
    #[serde(default)]
    absent_days: Option<u32>,
    #[serde(default)]
    leave_without_pay: Option<u32>,
    posting_date: String,
    #[serde(default)]
    total_working_days: Option<u32>,
}

impl SalarySlipRecord {
    fn into_pay_record(self) -> Result<PayRecord> {
        let docstatus = DocStatus::try_from(self.docstatus).map_err(anyhow::Error::msg)?;
        let posting_date = NaiveDate::parse_from_str(self.posting_date.trim(), "%Y-%m-%d")
            .map_err(|e| anyhow::anyhow!("Invalid posting date '{}': {}", self.posting_date, e))?;
        let absent_days = self.absent_days.unwrap_or(0);
        let leave_without_pay_days = self.leave_without_pay.unwrap_or(0);
        if absent_days.checked_add(leave_without_pay_days).is_none() {
            anyhow::bail!(
                "Absent days {} plus LWP days {} overflows",
                absent_days,
                leave_without_pay_days
            );
        }

        Ok(PayRecord {
            name: self.name,
            employee: self.employee,
            company: self.company,
            payroll_period: self.payroll_period,
            docstatus,
            absent_days,
            leave_without_pay_days,
            posting_date,
            total_working_days: self.total_working_days.unwrap_or(0),
        })
    }
}

/// CSV-based salary slip repository
#[derive(Debug, Clone)]
pub struct PayRecordRepository {
    connection: CsvConnection,
}

impl PayRecordRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }

    fn read_pay_records(&self) -> Result<Vec<PayRecord>> {
        let file_path = self.connection.ensure_salary_slips_file_exists()?;
        let file = File::open(&file_path)?;
        let mut csv_reader = Reader::from_reader(BufReader::new(file));

        let mut records = Vec::new();
        for (index, row) in csv_reader.deserialize::<SalarySlipRecord>().enumerate() {
            // Line 1 is the header
            let line = index + 2;
            match row.map_err(anyhow::Error::from).and_then(SalarySlipRecord::into_pay_record) {
                Ok(record) => records.push(record),
                Err(e) => warn!("Skipping salary slip on line {}: {}", line, e),
            }
        }

        debug!("Read {} salary slips from {}", records.len(), file_path.display());
        Ok(records)
    }
}

#[async_trait]
impl PayRecordStorage for PayRecordRepository {
    async fn list_pay_records(&self, filter: &PayRecordFilter) -> Result<Vec<PayRecord>> {
        let records = self.read_pay_records()?;
        Ok(records.into_iter().filter(|r| filter.matches(r)).collect())
    }

    async fn get_pay_record(&self, name: &str) -> Result<Option<PayRecord>> {
        let records = self.read_pay_records()?;
        Ok(records.into_iter().find(|r| r.name == name))
    }
}
