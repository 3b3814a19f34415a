//! # CSV Payroll Correction Repository
//!
//! Reads payroll corrections from `payroll_corrections.csv`. Only submitted
//! corrections (docstatus 1) count as reversals already applied to a slip.
//!
//! ```csv
//! name,employee,payroll_period,salary_slip_reference,days_to_reverse,docstatus
//! PC-0001,EMP-001,FY-2025,SS-3,2,1
//! ```

use anyhow::Result;
use async_trait::async_trait;
use csv::Reader;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use shared::DocStatus;
use std::fs::File;
use std::io::BufReader;

use super::connection::CsvConnection;
use crate::domain::models::submitted_reversal::SubmittedReversal;
use crate::storage::CorrectionStorage;

/// CSV record structure for payroll corrections
#[derive(Debug, Clone, Serialize, Deserialize)]
struct PayrollCorrectionRecord {
    name: String,
    employee: String,
    payroll_period: String,
    salary_slip_reference: String,
    #[serde(default)]
    days_to_reverse: Option<u32>,
    docstatus: u8,
}

#[derive(Debug, Clone)]
pub struct CorrectionRepository {
    connection: CsvConnection,
}

impl CorrectionRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }

    fn read_submitted(&self) -> Result<Vec<SubmittedReversal>> {
        let file_path = self.connection.ensure_payroll_corrections_file_exists()?;
        let file = File::open(&file_path)?;
        let mut csv_reader = Reader::from_reader(BufReader::new(file));

        let mut reversals = Vec::new();
        for (index, row) in csv_reader.deserialize::<PayrollCorrectionRecord>().enumerate() {
            let record = match row {
                Ok(record) => record,
                Err(e) => {
                    warn!("Skipping payroll correction on line {}: {}", index + 2, e);
                    continue;
                }
            };

            if DocStatus::try_from(record.docstatus) != Ok(DocStatus::Submitted) {
                continue;
            }

            reversals.push(SubmittedReversal {
                name: record.name,
                employee: record.employee,
                payroll_period: record.payroll_period,
                salary_slip_reference: record.salary_slip_reference,
                days_to_reverse: record.days_to_reverse.unwrap_or(0),
            });
        }

        debug!("Read {} submitted corrections from {}", reversals.len(), file_path.display());
        Ok(reversals)
    }
}

#[async_trait]
impl CorrectionStorage for CorrectionRepository {
    async fn list_submitted_reversals(
        &self,
        employee: &str,
        payroll_period: &str,
        salary_slip_reference: &str,
    ) -> Result<Vec<SubmittedReversal>> {
        Ok(self
            .read_submitted()?
            .into_iter()
            .filter(|r| {
                r.employee == employee
                    && r.payroll_period == payroll_period
                    && r.salary_slip_reference == salary_slip_reference
            })
            .collect())
    }
}
