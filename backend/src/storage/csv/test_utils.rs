//! Test utilities for CSV-backed tests
//!
//! The temporary data directory is removed when the environment is dropped,
//! even if the test panics.

use anyhow::Result;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

use super::connection::{CsvConnection, PAYROLL_CORRECTIONS_HEADER, SALARY_SLIPS_HEADER};

pub struct TestEnvironment {
    /// Kept alive so the directory outlives the test body
    _temp_dir: TempDir,
    pub connection: CsvConnection,
    pub base_path: PathBuf,
}

impl TestEnvironment {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let base_path = temp_dir.path().to_path_buf();
        let connection = CsvConnection::new(&base_path)?;

        Ok(TestEnvironment {
            _temp_dir: temp_dir,
            connection,
            base_path,
        })
    }

    /// Replace `salary_slips.csv` with the given data rows
    pub fn write_salary_slips(&self, rows: &[&str]) -> Result<()> {
        Self::write_rows(self.connection.salary_slips_file_path(), SALARY_SLIPS_HEADER, rows)
    }

    /// Replace `payroll_corrections.csv` with the given data rows
    pub fn write_payroll_corrections(&self, rows: &[&str]) -> Result<()> {
        Self::write_rows(
            self.connection.payroll_corrections_file_path(),
            PAYROLL_CORRECTIONS_HEADER,
            rows,
        )
    }

    fn write_rows(path: PathBuf, header: &str, rows: &[&str]) -> Result<()> {
        let mut contents = header.to_string();
        for row in rows {
            contents.push_str(row);
            contents.push('\n');
        }
        fs::write(path, contents)?;
        Ok(())
    }
}
