use anyhow::Result;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

pub const SALARY_SLIPS_FILE: &str = "salary_slips.csv";
pub const PAYROLL_CORRECTIONS_FILE: &str = "payroll_corrections.csv";

pub const SALARY_SLIPS_HEADER: &str =
    "name,employee,company,payroll_period,docstatus,absent_days,leave_without_pay,posting_date,total_working_days\n";
pub const PAYROLL_CORRECTIONS_HEADER: &str =
    "name,employee,payroll_period,salary_slip_reference,days_to_reverse,docstatus\n";

/// CsvConnection manages the data directory and the CSV files inside it
#[derive(Debug, Clone)]
pub struct CsvConnection {
    base_directory: PathBuf,
}

impl CsvConnection {
    /// Create a new CSV connection with a base directory
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path)?;
            info!("Created data directory {}", base_path.display());
        }

        Ok(Self {
            base_directory: base_path,
        })
    }

    /// Default data directory: `<platform data dir>/LWP Reversal`
    pub fn default_data_directory() -> Result<PathBuf> {
        dirs::data_dir()
            .or_else(dirs::home_dir)
            .map(|dir| dir.join("LWP Reversal"))
            .ok_or_else(|| anyhow::anyhow!("Could not determine a data directory"))
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    pub fn salary_slips_file_path(&self) -> PathBuf {
        self.base_directory.join(SALARY_SLIPS_FILE)
    }

    pub fn payroll_corrections_file_path(&self) -> PathBuf {
        self.base_directory.join(PAYROLL_CORRECTIONS_FILE)
    }

    /// Ensure the salary slip file exists with its header
    pub fn ensure_salary_slips_file_exists(&self) -> Result<PathBuf> {
        let path = self.salary_slips_file_path();
        Self::ensure_file_exists(&path, SALARY_SLIPS_HEADER)?;
        Ok(path)
    }

    /// Ensure the payroll correction file exists with its header
    pub fn ensure_payroll_corrections_file_exists(&self) -> Result<PathBuf> {
        let path = self.payroll_corrections_file_path();
        Self::ensure_file_exists(&path, PAYROLL_CORRECTIONS_HEADER)?;
        Ok(path)
    }

    fn ensure_file_exists(path: &Path, header: &str) -> Result<()> {
        if !path.exists() {
            fs::write(path, header)?;
            info!("Created {}", path.display());
        }
        Ok(())
    }
}
