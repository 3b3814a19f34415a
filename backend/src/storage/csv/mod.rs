//! # CSV Storage
//!
//! File-based storage under a single data directory:
//!
//! ```text
//! data/
//! ├── service_config.yaml        (optional, see `config`)
//! ├── salary_slips.csv
//! └── payroll_corrections.csv
//! ```

pub mod connection;
pub mod pay_record_repository;
pub mod correction_repository;

#[cfg(test)]
pub mod test_utils;

pub use connection::CsvConnection;
pub use pay_record_repository::PayRecordRepository;
pub use correction_repository::CorrectionRepository;
