//! # Storage Module
//!
//! Read access to the payroll data the reversal logic works on: finalized
//! salary slips and previously submitted payroll corrections.
//!
//! The domain layer only sees the traits in [`traits`]; the CSV
//! implementation in [`csv`] keeps one file per record type under a data
//! directory, so a different backend can be slotted in without touching the
//! domain services.

pub mod traits;
pub mod csv;

pub use traits::*;
