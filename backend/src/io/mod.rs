//! # IO Module
//!
//! Adapters between the outside world and the domain layer.
//!
//! - **rest**: axum handlers serving the generic salary slip query, the
//!   delegated month aggregation and the field/submission checks
//! - **remote_slip_fetcher**: client for a remote service that performs the
//!   month aggregation itself
//!
//! Handlers translate `shared` DTOs to domain types through the mappers and
//! map domain failures to HTTP status codes; they hold no business rules.

pub mod rest;
pub mod remote_slip_fetcher;

pub use remote_slip_fetcher::HttpSlipFetcher;
