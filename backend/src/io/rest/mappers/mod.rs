pub mod bucket_mapper;
pub mod pay_record_mapper;
pub mod error_mapper;
