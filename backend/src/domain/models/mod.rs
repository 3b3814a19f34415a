pub mod pay_record;
pub mod month_bucket;
pub mod correction_draft;
pub mod submitted_reversal;
