use crate::domain::models::month_bucket::MonthBucket;
use crate::domain::month_aggregator::Aggregation;
use shared::{LwpMonthsResponse, LwpSlipDetail};

pub struct BucketMapper;

impl BucketMapper {
    pub fn to_dto(bucket: &MonthBucket) -> LwpSlipDetail {
        LwpSlipDetail {
            month_name: bucket.month_label.clone(),
            salary_slip_reference: bucket.record_reference.clone(),
            absent_days: bucket.absent_days,
            leave_without_pay: bucket.lwp_days,
            working_days: bucket.working_days,
            total_lwp_applied: bucket.total_days_applied,
            posting_date: bucket.posting_date,
        }
    }

    /// Fields are taken as received; run `MonthAggregator::sanitize` before trusting them
    pub fn to_domain(dto: LwpSlipDetail) -> MonthBucket {
        MonthBucket {
            month_label: dto.month_name,
            record_reference: dto.salary_slip_reference,
            absent_days: dto.absent_days,
            lwp_days: dto.leave_without_pay,
            working_days: dto.working_days,
            total_days_applied: dto.total_lwp_applied,
            posting_date: dto.posting_date,
        }
    }

    pub fn to_response(aggregation: &Aggregation) -> LwpMonthsResponse {
        LwpMonthsResponse {
            months: aggregation.available_months.clone(),
            slip_details: aggregation.buckets.iter().map(Self::to_dto).collect(),
        }
    }

    pub fn from_response(response: LwpMonthsResponse) -> Aggregation {
        Aggregation {
            available_months: response.months,
            buckets: response.slip_details.into_iter().map(Self::to_domain).collect(),
        }
    }
}
