use crate::domain::models::correction_draft::SelectionKeys;
use crate::domain::models::pay_record::PayRecord;
use shared::{LwpMonthsRequest, SalarySlipListRequest, SalarySlipSummary};

pub struct PayRecordMapper;

impl PayRecordMapper {
    pub fn to_summary(record: &PayRecord) -> SalarySlipSummary {
        SalarySlipSummary {
            name: record.name.clone(),
            absent_days: record.absent_days,
            leave_without_pay: record.leave_without_pay_days,
            posting_date: record.posting_date,
            total_working_days: record.total_working_days,
        }
    }

    pub fn keys_from_list_request(request: SalarySlipListRequest) -> SelectionKeys {
        SelectionKeys {
            employee: request.employee,
            payroll_period: request.payroll_period,
            company: request.company,
        }
    }

    pub fn keys_from_months_request(request: LwpMonthsRequest) -> SelectionKeys {
        SelectionKeys {
            employee: request.employee,
            payroll_period: request.payroll_period,
            company: request.company,
        }
    }

    pub fn to_months_request(keys: &SelectionKeys) -> LwpMonthsRequest {
        LwpMonthsRequest {
            employee: keys.employee.clone(),
            payroll_period: keys.payroll_period.clone(),
            company: keys.company.clone(),
        }
    }
}
