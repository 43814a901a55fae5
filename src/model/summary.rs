use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Attendance counts for one employee, recomputed from the ledger on every
/// read. Invariant: `total_days == total_present + total_absent`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(
    example = json!({
        "employee_id": 1,
        "total_days": 1,
        "total_present": 1,
        "total_absent": 0,
        "attendance_percentage": 100
    })
)]
pub struct EmployeeSummary {
    #[schema(example = 1)]
    pub employee_id: i64,
    #[schema(example = 1)]
    pub total_days: i64,
    #[schema(example = 1)]
    pub total_present: i64,
    #[schema(example = 0)]
    pub total_absent: i64,
    /// round(total_present / total_days * 100); 0 when there are no entries.
    #[schema(example = 100)]
    pub attendance_percentage: i64,
}

/// System-wide counts for the dashboard cards.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(
    example = json!({
        "total_employees": 12,
        "total_attendance_records": 340,
        "today_present": 9,
        "today_absent": 2
    })
)]
pub struct DashboardSummary {
    #[schema(example = 12)]
    pub total_employees: i64,
    #[schema(example = 340)]
    pub total_attendance_records: i64,
    #[schema(example = 9)]
    pub today_present: i64,
    #[schema(example = 2)]
    pub today_absent: i64,
}
