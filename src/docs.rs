use crate::api::attendance::MarkAttendance;
use crate::api::employee::CreateEmployee;
use crate::error::FieldError;
use crate::model::attendance::{AttendanceRecord, AttendanceStatus};
use crate::model::employee::{Department, Employee};
use crate::model::summary::{DashboardSummary, EmployeeSummary};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "HRM Lite API",
        version = "1.0.0",
        description = r#"
## HRM Lite

A lightweight HR backend: an employee directory, a per-day attendance ledger,
and derived summary statistics.

### Key Features
- **Employee Directory** — create, list, view, and delete employees
- **Attendance Ledger** — mark Present/Absent per employee per day, filter by
  employee and date
- **Summaries** — per-employee attendance counts and a system-wide dashboard,
  recomputed from the ledger on every read

### Response Format
Successful responses are wrapped as `{ "data": ..., "message"?: ... }`;
errors carry a `"detail"` string (validation errors add a field-level
`"errors"` array).

---
Built with **Rust**, **Actix Web**, and **SQLx**.
"#,
    ),
    paths(
        crate::api::employee::list_employees,
        crate::api::employee::get_employee,
        crate::api::employee::create_employee,
        crate::api::employee::delete_employee,

        crate::api::attendance::list_attendance,
        crate::api::attendance::mark_attendance,
        crate::api::attendance::delete_attendance,
        crate::api::attendance::employee_summary,

        crate::api::dashboard::dashboard_summary,
    ),
    components(
        schemas(
            Employee,
            Department,
            CreateEmployee,
            AttendanceRecord,
            AttendanceStatus,
            MarkAttendance,
            EmployeeSummary,
            DashboardSummary,
            FieldError
        )
    ),
    tags(
        (name = "Employee", description = "Employee directory APIs"),
        (name = "Attendance", description = "Attendance ledger APIs"),
        (name = "Dashboard", description = "System-wide summary APIs"),
    )
)]
pub struct ApiDoc;
