use crate::error::ApiError;
use crate::model::summary::DashboardSummary;
use crate::models::ApiResponse;
use actix_web::{HttpResponse, Responder, web};
use chrono::Local;
use sqlx::SqlitePool;

/// System-wide summary
#[utoipa::path(
    get,
    path = "/api/dashboard",
    responses(
        (status = 200, description = "Directory and ledger totals plus today's counts", body = Object, example = json!({
            "data": {
                "total_employees": 12, "total_attendance_records": 340,
                "today_present": 9, "today_absent": 2
            }
        }))
    ),
    tag = "Dashboard"
)]
pub async fn dashboard_summary(pool: web::Data<SqlitePool>) -> Result<impl Responder, ApiError> {
    let today = Local::now().date_naive();

    // One statement, one snapshot: the directory and ledger counts cannot
    // drift apart under a concurrent write.
    let (total_employees, total_attendance_records, today_present, today_absent): (
        i64,
        i64,
        i64,
        i64,
    ) = sqlx::query_as(
        "SELECT (SELECT COUNT(*) FROM employees), \
                (SELECT COUNT(*) FROM attendance), \
                COALESCE(SUM(CASE WHEN status = 'Present' THEN 1 ELSE 0 END), 0), \
                COALESCE(SUM(CASE WHEN status = 'Absent' THEN 1 ELSE 0 END), 0) \
         FROM attendance WHERE date = ?",
    )
    .bind(today)
    .fetch_one(pool.get_ref())
    .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::new(DashboardSummary {
        total_employees,
        total_attendance_records,
        today_present,
        today_absent,
    })))
}
