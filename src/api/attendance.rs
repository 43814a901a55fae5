use crate::error::{ApiError, FieldError};
use crate::model::attendance::{AttendanceRecord, AttendanceStatus};
use crate::model::summary::EmployeeSummary;
use crate::models::ApiResponse;
use actix_web::{HttpResponse, Responder, web};
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use serde_json::json;
use sqlx::SqlitePool;
use std::str::FromStr;
use tracing::info;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Deserialize, IntoParams)]
pub struct AttendanceQuery {
    /// Restrict to one employee
    pub employee_id: Option<String>,
    /// Restrict to one calendar date (YYYY-MM-DD)
    pub date: Option<String>,
}

#[derive(Deserialize, ToSchema)]
pub struct MarkAttendance {
    #[schema(example = 1, value_type = i64)]
    pub employee_id: Option<i64>,
    #[schema(example = "2024-01-10", format = "date", value_type = String)]
    pub date: Option<String>,
    #[schema(example = "Present", value_type = String)]
    pub status: Option<String>,
}

// The client leaves unused filters as empty strings, so "" means absent.
fn parse_employee_filter(raw: Option<&str>) -> Result<Option<i64>, ApiError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s
            .parse::<i64>()
            .map(Some)
            .map_err(|_| ApiError::field("employee_id", "Employee ID must be a number")),
    }
}

fn parse_date_filter(raw: Option<&str>) -> Result<Option<NaiveDate>, ApiError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| ApiError::field("date", "Date must be in YYYY-MM-DD format")),
    }
}

/// List attendance entries
#[utoipa::path(
    get,
    path = "/api/attendance",
    params(AttendanceQuery),
    responses(
        (status = 200, description = "Entries matching the filters, newest first", body = Object, example = json!({
            "data": [{
                "id": 1, "employee_id": 1, "date": "2024-01-10",
                "status": "Present", "employee_name": "Jane Doe"
            }]
        }))
    ),
    tag = "Attendance"
)]
pub async fn list_attendance(
    pool: web::Data<SqlitePool>,
    query: web::Query<AttendanceQuery>,
) -> Result<impl Responder, ApiError> {
    let employee_id = parse_employee_filter(query.employee_id.as_deref())?;
    let date = parse_date_filter(query.date.as_deref())?;

    let mut conditions = Vec::new();
    if employee_id.is_some() {
        conditions.push("a.employee_id = ?");
    }
    if date.is_some() {
        conditions.push("a.date = ?");
    }
    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };

    let sql = format!(
        "SELECT a.id, a.employee_id, a.date, a.status, e.full_name AS employee_name \
         FROM attendance a \
         LEFT JOIN employees e ON e.id = a.employee_id \
         {where_clause} \
         ORDER BY a.date DESC, a.id DESC"
    );

    let mut data_query = sqlx::query_as::<_, AttendanceRecord>(&sql);
    if let Some(id) = employee_id {
        data_query = data_query.bind(id);
    }
    if let Some(d) = date {
        data_query = data_query.bind(d);
    }

    let entries = data_query.fetch_all(pool.get_ref()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::new(entries)))
}

fn validate_mark(payload: &MarkAttendance) -> Result<(i64, NaiveDate, AttendanceStatus), ApiError> {
    let mut errors = Vec::new();

    let employee_id = payload.employee_id;
    if employee_id.is_none() {
        errors.push(FieldError::new("employee_id", "Please select an employee"));
    }

    let date = match payload.date.as_deref().map(str::trim) {
        None | Some("") => {
            errors.push(FieldError::new("date", "Date is required"));
            None
        }
        Some(raw) => match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            Ok(d) if d > Local::now().date_naive() => {
                errors.push(FieldError::new("date", "Date cannot be in the future"));
                None
            }
            Ok(d) => Some(d),
            Err(_) => {
                errors.push(FieldError::new("date", "Date must be in YYYY-MM-DD format"));
                None
            }
        },
    };

    let status = match payload.status.as_deref().map(str::trim) {
        None | Some("") => {
            errors.push(FieldError::new("status", "Status is required"));
            None
        }
        Some(raw) => match AttendanceStatus::from_str(raw) {
            Ok(s) => Some(s),
            Err(_) => {
                errors.push(FieldError::new("status", "Status must be Present or Absent"));
                None
            }
        },
    };

    match (employee_id, date, status) {
        (Some(id), Some(d), Some(s)) if errors.is_empty() => Ok((id, d, s)),
        _ => Err(ApiError::validation(errors)),
    }
}

/// Mark attendance
#[utoipa::path(
    post,
    path = "/api/attendance",
    request_body = MarkAttendance,
    responses(
        (status = 201, description = "Attendance marked", body = Object, example = json!({
            "data": {
                "id": 1, "employee_id": 1, "date": "2024-01-10",
                "status": "Present", "employee_name": "Jane Doe"
            },
            "message": "Attendance marked successfully"
        })),
        (status = 400, description = "Validation failed", body = Object, example = json!({
            "detail": "date: Date cannot be in the future"
        })),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "detail": "Employee not found"
        })),
        (status = 409, description = "Already marked for this date", body = Object, example = json!({
            "detail": "Attendance already marked for this employee on 2024-01-10"
        }))
    ),
    tag = "Attendance"
)]
pub async fn mark_attendance(
    pool: web::Data<SqlitePool>,
    payload: web::Json<MarkAttendance>,
) -> Result<impl Responder, ApiError> {
    let (employee_id, date, status) = validate_mark(&payload)?;

    let employee_name =
        sqlx::query_scalar::<_, String>("SELECT full_name FROM employees WHERE id = ?")
            .bind(employee_id)
            .fetch_optional(pool.get_ref())
            .await?
            .ok_or_else(|| ApiError::not_found("Employee not found"))?;

    let result = sqlx::query("INSERT INTO attendance (employee_id, date, status) VALUES (?, ?, ?)")
        .bind(employee_id)
        .bind(date)
        .bind(status)
        .execute(pool.get_ref())
        .await;

    let id = match result {
        Ok(res) => res.last_insert_rowid(),
        Err(e) => {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return Err(ApiError::conflict(format!(
                        "Attendance already marked for this employee on {date}"
                    )));
                }
                // The employee was deleted between the existence check and
                // the insert.
                if db_err.is_foreign_key_violation() {
                    return Err(ApiError::not_found("Employee not found"));
                }
            }
            return Err(e.into());
        }
    };

    info!(id, employee_id, %date, %status, "attendance marked");

    let entry = AttendanceRecord {
        id,
        employee_id,
        date,
        status,
        employee_name: Some(employee_name),
    };
    Ok(HttpResponse::Created().json(ApiResponse::with_message(
        entry,
        "Attendance marked successfully",
    )))
}

/// Delete one attendance entry
#[utoipa::path(
    delete,
    path = "/api/attendance/{id}",
    params(("id", Path, description = "Attendance record ID")),
    responses(
        (status = 200, description = "Entry deleted", body = Object, example = json!({
            "data": { "id": 1 },
            "message": "Attendance record deleted"
        })),
        (status = 404, description = "Unknown record ID", body = Object, example = json!({
            "detail": "Attendance record not found"
        }))
    ),
    tag = "Attendance"
)]
pub async fn delete_attendance(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> Result<impl Responder, ApiError> {
    let id = path.into_inner();

    let affected = sqlx::query("DELETE FROM attendance WHERE id = ?")
        .bind(id)
        .execute(pool.get_ref())
        .await?
        .rows_affected();

    if affected == 0 {
        return Err(ApiError::not_found("Attendance record not found"));
    }

    Ok(HttpResponse::Ok().json(ApiResponse::with_message(
        json!({ "id": id }),
        "Attendance record deleted",
    )))
}

/// Per-employee attendance summary
#[utoipa::path(
    get,
    path = "/api/attendance/summary/{employee_id}",
    params(("employee_id", Path, description = "Employee ID")),
    responses(
        (status = 200, description = "Counts recomputed from the current ledger", body = Object, example = json!({
            "data": {
                "employee_id": 1, "total_days": 1, "total_present": 1,
                "total_absent": 0, "attendance_percentage": 100
            }
        })),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "detail": "Employee not found"
        }))
    ),
    tag = "Attendance"
)]
pub async fn employee_summary(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> Result<impl Responder, ApiError> {
    let employee_id = path.into_inner();

    // Existence check and aggregate in one statement, so a concurrent
    // delete cannot slip between them and turn a 404 into a zeroed summary.
    let (exists, total_days, total_present, total_absent): (i64, i64, i64, i64) = sqlx::query_as(
        "SELECT (SELECT COUNT(*) FROM employees WHERE id = ?1), \
                COUNT(*), \
                COALESCE(SUM(CASE WHEN status = 'Present' THEN 1 ELSE 0 END), 0), \
                COALESCE(SUM(CASE WHEN status = 'Absent' THEN 1 ELSE 0 END), 0) \
         FROM attendance WHERE employee_id = ?1",
    )
    .bind(employee_id)
    .fetch_one(pool.get_ref())
    .await?;

    if exists == 0 {
        return Err(ApiError::not_found("Employee not found"));
    }

    let attendance_percentage = if total_days > 0 {
        (total_present as f64 * 100.0 / total_days as f64).round() as i64
    } else {
        0
    };

    Ok(HttpResponse::Ok().json(ApiResponse::new(EmployeeSummary {
        employee_id,
        total_days,
        total_present,
        total_absent,
        attendance_percentage,
    })))
}
