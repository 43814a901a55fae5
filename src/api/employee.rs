use crate::error::{ApiError, FieldError};
use crate::model::employee::{Department, Employee};
use crate::models::ApiResponse;
use crate::utils::validate::is_valid_email;
use actix_web::{HttpResponse, Responder, web};
use serde::Deserialize;
use serde_json::json;
use sqlx::SqlitePool;
use std::str::FromStr;
use tracing::info;
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
pub struct CreateEmployee {
    #[schema(example = "Jane Doe", value_type = String)]
    pub full_name: Option<String>,
    #[schema(example = "jane@co.com", format = "email", value_type = String)]
    pub email: Option<String>,
    #[schema(example = "HR", value_type = String)]
    pub department: Option<String>,
}

/// Validates the create payload, reporting every failing field at once so
/// the caller can fix the whole form in one round trip.
fn validate_create(payload: &CreateEmployee) -> Result<(String, String, Department), ApiError> {
    let mut errors = Vec::new();

    let full_name = payload
        .full_name
        .as_deref()
        .map(str::trim)
        .unwrap_or_default();
    if full_name.is_empty() {
        errors.push(FieldError::new("full_name", "Full name is required"));
    } else if full_name.chars().count() < 2 {
        errors.push(FieldError::new(
            "full_name",
            "Name must be at least 2 characters",
        ));
    }

    let email = payload.email.as_deref().map(str::trim).unwrap_or_default();
    if email.is_empty() {
        errors.push(FieldError::new("email", "Email is required"));
    } else if !is_valid_email(email) {
        errors.push(FieldError::new("email", "Please enter a valid email"));
    }

    let department = match payload.department.as_deref().map(str::trim) {
        None | Some("") => {
            errors.push(FieldError::new("department", "Department is required"));
            None
        }
        Some(raw) => match Department::from_str(raw) {
            Ok(dep) => Some(dep),
            Err(_) => {
                errors.push(FieldError::new(
                    "department",
                    format!("Unknown department: {raw}"),
                ));
                None
            }
        },
    };

    match department {
        Some(dep) if errors.is_empty() => Ok((full_name.to_string(), email.to_string(), dep)),
        _ => Err(ApiError::validation(errors)),
    }
}

/// List employees
#[utoipa::path(
    get,
    path = "/api/employees",
    responses(
        (status = 200, description = "All employees in stable display order", body = Object, example = json!({
            "data": [{ "id": 1, "full_name": "Jane Doe", "email": "jane@co.com", "department": "HR" }]
        }))
    ),
    tag = "Employee"
)]
pub async fn list_employees(pool: web::Data<SqlitePool>) -> Result<impl Responder, ApiError> {
    let employees = sqlx::query_as::<_, Employee>(
        "SELECT id, full_name, email, department FROM employees ORDER BY id",
    )
    .fetch_all(pool.get_ref())
    .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::new(employees)))
}

/// Get one employee by ID
#[utoipa::path(
    get,
    path = "/api/employees/{id}",
    params(("id", Path, description = "Employee ID")),
    responses(
        (status = 200, description = "Employee found", body = Object, example = json!({
            "data": { "id": 1, "full_name": "Jane Doe", "email": "jane@co.com", "department": "HR" }
        })),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "detail": "Employee not found"
        }))
    ),
    tag = "Employee"
)]
pub async fn get_employee(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> Result<impl Responder, ApiError> {
    let id = path.into_inner();

    let employee = sqlx::query_as::<_, Employee>(
        "SELECT id, full_name, email, department FROM employees WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool.get_ref())
    .await?
    .ok_or_else(|| ApiError::not_found("Employee not found"))?;

    Ok(HttpResponse::Ok().json(ApiResponse::new(employee)))
}

/// Create employee
#[utoipa::path(
    post,
    path = "/api/employees",
    request_body = CreateEmployee,
    responses(
        (status = 201, description = "Employee created", body = Object, example = json!({
            "data": { "id": 1, "full_name": "Jane Doe", "email": "jane@co.com", "department": "HR" },
            "message": "Employee added successfully"
        })),
        (status = 400, description = "Validation failed", body = Object, example = json!({
            "detail": "email: Please enter a valid email",
            "errors": [{ "field": "email", "message": "Please enter a valid email" }]
        })),
        (status = 409, description = "Email already in use", body = Object, example = json!({
            "detail": "An employee with this email already exists"
        }))
    ),
    tag = "Employee"
)]
pub async fn create_employee(
    pool: web::Data<SqlitePool>,
    payload: web::Json<CreateEmployee>,
) -> Result<impl Responder, ApiError> {
    let (full_name, email, department) = validate_create(&payload)?;

    let result =
        sqlx::query("INSERT INTO employees (full_name, email, department) VALUES (?, ?, ?)")
            .bind(&full_name)
            .bind(&email)
            .bind(department)
            .execute(pool.get_ref())
            .await;

    let id = match result {
        Ok(res) => res.last_insert_rowid(),
        Err(e) => {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return Err(ApiError::conflict(
                        "An employee with this email already exists",
                    ));
                }
            }
            return Err(e.into());
        }
    };

    info!(id, %email, "employee created");

    let employee = Employee {
        id,
        full_name,
        email,
        department,
    };
    Ok(HttpResponse::Created().json(ApiResponse::with_message(
        employee,
        "Employee added successfully",
    )))
}

/// Delete employee (cascades to attendance)
#[utoipa::path(
    delete,
    path = "/api/employees/{id}",
    params(("id", Path, description = "Employee ID")),
    responses(
        (status = 200, description = "Employee and attendance entries deleted", body = Object, example = json!({
            "data": { "id": 1 },
            "message": "Employee deleted successfully"
        })),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "detail": "Employee not found"
        }))
    ),
    tag = "Employee"
)]
pub async fn delete_employee(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> Result<impl Responder, ApiError> {
    let id = path.into_inner();

    // Cascade and employee removal commit together or not at all.
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM attendance WHERE employee_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    let affected = sqlx::query("DELETE FROM employees WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    if affected == 0 {
        tx.rollback().await?;
        return Err(ApiError::not_found("Employee not found"));
    }

    tx.commit().await?;
    info!(id, "employee deleted with attendance cascade");

    Ok(HttpResponse::Ok().json(ApiResponse::with_message(
        json!({ "id": id }),
        "Employee deleted successfully",
    )))
}
