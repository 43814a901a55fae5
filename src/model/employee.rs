use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;

/// The fixed set of departments an employee can belong to.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    sqlx::Type,
    ToSchema,
)]
pub enum Department {
    Engineering,
    HR,
    Sales,
    Marketing,
    Finance,
    Operations,
    IT,
    Other,
}

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": 1,
        "full_name": "Jane Doe",
        "email": "jane@co.com",
        "department": "HR"
    })
)]
pub struct Employee {
    #[schema(example = 1)]
    pub id: i64,

    #[schema(example = "Jane Doe")]
    pub full_name: String,

    #[schema(example = "jane@co.com")]
    pub email: String,

    #[schema(example = "HR")]
    pub department: Department,
}
