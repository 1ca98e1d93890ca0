use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::IntoParams;

use crate::{
    models::{CreateEmployeeInput, Employee, EmployeeMutationResponse, UpdateEmployeeInput},
    AppError, AppResult, AppState,
};

#[derive(Debug, Deserialize, IntoParams)]
pub struct GetEmployeesQuery {
    #[serde(rename = "supervisorsOnly")]
    pub supervisors_only: Option<bool>,
}

/// GET /api/employees?supervisorsOnly=
#[utoipa::path(
    get,
    path = "/api/employees",
    params(GetEmployeesQuery),
    responses(
        (status = 200, description = "List of employees", body = Vec<Employee>)
    ),
    tag = "employees"
)]
pub async fn get_employees(
    State(state): State<Arc<AppState>>,
    Query(query): Query<GetEmployeesQuery>,
) -> AppResult<Json<Vec<Employee>>> {
    let mut sql = r#"
        SELECT id, full_name, short_name, is_supervisor, color, created_at
        FROM "Employees"
    "#
    .to_string();

    if query.supervisors_only.unwrap_or(false) {
        sql.push_str(" WHERE is_supervisor = true");
    }

    sql.push_str(" ORDER BY short_name, id");

    let employees = sqlx::query_as::<_, Employee>(&sql)
        .fetch_all(&state.db)
        .await?;

    Ok(Json(employees))
}

/// POST /api/employees - Create a new employee
#[utoipa::path(
    post,
    path = "/api/employees",
    request_body = CreateEmployeeInput,
    responses(
        (status = 200, description = "Employee created successfully", body = Employee),
        (status = 422, description = "Empty name")
    ),
    tag = "employees"
)]
pub async fn create_employee(
    State(state): State<Arc<AppState>>,
    Json(input): Json<CreateEmployeeInput>,
) -> AppResult<Json<Employee>> {
    if input.full_name.trim().is_empty() || input.short_name.trim().is_empty() {
        return Err(AppError::Validation(
            "full_name and short_name must not be empty".to_string(),
        ));
    }

    let employee = sqlx::query_as::<_, Employee>(
        r#"
        INSERT INTO "Employees" (full_name, short_name, is_supervisor, color)
        VALUES ($1, $2, $3, $4)
        RETURNING id, full_name, short_name, is_supervisor, color, created_at
        "#,
    )
    .bind(input.full_name.trim())
    .bind(input.short_name.trim())
    .bind(input.is_supervisor)
    .bind(&input.color)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(employee))
}

/// PUT /api/employees/{id} - Update an employee
#[utoipa::path(
    put,
    path = "/api/employees/{id}",
    params(
        ("id" = i32, Path, description = "Employee ID")
    ),
    request_body = UpdateEmployeeInput,
    responses(
        (status = 200, description = "Employee updated successfully", body = Employee),
        (status = 400, description = "No fields to update"),
        (status = 404, description = "Employee not found")
    ),
    tag = "employees"
)]
pub async fn update_employee(
    State(state): State<Arc<AppState>>,
    Path(employee_id): Path<i32>,
    Json(input): Json<UpdateEmployeeInput>,
) -> AppResult<Json<Employee>> {
    let mut updates = vec![];
    let mut bind_count = 1;

    if input.full_name.is_some() {
        updates.push(format!("full_name = ${}", bind_count));
        bind_count += 1;
    }
    if input.short_name.is_some() {
        updates.push(format!("short_name = ${}", bind_count));
        bind_count += 1;
    }
    if input.is_supervisor.is_some() {
        updates.push(format!("is_supervisor = ${}", bind_count));
        bind_count += 1;
    }
    if input.color.is_some() {
        updates.push(format!("color = ${}", bind_count));
        bind_count += 1;
    }

    if updates.is_empty() {
        return Err(AppError::BadRequest("No fields to update".to_string()));
    }

    let sql = format!(
        r#"
        UPDATE "Employees"
        SET {}
        WHERE id = ${}
        RETURNING id, full_name, short_name, is_supervisor, color, created_at
        "#,
        updates.join(", "),
        bind_count
    );

    let mut query = sqlx::query_as::<_, Employee>(&sql);

    if let Some(full_name) = &input.full_name {
        query = query.bind(full_name);
    }
    if let Some(short_name) = &input.short_name {
        query = query.bind(short_name);
    }
    if let Some(is_supervisor) = input.is_supervisor {
        query = query.bind(is_supervisor);
    }
    if let Some(color) = &input.color {
        query = query.bind(color);
    }

    query = query.bind(employee_id);

    let updated = query.fetch_optional(&state.db).await?;

    match updated {
        Some(employee) => Ok(Json(employee)),
        None => Err(AppError::NotFound(format!("Employee {} not found", employee_id))),
    }
}

/// DELETE /api/employees/{id} - Delete an employee
#[utoipa::path(
    delete,
    path = "/api/employees/{id}",
    params(
        ("id" = i32, Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Employee deleted successfully", body = EmployeeMutationResponse),
        (status = 404, description = "Employee not found"),
        (status = 409, description = "Employee still has assignments")
    ),
    tag = "employees"
)]
pub async fn delete_employee(
    State(state): State<Arc<AppState>>,
    Path(employee_id): Path<i32>,
) -> AppResult<Json<EmployeeMutationResponse>> {
    let assigned: bool = sqlx::query_scalar(
        r#"SELECT EXISTS (SELECT 1 FROM "Assignments" WHERE employee_id = $1)"#,
    )
    .bind(employee_id)
    .fetch_one(&state.db)
    .await?;

    if assigned {
        return Err(AppError::Conflict(format!(
            "Employee {} still has assignments",
            employee_id
        )));
    }

    let result = sqlx::query(r#"DELETE FROM "Employees" WHERE id = $1"#)
        .bind(employee_id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Employee {} not found", employee_id)));
    }

    Ok(Json(EmployeeMutationResponse {
        success: true,
        message: Some("Employee deleted successfully".to_string()),
    }))
}
