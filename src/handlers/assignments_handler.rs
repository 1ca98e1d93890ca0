use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use std::sync::Arc;
use utoipa::IntoParams;
use uuid::Uuid;

use crate::{
    models::{
        parse_time_of_day, Assignment, AssignmentMutationResponse, CreateAssignmentInput,
        UpdateAssignmentInput,
    },
    AppError, AppResult, AppState,
};

const ASSIGNMENT_COLUMNS: &str = r#"
    uuid,
    schedule_id,
    employee_id,
    shift_label,
    to_char(start, 'HH24:MI') AS start,
    to_char("end", 'HH24:MI') AS "end",
    published,
    date,
    created_at
"#;

#[derive(Debug, Deserialize, IntoParams)]
pub struct GetAssignmentsQuery {
    pub year: Option<i32>,
    pub month: Option<i32>,
    #[serde(rename = "scheduleId")]
    pub schedule_id: Option<i32>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct GetAssignmentsByDateQuery {
    pub date: String,
    #[serde(rename = "scheduleId")]
    pub schedule_id: Option<i32>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct GetAssignmentsRangeQuery {
    pub start: String,
    pub end: String,
    #[serde(rename = "scheduleId")]
    pub schedule_id: Option<i32>,
}

/// GET /api/assignments?year=&month=&scheduleId=
#[utoipa::path(
    get,
    path = "/api/assignments",
    params(GetAssignmentsQuery),
    responses(
        (status = 200, description = "Assignments for the given month, optionally filtered by schedule", body = Vec<Assignment>)
    ),
    tag = "assignments"
)]
pub async fn get_assignments_for_month(
    State(state): State<Arc<AppState>>,
    Query(query): Query<GetAssignmentsQuery>,
) -> AppResult<Json<Vec<Assignment>>> {
    tracing::debug!(
        "get_assignments_for_month called with year={:?}, month={:?}, schedule_id={:?}",
        query.year,
        query.month,
        query.schedule_id
    );

    let mut sql = format!(
        r#"SELECT {} FROM "Assignments" WHERE 1=1"#,
        ASSIGNMENT_COLUMNS
    );

    let mut bindings = vec![];

    if let Some(year) = query.year {
        if let Some(month) = query.month {
            sql.push_str(&format!(" AND EXTRACT(YEAR FROM date) = ${}", bindings.len() + 1));
            bindings.push(year);
            sql.push_str(&format!(" AND EXTRACT(MONTH FROM date) = ${}", bindings.len() + 1));
            bindings.push(month);
        }
    }

    if let Some(schedule_id) = query.schedule_id {
        sql.push_str(&format!(" AND schedule_id = ${}", bindings.len() + 1));
        bindings.push(schedule_id);
    }

    sql.push_str(" ORDER BY date, start");

    let mut query_builder = sqlx::query_as::<_, Assignment>(&sql);
    for binding in bindings {
        query_builder = query_builder.bind(binding);
    }

    let assignments = query_builder.fetch_all(&state.db).await?;

    Ok(Json(assignments))
}

/// GET /api/assignments/by-date?date=&scheduleId=
#[utoipa::path(
    get,
    path = "/api/assignments/by-date",
    params(GetAssignmentsByDateQuery),
    responses(
        (status = 200, description = "Assignments for a specific date", body = Vec<Assignment>),
        (status = 400, description = "Invalid date format")
    ),
    tag = "assignments"
)]
pub async fn get_assignments_for_date(
    State(state): State<Arc<AppState>>,
    Query(query): Query<GetAssignmentsByDateQuery>,
) -> AppResult<Json<Vec<Assignment>>> {
    let date = NaiveDate::parse_from_str(&query.date, "%Y-%m-%d")
        .map_err(|e| AppError::BadRequest(format!("Invalid date format: {}", e)))?;

    let mut sql = format!(
        r#"SELECT {} FROM "Assignments" WHERE date = $1"#,
        ASSIGNMENT_COLUMNS
    );

    if query.schedule_id.is_some() {
        sql.push_str(" AND schedule_id = $2");
    }

    sql.push_str(" ORDER BY start, employee_id");

    let mut query_builder = sqlx::query_as::<_, Assignment>(&sql).bind(date);
    if let Some(schedule_id) = query.schedule_id {
        query_builder = query_builder.bind(schedule_id);
    }

    let assignments = query_builder.fetch_all(&state.db).await?;

    Ok(Json(assignments))
}

/// GET /api/assignments/range?start=&end=&scheduleId=
#[utoipa::path(
    get,
    path = "/api/assignments/range",
    params(GetAssignmentsRangeQuery),
    responses(
        (status = 200, description = "Assignments within a date range", body = Vec<Assignment>),
        (status = 400, description = "Invalid date format")
    ),
    tag = "assignments"
)]
pub async fn get_assignments_for_range(
    State(state): State<Arc<AppState>>,
    Query(query): Query<GetAssignmentsRangeQuery>,
) -> AppResult<Json<Vec<Assignment>>> {
    let start_date = NaiveDate::parse_from_str(&query.start, "%Y-%m-%d")
        .map_err(|e| AppError::BadRequest(format!("Invalid start date: {}", e)))?;
    let end_date = NaiveDate::parse_from_str(&query.end, "%Y-%m-%d")
        .map_err(|e| AppError::BadRequest(format!("Invalid end date: {}", e)))?;

    if end_date < start_date {
        return Err(AppError::BadRequest("end date is before start date".to_string()));
    }

    let mut sql = format!(
        r#"SELECT {} FROM "Assignments" WHERE date >= $1 AND date <= $2"#,
        ASSIGNMENT_COLUMNS
    );

    if query.schedule_id.is_some() {
        sql.push_str(" AND schedule_id = $3");
    }

    sql.push_str(" ORDER BY date, start");

    let mut query_builder = sqlx::query_as::<_, Assignment>(&sql)
        .bind(start_date)
        .bind(end_date);
    if let Some(schedule_id) = query.schedule_id {
        query_builder = query_builder.bind(schedule_id);
    }

    let assignments = query_builder.fetch_all(&state.db).await?;

    Ok(Json(assignments))
}

/// POST /api/assignments - Schedule an employee onto a shift
#[utoipa::path(
    post,
    path = "/api/assignments",
    request_body = CreateAssignmentInput,
    responses(
        (status = 200, description = "Assignment created successfully", body = Assignment),
        (status = 422, description = "Invalid shift times")
    ),
    tag = "assignments"
)]
pub async fn create_assignment(
    State(state): State<Arc<AppState>>,
    Json(input): Json<CreateAssignmentInput>,
) -> AppResult<Json<Assignment>> {
    let start = parse_time_of_day(&input.start)
        .ok_or_else(|| AppError::Validation(format!("start '{}' is not a valid HH:MM time", input.start)))?;
    let end = parse_time_of_day(&input.end)
        .ok_or_else(|| AppError::Validation(format!("end '{}' is not a valid HH:MM time", input.end)))?;

    let assignment_uuid = Uuid::new_v4();

    let sql = format!(
        r#"
        INSERT INTO "Assignments" (
            uuid, schedule_id, employee_id, shift_label, start, "end", published, date
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING {}
        "#,
        ASSIGNMENT_COLUMNS
    );

    let assignment = sqlx::query_as::<_, Assignment>(&sql)
        .bind(assignment_uuid)
        .bind(input.schedule_id)
        .bind(input.employee_id)
        .bind(&input.shift_label)
        .bind(start)
        .bind(end)
        .bind(input.published)
        .bind(input.date)
        .fetch_one(&state.db)
        .await?;

    Ok(Json(assignment))
}

/// PUT /api/assignments/{uuid} - Update an assignment
#[utoipa::path(
    put,
    path = "/api/assignments/{uuid}",
    params(
        ("uuid" = Uuid, Path, description = "Assignment UUID")
    ),
    request_body = UpdateAssignmentInput,
    responses(
        (status = 200, description = "Assignment updated successfully", body = Assignment),
        (status = 400, description = "No fields to update"),
        (status = 404, description = "Assignment not found"),
        (status = 422, description = "Invalid shift times")
    ),
    tag = "assignments"
)]
pub async fn update_assignment(
    State(state): State<Arc<AppState>>,
    Path(uuid): Path<Uuid>,
    Json(input): Json<UpdateAssignmentInput>,
) -> AppResult<Json<Assignment>> {
    let start = input
        .start
        .as_deref()
        .map(|s| {
            parse_time_of_day(s)
                .ok_or_else(|| AppError::Validation(format!("start '{}' is not a valid HH:MM time", s)))
        })
        .transpose()?;
    let end = input
        .end
        .as_deref()
        .map(|s| {
            parse_time_of_day(s)
                .ok_or_else(|| AppError::Validation(format!("end '{}' is not a valid HH:MM time", s)))
        })
        .transpose()?;

    // Build dynamic UPDATE query
    let mut updates = vec![];
    let mut bind_count = 1;

    if input.schedule_id.is_some() {
        updates.push(format!("schedule_id = ${}", bind_count));
        bind_count += 1;
    }
    if input.employee_id.is_some() {
        updates.push(format!("employee_id = ${}", bind_count));
        bind_count += 1;
    }
    if input.shift_label.is_some() {
        updates.push(format!("shift_label = ${}", bind_count));
        bind_count += 1;
    }
    if start.is_some() {
        updates.push(format!("start = ${}", bind_count));
        bind_count += 1;
    }
    if end.is_some() {
        updates.push(format!("\"end\" = ${}", bind_count));
        bind_count += 1;
    }
    if input.published.is_some() {
        updates.push(format!("published = ${}", bind_count));
        bind_count += 1;
    }
    if input.date.is_some() {
        updates.push(format!("date = ${}", bind_count));
        bind_count += 1;
    }

    if updates.is_empty() {
        return Err(AppError::BadRequest("No fields to update".to_string()));
    }

    let sql = format!(
        r#"
        UPDATE "Assignments"
        SET {}
        WHERE uuid = ${}
        RETURNING {}
        "#,
        updates.join(", "),
        bind_count,
        ASSIGNMENT_COLUMNS
    );

    let mut query = sqlx::query_as::<_, Assignment>(&sql);

    if let Some(schedule_id) = input.schedule_id {
        query = query.bind(schedule_id);
    }
    if let Some(employee_id) = input.employee_id {
        query = query.bind(employee_id);
    }
    if let Some(shift_label) = &input.shift_label {
        query = query.bind(shift_label);
    }
    if let Some(start) = start {
        query = query.bind(start);
    }
    if let Some(end) = end {
        query = query.bind(end);
    }
    if let Some(published) = input.published {
        query = query.bind(published);
    }
    if let Some(date) = input.date {
        query = query.bind(date);
    }

    query = query.bind(uuid);

    let updated = query.fetch_optional(&state.db).await?;

    match updated {
        Some(assignment) => Ok(Json(assignment)),
        None => Err(AppError::NotFound(format!("Assignment {} not found", uuid))),
    }
}

/// DELETE /api/assignments/{uuid} - Remove an assignment
#[utoipa::path(
    delete,
    path = "/api/assignments/{uuid}",
    params(
        ("uuid" = Uuid, Path, description = "Assignment UUID")
    ),
    responses(
        (status = 200, description = "Assignment deleted successfully", body = AssignmentMutationResponse),
        (status = 404, description = "Assignment not found")
    ),
    tag = "assignments"
)]
pub async fn delete_assignment(
    State(state): State<Arc<AppState>>,
    Path(uuid): Path<Uuid>,
) -> AppResult<Json<AssignmentMutationResponse>> {
    let result = sqlx::query(r#"DELETE FROM "Assignments" WHERE uuid = $1"#)
        .bind(uuid)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Assignment {} not found", uuid)));
    }

    Ok(Json(AssignmentMutationResponse {
        success: true,
        assignment_uuid: Some(uuid),
        message: Some("Assignment deleted successfully".to_string()),
    }))
}
