use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::{
    models::{CreateScheduleInput, Schedule, ScheduleMutationResponse, UpdateScheduleInput},
    AppError, AppResult, AppState,
};

/// GET /api/schedules
#[utoipa::path(
    get,
    path = "/api/schedules",
    responses(
        (status = 200, description = "List of schedules", body = Vec<Schedule>)
    ),
    tag = "schedules"
)]
pub async fn get_schedules(State(state): State<Arc<AppState>>) -> AppResult<Json<Vec<Schedule>>> {
    let schedules = sqlx::query_as::<_, Schedule>(
        r#"
        SELECT id, name, description, created_at
        FROM "Schedules"
        ORDER BY id
        "#,
    )
    .fetch_all(&state.db)
    .await?;

    Ok(Json(schedules))
}

/// POST /api/schedules - Create a new schedule
#[utoipa::path(
    post,
    path = "/api/schedules",
    request_body = CreateScheduleInput,
    responses(
        (status = 200, description = "Schedule created successfully", body = Schedule),
        (status = 422, description = "Empty schedule name")
    ),
    tag = "schedules"
)]
pub async fn create_schedule(
    State(state): State<Arc<AppState>>,
    Json(input): Json<CreateScheduleInput>,
) -> AppResult<Json<Schedule>> {
    if input.name.trim().is_empty() {
        return Err(AppError::Validation("Schedule name must not be empty".to_string()));
    }

    let schedule = sqlx::query_as::<_, Schedule>(
        r#"
        INSERT INTO "Schedules" (name, description)
        VALUES ($1, $2)
        RETURNING id, name, description, created_at
        "#,
    )
    .bind(input.name.trim())
    .bind(&input.description)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(schedule))
}

/// PUT /api/schedules/{id} - Update a schedule
#[utoipa::path(
    put,
    path = "/api/schedules/{id}",
    params(
        ("id" = i32, Path, description = "Schedule ID")
    ),
    request_body = UpdateScheduleInput,
    responses(
        (status = 200, description = "Schedule updated successfully", body = Schedule),
        (status = 400, description = "No fields to update"),
        (status = 404, description = "Schedule not found")
    ),
    tag = "schedules"
)]
pub async fn update_schedule(
    State(state): State<Arc<AppState>>,
    Path(schedule_id): Path<i32>,
    Json(input): Json<UpdateScheduleInput>,
) -> AppResult<Json<Schedule>> {
    let mut updates = vec![];
    let mut bind_count = 1;

    if input.name.is_some() {
        updates.push(format!("name = ${}", bind_count));
        bind_count += 1;
    }
    if input.description.is_some() {
        updates.push(format!("description = ${}", bind_count));
        bind_count += 1;
    }

    if updates.is_empty() {
        return Err(AppError::BadRequest("No fields to update".to_string()));
    }

    let sql = format!(
        r#"
        UPDATE "Schedules"
        SET {}
        WHERE id = ${}
        RETURNING id, name, description, created_at
        "#,
        updates.join(", "),
        bind_count
    );

    let mut query = sqlx::query_as::<_, Schedule>(&sql);

    if let Some(name) = &input.name {
        query = query.bind(name);
    }
    if let Some(description) = &input.description {
        query = query.bind(description);
    }

    query = query.bind(schedule_id);

    let updated = query.fetch_optional(&state.db).await?;

    match updated {
        Some(schedule) => Ok(Json(schedule)),
        None => Err(AppError::NotFound(format!("Schedule {} not found", schedule_id))),
    }
}

/// DELETE /api/schedules/{id} - Delete a schedule
///
/// Refused while assignments or active staffing requirements still
/// reference the schedule.
#[utoipa::path(
    delete,
    path = "/api/schedules/{id}",
    params(
        ("id" = i32, Path, description = "Schedule ID")
    ),
    responses(
        (status = 200, description = "Schedule deleted successfully", body = ScheduleMutationResponse),
        (status = 404, description = "Schedule not found"),
        (status = 409, description = "Schedule still referenced by assignments or active requirements")
    ),
    tag = "schedules"
)]
pub async fn delete_schedule(
    State(state): State<Arc<AppState>>,
    Path(schedule_id): Path<i32>,
) -> AppResult<Json<ScheduleMutationResponse>> {
    let in_use: bool = sqlx::query_scalar(
        r#"
        SELECT EXISTS (
            SELECT 1 FROM "Assignments" WHERE schedule_id = $1
            UNION
            SELECT 1 FROM "StaffingRequirements" WHERE schedule_id = $1 AND active = true
        )
        "#,
    )
    .bind(schedule_id)
    .fetch_one(&state.db)
    .await?;

    if in_use {
        return Err(AppError::Conflict(format!(
            "Schedule {} still has assignments or active requirements",
            schedule_id
        )));
    }

    let result = sqlx::query(r#"DELETE FROM "Schedules" WHERE id = $1"#)
        .bind(schedule_id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Schedule {} not found", schedule_id)));
    }

    Ok(Json(ScheduleMutationResponse {
        success: true,
        message: Some("Schedule deleted successfully".to_string()),
    }))
}
