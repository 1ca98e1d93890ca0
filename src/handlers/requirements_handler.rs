use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::IntoParams;

use crate::{
    models::{
        parse_time_of_day, CreateRequirementInput, RequirementMutationResponse,
        StaffingRequirement, UpdateRequirementInput,
    },
    AppError, AppResult, AppState,
};

const REQUIREMENT_COLUMNS: &str = r#"
    id,
    schedule_id,
    day_of_week,
    to_char(start_time, 'HH24:MI') AS start_time,
    to_char(end_time, 'HH24:MI') AS end_time,
    min_employees,
    min_supervisors,
    notes,
    active,
    created_at
"#;

#[derive(Debug, Deserialize, IntoParams)]
pub struct GetRequirementsQuery {
    #[serde(rename = "scheduleId")]
    pub schedule_id: Option<i32>,
    #[serde(rename = "dayOfWeek")]
    pub day_of_week: Option<i16>,
    #[serde(rename = "includeInactive")]
    pub include_inactive: Option<bool>,
}

/// GET /api/requirements?scheduleId=&dayOfWeek=&includeInactive=
#[utoipa::path(
    get,
    path = "/api/requirements",
    params(GetRequirementsQuery),
    responses(
        (status = 200, description = "Staffing requirements, active only unless includeInactive is set", body = Vec<StaffingRequirement>)
    ),
    tag = "requirements"
)]
pub async fn get_requirements(
    State(state): State<Arc<AppState>>,
    Query(query): Query<GetRequirementsQuery>,
) -> AppResult<Json<Vec<StaffingRequirement>>> {
    let mut sql = format!(
        r#"SELECT {} FROM "StaffingRequirements" WHERE 1=1"#,
        REQUIREMENT_COLUMNS
    );

    let mut int_bindings: Vec<i32> = vec![];

    if let Some(schedule_id) = query.schedule_id {
        sql.push_str(&format!(" AND schedule_id = ${}", int_bindings.len() + 1));
        int_bindings.push(schedule_id);
    }

    if let Some(day_of_week) = query.day_of_week {
        if !(0..=6).contains(&day_of_week) {
            return Err(AppError::Validation(format!(
                "dayOfWeek must be 0 (Sunday) through 6 (Saturday), got {}",
                day_of_week
            )));
        }
        sql.push_str(&format!(" AND day_of_week = ${}", int_bindings.len() + 1));
        int_bindings.push(i32::from(day_of_week));
    }

    if !query.include_inactive.unwrap_or(false) {
        sql.push_str(" AND active = true");
    }

    sql.push_str(" ORDER BY day_of_week, start_time, id");

    let mut query_builder = sqlx::query_as::<_, StaffingRequirement>(&sql);
    for binding in int_bindings {
        query_builder = query_builder.bind(binding);
    }

    let requirements = query_builder.fetch_all(&state.db).await?;

    Ok(Json(requirements))
}

/// POST /api/requirements - Create a staffing requirement
#[utoipa::path(
    post,
    path = "/api/requirements",
    request_body = CreateRequirementInput,
    responses(
        (status = 200, description = "Requirement created successfully", body = StaffingRequirement),
        (status = 422, description = "Invalid times, weekday, or minimums")
    ),
    tag = "requirements"
)]
pub async fn create_requirement(
    State(state): State<Arc<AppState>>,
    Json(input): Json<CreateRequirementInput>,
) -> AppResult<Json<StaffingRequirement>> {
    input.validate().map_err(AppError::Validation)?;

    // validate() has already confirmed both times parse
    let start_time = parse_time_of_day(&input.start_time).unwrap();
    let end_time = parse_time_of_day(&input.end_time).unwrap();

    let requirement_id: i32 = sqlx::query_scalar(
        r#"
        INSERT INTO "StaffingRequirements" (
            schedule_id, day_of_week, start_time, end_time,
            min_employees, min_supervisors, notes, active
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, true)
        RETURNING id
        "#,
    )
    .bind(input.schedule_id)
    .bind(input.day_of_week)
    .bind(start_time)
    .bind(end_time)
    .bind(input.min_employees)
    .bind(input.min_supervisors.unwrap_or(0))
    .bind(&input.notes)
    .fetch_one(&state.db)
    .await?;

    let requirement = fetch_requirement_by_id(&state.db, requirement_id).await?;

    Ok(Json(requirement))
}

/// PUT /api/requirements/{id} - Update a staffing requirement
#[utoipa::path(
    put,
    path = "/api/requirements/{id}",
    params(
        ("id" = i32, Path, description = "Requirement ID")
    ),
    request_body = UpdateRequirementInput,
    responses(
        (status = 200, description = "Requirement updated successfully", body = StaffingRequirement),
        (status = 400, description = "No fields to update"),
        (status = 404, description = "Requirement not found"),
        (status = 422, description = "Invalid times, weekday, or minimums")
    ),
    tag = "requirements"
)]
pub async fn update_requirement(
    State(state): State<Arc<AppState>>,
    Path(requirement_id): Path<i32>,
    Json(input): Json<UpdateRequirementInput>,
) -> AppResult<Json<StaffingRequirement>> {
    input.validate().map_err(AppError::Validation)?;

    // validate() has already rejected unparseable times
    let start_time = input.start_time.as_deref().and_then(parse_time_of_day);
    let end_time = input.end_time.as_deref().and_then(parse_time_of_day);

    // Build dynamic UPDATE query
    let mut updates = vec![];
    let mut bind_count = 1;

    if input.day_of_week.is_some() {
        updates.push(format!("day_of_week = ${}", bind_count));
        bind_count += 1;
    }
    if start_time.is_some() {
        updates.push(format!("start_time = ${}", bind_count));
        bind_count += 1;
    }
    if end_time.is_some() {
        updates.push(format!("end_time = ${}", bind_count));
        bind_count += 1;
    }
    if input.min_employees.is_some() {
        updates.push(format!("min_employees = ${}", bind_count));
        bind_count += 1;
    }
    if input.min_supervisors.is_some() {
        updates.push(format!("min_supervisors = ${}", bind_count));
        bind_count += 1;
    }
    if input.notes.is_some() {
        updates.push(format!("notes = ${}", bind_count));
        bind_count += 1;
    }
    if input.active.is_some() {
        updates.push(format!("active = ${}", bind_count));
        bind_count += 1;
    }

    if updates.is_empty() {
        return Err(AppError::BadRequest("No fields to update".to_string()));
    }

    let sql = format!(
        r#"UPDATE "StaffingRequirements" SET {} WHERE id = ${}"#,
        updates.join(", "),
        bind_count
    );

    let mut query = sqlx::query(&sql);

    if let Some(day_of_week) = input.day_of_week {
        query = query.bind(day_of_week);
    }
    if let Some(start_time) = start_time {
        query = query.bind(start_time);
    }
    if let Some(end_time) = end_time {
        query = query.bind(end_time);
    }
    if let Some(min_employees) = input.min_employees {
        query = query.bind(min_employees);
    }
    if let Some(min_supervisors) = input.min_supervisors {
        query = query.bind(min_supervisors);
    }
    if let Some(notes) = &input.notes {
        query = query.bind(notes);
    }
    if let Some(active) = input.active {
        query = query.bind(active);
    }

    query = query.bind(requirement_id);

    let result = query.execute(&state.db).await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!(
            "Requirement {} not found",
            requirement_id
        )));
    }

    let requirement = fetch_requirement_by_id(&state.db, requirement_id).await?;

    Ok(Json(requirement))
}

/// DELETE /api/requirements/{id} - Deactivate a staffing requirement
///
/// Requirements are soft-invalidated rather than removed: the row stays
/// for history, but coverage evaluation no longer sees it.
#[utoipa::path(
    delete,
    path = "/api/requirements/{id}",
    params(
        ("id" = i32, Path, description = "Requirement ID")
    ),
    responses(
        (status = 200, description = "Requirement deactivated", body = RequirementMutationResponse),
        (status = 404, description = "Requirement not found")
    ),
    tag = "requirements"
)]
pub async fn deactivate_requirement(
    State(state): State<Arc<AppState>>,
    Path(requirement_id): Path<i32>,
) -> AppResult<Json<RequirementMutationResponse>> {
    let result = sqlx::query(r#"UPDATE "StaffingRequirements" SET active = false WHERE id = $1"#)
        .bind(requirement_id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!(
            "Requirement {} not found",
            requirement_id
        )));
    }

    Ok(Json(RequirementMutationResponse {
        success: true,
        requirement_id: Some(requirement_id),
        message: Some("Requirement deactivated".to_string()),
    }))
}

/// Fetch a requirement by ID with times rendered as HH:MM
async fn fetch_requirement_by_id(
    db: &sqlx::PgPool,
    requirement_id: i32,
) -> AppResult<StaffingRequirement> {
    let sql = format!(
        r#"SELECT {} FROM "StaffingRequirements" WHERE id = $1"#,
        REQUIREMENT_COLUMNS
    );

    let requirement = sqlx::query_as::<_, StaffingRequirement>(&sql)
        .bind(requirement_id)
        .fetch_one(db)
        .await?;

    Ok(requirement)
}
