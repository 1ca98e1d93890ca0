use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::IntoParams;

use crate::{
    coverage::{self, CoverageRule, CoverageShift, RequirementStatus},
    AppError, AppResult, AppState,
};

/// Longest range one request may evaluate, in days.
const MAX_RANGE_DAYS: i64 = 92;

#[derive(Debug, Deserialize, IntoParams)]
pub struct GetCoverageQuery {
    #[serde(rename = "scheduleId")]
    pub schedule_id: i32,
    pub date: String,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct GetCoverageRangeQuery {
    #[serde(rename = "scheduleId")]
    pub schedule_id: i32,
    pub start: String,
    pub end: String,
}

/// GET /api/coverage?scheduleId=&date=
///
/// Evaluates the date's assignments against the schedule's active
/// staffing requirements. All counting happens in `coverage::evaluate`;
/// this handler only fetches rows and hands them over.
#[utoipa::path(
    get,
    path = "/api/coverage",
    params(GetCoverageQuery),
    responses(
        (status = 200, description = "One status per requirement matching the date's weekday", body = Vec<RequirementStatus>),
        (status = 400, description = "Invalid date format"),
        (status = 404, description = "Schedule not found")
    ),
    tag = "coverage"
)]
pub async fn get_coverage_for_date(
    State(state): State<Arc<AppState>>,
    Query(query): Query<GetCoverageQuery>,
) -> AppResult<Json<Vec<RequirementStatus>>> {
    let date = NaiveDate::parse_from_str(&query.date, "%Y-%m-%d")
        .map_err(|e| AppError::BadRequest(format!("Invalid date format: {}", e)))?;

    ensure_schedule_exists(&state.db, query.schedule_id).await?;

    let rules = fetch_active_rules(&state.db, query.schedule_id).await?;
    let shifts = fetch_shifts(&state.db, query.schedule_id, date, date).await?;

    let statuses = coverage::evaluate(
        date,
        &shifts.into_iter().map(|(_, s)| s).collect::<Vec<_>>(),
        &rules,
    );

    Ok(Json(statuses))
}

/// GET /api/coverage/range?scheduleId=&start=&end=
///
/// Evaluates each date in the inclusive range independently and returns
/// the concatenated statuses in date order.
#[utoipa::path(
    get,
    path = "/api/coverage/range",
    params(GetCoverageRangeQuery),
    responses(
        (status = 200, description = "Statuses for every date in the range, in date order", body = Vec<RequirementStatus>),
        (status = 400, description = "Invalid date format or range too long"),
        (status = 404, description = "Schedule not found")
    ),
    tag = "coverage"
)]
pub async fn get_coverage_for_range(
    State(state): State<Arc<AppState>>,
    Query(query): Query<GetCoverageRangeQuery>,
) -> AppResult<Json<Vec<RequirementStatus>>> {
    let start_date = NaiveDate::parse_from_str(&query.start, "%Y-%m-%d")
        .map_err(|e| AppError::BadRequest(format!("Invalid start date: {}", e)))?;
    let end_date = NaiveDate::parse_from_str(&query.end, "%Y-%m-%d")
        .map_err(|e| AppError::BadRequest(format!("Invalid end date: {}", e)))?;

    if end_date < start_date {
        return Err(AppError::BadRequest("end date is before start date".to_string()));
    }
    if (end_date - start_date).num_days() >= MAX_RANGE_DAYS {
        return Err(AppError::BadRequest(format!(
            "Date range is limited to {} days",
            MAX_RANGE_DAYS
        )));
    }

    ensure_schedule_exists(&state.db, query.schedule_id).await?;

    let rules = fetch_active_rules(&state.db, query.schedule_id).await?;
    let shifts = fetch_shifts(&state.db, query.schedule_id, start_date, end_date).await?;

    let mut statuses = Vec::new();
    for date in start_date.iter_days().take_while(|d| *d <= end_date) {
        // Each date is an independent evaluation over that date's shifts.
        let day_shifts: Vec<CoverageShift> = shifts
            .iter()
            .filter(|(shift_date, _)| *shift_date == date)
            .map(|(_, s)| s.clone())
            .collect();

        statuses.extend(coverage::evaluate(date, &day_shifts, &rules));
    }

    Ok(Json(statuses))
}

async fn ensure_schedule_exists(db: &sqlx::PgPool, schedule_id: i32) -> AppResult<()> {
    let exists: bool =
        sqlx::query_scalar(r#"SELECT EXISTS (SELECT 1 FROM "Schedules" WHERE id = $1)"#)
            .bind(schedule_id)
            .fetch_one(db)
            .await?;

    if !exists {
        return Err(AppError::NotFound(format!("Schedule {} not found", schedule_id)));
    }

    Ok(())
}

async fn fetch_active_rules(db: &sqlx::PgPool, schedule_id: i32) -> AppResult<Vec<CoverageRule>> {
    let rows = sqlx::query_as::<_, (i32, i16, NaiveTime, NaiveTime, i32, i32)>(
        r#"
        SELECT id, day_of_week, start_time, end_time, min_employees, min_supervisors
        FROM "StaffingRequirements"
        WHERE schedule_id = $1 AND active = true
        ORDER BY id
        "#,
    )
    .bind(schedule_id)
    .fetch_all(db)
    .await?;

    let rules = rows
        .into_iter()
        .map(
            |(requirement_id, day_of_week, start, end, min_employees, min_supervisors)| {
                CoverageRule {
                    requirement_id,
                    day_of_week,
                    start,
                    end,
                    min_employees,
                    min_supervisors,
                }
            },
        )
        .collect();

    Ok(rules)
}

/// Load assignments for a date range joined to the employee's
/// supervisor flag, keyed by date for per-day evaluation.
async fn fetch_shifts(
    db: &sqlx::PgPool,
    schedule_id: i32,
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> AppResult<Vec<(NaiveDate, CoverageShift)>> {
    let rows = sqlx::query_as::<_, (NaiveDate, i32, NaiveTime, NaiveTime, bool)>(
        r#"
        SELECT a.date, a.employee_id, a.start, a."end", e.is_supervisor
        FROM "Assignments" a
        JOIN "Employees" e ON a.employee_id = e.id
        WHERE a.schedule_id = $1 AND a.date >= $2 AND a.date <= $3
        ORDER BY a.date, a.start
        "#,
    )
    .bind(schedule_id)
    .bind(start_date)
    .bind(end_date)
    .fetch_all(db)
    .await?;

    let shifts = rows
        .into_iter()
        .map(|(date, employee_id, start, end, is_supervisor)| {
            (
                date,
                CoverageShift {
                    employee_id,
                    start,
                    end,
                    is_supervisor,
                },
            )
        })
        .collect();

    Ok(shifts)
}
