use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// One employee scheduled to one shift on one date.
///
/// `start`/`end` are clock times rendered as `HH:MM` by the queries that
/// load this row. An `end` before `start` means the shift runs past
/// midnight into the next calendar day.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Assignment {
    pub uuid: Uuid,
    pub schedule_id: i32,
    pub employee_id: i32,
    pub shift_label: Option<String>,
    pub start: String,
    pub end: String,
    pub published: bool,
    pub date: NaiveDate,
    pub created_at: NaiveDateTime,
}
