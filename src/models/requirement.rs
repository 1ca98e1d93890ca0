use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// A recurring minimum-staffing rule for one day-of-week time window.
///
/// `day_of_week` is 0 = Sunday .. 6 = Saturday. The window may cross
/// midnight (`end_time` before `start_time`). Rules are never hard
/// deleted while a schedule is live; DELETE flips `active` off and
/// coverage evaluation ignores inactive rows.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct StaffingRequirement {
    pub id: i32,
    pub schedule_id: i32,
    pub day_of_week: i16,
    pub start_time: String,
    pub end_time: String,
    pub min_employees: i32,
    pub min_supervisors: i32,
    pub notes: Option<String>,
    pub active: bool,
    pub created_at: NaiveDateTime,
}
