use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Employee {
    pub id: i32,
    pub full_name: String,
    pub short_name: String,
    /// Counts toward a rule's supervisor minimum when scheduled.
    pub is_supervisor: bool,
    pub color: Option<String>,
    #[serde(serialize_with = "serialize_naive_as_utc")]
    pub created_at: NaiveDateTime,
}

fn serialize_naive_as_utc<S>(dt: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    let utc_dt = DateTime::<Utc>::from_naive_utc_and_offset(*dt, Utc);
    utc_dt.to_rfc3339().serialize(serializer)
}
