use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Input DTO for creating a new assignment
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateAssignmentInput {
    pub schedule_id: i32,
    pub employee_id: i32,
    pub shift_label: Option<String>,
    pub start: String,
    pub end: String,
    pub published: bool,
    pub date: NaiveDate,
}

/// Input DTO for updating an existing assignment
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateAssignmentInput {
    pub schedule_id: Option<i32>,
    pub employee_id: Option<i32>,
    pub shift_label: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub published: Option<bool>,
    pub date: Option<NaiveDate>,
}

/// Response after successful mutation
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AssignmentMutationResponse {
    pub success: bool,
    pub assignment_uuid: Option<Uuid>,
    pub message: Option<String>,
}
