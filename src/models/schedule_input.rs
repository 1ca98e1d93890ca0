use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Input DTO for creating a schedule
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateScheduleInput {
    pub name: String,
    pub description: Option<String>,
}

/// Input DTO for updating a schedule
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateScheduleInput {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Response after successful mutation
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ScheduleMutationResponse {
    pub success: bool,
    pub message: Option<String>,
}
