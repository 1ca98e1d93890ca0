use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Input DTO for creating an employee
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateEmployeeInput {
    pub full_name: String,
    pub short_name: String,
    pub is_supervisor: bool,
    pub color: Option<String>,
}

/// Input DTO for updating an employee
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateEmployeeInput {
    pub full_name: Option<String>,
    pub short_name: Option<String>,
    pub is_supervisor: Option<bool>,
    pub color: Option<String>,
}

/// Response after successful mutation
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EmployeeMutationResponse {
    pub success: bool,
    pub message: Option<String>,
}
