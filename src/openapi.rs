use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Covrota API",
        version = "1.0.0",
        description = "Backend API for schedule, assignment, and staffing-coverage management",
        contact(
            name = "API Support",
            email = "support@covrota.dev"
        )
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server"),
    ),
    paths(
        // Health
        crate::handlers::health::health_check,

        // Schedules
        crate::handlers::schedules_handler::get_schedules,
        crate::handlers::schedules_handler::create_schedule,
        crate::handlers::schedules_handler::update_schedule,
        crate::handlers::schedules_handler::delete_schedule,

        // Employees
        crate::handlers::employees_handler::get_employees,
        crate::handlers::employees_handler::create_employee,
        crate::handlers::employees_handler::update_employee,
        crate::handlers::employees_handler::delete_employee,

        // Assignments
        crate::handlers::assignments_handler::get_assignments_for_month,
        crate::handlers::assignments_handler::get_assignments_for_date,
        crate::handlers::assignments_handler::get_assignments_for_range,
        crate::handlers::assignments_handler::create_assignment,
        crate::handlers::assignments_handler::update_assignment,
        crate::handlers::assignments_handler::delete_assignment,

        // Staffing requirements
        crate::handlers::requirements_handler::get_requirements,
        crate::handlers::requirements_handler::create_requirement,
        crate::handlers::requirements_handler::update_requirement,
        crate::handlers::requirements_handler::deactivate_requirement,

        // Coverage
        crate::handlers::coverage_handler::get_coverage_for_date,
        crate::handlers::coverage_handler::get_coverage_for_range,
    ),
    components(
        schemas(
            // Core models
            crate::models::Schedule,
            crate::models::Employee,
            crate::models::Assignment,
            crate::models::StaffingRequirement,

            // Derived coverage report
            crate::coverage::RequirementStatus,
            crate::coverage::TimeBlock,

            // Input models
            crate::models::CreateScheduleInput,
            crate::models::UpdateScheduleInput,
            crate::models::ScheduleMutationResponse,
            crate::models::CreateEmployeeInput,
            crate::models::UpdateEmployeeInput,
            crate::models::EmployeeMutationResponse,
            crate::models::CreateAssignmentInput,
            crate::models::UpdateAssignmentInput,
            crate::models::AssignmentMutationResponse,
            crate::models::CreateRequirementInput,
            crate::models::UpdateRequirementInput,
            crate::models::RequirementMutationResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check"),
        (name = "schedules", description = "Schedule management"),
        (name = "employees", description = "Employee management"),
        (name = "assignments", description = "Shift assignment management"),
        (name = "requirements", description = "Time-based staffing requirements"),
        (name = "coverage", description = "Staffing-coverage evaluation"),
    )
)]
pub struct ApiDoc;
