pub mod assignment;
pub mod assignment_input;
pub mod employee;
pub mod employee_input;
pub mod requirement;
pub mod requirement_input;
pub mod schedule;
pub mod schedule_input;

pub use assignment::Assignment;
pub use assignment_input::{AssignmentMutationResponse, CreateAssignmentInput, UpdateAssignmentInput};
pub use employee::Employee;
pub use employee_input::{CreateEmployeeInput, EmployeeMutationResponse, UpdateEmployeeInput};
pub use requirement::StaffingRequirement;
pub use requirement_input::{
    parse_time_of_day, CreateRequirementInput, RequirementMutationResponse, UpdateRequirementInput,
};
pub use schedule::Schedule;
pub use schedule_input::{CreateScheduleInput, ScheduleMutationResponse, UpdateScheduleInput};
