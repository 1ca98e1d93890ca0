use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Input DTO for creating a staffing requirement
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateRequirementInput {
    pub schedule_id: i32,
    pub day_of_week: i16,
    pub start_time: String,
    pub end_time: String,
    pub min_employees: i32,
    pub min_supervisors: Option<i32>,
    pub notes: Option<String>,
}

/// Input DTO for updating a staffing requirement
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateRequirementInput {
    pub day_of_week: Option<i16>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub min_employees: Option<i32>,
    pub min_supervisors: Option<i32>,
    pub notes: Option<String>,
    pub active: Option<bool>,
}

/// Response after successful mutation
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RequirementMutationResponse {
    pub success: bool,
    pub requirement_id: Option<i32>,
    pub message: Option<String>,
}

/// Parse a clock time supplied as `HH:MM` or `HH:MM:SS`.
pub fn parse_time_of_day(value: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(value, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
        .ok()
}

impl CreateRequirementInput {
    /// Contract checks for new rules. Times must parse, the day must be a
    /// real weekday number, minimums must be non-negative, and the window
    /// must not be empty (equal start and end).
    pub fn validate(&self) -> Result<(), String> {
        validate_rule_fields(
            self.day_of_week,
            Some(self.start_time.as_str()),
            Some(self.end_time.as_str()),
            Some(self.min_employees),
            self.min_supervisors,
        )?;

        // Both times are present on create, so the empty-window check
        // always applies here.
        if self.start_time_parsed() == self.end_time_parsed() {
            return Err("start_time and end_time must differ".to_string());
        }

        Ok(())
    }

    fn start_time_parsed(&self) -> Option<NaiveTime> {
        parse_time_of_day(&self.start_time)
    }

    fn end_time_parsed(&self) -> Option<NaiveTime> {
        parse_time_of_day(&self.end_time)
    }
}

impl UpdateRequirementInput {
    pub fn validate(&self) -> Result<(), String> {
        let day_of_week = self.day_of_week.unwrap_or(0);
        validate_rule_fields(
            day_of_week,
            self.start_time.as_deref(),
            self.end_time.as_deref(),
            self.min_employees,
            self.min_supervisors,
        )
    }
}

fn validate_rule_fields(
    day_of_week: i16,
    start_time: Option<&str>,
    end_time: Option<&str>,
    min_employees: Option<i32>,
    min_supervisors: Option<i32>,
) -> Result<(), String> {
    if !(0..=6).contains(&day_of_week) {
        return Err(format!(
            "day_of_week must be 0 (Sunday) through 6 (Saturday), got {}",
            day_of_week
        ));
    }

    if let Some(start) = start_time {
        if parse_time_of_day(start).is_none() {
            return Err(format!("start_time '{}' is not a valid HH:MM time", start));
        }
    }
    if let Some(end) = end_time {
        if parse_time_of_day(end).is_none() {
            return Err(format!("end_time '{}' is not a valid HH:MM time", end));
        }
    }

    if let Some(min) = min_employees {
        if min < 0 {
            return Err("min_employees must not be negative".to_string());
        }
    }
    if let Some(min) = min_supervisors {
        if min < 0 {
            return Err("min_supervisors must not be negative".to_string());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> CreateRequirementInput {
        CreateRequirementInput {
            schedule_id: 1,
            day_of_week: 1,
            start_time: "09:00".to_string(),
            end_time: "17:00".to_string(),
            min_employees: 2,
            min_supervisors: None,
            notes: None,
        }
    }

    #[test]
    fn accepts_well_formed_input() {
        assert!(input().validate().is_ok());
    }

    #[test]
    fn accepts_cross_midnight_window() {
        let mut i = input();
        i.start_time = "21:00".to_string();
        i.end_time = "01:00".to_string();
        assert!(i.validate().is_ok());
    }

    #[test]
    fn rejects_out_of_range_day_of_week() {
        let mut i = input();
        i.day_of_week = 7;
        assert!(i.validate().is_err());
    }

    #[test]
    fn rejects_unparseable_time() {
        let mut i = input();
        i.start_time = "9am".to_string();
        assert!(i.validate().is_err());
    }

    #[test]
    fn rejects_empty_window() {
        let mut i = input();
        i.end_time = i.start_time.clone();
        assert!(i.validate().is_err());
    }

    #[test]
    fn rejects_negative_minimum() {
        let mut i = input();
        i.min_employees = -1;
        assert!(i.validate().is_err());
    }

    #[test]
    fn parses_both_time_formats() {
        assert!(parse_time_of_day("09:00").is_some());
        assert!(parse_time_of_day("09:00:30").is_some());
        assert!(parse_time_of_day("24:00").is_none());
        assert!(parse_time_of_day("").is_none());
    }
}
