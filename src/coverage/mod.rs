use chrono::{Datelike, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One employee on one shift, reduced to what coverage evaluation needs.
/// Callers supply shifts already filtered to the evaluation date.
#[derive(Debug, Clone)]
pub struct CoverageShift {
    pub employee_id: i32,
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub is_supervisor: bool,
}

/// A minimum-staffing rule for a recurring day-of-week time window.
/// `day_of_week` uses 0 = Sunday .. 6 = Saturday.
#[derive(Debug, Clone)]
pub struct CoverageRule {
    pub requirement_id: i32,
    pub day_of_week: i16,
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub min_employees: i32,
    pub min_supervisors: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TimeBlock {
    #[serde(serialize_with = "serialize_hhmm")]
    #[schema(value_type = String, example = "09:00")]
    pub start: NaiveTime,
    #[serde(serialize_with = "serialize_hhmm")]
    #[schema(value_type = String, example = "17:00")]
    pub end: NaiveTime,
}

/// Computed per date/requirement pair; never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RequirementStatus {
    #[serde(rename = "requirementId")]
    pub requirement_id: i32,
    pub date: NaiveDate,
    #[serde(rename = "timeBlock")]
    pub time_block: TimeBlock,
    pub required: i32,
    pub actual: i32,
    #[serde(rename = "supervisorsRequired")]
    pub supervisors_required: i32,
    #[serde(rename = "supervisorsActual")]
    pub supervisors_actual: i32,
    pub satisfied: bool,
}

fn serialize_hhmm<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    time.format("%H:%M").to_string().serialize(serializer)
}

/// Half-open membership test: `[start, end)` on the shift start time.
/// A window whose end is not after its start wraps past midnight, so the
/// test becomes membership in `[start, 24:00) ∪ [00:00, end)`.
fn window_contains(start: NaiveTime, end: NaiveTime, t: NaiveTime) -> bool {
    if start < end {
        t >= start && t < end
    } else {
        t >= start || t < end
    }
}

/// Evaluate a day's staffing against a schedule's time-based rules.
///
/// Returns one `RequirementStatus` per rule whose day-of-week matches
/// `date`, in input order. A shift counts toward a rule when its start
/// time falls inside the rule's window; supervisors are counted in a
/// second pass over the same shifts, and a rule is satisfied only when
/// both counts meet their minimums.
///
/// Pure and synchronous: no I/O, no shared state, safe to call
/// concurrently once per date.
pub fn evaluate(
    date: NaiveDate,
    shifts: &[CoverageShift],
    rules: &[CoverageRule],
) -> Vec<RequirementStatus> {
    let weekday = date.weekday().num_days_from_sunday() as i16;

    rules
        .iter()
        .filter(|rule| rule.day_of_week == weekday)
        .map(|rule| {
            let actual = shifts
                .iter()
                .filter(|s| window_contains(rule.start, rule.end, s.start))
                .count() as i32;
            let supervisors_actual = shifts
                .iter()
                .filter(|s| s.is_supervisor && window_contains(rule.start, rule.end, s.start))
                .count() as i32;

            RequirementStatus {
                requirement_id: rule.requirement_id,
                date,
                time_block: TimeBlock {
                    start: rule.start,
                    end: rule.end,
                },
                required: rule.min_employees,
                actual,
                supervisors_required: rule.min_supervisors,
                supervisors_actual,
                satisfied: actual >= rule.min_employees
                    && supervisors_actual >= rule.min_supervisors,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    // 2024-01-01 was a Monday.
    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    fn shift(start: NaiveTime) -> CoverageShift {
        CoverageShift {
            employee_id: 1,
            start,
            end: t(17, 0),
            is_supervisor: false,
        }
    }

    fn supervisor(start: NaiveTime) -> CoverageShift {
        CoverageShift {
            is_supervisor: true,
            ..shift(start)
        }
    }

    fn rule(day_of_week: i16, start: NaiveTime, end: NaiveTime, min: i32) -> CoverageRule {
        CoverageRule {
            requirement_id: 1,
            day_of_week,
            start,
            end,
            min_employees: min,
            min_supervisors: 0,
        }
    }

    #[test]
    fn counts_shifts_starting_inside_window() {
        let rules = vec![rule(1, t(9, 0), t(17, 0), 2)];
        let shifts = vec![shift(t(9, 0)), shift(t(14, 0))];

        let statuses = evaluate(monday(), &shifts, &rules);

        assert_eq!(statuses.len(), 1);
        assert_eq!(statuses[0].required, 2);
        assert_eq!(statuses[0].actual, 2);
        assert!(statuses[0].satisfied);
    }

    #[test]
    fn shift_before_window_does_not_count() {
        let rules = vec![rule(1, t(9, 0), t(17, 0), 2)];
        let shifts = vec![shift(t(8, 0))];

        let statuses = evaluate(monday(), &shifts, &rules);

        assert_eq!(statuses[0].actual, 0);
        assert!(!statuses[0].satisfied);
    }

    #[test]
    fn window_is_half_open() {
        let rules = vec![rule(1, t(9, 0), t(17, 0), 1)];

        // Exactly at the start counts, exactly at the end does not.
        let at_start = evaluate(monday(), &[shift(t(9, 0))], &rules);
        assert_eq!(at_start[0].actual, 1);

        let at_end = evaluate(monday(), &[shift(t(17, 0))], &rules);
        assert_eq!(at_end[0].actual, 0);
    }

    #[test]
    fn cross_midnight_window_counts_late_shift() {
        let rules = vec![rule(1, t(21, 0), t(1, 0), 1)];
        let shifts = vec![shift(t(23, 30))];

        let statuses = evaluate(monday(), &shifts, &rules);

        assert_eq!(statuses[0].actual, 1);
        assert!(statuses[0].satisfied);
    }

    #[test]
    fn cross_midnight_window_counts_early_shift() {
        let rules = vec![rule(1, t(21, 0), t(1, 0), 1)];

        let early = evaluate(monday(), &[shift(t(0, 30))], &rules);
        assert_eq!(early[0].actual, 1);

        // 01:00 is the exclusive end of the wrapped window.
        let at_end = evaluate(monday(), &[shift(t(1, 0))], &rules);
        assert_eq!(at_end[0].actual, 0);

        // Mid-afternoon is outside both halves.
        let afternoon = evaluate(monday(), &[shift(t(14, 0))], &rules);
        assert_eq!(afternoon[0].actual, 0);
    }

    #[test]
    fn empty_rules_produce_empty_output() {
        let shifts = vec![shift(t(9, 0))];
        assert!(evaluate(monday(), &shifts, &[]).is_empty());
    }

    #[test]
    fn empty_shifts_report_zero_actual() {
        let rules = vec![rule(1, t(9, 0), t(17, 0), 2)];

        let statuses = evaluate(monday(), &[], &rules);

        assert_eq!(statuses[0].actual, 0);
        assert!(!statuses[0].satisfied);
    }

    #[test]
    fn non_matching_weekday_produces_no_status() {
        // Requirement for Tuesday (2) evaluated on Wednesday 2024-01-03.
        let wednesday = NaiveDate::from_ymd_opt(2024, 1, 3).unwrap();
        let rules = vec![rule(2, t(9, 0), t(17, 0), 1)];

        assert!(evaluate(wednesday, &[shift(t(10, 0))], &rules).is_empty());
    }

    #[test]
    fn overlapping_rules_are_evaluated_independently() {
        let rules = vec![
            rule(1, t(9, 0), t(17, 0), 1),
            CoverageRule {
                requirement_id: 2,
                ..rule(1, t(12, 0), t(13, 0), 1)
            },
        ];
        let shifts = vec![shift(t(12, 30))];

        let statuses = evaluate(monday(), &shifts, &rules);

        assert_eq!(statuses.len(), 2);
        assert_eq!(statuses[0].requirement_id, 1);
        assert_eq!(statuses[1].requirement_id, 2);
        assert_eq!(statuses[0].actual, 1);
        assert_eq!(statuses[1].actual, 1);
    }

    #[test]
    fn zero_minimum_is_always_satisfied() {
        let rules = vec![rule(1, t(9, 0), t(17, 0), 0)];

        let statuses = evaluate(monday(), &[], &rules);

        assert_eq!(statuses[0].actual, 0);
        assert!(statuses[0].satisfied);
    }

    #[test]
    fn supervisor_minimum_is_a_separate_count() {
        let mut r = rule(1, t(9, 0), t(17, 0), 2);
        r.min_supervisors = 1;
        let rules = vec![r];

        // Headcount met, no supervisor on shift.
        let unstaffed = evaluate(monday(), &[shift(t(9, 0)), shift(t(10, 0))], &rules);
        assert_eq!(unstaffed[0].actual, 2);
        assert_eq!(unstaffed[0].supervisors_actual, 0);
        assert!(!unstaffed[0].satisfied);

        // Swapping one body for a supervisor satisfies both minimums.
        let staffed = evaluate(monday(), &[shift(t(9, 0)), supervisor(t(10, 0))], &rules);
        assert_eq!(staffed[0].supervisors_actual, 1);
        assert!(staffed[0].satisfied);
    }

    #[test]
    fn actual_never_exceeds_input_size() {
        let rules = vec![rule(1, t(0, 0), t(23, 59), 1)];
        let shifts: Vec<_> = (0..5).map(|h| shift(t(h, 0))).collect();

        let statuses = evaluate(monday(), &shifts, &rules);

        assert!(statuses[0].actual as usize <= shifts.len());
    }

    #[test]
    fn shift_order_does_not_change_counts() {
        let rules = vec![rule(1, t(9, 0), t(17, 0), 2)];
        let forward = vec![shift(t(9, 0)), shift(t(14, 0)), shift(t(8, 0))];
        let mut reversed = forward.clone();
        reversed.reverse();

        let a = evaluate(monday(), &forward, &rules);
        let b = evaluate(monday(), &reversed, &rules);

        assert_eq!(a[0].actual, b[0].actual);
        assert_eq!(a[0].satisfied, b[0].satisfied);
    }

    #[test]
    fn evaluation_is_idempotent() {
        let rules = vec![rule(1, t(9, 0), t(17, 0), 1)];
        let shifts = vec![shift(t(9, 30))];

        let first = evaluate(monday(), &shifts, &rules);
        let second = evaluate(monday(), &shifts, &rules);

        assert_eq!(first.len(), second.len());
        assert_eq!(first[0].actual, second[0].actual);
        assert_eq!(first[0].satisfied, second[0].satisfied);
    }

    #[test]
    fn statuses_preserve_rule_input_order() {
        let rules = vec![
            CoverageRule {
                requirement_id: 7,
                ..rule(1, t(12, 0), t(13, 0), 1)
            },
            CoverageRule {
                requirement_id: 3,
                ..rule(1, t(9, 0), t(17, 0), 1)
            },
        ];

        let statuses = evaluate(monday(), &[], &rules);

        assert_eq!(statuses[0].requirement_id, 7);
        assert_eq!(statuses[1].requirement_id, 3);
    }
}
