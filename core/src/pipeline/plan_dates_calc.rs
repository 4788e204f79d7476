//! Backwards-from-race-date plan calendar: the algorithm behind the
//! calculate-plan-dates stage.

use chrono::{Datelike, Duration, NaiveDate};

use crate::error::{StageError, ValidationResult};
use crate::model::plan_dates::{DayEntry, Phase, PlanDates, PlanWeek};
use crate::model::profile::{BEvent, Weekday};

pub const PLAN_WEEKS_HARD_MIN: u32 = 4;
pub const PLAN_WEEKS_HARD_MAX: u32 = 52;
pub const PLAN_WEEKS_SOFT_MIN: u32 = 6;

pub struct PlanDateInputs<'a> {
    pub race_date: NaiveDate,
    pub plan_weeks: u32,
    pub heavy_training_end: Option<NaiveDate>,
    pub preferred_start: Option<NaiveDate>,
    pub b_events: &'a [BEvent],
    pub today: NaiveDate,
}

fn monday_of_week(date: NaiveDate) -> NaiveDate {
    let offset = date.weekday().num_days_from_monday();
    date - Duration::days(offset as i64)
}

fn phase_for_week(week_number: u32, plan_weeks: u32, monday: NaiveDate, heavy_training_end: Option<NaiveDate>) -> Phase {
    if week_number == plan_weeks {
        return Phase::Race;
    }
    if week_number + 1 >= plan_weeks {
        return Phase::Taper;
    }
    if let Some(end) = heavy_training_end {
        if monday >= end {
            return Phase::Maintenance;
        }
    }
    let progress = week_number as f32 / plan_weeks as f32;
    if progress >= 0.75 {
        Phase::Peak
    } else if progress >= 0.5 {
        Phase::Build
    } else {
        Phase::Base
    }
}

fn filename_prefix(week_number: u32, weekday: Weekday, date: NaiveDate) -> String {
    const MONTH_ABBR: [&str; 12] = [
        "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
    ];
    format!(
        "W{:02}_{}_{}{}",
        week_number,
        weekday.abbrev(),
        MONTH_ABBR[date.month0() as usize],
        date.day()
    )
}

fn b_event_for_week(b_events: &[BEvent], monday: NaiveDate) -> Option<&BEvent> {
    let sunday = monday + Duration::days(6);
    b_events.iter().find(|e| e.date >= monday && e.date <= sunday)
}

/// Computes the full plan calendar. Returns the accumulated warnings
/// alongside the document rather than discarding them, since a past
/// plan-start is legal but worth flagging.
pub fn calculate_plan_dates(inputs: &PlanDateInputs) -> Result<(PlanDates, ValidationResult), StageError> {
    const STAGE: &'static str = "calculate-plan-dates";
    let mut result = ValidationResult::new();

    if inputs.plan_weeks < PLAN_WEEKS_HARD_MIN || inputs.plan_weeks > PLAN_WEEKS_HARD_MAX {
        return Err(StageError::Validation {
            stage: STAGE,
            detail: format!(
                "plan_weeks {} outside the supported range [{}, {}]",
                inputs.plan_weeks, PLAN_WEEKS_HARD_MIN, PLAN_WEEKS_HARD_MAX
            ),
        });
    }
    if inputs.plan_weeks < PLAN_WEEKS_SOFT_MIN {
        result.push_warning(
            "plan_weeks",
            format!("plan_weeks {} is below the recommended minimum of {}", inputs.plan_weeks, PLAN_WEEKS_SOFT_MIN),
        );
    }

    let race_week_monday = monday_of_week(inputs.race_date);
    let mut plan_weeks = inputs.plan_weeks;
    let mut week1_monday = race_week_monday - Duration::weeks(plan_weeks as i64 - 1);

    if let Some(preferred_start) = inputs.preferred_start {
        let preferred_monday = monday_of_week(preferred_start);
        if preferred_monday > week1_monday {
            let weeks_available = ((race_week_monday - preferred_monday).num_weeks() + 1).max(PLAN_WEEKS_SOFT_MIN as i64) as u32;
            plan_weeks = weeks_available.min(plan_weeks);
            week1_monday = race_week_monday - Duration::weeks(plan_weeks as i64 - 1);
        }
    }

    if week1_monday < monday_of_week(inputs.today) {
        result.push_warning(
            "plan_start",
            "plan start date is in the past relative to today; consider re-running with a shrunk plan",
        );
        let next_monday = monday_of_week(inputs.today) + if inputs.today.weekday() == chrono::Weekday::Mon {
            Duration::days(0)
        } else {
            Duration::days(7) - Duration::days(inputs.today.weekday().num_days_from_monday() as i64)
        };
        let rolled_monday = monday_of_week(next_monday);
        let weeks_remaining = ((race_week_monday - rolled_monday).num_weeks() + 1).max(PLAN_WEEKS_SOFT_MIN as i64) as u32;
        week1_monday = rolled_monday;
        plan_weeks = weeks_remaining;
    }

    let mut weeks = Vec::with_capacity(plan_weeks as usize);
    for week_number in 1..=plan_weeks {
        let monday = week1_monday + Duration::weeks(week_number as i64 - 1);
        let sunday = monday + Duration::days(6);
        let phase = phase_for_week(week_number, plan_weeks, monday, inputs.heavy_training_end);
        let is_race_week = week_number == plan_weeks;
        let b_event = b_event_for_week(inputs.b_events, monday);

        let mut days = Vec::with_capacity(7);
        for (i, weekday) in Weekday::ORDER.iter().enumerate() {
            let date = monday + Duration::days(i as i64);
            let is_race_day = is_race_week && date == inputs.race_date;
            let is_b_race_day = b_event.map(|e| e.date == date).unwrap_or(false);
            let is_b_race_opener = b_event.map(|e| e.date == date + Duration::days(1)).unwrap_or(false);
            let is_b_race_easy = b_event.is_some()
                && matches!(phase, Phase::Build | Phase::Peak)
                && b_event.map(|e| e.date == date + Duration::days(2)).unwrap_or(false);

            days.push(DayEntry {
                weekday: *weekday,
                date,
                short_label: format!("{} {}", weekday.abbrev(), date.format("%b %d")),
                filename_prefix: filename_prefix(week_number, *weekday, date),
                is_race_day,
                is_b_race_day,
                is_b_race_opener,
                is_b_race_easy,
            });
        }

        weeks.push(PlanWeek {
            week_number,
            phase,
            monday,
            sunday,
            is_race_week,
            b_race: b_event.map(|e| e.name.clone()),
            days,
        });
    }

    let plan = PlanDates { weeks };
    validate_plan_dates(&plan, inputs.race_date, &mut result);
    Ok((plan, result))
}

/// The post-computation validation checklist: race date within race week,
/// plan start strictly before race, sequential and contiguous week numbers,
/// final week marked as race week, plan length floor, exactly one race day
/// in the race week, every week carrying seven days, and a monotonic phase
/// progression.
fn validate_plan_dates(plan: &PlanDates, race_date: NaiveDate, result: &mut ValidationResult) {
    let Some(last_week) = plan.weeks.last() else {
        result.push_error("weeks", "plan has no weeks");
        return;
    };

    if race_date < last_week.monday || race_date > last_week.sunday {
        result.push_error("race_date", "race date does not fall within the final week");
    }
    if !last_week.is_race_week {
        result.push_error("weeks", "final week is not marked as the race week");
    }
    if plan.weeks.len() < PLAN_WEEKS_SOFT_MIN as usize {
        result.push_warning("weeks", "plan is shorter than the recommended minimum length");
    }
    if let Some(first_week) = plan.weeks.first() {
        if first_week.monday >= race_date {
            result.push_error("plan_start", "plan start must be strictly before the race date");
        }
    }

    for (idx, week) in plan.weeks.iter().enumerate() {
        if week.week_number != idx as u32 + 1 {
            result.push_error("week_number", format!("week at index {idx} has non-sequential week_number {}", week.week_number));
        }
        if week.days.len() != 7 {
            result.push_error("days", format!("week {} has {} days, expected 7", week.week_number, week.days.len()));
        }
        if idx > 0 {
            let prev_sunday = plan.weeks[idx - 1].sunday;
            if week.monday != prev_sunday + Duration::days(1) {
                result.push_error("weeks", format!("week {} is not contiguous with the previous week", week.week_number));
            }
        }
        if week.is_race_week {
            let race_days = week.days.iter().filter(|d| d.is_race_day).count();
            if race_days != 1 {
                result.push_error("is_race_day", format!("race week has {race_days} race days, expected exactly 1"));
            }
        }
    }

    let mut last_rank = -1i32;
    for week in &plan.weeks {
        let rank = phase_rank(week.phase);
        if rank < last_rank {
            result.push_error("phase", format!("phase regresses at week {}", week.week_number));
        }
        last_rank = rank.max(last_rank);
    }
}

fn phase_rank(phase: Phase) -> i32 {
    match phase {
        Phase::Base => 0,
        Phase::Build => 1,
        Phase::Peak => 2,
        Phase::Maintenance => 2,
        Phase::Taper => 3,
        Phase::Race => 4,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn builds_a_well_formed_plan_for_a_typical_request() {
        let inputs = PlanDateInputs {
            race_date: date(2026, 9, 12),
            plan_weeks: 16,
            heavy_training_end: None,
            preferred_start: None,
            b_events: &[],
            today: date(2026, 1, 1),
        };
        let (plan, result) = calculate_plan_dates(&inputs).unwrap();
        assert!(result.is_valid());
        assert_eq!(plan.weeks.len(), 16);
        assert!(plan.weeks.last().unwrap().is_race_week);
        assert_eq!(plan.weeks[0].week_number, 1);
    }

    #[test]
    fn rejects_plan_weeks_outside_hard_bounds() {
        let inputs = PlanDateInputs {
            race_date: date(2026, 9, 12),
            plan_weeks: 60,
            heavy_training_end: None,
            preferred_start: None,
            b_events: &[],
            today: date(2026, 1, 1),
        };
        assert!(calculate_plan_dates(&inputs).is_err());
    }

    #[test]
    fn b_event_overlay_marks_opener_and_race_day() {
        let race_date = date(2026, 9, 12);
        let b_event_date = date(2026, 7, 18);
        let inputs = PlanDateInputs {
            race_date,
            plan_weeks: 16,
            heavy_training_end: None,
            preferred_start: None,
            b_events: &[BEvent { name: "Tune-up gravel race".to_string(), date: b_event_date }],
            today: date(2026, 1, 1),
        };
        let (plan, _) = calculate_plan_dates(&inputs).unwrap();
        let week_with_event = plan.weeks.iter().find(|w| w.days.iter().any(|d| d.is_b_race_day)).unwrap();
        let race_day = week_with_event.days.iter().find(|d| d.is_b_race_day).unwrap();
        assert_eq!(race_day.date, b_event_date);
        let opener_day = week_with_event.days.iter().find(|d| d.date == b_event_date - Duration::days(1));
        assert!(opener_day.unwrap().is_b_race_opener);
    }

    #[test]
    fn past_plan_start_warns_but_still_succeeds() {
        let inputs = PlanDateInputs {
            race_date: date(2026, 2, 1),
            plan_weeks: 20,
            heavy_training_end: None,
            preferred_start: None,
            b_events: &[],
            today: date(2026, 1, 15),
        };
        let (_plan, result) = calculate_plan_dates(&inputs).unwrap();
        assert!(result.warnings().any(|w| w.field == "plan_start"));
    }
}
