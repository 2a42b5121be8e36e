use chrono::{Duration, NaiveDate};

use crate::models::{CyclePhase, CyclePrediction, CycleProfile, TrackingEntry};

/// Ovulation is anchored this many days before the predicted period start.
const LUTEAL_DAYS: i64 = 14;
/// The fertile window opens this many days before ovulation.
const FERTILE_LEAD_DAYS: i64 = 5;
/// Fallback when the profile has no period length.
const DEFAULT_PERIOD_DAYS: u32 = 5;

/// Project the next period and fertile window from tracking history.
///
/// The anchor is the most recent entry with actual flow (spotting does not
/// count). Returns `None` when no such entry exists or the profile has no
/// cycle length; callers treat absence as "not enough data yet".
pub fn predict(entries: &[TrackingEntry], profile: &CycleProfile) -> Option<CyclePrediction> {
    let cycle_days = profile.cycle_length_days?;
    let last_period_day = entries
        .iter()
        .filter(|e| e.flow.is_period())
        .map(|e| e.date)
        .max()?;

    let period_days = profile.period_length_days.unwrap_or(DEFAULT_PERIOD_DAYS);

    let next_period_start = last_period_day + Duration::days(cycle_days as i64);
    let next_period_end = next_period_start + Duration::days(period_days as i64 - 1);
    let ovulation_day = next_period_start - Duration::days(LUTEAL_DAYS);
    let fertile_window_start = ovulation_day - Duration::days(FERTILE_LEAD_DAYS);

    Some(CyclePrediction {
        next_period_start,
        next_period_end,
        ovulation_day,
        fertile_window_start,
        fertile_window_end: ovulation_day,
    })
}

/// Label a calendar date with its cycle phase, first match wins.
///
/// Only the single projected cycle is covered: anything outside it (and any
/// date when no prediction exists) is `Unknown`.
pub fn classify_phase(date: NaiveDate, prediction: Option<&CyclePrediction>) -> CyclePhase {
    let Some(p) = prediction else {
        return CyclePhase::Unknown;
    };

    if date >= p.next_period_start && date <= p.next_period_end {
        CyclePhase::Menstrual
    } else if date >= p.fertile_window_start && date <= p.fertile_window_end {
        CyclePhase::Ovulation
    } else if date > p.next_period_end && date < p.fertile_window_start {
        CyclePhase::Follicular
    } else if date > p.fertile_window_end && date < p.next_period_start {
        CyclePhase::Luteal
    } else {
        CyclePhase::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FlowLevel;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn entry(day: &str, flow: FlowLevel) -> TrackingEntry {
        TrackingEntry {
            date: date(day),
            flow,
            symptoms: vec![],
            moods: vec![],
            notes: String::new(),
        }
    }

    fn profile(cycle: Option<u32>, period: Option<u32>) -> CycleProfile {
        CycleProfile {
            cycle_length_days: cycle,
            period_length_days: period,
        }
    }

    #[test]
    fn no_prediction_without_flow_entries() {
        let entries = vec![
            entry("2024-01-01", FlowLevel::None),
            entry("2024-01-02", FlowLevel::Spotting),
        ];
        assert!(predict(&entries, &profile(Some(28), Some(5))).is_none());
    }

    #[test]
    fn no_prediction_without_cycle_length() {
        let entries = vec![entry("2024-01-01", FlowLevel::Medium)];
        assert!(predict(&entries, &profile(None, Some(5))).is_none());
    }

    #[test]
    fn projects_from_latest_period_day() {
        let entries = vec![
            entry("2023-12-04", FlowLevel::Heavy),
            entry("2024-01-01", FlowLevel::Medium),
            entry("2023-12-05", FlowLevel::Light),
        ];
        let p = predict(&entries, &profile(Some(28), Some(5))).unwrap();
        assert_eq!(p.next_period_start, date("2024-01-29"));
        assert_eq!(p.next_period_end, date("2024-02-02"));
        assert_eq!(p.ovulation_day, date("2024-01-15"));
        assert_eq!(p.fertile_window_start, date("2024-01-10"));
        assert_eq!(p.fertile_window_end, date("2024-01-15"));
    }

    #[test]
    fn period_length_falls_back_to_five_days() {
        let entries = vec![entry("2024-01-01", FlowLevel::Medium)];
        let p = predict(&entries, &profile(Some(28), None)).unwrap();
        assert_eq!(p.next_period_end, date("2024-02-02"));
    }

    #[test]
    fn spotting_does_not_move_the_anchor() {
        let entries = vec![
            entry("2024-01-01", FlowLevel::Medium),
            entry("2024-01-20", FlowLevel::Spotting),
        ];
        let p = predict(&entries, &profile(Some(28), Some(5))).unwrap();
        assert_eq!(p.next_period_start, date("2024-01-29"));
    }

    #[test]
    fn prediction_is_deterministic() {
        let entries = vec![
            entry("2024-01-01", FlowLevel::Medium),
            entry("2024-01-02", FlowLevel::Light),
        ];
        let prof = profile(Some(30), Some(4));
        assert_eq!(predict(&entries, &prof), predict(&entries, &prof));
    }

    #[test]
    fn derived_date_offsets_hold() {
        let entries = vec![entry("2024-03-10", FlowLevel::Heavy)];
        let p = predict(&entries, &profile(Some(31), Some(6))).unwrap();
        assert_eq!(p.fertile_window_end, p.ovulation_day);
        assert_eq!(p.ovulation_day, p.next_period_start - Duration::days(14));
        assert_eq!(p.fertile_window_start, p.ovulation_day - Duration::days(5));
        assert_eq!(p.next_period_end, p.next_period_start + Duration::days(5));
    }

    fn sample_prediction() -> CyclePrediction {
        // Anchor 2024-01-01, cycle 28, period 5.
        CyclePrediction {
            next_period_start: date("2024-01-29"),
            next_period_end: date("2024-02-02"),
            ovulation_day: date("2024-01-15"),
            fertile_window_start: date("2024-01-10"),
            fertile_window_end: date("2024-01-15"),
        }
    }

    #[test]
    fn classifies_menstrual_bounds_inclusive() {
        let p = sample_prediction();
        assert_eq!(classify_phase(date("2024-01-29"), Some(&p)), CyclePhase::Menstrual);
        assert_eq!(classify_phase(date("2024-02-02"), Some(&p)), CyclePhase::Menstrual);
    }

    #[test]
    fn classifies_fertile_window_as_ovulation() {
        let p = sample_prediction();
        assert_eq!(classify_phase(date("2024-01-10"), Some(&p)), CyclePhase::Ovulation);
        assert_eq!(classify_phase(date("2024-01-15"), Some(&p)), CyclePhase::Ovulation);
    }

    #[test]
    fn classifies_days_between_ovulation_and_period_as_luteal() {
        let p = sample_prediction();
        assert_eq!(classify_phase(date("2024-01-16"), Some(&p)), CyclePhase::Luteal);
        assert_eq!(classify_phase(date("2024-01-28"), Some(&p)), CyclePhase::Luteal);
    }

    #[test]
    fn projected_span_has_no_unclassified_days() {
        let p = sample_prediction();
        let mut day = p.fertile_window_start;
        while day <= p.next_period_end {
            assert_ne!(classify_phase(day, Some(&p)), CyclePhase::Unknown, "{day}");
            day += Duration::days(1);
        }
    }

    #[test]
    fn dates_outside_projection_are_unknown() {
        let p = sample_prediction();
        // Before the fertile window and after the projected period: the
        // classifier deliberately covers one cycle only.
        assert_eq!(classify_phase(date("2024-01-09"), Some(&p)), CyclePhase::Unknown);
        assert_eq!(classify_phase(date("2024-02-03"), Some(&p)), CyclePhase::Unknown);
    }

    #[test]
    fn no_prediction_means_unknown() {
        assert_eq!(classify_phase(date("2024-01-01"), None), CyclePhase::Unknown);
    }
}
