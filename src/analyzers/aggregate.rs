use crate::analyzers::scale::GradeScale;
use crate::analyzers::types::{AverageResult, RecordEntry};
use crate::analyzers::utility::round_dp;
use crate::errors::{GpaError, Result};
use tracing::debug;

/// Decimal places kept in both averages.
pub const AVERAGE_DP: i32 = 3;

/// Computes the credit-weighted average of `entries` on both scales.
///
/// Entries whose grade is absent from `scale` (withdrawals `W`, transfer
/// credits `T`, blanks) add nothing to any running total, units included,
/// and their units cell is never parsed.
///
/// # Errors
///
/// - [`GpaError::MalformedDocument`] if a graded entry's units are not numeric,
///   or their sum is too large to represent.
/// - [`GpaError::NoGradableCredits`] if the graded units sum to zero.
pub fn aggregate(entries: &[RecordEntry], scale: &GradeScale) -> Result<AverageResult> {
    let mut twelve_total = 0.0;
    let mut four_total = 0.0;
    let mut total_units = 0.0;
    let mut excluded = 0usize;

    for entry in entries {
        let Some(points) = scale.lookup(entry.grade()) else {
            excluded += 1;
            debug!(
                course = entry.course_code(),
                grade = entry.grade(),
                "Entry excluded from average"
            );
            continue;
        };

        let units = entry.units()?;
        twelve_total += units * f64::from(points.twelve_point);
        four_total += units * points.four_point;
        total_units += units;
    }

    if !(total_units.is_finite() && twelve_total.is_finite() && four_total.is_finite()) {
        return Err(GpaError::MalformedDocument(format!(
            "graded units overflow: total {total_units}"
        )));
    }

    if total_units == 0.0 {
        return Err(GpaError::NoGradableCredits);
    }

    debug!(
        entries = entries.len(),
        excluded, total_units, "Averages computed"
    );

    Ok(AverageResult {
        twelve_point: round_dp(twelve_total / total_units, AVERAGE_DP),
        four_point: round_dp(four_total / total_units, AVERAGE_DP),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(code: &str, units: &str, grade: &str) -> RecordEntry {
        RecordEntry::new(code, units, grade)
    }

    fn has_three_decimals(value: f64) -> bool {
        let scaled = value * 1000.0;
        (scaled - scaled.round()).abs() < 1e-6
    }

    #[test]
    fn test_two_graded_courses() {
        let entries = [entry("101", "3", "A+"), entry("102", "3", "B")];
        let result = aggregate(&entries, &GradeScale::mcmaster()).unwrap();

        assert_eq!(result.twelve_point, 10.0);
        assert_eq!(result.four_point, 3.5);
    }

    #[test]
    fn test_withdrawal_is_ignored() {
        let entries = [entry("101", "3", "W"), entry("102", "3", "A")];
        let result = aggregate(&entries, &GradeScale::mcmaster()).unwrap();

        assert_eq!(result.twelve_point, 11.0);
        assert_eq!(result.four_point, 3.9);
    }

    #[test]
    fn test_empty_input_has_no_gradable_credits() {
        let result = aggregate(&[], &GradeScale::mcmaster());
        assert!(matches!(result, Err(GpaError::NoGradableCredits)));
    }

    #[test]
    fn test_all_excluded_has_no_gradable_credits() {
        let entries = [
            entry("101", "3", "W"),
            entry("102", "6", "T"),
            entry("103", "3", ""),
            entry("104", "3", "COM"),
        ];
        let result = aggregate(&entries, &GradeScale::mcmaster());
        assert!(matches!(result, Err(GpaError::NoGradableCredits)));
    }

    #[test]
    fn test_zero_unit_graded_course_has_no_gradable_credits() {
        let entries = [entry("101", "0", "A")];
        let result = aggregate(&entries, &GradeScale::mcmaster());
        assert!(matches!(result, Err(GpaError::NoGradableCredits)));
    }

    #[test]
    fn test_excluded_entry_does_not_change_result() {
        let scale = GradeScale::mcmaster();
        let base = vec![
            entry("1A03", "3", "B+"),
            entry("1B03", "3", "C"),
            entry("2C06", "6", "A-"),
        ];

        for (units, grade) in [("3", "W"), ("12.5", "T"), ("0.5", "W"), ("99", "")] {
            let mut with_excluded = base.clone();
            with_excluded.insert(1, entry("XFER", units, grade));

            assert_eq!(
                aggregate(&base, &scale).unwrap(),
                aggregate(&with_excluded, &scale).unwrap()
            );
        }
    }

    #[test]
    fn test_excluded_entry_units_are_not_parsed() {
        let entries = [entry("XFER", "", "T"), entry("1A03", "3", "B")];
        let result = aggregate(&entries, &GradeScale::mcmaster()).unwrap();
        assert_eq!(result.twelve_point, 8.0);
    }

    #[test]
    fn test_non_numeric_units_on_graded_entry_fail() {
        let entries = [entry("1A03", "three", "B")];
        let result = aggregate(&entries, &GradeScale::mcmaster());
        assert!(matches!(result, Err(GpaError::MalformedDocument(_))));
    }

    #[test]
    fn test_units_sum_overflow_is_malformed() {
        let entries = [entry("a", "1e308", "A"), entry("b", "1e308", "A")];
        let result = aggregate(&entries, &GradeScale::mcmaster());
        assert!(matches!(result, Err(GpaError::MalformedDocument(_))));
    }

    #[test]
    fn test_fractional_units() {
        let entries = [entry("LAB", "0.5", "A+"), entry("1A03", "3", "C")];
        let result = aggregate(&entries, &GradeScale::mcmaster()).unwrap();

        // (0.5 * 12 + 3 * 5) / 3.5 = 6.0
        assert_eq!(result.twelve_point, 6.0);
        // (0.5 * 4.0 + 3 * 2.0) / 3.5 = 2.2857...
        assert_eq!(result.four_point, 2.286);
    }

    #[test]
    fn test_results_are_rounded_to_three_places() {
        let entries = [
            entry("A", "3", "A"),
            entry("B", "3", "B-"),
            entry("C", "1", "D+"),
        ];
        let result = aggregate(&entries, &GradeScale::mcmaster()).unwrap();

        // 12pt: (33 + 21 + 3) / 7 = 8.142857...
        assert_eq!(result.twelve_point, 8.143);
        assert!(has_three_decimals(result.twelve_point));
        assert!(has_three_decimals(result.four_point));
    }

    #[test]
    fn test_averages_stay_within_scale_bounds() {
        let scale = GradeScale::mcmaster();
        let grades: Vec<&str> = scale.iter().map(|(t, _)| t).collect();

        for (i, top) in grades.iter().enumerate() {
            let entries: Vec<RecordEntry> = grades[i..]
                .iter()
                .enumerate()
                .map(|(j, g)| entry(top, &format!("{}", j % 4 + 1), g))
                .collect();
            let result = aggregate(&entries, &scale).unwrap();

            assert!((0.0..=12.0).contains(&result.twelve_point));
            assert!((0.0..=4.0).contains(&result.four_point));
        }
    }

    #[test]
    fn test_aggregate_is_repeatable() {
        let scale = GradeScale::mcmaster();
        let entries = [entry("101", "3", "A-"), entry("102", "4", "C+")];

        assert_eq!(
            aggregate(&entries, &scale).unwrap(),
            aggregate(&entries, &scale).unwrap()
        );
    }

    #[test]
    fn test_alternate_scale_is_honoured() {
        let scale = GradeScale::from_rows([("P", 12, 4.0), ("F", 0, 0.0)]).unwrap();
        let entries = [entry("101", "3", "P"), entry("102", "3", "A+")];
        let result = aggregate(&entries, &scale).unwrap();

        assert_eq!(result.twelve_point, 12.0);
        assert_eq!(result.four_point, 4.0);
    }
}
