use tracing::debug;

use crate::error::QueryError;
use crate::models::{CourseAverageResult, FilterMode, SemesterGroup, TableRow};

pub const DEFAULT_DEPTH: usize = 2;

pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Rows of the first `depth` groups that pass the mode's threshold.
pub fn select_rows<'a>(
    groups: &[SemesterGroup<'a>],
    mode: FilterMode,
    default_depth: usize,
) -> Vec<&'a TableRow> {
    groups
        .iter()
        .take(depth(mode, default_depth))
        .flatten()
        .copied()
        .filter(|row| passes_threshold(row, mode))
        .collect()
}

fn depth(mode: FilterMode, default_depth: usize) -> usize {
    match mode {
        FilterMode::Default => default_depth,
        FilterMode::SemesterCount(n) => n,
        FilterMode::ResponseCountMin { depth, .. } => depth,
        FilterMode::RatingProportionMin { depth, .. } => depth,
    }
}

/// Ratings are stored on a 0-100 scale, the proportion threshold on 0-1.
fn passes_threshold(row: &TableRow, mode: FilterMode) -> bool {
    match mode {
        FilterMode::Default | FilterMode::SemesterCount(_) => true,
        FilterMode::ResponseCountMin { min, .. } => {
            row.num_respondents.is_some_and(|n| u64::from(n) >= min)
        }
        FilterMode::RatingProportionMin { min, .. } => {
            row.overall_rating.is_some_and(|rating| rating >= 100.0 * min)
        }
    }
}

/// Averages workload over the selected rows of one course.
///
/// Rows without a numeric workload are skipped. The course name comes from the
/// last row counted.
pub fn average_course(
    course_id: &str,
    groups: &[SemesterGroup<'_>],
    mode: FilterMode,
    default_depth: usize,
) -> Result<CourseAverageResult, QueryError> {
    let mut sum = 0.0;
    let mut count = 0usize;
    let mut course_name = "";

    for row in select_rows(groups, mode, default_depth) {
        if let Some(hours) = row.workload_hours {
            sum += hours;
            count += 1;
            course_name = &row.course_name;
        }
    }

    if count == 0 {
        return Err(QueryError::CourseNotFoundInFilter {
            course_id: course_id.to_string(),
        });
    }

    let average_hours = round1(sum / count as f64);
    debug!(course_id, count, average_hours, "aggregated course workload");

    Ok(CourseAverageResult {
        course_id: course_id.to_string(),
        course_name: course_name.to_string(),
        average_hours,
        rows_used: count,
    })
}

pub fn grand_total(results: &[CourseAverageResult]) -> f64 {
    round1(results.iter().map(|result| result.average_hours).sum())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::row;

    fn with_stats(mut row: TableRow, respondents: Option<u32>, rating: Option<f64>) -> TableRow {
        row.num_respondents = respondents;
        row.overall_rating = rating;
        row
    }

    #[test]
    fn default_mode_uses_two_groups() {
        let rows = [
            row("2024", "Fall", "21127", Some(9.0)),
            row("2024", "Fall", "21127", Some(10.0)),
            row("2024", "Fall", "21127", Some(11.0)),
            row("2024", "Spring", "21127", Some(6.0)),
            row("2024", "Spring", "21127", Some(7.0)),
            row("2023", "Fall", "21127", Some(50.0)),
        ];
        let groups: Vec<SemesterGroup<'_>> = vec![
            rows[0..3].iter().collect(),
            rows[3..5].iter().collect(),
            rows[5..].iter().collect(),
        ];

        let result = average_course("21127", &groups, FilterMode::Default, DEFAULT_DEPTH).unwrap();
        assert_eq!(result.rows_used, 5);
        assert_eq!(result.average_hours, round1(43.0 / 5.0));
        assert_eq!(result.course_name, "CONCEPTS OF MATHEMATICS");
    }

    #[test]
    fn missing_workload_is_skipped() {
        let rows = [
            row("2024", "Fall", "21127", Some(9.0)),
            row("2024", "Fall", "21127", None),
            row("2024", "Spring", "21127", Some(6.0)),
        ];
        let groups: Vec<SemesterGroup<'_>> =
            vec![rows[0..2].iter().collect(), rows[2..].iter().collect()];

        let result = average_course("21127", &groups, FilterMode::SemesterCount(2), 2).unwrap();
        assert_eq!(result.rows_used, 2);
        assert_eq!(result.average_hours, 7.5);
    }

    #[test]
    fn course_name_comes_from_last_counted_row() {
        let mut renamed = row("2023", "Fall", "21127", Some(4.0));
        renamed.course_name = "CONCEPTS OF MATH".to_string();
        let mut unnamed = row("2023", "Fall", "21127", None);
        unnamed.course_name = "IGNORED".to_string();
        let rows = [row("2024", "Fall", "21127", Some(9.0)), renamed, unnamed];
        let groups: Vec<SemesterGroup<'_>> = vec![rows[..1].iter().collect(), rows[1..].iter().collect()];

        let result = average_course("21127", &groups, FilterMode::Default, 2).unwrap();
        assert_eq!(result.course_name, "CONCEPTS OF MATH");
    }

    #[test]
    fn response_count_threshold() {
        let rows = [
            with_stats(row("2024", "Fall", "21127", Some(9.0)), Some(5), None),
            with_stats(row("2024", "Fall", "21127", Some(11.0)), Some(10), None),
            with_stats(row("2024", "Spring", "21127", Some(20.0)), None, None),
            with_stats(row("2023", "Fall", "21127", Some(30.0)), Some(50), None),
        ];
        let groups: Vec<SemesterGroup<'_>> = vec![
            rows[0..2].iter().collect(),
            rows[2..3].iter().collect(),
            rows[3..].iter().collect(),
        ];

        let mode = FilterMode::ResponseCountMin { depth: 2, min: 10 };
        let result = average_course("21127", &groups, mode, 2).unwrap();
        assert_eq!(result.rows_used, 1);
        assert_eq!(result.average_hours, 11.0);
    }

    #[test]
    fn response_threshold_beyond_any_count_filters_everything() {
        let rows = [with_stats(row("2024", "Fall", "21127", Some(9.0)), Some(u32::MAX), None)];
        let groups: Vec<SemesterGroup<'_>> = vec![rows.iter().collect()];

        let mode = FilterMode::ResponseCountMin { depth: 1, min: 99_999_999_999 };
        assert!(matches!(
            average_course("21127", &groups, mode, 2),
            Err(QueryError::CourseNotFoundInFilter { .. })
        ));
    }

    #[test]
    fn rating_proportion_threshold_scales_to_percent() {
        let rows = [
            with_stats(row("2024", "Fall", "21127", Some(9.0)), None, Some(49.9)),
            with_stats(row("2024", "Fall", "21127", Some(12.0)), None, Some(50.0)),
            with_stats(row("2024", "Fall", "21127", Some(14.0)), None, None),
        ];
        let groups: Vec<SemesterGroup<'_>> = vec![rows.iter().collect()];

        let mode = FilterMode::RatingProportionMin { depth: 1, min: 0.5 };
        let result = average_course("21127", &groups, mode, 2).unwrap();
        assert_eq!(result.rows_used, 1);
        assert_eq!(result.average_hours, 12.0);
    }

    #[test]
    fn nothing_left_is_not_found() {
        let rows = [row("2024", "Fall", "21127", None)];
        let groups: Vec<SemesterGroup<'_>> = vec![rows.iter().collect()];

        assert_eq!(
            average_course("21127", &groups, FilterMode::Default, 2),
            Err(QueryError::CourseNotFoundInFilter {
                course_id: "21127".to_string()
            })
        );
        assert!(average_course("21127", &[], FilterMode::Default, 2).is_err());
        assert!(average_course("21127", &groups, FilterMode::SemesterCount(0), 2).is_err());
    }

    #[test]
    fn average_is_rounded_to_one_decimal() {
        let rows = [
            row("2024", "Fall", "21127", Some(9.0)),
            row("2024", "Fall", "21127", Some(9.0)),
            row("2024", "Fall", "21127", Some(10.0)),
        ];
        let groups: Vec<SemesterGroup<'_>> = vec![rows.iter().collect()];

        let result = average_course("21127", &groups, FilterMode::Default, 2).unwrap();
        assert_eq!(result.average_hours, 9.3);
    }

    #[test]
    fn grand_total_sums_rounded_averages() {
        let results = vec![
            CourseAverageResult {
                course_id: "21127".to_string(),
                course_name: "A".to_string(),
                average_hours: 9.3,
                rows_used: 3,
            },
            CourseAverageResult {
                course_id: "15112".to_string(),
                course_name: "B".to_string(),
                average_hours: 11.4,
                rows_used: 4,
            },
        ];
        assert_eq!(grand_total(&results), 20.7);
        assert_eq!(grand_total(&[]), 0.0);
    }
}
