use crate::course_id::{is_valid_course_token, normalize_to_compact};
use crate::error::QueryError;
use crate::models::{CourseQuery, FilterMode};

/// Splits `&fce` arguments into course IDs and the optional depth/threshold suffix.
///
/// Accepted shapes after the course IDs:
/// - nothing
/// - `<semesters>`
/// - `<semesters> <min respondents>` (integer threshold)
/// - `<semesters> <min proportion>` (decimal threshold in `[0, 1]`)
pub fn classify<S: AsRef<str>>(tokens: &[S]) -> Result<CourseQuery, QueryError> {
    let tokens: Vec<&str> = tokens.iter().map(|token| token.as_ref()).collect();

    match tokens.first() {
        Some(first) if is_valid_course_token(first) => {}
        _ => return Err(QueryError::MissingCourseId),
    }

    let last_course = tokens
        .iter()
        .rposition(|token| is_valid_course_token(token))
        .unwrap_or(0);
    let (courses, tail) = tokens.split_at(last_course + 1);

    if !courses.iter().all(|token| is_valid_course_token(token)) {
        return Err(QueryError::MalformedTrailingArgs);
    }

    let mode = classify_tail(tail)?;
    let course_ids = courses
        .iter()
        .map(|token| normalize_to_compact(token))
        .collect();

    Ok(CourseQuery { course_ids, mode })
}

fn classify_tail(tail: &[&str]) -> Result<FilterMode, QueryError> {
    match tail {
        [] => Ok(FilterMode::Default),
        [semesters] => Ok(FilterMode::SemesterCount(parse_count(semesters)?)),
        [depth, threshold] => {
            let depth = parse_count(depth)?;
            if !is_decimal(threshold) {
                return Err(QueryError::MalformedTrailingArgs);
            }
            if is_digits(threshold) {
                // Too large to store means no row can reach it.
                let min = threshold.parse().unwrap_or(u64::MAX);
                return Ok(FilterMode::ResponseCountMin { depth, min });
            }

            let min: f64 = threshold
                .parse()
                .map_err(|_| QueryError::MalformedTrailingArgs)?;
            if (0.0..=1.0).contains(&min) {
                Ok(FilterMode::RatingProportionMin { depth, min })
            } else {
                Err(QueryError::MalformedTrailingArgs)
            }
        }
        _ => Err(QueryError::MalformedTrailingArgs),
    }
}

fn parse_count(token: &str) -> Result<usize, QueryError> {
    if !is_digits(token) {
        return Err(QueryError::MalformedTrailingArgs);
    }
    token.parse().map_err(|_| QueryError::MalformedTrailingArgs)
}

fn is_digits(token: &str) -> bool {
    !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit())
}

/// Digits with at most one decimal point, e.g. `10`, `0.5`, `.5`.
fn is_decimal(token: &str) -> bool {
    match token.split_once('.') {
        Some((whole, frac)) => {
            let digits = format!("{whole}{frac}");
            !frac.contains('.') && is_digits(&digits)
        }
        None => is_digits(token),
    }
}
