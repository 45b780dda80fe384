use crate::course_id::{is_valid_course_token, normalize_to_compact};
use crate::error::DetailError;
use crate::models::{CourseDetail, TableRow};

/// Details of the first row in table order for the given course token.
///
/// Table order stands in for recency; no sorting by year or semester happens here.
pub fn find_course(rows: &[TableRow], token: &str) -> Result<CourseDetail, DetailError> {
    if !is_valid_course_token(token) {
        return Err(DetailError::InvalidCourseId {
            token: token.to_string(),
        });
    }

    let course_id = normalize_to_compact(token);
    rows.iter()
        .find(|row| row.course_id == course_id)
        .map(CourseDetail::from)
        .ok_or(DetailError::CourseNotFound { course_id })
}
