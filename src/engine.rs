use tracing::debug;

use crate::aggregate::{average_course, grand_total, DEFAULT_DEPTH};
use crate::args::classify;
use crate::error::{DetailError, QueryError};
use crate::lookup::find_course;
use crate::models::{AverageReport, CourseDetail};
use crate::segment::{segment, Segmentation};
use crate::table::FceTable;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryOptions {
    /// Semester groups averaged when the query gives no depth.
    pub default_depth: usize,
    pub segmentation: Segmentation,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            default_depth: DEFAULT_DEPTH,
            segmentation: Segmentation::default(),
        }
    }
}

/// Average weekly hours for every course named in `tokens`, plus their total.
///
/// The first course that ends up with no usable rows fails the whole query.
pub fn run_average_query<S: AsRef<str>>(
    table: &FceTable,
    tokens: &[S],
    options: &QueryOptions,
) -> Result<AverageReport, QueryError> {
    let query = classify(tokens)?;
    debug!(courses = ?query.course_ids, mode = ?query.mode, "classified average query");

    let per_course = query
        .course_ids
        .iter()
        .map(|course_id| {
            let groups = segment(table.rows(), course_id, options.segmentation);
            average_course(course_id, &groups, query.mode, options.default_depth)
        })
        .collect::<Result<Vec<_>, _>>()?;

    let total = grand_total(&per_course);
    Ok(AverageReport { per_course, total })
}

pub fn run_detail_lookup(table: &FceTable, token: &str) -> Result<CourseDetail, DetailError> {
    find_course(table.rows(), token)
}
