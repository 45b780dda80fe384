use serde::Serialize;

/// One FCE row: a single course section taught in one semester.
///
/// Numeric cells that were empty or unparseable in the source table are `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub year: String,
    pub semester: String,
    pub course_id: String,
    pub department: String,
    pub instructor: String,
    pub course_name: String,
    pub total_students: Option<u32>,
    pub num_respondents: Option<u32>,
    pub response_rate_percent: Option<f64>,
    pub workload_hours: Option<f64>,
    pub overall_rating: Option<f64>,
}

impl TableRow {
    pub fn semester_key(&self) -> (&str, &str) {
        (&self.year, &self.semester)
    }
}

/// Rows of one course sharing the same (year, semester).
pub type SemesterGroup<'a> = Vec<&'a TableRow>;

/// How the trailing arguments of an average query restrict the rows used.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FilterMode {
    /// No suffix given; the configured default depth applies.
    Default,
    SemesterCount(usize),
    ResponseCountMin { depth: usize, min: u64 },
    RatingProportionMin { depth: usize, min: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct CourseQuery {
    pub course_ids: Vec<String>,
    pub mode: FilterMode,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CourseAverageResult {
    pub course_id: String,
    pub course_name: String,
    pub average_hours: f64,
    pub rows_used: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AverageReport {
    pub per_course: Vec<CourseAverageResult>,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CourseDetail {
    pub title: String,
    pub department: String,
    pub instructor: String,
    pub total_students: Option<u32>,
    pub response_rate_percent: Option<f64>,
    pub workload_hours: Option<f64>,
    pub overall_rating: Option<f64>,
}

impl From<&TableRow> for CourseDetail {
    fn from(row: &TableRow) -> Self {
        CourseDetail {
            title: row.course_name.clone(),
            department: row.department.clone(),
            instructor: row.instructor.clone(),
            total_students: row.total_students,
            response_rate_percent: row.response_rate_percent,
            workload_hours: row.workload_hours,
            overall_rating: row.overall_rating,
        }
    }
}
