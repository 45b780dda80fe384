use std::io::Read;
use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

use crate::models::TableRow;

/// The loaded FCE table. Immutable once built; queries borrow its rows.
#[derive(Debug, Clone, Default)]
pub struct FceTable {
    rows: Vec<TableRow>,
}

#[derive(Deserialize)]
struct CsvRow {
    #[serde(rename = "Year")]
    year: String,
    #[serde(rename = "Semester")]
    semester: String,
    #[serde(rename = "Dept", default)]
    department: String,
    #[serde(rename = "Num")]
    course_id: String,
    #[serde(rename = "Name", default)]
    instructor: String,
    #[serde(rename = "Course Name", default)]
    course_name: String,
    #[serde(rename = "Possible Respondents", default, deserialize_with = "csv::invalid_option")]
    total_students: Option<u32>,
    #[serde(rename = "Num Respondents", default, deserialize_with = "csv::invalid_option")]
    num_respondents: Option<u32>,
    #[serde(rename = "Response Rate %", default, deserialize_with = "csv::invalid_option")]
    response_rate_percent: Option<f64>,
    #[serde(rename = "Hrs Per Week", default, deserialize_with = "csv::invalid_option")]
    workload_hours: Option<f64>,
    #[serde(rename = "Overall course rate", default, deserialize_with = "csv::invalid_option")]
    overall_rating: Option<f64>,
}

/// The course number column holds integers, so `02251` is keyed as `2251`.
fn integer_key(cell: &str) -> String {
    let cell = cell.trim();
    if cell.is_empty() || !cell.bytes().all(|b| b.is_ascii_digit()) {
        return cell.to_string();
    }
    match cell.trim_start_matches('0') {
        "" => "0".to_string(),
        digits => digits.to_string(),
    }
}

/// `NaN` parses as a float; treat it like an empty cell.
fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| !v.is_nan())
}

impl From<CsvRow> for TableRow {
    fn from(row: CsvRow) -> Self {
        TableRow {
            year: row.year.trim().to_string(),
            semester: row.semester.trim().to_string(),
            course_id: integer_key(&row.course_id),
            department: row.department,
            instructor: row.instructor,
            course_name: row.course_name,
            total_students: row.total_students,
            num_respondents: row.num_respondents,
            response_rate_percent: finite(row.response_rate_percent),
            workload_hours: finite(row.workload_hours),
            overall_rating: finite(row.overall_rating),
        }
    }
}

impl FceTable {
    pub fn new(rows: Vec<TableRow>) -> Self {
        Self { rows }
    }

    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let file = std::fs::File::open(path)
            .with_context(|| format!("failed to open FCE table {}", path.display()))?;
        Self::from_reader(file).with_context(|| format!("failed to load {}", path.display()))
    }

    pub fn from_reader<R: Read>(reader: R) -> anyhow::Result<Self> {
        let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::Headers).from_reader(reader);
        let mut rows = Vec::new();

        for (index, result) in reader.deserialize::<CsvRow>().enumerate() {
            let row = result.with_context(|| format!("malformed FCE row {}", index + 1))?;
            rows.push(TableRow::from(row));
        }

        Ok(Self::new(rows))
    }

    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
