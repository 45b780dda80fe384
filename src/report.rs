use std::fmt::Write;

use crate::course_id::display_form;
use crate::error::{DetailError, QueryError};
use crate::models::{AverageReport, CourseDetail};

/// A reply to one chat command: plain text, or a titled embed with labelled fields.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Text { body: String },
    Embed { title: String, fields: Vec<(String, String)> },
}

impl Reply {
    pub fn text(body: impl Into<String>) -> Self {
        Reply::Text { body: body.into() }
    }

    pub fn render(&self) -> String {
        match self {
            Reply::Text { body } => body.clone(),
            Reply::Embed { title, fields } => {
                let mut output = String::new();
                let _ = writeln!(output, "__**{title}**__");
                for (label, value) in fields {
                    let _ = writeln!(output, "**{label}:** {value}");
                }
                output.trim_end().to_string()
            }
        }
    }
}

pub fn average_reply(report: &AverageReport) -> Reply {
    let mut output = String::new();

    for course in &report.per_course {
        let _ = writeln!(
            output,
            "**{}** ({}) = **{:.1} hours/week**",
            display_form(&course.course_id),
            course.course_name,
            course.average_hours
        );
    }
    let _ = write!(output, "Total FCE = **{:.1} hours/week**", report.total);

    Reply::text(output)
}

fn or_missing<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| v.to_string())
}

pub fn detail_reply(detail: &CourseDetail) -> Reply {
    let response_rate = detail
        .response_rate_percent
        .map_or_else(|| "n/a".to_string(), |rate| format!("{rate}%"));

    Reply::Embed {
        title: detail.title.clone(),
        fields: vec![
            ("Department".to_string(), detail.department.clone()),
            ("Instructor".to_string(), detail.instructor.clone()),
            ("Total Students".to_string(), or_missing(detail.total_students)),
            ("Response Rate".to_string(), response_rate),
            ("FCE Hours".to_string(), or_missing(detail.workload_hours)),
            ("Overall Course Rating".to_string(), or_missing(detail.overall_rating)),
        ],
    }
}

pub fn query_error_reply(err: &QueryError) -> Reply {
    match err {
        QueryError::MissingCourseId => Reply::text(
            "Invalid arguments - please specify the course ID (e.g. \"&fce 21127 2\")",
        ),
        QueryError::MalformedTrailingArgs => Reply::text(
            "Invalid arguments - please follow the `&fce [courseIDs...] [opt: # sem] [opt: # / prop. responses]` format.",
        ),
        QueryError::CourseNotFoundInFilter { course_id } => {
            Reply::text(format!("Course not found: {course_id}"))
        }
    }
}

pub fn detail_error_reply(err: &DetailError) -> Reply {
    match err {
        DetailError::InvalidCourseId { .. } => Reply::text(
            "Invalid arguments - please specify the course ID (e.g. \"&course 21127\")",
        ),
        DetailError::CourseNotFound { .. } => Reply::text("Course not found."),
    }
}
