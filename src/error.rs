use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("first argument is not a course ID")]
    MissingCourseId,
    #[error("optional semester/threshold arguments are malformed")]
    MalformedTrailingArgs,
    #[error("course {course_id} has no rows after filtering")]
    CourseNotFoundInFilter { course_id: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DetailError {
    #[error("{token:?} is not a course ID")]
    InvalidCourseId { token: String },
    #[error("course {course_id} not found")]
    CourseNotFound { course_id: String },
}
