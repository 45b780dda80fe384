use std::collections::HashMap;

use clap::ValueEnum;

use crate::models::{SemesterGroup, TableRow};

/// How rows of one course are split into semester groups.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Segmentation {
    /// Assumes the table lists each (year, semester) as one contiguous block.
    /// A block interrupted by another semester shows up as two groups.
    #[default]
    Contiguous,
    /// Groups by (year, semester) wherever the rows appear, ordered by first appearance.
    Grouped,
}

pub fn segment<'a>(
    rows: &'a [TableRow],
    course_id: &str,
    strategy: Segmentation,
) -> Vec<SemesterGroup<'a>> {
    match strategy {
        Segmentation::Contiguous => segment_contiguous(rows, course_id),
        Segmentation::Grouped => segment_grouped(rows, course_id),
    }
}

/// Walks the table once. The running key tracks every row, not just the
/// matching ones, so two offerings of the course in adjacent semesters land in
/// separate groups. A group is emitted only when the key changes, so rows in
/// the table's final (year, semester) block never form a group.
fn segment_contiguous<'a>(rows: &'a [TableRow], course_id: &str) -> Vec<SemesterGroup<'a>> {
    let mut groups = Vec::new();
    let mut current: SemesterGroup<'a> = Vec::new();
    let mut key: Option<(&str, &str)> = None;

    for row in rows {
        if key != Some(row.semester_key()) {
            if !current.is_empty() {
                groups.push(std::mem::take(&mut current));
            }
            key = Some(row.semester_key());
        }
        if row.course_id == course_id {
            current.push(row);
        }
    }

    groups
}

fn segment_grouped<'a>(rows: &'a [TableRow], course_id: &str) -> Vec<SemesterGroup<'a>> {
    let mut index: HashMap<(&str, &str), usize> = HashMap::new();
    let mut groups: Vec<SemesterGroup<'a>> = Vec::new();

    for row in rows.iter().filter(|row| row.course_id == course_id) {
        let slot = *index.entry(row.semester_key()).or_insert_with(|| {
            groups.push(Vec::new());
            groups.len() - 1
        });
        groups[slot].push(row);
    }

    groups
}
