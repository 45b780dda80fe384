/// True for `DDDDD` or `DD-DDD`.
pub fn is_valid_course_token(token: &str) -> bool {
    let bytes = token.as_bytes();
    match bytes.len() {
        5 => bytes.iter().all(u8::is_ascii_digit),
        6 => {
            bytes[2] == b'-'
                && bytes[..2].iter().all(u8::is_ascii_digit)
                && bytes[3..].iter().all(u8::is_ascii_digit)
        }
        _ => false,
    }
}

/// Converts a course token to the key used in the table's course ID column.
///
/// The hyphen is removed and a single leading zero of the department prefix
/// is dropped, because the table stores IDs as integers ("02251" is "2251").
/// Callers check [`is_valid_course_token`] first; other input is passed through
/// the same rules without failing.
pub fn normalize_to_compact(token: &str) -> String {
    let compact: String = token.chars().filter(|c| *c != '-').collect();
    match compact.strip_prefix('0') {
        Some(rest) => rest.to_string(),
        None => compact,
    }
}

/// User-facing `DD-DDD` form of a compact ID, restoring a dropped leading zero.
pub fn display_form(compact: &str) -> String {
    if compact.len() <= 5 && compact.chars().all(|c| c.is_ascii_digit()) {
        let padded = format!("{compact:0>5}");
        format!("{}-{}", &padded[..2], &padded[2..])
    } else {
        compact.to_string()
    }
}
