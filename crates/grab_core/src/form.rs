use std::fmt;

use crate::state::FormState;

pub const COUNT_MIN: u32 = 1;
pub const COUNT_MAX: u32 = 50;
pub const DEFAULT_COUNT: &str = "20";
pub const DEFAULT_MIN_SIZE: &str = "medium";

/// A validated download request, immutable once submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobRequest {
    pub query: String,
    pub count: u32,
    /// Minimum-size selector, opaque to the client.
    pub min_size: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    EmptyQuery,
    CountNotANumber,
    CountOutOfRange,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::EmptyQuery => write!(f, "Please enter a search query"),
            ValidationError::CountNotANumber => {
                write!(f, "Image count must be a whole number")
            }
            ValidationError::CountOutOfRange => write!(
                f,
                "Image count must be between {COUNT_MIN} and {COUNT_MAX}"
            ),
        }
    }
}

/// Checks raw form fields and produces a [`JobRequest`], or names the
/// violated constraint. The count is re-checked here even though edits are
/// clamped live, since the field can still hold non-numeric text.
pub fn validate(form: &FormState) -> Result<JobRequest, ValidationError> {
    let query = form.query.trim();
    if query.is_empty() {
        return Err(ValidationError::EmptyQuery);
    }

    let count: i64 = form
        .count
        .trim()
        .parse()
        .map_err(|_| ValidationError::CountNotANumber)?;
    if count < i64::from(COUNT_MIN) || count > i64::from(COUNT_MAX) {
        return Err(ValidationError::CountOutOfRange);
    }

    Ok(JobRequest {
        query: query.to_owned(),
        count: count as u32,
        min_size: form.min_size.clone(),
    })
}

/// Live-edit aid for the count field: numeric values outside [1, 50] snap to
/// the nearest bound, anything non-numeric is left untouched for [`validate`]
/// to reject at submission.
pub fn clamp_count(raw: &str) -> String {
    match raw.trim().parse::<i64>() {
        Ok(n) if n > i64::from(COUNT_MAX) => COUNT_MAX.to_string(),
        Ok(n) if n < i64::from(COUNT_MIN) => COUNT_MIN.to_string(),
        _ => raw.to_owned(),
    }
}
