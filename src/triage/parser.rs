//! Strict three-line response parser.

use crate::error::TriageError;
use crate::triage::types::Classification;

/// Parse the model's raw output into a `Classification`.
///
/// The contract is positional: the response must contain exactly three
/// non-empty lines, and a line's position decides which field it fills. The
/// text before the first `": "` is not checked against the expected label,
/// so a mislabeled line in the right position still parses. Field values are
/// passed through without enum validation.
pub fn parse(raw_text: &str) -> Result<Classification, TriageError> {
    let lines: Vec<&str> = raw_text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    if lines.len() != 3 {
        return Err(TriageError::MalformedResponse(format!(
            "expected 3 lines, got {}",
            lines.len()
        )));
    }

    Ok(Classification {
        category: field_value(lines[0], 1)?,
        priority: field_value(lines[1], 2)?,
        requires_response: field_value(lines[2], 3)?,
    })
}

/// Extract the value after the first `": "` on the line.
fn field_value(line: &str, position: usize) -> Result<String, TriageError> {
    match line.split_once(": ") {
        Some((_, value)) => Ok(value.trim().to_string()),
        None => Err(TriageError::MalformedResponse(format!(
            "line {} has no ': ' separator: {:?}",
            position, line
        ))),
    }
}
