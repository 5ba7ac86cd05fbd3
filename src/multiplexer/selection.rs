//! Operator selection from a numbered session listing.

/// Parsed answer to "pick a session number, or x to go back".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Empty answer or `x`.
    Cancel,
    /// Zero-based index into the listed sessions.
    Index(usize),
    /// Non-numeric or out of range; carries the operator-facing reason.
    Invalid(String),
}

/// Interpret a 1-based `answer` against a listing of `len` sessions.
pub fn parse_selection(answer: &str, len: usize) -> Selection {
    let trimmed = answer.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("x") {
        return Selection::Cancel;
    }
    let Ok(number) = trimmed.parse::<usize>() else {
        return Selection::Invalid(format!("`{trimmed}` is not a number"));
    };
    if number == 0 || number > len {
        return Selection::Invalid(format!("choice {number} is out of range (1-{len})"));
    }
    Selection::Index(number - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_range_numbers_map_to_zero_based_index() {
        assert_eq!(parse_selection("1", 3), Selection::Index(0));
        assert_eq!(parse_selection(" 3 ", 3), Selection::Index(2));
    }

    #[test]
    fn zero_and_past_end_are_rejected() {
        assert!(matches!(parse_selection("0", 3), Selection::Invalid(_)));
        assert!(matches!(parse_selection("4", 3), Selection::Invalid(_)));
        assert!(matches!(parse_selection("1", 0), Selection::Invalid(_)));
    }

    #[test]
    fn non_numeric_answers_are_rejected() {
        assert!(matches!(parse_selection("two", 3), Selection::Invalid(_)));
        assert!(matches!(parse_selection("-1", 3), Selection::Invalid(_)));
        assert!(matches!(parse_selection("1.5", 3), Selection::Invalid(_)));
    }

    #[test]
    fn empty_or_x_cancels() {
        assert_eq!(parse_selection("", 3), Selection::Cancel);
        assert_eq!(parse_selection("X", 3), Selection::Cancel);
        assert_eq!(parse_selection("  x ", 3), Selection::Cancel);
    }
}
