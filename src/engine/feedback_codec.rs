use crate::engine::error::ProtocolError;
use crate::model::feedback::FeedbackResult;

pub const VICTORY_LINE: &str = "guess 5 5";
pub const VICTORY_TEXT: &str = "you win!";

const MAX_COUNT: u32 = 5;
const MAX_ERROR_CATEGORY: u32 = 3;

/// Parse one response line from the scoring service.
///
/// The whole trimmed line must match:
///
/// ```text
/// guess <0-5> <0-5>
/// error <0-3>[ <message>]
/// ```
pub fn parse(raw: &str) -> Result<FeedbackResult, ProtocolError> {
    let line = raw.trim();
    if line.is_empty() {
        return Err(ProtocolError::Empty);
    }

    // guess 5 5
    if line == VICTORY_LINE {
        return Ok(FeedbackResult::Victory);
    }

    // guess <chars> <positions>
    if let Some(rest) = line.strip_prefix("guess ") {
        return parse_counts(rest).ok_or_else(|| malformed(line));
    }

    // error <category> <message>
    if let Some(rest) = line.strip_prefix("error ") {
        return parse_error_report(rest).ok_or_else(|| malformed(line));
    }

    Err(malformed(line))
}

/// Map a result onto the two feedback columns of the history table.
pub fn to_columns(result: &FeedbackResult) -> (String, String) {
    match result {
        FeedbackResult::Victory => (VICTORY_TEXT.to_string(), String::new()),
        FeedbackResult::ExactMatch {
            correct_chars,
            correct_positions,
        } => (correct_chars.to_string(), correct_positions.to_string()),
        FeedbackResult::ErrorReport { message, .. } => (message.clone(), String::new()),
    }
}

fn parse_counts(rest: &str) -> Option<FeedbackResult> {
    let mut chars = rest.chars();
    let correct_chars = digit_at_most(chars.next()?, MAX_COUNT)?;
    if chars.next()? != ' ' {
        return None;
    }
    let correct_positions = digit_at_most(chars.next()?, MAX_COUNT)?;
    if chars.next().is_some() {
        return None;
    }

    Some(FeedbackResult::ExactMatch {
        correct_chars,
        correct_positions,
    })
}

fn parse_error_report(rest: &str) -> Option<FeedbackResult> {
    let mut chars = rest.chars();
    let category = digit_at_most(chars.next()?, MAX_ERROR_CATEGORY)?;
    let message = match chars.as_str() {
        "" => "",
        tail => tail.strip_prefix(' ')?,
    };

    Some(FeedbackResult::ErrorReport {
        category,
        message: message.to_string(),
    })
}

fn digit_at_most(c: char, max: u32) -> Option<u8> {
    c.to_digit(10).filter(|d| *d <= max).map(|d| d as u8)
}

fn malformed(line: &str) -> ProtocolError {
    ProtocolError::Malformed(line.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn victory_line_is_special_cased() {
        assert_eq!(parse("guess 5 5"), Ok(FeedbackResult::Victory));
        assert_eq!(
            to_columns(&FeedbackResult::Victory),
            ("you win!".to_string(), String::new())
        );
    }

    #[test]
    fn guess_counts_become_two_columns() {
        let result = parse("guess 3 1").unwrap();
        assert_eq!(
            result,
            FeedbackResult::ExactMatch {
                correct_chars: 3,
                correct_positions: 1
            }
        );
        assert_eq!(to_columns(&result), ("3".to_string(), "1".to_string()));
    }

    #[test]
    fn error_report_is_a_result_not_a_fault() {
        let result = parse("error 2 too long").unwrap();
        assert_eq!(
            result,
            FeedbackResult::ErrorReport {
                category: 2,
                message: "too long".into()
            }
        );
        assert_eq!(to_columns(&result), ("too long".to_string(), String::new()));
    }

    #[test]
    fn error_report_message_is_optional() {
        assert_eq!(
            parse("error 1"),
            Ok(FeedbackResult::ErrorReport {
                category: 1,
                message: String::new()
            })
        );
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        assert_eq!(parse("  guess 0 0 \r\n").unwrap(), FeedbackResult::ExactMatch {
            correct_chars: 0,
            correct_positions: 0
        });
    }

    #[test]
    fn empty_response_is_rejected() {
        assert_eq!(parse(""), Err(ProtocolError::Empty));
        assert_eq!(parse("   \n"), Err(ProtocolError::Empty));
    }

    #[test]
    fn lines_outside_the_grammar_are_rejected() {
        for raw in [
            "garbage",
            "guess 6 0",
            "guess 3 1 extra",
            "guess 31",
            "guess  3 1",
            "guess 3",
            "error 4 nope",
            "error 1oops",
            "Guess 3 1",
            "victory",
        ] {
            assert!(
                matches!(parse(raw), Err(ProtocolError::Malformed(_))),
                "{raw:?} should not parse"
            );
        }
    }
}
