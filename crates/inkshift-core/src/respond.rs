//! Backend response parsing and error rephrasing.

/// Upper bound on alternatives offered to the user.
pub const MAX_ALTERNATIVES: usize = 3;

/// Parse a multi-result response into at most [`MAX_ALTERNATIVES`] entries.
///
/// The backend is asked for a `||`-joined triple but models are unreliable
/// formatters, so this tolerates a double-pipe delimiter, a newline
/// delimiter, or no delimiter at all (one implicit alternative). Entries are
/// trimmed, empties dropped, and the set capped at three. A malformed
/// response therefore degrades to a single alternative rather than an error.
pub fn parse_alternatives(response: &str) -> Vec<String> {
    let candidates: Vec<&str> = if response.contains("||") {
        response.split("||").collect()
    } else if response.contains('\n') {
        response.split('\n').collect()
    } else {
        vec![response]
    };

    candidates
        .into_iter()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .take(MAX_ALTERNATIVES)
        .map(str::to_owned)
        .collect()
}

/// Rephrase the two backend error classes that deserve a friendlier message,
/// detected by substring match. Everything else passes through verbatim.
pub fn friendly_error(message: &str) -> Option<&'static str> {
    if message.contains("overloaded") || message.contains("rate limit") {
        return Some("The AI service is temporarily overloaded, please try again in a moment.");
    }
    if message.contains("API key") || message.contains("API_KEY") {
        return Some("Invalid API key. Please configure a valid key in the extension settings.");
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn double_pipe_delimited() {
        assert_eq!(parse_alternatives("A||B||C"), ["A", "B", "C"]);
    }

    #[test]
    fn newline_delimited_without_pipes() {
        assert_eq!(parse_alternatives("A\nB"), ["A", "B"]);
    }

    #[test]
    fn single_implicit_alternative() {
        assert_eq!(parse_alternatives("Only one"), ["Only one"]);
    }

    #[test]
    fn caps_at_three() {
        assert_eq!(parse_alternatives("a||b||c||d||e"), ["a", "b", "c"]);
        assert_eq!(parse_alternatives("1\n2\n3\n4"), ["1", "2", "3"]);
    }

    #[test]
    fn trims_and_drops_empties() {
        assert_eq!(parse_alternatives(" A ||   || B "), ["A", "B"]);
        assert_eq!(parse_alternatives("\n\nX\n\n"), ["X"]);
    }

    #[test]
    fn empty_response_yields_nothing() {
        assert!(parse_alternatives("   ").is_empty());
    }

    #[test]
    fn overload_errors_are_rephrased() {
        assert!(friendly_error("model is overloaded, retry later").is_some());
        assert!(friendly_error("rate limit exceeded").is_some());
    }

    #[test]
    fn credential_errors_are_rephrased() {
        assert!(friendly_error("API key not valid").is_some());
    }

    #[test]
    fn other_errors_pass_through() {
        assert!(friendly_error("upstream timeout").is_none());
    }
}
