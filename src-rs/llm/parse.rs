//! Extraction of tips from the model's freeform reply.
//!
//! The model is asked for `[tip one: tip two: ...]`. Content runs from the
//! first `[` to the last `]` that follows it; brackets nested inside that
//! span are kept as text. Without a `[`, the whole reply is used (cut at the
//! last `]` if there is one), which may yield noise but never panics.

use super::types::{AdapterError, TipList};

pub fn extract_list_body(text: &str) -> &str {
    let start = text.find('[').map(|idx| idx + 1).unwrap_or(0);
    let rest = &text[start..];
    match rest.rfind(']') {
        Some(end) => &rest[..end],
        None => rest,
    }
}

pub fn parse_tip_list(text: &str) -> Result<TipList, AdapterError> {
    let tips: TipList = extract_list_body(text)
        .split(':')
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(str::to_string)
        .collect();
    if tips.is_empty() {
        return Err(AdapterError::NoTips);
    }
    Ok(tips)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bracketed_colon_list() {
        let text = "Here you go:\n[Drink water : Call a friend:  Take a walk ]\nHope it helps.";
        let tips = parse_tip_list(text).unwrap();
        assert_eq!(tips, vec!["Drink water", "Call a friend", "Take a walk"]);
    }

    #[test]
    fn drops_empty_pieces() {
        let tips = parse_tip_list("[a::b: :c:]").unwrap();
        assert_eq!(tips, vec!["a", "b", "c"]);
    }

    #[test]
    fn spans_first_open_to_last_close() {
        let text = "[one: two] and [three]";
        assert_eq!(extract_list_body(text), "one: two] and [three");
        let tips = parse_tip_list(text).unwrap();
        assert_eq!(tips, vec!["one", "two] and [three"]);
    }

    #[test]
    fn keeps_nested_brackets_as_text() {
        let tips = parse_tip_list("[Smile [really]: Breathe]").unwrap();
        assert_eq!(tips, vec!["Smile [really]", "Breathe"]);
    }

    #[test]
    fn without_brackets_uses_whole_text() {
        let tips = parse_tip_list("Rest: Stretch").unwrap();
        assert_eq!(tips, vec!["Rest", "Stretch"]);
    }

    #[test]
    fn unclosed_bracket_runs_to_end() {
        let tips = parse_tip_list("intro [Rest: Stretch").unwrap();
        assert_eq!(tips, vec!["Rest", "Stretch"]);
    }

    #[test]
    fn close_before_open_is_ignored() {
        assert_eq!(extract_list_body("] noise [a: b]"), "a: b");
    }

    #[test]
    fn empty_list_is_an_error() {
        assert!(matches!(parse_tip_list("[ : :  ]"), Err(AdapterError::NoTips)));
        assert!(matches!(parse_tip_list(""), Err(AdapterError::NoTips)));
    }
}
