// SPDX-FileCopyrightText: 2026 Handoff Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Handover keyword parsing and matching.

/// Splits a configured comma-separated list into trimmed entries.
///
/// Full-width commas (U+FF0C) are normalized first so lists typed on an
/// East Asian keyboard parse the same as ASCII ones. Empty entries are
/// dropped.
pub fn parse_list(raw: &str) -> Vec<String> {
    raw.replace('\u{ff0c}', ",")
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Returns the first keyword in list order that the message matches.
///
/// Single-character keywords match only on exact message equality;
/// longer keywords match as a substring. The asymmetry keeps one-letter
/// triggers from firing inside ordinary words.
pub fn match_keyword<'a>(text: &str, keywords: &'a [String]) -> Option<&'a str> {
    keywords
        .iter()
        .find(|keyword| {
            if keyword.chars().count() == 1 {
                text == keyword.as_str()
            } else {
                text.contains(keyword.as_str())
            }
        })
        .map(String::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_list_normalizes_full_width_commas() {
        let parsed = parse_list("agent\u{ff0c}human, help ,, ");
        assert_eq!(parsed, vec!["agent", "human", "help"]);
    }

    #[test]
    fn parse_list_empty_input_yields_no_keywords() {
        assert!(parse_list("").is_empty());
        assert!(parse_list(" , \u{ff0c} ").is_empty());
    }

    #[test]
    fn single_char_keyword_requires_exact_equality() {
        let keywords = parse_list("a,help");
        assert_eq!(match_keyword("a", &keywords), Some("a"));
        assert_eq!(match_keyword("apple", &keywords), None);
        assert_eq!(match_keyword("i need help now", &keywords), Some("help"));
    }

    #[test]
    fn first_match_in_list_order_wins() {
        let keywords = parse_list("human,agent");
        assert_eq!(
            match_keyword("get me an agent human please", &keywords),
            Some("human")
        );
    }

    #[test]
    fn multibyte_single_char_keyword() {
        let keywords = parse_list("\u{4eba}");
        assert_eq!(match_keyword("\u{4eba}", &keywords), Some("\u{4eba}"));
        assert_eq!(match_keyword("\u{4eba}\u{9593}", &keywords), None);
    }
}
