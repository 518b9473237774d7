//! Text preprocessing and tokenization for the statistical classifier.
//!
//! Both functions are pure and hold no state, so they are safe to call from
//! any number of concurrent classification tasks.

use lazy_static::lazy_static;
use regex::Regex;

/// Marker token emitted when the text contains a URL.
pub const URL_MARKER: &str = "[URL]";
/// Marker token emitted when the text contains an email address.
pub const EMAIL_MARKER: &str = "[EMAIL]";
/// Marker token emitted when the text contains currency amounts.
pub const MONEY_MARKER: &str = "[MONEY]";
/// Marker token emitted when the text contains urgency vocabulary.
pub const URGENT_MARKER: &str = "[URGENT]";
/// Marker token emitted when the text contains call-to-action vocabulary.
pub const ACTION_MARKER: &str = "[ACTION]";

lazy_static! {
    static ref HTML_TAG: Regex = Regex::new(r"<[^>]*>").unwrap();
    static ref URL_PATTERN: Regex = Regex::new(r"(?i)https?://\S+|www\.\S+").unwrap();
    static ref EMAIL_PATTERN: Regex =
        Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}").unwrap();
    static ref EXCLAMATION_RUN: Regex = Regex::new(r"!{3,}").unwrap();
    static ref QUESTION_RUN: Regex = Regex::new(r"\?{3,}").unwrap();
    static ref NON_TOKEN: Regex = Regex::new(r"[^\w\s\[\]]").unwrap();
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
    static ref MONEY_PATTERN: Regex =
        Regex::new(r"(?i)[$£€¥₹]|\b\d+(?:[.,]\d+)?\s*(?:dollars?|euros?|pounds?)\b").unwrap();
    static ref URGENCY_PATTERN: Regex =
        Regex::new(r"(?i)\b(?:urgent|immediately|asap|act now|limited time|expires?|deadline)\b")
            .unwrap();
    static ref ACTION_PATTERN: Regex =
        Regex::new(r"(?i)\b(?:click|verify|update|confirm|download|install|call now)\b").unwrap();
}

/// Clean raw email text for scoring: strip markup, replace URLs and email
/// addresses with marker tokens, collapse punctuation runs and whitespace.
pub fn preprocess(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    // Lowercase first so the inserted markers stay canonical uppercase.
    let lowered = text.to_lowercase();
    let stripped = HTML_TAG.replace_all(&lowered, " ");
    let with_urls = URL_PATTERN.replace_all(&stripped, format!(" {URL_MARKER} "));
    let with_emails = EMAIL_PATTERN.replace_all(&with_urls, format!(" {EMAIL_MARKER} "));
    let collapsed = EXCLAMATION_RUN.replace_all(&with_emails, "!");
    let collapsed = QUESTION_RUN.replace_all(&collapsed, "?");
    let cleaned = NON_TOKEN.replace_all(&collapsed, " ");
    WHITESPACE.replace_all(&cleaned, " ").trim().to_string()
}

/// Split text into classifier tokens and append semantic marker tokens for
/// patterns found anywhere in the original text. Tokens shorter than two
/// characters are dropped as noise.
pub fn tokenize(text: &str) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }

    let mut tokens: Vec<String> = preprocess(text)
        .split_whitespace()
        .filter(|word| word.chars().count() >= 2)
        .map(|word| word.to_string())
        .collect();

    // Markers are matched against the original text so that formatting
    // removed by preprocessing still contributes signal.
    if text.contains("http") || text.contains("www") || text.contains(".com") {
        tokens.push(URL_MARKER.to_string());
    }
    if text.contains('@') {
        tokens.push(EMAIL_MARKER.to_string());
    }
    if MONEY_PATTERN.is_match(text) {
        tokens.push(MONEY_MARKER.to_string());
    }
    if URGENCY_PATTERN.is_match(text) {
        tokens.push(URGENT_MARKER.to_string());
    }
    if ACTION_PATTERN.is_match(text) {
        tokens.push(ACTION_MARKER.to_string());
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preprocess_strips_markup_and_urls() {
        let cleaned = preprocess("<p>Visit https://example.com/prize now!!!</p>");
        assert!(!cleaned.contains('<'));
        assert!(cleaned.contains(URL_MARKER));
        assert!(!cleaned.contains("!!!"));
    }

    #[test]
    fn test_preprocess_replaces_email_addresses() {
        let cleaned = preprocess("Contact support@example.org today");
        assert!(cleaned.contains(EMAIL_MARKER));
        assert!(!cleaned.contains("support@example.org"));
    }

    #[test]
    fn test_tokenize_drops_short_tokens() {
        let tokens = tokenize("I am a very happy user");
        assert!(!tokens.contains(&"i".to_string()));
        assert!(!tokens.contains(&"a".to_string()));
        assert!(tokens.contains(&"very".to_string()));
    }

    #[test]
    fn test_tokenize_emits_semantic_markers() {
        let tokens = tokenize("URGENT: click here to claim $500 at http://scam.example");
        assert!(tokens.contains(&URL_MARKER.to_string()));
        assert!(tokens.contains(&MONEY_MARKER.to_string()));
        assert!(tokens.contains(&URGENT_MARKER.to_string()));
        assert!(tokens.contains(&ACTION_MARKER.to_string()));
    }

    #[test]
    fn test_tokenize_empty_text() {
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn test_tokenize_is_deterministic() {
        let text = "Meeting scheduled for tomorrow at 2 PM";
        assert_eq!(tokenize(text), tokenize(text));
    }
}
