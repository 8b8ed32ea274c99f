//! Text normalization used ahead of similarity scoring

use regex::Regex;
use std::sync::OnceLock;

/// Lowercases text, replaces symbols with spaces and collapses whitespace
pub struct TextProcessor {
    symbol_regex: Regex,
    token_regex: Regex,
}

impl Default for TextProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl TextProcessor {
    pub fn new() -> Self {
        let symbol_regex = Regex::new(r"[^\w\s]").expect("Invalid symbol regex");

        // Same token shape as a default TF-IDF vectorizer: two or more word characters
        let token_regex = Regex::new(r"\b\w\w+\b").expect("Invalid token regex");

        Self {
            symbol_regex,
            token_regex,
        }
    }

    /// Normalize text. Total: empty input yields empty output.
    pub fn normalize(&self, text: &str) -> String {
        let lowered = text.to_lowercase();
        let without_symbols = self.symbol_regex.replace_all(&lowered, " ");

        without_symbols.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    /// Split already-normalized text into vocabulary terms
    pub fn tokenize<'a>(&self, normalized: &'a str) -> Vec<&'a str> {
        self.token_regex
            .find_iter(normalized)
            .map(|m| m.as_str())
            .collect()
    }
}

fn shared() -> &'static TextProcessor {
    static PROCESSOR: OnceLock<TextProcessor> = OnceLock::new();
    PROCESSOR.get_or_init(TextProcessor::new)
}

/// Normalize text with a shared processor
pub fn normalize(text: &str) -> String {
    shared().normalize(text)
}
