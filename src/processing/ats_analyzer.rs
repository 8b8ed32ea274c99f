//! ATS (Applicant Tracking System) friendliness heuristics
//!
//! Runs on the raw resume text: the rules depend on casing, punctuation and
//! layout artifacts that normalization would erase.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

pub const BASE_SCORE: i32 = 100;
pub const TABLE_PENALTY: i32 = 15;
pub const HEADER_FOOTER_PENALTY: i32 = 5;
pub const MISSING_HEADINGS_PENALTY: i32 = 10;
pub const ACRONYM_PENALTY: i32 = 5;
pub const LENGTH_PENALTY: i32 = 5;

/// Acronym count above which the acronym rule fires
pub const ACRONYM_THRESHOLD: usize = 10;
/// Word count above which the length rule fires
pub const WORD_COUNT_THRESHOLD: usize = 1000;

pub const STANDARD_HEADINGS: [&str; 7] = [
    "experience",
    "education",
    "skills",
    "summary",
    "objective",
    "projects",
    "certifications",
];

pub const TABLE_ISSUE: &str =
    "Detected possible table structures which may not parse correctly in ATS systems";
pub const HEADER_FOOTER_ISSUE: &str =
    "Detected possible headers or footers which may interfere with ATS parsing";
pub const MISSING_HEADINGS_ISSUE: &str =
    "No standard section headings detected (like 'Experience', 'Education', 'Skills')";
pub const ACRONYM_ISSUE: &str = "Excessive use of acronyms may reduce ATS score";
pub const LENGTH_ISSUE: &str = "Resume is quite long, consider making it more concise";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtsReport {
    /// 0 to 100
    pub score: u8,
    /// In rule order
    pub issues: Vec<String>,
}

pub struct AtsAnalyzer {
    table_patterns: Vec<Regex>,
    header_footer_patterns: Vec<Regex>,
    heading_regex: Regex,
    acronym_regex: Regex,
}

impl Default for AtsAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl AtsAnalyzer {
    pub fn new() -> Self {
        let table_patterns = [
            // Runs of pipes or tabs
            r"[|\t]{2,}",
            // Pipe-delimited columns on one line
            r"\|[^|\n]*\|",
            // ASCII and box-drawing borders
            r"\+[-+]+\+",
            r"┌[─┬]+┐",
            r"╔[═╦]+╗",
        ]
        .iter()
        .map(|p| Regex::new(p).expect("Invalid table regex"))
        .collect();

        let header_footer_patterns = [r"Page \d+ of \d+", r"\d+/\d+"]
            .iter()
            .map(|p| Regex::new(p).expect("Invalid header/footer regex"))
            .collect();

        let heading_regex = Regex::new(&format!(r"\b(?:{})\b", STANDARD_HEADINGS.join("|")))
            .expect("Invalid heading regex");

        let acronym_regex = Regex::new(r"\b[A-Z]{2,}\b").expect("Invalid acronym regex");

        Self {
            table_patterns,
            header_footer_patterns,
            heading_regex,
            acronym_regex,
        }
    }

    /// Score the raw resume text. Each rule fires at most once.
    pub fn analyze(&self, raw_text: &str) -> AtsReport {
        let mut score = BASE_SCORE;
        let mut issues = Vec::new();

        let mut flag = |penalty: i32, message: &str| {
            score -= penalty;
            issues.push(message.to_string());
        };

        if self.has_table(raw_text) {
            flag(TABLE_PENALTY, TABLE_ISSUE);
        }

        if self.has_header_footer(raw_text) {
            flag(HEADER_FOOTER_PENALTY, HEADER_FOOTER_ISSUE);
        }

        if !self.has_standard_heading(raw_text) {
            flag(MISSING_HEADINGS_PENALTY, MISSING_HEADINGS_ISSUE);
        }

        if self.acronym_count(raw_text) > ACRONYM_THRESHOLD {
            flag(ACRONYM_PENALTY, ACRONYM_ISSUE);
        }

        if word_count(raw_text) > WORD_COUNT_THRESHOLD {
            flag(LENGTH_PENALTY, LENGTH_ISSUE);
        }

        AtsReport {
            score: score.clamp(0, 100) as u8,
            issues,
        }
    }

    pub fn has_table(&self, text: &str) -> bool {
        self.table_patterns.iter().any(|p| p.is_match(text))
    }

    pub fn has_header_footer(&self, text: &str) -> bool {
        self.header_footer_patterns.iter().any(|p| p.is_match(text))
    }

    pub fn has_standard_heading(&self, text: &str) -> bool {
        self.heading_regex.is_match(&text.to_lowercase())
    }

    pub fn acronym_count(&self, text: &str) -> usize {
        self.acronym_regex.find_iter(text).count()
    }
}

fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

fn shared() -> &'static AtsAnalyzer {
    static ANALYZER: OnceLock<AtsAnalyzer> = OnceLock::new();
    ANALYZER.get_or_init(AtsAnalyzer::new)
}

/// Analyze with a shared analyzer
pub fn analyze_ats(raw_text: &str) -> AtsReport {
    shared().analyze(raw_text)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLEAN_RESUME: &str = "Jane Doe\n\nSummary\nBackend engineer.\n\nExperience\nAcme Corp, built APIs in Rust.\n\nEducation\nBSc Computer Science";

    #[test]
    fn test_clean_resume_scores_full() {
        let report = analyze_ats(CLEAN_RESUME);
        assert_eq!(report.score, 100);
        assert!(report.issues.is_empty());
    }

    #[test]
    fn test_shared_analyzer_is_reused() {
        assert!(std::ptr::eq(shared(), shared()));
        assert_eq!(analyze_ats(CLEAN_RESUME), AtsAnalyzer::new().analyze(CLEAN_RESUME));
    }

    #[test]
    fn test_pipe_table_without_headings() {
        let text = "Name | Age | City\nName | Age | City\nName | Age | City";
        let report = analyze_ats(text);

        assert_eq!(report.score, 75);
        assert_eq!(report.issues, vec![TABLE_ISSUE, MISSING_HEADINGS_ISSUE]);
    }

    #[test]
    fn test_table_variants() {
        let analyzer = AtsAnalyzer::new();

        assert!(analyzer.has_table("Skill\t\tLevel"));
        assert!(analyzer.has_table("a || b"));
        assert!(analyzer.has_table("+-----+-----+"));
        assert!(analyzer.has_table("┌──┬──┐"));
        assert!(analyzer.has_table("╔══╦══╗"));
        assert!(!analyzer.has_table("Python | SQL"));
        assert!(!analyzer.has_table("a | b\nc | d"));
    }

    #[test]
    fn test_table_rule_fires_once() {
        let text = format!("{}\n+---+\n|a|b|\n┌─┐", CLEAN_RESUME);
        let report = analyze_ats(&text);

        assert_eq!(report.score, 100 - TABLE_PENALTY as u8);
        assert_eq!(report.issues, vec![TABLE_ISSUE]);
    }

    #[test]
    fn test_header_footer() {
        let analyzer = AtsAnalyzer::new();
        assert!(analyzer.has_header_footer("Page 1 of 2"));
        assert!(analyzer.has_header_footer("1/3"));
        assert!(!analyzer.has_header_footer("page one of two"));

        let report = analyze_ats(&format!("{}\nPage 1 of 2", CLEAN_RESUME));
        assert_eq!(report.score, 95);
        assert_eq!(report.issues, vec![HEADER_FOOTER_ISSUE]);
    }

    #[test]
    fn test_heading_detection_is_whole_word_and_case_insensitive() {
        let analyzer = AtsAnalyzer::new();
        assert!(analyzer.has_standard_heading("WORK EXPERIENCE"));
        assert!(analyzer.has_standard_heading("Technical Skills:"));
        assert!(!analyzer.has_standard_heading("Experienced educator"));
    }

    #[test]
    fn test_acronym_threshold() {
        let analyzer = AtsAnalyzer::new();

        let ten = "AWS GCP SQL API REST HTTP TCP UDP DNS CDN";
        assert_eq!(analyzer.acronym_count(ten), 10);
        let report = analyze_ats(&format!("{}\n{}", CLEAN_RESUME, ten));
        assert!(!report.issues.contains(&ACRONYM_ISSUE.to_string()));

        let eleven = format!("{} JWT", ten);
        let report = analyze_ats(&format!("Skills\n{}", eleven));
        assert_eq!(report.issues, vec![ACRONYM_ISSUE]);
        assert_eq!(report.score, 95);
    }

    #[test]
    fn test_single_letters_and_mixed_case_are_not_acronyms() {
        let analyzer = AtsAnalyzer::new();
        assert_eq!(analyzer.acronym_count("A I Rust GraphQL iOS"), 0);
        assert_eq!(analyzer.acronym_count("SQL-based AWSome"), 1);
    }

    #[test]
    fn test_length_threshold() {
        let at_limit = format!("Experience {}", "word ".repeat(WORD_COUNT_THRESHOLD - 1));
        assert!(analyze_ats(&at_limit).issues.is_empty());

        let over = format!("Experience {}", "word ".repeat(WORD_COUNT_THRESHOLD));
        let report = analyze_ats(&over);
        assert_eq!(report.issues, vec![LENGTH_ISSUE]);
        assert_eq!(report.score, 95);
    }

    #[test]
    fn test_all_rules_in_order() {
        let mut text = String::from("Name | Age | City\nPage 2 of 3\n");
        text.push_str(&"AWS ".repeat(11));
        text.push_str(&"filler ".repeat(WORD_COUNT_THRESHOLD));

        let report = analyze_ats(&text);
        assert_eq!(
            report.issues,
            vec![
                TABLE_ISSUE,
                HEADER_FOOTER_ISSUE,
                MISSING_HEADINGS_ISSUE,
                ACRONYM_ISSUE,
                LENGTH_ISSUE
            ]
        );
        assert_eq!(report.score, 60);
    }

    #[test]
    fn test_empty_text() {
        let report = analyze_ats("");
        assert_eq!(report.score, 90);
        assert_eq!(report.issues, vec![MISSING_HEADINGS_ISSUE]);
    }
}
