//! Improvement suggestions with a deterministic fallback
//!
//! The live path asks a [`TextGenerator`] for a numbered list and parses it.
//! Any failure, timeout or unusable response degrades to [`fallback_suggestions`],
//! so callers always get between one and [`MAX_SUGGESTIONS`] entries.

use crate::config::SuggestionConfig;
use crate::llm::client::{GeminiClient, TextGenerator};
use crate::llm::prompts::{PromptParams, PromptTemplates};
use async_trait::async_trait;
use log::{debug, info, warn};
use regex::Regex;
use std::sync::OnceLock;
use std::time::Duration;

pub const MAX_SUGGESTIONS: usize = 5;

/// Unnumbered lines this short or shorter are ignored
const MIN_LINE_CHARS: usize = 10;

pub const FALLBACK_SUGGESTIONS: [&str; 2] = [
    "Customize your resume to highlight experience related to the job description",
    "Ensure your skills section includes relevant keywords from the job listing",
];

pub fn fallback_suggestions() -> Vec<String> {
    FALLBACK_SUGGESTIONS.iter().map(|s| s.to_string()).collect()
}

/// Inputs for one suggestion request
#[derive(Debug, Clone, Copy)]
pub struct SuggestionContext<'a> {
    pub resume_text: &'a str,
    pub job_description: &'a str,
    pub matched_skills: &'a [String],
    pub missing_skills: &'a [String],
}

/// Produces suggestions; never fails and never returns an empty list
#[async_trait]
pub trait SuggestionSource: Send + Sync {
    async fn suggest(&self, context: &SuggestionContext<'_>) -> Vec<String>;
}

/// Deterministic source returning the fixed fallback list
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticSuggestions;

#[async_trait]
impl SuggestionSource for StaticSuggestions {
    async fn suggest(&self, _context: &SuggestionContext<'_>) -> Vec<String> {
        fallback_suggestions()
    }
}

/// Source backed by an external text generator
pub struct GeneratedSuggestions<G> {
    generator: G,
    templates: PromptTemplates,
    timeout: Duration,
}

impl<G: TextGenerator> GeneratedSuggestions<G> {
    pub fn new(generator: G, timeout: Duration) -> Self {
        Self {
            generator,
            templates: PromptTemplates::default(),
            timeout,
        }
    }

    fn prompt(&self, context: &SuggestionContext<'_>) -> String {
        let params = PromptParams {
            resume_content: context.resume_text.to_string(),
            job_content: context.job_description.to_string(),
            matched_skills: context.matched_skills.to_vec(),
            missing_skills: context.missing_skills.to_vec(),
        };
        self.templates.render_suggestions(&params)
    }
}

#[async_trait]
impl<G: TextGenerator> SuggestionSource for GeneratedSuggestions<G> {
    async fn suggest(&self, context: &SuggestionContext<'_>) -> Vec<String> {
        let prompt = self.prompt(context);

        let text = match tokio::time::timeout(self.timeout, self.generator.generate(&prompt)).await {
            Ok(Ok(text)) => text,
            Ok(Err(e)) => {
                warn!("Suggestion generation with {} failed: {}", self.generator.name(), e);
                return fallback_suggestions();
            }
            Err(_) => {
                warn!(
                    "Suggestion generation with {} timed out after {}ms",
                    self.generator.name(),
                    self.timeout.as_millis()
                );
                return fallback_suggestions();
            }
        };

        let suggestions = parse_suggestions(&text);
        if suggestions.is_empty() {
            warn!("No usable suggestions in {} response", self.generator.name());
            return fallback_suggestions();
        }

        debug!("Parsed {} suggestions", suggestions.len());
        suggestions
    }
}

/// Extract at most five suggestions from generated text.
///
/// Numbered items (`1. ...`) win; without any, non-heading lines longer than
/// ten characters are used instead.
pub fn parse_suggestions(text: &str) -> Vec<String> {
    let numbered = numbered_item_regex();

    let mut numbered_items = Vec::new();
    let mut saw_numbered = false;
    for line in text.lines() {
        if let Some(captures) = numbered.captures(line) {
            saw_numbered = true;
            let item = captures.get(1).map_or("", |m| m.as_str()).trim();
            if !item.is_empty() {
                numbered_items.push(item.to_string());
            }
        }
    }

    let mut suggestions = if saw_numbered {
        numbered_items
    } else {
        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .filter(|line| !line.starts_with('#'))
            .filter(|line| line.chars().count() > MIN_LINE_CHARS)
            .map(str::to_string)
            .collect()
    };

    suggestions.truncate(MAX_SUGGESTIONS);
    suggestions
}

fn numbered_item_regex() -> &'static Regex {
    static NUMBERED: OnceLock<Regex> = OnceLock::new();
    NUMBERED.get_or_init(|| {
        Regex::new(r"^\s*\d+\.\s*(.*)$").expect("Invalid numbered item regex")
    })
}

/// Pick the suggestion source for a configuration
pub fn suggestion_source_from_config(config: &SuggestionConfig) -> Box<dyn SuggestionSource> {
    if !config.is_configured() {
        info!("Suggestion service not configured, using static suggestions");
        return Box::new(StaticSuggestions);
    }

    match GeminiClient::from_config(config) {
        Ok(Some(client)) => {
            info!("Using {} for suggestions", config.model);
            Box::new(GeneratedSuggestions::new(
                client,
                Duration::from_secs(config.timeout_secs),
            ))
        }
        Ok(None) => Box::new(StaticSuggestions),
        Err(e) => {
            warn!("Suggestion service unavailable: {}", e);
            Box::new(StaticSuggestions)
        }
    }
}
