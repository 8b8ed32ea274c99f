//! Analysis engine combining skill matching, text similarity, ATS heuristics
//! and improvement suggestions into one result

use crate::config::Config;
use crate::llm::suggestions::{
    fallback_suggestions, suggestion_source_from_config, StaticSuggestions, SuggestionContext,
    SuggestionSource, MAX_SUGGESTIONS,
};
use crate::processing::ats_analyzer::AtsAnalyzer;
use crate::processing::similarity::SimilarityScorer;
use crate::processing::skill_matcher::match_skills;
use log::debug;
use serde::{Deserialize, Serialize};

pub use crate::processing::ats_analyzer::AtsReport;
pub use crate::processing::skill_matcher::SkillMatchResult;

/// Share of the final match taken by the skills match
pub const SKILLS_WEIGHT: f64 = 0.6;
/// Share of the final match taken by text similarity
pub const SIMILARITY_WEIGHT: f64 = 0.4;

pub const ATS_SUGGESTION_PREFIX: &str = "ATS Improvement: ";

/// What a job posting asks for
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRequirement {
    pub description: String,
    pub required_skills: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Weighted skills and similarity match, 0 to 100
    pub match_percentage: u8,

    /// ATS friendliness, 0 to 100
    pub ats_score: u8,

    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,

    /// One to five entries
    pub suggestions: Vec<String>,
}

/// Main analysis engine. Holds no per-request state; one engine can serve
/// concurrent analyses.
pub struct AnalysisEngine {
    similarity_scorer: SimilarityScorer,
    ats_analyzer: AtsAnalyzer,
    suggestion_source: Box<dyn SuggestionSource>,
}

impl Default for AnalysisEngine {
    fn default() -> Self {
        Self::offline()
    }
}

impl AnalysisEngine {
    pub fn new(suggestion_source: Box<dyn SuggestionSource>) -> Self {
        Self {
            similarity_scorer: SimilarityScorer::new(),
            ats_analyzer: AtsAnalyzer::new(),
            suggestion_source,
        }
    }

    /// Engine using the suggestion source selected by configuration
    pub fn from_config(config: &Config) -> Self {
        Self::new(suggestion_source_from_config(&config.suggestions))
    }

    /// Engine that never calls an external service
    pub fn offline() -> Self {
        Self::new(Box::new(StaticSuggestions))
    }

    pub async fn analyze_requirement(&self, resume_text: &str, job: &JobRequirement) -> AnalysisResult {
        self.analyze(resume_text, &job.description, &job.required_skills)
            .await
    }

    /// Score a resume against a job description and its required skills
    pub async fn analyze<S: AsRef<str>>(
        &self,
        resume_text: &str,
        job_description: &str,
        required_skills: &[S],
    ) -> AnalysisResult {
        // 1. Skills
        let skills = match_skills(resume_text, required_skills);
        let skills_percentage = skills_match_percentage(&skills);

        // 2. Text similarity
        let similarity_percentage = self
            .similarity_scorer
            .similarity(resume_text, job_description);

        let match_percentage = weighted_match_percentage(skills_percentage, similarity_percentage);

        // 3. ATS heuristics on the raw text
        let ats_report = self.ats_analyzer.analyze(resume_text);

        // 4. Suggestions
        let context = SuggestionContext {
            resume_text,
            job_description,
            matched_skills: &skills.matched_skills,
            missing_skills: &skills.missing_skills,
        };
        let generated = self.suggestion_source.suggest(&context).await;
        let suggestions = merge_suggestions(generated, &ats_report.issues);

        debug!(
            "Analysis: skills {:.1}%, similarity {}%, match {}%, ATS {}",
            skills_percentage, similarity_percentage, match_percentage, ats_report.score
        );

        AnalysisResult {
            match_percentage,
            ats_score: ats_report.score,
            matched_skills: skills.matched_skills,
            missing_skills: skills.missing_skills,
            suggestions,
        }
    }
}

/// Matched share of required skills as a percentage; 0 when nothing is required
pub fn skills_match_percentage(skills: &SkillMatchResult) -> f64 {
    let required = skills.required_count();
    if required == 0 {
        return 0.0;
    }

    skills.matched_skills.len() as f64 / required as f64 * 100.0
}

/// Combine the skills and similarity percentages, floored into 0..=100
pub fn weighted_match_percentage(skills_percentage: f64, similarity_percentage: u8) -> u8 {
    let combined =
        SKILLS_WEIGHT * skills_percentage + SIMILARITY_WEIGHT * f64::from(similarity_percentage);

    combined.floor().clamp(0.0, 100.0) as u8
}

/// Append prefixed ATS issues while there is room under the suggestion cap.
///
/// The result always holds between one and [`MAX_SUGGESTIONS`] entries.
pub fn merge_suggestions(mut suggestions: Vec<String>, ats_issues: &[String]) -> Vec<String> {
    suggestions.truncate(MAX_SUGGESTIONS);

    for issue in ats_issues {
        if suggestions.len() >= MAX_SUGGESTIONS {
            break;
        }
        suggestions.push(format!("{}{}", ATS_SUGGESTION_PREFIX, issue));
    }

    if suggestions.is_empty() {
        suggestions = fallback_suggestions();
    }

    suggestions
}

/// Analyze without an external suggestion service
pub async fn analyze<S: AsRef<str>>(
    resume_text: &str,
    job_description: &str,
    required_skills: &[S],
) -> AnalysisResult {
    AnalysisEngine::offline()
        .analyze(resume_text, job_description, required_skills)
        .await
}
