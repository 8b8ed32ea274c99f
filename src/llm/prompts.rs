//! Prompt for resume improvement suggestions

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Single prompt template
#[derive(Debug, Clone)]
pub struct PromptTemplates {
    pub suggestions: String,
}

impl Default for PromptTemplates {
    fn default() -> Self {
        Self {
            suggestions: SUGGESTIONS_TEMPLATE.to_string(),
        }
    }
}

/// Parameters for prompt template substitution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptParams {
    pub resume_content: String,
    pub job_content: String,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
}

impl PromptTemplates {
    pub fn render_suggestions(&self, params: &PromptParams) -> String {
        log::debug!(
            "Rendering suggestion prompt: resume {} chars, job {} chars",
            params.resume_content.len(),
            params.job_content.len()
        );

        // One pass, so substituted text is never scanned for placeholders
        placeholder_regex()
            .replace_all(&self.suggestions, |caps: &Captures| match &caps[1] {
                "resume" => params.resume_content.clone(),
                "job" => params.job_content.clone(),
                "matched" => params.matched_skills.join(", "),
                "missing" => params.missing_skills.join(", "),
                _ => caps[0].to_string(),
            })
            .into_owned()
    }
}

fn placeholder_regex() -> &'static Regex {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER.get_or_init(|| {
        Regex::new(r"\{(resume|job|matched|missing)\}").expect("Invalid placeholder regex")
    })
}

const SUGGESTIONS_TEMPLATE: &str = r#"As a resume optimization expert, analyze this resume against the job description and provide 5 specific improvement suggestions. Focus on how to better emphasize existing skills and incorporate missing skills if applicable.

Resume:
{resume}

Job Description:
{job}

Matched Skills: {matched}
Missing Skills: {missing}

Provide ONLY 5 short, specific, actionable suggestions as a numbered list (1. to 5.), each 1-2 sentences."#;

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> PromptParams {
        PromptParams {
            resume_content: "Software Engineer with Python experience at Tech Corp.".to_string(),
            job_content: "Senior Software Engineer role requiring React and Python.".to_string(),
            matched_skills: vec!["Python".to_string()],
            missing_skills: vec!["React".to_string(), "GraphQL".to_string()],
        }
    }

    #[test]
    fn test_suggestions_rendering() {
        let prompt = PromptTemplates::default().render_suggestions(&params());

        assert!(prompt.contains("Software Engineer with Python experience at Tech Corp"));
        assert!(prompt.contains("Senior Software Engineer role requiring React and Python"));
        assert!(prompt.contains("Matched Skills: Python\n"));
        assert!(prompt.contains("Missing Skills: React, GraphQL\n"));
        assert!(prompt.contains("5 short, specific, actionable suggestions"));
        assert!(!prompt.contains("{resume}"));
        assert!(!prompt.contains("{job}"));
    }

    #[test]
    fn test_placeholders_inside_inputs_are_left_alone() {
        let mut params = params();
        params.resume_content = "My template uses {missing} and {job} literally".to_string();
        params.job_content = "Job mentions {resume} and {matched} placeholders".to_string();
        params.missing_skills.clear();

        let prompt = PromptTemplates::default().render_suggestions(&params);

        assert!(prompt.contains("My template uses {missing} and {job} literally"));
        assert!(prompt.contains("Job mentions {resume} and {matched} placeholders"));
        assert_eq!(prompt.matches("My template uses").count(), 1);
        assert!(prompt.contains("Missing Skills: \n"));
        assert!(prompt.contains("Matched Skills: Python\n"));
    }

    #[test]
    fn test_custom_template_unknown_braces_kept() {
        let templates = PromptTemplates {
            suggestions: "{resume} / {other} / {matched}".to_string(),
        };

        assert_eq!(
            templates.render_suggestions(&params()),
            "Software Engineer with Python experience at Tech Corp. / {other} / Python"
        );
    }
}
