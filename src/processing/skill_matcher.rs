//! Whole-word matching of required skill phrases against resume text

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Required skills split into those found in the resume and those absent.
/// Both lists keep the order of the required skill list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillMatchResult {
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
}

impl SkillMatchResult {
    pub fn required_count(&self) -> usize {
        self.matched_skills.len() + self.missing_skills.len()
    }
}

/// Build the pattern for one skill phrase. The phrase is escaped literally and
/// must be bordered by a non-word character or the edge of the text on both
/// sides, so "Java" does not match inside "JavaScript" while "C++" still
/// matches before a space.
fn skill_pattern(skill: &str) -> Option<Regex> {
    let phrase = skill.trim().to_lowercase();
    if phrase.is_empty() {
        return None;
    }

    let pattern = format!(r"(?:^|\W){}(?:\W|$)", regex::escape(&phrase));
    match Regex::new(&pattern) {
        Ok(regex) => Some(regex),
        Err(e) => {
            log::debug!("Skipping skill '{}': {}", skill, e);
            None
        }
    }
}

/// Whether a single skill phrase occurs as whole word(s) in the text
pub fn contains_skill(text: &str, skill: &str) -> bool {
    let lowered = text.to_lowercase();
    skill_pattern(skill).is_some_and(|regex| regex.is_match(&lowered))
}

/// Split `required_skills` into matched and missing skills.
///
/// Matching is case-insensitive; blank skill phrases are never matched.
/// Duplicates are kept as given.
pub fn match_skills<S: AsRef<str>>(text: &str, required_skills: &[S]) -> SkillMatchResult {
    let lowered = text.to_lowercase();
    let mut result = SkillMatchResult::default();

    for skill in required_skills {
        let skill = skill.as_ref();
        let found = skill_pattern(skill).is_some_and(|regex| regex.is_match(&lowered));

        if found {
            result.matched_skills.push(skill.to_string());
        } else {
            result.missing_skills.push(skill.to_string());
        }
    }

    result
}
