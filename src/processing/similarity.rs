//! TF-IDF cosine similarity between a resume and a job description

use crate::processing::text_processor::TextProcessor;
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Neutral score returned when either document has no usable vocabulary.
/// This is a fallback policy value, not a measurement.
pub const DEFAULT_SIMILARITY_PERCENTAGE: u8 = 50;

/// Term weights for one document; ordered so float sums are reproducible
type TermVector<'a> = BTreeMap<&'a str, f64>;

pub struct SimilarityScorer {
    processor: TextProcessor,
}

impl Default for SimilarityScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl SimilarityScorer {
    pub fn new() -> Self {
        Self {
            processor: TextProcessor::new(),
        }
    }

    /// Similarity as an integer percentage, truncated toward zero.
    ///
    /// Returns [`DEFAULT_SIMILARITY_PERCENTAGE`] when a document is empty
    /// after normalization.
    pub fn similarity(&self, resume_text: &str, job_description: &str) -> u8 {
        match self.cosine(resume_text, job_description) {
            Some(score) => (score.clamp(0.0, 1.0) * 100.0).trunc() as u8,
            None => DEFAULT_SIMILARITY_PERCENTAGE,
        }
    }

    /// Cosine similarity of the two TF-IDF vectors, `None` for degenerate input
    pub fn cosine(&self, resume_text: &str, job_description: &str) -> Option<f64> {
        let resume = self.processor.normalize(resume_text);
        let job = self.processor.normalize(job_description);

        let resume_counts = term_counts(self.processor.tokenize(&resume));
        let job_counts = term_counts(self.processor.tokenize(&job));

        if resume_counts.is_empty() || job_counts.is_empty() {
            return None;
        }

        let resume_vector = weigh(&resume_counts, &job_counts);
        let job_vector = weigh(&job_counts, &resume_counts);

        let dot: f64 = resume_vector
            .iter()
            .filter_map(|(term, weight)| job_vector.get(term).map(|other| weight * other))
            .sum();

        let norm = l2_norm(&resume_vector) * l2_norm(&job_vector);
        if norm == 0.0 {
            return None;
        }

        Some(dot / norm)
    }
}

fn term_counts(tokens: Vec<&str>) -> TermVector<'_> {
    let mut counts = TermVector::new();
    for token in tokens {
        *counts.entry(token).or_insert(0.0) += 1.0;
    }
    counts
}

/// Smoothed inverse document frequency over a corpus of `n_docs` documents
fn idf(n_docs: f64, doc_freq: f64) -> f64 {
    ((1.0 + n_docs) / (1.0 + doc_freq)).ln() + 1.0
}

/// Raw term counts scaled by idf over the two-document corpus
fn weigh<'a>(counts: &TermVector<'a>, other: &TermVector<'a>) -> TermVector<'a> {
    counts
        .iter()
        .map(|(term, count)| {
            let doc_freq = if other.contains_key(term) { 2.0 } else { 1.0 };
            (*term, count * idf(2.0, doc_freq))
        })
        .collect()
}

fn l2_norm(vector: &TermVector<'_>) -> f64 {
    vector.values().map(|w| w * w).sum::<f64>().sqrt()
}

fn shared() -> &'static SimilarityScorer {
    static SCORER: OnceLock<SimilarityScorer> = OnceLock::new();
    SCORER.get_or_init(SimilarityScorer::new)
}

/// Similarity with a shared scorer
pub fn similarity(resume_text: &str, job_description: &str) -> u8 {
    shared().similarity(resume_text, job_description)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_documents_fall_back_to_neutral_default() {
        // 50 is a fixed fallback, not a measured similarity
        assert_eq!(similarity("", ""), DEFAULT_SIMILARITY_PERCENTAGE);
        assert_eq!(similarity("", "Rust engineer"), DEFAULT_SIMILARITY_PERCENTAGE);
        assert_eq!(similarity("Rust engineer", "   "), DEFAULT_SIMILARITY_PERCENTAGE);
    }

    #[test]
    fn test_single_character_vocabulary_falls_back() {
        // Every token is shorter than two characters
        assert_eq!(similarity("a b c", "x y z"), DEFAULT_SIMILARITY_PERCENTAGE);
    }

    #[test]
    fn test_identical_documents() {
        let text = "Rust engineer building distributed storage systems";
        let score = similarity(text, text);
        assert!(score >= 99, "expected near 100, got {}", score);
    }

    #[test]
    fn test_disjoint_documents() {
        assert_eq!(similarity("pastry chef bakery", "kernel driver firmware"), 0);
    }

    #[test]
    fn test_shared_scorer_is_reused() {
        assert!(std::ptr::eq(shared(), shared()));

        let resume = "Rust engineer with Kafka and Postgres";
        let job = "Backend engineer: Rust, Postgres";
        assert_eq!(similarity(resume, job), SimilarityScorer::new().similarity(resume, job));
    }

    #[test]
    fn test_known_value() {
        // Shared term "rust" has idf 1, unshared terms ln(1.5) + 1.
        // Each document: one shared, one unshared term.
        let scorer = SimilarityScorer::new();
        let cosine = scorer.cosine("rust python", "rust golang").unwrap();

        let unshared = 1.5f64.ln() + 1.0;
        let expected = 1.0 / (1.0 + unshared * unshared);
        assert!((cosine - expected).abs() < 1e-12);
        assert_eq!(scorer.similarity("rust python", "rust golang"), (expected * 100.0) as u8);
    }

    #[test]
    fn test_symmetric_and_bounded() {
        let resume = "Backend developer: Python, SQL, Docker. Led a team of five.";
        let job = "We need a Python backend developer with Kubernetes experience.";

        let forward = similarity(resume, job);
        let backward = similarity(job, resume);
        assert_eq!(forward, backward);
        assert!(forward <= 100);
        assert!(forward > 0);
    }

    #[test]
    fn test_case_and_punctuation_insensitive() {
        assert_eq!(
            similarity("RUST, Python!", "rust python"),
            similarity("rust python", "rust python")
        );
    }
}
