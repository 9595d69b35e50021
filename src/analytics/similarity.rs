use std::collections::HashSet;

use serde::Serialize;

use super::Process;
use crate::config::{SimilarityConfig, SimilarityWeights};

// Reason thresholds are applied to the raw (unweighted) signals
const SIMILAR_TITLE_THRESHOLD: f64 = 0.3;
const SIMILAR_DESCRIPTION_THRESHOLD: f64 = 0.4;
const OVERLAPPING_TAGS_THRESHOLD: f64 = 0.5;

fn word_set(text: &str) -> HashSet<String> {
    text.to_lowercase()
        .split_whitespace()
        .filter(|word| word.chars().count() > 2)
        .map(str::to_string)
        .collect()
}

fn jaccard<T: Eq + std::hash::Hash>(a: &HashSet<T>, b: &HashSet<T>) -> f64 {
    let union = a.union(b).count();
    if union == 0 {
        return 0.0;
    }
    a.intersection(b).count() as f64 / union as f64
}

/// Jaccard similarity over lowercase whitespace-separated words longer than
/// two characters
pub fn text_similarity(text1: &str, text2: &str) -> f64 {
    jaccard(&word_set(text1), &word_set(text2))
}

/// Jaccard similarity over lowercase tag sets
pub fn tag_similarity(tags1: &[String], tags2: &[String]) -> f64 {
    let set1: HashSet<String> = tags1.iter().map(|t| t.to_lowercase()).collect();
    let set2: HashSet<String> = tags2.iter().map(|t| t.to_lowercase()).collect();
    jaccard(&set1, &set2)
}

/// Weighted similarity of two processes with the default weights
pub fn calculate_process_similarity(process1: &Process, process2: &Process) -> f64 {
    weighted_similarity(process1, process2, &SimilarityWeights::default())
}

fn weighted_similarity(process1: &Process, process2: &Process, weights: &SimilarityWeights) -> f64 {
    if process1.id == process2.id {
        return 0.0;
    }

    let title = text_similarity(&process1.title, &process2.title) * weights.title;
    let description =
        text_similarity(&process1.description, &process2.description) * weights.description;
    let tags = tag_similarity(&process1.tags, &process2.tags) * weights.tags;
    let department = if process1.department == process2.department {
        weights.department
    } else {
        0.0
    };

    title + description + tags + department
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DuplicateReason {
    SimilarTitles,
    SimilarDescriptions,
    OverlappingTags,
    SameDepartment,
}

impl std::fmt::Display for DuplicateReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            DuplicateReason::SimilarTitles => "Similar titles",
            DuplicateReason::SimilarDescriptions => "Similar descriptions",
            DuplicateReason::OverlappingTags => "Overlapping tags",
            DuplicateReason::SameDepartment => "Same department",
        };
        f.write_str(s)
    }
}

/// A pair of processes that look like the same automation request
#[derive(Debug, Clone, Serialize)]
pub struct DuplicateMatch<'a> {
    pub process1: &'a Process,
    pub process2: &'a Process,
    pub similarity: f64,
    pub reasons: Vec<DuplicateReason>,
}

fn explain(process1: &Process, process2: &Process) -> Vec<DuplicateReason> {
    let checks = [
        (
            text_similarity(&process1.title, &process2.title) > SIMILAR_TITLE_THRESHOLD,
            DuplicateReason::SimilarTitles,
        ),
        (
            text_similarity(&process1.description, &process2.description)
                > SIMILAR_DESCRIPTION_THRESHOLD,
            DuplicateReason::SimilarDescriptions,
        ),
        (
            tag_similarity(&process1.tags, &process2.tags) > OVERLAPPING_TAGS_THRESHOLD,
            DuplicateReason::OverlappingTags,
        ),
        (
            process1.department == process2.department,
            DuplicateReason::SameDepartment,
        ),
    ];

    checks
        .into_iter()
        .filter_map(|(fired, reason)| fired.then_some(reason))
        .collect()
}

/// Pairwise duplicate scan with configurable weights and threshold
#[derive(Debug, Clone, Default)]
pub struct DuplicateDetector {
    pub weights: SimilarityWeights,
    pub threshold: f64,
}

impl DuplicateDetector {
    pub fn new(config: &SimilarityConfig) -> Self {
        Self {
            weights: config.weights.clone(),
            threshold: config.duplicate_threshold,
        }
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn similarity(&self, process1: &Process, process2: &Process) -> f64 {
        weighted_similarity(process1, process2, &self.weights)
    }

    /// Score every unordered pair once and keep those at or above the
    /// threshold, most similar first.
    pub fn find<'a>(&self, processes: &'a [Process]) -> Vec<DuplicateMatch<'a>> {
        let mut duplicates: Vec<DuplicateMatch<'a>> = processes
            .iter()
            .enumerate()
            .flat_map(move |(i, p1)| processes[i + 1..].iter().map(move |p2| (p1, p2)))
            .filter_map(|(p1, p2)| {
                let similarity = self.similarity(p1, p2);
                (similarity >= self.threshold).then(|| DuplicateMatch {
                    process1: p1,
                    process2: p2,
                    similarity,
                    reasons: explain(p1, p2),
                })
            })
            .collect();

        duplicates.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));
        log::debug!(
            "Found {} duplicate candidates among {} processes",
            duplicates.len(),
            processes.len()
        );
        duplicates
    }
}

/// Duplicates under the default weights at the given threshold
pub fn find_duplicates(processes: &[Process], threshold: f64) -> Vec<DuplicateMatch<'_>> {
    DuplicateDetector::new(&SimilarityConfig::default())
        .with_threshold(threshold)
        .find(processes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::test_support::{process, tagged};

    fn described(mut p: Process, description: &str) -> Process {
        p.description = description.to_string();
        p
    }

    #[test]
    fn test_text_similarity_ignores_short_words_and_case() {
        // "of" and "to" are dropped; {invoice, processing} vs {invoice, processing, automation}
        let sim = text_similarity("Invoice of Processing", "invoice processing to AUTOMATION");
        assert!((sim - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_text_similarity_empty_is_zero() {
        assert_eq!(text_similarity("", ""), 0.0);
        assert_eq!(text_similarity("a b c", "to of"), 0.0);
    }

    #[test]
    fn test_tag_similarity_case_insensitive() {
        let a = vec!["OCR".to_string(), "Finance".to_string()];
        let b = vec!["ocr".to_string(), "HR".to_string()];
        assert!((tag_similarity(&a, &b) - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_same_id_scores_zero() {
        let p = process("P1", "Invoice Processing", "Finance");
        assert_eq!(calculate_process_similarity(&p, &p), 0.0);
    }

    #[test]
    fn test_identical_content_scores_one() {
        let a = tagged(
            described(process("P1", "Invoice Processing", "Finance"), "match invoices"),
            &["OCR"],
        );
        let mut b = a.clone();
        b.id = "P2".to_string();
        assert!((calculate_process_similarity(&a, &b) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_department_bonus_only() {
        let a = process("P1", "alpha", "Finance");
        let b = process("P2", "beta", "Finance");
        assert!((calculate_process_similarity(&a, &b) - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_find_duplicates_sorted_with_reasons() {
        let processes = vec![
            tagged(
                described(
                    process("P1", "Invoice Processing Automation", "Finance"),
                    "automate invoice approval workflow",
                ),
                &["Finance", "OCR"],
            ),
            tagged(
                described(
                    process("P2", "Invoice Processing Bot", "Finance"),
                    "automate invoice approval workflow",
                ),
                &["Finance", "OCR"],
            ),
            tagged(
                described(
                    process("P3", "Invoice Processing Automation", "Finance"),
                    "automate invoice approval workflow",
                ),
                &["Finance", "OCR"],
            ),
            process("P4", "Contract Renewal", "Legal"),
        ];

        let matches = find_duplicates(&processes, 0.6);
        assert_eq!(matches.len(), 3);
        assert_eq!(
            (matches[0].process1.id.as_str(), matches[0].process2.id.as_str()),
            ("P1", "P3")
        );
        assert!((matches[0].similarity - 1.0).abs() < 1e-12);
        assert!(matches
            .windows(2)
            .all(|w| w[0].similarity >= w[1].similarity));
        assert_eq!(
            matches[0].reasons,
            vec![
                DuplicateReason::SimilarTitles,
                DuplicateReason::SimilarDescriptions,
                DuplicateReason::OverlappingTags,
                DuplicateReason::SameDepartment,
            ]
        );
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let a = process("P1", "alpha", "Finance");
        let b = process("P2", "beta", "Finance");
        let processes = [a, b];
        let matches = find_duplicates(&processes, 0.1);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].reasons, vec![DuplicateReason::SameDepartment]);
    }

    #[test]
    fn test_custom_weights_drive_score() {
        let detector = DuplicateDetector {
            weights: SimilarityWeights {
                title: 0.0,
                description: 0.0,
                tags: 0.0,
                department: 1.0,
            },
            threshold: 0.9,
        };
        let processes = vec![
            process("P1", "alpha", "Finance"),
            process("P2", "beta", "Finance"),
            process("P3", "gamma", "HR"),
        ];
        let matches = detector.find(&processes);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].process2.id, "P2");
    }

    #[test]
    fn test_reason_display() {
        assert_eq!(DuplicateReason::SimilarTitles.to_string(), "Similar titles");
        assert_eq!(DuplicateReason::SameDepartment.to_string(), "Same department");
    }
}
