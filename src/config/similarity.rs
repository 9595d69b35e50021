//! Weights for process similarity scoring
//!
//! The composite score is a weighted sum of four signals: title word overlap,
//! description word overlap, tag overlap and a same-department bonus. Weights
//! must each lie in [0.0, 1.0] and sum to 1.0 so the composite stays in the
//! same range.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityWeights {
    #[serde(default = "default_title_weight")]
    pub title: f64,

    #[serde(default = "default_description_weight")]
    pub description: f64,

    #[serde(default = "default_tag_weight")]
    pub tags: f64,

    /// Flat bonus applied when both processes belong to the same department
    #[serde(default = "default_department_weight")]
    pub department: f64,
}

impl Default for SimilarityWeights {
    fn default() -> Self {
        Self {
            title: default_title_weight(),
            description: default_description_weight(),
            tags: default_tag_weight(),
            department: default_department_weight(),
        }
    }
}

impl SimilarityWeights {
    // Pure function: Check if a weight is in valid range
    pub fn is_valid_weight(weight: f64) -> bool {
        (0.0..=1.0).contains(&weight)
    }

    // Pure function: Validate a single weight with name
    pub fn validate_weight(weight: f64, name: &str) -> Result<(), String> {
        if Self::is_valid_weight(weight) {
            Ok(())
        } else {
            Err(format!("{} weight must be between 0.0 and 1.0", name))
        }
    }

    pub fn sum(&self) -> f64 {
        self.title + self.description + self.tags + self.department
    }

    /// Validate individual weights and that they sum to 1.0
    pub fn validate(&self) -> Result<(), String> {
        Self::validate_weight(self.title, "Title")?;
        Self::validate_weight(self.description, "Description")?;
        Self::validate_weight(self.tags, "Tags")?;
        Self::validate_weight(self.department, "Department")?;

        let sum = self.sum();
        if (sum - 1.0).abs() > 0.001 {
            return Err(format!(
                "Similarity weights must sum to 1.0, but sum to {:.3}",
                sum
            ));
        }
        Ok(())
    }

    /// Normalize weights to ensure they sum to 1.0. All-zero weights have no
    /// proportions to keep and fall back to the defaults.
    pub fn normalize(&mut self) {
        let sum = self.sum();
        if sum <= 0.0 {
            *self = Self::default();
        } else if (sum - 1.0).abs() > 1e-9 {
            self.title /= sum;
            self.description /= sum;
            self.tags /= sum;
            self.department /= sum;
        }
    }
}

pub fn default_title_weight() -> f64 {
    0.4
}
pub fn default_description_weight() -> f64 {
    0.3
}
pub fn default_tag_weight() -> f64 {
    0.2
}
pub fn default_department_weight() -> f64 {
    0.1
}
pub fn default_duplicate_threshold() -> f64 {
    0.6
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityConfig {
    #[serde(default)]
    pub weights: SimilarityWeights,

    /// Minimum composite score for a pair to be reported as a duplicate
    #[serde(default = "default_duplicate_threshold")]
    pub duplicate_threshold: f64,
}

impl Default for SimilarityConfig {
    fn default() -> Self {
        Self {
            weights: SimilarityWeights::default(),
            duplicate_threshold: default_duplicate_threshold(),
        }
    }
}
