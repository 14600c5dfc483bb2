//! Pairwise interaction resolution.
//!
//! Every unordered pair of the input medications, taken in input order, is
//! looked up in the interaction index. Only positive findings are returned.

use crate::constants::{DEMO_DESCRIPTION, DEMO_RECOMMENDATION};
use crate::explanation::ExplanationComposer;
use crate::table::InteractionIndex;
use carechain_types::MedicationName;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse risk level derived from an interaction description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    /// Classifies a description by keyword, highest level first.
    ///
    /// "high" or "severe" gives `High`, otherwise "moderate" or "significant"
    /// gives `Medium`, otherwise `Low`. Matching is case-insensitive and on
    /// substrings.
    pub fn classify(description: &str) -> Self {
        let text = description.to_lowercase();
        if text.contains("high") || text.contains("severe") {
            Severity::High
        } else if text.contains("moderate") || text.contains("significant") {
            Severity::Medium
        } else {
            Severity::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "Low",
            Severity::Medium => "Medium",
            Severity::High => "High",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Text after the first period of `description`, trimmed; empty if there is no period.
pub fn recommendation_from(description: &str) -> String {
    description
        .split_once('.')
        .map(|(_, rest)| rest.trim().to_string())
        .unwrap_or_default()
}

/// One interaction between two medications.
///
/// `synthesized` is `true` only for demonstration results that do not come
/// from the interaction dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InteractionResult {
    pub drugs: [String; 2],
    pub severity: Severity,
    pub description: String,
    pub recommendation: String,
    pub explanation: String,
    pub synthesized: bool,
}

impl InteractionResult {
    /// A finding backed by a dataset description.
    pub fn from_description(
        first: &MedicationName,
        second: &MedicationName,
        description: &str,
    ) -> Self {
        let mut result = Self {
            drugs: [first.as_str().to_string(), second.as_str().to_string()],
            severity: Severity::classify(description),
            description: description.to_string(),
            recommendation: recommendation_from(description),
            explanation: String::new(),
            synthesized: false,
        };
        result.explanation = ExplanationComposer::explain(&result);
        result
    }

    /// A flagged placeholder used when no real interaction was found.
    pub fn demonstration(first: &MedicationName, second: &MedicationName) -> Self {
        let mut result = Self {
            drugs: [first.as_str().to_string(), second.as_str().to_string()],
            severity: Severity::Low,
            description: DEMO_DESCRIPTION.to_string(),
            recommendation: DEMO_RECOMMENDATION.to_string(),
            explanation: String::new(),
            synthesized: true,
        };
        result.explanation = ExplanationComposer::explain(&result);
        result
    }
}

/// Resolves interactions against one index snapshot.
#[derive(Debug, Clone, Copy)]
pub struct InteractionResolver<'a> {
    index: &'a InteractionIndex,
}

impl<'a> InteractionResolver<'a> {
    pub fn new(index: &'a InteractionIndex) -> Self {
        Self { index }
    }

    /// All dataset-backed interactions among `medications`.
    ///
    /// Pairs are visited as `(i, j)` with `i < j` in input order, and each
    /// result lists the drugs in that order. Names equal after case folding
    /// are never paired.
    pub fn resolve(&self, medications: &[MedicationName]) -> Vec<InteractionResult> {
        let mut results = Vec::new();

        for (i, first) in medications.iter().enumerate() {
            for second in &medications[i + 1..] {
                if first.key() == second.key() {
                    continue;
                }

                if let Some(description) = self.find_description(first, second) {
                    results.push(InteractionResult::from_description(
                        first,
                        second,
                        description,
                    ));
                }
            }
        }

        tracing::debug!(
            "resolved {} interactions among {} medications",
            results.len(),
            medications.len()
        );
        results
    }

    /// Searches `first`'s partners, then `second`'s, returning the first match.
    fn find_description(
        &self,
        first: &MedicationName,
        second: &MedicationName,
    ) -> Option<&'a str> {
        let forward = self
            .index
            .lookup(first.key())
            .iter()
            .find(|partner| partner.drug == second.key());

        forward
            .or_else(|| {
                self.index
                    .lookup(second.key())
                    .iter()
                    .find(|partner| partner.drug == first.key())
            })
            .map(|partner| partner.description.as_str())
    }
}
