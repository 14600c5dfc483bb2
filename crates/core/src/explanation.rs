//! Human-readable explanations for interaction results.

use crate::constants::NO_MEDICATIONS_MESSAGE;
use crate::resolver::InteractionResult;
use carechain_types::MedicationName;

/// Marks a synthesized entry in a summary.
const DEMONSTRATION_MARKER: &str =
    "   (demonstration result, not from the interaction database)\n";

/// Composes per-result explanations and the aggregate summary.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExplanationComposer;

impl ExplanationComposer {
    /// One-paragraph explanation of a single result.
    pub fn explain(result: &InteractionResult) -> String {
        let [first, second] = &result.drugs;

        if result.synthesized {
            return format!(
                "The combination of {first} and {second} may have interactions. \
                 This is a demonstration result as no specific interaction was found in the database."
            );
        }

        let mut text = format!(
            "The combination of {first} and {second} presents a {} risk interaction. {}",
            result.severity.as_str().to_lowercase(),
            result.description
        );
        if !result.recommendation.is_empty() {
            text.push(' ');
            text.push_str(&result.recommendation);
        }
        text
    }

    /// Multi-line summary of `results` for the detected `medications`.
    pub fn summarize(results: &[InteractionResult], medications: &[MedicationName]) -> String {
        if medications.is_empty() {
            return NO_MEDICATIONS_MESSAGE.to_string();
        }

        let detected = medications
            .iter()
            .map(MedicationName::as_str)
            .collect::<Vec<_>>()
            .join(", ");

        if results.is_empty() {
            return format!(
                "No significant interactions found between the detected medications: {detected}."
            );
        }

        let mut summary = String::from("Analysis of medication interactions:\n\n");
        summary.push_str(&format!("Detected medications: {detected}\n\n"));
        summary.push_str(&format!("Potential interactions ({}):\n", results.len()));

        for (i, result) in results.iter().enumerate() {
            let [first, second] = &result.drugs;
            summary.push_str(&format!("{}. {first} + {second}\n", i + 1));
            summary.push_str(&format!("   Severity: {}\n", result.severity));
            summary.push_str(&format!("   {}\n", result.description));
            if !result.recommendation.is_empty() {
                summary.push_str(&format!("   Recommendation: {}\n", result.recommendation));
            }
            if result.synthesized {
                summary.push_str(DEMONSTRATION_MARKER);
            }
            summary.push('\n');
        }

        summary
    }
}
