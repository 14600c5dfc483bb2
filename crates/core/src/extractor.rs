//! Medication extraction from free-form prescription text.
//!
//! Extraction runs two independent passes and unions their output:
//!
//! 1. The ordered [`ExtractionRule`] list. Each rule captures a name token next
//!    to common prescription phrasing (a dosage form before it, a dose or a
//!    frequency after it).
//! 2. A whole-word, case-insensitive scan for every drug name known to the
//!    interaction index.
//!
//! Rules are data: adding phrasing means adding an entry to [`EXTRACTION_RULES`].

use crate::constants::MIN_CANDIDATE_CHARS;
use crate::medications::MedicationSet;
use crate::table::InteractionIndex;
use carechain_types::{title_case, MedicationName};
use regex::{Regex, RegexBuilder};
use std::sync::LazyLock;

/// A named pattern whose first capture group is a candidate medication name.
#[derive(Debug)]
pub struct ExtractionRule {
    pub name: &'static str,
    pattern: Regex,
}

impl ExtractionRule {
    /// Candidate names captured by this rule, noise already removed.
    pub fn candidates<'t>(&'t self, text: &'t str) -> impl Iterator<Item = MedicationName> + 't {
        self.pattern
            .captures_iter(text)
            .filter_map(|caps| caps.get(1))
            .filter_map(|token| MedicationName::new(token.as_str()).ok())
            .filter(|name| !is_noise(name))
    }
}

/// Prescription-phrasing rules, evaluated in this order.
pub static EXTRACTION_RULES: LazyLock<Vec<ExtractionRule>> = LazyLock::new(|| {
    vec![
        // "Tab Metformin", "Syrup Amoxicillin"
        ExtractionRule {
            name: "dosage_form",
            pattern: Regex::new(
                r"(?i)(?:Tab|Tablet|Cap|Capsule|Inj|Injection|Syp|Syrup|Sol|Solution)\s+([A-Za-z0-9\-]+)",
            )
            .unwrap(),
        },
        // "Aspirin 81mg", "Levothyroxine 50 mcg"
        ExtractionRule {
            name: "dose_with_unit",
            pattern: Regex::new(r"(?i)([A-Za-z0-9\-]+)\s+(?:\d+\.?\d*)\s*(?:mg|mcg|g|ml)").unwrap(),
        },
        // "Omeprazole daily", "Amoxicillin three times"
        ExtractionRule {
            name: "frequency",
            pattern: Regex::new(
                r"(?i)([A-Za-z0-9\-]+)\s+(?:once|twice|three times|daily|bd|tid|qid)",
            )
            .unwrap(),
        },
    ]
});

/// Words of prescription phrasing that the rules can capture but are never drug names.
const PRESCRIPTION_VOCABULARY: &[&str] = &[
    "tab", "tabs", "tablet", "tablets", "cap", "caps", "capsule", "capsules", "inj",
    "injection", "syp", "syrup", "sol", "solution", "once", "twice", "three", "times", "daily",
    "bd", "tid", "qid", "mg", "mcg", "ml",
];

fn is_noise(name: &MedicationName) -> bool {
    name.as_str().chars().count() <= MIN_CANDIDATE_CHARS
        || name.as_str().starts_with(|c: char| c.is_ascii_digit())
        || PRESCRIPTION_VOCABULARY.contains(&name.key())
}

/// Whole-word matchers for every drug name in an index, compiled once per index.
#[derive(Debug, Default)]
pub(crate) struct DrugDictionary {
    entries: Vec<DictionaryEntry>,
}

#[derive(Debug)]
struct DictionaryEntry {
    display: String,
    matcher: Regex,
}

impl DrugDictionary {
    pub(crate) fn build<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        let mut entries = Vec::new();

        for name in names {
            let pattern = format!(r"\b{}\b", regex::escape(name));
            match RegexBuilder::new(&pattern).case_insensitive(true).build() {
                Ok(matcher) => entries.push(DictionaryEntry {
                    display: title_case(name),
                    matcher,
                }),
                Err(e) => tracing::warn!("drug name {name:?} left out of text matching: {e}"),
            }
        }

        Self { entries }
    }

    /// Title-cased names occurring as whole words in `text`, in dictionary order.
    pub(crate) fn matches<'s>(&'s self, text: &'s str) -> impl Iterator<Item = &'s str> + 's {
        self.entries
            .iter()
            .filter(move |entry| entry.matcher.is_match(text))
            .map(|entry| entry.display.as_str())
    }
}

/// Extracts medication names from text against one index snapshot.
#[derive(Debug, Clone, Copy)]
pub struct MedicationExtractor<'a> {
    index: &'a InteractionIndex,
}

impl<'a> MedicationExtractor<'a> {
    pub fn new(index: &'a InteractionIndex) -> Self {
        Self { index }
    }

    /// Medication names found in `text`: rule candidates first, then dictionary hits.
    ///
    /// Empty or non-medical text yields an empty set.
    pub fn extract(&self, text: &str) -> MedicationSet {
        let mut medications = MedicationSet::new();
        if text.trim().is_empty() {
            return medications;
        }

        for rule in EXTRACTION_RULES.iter() {
            for candidate in rule.candidates(text) {
                medications.insert(candidate);
            }
        }

        for name in self.index.dictionary().matches(text) {
            medications.insert_text(name);
        }

        medications
    }
}
