//! Constants used throughout the CareChain core crate.
//!
//! Dataset locations, the built-in sample table, and the fixed wording used by
//! demonstration results and summaries live here so the engine and its tests
//! agree on them.

/// Default location of the interaction dataset, relative to the working directory.
pub const DEFAULT_DRUG_INTERACTIONS_FILE: &str = "public/drug_interactions.csv";

/// Dataset column holding the first drug of a pair.
pub const DRUG_A_COLUMN: &str = "Drug 1";

/// Dataset column holding the second drug of a pair.
pub const DRUG_B_COLUMN: &str = "Drug 2";

/// Dataset column holding the clinical description.
pub const DESCRIPTION_COLUMN: &str = "Interaction Description";

/// Interaction records used whenever the dataset cannot be loaded.
pub const SAMPLE_INTERACTIONS: [(&str, &str, &str); 3] = [
    (
        "Metformin",
        "Lisinopril",
        "Minimal risk of interaction. Monitor blood pressure.",
    ),
    (
        "Aspirin",
        "Warfarin",
        "Increased risk of bleeding when used together.",
    ),
    (
        "Warfarin",
        "Digoxin",
        "May increase risk of bleeding and alter Digoxin levels.",
    ),
];

/// Extracted candidates must be longer than this many characters.
pub const MIN_CANDIDATE_CHARS: usize = 2;

/// Description attached to a synthesized demonstration result.
pub const DEMO_DESCRIPTION: &str = "Potential interaction detected by the system.";

/// Recommendation attached to a synthesized demonstration result.
pub const DEMO_RECOMMENDATION: &str = "Monitor for side effects and consult healthcare provider.";

/// Summary returned when no medications were detected.
pub const NO_MEDICATIONS_MESSAGE: &str = "No medications detected in the provided text.";
