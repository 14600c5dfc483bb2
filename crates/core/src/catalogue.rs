//! Medication catalogue used for name completion.
//!
//! Search ranks a small fixed catalogue, pads thin result lists with generated
//! extended-release and generic variants of the query, then appends matches
//! from an extended list. Generated entries are always marked as such.

use serde::Serialize;

/// Maximum number of entries returned by [`search`].
pub const MAX_SEARCH_RESULTS: usize = 10;

const MIN_QUERY_CHARS: usize = 2;
const MIN_GENERATED_QUERY_CHARS: usize = 3;
const MIN_RANKED_RESULTS: usize = 3;
const GENERATED_ID_BASE: u32 = 1000;
const EXTENDED_ID_BASE: u32 = 2000;
const GENERATED_CATEGORY: &str = "Generated Result";
const RELEASE_SUFFIXES: [&str; 4] = ["XR", "SR", "CR", "ER"];
const RELEASE_DOSAGES: &[&str] = &["5mg", "10mg", "20mg", "50mg", "100mg"];
const GENERIC_DOSAGES: &[&str] = &["10mg", "25mg", "50mg", "100mg"];
/// Salt and acid forms are never padded with a generic entry.
const NON_GENERIC_MARKERS: [&str; 3] = ["acid", "sodium", "hydrochloride"];

/// A catalogue search hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MedicationEntry {
    pub id: u32,
    pub name: String,
    pub common_dosages: Vec<String>,
    pub category: String,
    pub generated: bool,
}

struct CatalogueDrug {
    name: &'static str,
    common_dosages: &'static [&'static str],
    category: &'static str,
}

impl CatalogueDrug {
    fn entry(&self, id: u32) -> MedicationEntry {
        MedicationEntry {
            id,
            name: self.name.to_string(),
            common_dosages: self.common_dosages.iter().map(|d| d.to_string()).collect(),
            category: self.category.to_string(),
            generated: false,
        }
    }
}

/// Common medications; ids are position + 1.
const CATALOGUE: &[CatalogueDrug] = &[
    CatalogueDrug {
        name: "Lisinopril",
        common_dosages: &["5mg", "10mg", "20mg", "40mg"],
        category: "ACE Inhibitor",
    },
    CatalogueDrug {
        name: "Metformin",
        common_dosages: &["500mg", "850mg", "1000mg"],
        category: "Antidiabetic",
    },
    CatalogueDrug {
        name: "Atorvastatin",
        common_dosages: &["10mg", "20mg", "40mg", "80mg"],
        category: "Statin",
    },
    CatalogueDrug {
        name: "Aspirin",
        common_dosages: &["81mg", "325mg"],
        category: "NSAID",
    },
    CatalogueDrug {
        name: "Ibuprofen",
        common_dosages: &["200mg", "400mg", "600mg", "800mg"],
        category: "NSAID",
    },
    CatalogueDrug {
        name: "Amoxicillin",
        common_dosages: &["250mg", "500mg", "875mg"],
        category: "Antibiotic",
    },
    CatalogueDrug {
        name: "Levothyroxine",
        common_dosages: &[
            "25mcg", "50mcg", "75mcg", "88mcg", "100mcg", "112mcg", "125mcg", "137mcg", "150mcg",
        ],
        category: "Thyroid",
    },
    CatalogueDrug {
        name: "Simvastatin",
        common_dosages: &["5mg", "10mg", "20mg", "40mg"],
        category: "Statin",
    },
    CatalogueDrug {
        name: "Omeprazole",
        common_dosages: &["10mg", "20mg", "40mg"],
        category: "PPI",
    },
    CatalogueDrug {
        name: "Amlodipine",
        common_dosages: &["2.5mg", "5mg", "10mg"],
        category: "Calcium Channel Blocker",
    },
];

const EXTENDED: &[CatalogueDrug] = &[
    CatalogueDrug {
        name: "Paracetamol",
        common_dosages: &["500mg", "650mg"],
        category: "Analgesic",
    },
    CatalogueDrug {
        name: "Cetirizine",
        common_dosages: &["5mg", "10mg"],
        category: "Antihistamine",
    },
    CatalogueDrug {
        name: "Losartan",
        common_dosages: &["25mg", "50mg", "100mg"],
        category: "ARB",
    },
    CatalogueDrug {
        name: "Clopidogrel",
        common_dosages: &["75mg"],
        category: "Antiplatelet",
    },
    CatalogueDrug {
        name: "Fluoxetine",
        common_dosages: &["10mg", "20mg", "40mg"],
        category: "SSRI",
    },
    CatalogueDrug {
        name: "Diazepam",
        common_dosages: &["2mg", "5mg", "10mg"],
        category: "Benzodiazepine",
    },
    CatalogueDrug {
        name: "Gabapentin",
        common_dosages: &["100mg", "300mg", "400mg", "600mg"],
        category: "Anticonvulsant",
    },
    CatalogueDrug {
        name: "Metoprolol",
        common_dosages: &["25mg", "50mg", "100mg"],
        category: "Beta Blocker",
    },
];

/// Catalogue entries matching `query`, best matches first, at most [`MAX_SEARCH_RESULTS`].
///
/// Queries shorter than two characters return nothing.
pub fn search(query: &str) -> Vec<MedicationEntry> {
    let query = query.trim().to_lowercase();
    if query.chars().count() < MIN_QUERY_CHARS {
        return Vec::new();
    }

    let mut exact = Vec::new();
    let mut starts_with = Vec::new();
    let mut contains = Vec::new();

    for (position, drug) in CATALOGUE.iter().enumerate() {
        let name = drug.name.to_lowercase();
        let entry = drug.entry(position as u32 + 1);
        if name == query {
            exact.push(entry);
        } else if name.starts_with(&query) {
            starts_with.push(entry);
        } else if name.contains(&query) {
            contains.push(entry);
        }
    }

    let mut results: Vec<MedicationEntry> =
        exact.into_iter().chain(starts_with).chain(contains).collect();

    if results.len() < MIN_RANKED_RESULTS && query.chars().count() >= MIN_GENERATED_QUERY_CHARS {
        let base = capitalize(&query);
        for suffix in RELEASE_SUFFIXES {
            let id = GENERATED_ID_BASE + results.len() as u32;
            results.push(generated(id, format!("{base} {suffix}"), RELEASE_DOSAGES));
        }
        if !NON_GENERIC_MARKERS.iter().any(|m| query.contains(m)) {
            let id = GENERATED_ID_BASE + results.len() as u32;
            results.push(generated(id, base, GENERIC_DOSAGES));
        }
    }

    for drug in EXTENDED {
        if drug.name.to_lowercase().contains(&query) && !results.iter().any(|r| r.name == drug.name)
        {
            let id = EXTENDED_ID_BASE + results.len() as u32;
            results.push(drug.entry(id));
        }
    }

    results.truncate(MAX_SEARCH_RESULTS);
    results
}

fn generated(id: u32, name: String, dosages: &[&str]) -> MedicationEntry {
    MedicationEntry {
        id,
        name,
        common_dosages: dosages.iter().map(|d| d.to_string()).collect(),
        category: GENERATED_CATEGORY.to_string(),
        generated: true,
    }
}

/// First character upper-cased, the rest lower-cased.
fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(entries: &[MedicationEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn test_short_queries_return_nothing() {
        assert!(search("").is_empty());
        assert!(search("a").is_empty());
        assert!(search(" m ").is_empty());
    }

    #[test]
    fn test_ranking_exact_then_prefix_then_contains() {
        let results = search("statin");
        assert_eq!(&names(&results)[..2], &["Atorvastatin", "Simvastatin"]);

        let results = search("Aspirin");
        assert_eq!(results[0].name, "Aspirin");
        assert_eq!(results[0].id, 4);
        assert_eq!(results[0].category, "NSAID");
        assert!(!results[0].generated);
    }

    #[test]
    fn test_prefix_matches_rank_before_substring_matches() {
        // Too short for generated variants; the extended list still contributes.
        let results = search("am");
        assert_eq!(
            names(&results),
            vec!["Amoxicillin", "Amlodipine", "Paracetamol", "Diazepam"]
        );
        assert_eq!(results[2].id, 2002);
        assert_eq!(results[3].id, 2003);
    }

    #[test]
    fn test_thin_results_are_padded_with_generated_variants() {
        let results = search("metformin");
        assert_eq!(
            names(&results),
            vec![
                "Metformin",
                "Metformin XR",
                "Metformin SR",
                "Metformin CR",
                "Metformin ER",
                "Metformin",
            ]
        );
        assert_eq!(results[0].id, 2);
        assert_eq!(results[1].id, 1001);
        assert_eq!(results[5].id, 1005);
        assert!(results[1..].iter().all(|e| e.generated && e.category == "Generated Result"));
    }

    #[test]
    fn test_salt_forms_get_no_generic_entry() {
        let results = search("valproic acid");
        assert_eq!(results.len(), 4);
        assert_eq!(results[0].name, "Valproic acid XR");
        assert_eq!(results[0].id, 1000);
    }

    #[test]
    fn test_extended_list_is_appended() {
        let results = search("para");
        assert_eq!(
            names(&results),
            vec!["Para XR", "Para SR", "Para CR", "Para ER", "Para", "Paracetamol"]
        );
        assert_eq!(results[5].id, 2005);
        assert_eq!(results[5].category, "Analgesic");
        assert!(!results[5].generated);
    }

    #[test]
    fn test_results_are_capped() {
        assert!(search("in").len() <= MAX_SEARCH_RESULTS);
        assert_eq!(search("in").len(), MAX_SEARCH_RESULTS);
    }
}
