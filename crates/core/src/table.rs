//! Drug-interaction dataset loading and lookup.
//!
//! The dataset is a CSV of pairwise interactions:
//!
//! ```text
//! Drug 1,Drug 2,Interaction Description
//! Aspirin,Warfarin,Increased risk of bleeding when used together.
//! ```
//!
//! Each row is indexed under both drug names, so the index behaves as an
//! undirected graph keyed by case-folded drug name. An index is immutable once
//! built. [`InteractionTable`] publishes the current index to request handlers
//! and swaps in a freshly built one on reload; handlers hold an
//! `Arc<InteractionIndex>` snapshot for the lifetime of a request and never see
//! a partially built index.

use crate::constants::{
    DESCRIPTION_COLUMN, DRUG_A_COLUMN, DRUG_B_COLUMN, SAMPLE_INTERACTIONS,
};
use crate::extractor::DrugDictionary;
use crate::{CoreError, CoreResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

/// One row of the interaction dataset, as authored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrugInteractionRecord {
    #[serde(rename = "Drug 1", alias = "drug_a", alias = "drug1")]
    pub drug_a: String,
    #[serde(rename = "Drug 2", alias = "drug_b", alias = "drug2")]
    pub drug_b: String,
    #[serde(
        rename = "Interaction Description",
        alias = "description",
        alias = "interaction"
    )]
    pub description: String,
}

impl DrugInteractionRecord {
    pub fn new(
        drug_a: impl Into<String>,
        drug_b: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            drug_a: drug_a.into(),
            drug_b: drug_b.into(),
            description: description.into(),
        }
    }
}

/// An index entry: the case-folded partner drug and the interaction description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InteractionPartner {
    pub drug: String,
    pub description: String,
}

/// Where an index was built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetSource {
    File(PathBuf),
    BuiltInSample,
}

impl fmt::Display for DatasetSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetSource::File(path) => write!(f, "{}", path.display()),
            DatasetSource::BuiltInSample => f.write_str("built-in sample"),
        }
    }
}

/// Symmetric adjacency lookup over the interaction dataset.
#[derive(Debug)]
pub struct InteractionIndex {
    partners: BTreeMap<String, Vec<InteractionPartner>>,
    dictionary: DrugDictionary,
    record_count: usize,
    source: DatasetSource,
    loaded_at: DateTime<Utc>,
}

impl InteractionIndex {
    /// Builds an index from records, inserting every record under both drug names.
    ///
    /// Names are trimmed and case-folded for the key; records with a blank
    /// drug name are skipped.
    pub fn from_records(
        records: impl IntoIterator<Item = DrugInteractionRecord>,
        source: DatasetSource,
    ) -> Self {
        let mut partners: BTreeMap<String, Vec<InteractionPartner>> = BTreeMap::new();
        let mut record_count = 0;

        for record in records {
            let drug_a = record.drug_a.trim().to_lowercase();
            let drug_b = record.drug_b.trim().to_lowercase();
            if drug_a.is_empty() || drug_b.is_empty() {
                tracing::warn!(
                    "skipping interaction row with a blank drug name: {:?}",
                    record
                );
                continue;
            }

            partners
                .entry(drug_a.clone())
                .or_default()
                .push(InteractionPartner {
                    drug: drug_b.clone(),
                    description: record.description.clone(),
                });
            partners.entry(drug_b).or_default().push(InteractionPartner {
                drug: drug_a,
                description: record.description,
            });
            record_count += 1;
        }

        let dictionary = DrugDictionary::build(partners.keys().map(String::as_str));

        Self {
            partners,
            dictionary,
            record_count,
            source,
            loaded_at: Utc::now(),
        }
    }

    /// Index over the built-in sample records.
    pub fn sample() -> Self {
        Self::from_records(
            SAMPLE_INTERACTIONS
                .iter()
                .map(|(a, b, description)| DrugInteractionRecord::new(*a, *b, *description)),
            DatasetSource::BuiltInSample,
        )
    }

    /// Loads the dataset at `path`, failing on any problem.
    ///
    /// # Errors
    ///
    /// Returns:
    /// - `CoreError::DatasetMissing` if `path` is not a file,
    /// - `CoreError::DatasetRead` if the file cannot be read or a row does not
    ///   match the expected columns,
    /// - `CoreError::DatasetEmpty` if no usable row remains.
    pub fn try_load(path: &Path) -> CoreResult<Self> {
        if !path.is_file() {
            return Err(CoreError::DatasetMissing(path.to_path_buf()));
        }

        let read_err = |source: csv::Error| CoreError::DatasetRead {
            path: path.to_path_buf(),
            source,
        };

        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(path)
            .map_err(read_err)?;

        let records: Vec<DrugInteractionRecord> = reader
            .deserialize()
            .collect::<Result<Vec<_>, _>>()
            .map_err(read_err)?;

        let index = Self::from_records(records, DatasetSource::File(path.to_path_buf()));
        if index.record_count == 0 {
            return Err(CoreError::DatasetEmpty(path.to_path_buf()));
        }

        Ok(index)
    }

    /// Loads the dataset at `path`, falling back to the built-in sample on any failure.
    pub fn load(path: &Path) -> Self {
        match Self::try_load(path) {
            Ok(index) => {
                tracing::info!(
                    "loaded {} drug interactions ({} drugs) from {}",
                    index.record_count,
                    index.drug_count(),
                    path.display()
                );
                index
            }
            Err(e) => {
                tracing::warn!(
                    "{e}; using built-in sample ({} interactions, expected columns: {DRUG_A_COLUMN}, {DRUG_B_COLUMN}, {DESCRIPTION_COLUMN})",
                    SAMPLE_INTERACTIONS.len()
                );
                Self::sample()
            }
        }
    }

    /// Partners of `drug`, in dataset order. Unknown drugs yield an empty slice.
    pub fn lookup(&self, drug: &str) -> &[InteractionPartner] {
        self.partners
            .get(&drug.trim().to_lowercase())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Case-folded drug names, sorted.
    pub fn drug_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.partners.keys().map(String::as_str)
    }

    pub fn record_count(&self) -> usize {
        self.record_count
    }

    pub fn drug_count(&self) -> usize {
        self.partners.len()
    }

    pub fn source(&self) -> &DatasetSource {
        &self.source
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    pub(crate) fn dictionary(&self) -> &DrugDictionary {
        &self.dictionary
    }

    /// Drops one direction of the adjacency, leaving a deliberately one-sided index.
    #[cfg(test)]
    pub(crate) fn remove_partners(&mut self, drug: &str) {
        self.partners.remove(drug);
    }
}

/// Shared handle publishing the current [`InteractionIndex`].
///
/// The lock is only held long enough to clone or replace the `Arc`.
#[derive(Debug)]
pub struct InteractionTable {
    current: RwLock<Arc<InteractionIndex>>,
}

impl InteractionTable {
    pub fn new(index: InteractionIndex) -> Self {
        Self {
            current: RwLock::new(Arc::new(index)),
        }
    }

    /// The index visible right now. Later reloads do not affect it.
    pub fn snapshot(&self) -> Arc<InteractionIndex> {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Publishes `index`, returning the new snapshot.
    pub fn replace(&self, index: InteractionIndex) -> Arc<InteractionIndex> {
        let next = Arc::new(index);
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Arc::clone(&next);
        next
    }

    /// Rebuilds the index from `path` and publishes it.
    ///
    /// The current index stays published if the new dataset cannot be loaded.
    ///
    /// # Errors
    ///
    /// Propagates the `InteractionIndex::try_load` error.
    pub fn reload(&self, path: &Path) -> CoreResult<Arc<InteractionIndex>> {
        let index = InteractionIndex::try_load(path)?;
        tracing::info!(
            "reloaded {} drug interactions from {}",
            index.record_count(),
            path.display()
        );
        Ok(self.replace(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_dataset(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, contents).expect("should write dataset");
        path
    }

    #[test]
    fn test_every_record_is_indexed_in_both_directions() {
        let index = InteractionIndex::sample();

        for (a, b, description) in SAMPLE_INTERACTIONS {
            assert!(index
                .lookup(a)
                .iter()
                .any(|p| p.drug == b.to_lowercase() && p.description == description));
            assert!(index
                .lookup(b)
                .iter()
                .any(|p| p.drug == a.to_lowercase() && p.description == description));
        }
    }

    #[test]
    fn test_bundled_dataset_loads_and_is_symmetric() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("../../public/drug_interactions.csv");

        let index = InteractionIndex::try_load(&path).expect("bundled dataset should load");
        assert_eq!(index.record_count(), 24);
        assert_eq!(index.source(), &DatasetSource::File(path.clone()));

        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(&path)
            .expect("should open bundled dataset");
        for row in reader.deserialize::<DrugInteractionRecord>() {
            let record = row.expect("row should match the dataset columns");
            let a = record.drug_a.to_lowercase();
            let b = record.drug_b.to_lowercase();

            assert!(index
                .lookup(&a)
                .iter()
                .any(|p| p.drug == b && p.description == record.description));
            assert!(index
                .lookup(&b)
                .iter()
                .any(|p| p.drug == a && p.description == record.description));
        }
    }

    #[test]
    fn test_lookup_folds_case_and_returns_empty_for_unknown() {
        let index = InteractionIndex::sample();
        assert_eq!(index.lookup("WARFARIN").len(), 2);
        assert!(index.lookup("paracetamol").is_empty());
        assert!(index.lookup("").is_empty());
    }

    #[test]
    fn test_drug_names_are_folded_and_sorted() {
        let index = InteractionIndex::sample();
        let names: Vec<&str> = index.drug_names().collect();
        assert_eq!(
            names,
            vec!["aspirin", "digoxin", "lisinopril", "metformin", "warfarin"]
        );
    }

    #[test]
    fn test_partner_order_follows_dataset_order() {
        let index = InteractionIndex::sample();
        let partners: Vec<&str> = index
            .lookup("warfarin")
            .iter()
            .map(|p| p.drug.as_str())
            .collect();
        assert_eq!(partners, vec!["aspirin", "digoxin"]);
    }

    #[test]
    fn test_self_interaction_is_indexed_twice_under_one_key() {
        let index = InteractionIndex::from_records(
            vec![DrugInteractionRecord::new("Digoxin", "digoxin", "Duplicate entry.")],
            DatasetSource::BuiltInSample,
        );
        assert_eq!(index.lookup("digoxin").len(), 2);
        assert_eq!(index.drug_count(), 1);
    }

    #[test]
    fn test_blank_drug_names_are_skipped() {
        let index = InteractionIndex::from_records(
            vec![
                DrugInteractionRecord::new("  ", "Aspirin", "Ignored."),
                DrugInteractionRecord::new("Aspirin", "Ibuprofen", "Moderate bleeding risk."),
            ],
            DatasetSource::BuiltInSample,
        );
        assert_eq!(index.record_count(), 1);
        assert_eq!(index.lookup("aspirin").len(), 1);
    }

    #[test]
    fn test_try_load_reads_named_columns() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = write_dataset(
            &dir,
            "ddi.csv",
            "Drug 1,Drug 2,Interaction Description\n\
             Aspirin , Warfarin,Increased risk of bleeding when used together.\n\
             Sildenafil,Nitroglycerin,\"Severe hypotension. Avoid combination.\"\n",
        );

        let index = InteractionIndex::try_load(&path).expect("should load dataset");
        assert_eq!(index.record_count(), 2);
        assert_eq!(index.drug_count(), 4);
        assert_eq!(index.source(), &DatasetSource::File(path.clone()));
        assert_eq!(
            index.lookup("nitroglycerin")[0].description,
            "Severe hypotension. Avoid combination."
        );
        assert_eq!(index.lookup("warfarin")[0].drug, "aspirin");
    }

    #[test]
    fn test_try_load_accepts_column_aliases_and_extra_columns() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = write_dataset(
            &dir,
            "ddi.csv",
            "id,drug_a,drug_b,description\n1,Aspirin,Ibuprofen,Moderate risk.\n",
        );

        let index = InteractionIndex::try_load(&path).expect("should load aliased dataset");
        assert_eq!(index.lookup("ibuprofen")[0].drug, "aspirin");
    }

    #[test]
    fn test_try_load_reports_missing_file() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let err = InteractionIndex::try_load(&dir.path().join("absent.csv"))
            .expect_err("should fail for missing file");
        assert!(matches!(err, CoreError::DatasetMissing(_)));
    }

    #[test]
    fn test_try_load_reports_wrong_columns() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = write_dataset(&dir, "bad.csv", "name,notes\nAspirin,none\n");
        let err = InteractionIndex::try_load(&path).expect_err("should fail for wrong columns");
        assert!(matches!(err, CoreError::DatasetRead { .. }));
    }

    #[test]
    fn test_try_load_reports_empty_dataset() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = write_dataset(&dir, "empty.csv", "Drug 1,Drug 2,Interaction Description\n");
        let err = InteractionIndex::try_load(&path).expect_err("should fail for empty dataset");
        assert!(matches!(err, CoreError::DatasetEmpty(_)));
    }

    #[test]
    fn test_load_falls_back_to_sample() {
        let dir = TempDir::new().expect("Failed to create temp dir");

        let missing = InteractionIndex::load(&dir.path().join("absent.csv"));
        assert_eq!(missing.source(), &DatasetSource::BuiltInSample);
        assert_eq!(missing.record_count(), SAMPLE_INTERACTIONS.len());

        let bad = write_dataset(&dir, "bad.csv", "name,notes\nAspirin,none\n");
        let malformed = InteractionIndex::load(&bad);
        assert_eq!(malformed.source(), &DatasetSource::BuiltInSample);
        assert_eq!(malformed.record_count(), SAMPLE_INTERACTIONS.len());
    }

    #[test]
    fn test_reload_swaps_without_touching_existing_snapshots() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = write_dataset(
            &dir,
            "ddi.csv",
            "Drug 1,Drug 2,Interaction Description\nClarithromycin,Simvastatin,High risk of myopathy.\n",
        );

        let table = InteractionTable::new(InteractionIndex::sample());
        let before = table.snapshot();

        let after = table.reload(&path).expect("reload should succeed");

        assert_eq!(before.source(), &DatasetSource::BuiltInSample);
        assert!(before.lookup("simvastatin").is_empty());
        assert_eq!(after.lookup("simvastatin").len(), 1);
        assert!(table.snapshot().lookup("warfarin").is_empty());
    }

    #[test]
    fn test_failed_reload_keeps_current_index() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let table = InteractionTable::new(InteractionIndex::sample());

        let err = table
            .reload(&dir.path().join("absent.csv"))
            .expect_err("reload should fail");
        assert!(matches!(err, CoreError::DatasetMissing(_)));
        assert_eq!(table.snapshot().record_count(), SAMPLE_INTERACTIONS.len());
    }
}
