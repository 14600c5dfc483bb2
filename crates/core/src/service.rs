//! Interaction orchestration service.
//!
//! `InteractionService` is the single entry point used by the REST and CLI
//! layers. Each call takes one snapshot of the interaction index and runs the
//! whole request against it, so a concurrent reload never mixes two datasets
//! in one response.

use crate::catalogue::{self, MedicationEntry};
use crate::config::CoreConfig;
use crate::explanation::ExplanationComposer;
use crate::extractor::MedicationExtractor;
use crate::medications::MedicationSet;
use crate::resolver::{InteractionResolver, InteractionResult};
use crate::table::{InteractionIndex, InteractionPartner, InteractionTable};
use crate::CoreResult;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;

/// Result of analysing one prescription text.
#[derive(Debug, Clone, Serialize)]
pub struct PrescriptionAnalysis {
    pub medications: MedicationSet,
    pub interactions: Vec<InteractionResult>,
    pub analysis: String,
}

/// Result of checking a patient's medication list.
#[derive(Debug, Clone, Serialize)]
pub struct MedicationReview {
    pub medications: MedicationSet,
    pub interactions: Vec<InteractionResult>,
}

/// Provenance and size of the published interaction index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatasetStatus {
    pub source: String,
    pub records: usize,
    pub drugs: usize,
    pub loaded_at: DateTime<Utc>,
}

impl DatasetStatus {
    fn of(index: &InteractionIndex) -> Self {
        Self {
            source: index.source().to_string(),
            records: index.record_count(),
            drugs: index.drug_count(),
            loaded_at: index.loaded_at(),
        }
    }
}

/// Drug-interaction service over a shared [`InteractionTable`].
#[derive(Clone, Debug)]
pub struct InteractionService {
    table: Arc<InteractionTable>,
    cfg: Arc<CoreConfig>,
}

impl InteractionService {
    /// Creates a new `InteractionService`.
    pub fn new(table: Arc<InteractionTable>, cfg: Arc<CoreConfig>) -> Self {
        Self { table, cfg }
    }

    /// Extracts medications from `text`, resolves their interactions and summarises them.
    pub fn analyze_prescription(&self, text: &str) -> PrescriptionAnalysis {
        let index = self.table.snapshot();

        let medications = MedicationExtractor::new(&index).extract(text);
        let interactions = self.resolve(&index, &medications);
        let analysis = ExplanationComposer::summarize(&interactions, medications.as_slice());

        tracing::debug!(
            "analyzed prescription: {} medications, {} interactions",
            medications.len(),
            interactions.len()
        );

        PrescriptionAnalysis {
            medications,
            interactions,
            analysis,
        }
    }

    /// Checks explicitly named medications together with those found in prescription texts.
    ///
    /// Explicit names come first in input order, blank names are skipped, and
    /// names extracted from each text follow in text order.
    pub fn review_medications<S, T>(
        &self,
        medications: &[S],
        prescription_texts: &[T],
    ) -> MedicationReview
    where
        S: AsRef<str>,
        T: AsRef<str>,
    {
        let index = self.table.snapshot();
        let extractor = MedicationExtractor::new(&index);

        let mut all = MedicationSet::new();
        for name in medications {
            all.insert_text(name.as_ref());
        }
        for text in prescription_texts {
            all.extend(extractor.extract(text.as_ref()).iter().cloned());
        }

        let interactions = self.resolve(&index, &all);

        tracing::debug!(
            "reviewed {} medications: {} interactions",
            all.len(),
            interactions.len()
        );

        MedicationReview {
            medications: all,
            interactions,
        }
    }

    /// Known interaction partners of `drug`, in dataset order.
    pub fn lookup(&self, drug: &str) -> Vec<InteractionPartner> {
        self.table.snapshot().lookup(drug).to_vec()
    }

    pub fn dataset_status(&self) -> DatasetStatus {
        DatasetStatus::of(&self.table.snapshot())
    }

    /// Reloads the dataset from the configured path and publishes it.
    ///
    /// # Errors
    ///
    /// Returns the load error and keeps the current index if the dataset is
    /// missing, unreadable or empty.
    pub fn reload(&self) -> CoreResult<DatasetStatus> {
        let index = self.table.reload(self.cfg.dataset_path())?;
        Ok(DatasetStatus::of(&index))
    }

    pub fn search_medications(&self, query: &str) -> Vec<MedicationEntry> {
        catalogue::search(query)
    }

    fn resolve(
        &self,
        index: &InteractionIndex,
        medications: &MedicationSet,
    ) -> Vec<InteractionResult> {
        let interactions = InteractionResolver::new(index).resolve(medications.as_slice());
        if self.cfg.demo_fallback() {
            apply_demo_fallback(interactions, medications)
        } else {
            interactions
        }
    }
}

/// Adds one flagged demonstration result when nothing real was found among two or more medications.
pub fn apply_demo_fallback(
    interactions: Vec<InteractionResult>,
    medications: &MedicationSet,
) -> Vec<InteractionResult> {
    match (interactions.is_empty(), medications.as_slice()) {
        (true, [first, second, ..]) => {
            tracing::debug!("no interactions found; adding demonstration result");
            vec![InteractionResult::demonstration(first, second)]
        }
        _ => interactions,
    }
}
