//! # CareChain Core
//!
//! Drug-interaction detection and explanation for the CareChain health-records backend.
//!
//! This crate contains the engine and nothing else:
//! - Loading the pairwise interaction dataset into a symmetric lookup (`table`)
//! - Extracting medication names from free-form prescription text (`extractor`)
//! - Resolving pairwise interactions and classifying severity (`resolver`)
//! - Explaining results and summarising them (`explanation`)
//! - Medication name completion (`catalogue`)
//!
//! **No API concerns**: HTTP servers, request/response types and command-line parsing belong in
//! `api-rest`, `api-shared` and `cli`.

pub mod catalogue;
pub mod config;
pub mod constants;
pub mod error;
pub mod explanation;
pub mod extractor;
pub mod medications;
pub mod resolver;
pub mod service;
pub mod table;

pub use catalogue::MedicationEntry;
pub use config::{dataset_path_from_env_value, demo_fallback_from_env_value, CoreConfig};
pub use error::{CoreError, CoreResult};
pub use explanation::ExplanationComposer;
pub use extractor::{ExtractionRule, MedicationExtractor, EXTRACTION_RULES};
pub use medications::MedicationSet;
pub use resolver::{InteractionResolver, InteractionResult, Severity};
pub use service::{DatasetStatus, InteractionService, MedicationReview, PrescriptionAnalysis};
pub use table::{
    DatasetSource, DrugInteractionRecord, InteractionIndex, InteractionPartner, InteractionTable,
};

pub use carechain_types::{MedicationName, NonEmptyText, TextError};
