//! JSON request and response types.
//!
//! These mirror the core result types but are owned by the API layer, so the
//! core stays free of OpenAPI concerns. Conversions live in `api-rest`.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

/// One pairwise interaction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct InteractionRes {
    /// The two medications, in the order they were detected.
    pub drugs: Vec<String>,
    /// `Low`, `Medium` or `High`.
    pub severity: String,
    pub description: String,
    pub recommendation: String,
    pub explanation: String,
    /// `true` for demonstration results that do not come from the interaction dataset.
    pub synthesized: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AnalyzePrescriptionReq {
    /// Missing or `null` text is analysed as empty text.
    #[serde(default)]
    pub prescription_text: Option<String>,
    pub patient_id: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AnalyzePrescriptionRes {
    pub success: bool,
    pub patient_id: String,
    pub medicines: Vec<String>,
    pub interactions: Vec<InteractionRes>,
    /// The submitted text, truncated for echoing back.
    pub prescription_text: String,
    pub analysis: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DrugInteractionsReq {
    #[serde(default)]
    pub medications: Vec<String>,
    #[serde(default)]
    pub prescription_texts: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DrugInteractionsRes {
    pub success: bool,
    pub medicines: Vec<String>,
    pub interactions: Vec<InteractionRes>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct InteractionPartnerRes {
    pub partner: String,
    pub description: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DrugLookupRes {
    pub drug: String,
    pub interactions: Vec<InteractionPartnerRes>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MedicationRes {
    pub id: u32,
    pub name: String,
    pub common_dosages: Vec<String>,
    pub category: String,
    pub generated: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MedicationSearchRes {
    pub medications: Vec<MedicationRes>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DatasetStatusRes {
    /// Dataset path, or `built-in sample`.
    pub source: String,
    pub records: u64,
    pub drugs: u64,
    /// RFC 3339 timestamp of the last (re)load.
    pub loaded_at: String,
}
