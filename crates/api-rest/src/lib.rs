//! # API REST
//!
//! REST API implementation for CareChain drug-interaction checks.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON serialization, CORS, status codes)
//!
//! Uses `api-shared` for wire types and `carechain-core` for the engine. The router is built
//! here so that both the standalone binary and the workspace's `carechain-run` binary serve the
//! same application.

#![warn(rust_2018_idioms)]

use api_shared::{
    AnalyzePrescriptionReq, AnalyzePrescriptionRes, DatasetStatusRes, DrugInteractionsReq,
    DrugInteractionsRes, DrugLookupRes, HealthRes, HealthService, InteractionPartnerRes,
    InteractionRes, MedicationRes, MedicationSearchRes,
};
use axum::{
    extract::{Path as AxumPath, Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use carechain_core::{
    DatasetStatus, InteractionPartner, InteractionResult, InteractionService, MedicationEntry,
};
use serde::Deserialize;
use tower_http::cors::CorsLayer;
use utoipa::{IntoParams, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

/// Echoed prescription text is cut after this many characters.
const ECHO_TEXT_LIMIT: usize = 500;

/// Application state for the REST API server
///
/// Contains shared state that needs to be accessible to all request handlers. The service is
/// cheap to clone; every clone shares the same interaction table.
#[derive(Clone)]
pub struct AppState {
    pub service: InteractionService,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchParams {
    /// Partial medication name; fewer than two characters returns nothing.
    #[serde(default)]
    pub query: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health,
        analyze_prescription,
        drug_interactions,
        lookup_drug,
        search_medications,
        dataset_status,
        reload_dataset,
    ),
    components(schemas(
        HealthRes,
        InteractionRes,
        AnalyzePrescriptionReq,
        AnalyzePrescriptionRes,
        DrugInteractionsReq,
        DrugInteractionsRes,
        InteractionPartnerRes,
        DrugLookupRes,
        MedicationRes,
        MedicationSearchRes,
        DatasetStatusRes,
    ))
)]
pub struct ApiDoc;

/// Builds the REST application: routes, Swagger UI and CORS.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/analyze-prescription", post(analyze_prescription))
        .route("/api/drug-interactions", post(drug_interactions))
        .route("/api/interactions/:drug", get(lookup_drug))
        .route("/api/medications/search", get(search_medications))
        .route("/api/dataset", get(dataset_status))
        .route("/api/dataset/reload", post(reload_dataset))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for the REST API
///
/// This endpoint is used for monitoring and load balancer health checks.
#[axum::debug_handler]
async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    post,
    path = "/api/analyze-prescription",
    request_body = AnalyzePrescriptionReq,
    responses(
        (status = 200, description = "Medications and interactions found in the text", body = AnalyzePrescriptionRes),
        (status = 400, description = "Bad request")
    )
)]
/// Analyse a free-text prescription
///
/// Extracts medication names from the text, checks every pair against the interaction dataset
/// and returns the findings with a readable summary.
///
/// # Errors
/// Returns `400 Bad Request` if:
/// - `patient_id` is blank.
#[axum::debug_handler]
async fn analyze_prescription(
    State(state): State<AppState>,
    Json(req): Json<AnalyzePrescriptionReq>,
) -> Result<Json<AnalyzePrescriptionRes>, (StatusCode, &'static str)> {
    let patient_id = req.patient_id.trim();
    if patient_id.is_empty() {
        tracing::error!("Analyze prescription rejected: blank patient_id");
        return Err((StatusCode::BAD_REQUEST, "patient_id is required"));
    }

    let text = req.prescription_text.as_deref().unwrap_or_default();

    tracing::info!("Analyzing prescription for patient {}", patient_id);
    let analysis = state.service.analyze_prescription(text);

    Ok(Json(AnalyzePrescriptionRes {
        success: true,
        patient_id: patient_id.to_string(),
        medicines: analysis.medications.to_strings(),
        interactions: analysis.interactions.into_iter().map(interaction_res).collect(),
        prescription_text: echo_text(text),
        analysis: analysis.analysis,
    }))
}

#[utoipa::path(
    post,
    path = "/api/drug-interactions",
    request_body = DrugInteractionsReq,
    responses(
        (status = 200, description = "Interactions among the given medications", body = DrugInteractionsRes)
    )
)]
/// Check a medication list, optionally together with existing prescription texts
#[axum::debug_handler]
async fn drug_interactions(
    State(state): State<AppState>,
    Json(req): Json<DrugInteractionsReq>,
) -> Json<DrugInteractionsRes> {
    let review = state
        .service
        .review_medications(&req.medications, &req.prescription_texts);

    Json(DrugInteractionsRes {
        success: true,
        medicines: review.medications.to_strings(),
        interactions: review.interactions.into_iter().map(interaction_res).collect(),
    })
}

#[utoipa::path(
    get,
    path = "/api/interactions/{drug}",
    params(
        ("drug" = String, Path, description = "Drug name, any case")
    ),
    responses(
        (status = 200, description = "Known interaction partners", body = DrugLookupRes)
    )
)]
#[axum::debug_handler]
async fn lookup_drug(
    State(state): State<AppState>,
    AxumPath(drug): AxumPath<String>,
) -> Json<DrugLookupRes> {
    let interactions = state
        .service
        .lookup(&drug)
        .into_iter()
        .map(partner_res)
        .collect();

    Json(DrugLookupRes { drug, interactions })
}

#[utoipa::path(
    get,
    path = "/api/medications/search",
    params(SearchParams),
    responses(
        (status = 200, description = "Matching medications, best first", body = MedicationSearchRes)
    )
)]
#[axum::debug_handler]
async fn search_medications(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Json<MedicationSearchRes> {
    let medications = state
        .service
        .search_medications(&params.query)
        .into_iter()
        .map(medication_res)
        .collect();

    Json(MedicationSearchRes { medications })
}

#[utoipa::path(
    get,
    path = "/api/dataset",
    responses(
        (status = 200, description = "Currently published interaction dataset", body = DatasetStatusRes)
    )
)]
#[axum::debug_handler]
async fn dataset_status(State(state): State<AppState>) -> Json<DatasetStatusRes> {
    Json(dataset_res(state.service.dataset_status()))
}

#[utoipa::path(
    post,
    path = "/api/dataset/reload",
    responses(
        (status = 200, description = "Dataset reloaded", body = DatasetStatusRes),
        (status = 422, description = "Dataset could not be loaded; previous dataset kept"),
        (status = 500, description = "Internal server error")
    )
)]
/// Reload the interaction dataset from its configured path
///
/// Requests in flight keep the dataset they started with.
///
/// # Errors
/// Returns `422 Unprocessable Entity` if:
/// - the dataset file is missing, unreadable, or has no usable rows.
///
/// Returns `500 Internal Server Error` if:
/// - the reload task fails to complete.
#[axum::debug_handler]
async fn reload_dataset(
    State(state): State<AppState>,
) -> Result<Json<DatasetStatusRes>, (StatusCode, &'static str)> {
    let service = state.service.clone();
    match tokio::task::spawn_blocking(move || service.reload()).await {
        Ok(Ok(status)) => Ok(Json(dataset_res(status))),
        Ok(Err(e)) => {
            tracing::error!("Reload dataset error: {}", e);
            Err((StatusCode::UNPROCESSABLE_ENTITY, "Dataset could not be loaded"))
        }
        Err(e) => {
            tracing::error!("Reload dataset task error: {:?}", e);
            Err((StatusCode::INTERNAL_SERVER_ERROR, "Internal error"))
        }
    }
}

fn interaction_res(result: InteractionResult) -> InteractionRes {
    InteractionRes {
        drugs: result.drugs.into(),
        severity: result.severity.to_string(),
        description: result.description,
        recommendation: result.recommendation,
        explanation: result.explanation,
        synthesized: result.synthesized,
    }
}

fn partner_res(partner: InteractionPartner) -> InteractionPartnerRes {
    InteractionPartnerRes {
        partner: partner.drug,
        description: partner.description,
    }
}

fn medication_res(entry: MedicationEntry) -> MedicationRes {
    MedicationRes {
        id: entry.id,
        name: entry.name,
        common_dosages: entry.common_dosages,
        category: entry.category,
        generated: entry.generated,
    }
}

fn dataset_res(status: DatasetStatus) -> DatasetStatusRes {
    DatasetStatusRes {
        source: status.source,
        records: status.records as u64,
        drugs: status.drugs as u64,
        loaded_at: status.loaded_at.to_rfc3339(),
    }
}

fn echo_text(text: &str) -> String {
    match text.char_indices().nth(ECHO_TEXT_LIMIT) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
