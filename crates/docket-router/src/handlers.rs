//! HTTP request handlers for the Router service.
//!
//! Implements the prediction, ground-truth and health endpoints using axum.

use crate::pipeline::{Pipeline, PipelineError};
use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router as AxumRouter,
};
use docket_domain::traits::PredictionStore;
use docket_domain::ObservationId;
use docket_gatekeeper::RejectionReason;
use docket_model::LogisticModel;
use docket_store::StoreError;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{error, info, warn};

/// Prediction store shared by all handlers
pub type SharedStore = Arc<Mutex<Box<dyn PredictionStore<Error = StoreError> + Send>>>;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Validator, transformer, classifier and threshold
    pub pipeline: Arc<Pipeline<LogisticModel>>,
    /// Persisted predictions
    pub store: SharedStore,
}

impl AppState {
    /// Build state from a pipeline and any prediction store
    pub fn new<S>(pipeline: Pipeline<LogisticModel>, store: S) -> Self
    where
        S: PredictionStore<Error = StoreError> + Send + 'static,
    {
        let store: Box<dyn PredictionStore<Error = StoreError> + Send> = Box::new(store);
        Self {
            pipeline: Arc::new(pipeline),
            store: Arc::new(Mutex::new(store)),
        }
    }

    fn lock_store(
        &self,
    ) -> Result<MutexGuard<'_, Box<dyn PredictionStore<Error = StoreError> + Send>>, AppError>
    {
        self.store
            .lock()
            .map_err(|_| AppError::Internal("Prediction store lock poisoned".to_string()))
    }
}

/// Prediction response
#[derive(Debug, Serialize, Deserialize)]
pub struct PredictionResponse {
    /// Observation id
    pub id: i64,
    /// Thresholded label
    pub outcome: bool,
}

/// Ground-truth submission
#[derive(Debug, Deserialize)]
pub struct OutcomeRequest {
    /// Observation id of an earlier prediction
    pub id: i64,
    /// Observed outcome
    pub outcome: bool,
}

/// Ground-truth response
#[derive(Debug, Serialize, Deserialize)]
pub struct OutcomeResponse {
    /// Observation id
    pub id: i64,
    /// Observed outcome, as submitted
    pub outcome: bool,
    /// Label the stored probability maps to
    pub predicted_outcome: bool,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheckResponse {
    /// Overall health status
    pub status: String,
    /// Number of feature columns the loaded model scores
    pub model_columns: usize,
    /// Active decision threshold
    pub threshold: f64,
}

/// Error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

/// Application error type
#[derive(Debug)]
pub enum AppError {
    /// Validation rejection
    Rejected(RejectionReason),
    /// Request body is unusable
    BadRequest(String),
    /// Unknown observation id
    NotFound(String),
    /// Outcome already recorded
    Conflict(String),
    /// Internal server error
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Rejected(reason) => (StatusCode::BAD_REQUEST, reason.to_string()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

impl From<PipelineError> for AppError {
    fn from(e: PipelineError) -> Self {
        match e {
            PipelineError::Rejected(reason) => AppError::Rejected(reason),
            PipelineError::Store(msg) => {
                error!(error = %msg, "id lookup failed");
                AppError::Internal(msg)
            }
            PipelineError::ClassifierFailure(_) => AppError::Internal(e.to_string()),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Duplicate(id) => {
                AppError::Rejected(RejectionReason::DuplicateId { id: id.value() })
            }
            StoreError::NotFound(_) => AppError::NotFound(e.to_string()),
            StoreError::OutcomeAlreadySet(_) => AppError::Conflict(e.to_string()),
            StoreError::Database(_) => {
                error!(error = %e, "prediction store failure");
                AppError::Internal(e.to_string())
            }
        }
    }
}

/// POST /will_recidivate/ - Score one observation and persist the prediction
async fn will_recidivate(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<PredictionResponse>, AppError> {
    // Held from the id check through the insert
    let mut store = state.lock_store()?;

    let scored = state.pipeline.score(&body, &**store)?;
    store.insert_prediction(scored.prediction_record())?;

    info!(
        id = %scored.record.id,
        probability = scored.probability,
        outcome = scored.outcome,
        "prediction stored"
    );

    Ok(Json(PredictionResponse {
        id: scored.record.id.value(),
        outcome: scored.outcome,
    }))
}

/// POST /recidivism_result/ - Attach the observed outcome to a prediction
async fn recidivism_result(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<OutcomeResponse>, AppError> {
    let request: OutcomeRequest = serde_json::from_slice(&body).map_err(|e| {
        warn!(error = %e, "malformed outcome request");
        AppError::BadRequest(format!("Failed to decode JSON object: {}", e))
    })?;

    let id = ObservationId::new(request.id);
    let record = state.lock_store()?.record_outcome(id, request.outcome)?;

    info!(id = %id, outcome = request.outcome, "outcome recorded");

    Ok(Json(OutcomeResponse {
        id: request.id,
        outcome: request.outcome,
        predicted_outcome: record.predicted_outcome(state.pipeline.threshold()),
    }))
}

/// GET /health - Liveness and loaded-model summary
async fn health_check(State(state): State<AppState>) -> Json<HealthCheckResponse> {
    Json(HealthCheckResponse {
        status: "healthy".to_string(),
        model_columns: state.pipeline.classifier().columns().len(),
        threshold: state.pipeline.threshold(),
    })
}

/// Create the axum router with all routes
pub fn create_router(state: AppState) -> AxumRouter {
    AxumRouter::new()
        .route("/will_recidivate/", post(will_recidivate))
        .route("/recidivism_result/", post(recidivism_result))
        .route("/health", get(health_check))
        .with_state(state)
}
