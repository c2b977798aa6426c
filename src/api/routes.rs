//! Calculator API route handlers.
//!
//! All endpoints return JSON. State is shared via `Arc<ApiState>`.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::calculator::rewards::DEFAULT_ALGORITHM;
use crate::calculator::ProfitabilityEngine;
use crate::config::{CalculatorConfig, MAX_QUOTE_AGE_SECS};
use crate::format::{format_hashrate, FormattedProjection};
use crate::pricing::PriceBook;
use crate::types::{AlgorithmRewardEntry, CalculatorInputs, MinerListing, MinerProjection};
use crate::validation::InputError;

// ---------------------------------------------------------------------------
// Shared state
// ---------------------------------------------------------------------------

/// Shared state accessible by all route handlers.
pub struct ApiState {
    pub engine: ProfitabilityEngine,
    pub calculator: CalculatorConfig,
    pub price_book: RwLock<PriceBook>,
    pub max_quote_age: chrono::Duration,
}

impl ApiState {
    pub fn new(engine: ProfitabilityEngine, calculator: CalculatorConfig, max_quote_age_secs: u64) -> Self {
        Self {
            engine,
            calculator,
            price_book: RwLock::new(PriceBook::new()),
            max_quote_age: chrono::Duration::seconds(max_quote_age_secs.min(MAX_QUOTE_AGE_SECS) as i64),
        }
    }

    /// Request inputs, or the configured default electricity price.
    fn inputs_or_default(&self, inputs: Option<CalculatorInputs>) -> CalculatorInputs {
        inputs.unwrap_or_else(|| CalculatorInputs::new(self.calculator.default_electricity_cost))
    }
}

pub type AppState = Arc<ApiState>;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct ProjectionRequest {
    pub listing: MinerListing,
    #[serde(default)]
    pub inputs: Option<CalculatorInputs>,
    /// Use the live price book when no override is given.
    #[serde(default)]
    pub use_live_price: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RankRequest {
    pub listings: Vec<MinerListing>,
    #[serde(default)]
    pub inputs: Option<CalculatorInputs>,
    #[serde(default)]
    pub use_live_price: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectionResponse {
    #[serde(flatten)]
    pub projection: MinerProjection,
    /// Parsed hashrate as displayed, e.g. `"234 TH/s"`.
    pub hashrate_label: String,
    pub formatted: FormattedProjection,
}

impl From<MinerProjection> for ProjectionResponse {
    fn from(projection: MinerProjection) -> Self {
        let formatted = FormattedProjection::from(&projection.result);
        Self {
            hashrate_label: format_hashrate(&projection.hashrate),
            projection,
            formatted,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RankResponse {
    pub inputs: CalculatorInputs,
    pub projections: Vec<ProjectionResponse>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AlgorithmInfo {
    pub algorithm: String,
    #[serde(flatten)]
    pub entry: AlgorithmRewardEntry,
}

#[derive(Debug, Clone, Serialize)]
pub struct AlgorithmsResponse {
    /// Date the reference prices were taken.
    pub as_of: NaiveDate,
    pub default_algorithm: String,
    pub algorithms: Vec<AlgorithmInfo>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DefaultsResponse {
    pub electricity_cost: f64,
    pub min_electricity_cost: f64,
    pub max_electricity_cost: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Input(#[from] InputError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::Input(_) => StatusCode::UNPROCESSABLE_ENTITY,
        };
        (status, Json(ErrorResponse { error: self.to_string() })).into_response()
    }
}

// ---------------------------------------------------------------------------
// Route handlers
// ---------------------------------------------------------------------------

/// POST /api/projection
pub async fn post_projection(
    State(state): State<AppState>,
    Json(req): Json<ProjectionRequest>,
) -> Result<Json<ProjectionResponse>, ApiError> {
    let inputs = state.inputs_or_default(req.inputs);

    let projection = if req.use_live_price {
        let book = state.price_book.read().await;
        let now = Utc::now();
        state.engine.evaluate_with(&req.listing, &inputs, |symbol| {
            book.quote(symbol, state.max_quote_age, now)
        })?
    } else {
        state.engine.evaluate(&req.listing, &inputs)?
    };

    Ok(Json(projection.into()))
}

/// POST /api/rank
pub async fn post_rank(
    State(state): State<AppState>,
    Json(req): Json<RankRequest>,
) -> Result<Json<RankResponse>, ApiError> {
    let inputs = state.inputs_or_default(req.inputs);

    let ranked = if req.use_live_price {
        let book = state.price_book.read().await;
        let now = Utc::now();
        state.engine.rank_with(&req.listings, &inputs, |symbol| {
            book.quote(symbol, state.max_quote_age, now)
        })?
    } else {
        state.engine.rank(&req.listings, &inputs)?
    };

    Ok(Json(RankResponse {
        inputs,
        projections: ranked.into_iter().map(ProjectionResponse::from).collect(),
    }))
}

/// GET /api/algorithms
pub async fn get_algorithms(State(state): State<AppState>) -> Json<AlgorithmsResponse> {
    let table = state.engine.rewards();
    Json(AlgorithmsResponse {
        as_of: table.as_of(),
        default_algorithm: DEFAULT_ALGORITHM.to_string(),
        algorithms: table
            .entries()
            .into_iter()
            .map(|(algorithm, entry)| AlgorithmInfo {
                algorithm: algorithm.to_string(),
                entry: entry.clone(),
            })
            .collect(),
    })
}

/// GET /api/calculator/defaults
pub async fn get_defaults(State(state): State<AppState>) -> Json<DefaultsResponse> {
    Json(DefaultsResponse {
        electricity_cost: state.calculator.default_electricity_cost,
        min_electricity_cost: state.calculator.min_electricity_cost,
        max_electricity_cost: state.calculator.max_electricity_cost,
    })
}

/// GET /api/quotes
pub async fn get_quotes(State(state): State<AppState>) -> Json<PriceBook> {
    let book = state.price_book.read().await;
    Json(book.clone())
}

/// GET /health
pub async fn health() -> StatusCode {
    StatusCode::OK
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
