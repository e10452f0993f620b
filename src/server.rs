use crate::charts;
use crate::config::AppConfig;
use crate::data::DataStore;
use crate::types::{ChartInstruction, SelectorDescriptor};
use anyhow::Result;
use axum::{
    extract::{Query, State},
    response::Json,
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

/// Shared, read-only state: the store is built once before the server starts
/// and only ever read by handlers, so no locking is needed across sessions.
pub struct AppState {
    pub store: DataStore,
    pub config: AppConfig,
}

#[derive(Serialize)]
pub struct SummaryResponse {
    countries: Vec<String>,
    years: Vec<i32>,
    latest_year: i32,
}

#[derive(Deserialize)]
pub struct BarParams {
    year: Option<i32>,
}

#[derive(Deserialize)]
pub struct SelectorParams {
    count: Option<usize>,
}

#[derive(Deserialize)]
pub struct ComparisonParams {
    /// Comma-separated country names.
    countries: Option<String>,
}

pub async fn start_server(config: AppConfig, store: DataStore) -> Result<()> {
    let port = config.server.port;
    let static_dir = config.server.static_dir.clone();
    let state = Arc::new(AppState { store, config });

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    println!("Starting dashboard API on http://{}", addr);

    let mut app = Router::new()
        .route("/api/summary", get(summary_handler))
        .route("/api/charts/worldmap", get(world_map_handler))
        .route("/api/charts/bar", get(bar_chart_handler))
        .route("/api/charts/comparison", get(comparison_handler))
        .route("/api/selectors", get(selectors_handler));

    if let Some(dir) = static_dir {
        app = app.nest_service("/", ServeDir::new(dir));
    }

    let app = app.layer(CorsLayer::permissive()).with_state(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

/// The UI bootstrap data: domains for the year dropdown and country selectors.
async fn summary_handler(State(state): State<Arc<AppState>>) -> Json<SummaryResponse> {
    Json(SummaryResponse {
        countries: state.store.countries.clone(),
        years: state.store.years.clone(),
        latest_year: state.store.latest_year,
    })
}

async fn world_map_handler(State(state): State<Arc<AppState>>) -> Json<ChartInstruction> {
    Json(charts::world_map(&state.store))
}

async fn bar_chart_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<BarParams>,
) -> Json<ChartInstruction> {
    tracing::info!(year = ?params.year, "bar chart requested");
    Json(charts::bar_chart(
        &state.store,
        &state.config.charts,
        params.year,
    ))
}

async fn selectors_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SelectorParams>,
) -> Json<Vec<SelectorDescriptor>> {
    let count = params.count.unwrap_or(state.config.charts.min_selectors);
    Json(charts::country_inputs(
        &state.store,
        &state.config.charts,
        count,
    ))
}

async fn comparison_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ComparisonParams>,
) -> Json<ChartInstruction> {
    let selected: Vec<String> = params
        .countries
        .as_deref()
        .unwrap_or("")
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();
    Json(charts::comparison(&state.store, &selected))
}
