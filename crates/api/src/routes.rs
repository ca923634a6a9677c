use crate::error::ApiError;
use crate::models::{ChartQuery, ChartResponse};
use crate::state::AppState;
use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tvl_charts::assemble::AssetBalance;
use tvl_charts::gap_fill::chart_points;
use tvl_domain::value_objects::AssetId;

/// Builds the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/charts/{asset_id}", get(asset_chart))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Returns the dense chart series for one asset at the requested step size.
async fn asset_chart(
    State(state): State<AppState>,
    Path(asset_id): Path<String>,
    Query(query): Query<ChartQuery>,
) -> Result<Json<ChartResponse>, ApiError> {
    if query.hours == 0 {
        return Err(ApiError::InvalidStep);
    }
    let asset_id = AssetId::new(asset_id);
    let token = state
        .token(&asset_id)
        .ok_or_else(|| ApiError::UnknownAsset(asset_id.clone()))?
        .clone();

    let reports = state
        .db()
        .reports()
        .get_by_chain_and_asset(token.chain_id, &asset_id)
        .await?;
    let balances: Vec<AssetBalance> = reports
        .iter()
        .map(|report| AssetBalance {
            timestamp: report.timestamp,
            asset: report.amount,
            usd: report.usd_value,
        })
        .collect();

    let series = chart_points(
        &balances,
        query.hours,
        token.decimals as i32,
        query.usd_first,
    )?;
    Ok(Json(ChartResponse::token_series(series, query.usd_first)))
}
