use crate::dto::metrics::{
    DomainHitsDto, QpmPointDto, QpmQuery, RcodeSliceDto, SummaryDto, SummaryQuery,
    TimeSeriesPointDto, TopDomainsQuery,
};
use crate::errors::ApiError;
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    response::Json,
    routing::get,
    Router,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/metrics/summary", get(get_summary))
        .route("/metrics/requests/daily", get(get_daily))
        .route("/metrics/requests/monthly", get(get_monthly))
        .route("/metrics/domains/top", get(get_top_domains))
        .route("/metrics/rcodes", get(get_rcode_distribution))
        .route("/metrics/qpm", get(get_qpm))
}

async fn get_summary(
    State(state): State<AppState>,
    Query(params): Query<SummaryQuery>,
) -> Result<Json<SummaryDto>, ApiError> {
    let summary = state.metrics.summary(params.hours).await?;
    Ok(Json(summary.into()))
}

async fn get_daily(
    State(state): State<AppState>,
) -> Result<Json<Vec<TimeSeriesPointDto>>, ApiError> {
    let points = state.metrics.daily_requests_errors().await?;
    Ok(Json(points.into_iter().map(Into::into).collect()))
}

async fn get_monthly(
    State(state): State<AppState>,
) -> Result<Json<Vec<TimeSeriesPointDto>>, ApiError> {
    let points = state.metrics.monthly_requests_errors().await?;
    Ok(Json(points.into_iter().map(Into::into).collect()))
}

async fn get_top_domains(
    State(state): State<AppState>,
    Query(params): Query<TopDomainsQuery>,
) -> Result<Json<Vec<DomainHitsDto>>, ApiError> {
    let domains = state.metrics.top_domains(params.limit).await?;
    Ok(Json(domains.into_iter().map(Into::into).collect()))
}

async fn get_rcode_distribution(
    State(state): State<AppState>,
) -> Result<Json<Vec<RcodeSliceDto>>, ApiError> {
    let slices = state.metrics.rcode_distribution().await?;
    Ok(Json(slices.into_iter().map(Into::into).collect()))
}

async fn get_qpm(
    State(state): State<AppState>,
    Query(params): Query<QpmQuery>,
) -> Result<Json<Vec<QpmPointDto>>, ApiError> {
    let points = state
        .metrics
        .queries_per_minute(params.period, params.limit)
        .await?;
    Ok(Json(points.into_iter().map(Into::into).collect()))
}
