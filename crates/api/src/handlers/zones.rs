use crate::dto::zone::{CreateZoneRequest, ListZonesQuery, ZoneDetailDto, ZoneDto};
use crate::errors::ApiError;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use cobalt_dns_domain::DomainError;
use tracing::info;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/zones", get(list_zones).post(create_zone))
        .route("/zones/{id}", get(get_zone).delete(delete_zone))
}

async fn list_zones(
    State(state): State<AppState>,
    Query(params): Query<ListZonesQuery>,
) -> Result<Json<Vec<ZoneDto>>, ApiError> {
    let zones = state.store.list_zones(params.owner.as_deref()).await?;
    Ok(Json(zones.into_iter().map(ZoneDto::from).collect()))
}

async fn create_zone(
    State(state): State<AppState>,
    Json(req): Json<CreateZoneRequest>,
) -> Result<(StatusCode, Json<ZoneDto>), ApiError> {
    let name = req.name.trim_end_matches('.').to_lowercase();
    if name.is_empty() {
        return Err(ApiError(DomainError::InvalidRecordData(
            "zone name cannot be empty".to_string(),
        )));
    }

    let zone = state.store.create_zone(&req.owner, &name).await?;
    info!(zone = %zone.name, owner = %zone.owner, "zone created");
    Ok((StatusCode::CREATED, Json(zone.into())))
}

async fn get_zone(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ZoneDetailDto>, ApiError> {
    let zone = state
        .store
        .get_zone(id)
        .await?
        .ok_or(DomainError::ZoneNotFound(id))?;
    let records = state.store.list_records(id).await?;
    Ok(Json(ZoneDetailDto::new(zone, records)))
}

async fn delete_zone(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.store.delete_zone(id).await?;
    info!(zone_id = id, "zone deleted");
    Ok(StatusCode::NO_CONTENT)
}
