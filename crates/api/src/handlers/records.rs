use crate::dto::record::{RecordDto, RecordPayload};
use crate::errors::ApiError;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{post, put},
    Router,
};
use cobalt_dns_domain::{record_data, DomainError, RecordDraft};
use tracing::info;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/zones/{id}/records", post(create_record))
        .route("/records/{id}", put(update_record).delete(delete_record))
}

/// Validates the payload and converts it to a draft. RData must be
/// wire-encodable for its type before it is allowed into the store.
fn to_draft(zone_id: i64, payload: RecordPayload) -> Result<RecordDraft, DomainError> {
    let record_type = payload
        .record_type
        .parse()
        .map_err(DomainError::InvalidRecordType)?;
    let class = payload
        .class
        .parse()
        .map_err(DomainError::InvalidRecordClass)?;

    let name = payload.name.trim_end_matches('.').to_lowercase();
    if name.is_empty() {
        return Err(DomainError::InvalidRecordData(
            "record name cannot be empty".to_string(),
        ));
    }

    record_data::encode_rdata(record_type, &payload.rdata)?;

    Ok(RecordDraft {
        zone_id,
        name,
        record_type,
        class,
        ttl: payload.ttl,
        rdata: payload.rdata,
    })
}

async fn create_record(
    State(state): State<AppState>,
    Path(zone_id): Path<i64>,
    Json(payload): Json<RecordPayload>,
) -> Result<(StatusCode, Json<RecordDto>), ApiError> {
    let draft = to_draft(zone_id, payload)?;
    let record = state.store.create_record(&draft).await?;
    info!(
        zone_id,
        name = %record.name,
        record_type = %record.record_type,
        "record created"
    );
    Ok((StatusCode::CREATED, Json(record.into())))
}

async fn update_record(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<RecordPayload>,
) -> Result<Json<RecordDto>, ApiError> {
    let existing = state
        .store
        .get_record(id)
        .await?
        .ok_or(DomainError::RecordNotFound(id))?;
    let draft = to_draft(existing.zone_id, payload)?;
    let record = state.store.update_record(id, &draft).await?;
    info!(record_id = id, name = %record.name, "record updated");
    Ok(Json(record.into()))
}

async fn delete_record(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.store.delete_record(id).await?;
    info!(record_id = id, "record deleted");
    Ok(StatusCode::NO_CONTENT)
}
