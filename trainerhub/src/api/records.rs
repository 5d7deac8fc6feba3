//! Handlers shared by every entity collection.
//!
//! The handlers are generic over the [`Record`] type, so one implementation serves
//! trainers, clients, programs, sessions and progress entries alike.

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    Json,
};
use serde_json::Value;
use tracing::info;
use validator::Validate;

use trainerhub_core::{
    document::{parse_id, Record},
    error::DocumentStoreResult,
    wire::stored_to_wire,
};

use super::{error::ApiError, extract::ValidatedJson, params::ListParams, state::AppState};

/// Validates and persists a record, answering with the stored form including `_id`.
pub async fn create_record<D>(
    State(state): State<AppState>,
    ValidatedJson(record): ValidatedJson<D>,
) -> Result<Json<Value>, ApiError>
where
    D: Record + Validate,
{
    let store = state.store()?;
    let stored = store.typed_collection::<D>().create(&record).await?;

    info!(collection = D::collection_name(), id = %stored.id, "record created");

    Ok(Json(stored_to_wire(&stored)?))
}

/// Lists records in insertion order, narrowed by the endpoint's filter parameters.
pub async fn list_records<D, P>(
    State(state): State<AppState>,
    params: Result<Query<P>, QueryRejection>,
) -> Result<Json<Vec<Value>>, ApiError>
where
    D: Record,
    P: ListParams,
{
    let Query(params) = params?;
    params.validate()?;

    let store = state.store()?;
    let limit = params.effective_limit();

    let records = store
        .typed_collection::<D>()
        .list(params.into_filter(), limit)
        .await?
        .iter()
        .map(stored_to_wire)
        .collect::<DocumentStoreResult<Vec<_>>>()?;

    Ok(Json(records))
}

/// Fetches one record by its hex identifier.
pub async fn get_record<D>(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError>
where
    D: Record,
{
    // A malformed id is the caller's error even when no store is configured.
    let object_id = parse_id(&id)?;
    let store = state.store()?;

    let stored = store
        .typed_collection::<D>()
        .get(object_id)
        .await?
        .ok_or_else(|| ApiError::NotFound {
            collection: D::collection_name().to_string(),
            id,
        })?;

    Ok(Json(stored_to_wire(&stored)?))
}
