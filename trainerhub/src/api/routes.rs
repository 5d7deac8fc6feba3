use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::{
    health::{diagnostics, root},
    params::{
        ClientListParams, ListParams, ProgramListParams, ProgressListParams, SessionListParams,
        TrainerListParams,
    },
    records::{create_record, get_record, list_records},
    state::AppState,
};
use crate::schema::{Client, Program, Progress, Session, Trainer};
use trainerhub_core::document::Record;
use validator::Validate;

/// Builds the full application router.
pub fn create_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/test", get(diagnostics))
        .nest("/trainers", record_routes::<Trainer, TrainerListParams>())
        .nest("/clients", record_routes::<Client, ClientListParams>())
        .nest("/programs", record_routes::<Program, ProgramListParams>())
        .nest("/sessions", record_routes::<Session, SessionListParams>())
        .nest("/progress", record_routes::<Progress, ProgressListParams>())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Create, list and fetch-by-id routes for one record type.
fn record_routes<D, P>() -> Router<AppState>
where
    D: Record + Validate,
    P: ListParams,
{
    Router::new()
        .route("/", get(list_records::<D, P>).post(create_record::<D>))
        .route("/:id", get(get_record::<D>))
}
