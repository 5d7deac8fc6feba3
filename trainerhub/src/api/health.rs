use axum::{extract::State, Json};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::warn;

use super::state::AppState;

const MAX_COLLECTIONS: usize = 10;
const MAX_ERROR_CHARS: usize = 80;

/// Liveness message at `/`.
pub async fn root() -> Json<Value> {
    Json(json!({ "message": "Private Trainer API running" }))
}

/// Connectivity report served at `/test`.
#[derive(Debug, Serialize)]
pub struct DiagnosticReport {
    pub backend: String,
    pub database: String,
    pub database_url: Option<String>,
    pub database_name: Option<String>,
    pub connection_status: String,
    pub collections: Vec<String>,
}

impl Default for DiagnosticReport {
    fn default() -> Self {
        Self {
            backend: "✅ Running".to_string(),
            database: "❌ Not Available".to_string(),
            database_url: None,
            database_name: None,
            connection_status: "Not Connected".to_string(),
            collections: Vec::new(),
        }
    }
}

/// Always answers 200; failures only change the report's text.
pub async fn diagnostics(State(state): State<AppState>) -> Json<DiagnosticReport> {
    let mut report = DiagnosticReport::default();

    let Ok(store) = state.store() else {
        return Json(report);
    };

    let database = state.database();
    report.database = "✅ Available".to_string();
    report.database_url = Some(set_or_not(database.url.is_some()).to_string());
    report.database_name = Some(
        database
            .name
            .clone()
            .unwrap_or_else(|| set_or_not(false).to_string()),
    );
    report.connection_status = "Connected".to_string();

    match store.list_collections().await {
        Ok(collections) => {
            report.collections = collections.into_iter().take(MAX_COLLECTIONS).collect();
            report.database = "✅ Connected & Working".to_string();
        }
        Err(error) => {
            warn!(%error, "database diagnostics failed");
            report.database = format!("⚠️ Connected but Error: {}", truncate(&error.to_string()));
        }
    }

    Json(report)
}

fn set_or_not(set: bool) -> &'static str {
    if set { "✅ Set" } else { "❌ Not Set" }
}

fn truncate(message: &str) -> String {
    message.chars().take(MAX_ERROR_CHARS).collect()
}
