use std::{
    collections::HashSet,
    net::SocketAddr,
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context;
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Deserialize;
use serde_json::Value;
use shared::{
    domain::SubjectId,
    error::{ApiError, ErrorCode},
    protocol::{ImageRecord, PersonalInfoRecord, IMAGE_PATH, PERSONAL_INFO_PATH},
};
use tracing::{error, info, warn};

mod config;

use config::{load_settings, prepare_fixture_path};

#[derive(Clone)]
struct AppState {
    fixture_path: PathBuf,
}

/// On-disk layout shared by both collections. Records are passed through
/// untouched so extra fields reach the client as-is.
#[derive(Debug, Default, Deserialize)]
struct FixtureDocument {
    #[serde(default)]
    personalinfo: Vec<Value>,
    #[serde(default)]
    image: Vec<Value>,
}

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ApiError>)>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let settings = load_settings();
    let fixture_path = prepare_fixture_path(&settings.fixture_path)?;
    let document = read_fixture(&fixture_path).await.map_err(|error| {
        error!(
            fixture = %fixture_path.display(),
            %error,
            "failed to load fixture; expected an object with `personalinfo` and `image` arrays"
        );
        error
    })?;
    validate_fixture(&document)?;

    let app = build_router(Arc::new(AppState { fixture_path }));

    let addr: SocketAddr = settings.bind_addr.parse()?;
    info!(%addr, "catalog server listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route(&format!("/{PERSONAL_INFO_PATH}"), get(list_personal_info))
        .route(&format!("/{IMAGE_PATH}"), get(list_images))
        .fallback(not_found)
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

async fn list_personal_info(State(state): State<Arc<AppState>>) -> ApiResult<Vec<Value>> {
    let document = read_fixture(&state.fixture_path).await.map_err(internal)?;
    Ok(Json(document.personalinfo))
}

async fn list_images(State(state): State<Arc<AppState>>) -> ApiResult<Vec<Value>> {
    let document = read_fixture(&state.fixture_path).await.map_err(internal)?;
    Ok(Json(document.image))
}

async fn not_found() -> (StatusCode, Json<ApiError>) {
    (
        StatusCode::NOT_FOUND,
        Json(ApiError::new(ErrorCode::NotFound, "no such collection")),
    )
}

fn internal(e: anyhow::Error) -> (StatusCode, Json<ApiError>) {
    error!(error = %e, "fixture read failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ApiError::new(ErrorCode::Internal, format!("{e:#}"))),
    )
}

// Re-read on every request so edits to the fixture show up without a restart.
async fn read_fixture(path: &Path) -> anyhow::Result<FixtureDocument> {
    let raw = tokio::fs::read(path)
        .await
        .with_context(|| format!("failed to read fixture '{}'", path.display()))?;
    serde_json::from_slice(&raw)
        .with_context(|| format!("fixture '{}' is not valid JSON", path.display()))
}

/// Decodes every record with the client's wire types so a broken fixture
/// fails at startup instead of on the first card load.
fn validate_fixture(document: &FixtureDocument) -> anyhow::Result<(usize, usize)> {
    let subjects = document
        .personalinfo
        .iter()
        .cloned()
        .map(serde_json::from_value::<PersonalInfoRecord>)
        .collect::<Result<Vec<_>, _>>()
        .context("invalid personalinfo record")?;
    let images = document
        .image
        .iter()
        .cloned()
        .map(serde_json::from_value::<ImageRecord>)
        .collect::<Result<Vec<_>, _>>()
        .context("invalid image record")?;

    let known: HashSet<&SubjectId> = subjects.iter().map(|s| &s.id).collect();
    for image in images.iter().filter(|i| !known.contains(&i.personalinfo)) {
        warn!(
            image_id = %image.id,
            subject_id = %image.personalinfo,
            "image references unknown subject"
        );
    }

    info!(
        subjects = subjects.len(),
        images = images.len(),
        "fixture loaded"
    );
    Ok((subjects.len(), images.len()))
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
