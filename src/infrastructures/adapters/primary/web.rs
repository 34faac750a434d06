use crate::application::use_cases::fetch_user_repositories::{
    FetchUserRepositoriesError, FetchUserRepositoriesInteractor, FetchUserRepositoriesUseCase,
};
use crate::domain::models::repository::Repository;
use crate::infrastructures::adapters::secondary::external_apis::github::GitHubApiAdapter;
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

// Structure to hold application state (AppState)
#[derive(Clone)]
pub struct AppState {
    pub use_case: Arc<FetchUserRepositoriesInteractor<GitHubApiAdapter>>,
}

/// Error body sent for failed lookups: `{"status": 404, "message": "..."}`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ErrorResponse {
    pub status: u16,
    pub message: String,
}

impl IntoResponse for FetchUserRepositoriesError {
    fn into_response(self) -> Response {
        tracing::error!("{self}");

        let status = match &self {
            FetchUserRepositoriesError::UsernameNotFound(_) => StatusCode::NOT_FOUND,
            FetchUserRepositoriesError::UpstreamFailure { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
        };
        let body = ErrorResponse {
            status: status.as_u16(),
            message: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

#[axum::debug_handler]
pub async fn list_user_repositories(
    Path(username): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Repository>>, FetchUserRepositoriesError> {
    let repositories = state.use_case.execute(&username).await?;
    Ok(Json(repositories))
}

#[tracing::instrument(name = "health_check")]
async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

pub fn create_router(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route("/repository/{username}", get(list_user_repositories))
        .route("/health", get(health_check))
        .with_state(app_state)
        .layer(TraceLayer::new_for_http())
}
