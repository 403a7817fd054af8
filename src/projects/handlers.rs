use axum::{Json, extract::State};

use crate::{
    app_state::AppState,
    projects::{dtos::RepositoryBuckets, service},
};

#[utoipa::path(
    get,
    path = "/api/projects",
    tag = "projects",
    responses(
        (status = 200, description = "Owned and contributed repositories", body = RepositoryBuckets)
    )
)]
pub async fn list_projects(State(state): State<AppState>) -> Json<RepositoryBuckets> {
    Json(service::fetch_repositories(&state.github, &state.config).await)
}
