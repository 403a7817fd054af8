use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    app_state::AppState,
    readme::{
        dtos::{ErrorResponse, ReadmeParams},
        extract,
    },
};

#[utoipa::path(
    get,
    path = "/api/readme",
    tag = "readme",
    params(
        ("owner" = String, Query, description = "Repository owner"),
        ("repo" = String, Query, description = "Repository name")
    ),
    responses(
        (status = 200, description = "Best-effort project details", body = crate::readme::dtos::ProjectResponse),
        (status = 400, description = "Missing owner or repo", body = ErrorResponse)
    )
)]
pub async fn get_readme(
    State(state): State<AppState>,
    Query(params): Query<ReadmeParams>,
) -> Response {
    if params.owner.is_empty() || params.repo.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Owner and repo required".to_string(),
            }),
        )
            .into_response();
    }

    let response =
        extract::fetch_project(&state.github, &state.config, &params.owner, &params.repo).await;
    Json(response).into_response()
}
