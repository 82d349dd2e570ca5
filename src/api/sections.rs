use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::api::error::ApiError;
use crate::domain::{query, ListParams, SectionInput};
use crate::infrastructure::AppState;
use crate::services::section_service;

#[utoipa::path(
    get,
    path = "/api/sections",
    params(ListParams),
    responses(
        (status = 200, description = "List sections; paginated envelope unless pagination=false")
    )
)]
pub async fn list_sections(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Response, ApiError> {
    let opts = query::translate("sections", &params);

    if params.paginate() {
        let rows = state.section_repo.find_and_count(&opts).await?;
        Ok(Json(rows).into_response())
    } else {
        let sections = state.section_repo.find(&opts).await?;
        Ok(Json(sections).into_response())
    }
}

#[utoipa::path(
    get,
    path = "/api/sections/{id}",
    responses(
        (status = 200, description = "The section", body = crate::models::Section),
        (status = 404, description = "Section not found")
    )
)]
pub async fn get_section(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let section = section_service::find_one(state.section_repo.as_ref(), id).await?;
    Ok(Json(section))
}

#[utoipa::path(
    post,
    path = "/api/sections",
    request_body = SectionInput,
    responses(
        (status = 201, description = "Section created", body = crate::models::Section),
        (status = 400, description = "Invalid input"),
        (status = 409, description = "Duplicate section name")
    )
)]
pub async fn create_section(
    State(state): State<AppState>,
    Json(input): Json<SectionInput>,
) -> Result<impl IntoResponse, ApiError> {
    let section = section_service::create(state.section_repo.as_ref(), input).await?;
    Ok((StatusCode::CREATED, Json(section)))
}

#[utoipa::path(
    put,
    path = "/api/sections/{id}",
    request_body = SectionInput,
    responses(
        (status = 200, description = "Section updated", body = crate::models::Section),
        (status = 404, description = "Section not found"),
        (status = 409, description = "Duplicate section name")
    )
)]
pub async fn update_section(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(input): Json<SectionInput>,
) -> Result<impl IntoResponse, ApiError> {
    let section = section_service::update(state.section_repo.as_ref(), id, input).await?;
    Ok(Json(section))
}

#[utoipa::path(
    delete,
    path = "/api/sections/{id}",
    responses(
        (status = 200, description = "Section deleted"),
        (status = 404, description = "Section not found"),
        (status = 409, description = "Section still has books")
    )
)]
pub async fn delete_section(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    section_service::remove(state.section_repo.as_ref(), state.book_repo.as_ref(), id).await?;
    Ok(Json(json!({ "message": "Section deleted" })))
}
