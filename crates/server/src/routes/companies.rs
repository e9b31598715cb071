use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use tracing::info;

use service::domain::{Company, CompanyPatch, Employee};
use service::pagination::Pagination;

use crate::errors::ApiError;
use crate::routes::ServerState;

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    /// 1-indexed page
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}

#[utoipa::path(
    get, path = "/companies", tag = "companies",
    params(ListQuery),
    responses((status = 200, description = "List OK"))
)]
pub async fn list(
    State(state): State<ServerState>,
    Query(q): Query<ListQuery>,
) -> Result<Response, ApiError> {
    match (q.page, q.page_size) {
        (Some(page), Some(page_size)) => {
            let page = state
                .companies
                .find_all_paged(Pagination { page, page_size })
                .await?;
            Ok(Json(page).into_response())
        }
        // Absent pagination selects the unpaginated path
        _ => {
            let list = state.companies.find_all().await?;
            info!(count = list.len(), "list companies");
            Ok(Json(list).into_response())
        }
    }
}

#[utoipa::path(
    get, path = "/companies/{id}", tag = "companies",
    params(("id" = i32, Path, description = "Company ID")),
    responses((status = 200, description = "Company or null body"))
)]
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
) -> Result<Json<Option<Company>>, ApiError> {
    Ok(Json(state.companies.find_by_id(id).await?))
}

#[utoipa::path(
    get, path = "/companies/{id}/employees", tag = "companies",
    params(("id" = i32, Path, description = "Company ID")),
    responses((status = 200, description = "Employee list, possibly empty"))
)]
pub async fn employees_of(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
) -> Result<Json<Vec<Employee>>, ApiError> {
    Ok(Json(state.companies.find_employees_by_id(id).await?))
}

#[utoipa::path(
    post, path = "/companies", tag = "companies",
    request_body = crate::openapi::CompanyDoc,
    responses((status = 201, description = "Created"))
)]
pub async fn create(
    State(state): State<ServerState>,
    Json(company): Json<Company>,
) -> Result<(StatusCode, Json<Company>), ApiError> {
    let saved = state.companies.save(company).await?;
    info!(id = ?saved.id, employees = saved.employees.len(), "created company");
    Ok((StatusCode::CREATED, Json(saved)))
}

#[utoipa::path(
    put, path = "/companies/{id}", tag = "companies",
    params(("id" = i32, Path, description = "Company ID")),
    request_body = crate::openapi::CompanyPatchDoc,
    responses(
        (status = 200, description = "Updated"),
        (status = 404, description = "Not found or id mismatch")
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
    Json(patch): Json<CompanyPatch>,
) -> Result<Json<Company>, ApiError> {
    let updated = state.companies.update_company(id, patch).await?;
    info!(id, "updated company");
    Ok(Json(updated))
}

#[utoipa::path(
    delete, path = "/companies/{id}", tag = "companies",
    params(("id" = i32, Path, description = "Company ID")),
    responses(
        (status = 200, description = "Deleted, body `true`"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
) -> Result<Json<bool>, ApiError> {
    let deleted = state.companies.delete_by_id(id).await?;
    info!(id, "deleted company");
    Ok(Json(deleted))
}
