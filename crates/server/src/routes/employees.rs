use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use tracing::info;

use service::domain::{Employee, EmployeePatch};
use service::pagination::Pagination;

use crate::errors::ApiError;
use crate::routes::ServerState;

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    /// Exact gender token; wins over pagination when present
    pub gender: Option<String>,
    /// 1-indexed page
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}

#[utoipa::path(
    get, path = "/employees", tag = "employees",
    params(ListQuery),
    responses((status = 200, description = "List OK"))
)]
pub async fn list(
    State(state): State<ServerState>,
    Query(q): Query<ListQuery>,
) -> Result<Response, ApiError> {
    if let Some(gender) = q.gender {
        let list = state.employees.find_all_by_gender(&gender).await?;
        info!(count = list.len(), gender, "list employees by gender");
        return Ok(Json(list).into_response());
    }
    match (q.page, q.page_size) {
        (Some(page), Some(page_size)) => {
            let page = state
                .employees
                .find_all_paged(Pagination { page, page_size })
                .await?;
            Ok(Json(page).into_response())
        }
        _ => {
            let list = state.employees.find_all().await?;
            info!(count = list.len(), "list employees");
            Ok(Json(list).into_response())
        }
    }
}

#[utoipa::path(
    get, path = "/employees/{id}", tag = "employees",
    params(("id" = i32, Path, description = "Employee ID")),
    responses((status = 200, description = "Employee or null body"))
)]
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
) -> Result<Json<Option<Employee>>, ApiError> {
    Ok(Json(state.employees.find_by_id(id).await?))
}

#[utoipa::path(
    post, path = "/employees", tag = "employees",
    request_body = crate::openapi::EmployeeDoc,
    responses((status = 201, description = "Created"))
)]
pub async fn create(
    State(state): State<ServerState>,
    Json(employee): Json<Employee>,
) -> Result<(StatusCode, Json<Employee>), ApiError> {
    let saved = state.employees.save(employee).await?;
    info!(id = ?saved.id, "created employee");
    Ok((StatusCode::CREATED, Json(saved)))
}

#[utoipa::path(
    put, path = "/employees/{id}", tag = "employees",
    params(("id" = i32, Path, description = "Employee ID")),
    request_body = crate::openapi::EmployeePatchDoc,
    responses(
        (status = 200, description = "Updated"),
        (status = 404, description = "Not found or id mismatch")
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
    Json(patch): Json<EmployeePatch>,
) -> Result<Json<Employee>, ApiError> {
    let updated = state.employees.update_employee(id, patch).await?;
    info!(id, "updated employee");
    Ok(Json(updated))
}

#[utoipa::path(
    delete, path = "/employees/{id}", tag = "employees",
    params(("id" = i32, Path, description = "Employee ID")),
    responses(
        (status = 200, description = "Deleted, body `true`"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
) -> Result<Json<bool>, ApiError> {
    let deleted = state.employees.delete_by_id(id).await?;
    info!(id, "deleted employee");
    Ok(Json(deleted))
}
