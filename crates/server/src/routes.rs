use std::sync::Arc;

use axum::{routing::get, Json, Router};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::Health;
use service::company::CompanyService;
use service::employee::EmployeeService;

use crate::openapi::ApiDoc;

pub mod companies;
pub mod employees;

#[derive(Clone)]
pub struct ServerState {
    pub companies: Arc<CompanyService>,
    pub employees: Arc<EmployeeService>,
}

#[utoipa::path(
    get, path = "/health", tag = "health",
    responses((status = 200, description = "Service healthy"))
)]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router: health, companies, employees, docs.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let companies = Router::new()
        .route(
            "/companies",
            get(companies::list).post(companies::create),
        )
        .route(
            "/companies/:id",
            get(companies::get_by_id)
                .put(companies::update)
                .delete(companies::delete),
        )
        .route("/companies/:id/employees", get(companies::employees_of));

    let employees = Router::new()
        .route(
            "/employees",
            get(employees::list).post(employees::create),
        )
        .route(
            "/employees/:id",
            get(employees::get_by_id)
                .put(employees::update)
                .delete(employees::delete),
        );

    Router::new()
        .route("/health", get(health))
        .merge(companies)
        .merge(employees)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
