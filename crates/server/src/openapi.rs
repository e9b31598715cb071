use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct EmployeeDoc {
    pub id: Option<i32>,
    pub name: String,
    pub age: i32,
    pub gender: String,
    pub salary: f64,
    pub company_id: Option<i32>,
}

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct CompanyDoc {
    pub id: Option<i32>,
    pub company_name: String,
    pub employee_number: i32,
    pub employees: Vec<EmployeeDoc>,
}

/// Same shape as `CompanyDoc`; absent fields are left unchanged on update.
#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct CompanyPatchDoc {
    pub id: Option<i32>,
    pub company_name: Option<String>,
    pub employee_number: Option<i32>,
    pub employees: Option<Vec<EmployeeDoc>>,
}

#[derive(ToSchema)]
pub struct EmployeePatchDoc {
    pub id: Option<i32>,
    pub name: Option<String>,
    pub age: Option<i32>,
    pub gender: Option<String>,
    pub salary: Option<f64>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::companies::list,
        crate::routes::companies::get_by_id,
        crate::routes::companies::employees_of,
        crate::routes::companies::create,
        crate::routes::companies::update,
        crate::routes::companies::delete,
        crate::routes::employees::list,
        crate::routes::employees::get_by_id,
        crate::routes::employees::create,
        crate::routes::employees::update,
        crate::routes::employees::delete,
    ),
    components(
        schemas(
            HealthResponse,
            CompanyDoc,
            CompanyPatchDoc,
            EmployeeDoc,
            EmployeePatchDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "companies"),
        (name = "employees")
    )
)]
pub struct ApiDoc;
