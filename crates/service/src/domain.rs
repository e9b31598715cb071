//! Wire-facing domain types shared by the services and the HTTP layer.
//!
//! A `Company` carries the employee records attached to it at create or
//! update time; when read back from storage the list holds the employees
//! whose `company_id` points at it.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    /// Absent until persisted; storage issues it on first save.
    #[serde(default)]
    pub id: Option<i32>,
    pub company_name: String,
    /// Declared headcount, never reconciled with `employees.len()`.
    pub employee_number: i32,
    #[serde(default)]
    pub employees: Vec<Employee>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    #[serde(default)]
    pub id: Option<i32>,
    pub name: String,
    pub age: i32,
    pub gender: String,
    pub salary: f64,
    #[serde(default)]
    pub company_id: Option<i32>,
}

/// Partial company payload: absent or null fields mean "leave unchanged".
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyPatch {
    #[serde(default)]
    pub id: Option<i32>,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub employee_number: Option<i32>,
    #[serde(default)]
    pub employees: Option<Vec<Employee>>,
}

/// Partial employee payload. `companyId` is not patchable; it only moves
/// through the company save cascade.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeePatch {
    #[serde(default)]
    pub id: Option<i32>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub age: Option<i32>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub salary: Option<f64>,
}

impl Company {
    pub fn from_rows(
        company: models::company::Model,
        employees: Vec<models::employee::Model>,
    ) -> Self {
        Self {
            id: Some(company.id),
            company_name: company.company_name,
            employee_number: company.employee_number,
            employees: employees.into_iter().map(Employee::from).collect(),
        }
    }
}

impl From<models::employee::Model> for Employee {
    fn from(row: models::employee::Model) -> Self {
        Self {
            id: Some(row.id),
            name: row.name,
            age: row.age,
            gender: row.gender,
            salary: row.salary,
            company_id: row.company_id,
        }
    }
}
