//! In-memory stand-in for the relational store.
//!
//! Implements the same repository traits as the SeaORM-backed versions over
//! `BTreeMap`s behind an `RwLock`. Identifiers are issued sequentially, so
//! id order is insertion order. Tests construct one fresh store per case;
//! the server can also run on it when no database is wanted.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::company::CompanyRepository;
use crate::domain::{Company, Employee};
use crate::employee::EmployeeRepository;
use crate::errors::ServiceError;
use crate::pagination::Page;

#[derive(Debug, Clone)]
struct CompanyRow {
    company_name: String,
    employee_number: i32,
}

#[derive(Debug, Default)]
struct Tables {
    companies: BTreeMap<i32, CompanyRow>,
    employees: BTreeMap<i32, Employee>,
    next_company_id: i32,
    next_employee_id: i32,
}

impl Tables {
    fn assemble_company(&self, id: i32, row: &CompanyRow) -> Company {
        let employees = self
            .employees
            .values()
            .filter(|e| e.company_id == Some(id))
            .cloned()
            .collect();
        Company {
            id: Some(id),
            company_name: row.company_name.clone(),
            employee_number: row.employee_number,
            employees,
        }
    }
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn company_repository(&self) -> Arc<dyn CompanyRepository> {
        Arc::new(MemoryCompanyRepository { store: self.clone() })
    }

    pub fn employee_repository(&self) -> Arc<dyn EmployeeRepository> {
        Arc::new(MemoryEmployeeRepository { store: self.clone() })
    }
}

pub struct MemoryCompanyRepository {
    store: MemoryStore,
}

#[async_trait]
impl CompanyRepository for MemoryCompanyRepository {
    async fn find_all(&self) -> Result<Vec<Company>, ServiceError> {
        let tables = self.store.inner.read().await;
        Ok(tables
            .companies
            .iter()
            .map(|(id, row)| tables.assemble_company(*id, row))
            .collect())
    }

    async fn find_page(&self, page: u64, page_size: u64) -> Result<Page<Company>, ServiceError> {
        let tables = self.store.inner.read().await;
        let total_elements = tables.companies.len() as u64;
        let total_pages = total_elements.div_ceil(page_size.max(1));
        let content = tables
            .companies
            .iter()
            // Saturate: an absurd page must come back empty, not panic
            .skip(page.saturating_mul(page_size) as usize)
            .take(page_size as usize)
            .map(|(id, row)| tables.assemble_company(*id, row))
            .collect();
        Ok(Page::from_zero_indexed(content, page, page_size, total_elements, total_pages))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Company>, ServiceError> {
        let tables = self.store.inner.read().await;
        Ok(tables.companies.get(&id).map(|row| tables.assemble_company(id, row)))
    }

    async fn save(&self, company: Company) -> Result<Company, ServiceError> {
        let mut tables = self.store.inner.write().await;
        let id = match company.id {
            Some(id) => id,
            None => {
                tables.next_company_id += 1;
                tables.next_company_id
            }
        };
        tables.companies.insert(
            id,
            CompanyRow {
                company_name: company.company_name.clone(),
                employee_number: company.employee_number,
            },
        );
        Ok(Company { id: Some(id), ..company })
    }

    async fn delete_by_id(&self, id: i32) -> Result<bool, ServiceError> {
        let mut tables = self.store.inner.write().await;
        Ok(tables.companies.remove(&id).is_some())
    }
}

pub struct MemoryEmployeeRepository {
    store: MemoryStore,
}

#[async_trait]
impl EmployeeRepository for MemoryEmployeeRepository {
    async fn find_all(&self) -> Result<Vec<Employee>, ServiceError> {
        let tables = self.store.inner.read().await;
        Ok(tables.employees.values().cloned().collect())
    }

    async fn find_page(&self, page: u64, page_size: u64) -> Result<Page<Employee>, ServiceError> {
        let tables = self.store.inner.read().await;
        let total_elements = tables.employees.len() as u64;
        let total_pages = total_elements.div_ceil(page_size.max(1));
        let content = tables
            .employees
            .values()
            .skip(page.saturating_mul(page_size) as usize)
            .take(page_size as usize)
            .cloned()
            .collect();
        Ok(Page::from_zero_indexed(content, page, page_size, total_elements, total_pages))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Employee>, ServiceError> {
        let tables = self.store.inner.read().await;
        Ok(tables.employees.get(&id).cloned())
    }

    async fn find_all_by_gender(&self, gender: &str) -> Result<Vec<Employee>, ServiceError> {
        let tables = self.store.inner.read().await;
        Ok(tables
            .employees
            .values()
            .filter(|e| e.gender == gender)
            .cloned()
            .collect())
    }

    async fn save(&self, employee: Employee) -> Result<Employee, ServiceError> {
        let mut tables = self.store.inner.write().await;
        let id = match employee.id {
            Some(id) => id,
            None => {
                tables.next_employee_id += 1;
                tables.next_employee_id
            }
        };
        let stored = Employee { id: Some(id), ..employee };
        tables.employees.insert(id, stored.clone());
        Ok(stored)
    }

    async fn delete_by_id(&self, id: i32) -> Result<bool, ServiceError> {
        let mut tables = self.store.inner.write().await;
        Ok(tables.employees.remove(&id).is_some())
    }
}
