use std::sync::Arc;

use tracing::{info, instrument};

use crate::company::CompanyRepository;
use crate::domain::{Company, CompanyPatch, Employee};
use crate::employee::EmployeeRepository;
use crate::errors::ServiceError;
use crate::pagination::{Page, Pagination};

/// Application service owning the company lifecycle and the
/// company→employee consistency rule. Stateless between calls; both
/// repositories are the only collaborators.
pub struct CompanyService {
    companies: Arc<dyn CompanyRepository>,
    employees: Arc<dyn EmployeeRepository>,
}

impl CompanyService {
    pub fn new(
        companies: Arc<dyn CompanyRepository>,
        employees: Arc<dyn EmployeeRepository>,
    ) -> Self {
        Self { companies, employees }
    }

    pub async fn find_all(&self) -> Result<Vec<Company>, ServiceError> {
        self.companies.find_all().await
    }

    pub async fn find_all_paged(
        &self,
        pagination: Pagination,
    ) -> Result<Page<Company>, ServiceError> {
        let (page, page_size) = pagination.normalize();
        self.companies.find_page(page, page_size).await
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Company>, ServiceError> {
        self.companies.find_by_id(id).await
    }

    /// Employees attached to the company; empty when the company is missing
    /// or has none. Absence is not an error here.
    pub async fn find_employees_by_id(&self, id: i32) -> Result<Vec<Employee>, ServiceError> {
        Ok(self
            .companies
            .find_by_id(id)
            .await?
            .map(|company| company.employees)
            .unwrap_or_default())
    }

    /// Persist the company, then stamp its id onto every attached employee
    /// and persist each one. Two separate steps, not atomic: a failure in
    /// the cascade leaves the company row already written.
    #[instrument(skip(self, company))]
    pub async fn save(&self, company: Company) -> Result<Company, ServiceError> {
        let mut saved = self.companies.save(company).await?;
        let company_id = saved.id;
        let attached = std::mem::take(&mut saved.employees);
        let mut cascaded = Vec::with_capacity(attached.len());
        for mut employee in attached {
            employee.company_id = company_id;
            cascaded.push(self.employees.save(employee).await?);
        }
        saved.employees = cascaded;
        info!(id = ?saved.id, employees = saved.employees.len(), "saved company");
        Ok(saved)
    }

    /// Merge non-absent patch fields onto the stored company and persist
    /// through `save` (same cascade). The identity check comes before the
    /// existence check.
    pub async fn update_company(
        &self,
        id: i32,
        patch: CompanyPatch,
    ) -> Result<Company, ServiceError> {
        if patch.id != Some(id) {
            return Err(ServiceError::IdentityMismatch);
        }
        let Some(mut target) = self.companies.find_by_id(id).await? else {
            return Err(ServiceError::NotFound);
        };
        if let Some(company_name) = patch.company_name {
            target.company_name = company_name;
        }
        if let Some(employee_number) = patch.employee_number {
            target.employee_number = employee_number;
        }
        if let Some(employees) = patch.employees {
            target.employees = employees;
        }
        self.save(target).await
    }

    /// Check-then-act: a concurrent delete between the existence check and
    /// the removal is an accepted race. Employees are not cascade-deleted;
    /// their `company_id` is left dangling.
    #[instrument(skip(self))]
    pub async fn delete_by_id(&self, id: i32) -> Result<bool, ServiceError> {
        if self.companies.find_by_id(id).await?.is_none() {
            return Err(ServiceError::NotFound);
        }
        self.companies.delete_by_id(id).await?;
        info!(id, "deleted company");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::employee::EmployeeService;
    use crate::storage::memory::MemoryStore;

    fn company(name: &str) -> Company {
        Company {
            id: None,
            company_name: name.into(),
            employee_number: 0,
            employees: vec![],
        }
    }

    fn employee(name: &str, age: i32, gender: &str, salary: f64) -> Employee {
        Employee {
            id: None,
            name: name.into(),
            age,
            gender: gender.into(),
            salary,
            company_id: None,
        }
    }

    fn services() -> (CompanyService, EmployeeService) {
        let store = MemoryStore::new();
        (
            CompanyService::new(store.company_repository(), store.employee_repository()),
            EmployeeService::new(store.employee_repository()),
        )
    }

    #[tokio::test]
    async fn save_assigns_id_and_returns_persisted_company() {
        let (companies, _) = services();
        let saved = companies.save(company("oocl")).await.unwrap();
        assert!(saved.id.is_some());
        assert_eq!(saved.company_name, "oocl");
    }

    #[tokio::test]
    async fn save_cascades_company_id_onto_attached_employees() {
        let (companies, employees) = services();
        let mut c = company("oocl");
        c.employees = vec![
            employee("xiaoming", 20, "male", 6000.0),
            employee("xiaohong", 19, "female", 7000.0),
        ];
        let saved = companies.save(c).await.unwrap();
        let company_id = saved.id;
        assert_eq!(saved.employees.len(), 2);
        for e in &saved.employees {
            assert_eq!(e.company_id, company_id);
            assert!(e.id.is_some());
        }
        // The cascade persisted them individually
        let stored = employees.find_all().await.unwrap();
        assert_eq!(stored.len(), 2);
        assert!(stored.iter().all(|e| e.company_id == company_id));
    }

    #[tokio::test]
    async fn find_all_returns_companies_in_insertion_order() {
        let (companies, _) = services();
        companies.save(company("alibaba")).await.unwrap();
        companies.save(company("baidu")).await.unwrap();
        let all = companies.find_all().await.unwrap();
        let names: Vec<_> = all.iter().map(|c| c.company_name.as_str()).collect();
        assert_eq!(names, vec!["alibaba", "baidu"]);
    }

    #[tokio::test]
    async fn find_employees_by_id_lists_the_attached_employee() {
        let (companies, employees) = services();
        let mut c = company("alibaba");
        c.id = Some(7);
        companies.save(c).await.unwrap();
        let mut e = employee("alibaba1", 20, "male", 6000.0);
        e.company_id = Some(7);
        employees.save(e).await.unwrap();

        let listed = companies.find_employees_by_id(7).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "alibaba1");
        assert_eq!(listed[0].company_id, Some(7));
    }

    #[tokio::test]
    async fn find_employees_by_id_is_empty_for_missing_company() {
        let (companies, _) = services();
        assert!(companies.find_employees_by_id(404).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_rejects_mismatched_id_before_looking_up() {
        let (companies, _) = services();
        // No company 1 exists either; the mismatch must win
        let patch = CompanyPatch { id: Some(99), ..Default::default() };
        let err = companies.update_company(1, patch).await.unwrap_err();
        assert!(matches!(err, ServiceError::IdentityMismatch));
    }

    #[tokio::test]
    async fn update_missing_company_is_not_found() {
        let (companies, _) = services();
        let patch = CompanyPatch { id: Some(1), ..Default::default() };
        let err = companies.update_company(1, patch).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound));
    }

    #[tokio::test]
    async fn update_merges_only_present_fields() {
        let (companies, _) = services();
        let mut c = company("oocl");
        c.employee_number = 3;
        let saved = companies.save(c).await.unwrap();
        let id = saved.id.unwrap();

        let patch = CompanyPatch {
            id: Some(id),
            company_name: Some("cargosmart".into()),
            employee_number: None,
            employees: None,
        };
        let updated = companies.update_company(id, patch).await.unwrap();
        assert_eq!(updated.company_name, "cargosmart");
        assert_eq!(updated.employee_number, 3);

        let reread = companies.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(reread.company_name, "cargosmart");
    }

    #[tokio::test]
    async fn update_with_employee_list_cascades_it() {
        let (companies, _) = services();
        let saved = companies.save(company("oocl")).await.unwrap();
        let id = saved.id.unwrap();

        let patch = CompanyPatch {
            id: Some(id),
            company_name: None,
            employee_number: None,
            employees: Some(vec![employee("zhangsan", 30, "male", 9000.0)]),
        };
        let updated = companies.update_company(id, patch).await.unwrap();
        assert_eq!(updated.employees.len(), 1);
        assert_eq!(updated.employees[0].company_id, Some(id));
        assert_eq!(updated.company_name, "oocl");
    }

    #[tokio::test]
    async fn delete_missing_company_is_not_found_and_mutates_nothing() {
        let (companies, _) = services();
        companies.save(company("alibaba")).await.unwrap();
        let err = companies.delete_by_id(404).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound));
        assert_eq!(companies.find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn delete_leaves_employees_orphaned_with_dangling_company_id() {
        let (companies, employees) = services();
        let mut c = company("oocl");
        c.employees = vec![employee("xiaoming", 20, "male", 6000.0)];
        let saved = companies.save(c).await.unwrap();
        let id = saved.id.unwrap();

        assert!(companies.delete_by_id(id).await.unwrap());
        assert!(companies.find_by_id(id).await.unwrap().is_none());
        // No cascade delete: the employee row survives, reference dangling
        let orphans = employees.find_all().await.unwrap();
        assert_eq!(orphans.len(), 1);
        assert_eq!(orphans[0].company_id, Some(id));
    }

    #[tokio::test]
    async fn find_by_id_is_idempotent_without_writes() {
        let (companies, _) = services();
        let saved = companies.save(company("baidu")).await.unwrap();
        let id = saved.id.unwrap();
        let first = companies.find_by_id(id).await.unwrap();
        let second = companies.find_by_id(id).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn paged_find_all_translates_one_indexed_pages() {
        let (companies, _) = services();
        for name in ["a", "b", "c"] {
            companies.save(company(name)).await.unwrap();
        }
        let page = companies
            .find_all_paged(Pagination { page: 1, page_size: 2 })
            .await
            .unwrap();
        let names: Vec<_> = page.content.iter().map(|c| c.company_name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(page.page, 1);
        assert_eq!(page.total_elements, 3);
        assert_eq!(page.total_pages, 2);

        let last = companies
            .find_all_paged(Pagination { page: 2, page_size: 2 })
            .await
            .unwrap();
        assert_eq!(last.content.len(), 1);
        assert_eq!(last.content[0].company_name, "c");
    }
}
