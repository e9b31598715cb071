use std::sync::Arc;

use tracing::{info, instrument};

use crate::domain::{Employee, EmployeePatch};
use crate::employee::EmployeeRepository;
use crate::errors::ServiceError;
use crate::pagination::{Page, Pagination};

/// Application service owning the employee lifecycle. No cascade: an
/// employee has no owned sub-entities.
pub struct EmployeeService {
    repo: Arc<dyn EmployeeRepository>,
}

impl EmployeeService {
    pub fn new(repo: Arc<dyn EmployeeRepository>) -> Self {
        Self { repo }
    }

    pub async fn find_all(&self) -> Result<Vec<Employee>, ServiceError> {
        self.repo.find_all().await
    }

    pub async fn find_all_paged(
        &self,
        pagination: Pagination,
    ) -> Result<Page<Employee>, ServiceError> {
        let (page, page_size) = pagination.normalize();
        self.repo.find_page(page, page_size).await
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Employee>, ServiceError> {
        self.repo.find_by_id(id).await
    }

    /// Exact, case-sensitive match; no normalization of the token.
    pub async fn find_all_by_gender(&self, gender: &str) -> Result<Vec<Employee>, ServiceError> {
        self.repo.find_all_by_gender(gender).await
    }

    #[instrument(skip(self, employee))]
    pub async fn save(&self, employee: Employee) -> Result<Employee, ServiceError> {
        let saved = self.repo.save(employee).await?;
        info!(id = ?saved.id, "saved employee");
        Ok(saved)
    }

    /// Merge non-absent patch fields onto the stored record. The identity
    /// check comes before the existence check.
    pub async fn update_employee(
        &self,
        id: i32,
        patch: EmployeePatch,
    ) -> Result<Employee, ServiceError> {
        if patch.id != Some(id) {
            return Err(ServiceError::IdentityMismatch);
        }
        let Some(mut target) = self.repo.find_by_id(id).await? else {
            return Err(ServiceError::NotFound);
        };
        if let Some(name) = patch.name {
            target.name = name;
        }
        if let Some(gender) = patch.gender {
            target.gender = gender;
        }
        if let Some(age) = patch.age {
            target.age = age;
        }
        if let Some(salary) = patch.salary {
            target.salary = salary;
        }
        self.save(target).await
    }

    /// Check-then-act, same accepted race as the company side.
    #[instrument(skip(self))]
    pub async fn delete_by_id(&self, id: i32) -> Result<bool, ServiceError> {
        if self.repo.find_by_id(id).await?.is_none() {
            return Err(ServiceError::NotFound);
        }
        self.repo.delete_by_id(id).await?;
        info!(id, "deleted employee");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::memory::MemoryStore;

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

    fn service() -> (EmployeeService, MemoryStore) {
        let store = MemoryStore::new();
        (EmployeeService::new(store.employee_repository()), store)
    }

    #[tokio::test]
    async fn save_assigns_id_and_persists_as_is() {
        let (svc, _) = service();
        let saved = svc.save(employee("xiaoming", 20, "male", 6000.0)).await.unwrap();
        assert!(saved.id.is_some());
        assert_eq!(saved.company_id, None);
        let reread = svc.find_by_id(saved.id.unwrap()).await.unwrap().unwrap();
        assert_eq!(reread, saved);
    }

    #[tokio::test]
    async fn merge_law_changes_only_the_present_field() {
        let (svc, _) = service();
        let saved = svc.save(employee("xiaoming", 20, "male", 6000.0)).await.unwrap();
        let id = saved.id.unwrap();

        let patch = EmployeePatch { id: Some(id), age: Some(5), ..Default::default() };
        let updated = svc.update_employee(id, patch).await.unwrap();
        assert_eq!(updated.age, 5);
        assert_eq!(updated.name, "xiaoming");
        assert_eq!(updated.gender, "male");
        assert_eq!(updated.salary, 6000.0);
    }

    #[tokio::test]
    async fn identity_mismatch_is_checked_before_not_found() {
        let (svc, _) = service();
        // Employee 1 does not exist; the id disagreement still wins
        let patch = EmployeePatch { id: Some(2), ..Default::default() };
        let err = svc.update_employee(1, patch).await.unwrap_err();
        assert!(matches!(err, ServiceError::IdentityMismatch));
    }

    #[tokio::test]
    async fn update_missing_employee_is_not_found() {
        let (svc, _) = service();
        let patch = EmployeePatch { id: Some(1), ..Default::default() };
        let err = svc.update_employee(1, patch).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound));
    }

    #[tokio::test]
    async fn gender_filter_is_exact_and_case_sensitive() {
        let (svc, _) = service();
        svc.save(employee("a", 20, "male", 1.0)).await.unwrap();
        svc.save(employee("b", 21, "Male", 1.0)).await.unwrap();
        svc.save(employee("c", 22, "female", 1.0)).await.unwrap();

        let males = svc.find_all_by_gender("male").await.unwrap();
        assert_eq!(males.len(), 1);
        assert_eq!(males[0].name, "a");
        assert!(svc.find_all_by_gender("MALE").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn paged_find_all_matches_direct_zero_indexed_query() {
        let (svc, store) = service();
        for n in ["a", "b", "c", "d"] {
            svc.save(employee(n, 20, "male", 1.0)).await.unwrap();
        }
        let via_service = svc
            .find_all_paged(Pagination { page: 1, page_size: 2 })
            .await
            .unwrap();
        let direct = store.employee_repository().find_page(0, 2).await.unwrap();
        assert_eq!(via_service.content, direct.content);
        assert_eq!(via_service.total_elements, 4);
        assert_eq!(via_service.total_pages, 2);
    }

    #[tokio::test]
    async fn negative_age_and_salary_are_accepted() {
        // No field validation anywhere, by contract
        let (svc, _) = service();
        let saved = svc.save(employee("odd", -3, "other", -100.0)).await.unwrap();
        assert_eq!(saved.age, -3);
        assert_eq!(saved.salary, -100.0);
    }

    #[tokio::test]
    async fn delete_missing_employee_is_not_found() {
        let (svc, _) = service();
        let err = svc.delete_by_id(42).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound));
    }

    #[tokio::test]
    async fn delete_existing_employee_returns_true() {
        let (svc, _) = service();
        let saved = svc.save(employee("gone", 20, "male", 1.0)).await.unwrap();
        let id = saved.id.unwrap();
        assert!(svc.delete_by_id(id).await.unwrap());
        assert!(svc.find_by_id(id).await.unwrap().is_none());
    }
}
