use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};

use crate::domain::Employee;
use crate::errors::ServiceError;
use crate::pagination::Page;

#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Employee>, ServiceError>;
    async fn find_page(&self, page: u64, page_size: u64) -> Result<Page<Employee>, ServiceError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<Employee>, ServiceError>;
    /// Exact, case-sensitive match against the stored gender token.
    async fn find_all_by_gender(&self, gender: &str) -> Result<Vec<Employee>, ServiceError>;
    async fn save(&self, employee: Employee) -> Result<Employee, ServiceError>;
    async fn delete_by_id(&self, id: i32) -> Result<bool, ServiceError>;
}

/// SeaORM-backed repository implementation.
pub struct SeaOrmEmployeeRepository {
    pub db: DatabaseConnection,
}

#[async_trait]
impl EmployeeRepository for SeaOrmEmployeeRepository {
    async fn find_all(&self) -> Result<Vec<Employee>, ServiceError> {
        let rows = models::employee::Entity::find()
            .order_by_asc(models::employee::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        Ok(rows.into_iter().map(Employee::from).collect())
    }

    async fn find_page(&self, page: u64, page_size: u64) -> Result<Page<Employee>, ServiceError> {
        let paginator = models::employee::Entity::find()
            .order_by_asc(models::employee::Column::Id)
            .paginate(&self.db, page_size);
        let total_elements = paginator
            .num_items()
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        let total_pages = paginator
            .num_pages()
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        let rows = paginator
            .fetch_page(page)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        Ok(Page::from_zero_indexed(
            rows.into_iter().map(Employee::from).collect(),
            page,
            page_size,
            total_elements,
            total_pages,
        ))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Employee>, ServiceError> {
        let row = models::employee::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        Ok(row.map(Employee::from))
    }

    async fn find_all_by_gender(&self, gender: &str) -> Result<Vec<Employee>, ServiceError> {
        let rows = models::employee::Entity::find()
            .filter(models::employee::Column::Gender.eq(gender))
            .order_by_asc(models::employee::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        Ok(rows.into_iter().map(Employee::from).collect())
    }

    async fn save(&self, employee: Employee) -> Result<Employee, ServiceError> {
        let Employee { id, name, age, gender, salary, company_id } = employee;
        let mut am = models::employee::ActiveModel {
            id: NotSet,
            name: Set(name),
            age: Set(age),
            gender: Set(gender),
            salary: Set(salary),
            company_id: Set(company_id),
        };
        // Upsert at the explicit id: update the row when it exists,
        // insert it otherwise.
        let saved = match id {
            Some(id) => {
                am.id = Set(id);
                let existing = models::employee::Entity::find_by_id(id)
                    .one(&self.db)
                    .await
                    .map_err(|e| ServiceError::Db(e.to_string()))?;
                if existing.is_some() {
                    am.update(&self.db).await.map_err(|e| ServiceError::Db(e.to_string()))?
                } else {
                    am.insert(&self.db).await.map_err(|e| ServiceError::Db(e.to_string()))?
                }
            }
            None => am.insert(&self.db).await.map_err(|e| ServiceError::Db(e.to_string()))?,
        };
        Ok(Employee::from(saved))
    }

    async fn delete_by_id(&self, id: i32) -> Result<bool, ServiceError> {
        let res = models::employee::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        Ok(res.rows_affected > 0)
    }
}
