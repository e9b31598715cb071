use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, DatabaseConnection, EntityTrait, LoaderTrait,
    ModelTrait, PaginatorTrait, QueryOrder, Set,
};

use crate::domain::Company;
use crate::errors::ServiceError;
use crate::pagination::Page;

/// Persistence contract for companies. `find_page` is 0-indexed; the
/// 1-indexed caller convention is translated before it is reached.
#[async_trait]
pub trait CompanyRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Company>, ServiceError>;
    async fn find_page(&self, page: u64, page_size: u64) -> Result<Page<Company>, ServiceError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<Company>, ServiceError>;
    /// Upsert of the company row only. The attached employee list passes
    /// through untouched; cascading it is the service's job.
    async fn save(&self, company: Company) -> Result<Company, ServiceError>;
    /// Returns whether a row existed and was removed. Never touches
    /// employee rows.
    async fn delete_by_id(&self, id: i32) -> Result<bool, ServiceError>;
}

/// SeaORM-backed repository implementation.
pub struct SeaOrmCompanyRepository {
    pub db: DatabaseConnection,
}

#[async_trait]
impl CompanyRepository for SeaOrmCompanyRepository {
    async fn find_all(&self) -> Result<Vec<Company>, ServiceError> {
        let rows = models::company::Entity::find()
            .find_with_related(models::employee::Entity)
            .order_by_asc(models::company::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        Ok(rows
            .into_iter()
            .map(|(company, employees)| Company::from_rows(company, employees))
            .collect())
    }

    async fn find_page(&self, page: u64, page_size: u64) -> Result<Page<Company>, ServiceError> {
        let paginator = models::company::Entity::find()
            .order_by_asc(models::company::Column::Id)
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
        let related = rows
            .load_many(models::employee::Entity, &self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        let content = rows
            .into_iter()
            .zip(related)
            .map(|(company, employees)| Company::from_rows(company, employees))
            .collect();
        Ok(Page::from_zero_indexed(content, page, page_size, total_elements, total_pages))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Company>, ServiceError> {
        let Some(row) = models::company::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?
        else {
            return Ok(None);
        };
        let employees = row
            .find_related(models::employee::Entity)
            .order_by_asc(models::employee::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        Ok(Some(Company::from_rows(row, employees)))
    }

    async fn save(&self, company: Company) -> Result<Company, ServiceError> {
        let Company { id, company_name, employee_number, employees } = company;
        let saved = match id {
            // Upsert at the explicit id: update the row when it exists,
            // insert it otherwise.
            Some(id) => {
                let existing = models::company::Entity::find_by_id(id)
                    .one(&self.db)
                    .await
                    .map_err(|e| ServiceError::Db(e.to_string()))?;
                let am = models::company::ActiveModel {
                    id: Set(id),
                    company_name: Set(company_name),
                    employee_number: Set(employee_number),
                };
                if existing.is_some() {
                    am.update(&self.db).await.map_err(|e| ServiceError::Db(e.to_string()))?
                } else {
                    am.insert(&self.db).await.map_err(|e| ServiceError::Db(e.to_string()))?
                }
            }
            None => {
                let am = models::company::ActiveModel {
                    id: NotSet,
                    company_name: Set(company_name),
                    employee_number: Set(employee_number),
                };
                am.insert(&self.db).await.map_err(|e| ServiceError::Db(e.to_string()))?
            }
        };
        Ok(Company {
            id: Some(saved.id),
            company_name: saved.company_name,
            employee_number: saved.employee_number,
            employees,
        })
    }

    async fn delete_by_id(&self, id: i32) -> Result<bool, ServiceError> {
        let res = models::company::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        Ok(res.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use migration::MigratorTrait;

    #[tokio::test]
    async fn save_with_explicit_id_upserts_against_the_database() {
        let db = match models::db::connect().await {
            Ok(db) => db,
            Err(e) => {
                eprintln!("skip: cannot connect to db: {}", e);
                return;
            }
        };
        if let Err(e) = migration::Migrator::up(&db, None).await {
            eprintln!("skip: migrate up failed: {}", e);
            return;
        }
        let repo = SeaOrmCompanyRepository { db };

        // Id points at no row yet; the save must insert, not fail
        let id = 970_001;
        let _ = repo.delete_by_id(id).await;
        let inserted = repo
            .save(Company {
                id: Some(id),
                company_name: "upsert-co".into(),
                employee_number: 0,
                employees: vec![],
            })
            .await
            .expect("insert at explicit id");
        assert_eq!(inserted.id, Some(id));

        // Second save at the same id must update in place
        let updated = repo
            .save(Company {
                id: Some(id),
                company_name: "upsert-co-2".into(),
                employee_number: 1,
                employees: vec![],
            })
            .await
            .expect("update at explicit id");
        assert_eq!(updated.company_name, "upsert-co-2");
        let reread = repo.find_by_id(id).await.expect("find").expect("present");
        assert_eq!(reread.company_name, "upsert-co-2");
        assert_eq!(reread.employee_number, 1);

        assert!(repo.delete_by_id(id).await.expect("cleanup"));
    }
}
