//! Secondary indexes for the lookup paths the services actually use:
//! employees by owning company and employees by gender.
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_employee_company_id")
                    .table(Employee::Table)
                    .col(Employee::CompanyId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_employee_gender")
                    .table(Employee::Table)
                    .col(Employee::Gender)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_employee_gender").table(Employee::Table).to_owned())
            .await?;
        manager
            .drop_index(
                Index::drop().name("idx_employee_company_id").table(Employee::Table).to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
enum Employee {
    Table,
    CompanyId,
    Gender,
}
