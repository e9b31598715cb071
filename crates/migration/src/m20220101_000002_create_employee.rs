//! Create `employee` table.
//!
//! `company_id` is a plain nullable column, not a foreign key: deleting a
//! company leaves its employees behind with a dangling reference, which is
//! the documented contract.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Employee::Table)
                    .if_not_exists()
                    .col(pk_auto(Employee::Id))
                    .col(string_len(Employee::Name, 255).not_null())
                    .col(integer(Employee::Age).not_null())
                    .col(string_len(Employee::Gender, 32).not_null())
                    .col(double(Employee::Salary).not_null())
                    .col(ColumnDef::new(Employee::CompanyId).integer().null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Employee::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Employee {
    Table,
    Id,
    Name,
    Age,
    Gender,
    Salary,
    CompanyId,
}
