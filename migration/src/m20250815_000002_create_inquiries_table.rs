use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Inquiries {
    Table,
    Id,
    Name,
    Company,
    Email,
    Budget,
    Service,
    Date,
    Time,
    Message,
    CreatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Inquiries::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Inquiries::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Inquiries::Name).string().not_null())
                    .col(ColumnDef::new(Inquiries::Company).string())
                    .col(ColumnDef::new(Inquiries::Email).string().not_null())
                    .col(ColumnDef::new(Inquiries::Budget).string())
                    .col(ColumnDef::new(Inquiries::Service).string().not_null())
                    .col(ColumnDef::new(Inquiries::Date).string().not_null())
                    .col(ColumnDef::new(Inquiries::Time).string().not_null())
                    .col(ColumnDef::new(Inquiries::Message).text().not_null())
                    .col(
                        ColumnDef::new(Inquiries::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Inquiries::Table).to_owned())
            .await
    }
}
