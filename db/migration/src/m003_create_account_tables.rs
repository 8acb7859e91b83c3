use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AppUser::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AppUser::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(AppUser::Name).string_len(255).not_null())
                    .col(ColumnDef::new(AppUser::Email).string_len(255).not_null().unique_key())
                    .col(ColumnDef::new(AppUser::Phone).string_len(64).null())
                    .col(ColumnDef::new(AppUser::Status).string_len(16).not_null().default("active"))
                    .col(ColumnDef::new(AppUser::RoleId).integer().null())
                    .col(ColumnDef::new(AppUser::OrganizationId).integer().null())
                    .col(
                        ColumnDef::new(AppUser::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(AppUser::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_app_user_role_id")
                            .from(AppUser::Table, AppUser::RoleId)
                            .to(Role::Table, Role::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_app_user_organization_id")
                            .from(AppUser::Table, AppUser::OrganizationId)
                            .to(Organization::Table, Organization::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Vendor::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Vendor::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Vendor::Name).string_len(255).not_null())
                    .col(ColumnDef::new(Vendor::Email).string_len(255).not_null().unique_key())
                    .col(ColumnDef::new(Vendor::Phone).string_len(64).null())
                    .col(ColumnDef::new(Vendor::Address).string_len(512).null())
                    .col(ColumnDef::new(Vendor::City).string_len(128).null())
                    .col(ColumnDef::new(Vendor::Status).string_len(16).not_null().default("pending"))
                    .col(ColumnDef::new(Vendor::IsVerified).boolean().not_null().default(false))
                    .col(
                        ColumnDef::new(Vendor::IsEmailVerified)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Vendor::OrganizationId).integer().null())
                    .col(ColumnDef::new(Vendor::RoleId).integer().null())
                    .col(
                        ColumnDef::new(Vendor::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Vendor::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_vendor_organization_id")
                            .from(Vendor::Table, Vendor::OrganizationId)
                            .to(Organization::Table, Organization::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_vendor_role_id")
                            .from(Vendor::Table, Vendor::RoleId)
                            .to(Role::Table, Role::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Customer::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Customer::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Customer::Name).string_len(255).not_null())
                    .col(ColumnDef::new(Customer::Email).string_len(255).not_null().unique_key())
                    .col(ColumnDef::new(Customer::Phone).string_len(64).null())
                    .col(ColumnDef::new(Customer::City).string_len(128).null())
                    .col(ColumnDef::new(Customer::Status).string_len(16).not_null().default("active"))
                    .col(
                        ColumnDef::new(Customer::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Customer::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Customer::Table).to_owned())
            .await?;
        manager.drop_table(Table::drop().table(Vendor::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(AppUser::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Organization {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Role {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum AppUser {
    Table,
    Id,
    Name,
    Email,
    Phone,
    Status,
    RoleId,
    OrganizationId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Vendor {
    Table,
    Id,
    Name,
    Email,
    Phone,
    Address,
    City,
    Status,
    IsVerified,
    IsEmailVerified,
    OrganizationId,
    RoleId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Customer {
    Table,
    Id,
    Name,
    Email,
    Phone,
    City,
    Status,
    CreatedAt,
    UpdatedAt,
}
