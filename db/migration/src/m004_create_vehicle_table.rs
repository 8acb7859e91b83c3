use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Vehicle::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Vehicle::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Vehicle::Title).string_len(255).not_null())
                    .col(ColumnDef::new(Vehicle::Description).text().null())
                    .col(ColumnDef::new(Vehicle::Year).integer().not_null())
                    .col(ColumnDef::new(Vehicle::Price).double().not_null())
                    .col(ColumnDef::new(Vehicle::Mileage).integer().not_null().default(0))
                    .col(ColumnDef::new(Vehicle::FuelType).string_len(32).not_null())
                    .col(ColumnDef::new(Vehicle::Transmission).string_len(32).not_null())
                    .col(ColumnDef::new(Vehicle::BodyType).string_len(32).null())
                    .col(ColumnDef::new(Vehicle::Color).string_len(32).null())
                    .col(ColumnDef::new(Vehicle::Condition).string_len(32).null())
                    .col(
                        ColumnDef::new(Vehicle::Status)
                            .string_len(16)
                            .not_null()
                            .default("available"),
                    )
                    .col(ColumnDef::new(Vehicle::VendorId).integer().not_null())
                    .col(ColumnDef::new(Vehicle::BrandId).integer().not_null())
                    .col(ColumnDef::new(Vehicle::ModelId).integer().not_null())
                    .col(
                        ColumnDef::new(Vehicle::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Vehicle::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_vehicle_vendor_id")
                            .from(Vehicle::Table, Vehicle::VendorId)
                            .to(Vendor::Table, Vendor::Id)
                            .on_delete(ForeignKeyAction::NoAction),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_vehicle_brand_id")
                            .from(Vehicle::Table, Vehicle::BrandId)
                            .to(Brand::Table, Brand::Id)
                            .on_delete(ForeignKeyAction::NoAction),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_vehicle_model_id")
                            .from(Vehicle::Table, Vehicle::ModelId)
                            .to(VehicleModel::Table, VehicleModel::Id)
                            .on_delete(ForeignKeyAction::NoAction),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Vehicle::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Vendor {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Brand {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum VehicleModel {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Vehicle {
    Table,
    Id,
    Title,
    Description,
    Year,
    Price,
    Mileage,
    FuelType,
    Transmission,
    BodyType,
    Color,
    Condition,
    Status,
    VendorId,
    BrandId,
    ModelId,
    CreatedAt,
    UpdatedAt,
}
