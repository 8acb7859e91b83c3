use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// (index name, table, columns) for the filter columns used by the list queries
const LISTING_INDICES: &[(&str, ListingTable, &[ListingColumn])] = &[
    ("idx_vehicle_status", ListingTable::Vehicle, &[ListingColumn::Status]),
    ("idx_vehicle_vendor_id", ListingTable::Vehicle, &[ListingColumn::VendorId]),
    (
        "idx_vehicle_brand_model",
        ListingTable::Vehicle,
        &[ListingColumn::BrandId, ListingColumn::ModelId],
    ),
    ("idx_vehicle_year_price", ListingTable::Vehicle, &[ListingColumn::Year, ListingColumn::Price]),
    ("idx_vendor_status", ListingTable::Vendor, &[ListingColumn::Status]),
    ("idx_customer_status", ListingTable::Customer, &[ListingColumn::Status]),
    ("idx_app_user_role_id", ListingTable::AppUser, &[ListingColumn::RoleId]),
    ("idx_permission_role_id", ListingTable::Permission, &[ListingColumn::RoleId]),
];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for (name, table, columns) in LISTING_INDICES {
            let mut index = Index::create();
            index.name(*name).table(*table).if_not_exists();
            for column in columns.iter() {
                index.col(*column);
            }
            manager.create_index(index.to_owned()).await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for (name, table, _) in LISTING_INDICES {
            manager
                .drop_index(Index::drop().name(*name).table(*table).to_owned())
                .await?;
        }

        Ok(())
    }
}

#[derive(DeriveIden, Clone, Copy)]
enum ListingTable {
    Vehicle,
    Vendor,
    Customer,
    AppUser,
    Permission,
}

#[derive(DeriveIden, Clone, Copy)]
enum ListingColumn {
    Status,
    VendorId,
    BrandId,
    ModelId,
    Year,
    Price,
    RoleId,
}
