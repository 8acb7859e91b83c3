//! Crate for accessing the marketplace back-office database.
//!
//! Every entity family has an operations trait (`MarketDbVehicleOperations`,
//! `MarketDbVendorOperations`, ...) implemented for [`db::MarketDb`]. List operations take
//! a filter object from [`filters`] and a [`pagination::PageRequest`] and return a
//! [`pagination::Page`] of rows ordered by primary key.

pub mod catalog;
pub mod customers;
pub mod db;
pub mod errors;
pub mod filters;
pub mod messages;
pub mod organizations;
pub mod pagination;
pub mod patch;
pub mod roles;
pub mod users;
pub mod vehicles;
pub mod vendors;

use async_trait::async_trait;
use futures::future::BoxFuture;
use sea_orm::{ConnectionTrait, EntityTrait, PrimaryKeyTrait, TransactionTrait};
pub use sea_orm::{DatabaseConnection, DatabaseTransaction};

use crate::errors::{DbSqlError, Result};

/// Represents an already opened transaction.
/// This is a thin wrapper over [DatabaseTransaction].
#[derive(Debug)]
pub struct OpenTransaction(DatabaseTransaction);

impl OpenTransaction {
    /// Executes the given `callback` inside the transaction
    /// and commits the transaction if it succeeds or rollbacks otherwise.
    #[tracing::instrument(level = "trace", name = "Sql::perform_in_transaction", skip_all, err)]
    pub async fn perform<F, T, E>(self, callback: F) -> std::result::Result<T, E>
    where
        F: for<'c> FnOnce(&'c OpenTransaction) -> BoxFuture<'c, std::result::Result<T, E>> + Send,
        T: Send,
        E: std::error::Error + From<DbSqlError>,
    {
        let start = std::time::Instant::now();
        let res = callback(&self).await;

        if res.is_ok() {
            self.commit().await?;
        } else {
            self.rollback().await?;
        }

        tracing::trace!(
            elapsed_ms = start.elapsed().as_millis(),
            was_successful = res.is_ok(),
            "transaction completed",
        );

        res
    }

    /// Commits the transaction.
    pub async fn commit(self) -> Result<()> {
        Ok(self.0.commit().await?)
    }

    /// Rollbacks the transaction.
    pub async fn rollback(self) -> Result<()> {
        Ok(self.0.rollback().await?)
    }
}

impl AsRef<DatabaseTransaction> for OpenTransaction {
    fn as_ref(&self) -> &DatabaseTransaction {
        &self.0
    }
}

#[async_trait]
pub trait MarketDbGeneralModelOperations {
    /// Returns reference to the database connection.
    fn conn(&self) -> &DatabaseConnection;

    /// Creates a new transaction.
    async fn begin_transaction(&self) -> Result<OpenTransaction> {
        Ok(OpenTransaction(self.conn().begin().await?))
    }
}

/// Loads a row by primary key, failing with [`DbSqlError::EntityNotFound`] when absent.
pub(crate) async fn find_required<E, C>(db: &C, entity: &'static str, id: i32) -> Result<E::Model>
where
    E: EntityTrait,
    C: ConnectionTrait,
    i32: Into<<E::PrimaryKey as PrimaryKeyTrait>::ValueType>,
{
    E::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DbSqlError::EntityNotFound { entity, id })
}

/// Deletes a row by primary key and returns the row as it was before deletion.
pub(crate) async fn delete_required<E, C>(db: &C, entity: &'static str, id: i32) -> Result<E::Model>
where
    E: EntityTrait,
    C: ConnectionTrait,
    i32: Into<<E::PrimaryKey as PrimaryKeyTrait>::ValueType>,
{
    let model = find_required::<E, C>(db, entity, id).await?;
    E::delete_by_id(id).exec(db).await?;
    Ok(model)
}

/// Every operations trait implemented by [`db::MarketDb`].
pub trait MarketDbAllOperations:
    MarketDbGeneralModelOperations
    + catalog::MarketDbCatalogOperations
    + customers::MarketDbCustomerOperations
    + messages::MarketDbMessageOperations
    + organizations::MarketDbOrganizationOperations
    + roles::MarketDbRoleOperations
    + users::MarketDbUserOperations
    + vehicles::MarketDbVehicleOperations
    + vendors::MarketDbVendorOperations
{
}

pub mod prelude {
    pub use super::{
        MarketDbAllOperations, MarketDbGeneralModelOperations, catalog::*, customers::*, db::*, errors::DbSqlError,
        filters::*, messages::*, organizations::*, pagination::*, roles::*, users::*, vehicles::*, vendors::*,
    };
}
