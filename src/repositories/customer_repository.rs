use async_trait::async_trait;
use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder};
use tracing::{debug, instrument};

use crate::db;
use crate::entities::customer::{Column, Entity as Customer, Model as CustomerModel};
use crate::errors::ToolError;

use super::CustomerStore;

/// [`CustomerStore`] backed by a sea-orm connection
#[derive(Debug)]
pub struct SeaOrmCustomerStore {
    db: DatabaseConnection,
}

impl SeaOrmCustomerStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub fn get_db(&self) -> &DatabaseConnection {
        &self.db
    }
}

#[async_trait]
impl CustomerStore for SeaOrmCustomerStore {
    #[instrument(skip(self))]
    async fn find_many_ordered_by_name(&self) -> Result<Vec<CustomerModel>, ToolError> {
        let customers = Customer::find()
            .order_by_asc(Column::Name)
            .all(&self.db)
            .await?;
        debug!(count = customers.len(), "Fetched customers");
        Ok(customers)
    }

    #[instrument(skip(self))]
    async fn find_first(&self) -> Result<Option<CustomerModel>, ToolError> {
        Customer::find()
            .one(&self.db)
            .await
            .map_err(ToolError::Database)
    }

    async fn disconnect(self: Box<Self>) -> Result<(), ToolError> {
        db::close_pool(self.db).await
    }
}
