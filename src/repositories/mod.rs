use async_trait::async_trait;

use crate::entities::CustomerModel;
use crate::errors::ToolError;

pub mod customer_repository;

pub use customer_repository::SeaOrmCustomerStore;

/// Client operations the customer tools issue against the `customers` table
#[async_trait]
pub trait CustomerStore: Send + Sync {
    /// All customers ordered by name ascending; collation is the database's
    async fn find_many_ordered_by_name(&self) -> Result<Vec<CustomerModel>, ToolError>;

    /// At most one customer, in no particular order
    async fn find_first(&self) -> Result<Option<CustomerModel>, ToolError>;

    /// Releases the underlying client
    async fn disconnect(self: Box<Self>) -> Result<(), ToolError>;
}

/// Acquires a [`CustomerStore`]
#[async_trait]
pub trait Connector: Send + Sync {
    async fn connect(&self) -> Result<Box<dyn CustomerStore>, ToolError>;
}
