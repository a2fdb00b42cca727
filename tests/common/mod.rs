#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use customer_db_tools::{
    db::{self, DbConfig, DbPool},
    entities::customer::{self, Model as CustomerModel},
    errors::ToolError,
    repositories::{Connector, CustomerStore},
};
use sea_orm::{ActiveModelTrait, ConnectionTrait, DbErr, Schema, Set};
use tempfile::TempDir;

/// File-backed SQLite database living in a temporary directory.
///
/// The tools open their own connection, so the database has to outlive the
/// harness connection that seeds it.
pub struct TestDb {
    dir: TempDir,
    url: String,
}

impl TestDb {
    /// Database file with an empty `customers` table
    pub async fn new() -> Self {
        let db = Self::without_schema().await;
        let pool = db.open().await;

        let backend = pool.get_database_backend();
        let schema = Schema::new(backend);
        pool.execute(backend.build(&schema.create_table_from_entity(customer::Entity)))
            .await
            .expect("create customers table");

        db::close_pool(pool).await.expect("close seeding connection");
        db
    }

    /// Database file with no tables at all
    pub async fn without_schema() -> Self {
        let dir = TempDir::new().expect("temp dir");
        let url = format!(
            "sqlite://{}?mode=rwc",
            dir.path().join("customers.db").display()
        );
        let db = Self { dir, url };

        // Create the file so later read-only opens succeed
        let pool = db.open().await;
        db::close_pool(pool).await.expect("close bootstrap connection");
        db
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn db_config(&self) -> DbConfig {
        DbConfig::new(self.url.clone())
    }

    pub async fn open(&self) -> DbPool {
        db::establish_connection_with_config(&DbConfig::new(self.url.clone()))
            .await
            .expect("open test database")
    }

    /// Inserts one customer per name and returns the stored rows
    pub async fn seed(&self, names: &[&str]) -> Vec<CustomerModel> {
        let pool = self.open().await;
        let created_at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();

        let mut created = Vec::new();
        for (i, name) in names.iter().enumerate() {
            let model = customer::ActiveModel {
                name: Set(name.to_string()),
                email: Set(format!("{}@example.com", name.to_lowercase())),
                phone: Set(if i % 2 == 0 {
                    Some(format!("+1-555-01{:02}", i))
                } else {
                    None
                }),
                created_at: Set(created_at),
                updated_at: Set(created_at),
                ..Default::default()
            }
            .insert(&pool)
            .await
            .expect("insert customer");
            created.push(model);
        }

        db::close_pool(pool).await.expect("close seeding connection");
        created
    }
}

/// A database URL that cannot be opened
pub fn unreachable_db(dir: &TempDir) -> DbConfig {
    DbConfig::new(format!(
        "sqlite://{}?mode=ro",
        dir.path().join("missing").join("customers.db").display()
    ))
}

/// In-memory stand-in for the ORM client that records releases
#[derive(Clone, Default)]
pub struct FakeConnector {
    pub customers: Vec<CustomerModel>,
    pub fail_connect: bool,
    pub fail_query: bool,
    pub connects: Arc<AtomicUsize>,
    pub disconnects: Arc<AtomicUsize>,
}

impl FakeConnector {
    pub fn with_customers(customers: Vec<CustomerModel>) -> Self {
        Self {
            customers,
            ..Default::default()
        }
    }

    pub fn failing_connect() -> Self {
        Self {
            fail_connect: true,
            ..Default::default()
        }
    }

    pub fn failing_query() -> Self {
        Self {
            fail_query: true,
            ..Default::default()
        }
    }

    pub fn connect_count(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }

    pub fn disconnect_count(&self) -> usize {
        self.disconnects.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Connector for FakeConnector {
    async fn connect(&self) -> Result<Box<dyn CustomerStore>, ToolError> {
        if self.fail_connect {
            return Err(DbErr::Custom("connection refused".into()).into());
        }
        self.connects.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(FakeStore {
            customers: self.customers.clone(),
            fail_query: self.fail_query,
            disconnects: self.disconnects.clone(),
        }))
    }
}

struct FakeStore {
    customers: Vec<CustomerModel>,
    fail_query: bool,
    disconnects: Arc<AtomicUsize>,
}

impl FakeStore {
    fn query_error() -> ToolError {
        DbErr::Custom("no such table: customers".into()).into()
    }
}

#[async_trait]
impl CustomerStore for FakeStore {
    async fn find_many_ordered_by_name(&self) -> Result<Vec<CustomerModel>, ToolError> {
        if self.fail_query {
            return Err(Self::query_error());
        }
        let mut customers = self.customers.clone();
        customers.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(customers)
    }

    async fn find_first(&self) -> Result<Option<CustomerModel>, ToolError> {
        if self.fail_query {
            return Err(Self::query_error());
        }
        Ok(self.customers.first().cloned())
    }

    async fn disconnect(self: Box<Self>) -> Result<(), ToolError> {
        self.disconnects.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

pub fn customer(id: i32, name: &str) -> CustomerModel {
    let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    CustomerModel {
        id,
        name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase()),
        phone: None,
        created_at: at,
        updated_at: at,
    }
}
