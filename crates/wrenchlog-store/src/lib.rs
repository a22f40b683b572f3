//! # wrenchlog-store
//!
//! Data layer for a vehicle-maintenance record keeper, with two
//! interchangeable storage engines and a cross-engine migration subsystem:
//!
//! - **Relational engine** (PostgreSQL): each entity stored as a JSON
//!   document inside a typed row, with a generated-identity two-phase write.
//! - **Embedded engine**: a single-file document store with the same
//!   sixteen named collections.
//! - **Migration orchestrator**: lossless full-dataset export/import between
//!   the engines, preserving identities, foreign-key relationships, and
//!   composite keys, packaged as a downloadable archive.
//!
//! ## Example
//!
//! ```rust,no_run
//! use wrenchlog_store::{Config, Migrator};
//!
//! #[tokio::main]
//! async fn main() {
//!     let migrator = Migrator::new(Config::from_env());
//!     let response = migrator.export().await;
//!     println!("{}", response.message);
//! }
//! ```

pub mod archive;
pub mod config;
pub mod embedded;
pub mod entities;
pub mod error;
pub mod migration;
pub mod postgres;
pub mod repository;
pub mod schema;

// Re-exports for convenient access
pub use config::Config;
pub use embedded::EmbeddedStore;
pub use entities::{
    CollisionRecord, Document, GasRecord, Note, OdometerRecord, PlanRecord, PlanRecordTemplate,
    ReminderRecord, ServiceRecord, SupplyRecord, TaxRecord, Token, UpgradeRecord, UserAccess,
    UserConfigData, UserData, Vehicle, VehicleRecord,
};
pub use error::{Result, StoreError};
pub use migration::{Migrator, OperationResponse};
pub use postgres::PgStore;
pub use repository::{
    RecordStore, TokenRecordStore, UserAccessStore, UserConfigStore, UserRecordStore, VehicleStore,
};
