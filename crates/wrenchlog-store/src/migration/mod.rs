//! Migration orchestrator: full-dataset transfer between the two engines.
//!
//! Export copies every collection from the relational engine into a freshly
//! created embedded store file and packages it into an archive. Import
//! unpacks an archive and re-inserts every document into the relational
//! engine, preserving the original generated identities so foreign-key
//! references embedded inside sibling documents stay valid.
//!
//! There is no cross-entity transaction: a failure partway through leaves
//! the destination partially populated. Migration runs are single-operator,
//! maintenance-window operations and are not coordinated against concurrent
//! runs.

use crate::archive;
use crate::config::Config;
use crate::embedded::EmbeddedStore;
use crate::entities::{
    CollisionRecord, GasRecord, Note, OdometerRecord, PlanRecord, PlanRecordTemplate,
    ReminderRecord, ServiceRecord, SupplyRecord, TaxRecord, UpgradeRecord, UserConfigData,
    Vehicle, VehicleRecord,
};
use crate::error::Result;
use crate::postgres::PgStore;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// Name of the embedded store file inside the per-run temp directory.
pub const STORE_FILE_NAME: &str = "wrenchlog.db";

/// User-facing message when the relational target is not configured.
pub const NOT_CONFIGURED_MESSAGE: &str = "Postgres connection not set up";

/// Generic, non-leaking user-facing error message.
pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred, please try again later";

/// Outcome of an export or import run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationResponse {
    pub success: bool,
    pub message: String,
}

impl OperationResponse {
    pub fn succeeded(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// Drives full-dataset transfer across the sixteen collections.
pub struct Migrator {
    config: Config,
}

impl Migrator {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Export the relational dataset into an embedded store archive.
    ///
    /// On success the message carries the path of the generated archive.
    pub async fn export(&self) -> OperationResponse {
        if !self.config.relational_enabled() {
            return OperationResponse::failed(NOT_CONFIGURED_MESSAGE);
        }
        match self.try_export().await {
            Ok(archive_path) => OperationResponse::succeeded(archive_path.display().to_string()),
            Err(e) => {
                error!("export failed: {e}");
                OperationResponse::failed(GENERIC_ERROR_MESSAGE)
            }
        }
    }

    /// Import an embedded store archive into the relational engine.
    pub async fn import(&self, archive_path: &Path) -> OperationResponse {
        if !self.config.relational_enabled() {
            return OperationResponse::failed(NOT_CONFIGURED_MESSAGE);
        }
        match self.try_import(archive_path).await {
            Ok(()) => OperationResponse::succeeded("Data imported successfully"),
            Err(e) => {
                error!("import failed: {e}");
                OperationResponse::failed(GENERIC_ERROR_MESSAGE)
            }
        }
    }

    async fn try_export(&self) -> Result<PathBuf> {
        let pg = PgStore::connect(&self.config).await?;
        pg.ensure_schema().await;

        let run_id = uuid::Uuid::new_v4().to_string();
        let run_dir = self.config.data_dir.join("temp").join(&run_id);
        std::fs::create_dir_all(&run_dir)?;
        let store = EmbeddedStore::new(run_dir.join(STORE_FILE_NAME));
        store.ensure_collections()?;

        info!("starting export run {run_id}");
        let mut total = 0usize;

        // Vehicles and flat tables first, vehicle-scoped records next,
        // association/config last. The embedded store enforces no foreign
        // keys, so the order matters only for readability.
        let vehicles = pg.fetch_documents::<Vehicle>().await?;
        for vehicle in &vehicles {
            store.upsert_vehicle(vehicle).await?;
        }
        info!("vehicles: exported {} records", vehicles.len());
        total += vehicles.len();

        total += self.export_scoped::<CollisionRecord>(&pg, &store).await?;
        total += self.export_scoped::<UpgradeRecord>(&pg, &store).await?;
        total += self.export_scoped::<ServiceRecord>(&pg, &store).await?;
        total += self.export_scoped::<GasRecord>(&pg, &store).await?;
        total += self.export_scoped::<Note>(&pg, &store).await?;
        total += self.export_scoped::<OdometerRecord>(&pg, &store).await?;
        total += self.export_scoped::<ReminderRecord>(&pg, &store).await?;
        total += self.export_scoped::<PlanRecord>(&pg, &store).await?;
        total += self.export_scoped::<PlanRecordTemplate>(&pg, &store).await?;
        total += self.export_scoped::<SupplyRecord>(&pg, &store).await?;
        total += self.export_scoped::<TaxRecord>(&pg, &store).await?;

        let users = pg.fetch_users().await?;
        for user in &users {
            store.upsert_user(user).await?;
        }
        total += users.len();

        let tokens = pg.fetch_tokens().await?;
        for token in &tokens {
            store.upsert_token(token).await?;
        }
        total += tokens.len();

        let configs = pg.fetch_documents::<UserConfigData>().await?;
        for config in &configs {
            store.upsert_user_config(config).await?;
        }
        total += configs.len();

        let access = pg.fetch_access().await?;
        for grant in &access {
            store.upsert_access(grant).await?;
        }
        total += access.len();

        let archive_path = self
            .config
            .data_dir
            .join("temp")
            .join(format!("{run_id}.db.gz"));
        archive::pack(store.path(), &archive_path)?;

        info!("export complete: {total} records, archive {}", archive_path.display());
        Ok(archive_path)
    }

    async fn export_scoped<T: VehicleRecord>(
        &self,
        pg: &PgStore,
        store: &EmbeddedStore,
    ) -> Result<usize> {
        let records = pg.fetch_documents::<T>().await?;
        for record in &records {
            store.upsert_document(record).await?;
        }
        info!("{}: exported {} records", T::COLLECTION, records.len());
        Ok(records.len())
    }

    async fn try_import(&self, archive_path: &Path) -> Result<()> {
        let pg = PgStore::connect(&self.config).await?;
        pg.ensure_schema().await;

        let run_id = uuid::Uuid::new_v4().to_string();
        let run_dir = self.config.data_dir.join("temp").join(&run_id);
        let store_file = run_dir.join(STORE_FILE_NAME);
        archive::unpack(archive_path, &store_file)?;
        let store = EmbeddedStore::new(&store_file);

        info!("starting import run {run_id} from {}", archive_path.display());
        let mut total = 0usize;

        let vehicles = store.fetch_documents::<Vehicle>(false).await?;
        for vehicle in &vehicles {
            pg.insert_vehicle_with_id(vehicle).await?;
        }
        info!("vehicles: imported {} records", vehicles.len());
        total += vehicles.len();

        total += self.import_scoped::<CollisionRecord>(&store, &pg).await?;
        total += self.import_scoped::<UpgradeRecord>(&store, &pg).await?;
        total += self.import_scoped::<ServiceRecord>(&store, &pg).await?;
        total += self.import_scoped::<GasRecord>(&store, &pg).await?;
        total += self.import_scoped::<Note>(&store, &pg).await?;
        total += self.import_scoped::<OdometerRecord>(&store, &pg).await?;
        total += self.import_scoped::<ReminderRecord>(&store, &pg).await?;
        total += self.import_scoped::<PlanRecord>(&store, &pg).await?;
        total += self.import_scoped::<PlanRecordTemplate>(&store, &pg).await?;
        total += self.import_scoped::<SupplyRecord>(&store, &pg).await?;
        total += self.import_scoped::<TaxRecord>(&store, &pg).await?;

        let users = store.fetch_users().await?;
        for user in &users {
            pg.insert_user_with_id(user).await?;
        }
        total += users.len();

        let tokens = store.fetch_tokens().await?;
        for token in &tokens {
            pg.insert_token_with_id(token).await?;
        }
        total += tokens.len();

        let configs = store.fetch_user_configs().await?;
        for config in &configs {
            pg.insert_user_config(config).await?;
        }
        total += configs.len();

        let access = store.fetch_access().await?;
        for grant in &access {
            pg.insert_access(grant).await?;
        }
        total += access.len();

        // Preserved identities leave the generators behind; advance them so
        // the next organic insert does not collide.
        pg.reset_identity_sequences().await?;

        info!("import complete: {total} records");
        Ok(())
    }

    async fn import_scoped<T: VehicleRecord>(
        &self,
        store: &EmbeddedStore,
        pg: &PgStore,
    ) -> Result<usize> {
        let records = store.fetch_documents::<T>(true).await?;
        for record in &records {
            pg.insert_record_with_id(record).await?;
        }
        info!("{}: imported {} records", T::COLLECTION, records.len());
        Ok(records.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn export_without_relational_target_performs_no_io() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            postgres_connection: None,
            data_dir: dir.path().to_path_buf(),
        };
        let response = Migrator::new(config).export().await;
        assert!(!response.success);
        assert_eq!(response.message, NOT_CONFIGURED_MESSAGE);
        // No temp directory was created.
        assert!(!dir.path().join("temp").exists());
    }

    #[tokio::test]
    async fn import_without_relational_target_performs_no_io() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            postgres_connection: None,
            data_dir: dir.path().to_path_buf(),
        };
        let response = Migrator::new(config)
            .import(&dir.path().join("upload.db.gz"))
            .await;
        assert!(!response.success);
        assert_eq!(response.message, NOT_CONFIGURED_MESSAGE);
    }

    #[tokio::test]
    async fn import_with_unreachable_target_reports_generic_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            postgres_connection: Some("host=127.0.0.1 port=1 user=x dbname=x connect_timeout=1".into()),
            data_dir: dir.path().to_path_buf(),
        };
        let response = Migrator::new(config)
            .import(&dir.path().join("missing.db.gz"))
            .await;
        assert!(!response.success);
        assert_eq!(response.message, GENERIC_ERROR_MESSAGE);
    }
}
