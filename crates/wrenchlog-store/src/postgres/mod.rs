//! Relational engine adapter (PostgreSQL).
//!
//! Each entity is stored as a JSON document inside a typed row. Document
//! kinds use the generated-identity two-phase write: insert an empty
//! placeholder to obtain the identity, then update the row with the payload
//! that now embeds its own id. Both phases run inside one transaction so a
//! connection drop between them cannot leave an orphan placeholder behind.
//!
//! Every repository call checks a client out of the pool for the duration of
//! one logical operation; no connection is held across calls.

use crate::config::Config;
use crate::entities::{
    Document, Token, UserAccess, UserConfigData, UserData, Vehicle, VehicleRecord,
};
use crate::error::{Result, StoreError};
use crate::repository::{
    swallow, RecordStore, TokenRecordStore, UserAccessStore, UserConfigStore, UserRecordStore,
    VehicleStore,
};
use crate::schema;
use async_trait::async_trait;
use deadpool_postgres::{Manager, ManagerConfig, Object, Pool, RecyclingMethod};
use tokio_postgres::NoTls;
use tracing::{debug, error, info};

/// Connection pool size. Repository calls are serial per request, so a small
/// pool is plenty.
const POOL_SIZE: usize = 4;

/// PostgreSQL-backed store implementing every repository contract.
pub struct PgStore {
    pool: Pool,
}

impl PgStore {
    /// Connect to the configured relational target and bootstrap the schema.
    ///
    /// Schema bootstrap failures are logged and swallowed so construction
    /// never aborts the host process; the first repository call will surface
    /// the problem as an ordinary empty/false result.
    pub async fn connect(config: &Config) -> Result<Self> {
        let conn_str = config
            .postgres_connection
            .as_deref()
            .ok_or(StoreError::NotConfigured)?;

        let pg_config: tokio_postgres::Config =
            conn_str.parse().map_err(StoreError::Postgres)?;

        let mgr_config = ManagerConfig {
            recycling_method: RecyclingMethod::Fast,
        };
        let mgr = Manager::from_config(pg_config, NoTls, mgr_config);
        let pool = Pool::builder(mgr)
            .max_size(POOL_SIZE)
            .build()
            .map_err(|e| StoreError::Pool(format!("failed to create pool: {e}")))?;

        let store = Self { pool };
        store.ensure_schema().await;
        Ok(store)
    }

    async fn client(&self) -> Result<Object> {
        self.pool
            .get()
            .await
            .map_err(|e| StoreError::Pool(format!("failed to get connection: {e}")))
    }

    /// Idempotently create the `app` schema and all sixteen tables.
    pub async fn ensure_schema(&self) {
        if let Err(e) = self.try_ensure_schema().await {
            error!("schema bootstrap failed: {e}");
        }
    }

    async fn try_ensure_schema(&self) -> Result<()> {
        let client = self.client().await?;
        for stmt in schema::postgres_schema_statements() {
            client.batch_execute(stmt.as_str()).await?;
        }
        debug!("relational schema bootstrap complete");
        Ok(())
    }

    // ----- generic document operations -------------------------------------

    async fn try_get_document<T: Document>(&self, id: i32) -> Result<T> {
        let client = self.client().await?;
        let sql = format!(
            "SELECT data FROM {}.{} WHERE id = $1",
            schema::SCHEMA,
            T::COLLECTION
        );
        let rows = client.query(sql.as_str(), &[&id]).await?;
        match rows.first() {
            Some(row) => {
                let data: serde_json::Value = row.get(0);
                Ok(serde_json::from_value(data)?)
            }
            None => Ok(T::default()),
        }
    }

    async fn try_get_by_vehicle<T: VehicleRecord>(&self, vehicle_id: i32) -> Result<Vec<T>> {
        let client = self.client().await?;
        let sql = format!(
            "SELECT data FROM {}.{} WHERE vehicleId = $1",
            schema::SCHEMA,
            T::COLLECTION
        );
        let rows = client.query(sql.as_str(), &[&vehicle_id]).await?;
        let mut results = Vec::with_capacity(rows.len());
        for row in rows {
            let data: serde_json::Value = row.get(0);
            results.push(serde_json::from_value(data)?);
        }
        Ok(results)
    }

    /// Two-phase generated-identity upsert for vehicle-scoped kinds.
    async fn try_save_record<T: VehicleRecord>(&self, record: &mut T) -> Result<bool> {
        let mut client = self.client().await?;
        if record.id() == 0 {
            // Phase (a): placeholder row to obtain the identity; phase (b):
            // materialize the payload that now embeds its own id. One
            // transaction, so a failure between phases rolls the row back.
            let tx = client.transaction().await?;
            let insert = format!(
                "INSERT INTO {}.{} (vehicleId, data) VALUES ($1, '{{}}'::jsonb) RETURNING id",
                schema::SCHEMA,
                T::COLLECTION
            );
            let vehicle_id = record.vehicle_id();
            let row = tx.query_one(insert.as_str(), &[&vehicle_id]).await?;
            record.set_id(row.get(0));

            let update = format!(
                "UPDATE {}.{} SET data = $2 WHERE id = $1",
                schema::SCHEMA,
                T::COLLECTION
            );
            let id = record.id();
            let data = serde_json::to_value(&*record)?;
            let affected = tx.execute(update.as_str(), &[&id, &data]).await?;
            tx.commit().await?;
            Ok(affected > 0)
        } else {
            let update = format!(
                "UPDATE {}.{} SET data = $2 WHERE id = $1",
                schema::SCHEMA,
                T::COLLECTION
            );
            let id = record.id();
            let data = serde_json::to_value(&*record)?;
            let affected = client.execute(update.as_str(), &[&id, &data]).await?;
            Ok(affected > 0)
        }
    }

    async fn try_delete_by_id<T: Document>(&self, id: i32) -> Result<bool> {
        let client = self.client().await?;
        let sql = format!(
            "DELETE FROM {}.{} WHERE id = $1",
            schema::SCHEMA,
            T::COLLECTION
        );
        Ok(client.execute(sql.as_str(), &[&id]).await? > 0)
    }

    async fn try_delete_by_vehicle<T: VehicleRecord>(&self, vehicle_id: i32) -> Result<bool> {
        let client = self.client().await?;
        let sql = format!(
            "DELETE FROM {}.{} WHERE vehicleId = $1",
            schema::SCHEMA,
            T::COLLECTION
        );
        Ok(client.execute(sql.as_str(), &[&vehicle_id]).await? > 0)
    }

    // ----- vehicle operations ----------------------------------------------

    async fn try_get_vehicles(&self) -> Result<Vec<Vehicle>> {
        let client = self.client().await?;
        let sql = format!(
            "SELECT data FROM {}.vehicles ORDER BY id ASC",
            schema::SCHEMA
        );
        let rows = client.query(sql.as_str(), &[]).await?;
        let mut results = Vec::with_capacity(rows.len());
        for row in rows {
            let data: serde_json::Value = row.get(0);
            results.push(serde_json::from_value(data)?);
        }
        Ok(results)
    }

    async fn try_save_vehicle(&self, vehicle: &mut Vehicle) -> Result<bool> {
        vehicle.apply_image_default();
        let mut client = self.client().await?;
        if vehicle.id == 0 {
            let tx = client.transaction().await?;
            let insert = format!(
                "INSERT INTO {}.vehicles (data) VALUES ('{{}}'::jsonb) RETURNING id",
                schema::SCHEMA
            );
            let row = tx.query_one(insert.as_str(), &[]).await?;
            vehicle.id = row.get(0);

            let update = format!(
                "UPDATE {}.vehicles SET data = $2 WHERE id = $1",
                schema::SCHEMA
            );
            let data = serde_json::to_value(&*vehicle)?;
            let affected = tx.execute(update.as_str(), &[&vehicle.id, &data]).await?;
            tx.commit().await?;
            Ok(affected > 0)
        } else {
            let update = format!(
                "UPDATE {}.vehicles SET data = $2 WHERE id = $1",
                schema::SCHEMA
            );
            let data = serde_json::to_value(&*vehicle)?;
            let affected = client
                .execute(update.as_str(), &[&vehicle.id, &data])
                .await?;
            Ok(affected > 0)
        }
    }

    // ----- flat user/token operations --------------------------------------

    fn user_from_row(row: &tokio_postgres::Row) -> UserData {
        UserData {
            id: row.get(0),
            user_name: row.get(1),
            email_address: row.get(2),
            password: row.get(3),
            is_admin: row.get::<_, Option<bool>>(4).unwrap_or(false),
        }
    }

    async fn try_query_users(&self, filter: &str, param: Option<&str>) -> Result<Vec<UserData>> {
        let client = self.client().await?;
        let sql = format!(
            "SELECT id, username, emailaddress, password, isadmin FROM {}.userrecords{filter}",
            schema::SCHEMA
        );
        let rows = match param {
            Some(p) => client.query(sql.as_str(), &[&p]).await?,
            None => client.query(sql.as_str(), &[]).await?,
        };
        Ok(rows.iter().map(Self::user_from_row).collect())
    }

    async fn try_get_user_by_id(&self, user_id: i32) -> Result<UserData> {
        let client = self.client().await?;
        let sql = format!(
            "SELECT id, username, emailaddress, password, isadmin \
             FROM {}.userrecords WHERE id = $1",
            schema::SCHEMA
        );
        let rows = client.query(sql.as_str(), &[&user_id]).await?;
        Ok(rows.first().map(Self::user_from_row).unwrap_or_default())
    }

    /// Flat rows have no self-referential payload, so a single insert with
    /// `RETURNING id` suffices; no second write is needed.
    async fn try_save_user(&self, user: &mut UserData) -> Result<bool> {
        let client = self.client().await?;
        if user.id == 0 {
            let sql = format!(
                "INSERT INTO {}.userrecords (username, emailaddress, password, isadmin) \
                 VALUES ($1, $2, $3, $4) RETURNING id",
                schema::SCHEMA
            );
            let row = client
                .query_one(
                    sql.as_str(),
                    &[
                        &user.user_name,
                        &user.email_address,
                        &user.password,
                        &user.is_admin,
                    ],
                )
                .await?;
            user.id = row.get(0);
            Ok(user.id != 0)
        } else {
            let sql = format!(
                "UPDATE {}.userrecords SET username = $2, emailaddress = $3, \
                 password = $4, isadmin = $5 WHERE id = $1",
                schema::SCHEMA
            );
            let affected = client
                .execute(
                    sql.as_str(),
                    &[
                        &user.id,
                        &user.user_name,
                        &user.email_address,
                        &user.password,
                        &user.is_admin,
                    ],
                )
                .await?;
            Ok(affected > 0)
        }
    }

    fn token_from_row(row: &tokio_postgres::Row) -> Token {
        Token {
            id: row.get(0),
            body: row.get(1),
            email_address: row.get(2),
        }
    }

    async fn try_get_tokens(&self) -> Result<Vec<Token>> {
        let client = self.client().await?;
        let sql = format!(
            "SELECT id, body, emailaddress FROM {}.tokenrecords",
            schema::SCHEMA
        );
        let rows = client.query(sql.as_str(), &[]).await?;
        Ok(rows.iter().map(Self::token_from_row).collect())
    }

    async fn try_get_token(&self, filter: &str, id: Option<i32>, body: Option<&str>) -> Result<Token> {
        let client = self.client().await?;
        let sql = format!(
            "SELECT id, body, emailaddress FROM {}.tokenrecords{filter}",
            schema::SCHEMA
        );
        let rows = match (id, body) {
            (Some(id), _) => client.query(sql.as_str(), &[&id]).await?,
            (_, Some(body)) => client.query(sql.as_str(), &[&body]).await?,
            _ => Vec::new(),
        };
        Ok(rows.first().map(Self::token_from_row).unwrap_or_default())
    }

    async fn try_save_token(&self, token: &mut Token) -> Result<bool> {
        let client = self.client().await?;
        if token.id == 0 {
            let sql = format!(
                "INSERT INTO {}.tokenrecords (body, emailaddress) \
                 VALUES ($1, $2) RETURNING id",
                schema::SCHEMA
            );
            let row = client
                .query_one(sql.as_str(), &[&token.body, &token.email_address])
                .await?;
            token.id = row.get(0);
            Ok(token.id != 0)
        } else {
            let sql = format!(
                "UPDATE {}.tokenrecords SET body = $2, emailaddress = $3 WHERE id = $1",
                schema::SCHEMA
            );
            let affected = client
                .execute(sql.as_str(), &[&token.id, &token.body, &token.email_address])
                .await?;
            Ok(affected > 0)
        }
    }

    // ----- user config / access --------------------------------------------

    /// Caller-supplied identity, so this is a pure upsert with no two-phase
    /// step.
    async fn try_save_user_config(&self, config: &UserConfigData) -> Result<bool> {
        let client = self.client().await?;
        let sql = format!(
            "INSERT INTO {}.userconfigrecords (id, data) VALUES ($1, $2) \
             ON CONFLICT (id) DO UPDATE SET data = EXCLUDED.data",
            schema::SCHEMA
        );
        let data = serde_json::to_value(config)?;
        Ok(client.execute(sql.as_str(), &[&config.id, &data]).await? > 0)
    }

    fn access_from_row(row: &tokio_postgres::Row) -> UserAccess {
        UserAccess {
            user_id: row.get(0),
            vehicle_id: row.get(1),
        }
    }

    async fn try_query_access(&self, filter: &str, param: Option<i32>) -> Result<Vec<UserAccess>> {
        let client = self.client().await?;
        let sql = format!(
            "SELECT userId, vehicleId FROM {}.useraccessrecords{filter}",
            schema::SCHEMA
        );
        let rows = match param {
            Some(p) => client.query(sql.as_str(), &[&p]).await?,
            None => client.query(sql.as_str(), &[]).await?,
        };
        Ok(rows.iter().map(Self::access_from_row).collect())
    }

    async fn try_execute(&self, sql: String, params: &[&(dyn tokio_postgres::types::ToSql + Sync)]) -> Result<bool> {
        let client = self.client().await?;
        Ok(client.execute(sql.as_str(), params).await? > 0)
    }

    // ----- bulk migration APIs ---------------------------------------------
    //
    // These bypass the single-row repository contract for full-dataset
    // throughput. They return `Result` so the orchestrator can convert a
    // failure into its own user-safe response.

    /// Raw projection of every document in a collection.
    pub async fn fetch_documents<T: Document>(&self) -> Result<Vec<T>> {
        let client = self.client().await?;
        let sql = format!("SELECT data FROM {}.{}", schema::SCHEMA, T::COLLECTION);
        let rows = client.query(sql.as_str(), &[]).await?;
        let mut results = Vec::with_capacity(rows.len());
        for row in rows {
            let data: serde_json::Value = row.get(0);
            results.push(serde_json::from_value(data)?);
        }
        Ok(results)
    }

    pub async fn fetch_users(&self) -> Result<Vec<UserData>> {
        self.try_query_users("", None).await
    }

    pub async fn fetch_tokens(&self) -> Result<Vec<Token>> {
        self.try_get_tokens().await
    }

    pub async fn fetch_access(&self) -> Result<Vec<UserAccess>> {
        self.try_query_access("", None).await
    }

    /// Identity-preserving insert: explicitly supplies the `id` column so
    /// foreign-key references embedded in sibling documents stay valid after
    /// import.
    pub async fn insert_record_with_id<T: VehicleRecord>(&self, record: &T) -> Result<()> {
        let client = self.client().await?;
        let sql = format!(
            "INSERT INTO {}.{} (id, vehicleId, data) VALUES ($1, $2, $3)",
            schema::SCHEMA,
            T::COLLECTION
        );
        let id = record.id();
        let vehicle_id = record.vehicle_id();
        let data = serde_json::to_value(record)?;
        client.execute(sql.as_str(), &[&id, &vehicle_id, &data]).await?;
        Ok(())
    }

    pub async fn insert_vehicle_with_id(&self, vehicle: &Vehicle) -> Result<()> {
        let client = self.client().await?;
        let sql = format!(
            "INSERT INTO {}.vehicles (id, data) VALUES ($1, $2)",
            schema::SCHEMA
        );
        let data = serde_json::to_value(vehicle)?;
        client.execute(sql.as_str(), &[&vehicle.id, &data]).await?;
        Ok(())
    }

    pub async fn insert_user_with_id(&self, user: &UserData) -> Result<()> {
        let client = self.client().await?;
        let sql = format!(
            "INSERT INTO {}.userrecords (id, username, emailaddress, password, isadmin) \
             VALUES ($1, $2, $3, $4, $5)",
            schema::SCHEMA
        );
        client
            .execute(
                sql.as_str(),
                &[
                    &user.id,
                    &user.user_name,
                    &user.email_address,
                    &user.password,
                    &user.is_admin,
                ],
            )
            .await?;
        Ok(())
    }

    pub async fn insert_token_with_id(&self, token: &Token) -> Result<()> {
        let client = self.client().await?;
        let sql = format!(
            "INSERT INTO {}.tokenrecords (id, body, emailaddress) VALUES ($1, $2, $3)",
            schema::SCHEMA
        );
        client
            .execute(
                sql.as_str(),
                &[&token.id, &token.body, &token.email_address],
            )
            .await?;
        Ok(())
    }

    pub async fn insert_user_config(&self, config: &UserConfigData) -> Result<()> {
        self.try_save_user_config(config).await.map(|_| ())
    }

    pub async fn insert_access(&self, access: &UserAccess) -> Result<()> {
        let client = self.client().await?;
        let sql = format!(
            "INSERT INTO {}.useraccessrecords (userId, vehicleId) VALUES ($1, $2)",
            schema::SCHEMA
        );
        client
            .execute(sql.as_str(), &[&access.user_id, &access.vehicle_id])
            .await?;
        Ok(())
    }

    /// Advance every identity sequence past the highest imported id so
    /// subsequent generated inserts do not collide with preserved ids.
    pub async fn reset_identity_sequences(&self) -> Result<()> {
        let client = self.client().await?;
        for table in schema::identity_tables() {
            let sql = format!(
                "SELECT setval(pg_get_serial_sequence('{s}.{t}', 'id'), \
                 COALESCE((SELECT MAX(id) FROM {s}.{t}), 0) + 1, false)",
                s = schema::SCHEMA,
                t = table
            );
            client.execute(sql.as_str(), &[]).await?;
            debug!("reset identity sequence for {table}");
        }
        info!("identity sequences reset");
        Ok(())
    }
}

// ----- repository contract implementations ---------------------------------

#[async_trait]
impl<T: VehicleRecord> RecordStore<T> for PgStore {
    async fn get_by_id(&self, id: i32) -> T {
        swallow(self.try_get_document(id).await, T::COLLECTION, "get_by_id")
    }

    async fn get_all_by_vehicle_id(&self, vehicle_id: i32) -> Vec<T> {
        swallow(
            self.try_get_by_vehicle(vehicle_id).await,
            T::COLLECTION,
            "get_all_by_vehicle_id",
        )
    }

    async fn save(&self, record: &mut T) -> bool {
        swallow(self.try_save_record(record).await, T::COLLECTION, "save")
    }

    async fn delete_by_id(&self, id: i32) -> bool {
        swallow(
            self.try_delete_by_id::<T>(id).await,
            T::COLLECTION,
            "delete_by_id",
        )
    }

    async fn delete_all_by_vehicle_id(&self, vehicle_id: i32) -> bool {
        swallow(
            self.try_delete_by_vehicle::<T>(vehicle_id).await,
            T::COLLECTION,
            "delete_all_by_vehicle_id",
        )
    }
}

#[async_trait]
impl VehicleStore for PgStore {
    async fn get_vehicle_by_id(&self, vehicle_id: i32) -> Vehicle {
        swallow(
            self.try_get_document(vehicle_id).await,
            Vehicle::COLLECTION,
            "get_vehicle_by_id",
        )
    }

    async fn get_vehicles(&self) -> Vec<Vehicle> {
        swallow(self.try_get_vehicles().await, Vehicle::COLLECTION, "get_vehicles")
    }

    async fn save_vehicle(&self, vehicle: &mut Vehicle) -> bool {
        swallow(
            self.try_save_vehicle(vehicle).await,
            Vehicle::COLLECTION,
            "save_vehicle",
        )
    }

    async fn delete_vehicle(&self, vehicle_id: i32) -> bool {
        swallow(
            self.try_delete_by_id::<Vehicle>(vehicle_id).await,
            Vehicle::COLLECTION,
            "delete_vehicle",
        )
    }
}

#[async_trait]
impl UserRecordStore for PgStore {
    async fn get_users(&self) -> Vec<UserData> {
        swallow(
            self.try_query_users("", None).await,
            UserData::COLLECTION,
            "get_users",
        )
    }

    async fn get_user_by_id(&self, user_id: i32) -> UserData {
        swallow(
            self.try_get_user_by_id(user_id).await,
            UserData::COLLECTION,
            "get_user_by_id",
        )
    }

    async fn get_user_by_username(&self, username: &str) -> UserData {
        let result = self
            .try_query_users(" WHERE username = $1", Some(username))
            .await
            .map(|users| users.into_iter().next().unwrap_or_default());
        swallow(result, UserData::COLLECTION, "get_user_by_username")
    }

    async fn get_user_by_email(&self, email: &str) -> UserData {
        let result = self
            .try_query_users(" WHERE emailaddress = $1", Some(email))
            .await
            .map(|users| users.into_iter().next().unwrap_or_default());
        swallow(result, UserData::COLLECTION, "get_user_by_email")
    }

    async fn save_user(&self, user: &mut UserData) -> bool {
        swallow(self.try_save_user(user).await, UserData::COLLECTION, "save_user")
    }

    async fn delete_user(&self, user_id: i32) -> bool {
        let sql = format!("DELETE FROM {}.userrecords WHERE id = $1", schema::SCHEMA);
        swallow(
            self.try_execute(sql, &[&user_id]).await,
            UserData::COLLECTION,
            "delete_user",
        )
    }
}

#[async_trait]
impl TokenRecordStore for PgStore {
    async fn get_tokens(&self) -> Vec<Token> {
        swallow(self.try_get_tokens().await, Token::COLLECTION, "get_tokens")
    }

    async fn get_token_by_id(&self, token_id: i32) -> Token {
        swallow(
            self.try_get_token(" WHERE id = $1", Some(token_id), None).await,
            Token::COLLECTION,
            "get_token_by_id",
        )
    }

    async fn get_token_by_body(&self, body: &str) -> Token {
        swallow(
            self.try_get_token(" WHERE body = $1", None, Some(body)).await,
            Token::COLLECTION,
            "get_token_by_body",
        )
    }

    async fn save_token(&self, token: &mut Token) -> bool {
        swallow(self.try_save_token(token).await, Token::COLLECTION, "save_token")
    }

    async fn delete_token(&self, token_id: i32) -> bool {
        let sql = format!("DELETE FROM {}.tokenrecords WHERE id = $1", schema::SCHEMA);
        swallow(
            self.try_execute(sql, &[&token_id]).await,
            Token::COLLECTION,
            "delete_token",
        )
    }
}

#[async_trait]
impl UserConfigStore for PgStore {
    async fn get_user_config(&self, user_id: i32) -> UserConfigData {
        swallow(
            self.try_get_document(user_id).await,
            UserConfigData::COLLECTION,
            "get_user_config",
        )
    }

    async fn save_user_config(&self, config: &UserConfigData) -> bool {
        swallow(
            self.try_save_user_config(config).await,
            UserConfigData::COLLECTION,
            "save_user_config",
        )
    }

    async fn delete_user_config(&self, user_id: i32) -> bool {
        let sql = format!(
            "DELETE FROM {}.userconfigrecords WHERE id = $1",
            schema::SCHEMA
        );
        swallow(
            self.try_execute(sql, &[&user_id]).await,
            UserConfigData::COLLECTION,
            "delete_user_config",
        )
    }
}

#[async_trait]
impl UserAccessStore for PgStore {
    async fn get_access_by_user(&self, user_id: i32) -> Vec<UserAccess> {
        swallow(
            self.try_query_access(" WHERE userId = $1", Some(user_id)).await,
            UserAccess::COLLECTION,
            "get_access_by_user",
        )
    }

    async fn get_access_by_vehicle(&self, vehicle_id: i32) -> Vec<UserAccess> {
        swallow(
            self.try_query_access(" WHERE vehicleId = $1", Some(vehicle_id))
                .await,
            UserAccess::COLLECTION,
            "get_access_by_vehicle",
        )
    }

    async fn get_all_access(&self) -> Vec<UserAccess> {
        swallow(
            self.try_query_access("", None).await,
            UserAccess::COLLECTION,
            "get_all_access",
        )
    }

    async fn save_access(&self, user_id: i32, vehicle_id: i32) -> bool {
        let sql = format!(
            "INSERT INTO {}.useraccessrecords (userId, vehicleId) VALUES ($1, $2) \
             ON CONFLICT (userId, vehicleId) DO NOTHING",
            schema::SCHEMA
        );
        swallow(
            self.try_execute(sql, &[&user_id, &vehicle_id]).await,
            UserAccess::COLLECTION,
            "save_access",
        )
    }

    async fn delete_access(&self, user_id: i32, vehicle_id: i32) -> bool {
        let sql = format!(
            "DELETE FROM {}.useraccessrecords WHERE userId = $1 AND vehicleId = $2",
            schema::SCHEMA
        );
        swallow(
            self.try_execute(sql, &[&user_id, &vehicle_id]).await,
            UserAccess::COLLECTION,
            "delete_access",
        )
    }

    async fn delete_all_access_by_user(&self, user_id: i32) -> bool {
        let sql = format!(
            "DELETE FROM {}.useraccessrecords WHERE userId = $1",
            schema::SCHEMA
        );
        swallow(
            self.try_execute(sql, &[&user_id]).await,
            UserAccess::COLLECTION,
            "delete_all_access_by_user",
        )
    }

    async fn delete_all_access_by_vehicle(&self, vehicle_id: i32) -> bool {
        let sql = format!(
            "DELETE FROM {}.useraccessrecords WHERE vehicleId = $1",
            schema::SCHEMA
        );
        swallow(
            self.try_execute(sql, &[&vehicle_id]).await,
            UserAccess::COLLECTION,
            "delete_all_access_by_vehicle",
        )
    }
}
