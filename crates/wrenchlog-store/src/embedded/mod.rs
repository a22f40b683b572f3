//! Embedded single-file document store adapter (SQLite-backed).
//!
//! The store is one file holding sixteen named collections. Document kinds
//! live in `{id, [vehicleId,] data}` tables with the payload serialized as
//! JSON text; the flat user/token kinds keep explicit scalar columns; the
//! join collection keeps its composite key.
//!
//! A fresh connection is opened per logical operation and every collection
//! is created on first touch, so the store file can be handed around as an
//! opaque artifact with no separate bootstrap step.

use crate::entities::{
    Document, Token, UserAccess, UserConfigData, UserData, Vehicle, VehicleRecord,
};
use crate::error::Result;
use crate::repository::{
    swallow, RecordStore, TokenRecordStore, UserAccessStore, UserConfigStore, UserRecordStore,
    VehicleStore,
};
use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::{Path, PathBuf};

/// File-backed document store implementing every repository contract.
pub struct EmbeddedStore {
    path: PathBuf,
}

impl EmbeddedStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the single store file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn open(&self) -> Result<Connection> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        Ok(Connection::open(&self.path)?)
    }

    /// Create every collection up front, the document-engine equivalent of
    /// the relational schema bootstrap. Run before an export so even an
    /// empty dataset produces a complete store file.
    pub fn ensure_collections(&self) -> Result<()> {
        let conn = self.open()?;
        Self::ensure_document_table(&conn, Vehicle::COLLECTION, false)?;
        for table in crate::schema::SCOPED_TABLES {
            Self::ensure_document_table(&conn, table, true)?;
        }
        Self::ensure_user_table(&conn)?;
        Self::ensure_token_table(&conn)?;
        Self::ensure_config_table(&conn)?;
        Self::ensure_access_table(&conn)?;
        Ok(())
    }

    fn ensure_document_table(conn: &Connection, name: &str, scoped: bool) -> rusqlite::Result<()> {
        let ddl = if scoped {
            format!(
                "CREATE TABLE IF NOT EXISTS {name} \
                 (id INTEGER PRIMARY KEY AUTOINCREMENT, \
                  vehicleId INTEGER NOT NULL, data TEXT NOT NULL)"
            )
        } else {
            format!(
                "CREATE TABLE IF NOT EXISTS {name} \
                 (id INTEGER PRIMARY KEY AUTOINCREMENT, data TEXT NOT NULL)"
            )
        };
        conn.execute_batch(&ddl)
    }

    fn ensure_config_table(conn: &Connection) -> rusqlite::Result<()> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS userconfigrecords \
             (id INTEGER PRIMARY KEY, data TEXT NOT NULL)",
        )
    }

    fn ensure_user_table(conn: &Connection) -> rusqlite::Result<()> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS userrecords \
             (id INTEGER PRIMARY KEY AUTOINCREMENT, username TEXT NOT NULL, \
              emailaddress TEXT NOT NULL, password TEXT NOT NULL, isadmin INTEGER)",
        )
    }

    fn ensure_token_table(conn: &Connection) -> rusqlite::Result<()> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS tokenrecords \
             (id INTEGER PRIMARY KEY AUTOINCREMENT, body TEXT NOT NULL, \
              emailaddress TEXT NOT NULL)",
        )
    }

    fn ensure_access_table(conn: &Connection) -> rusqlite::Result<()> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS useraccessrecords \
             (userId INTEGER, vehicleId INTEGER, PRIMARY KEY(userId, vehicleId))",
        )
    }

    // ----- generic document operations -------------------------------------

    fn try_get_document<T: Document>(&self, id: i32, scoped: bool) -> Result<T> {
        let conn = self.open()?;
        Self::ensure_document_table(&conn, T::COLLECTION, scoped)?;
        let sql = format!("SELECT data FROM {} WHERE id = ?1", T::COLLECTION);
        let data: Option<String> = conn
            .query_row(&sql, params![id], |row| row.get(0))
            .optional()?;
        match data {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(T::default()),
        }
    }

    fn try_get_by_vehicle<T: VehicleRecord>(&self, vehicle_id: i32) -> Result<Vec<T>> {
        let conn = self.open()?;
        Self::ensure_document_table(&conn, T::COLLECTION, true)?;
        let sql = format!("SELECT data FROM {} WHERE vehicleId = ?1", T::COLLECTION);
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(params![vehicle_id], |row| row.get::<_, String>(0))?;
        let mut results = Vec::new();
        for json in rows {
            results.push(serde_json::from_str(&json?)?);
        }
        Ok(results)
    }

    /// Same two-phase shape as the relational adapter: placeholder insert to
    /// obtain the generated rowid, then materialize the identity-aware
    /// payload. Both steps commit atomically.
    fn try_save_record<T: VehicleRecord>(&self, record: &mut T) -> Result<bool> {
        let mut conn = self.open()?;
        Self::ensure_document_table(&conn, T::COLLECTION, true)?;
        if record.id() == 0 {
            let tx = conn.transaction()?;
            let insert = format!(
                "INSERT INTO {} (vehicleId, data) VALUES (?1, '{{}}')",
                T::COLLECTION
            );
            tx.execute(&insert, params![record.vehicle_id()])?;
            record.set_id(tx.last_insert_rowid() as i32);

            let update = format!("UPDATE {} SET data = ?2 WHERE id = ?1", T::COLLECTION);
            let data = serde_json::to_string(&*record)?;
            let affected = tx.execute(&update, params![record.id(), data])?;
            tx.commit()?;
            Ok(affected > 0)
        } else {
            let update = format!("UPDATE {} SET data = ?2 WHERE id = ?1", T::COLLECTION);
            let data = serde_json::to_string(&*record)?;
            Ok(conn.execute(&update, params![record.id(), data])? > 0)
        }
    }

    fn try_delete_by_id<T: Document>(&self, id: i32, scoped: bool) -> Result<bool> {
        let conn = self.open()?;
        Self::ensure_document_table(&conn, T::COLLECTION, scoped)?;
        let sql = format!("DELETE FROM {} WHERE id = ?1", T::COLLECTION);
        Ok(conn.execute(&sql, params![id])? > 0)
    }

    fn try_delete_by_vehicle<T: VehicleRecord>(&self, vehicle_id: i32) -> Result<bool> {
        let conn = self.open()?;
        Self::ensure_document_table(&conn, T::COLLECTION, true)?;
        let sql = format!("DELETE FROM {} WHERE vehicleId = ?1", T::COLLECTION);
        Ok(conn.execute(&sql, params![vehicle_id])? > 0)
    }

    // ----- vehicle operations ----------------------------------------------

    fn try_get_vehicles(&self) -> Result<Vec<Vehicle>> {
        let conn = self.open()?;
        Self::ensure_document_table(&conn, Vehicle::COLLECTION, false)?;
        let mut stmt = conn.prepare("SELECT data FROM vehicles ORDER BY id ASC")?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
        let mut results = Vec::new();
        for json in rows {
            results.push(serde_json::from_str(&json?)?);
        }
        Ok(results)
    }

    fn try_save_vehicle(&self, vehicle: &mut Vehicle) -> Result<bool> {
        vehicle.apply_image_default();
        let mut conn = self.open()?;
        Self::ensure_document_table(&conn, Vehicle::COLLECTION, false)?;
        if vehicle.id == 0 {
            let tx = conn.transaction()?;
            tx.execute("INSERT INTO vehicles (data) VALUES ('{}')", [])?;
            vehicle.id = tx.last_insert_rowid() as i32;
            let data = serde_json::to_string(&*vehicle)?;
            let affected = tx.execute(
                "UPDATE vehicles SET data = ?2 WHERE id = ?1",
                params![vehicle.id, data],
            )?;
            tx.commit()?;
            Ok(affected > 0)
        } else {
            let data = serde_json::to_string(&*vehicle)?;
            Ok(conn.execute(
                "UPDATE vehicles SET data = ?2 WHERE id = ?1",
                params![vehicle.id, data],
            )? > 0)
        }
    }

    // ----- flat user/token operations --------------------------------------

    fn user_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<UserData> {
        Ok(UserData {
            id: row.get(0)?,
            user_name: row.get(1)?,
            email_address: row.get(2)?,
            password: row.get(3)?,
            is_admin: row.get::<_, Option<bool>>(4)?.unwrap_or(false),
        })
    }

    fn try_query_users(&self, filter: &str, param: Option<&str>) -> Result<Vec<UserData>> {
        let conn = self.open()?;
        Self::ensure_user_table(&conn)?;
        let sql = format!(
            "SELECT id, username, emailaddress, password, isadmin FROM userrecords{filter}"
        );
        let mut stmt = conn.prepare(&sql)?;
        let mut results = Vec::new();
        match param {
            Some(p) => {
                let rows = stmt.query_map(params![p], Self::user_from_row)?;
                for user in rows {
                    results.push(user?);
                }
            }
            None => {
                let rows = stmt.query_map([], Self::user_from_row)?;
                for user in rows {
                    results.push(user?);
                }
            }
        }
        Ok(results)
    }

    fn try_get_user_by_id(&self, user_id: i32) -> Result<UserData> {
        let conn = self.open()?;
        Self::ensure_user_table(&conn)?;
        let user = conn
            .query_row(
                "SELECT id, username, emailaddress, password, isadmin \
                 FROM userrecords WHERE id = ?1",
                params![user_id],
                Self::user_from_row,
            )
            .optional()?;
        Ok(user.unwrap_or_default())
    }

    fn try_save_user(&self, user: &mut UserData) -> Result<bool> {
        let conn = self.open()?;
        Self::ensure_user_table(&conn)?;
        if user.id == 0 {
            conn.execute(
                "INSERT INTO userrecords (username, emailaddress, password, isadmin) \
                 VALUES (?1, ?2, ?3, ?4)",
                params![user.user_name, user.email_address, user.password, user.is_admin],
            )?;
            user.id = conn.last_insert_rowid() as i32;
            Ok(user.id != 0)
        } else {
            let affected = conn.execute(
                "UPDATE userrecords SET username = ?2, emailaddress = ?3, \
                 password = ?4, isadmin = ?5 WHERE id = ?1",
                params![
                    user.id,
                    user.user_name,
                    user.email_address,
                    user.password,
                    user.is_admin
                ],
            )?;
            Ok(affected > 0)
        }
    }

    fn token_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Token> {
        Ok(Token {
            id: row.get(0)?,
            body: row.get(1)?,
            email_address: row.get(2)?,
        })
    }

    fn try_get_tokens(&self) -> Result<Vec<Token>> {
        let conn = self.open()?;
        Self::ensure_token_table(&conn)?;
        let mut stmt = conn.prepare("SELECT id, body, emailaddress FROM tokenrecords")?;
        let rows = stmt.query_map([], Self::token_from_row)?;
        let mut results = Vec::new();
        for token in rows {
            results.push(token?);
        }
        Ok(results)
    }

    fn try_save_token(&self, token: &mut Token) -> Result<bool> {
        let conn = self.open()?;
        Self::ensure_token_table(&conn)?;
        if token.id == 0 {
            conn.execute(
                "INSERT INTO tokenrecords (body, emailaddress) VALUES (?1, ?2)",
                params![token.body, token.email_address],
            )?;
            token.id = conn.last_insert_rowid() as i32;
            Ok(token.id != 0)
        } else {
            let affected = conn.execute(
                "UPDATE tokenrecords SET body = ?2, emailaddress = ?3 WHERE id = ?1",
                params![token.id, token.body, token.email_address],
            )?;
            Ok(affected > 0)
        }
    }

    // ----- user config / access --------------------------------------------

    fn try_get_user_config(&self, user_id: i32) -> Result<UserConfigData> {
        let conn = self.open()?;
        Self::ensure_config_table(&conn)?;
        let data: Option<String> = conn
            .query_row(
                "SELECT data FROM userconfigrecords WHERE id = ?1",
                params![user_id],
                |row| row.get(0),
            )
            .optional()?;
        match data {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(UserConfigData::default()),
        }
    }

    fn try_save_user_config(&self, config: &UserConfigData) -> Result<bool> {
        let conn = self.open()?;
        Self::ensure_config_table(&conn)?;
        let data = serde_json::to_string(config)?;
        let affected = conn.execute(
            "INSERT INTO userconfigrecords (id, data) VALUES (?1, ?2) \
             ON CONFLICT(id) DO UPDATE SET data = excluded.data",
            params![config.id, data],
        )?;
        Ok(affected > 0)
    }

    fn access_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<UserAccess> {
        Ok(UserAccess {
            user_id: row.get(0)?,
            vehicle_id: row.get(1)?,
        })
    }

    fn try_query_access(&self, filter: &str, param: Option<i32>) -> Result<Vec<UserAccess>> {
        let conn = self.open()?;
        Self::ensure_access_table(&conn)?;
        let sql = format!("SELECT userId, vehicleId FROM useraccessrecords{filter}");
        let mut stmt = conn.prepare(&sql)?;
        let mut results = Vec::new();
        match param {
            Some(p) => {
                let rows = stmt.query_map(params![p], Self::access_from_row)?;
                for access in rows {
                    results.push(access?);
                }
            }
            None => {
                let rows = stmt.query_map([], Self::access_from_row)?;
                for access in rows {
                    results.push(access?);
                }
            }
        }
        Ok(results)
    }

    fn try_execute(&self, sql: &str, params: &[&dyn rusqlite::ToSql]) -> Result<bool> {
        let conn = self.open()?;
        Self::ensure_access_table(&conn)?;
        Self::ensure_user_table(&conn)?;
        Self::ensure_token_table(&conn)?;
        Self::ensure_config_table(&conn)?;
        Ok(conn.execute(sql, params)? > 0)
    }

    // ----- bulk migration APIs ---------------------------------------------
    //
    // Identity-preserving upserts and raw collection scans used by the
    // migration orchestrator; these bypass the single-row contract.

    pub async fn fetch_documents<T: Document>(&self, scoped: bool) -> Result<Vec<T>> {
        let conn = self.open()?;
        Self::ensure_document_table(&conn, T::COLLECTION, scoped)?;
        let sql = format!("SELECT data FROM {}", T::COLLECTION);
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
        let mut results = Vec::new();
        for json in rows {
            results.push(serde_json::from_str(&json?)?);
        }
        Ok(results)
    }

    pub async fn fetch_users(&self) -> Result<Vec<UserData>> {
        self.try_query_users("", None)
    }

    pub async fn fetch_user_configs(&self) -> Result<Vec<UserConfigData>> {
        let conn = self.open()?;
        Self::ensure_config_table(&conn)?;
        let mut stmt = conn.prepare("SELECT data FROM userconfigrecords")?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
        let mut results = Vec::new();
        for json in rows {
            results.push(serde_json::from_str(&json?)?);
        }
        Ok(results)
    }

    pub async fn fetch_tokens(&self) -> Result<Vec<Token>> {
        self.try_get_tokens()
    }

    pub async fn fetch_access(&self) -> Result<Vec<UserAccess>> {
        self.try_query_access("", None)
    }

    pub async fn upsert_document<T: VehicleRecord>(&self, record: &T) -> Result<()> {
        let conn = self.open()?;
        Self::ensure_document_table(&conn, T::COLLECTION, true)?;
        let sql = format!(
            "INSERT INTO {} (id, vehicleId, data) VALUES (?1, ?2, ?3) \
             ON CONFLICT(id) DO UPDATE SET vehicleId = excluded.vehicleId, \
             data = excluded.data",
            T::COLLECTION
        );
        let data = serde_json::to_string(record)?;
        conn.execute(&sql, params![record.id(), record.vehicle_id(), data])?;
        Ok(())
    }

    pub async fn upsert_vehicle(&self, vehicle: &Vehicle) -> Result<()> {
        let conn = self.open()?;
        Self::ensure_document_table(&conn, Vehicle::COLLECTION, false)?;
        let data = serde_json::to_string(vehicle)?;
        conn.execute(
            "INSERT INTO vehicles (id, data) VALUES (?1, ?2) \
             ON CONFLICT(id) DO UPDATE SET data = excluded.data",
            params![vehicle.id, data],
        )?;
        Ok(())
    }

    pub async fn upsert_user(&self, user: &UserData) -> Result<()> {
        let conn = self.open()?;
        Self::ensure_user_table(&conn)?;
        conn.execute(
            "INSERT INTO userrecords (id, username, emailaddress, password, isadmin) \
             VALUES (?1, ?2, ?3, ?4, ?5) \
             ON CONFLICT(id) DO UPDATE SET username = excluded.username, \
             emailaddress = excluded.emailaddress, password = excluded.password, \
             isadmin = excluded.isadmin",
            params![
                user.id,
                user.user_name,
                user.email_address,
                user.password,
                user.is_admin
            ],
        )?;
        Ok(())
    }

    pub async fn upsert_token(&self, token: &Token) -> Result<()> {
        let conn = self.open()?;
        Self::ensure_token_table(&conn)?;
        conn.execute(
            "INSERT INTO tokenrecords (id, body, emailaddress) VALUES (?1, ?2, ?3) \
             ON CONFLICT(id) DO UPDATE SET body = excluded.body, \
             emailaddress = excluded.emailaddress",
            params![token.id, token.body, token.email_address],
        )?;
        Ok(())
    }

    pub async fn upsert_user_config(&self, config: &UserConfigData) -> Result<()> {
        self.try_save_user_config(config).map(|_| ())
    }

    pub async fn upsert_access(&self, access: &UserAccess) -> Result<()> {
        let conn = self.open()?;
        Self::ensure_access_table(&conn)?;
        conn.execute(
            "INSERT INTO useraccessrecords (userId, vehicleId) VALUES (?1, ?2) \
             ON CONFLICT(userId, vehicleId) DO NOTHING",
            params![access.user_id, access.vehicle_id],
        )?;
        Ok(())
    }
}

// ----- repository contract implementations ---------------------------------

#[async_trait]
impl<T: VehicleRecord> RecordStore<T> for EmbeddedStore {
    async fn get_by_id(&self, id: i32) -> T {
        swallow(self.try_get_document(id, true), T::COLLECTION, "get_by_id")
    }

    async fn get_all_by_vehicle_id(&self, vehicle_id: i32) -> Vec<T> {
        swallow(
            self.try_get_by_vehicle(vehicle_id),
            T::COLLECTION,
            "get_all_by_vehicle_id",
        )
    }

    async fn save(&self, record: &mut T) -> bool {
        swallow(self.try_save_record(record), T::COLLECTION, "save")
    }

    async fn delete_by_id(&self, id: i32) -> bool {
        swallow(
            self.try_delete_by_id::<T>(id, true),
            T::COLLECTION,
            "delete_by_id",
        )
    }

    async fn delete_all_by_vehicle_id(&self, vehicle_id: i32) -> bool {
        swallow(
            self.try_delete_by_vehicle::<T>(vehicle_id),
            T::COLLECTION,
            "delete_all_by_vehicle_id",
        )
    }
}

#[async_trait]
impl VehicleStore for EmbeddedStore {
    async fn get_vehicle_by_id(&self, vehicle_id: i32) -> Vehicle {
        swallow(
            self.try_get_document(vehicle_id, false),
            Vehicle::COLLECTION,
            "get_vehicle_by_id",
        )
    }

    async fn get_vehicles(&self) -> Vec<Vehicle> {
        swallow(self.try_get_vehicles(), Vehicle::COLLECTION, "get_vehicles")
    }

    async fn save_vehicle(&self, vehicle: &mut Vehicle) -> bool {
        swallow(self.try_save_vehicle(vehicle), Vehicle::COLLECTION, "save_vehicle")
    }

    async fn delete_vehicle(&self, vehicle_id: i32) -> bool {
        swallow(
            self.try_delete_by_id::<Vehicle>(vehicle_id, false),
            Vehicle::COLLECTION,
            "delete_vehicle",
        )
    }
}

#[async_trait]
impl UserRecordStore for EmbeddedStore {
    async fn get_users(&self) -> Vec<UserData> {
        swallow(self.try_query_users("", None), UserData::COLLECTION, "get_users")
    }

    async fn get_user_by_id(&self, user_id: i32) -> UserData {
        swallow(
            self.try_get_user_by_id(user_id),
            UserData::COLLECTION,
            "get_user_by_id",
        )
    }

    async fn get_user_by_username(&self, username: &str) -> UserData {
        let result = self
            .try_query_users(" WHERE username = ?1", Some(username))
            .map(|users| users.into_iter().next().unwrap_or_default());
        swallow(result, UserData::COLLECTION, "get_user_by_username")
    }

    async fn get_user_by_email(&self, email: &str) -> UserData {
        let result = self
            .try_query_users(" WHERE emailaddress = ?1", Some(email))
            .map(|users| users.into_iter().next().unwrap_or_default());
        swallow(result, UserData::COLLECTION, "get_user_by_email")
    }

    async fn save_user(&self, user: &mut UserData) -> bool {
        swallow(self.try_save_user(user), UserData::COLLECTION, "save_user")
    }

    async fn delete_user(&self, user_id: i32) -> bool {
        swallow(
            self.try_execute("DELETE FROM userrecords WHERE id = ?1", &[&user_id]),
            UserData::COLLECTION,
            "delete_user",
        )
    }
}

#[async_trait]
impl TokenRecordStore for EmbeddedStore {
    async fn get_tokens(&self) -> Vec<Token> {
        swallow(self.try_get_tokens(), Token::COLLECTION, "get_tokens")
    }

    async fn get_token_by_id(&self, token_id: i32) -> Token {
        let result = (|| -> Result<Token> {
            let conn = self.open()?;
            Self::ensure_token_table(&conn)?;
            let token = conn
                .query_row(
                    "SELECT id, body, emailaddress FROM tokenrecords WHERE id = ?1",
                    params![token_id],
                    Self::token_from_row,
                )
                .optional()?;
            Ok(token.unwrap_or_default())
        })();
        swallow(result, Token::COLLECTION, "get_token_by_id")
    }

    async fn get_token_by_body(&self, body: &str) -> Token {
        let result = (|| -> Result<Token> {
            let conn = self.open()?;
            Self::ensure_token_table(&conn)?;
            let token = conn
                .query_row(
                    "SELECT id, body, emailaddress FROM tokenrecords WHERE body = ?1",
                    params![body],
                    Self::token_from_row,
                )
                .optional()?;
            Ok(token.unwrap_or_default())
        })();
        swallow(result, Token::COLLECTION, "get_token_by_body")
    }

    async fn save_token(&self, token: &mut Token) -> bool {
        swallow(self.try_save_token(token), Token::COLLECTION, "save_token")
    }

    async fn delete_token(&self, token_id: i32) -> bool {
        swallow(
            self.try_execute("DELETE FROM tokenrecords WHERE id = ?1", &[&token_id]),
            Token::COLLECTION,
            "delete_token",
        )
    }
}

#[async_trait]
impl UserConfigStore for EmbeddedStore {
    async fn get_user_config(&self, user_id: i32) -> UserConfigData {
        swallow(
            self.try_get_user_config(user_id),
            UserConfigData::COLLECTION,
            "get_user_config",
        )
    }

    async fn save_user_config(&self, config: &UserConfigData) -> bool {
        swallow(
            self.try_save_user_config(config),
            UserConfigData::COLLECTION,
            "save_user_config",
        )
    }

    async fn delete_user_config(&self, user_id: i32) -> bool {
        swallow(
            self.try_execute("DELETE FROM userconfigrecords WHERE id = ?1", &[&user_id]),
            UserConfigData::COLLECTION,
            "delete_user_config",
        )
    }
}

#[async_trait]
impl UserAccessStore for EmbeddedStore {
    async fn get_access_by_user(&self, user_id: i32) -> Vec<UserAccess> {
        swallow(
            self.try_query_access(" WHERE userId = ?1", Some(user_id)),
            UserAccess::COLLECTION,
            "get_access_by_user",
        )
    }

    async fn get_access_by_vehicle(&self, vehicle_id: i32) -> Vec<UserAccess> {
        swallow(
            self.try_query_access(" WHERE vehicleId = ?1", Some(vehicle_id)),
            UserAccess::COLLECTION,
            "get_access_by_vehicle",
        )
    }

    async fn get_all_access(&self) -> Vec<UserAccess> {
        swallow(
            self.try_query_access("", None),
            UserAccess::COLLECTION,
            "get_all_access",
        )
    }

    async fn save_access(&self, user_id: i32, vehicle_id: i32) -> bool {
        swallow(
            self.try_execute(
                "INSERT INTO useraccessrecords (userId, vehicleId) VALUES (?1, ?2) \
                 ON CONFLICT(userId, vehicleId) DO NOTHING",
                &[&user_id, &vehicle_id],
            ),
            UserAccess::COLLECTION,
            "save_access",
        )
    }

    async fn delete_access(&self, user_id: i32, vehicle_id: i32) -> bool {
        swallow(
            self.try_execute(
                "DELETE FROM useraccessrecords WHERE userId = ?1 AND vehicleId = ?2",
                &[&user_id, &vehicle_id],
            ),
            UserAccess::COLLECTION,
            "delete_access",
        )
    }

    async fn delete_all_access_by_user(&self, user_id: i32) -> bool {
        swallow(
            self.try_execute(
                "DELETE FROM useraccessrecords WHERE userId = ?1",
                &[&user_id],
            ),
            UserAccess::COLLECTION,
            "delete_all_access_by_user",
        )
    }

    async fn delete_all_access_by_vehicle(&self, vehicle_id: i32) -> bool {
        swallow(
            self.try_execute(
                "DELETE FROM useraccessrecords WHERE vehicleId = ?1",
                &[&vehicle_id],
            ),
            UserAccess::COLLECTION,
            "delete_all_access_by_vehicle",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_collections_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = EmbeddedStore::new(dir.path().join("wrenchlog.db"));
        store.ensure_collections().unwrap();
        store.ensure_collections().unwrap();
        assert!(store.path().exists());

        let conn = store.open().unwrap();
        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' \
                 AND name NOT LIKE 'sqlite_%'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 16);
    }

    #[test]
    fn store_file_is_created_under_missing_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let store = EmbeddedStore::new(dir.path().join("deep/nested/wrenchlog.db"));
        store.ensure_collections().unwrap();
        assert!(store.path().exists());
    }
}
