//! Repository contracts shared by both storage engines.
//!
//! The orchestrator and the hosting web layer depend only on these traits,
//! never on a concrete engine type. Every method is total: storage faults are
//! caught inside the implementation, logged, and surfaced as a `false`,
//! default, or empty return. "Not found" is distinguished only by the
//! default (`0`) identity on the returned value.

use crate::entities::{Token, UserAccess, UserConfigData, UserData, Vehicle, VehicleRecord};
use async_trait::async_trait;

/// Convert a storage fault into the contract's degraded return value,
/// logging the underlying error. No operation may propagate an error past
/// this boundary.
pub(crate) fn swallow<T: Default>(result: crate::error::Result<T>, collection: &str, op: &str) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            tracing::error!("{collection}.{op} failed: {e}");
            T::default()
        }
    }
}

/// Uniform contract for the eleven vehicle-scoped document kinds.
///
/// `save` is an upsert keyed on `record.id() == 0`: an unset identity
/// triggers the two-phase generated-id insert and writes the assigned
/// identity back into the record; a set identity performs a single document
/// update.
#[async_trait]
pub trait RecordStore<T: VehicleRecord>: Send + Sync {
    async fn get_by_id(&self, id: i32) -> T;

    async fn get_all_by_vehicle_id(&self, vehicle_id: i32) -> Vec<T>;

    async fn save(&self, record: &mut T) -> bool;

    async fn delete_by_id(&self, id: i32) -> bool;

    async fn delete_all_by_vehicle_id(&self, vehicle_id: i32) -> bool;
}

/// Contract for the root vehicle collection.
#[async_trait]
pub trait VehicleStore: Send + Sync {
    async fn get_vehicle_by_id(&self, vehicle_id: i32) -> Vehicle;

    async fn get_vehicles(&self) -> Vec<Vehicle>;

    /// Upsert; applies the sentinel image path before persistence.
    async fn save_vehicle(&self, vehicle: &mut Vehicle) -> bool;

    async fn delete_vehicle(&self, vehicle_id: i32) -> bool;
}

/// Contract for the flat user table. Single-phase insert with returned
/// generated id; the scoped lookups are consumed by the web layer's auth
/// flows.
#[async_trait]
pub trait UserRecordStore: Send + Sync {
    async fn get_users(&self) -> Vec<UserData>;

    async fn get_user_by_id(&self, user_id: i32) -> UserData;

    async fn get_user_by_username(&self, username: &str) -> UserData;

    async fn get_user_by_email(&self, email: &str) -> UserData;

    async fn save_user(&self, user: &mut UserData) -> bool;

    async fn delete_user(&self, user_id: i32) -> bool;
}

/// Contract for the flat token table.
#[async_trait]
pub trait TokenRecordStore: Send + Sync {
    async fn get_tokens(&self) -> Vec<Token>;

    async fn get_token_by_id(&self, token_id: i32) -> Token;

    async fn get_token_by_body(&self, body: &str) -> Token;

    async fn save_token(&self, token: &mut Token) -> bool;

    async fn delete_token(&self, token_id: i32) -> bool;
}

/// Contract for the singleton-keyed user configuration document. The
/// identity is caller-supplied, so `save` is a pure upsert with no two-phase
/// step.
#[async_trait]
pub trait UserConfigStore: Send + Sync {
    async fn get_user_config(&self, user_id: i32) -> UserConfigData;

    async fn save_user_config(&self, config: &UserConfigData) -> bool;

    async fn delete_user_config(&self, user_id: i32) -> bool;
}

/// Contract for the user/vehicle association. Composite key, no surrogate
/// id, no payload.
#[async_trait]
pub trait UserAccessStore: Send + Sync {
    async fn get_access_by_user(&self, user_id: i32) -> Vec<UserAccess>;

    async fn get_access_by_vehicle(&self, vehicle_id: i32) -> Vec<UserAccess>;

    async fn get_all_access(&self) -> Vec<UserAccess>;

    async fn save_access(&self, user_id: i32, vehicle_id: i32) -> bool;

    async fn delete_access(&self, user_id: i32, vehicle_id: i32) -> bool;

    async fn delete_all_access_by_user(&self, user_id: i32) -> bool;

    async fn delete_all_access_by_vehicle(&self, vehicle_id: i32) -> bool;
}
