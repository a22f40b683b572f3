//! Entity types for the sixteen record collections.
//!
//! Every document-shaped entity serializes with PascalCase field names so the
//! JSON payloads stay compatible with datasets produced by earlier releases.
//! Identity fields use `0` as the "unset" sentinel; the store assigns a
//! generated identity on first successful insert.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Sentinel image path applied to vehicles persisted without an image.
pub const DEFAULT_VEHICLE_IMAGE: &str = "/defaults/noimage.png";

/// A self-contained JSON-serializable entity stored as a single document.
pub trait Document:
    Serialize + DeserializeOwned + Default + Clone + Send + Sync + 'static
{
    /// Collection (table) name, shared verbatim between both engines.
    const COLLECTION: &'static str;

    /// Surrogate identity; `0` means not yet persisted.
    fn id(&self) -> i32;

    /// Write the engine-generated identity back into the document.
    fn set_id(&mut self, id: i32);
}

/// A document partitioned by a `VehicleId` foreign key.
pub trait VehicleRecord: Document {
    fn vehicle_id(&self) -> i32;
}

macro_rules! impl_document {
    ($ty:ty, $collection:literal) => {
        impl Document for $ty {
            const COLLECTION: &'static str = $collection;
            fn id(&self) -> i32 {
                self.id
            }
            fn set_id(&mut self, id: i32) {
                self.id = id;
            }
        }
    };
}

macro_rules! impl_vehicle_record {
    ($ty:ty, $collection:literal) => {
        impl_document!($ty, $collection);
        impl VehicleRecord for $ty {
            fn vehicle_id(&self) -> i32 {
                self.vehicle_id
            }
        }
    };
}

/// Root record: one vehicle being tracked.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Vehicle {
    pub id: i32,
    pub year: i32,
    pub make: String,
    pub model: String,
    pub license_plate: String,
    pub image_location: String,
    pub is_electric: bool,
    pub tags: Vec<String>,
}

impl_document!(Vehicle, "vehicles");

impl Vehicle {
    /// Apply the sentinel image path when none was supplied.
    pub fn apply_image_default(&mut self) {
        if self.image_location.trim().is_empty() {
            self.image_location = DEFAULT_VEHICLE_IMAGE.to_string();
        }
    }
}

/// Accident / collision repair record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct CollisionRecord {
    pub id: i32,
    pub vehicle_id: i32,
    pub date: Option<DateTime<Utc>>,
    pub description: String,
    pub mileage: i32,
    pub cost: f64,
    pub notes: String,
}

impl_vehicle_record!(CollisionRecord, "collisionrecords");

/// Aftermarket upgrade record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct UpgradeRecord {
    pub id: i32,
    pub vehicle_id: i32,
    pub date: Option<DateTime<Utc>>,
    pub description: String,
    pub mileage: i32,
    pub cost: f64,
    pub notes: String,
}

impl_vehicle_record!(UpgradeRecord, "upgraderecords");

/// Routine service / maintenance record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ServiceRecord {
    pub id: i32,
    pub vehicle_id: i32,
    pub date: Option<DateTime<Utc>>,
    pub description: String,
    pub mileage: i32,
    pub cost: f64,
    pub notes: String,
}

impl_vehicle_record!(ServiceRecord, "servicerecords");

/// Fuel-up record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct GasRecord {
    pub id: i32,
    pub vehicle_id: i32,
    pub date: Option<DateTime<Utc>>,
    pub mileage: i32,
    pub gallons: f64,
    pub cost: f64,
    pub is_fill_to_full: bool,
    pub missed_fuel_up: bool,
    pub notes: String,
}

impl_vehicle_record!(GasRecord, "gasrecords");

/// Free-form note attached to a vehicle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Note {
    pub id: i32,
    pub vehicle_id: i32,
    pub description: String,
    pub text: String,
    pub pinned: bool,
}

impl_vehicle_record!(Note, "notes");

/// Odometer reading.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct OdometerRecord {
    pub id: i32,
    pub vehicle_id: i32,
    pub date: Option<DateTime<Utc>>,
    pub initial_mileage: i32,
    pub mileage: i32,
    pub notes: String,
}

impl_vehicle_record!(OdometerRecord, "odometerrecords");

/// Maintenance reminder.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ReminderRecord {
    pub id: i32,
    pub vehicle_id: i32,
    pub date: Option<DateTime<Utc>>,
    pub description: String,
    pub due_mileage: Option<i32>,
    pub notes: String,
}

impl_vehicle_record!(ReminderRecord, "reminderrecords");

/// Planned (not yet performed) maintenance item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct PlanRecord {
    pub id: i32,
    pub vehicle_id: i32,
    pub date_created: Option<DateTime<Utc>>,
    pub date_modified: Option<DateTime<Utc>>,
    pub description: String,
    pub cost: f64,
    pub priority: String,
    pub progress: String,
    pub notes: String,
}

impl_vehicle_record!(PlanRecord, "planrecords");

/// Reusable template for plan records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct PlanRecordTemplate {
    pub id: i32,
    pub vehicle_id: i32,
    pub description: String,
    pub cost: f64,
    pub priority: String,
    pub notes: String,
}

impl_vehicle_record!(PlanRecordTemplate, "planrecordtemplates");

/// Parts / supplies inventory record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct SupplyRecord {
    pub id: i32,
    pub vehicle_id: i32,
    pub date: Option<DateTime<Utc>>,
    pub part_number: String,
    pub description: String,
    pub quantity: f64,
    pub cost: f64,
    pub notes: String,
}

impl_vehicle_record!(SupplyRecord, "supplyrecords");

/// Tax / registration fee record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct TaxRecord {
    pub id: i32,
    pub vehicle_id: i32,
    pub date: Option<DateTime<Utc>>,
    pub description: String,
    pub cost: f64,
    pub notes: String,
}

impl_vehicle_record!(TaxRecord, "taxrecords");

/// Application user. Flat relational record: scalar columns, no JSON payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct UserData {
    pub id: i32,
    pub user_name: String,
    pub email_address: String,
    pub password: String,
    pub is_admin: bool,
}

impl UserData {
    pub const COLLECTION: &'static str = "userrecords";
}

/// Registration/reset token. Flat relational record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Token {
    pub id: i32,
    pub body: String,
    pub email_address: String,
}

impl Token {
    pub const COLLECTION: &'static str = "tokenrecords";
}

/// Per-user configuration document, keyed by the user's id (not generated).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct UserConfigData {
    pub id: i32,
    pub use_dark_mode: bool,
    pub use_mpg: bool,
    pub use_descending: bool,
    pub enable_auth: bool,
    pub user_language: String,
}

impl_document!(UserConfigData, "userconfigrecords");

/// User-to-vehicle access grant. Pure many-to-many join, composite key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct UserAccess {
    pub user_id: i32,
    pub vehicle_id: i32,
}

impl UserAccess {
    pub const COLLECTION: &'static str = "useraccessrecords";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documents_serialize_with_pascal_case_names() {
        let note = Note {
            id: 5,
            vehicle_id: 1,
            text: "oil change".into(),
            ..Default::default()
        };
        let json = serde_json::to_value(&note).unwrap();
        assert_eq!(json["Id"], 5);
        assert_eq!(json["VehicleId"], 1);
        assert_eq!(json["Text"], "oil change");
    }

    #[test]
    fn documents_tolerate_missing_fields() {
        let note: Note = serde_json::from_str(r#"{"Id":3,"VehicleId":2}"#).unwrap();
        assert_eq!(note.id(), 3);
        assert_eq!(note.vehicle_id(), 2);
        assert_eq!(note.text, "");
    }

    #[test]
    fn default_entity_has_unset_identity() {
        assert_eq!(Vehicle::default().id(), 0);
        assert_eq!(GasRecord::default().id(), 0);
        assert_eq!(UserData::default().id, 0);
    }

    #[test]
    fn vehicle_image_defaults_to_sentinel_when_blank() {
        let mut vehicle = Vehicle {
            image_location: "  ".into(),
            ..Default::default()
        };
        vehicle.apply_image_default();
        assert_eq!(vehicle.image_location, DEFAULT_VEHICLE_IMAGE);

        let mut keep = Vehicle {
            image_location: "/images/car.png".into(),
            ..Default::default()
        };
        keep.apply_image_default();
        assert_eq!(keep.image_location, "/images/car.png");
    }

    #[test]
    fn payload_round_trip_preserves_fields() {
        let record = GasRecord {
            id: 7,
            vehicle_id: 2,
            mileage: 42_000,
            gallons: 11.3,
            cost: 38.5,
            is_fill_to_full: true,
            ..Default::default()
        };
        let json = serde_json::to_string(&record).unwrap();
        let back: GasRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
