//! Contract tests for the embedded engine, which runs hermetically against a
//! temp file. The relational adapter shares the same contract surface and
//! SQL-shape tests live in the library's unit modules.

use tempfile::TempDir;
use wrenchlog_store::{
    archive, CollisionRecord, Document, EmbeddedStore, GasRecord, Note, RecordStore, Token,
    TokenRecordStore, UserAccessStore, UserConfigData, UserConfigStore, UserData, UserRecordStore,
    Vehicle, VehicleRecord, VehicleStore,
};

fn store(dir: &TempDir) -> EmbeddedStore {
    EmbeddedStore::new(dir.path().join("wrenchlog.db"))
}

#[tokio::test]
async fn save_assigns_identity_and_embeds_it_in_the_payload() {
    let dir = tempfile::tempdir().unwrap();
    let store = store(&dir);

    let mut note = Note {
        vehicle_id: 3,
        text: "rotate tires".into(),
        ..Default::default()
    };
    assert!(store.save(&mut note).await);
    assert_ne!(note.id, 0);

    // get_by_id deserializes only the stored payload, so equal ids here
    // prove the generated identity was persisted back into the document.
    let fetched: Note = store.get_by_id(note.id).await;
    assert_eq!(fetched.id, note.id);
    assert_eq!(fetched.vehicle_id, 3);
    assert_eq!(fetched.text, "rotate tires");
}

#[tokio::test]
async fn save_with_existing_identity_updates_in_place() {
    let dir = tempfile::tempdir().unwrap();
    let store = store(&dir);

    let mut record = GasRecord {
        vehicle_id: 1,
        gallons: 10.0,
        ..Default::default()
    };
    assert!(store.save(&mut record).await);
    let id = record.id;

    record.gallons = 12.5;
    assert!(store.save(&mut record).await);
    assert_eq!(record.id, id);

    let fetched: GasRecord = store.get_by_id(id).await;
    assert_eq!(fetched.gallons, 12.5);
}

#[tokio::test]
async fn get_by_id_returns_default_entity_when_absent() {
    let dir = tempfile::tempdir().unwrap();
    let store = store(&dir);

    let missing: Note = store.get_by_id(999).await;
    assert_eq!(missing.id, 0);
}

#[tokio::test]
async fn get_all_by_vehicle_id_is_scoped() {
    let dir = tempfile::tempdir().unwrap();
    let store = store(&dir);

    for vehicle_id in [1, 1, 2] {
        let mut record = CollisionRecord {
            vehicle_id,
            ..Default::default()
        };
        assert!(store.save(&mut record).await);
    }

    let first: Vec<CollisionRecord> = store.get_all_by_vehicle_id(1).await;
    let second: Vec<CollisionRecord> = store.get_all_by_vehicle_id(2).await;
    assert_eq!(first.len(), 2);
    assert_eq!(second.len(), 1);
    assert!(first.iter().all(|r| r.vehicle_id == 1));
}

#[tokio::test]
async fn delete_by_id_removes_exactly_one_row() {
    let dir = tempfile::tempdir().unwrap();
    let store = store(&dir);

    let mut keep = Note {
        vehicle_id: 1,
        ..Default::default()
    };
    let mut drop = Note {
        vehicle_id: 1,
        ..Default::default()
    };
    store.save(&mut keep).await;
    store.save(&mut drop).await;

    assert!(RecordStore::<Note>::delete_by_id(&store, drop.id).await);
    let remaining: Vec<Note> = store.get_all_by_vehicle_id(1).await;
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, keep.id);

    // Deleting an id that no longer exists affects no rows.
    assert!(!RecordStore::<Note>::delete_by_id(&store, drop.id).await);
}

#[tokio::test]
async fn delete_all_by_vehicle_id_spares_other_vehicles() {
    let dir = tempfile::tempdir().unwrap();
    let store = store(&dir);

    for vehicle_id in [1, 1, 2] {
        let mut record = Note {
            vehicle_id,
            ..Default::default()
        };
        store.save(&mut record).await;
    }

    assert!(RecordStore::<Note>::delete_all_by_vehicle_id(&store, 1).await);
    let first: Vec<Note> = store.get_all_by_vehicle_id(1).await;
    let second: Vec<Note> = store.get_all_by_vehicle_id(2).await;
    assert!(first.is_empty());
    assert_eq!(second.len(), 1);
}

#[tokio::test]
async fn vehicle_save_applies_image_sentinel_and_assigns_identity() {
    let dir = tempfile::tempdir().unwrap();
    let store = store(&dir);

    let mut vehicle = Vehicle {
        make: "Toyota".into(),
        model: "Corolla".into(),
        year: 2014,
        ..Default::default()
    };
    assert!(store.save_vehicle(&mut vehicle).await);
    assert_ne!(vehicle.id, 0);

    let fetched = store.get_vehicle_by_id(vehicle.id).await;
    assert_eq!(fetched.image_location, "/defaults/noimage.png");
    assert_eq!(fetched.make, "Toyota");

    let all = store.get_vehicles().await;
    assert_eq!(all.len(), 1);
}

#[tokio::test]
async fn user_records_support_scoped_lookups() {
    let dir = tempfile::tempdir().unwrap();
    let store = store(&dir);

    let mut user = UserData {
        user_name: "mechanic".into(),
        email_address: "shop@example.com".into(),
        password: "hash".into(),
        is_admin: true,
        ..Default::default()
    };
    assert!(store.save_user(&mut user).await);
    assert_ne!(user.id, 0);

    assert_eq!(store.get_user_by_username("mechanic").await.id, user.id);
    assert_eq!(store.get_user_by_email("shop@example.com").await.id, user.id);
    assert_eq!(store.get_user_by_username("nobody").await.id, 0);

    assert!(store.delete_user(user.id).await);
    assert!(store.get_users().await.is_empty());
}

#[tokio::test]
async fn tokens_round_trip_and_look_up_by_body() {
    let dir = tempfile::tempdir().unwrap();
    let store = store(&dir);

    let mut token = Token {
        body: "abc123".into(),
        email_address: "shop@example.com".into(),
        ..Default::default()
    };
    assert!(store.save_token(&mut token).await);
    assert_ne!(token.id, 0);

    assert_eq!(store.get_token_by_body("abc123").await.id, token.id);
    assert_eq!(store.get_token_by_id(token.id).await.body, "abc123");
    assert!(store.delete_token(token.id).await);
}

#[tokio::test]
async fn user_config_is_a_pure_upsert_on_the_supplied_id() {
    let dir = tempfile::tempdir().unwrap();
    let store = store(&dir);

    let mut config = UserConfigData {
        id: 42,
        use_dark_mode: true,
        ..Default::default()
    };
    assert!(store.save_user_config(&config).await);

    config.use_dark_mode = false;
    assert!(store.save_user_config(&config).await);

    let fetched = store.get_user_config(42).await;
    assert_eq!(fetched.id, 42);
    assert!(!fetched.use_dark_mode);

    assert_eq!(store.get_user_config(7).await.id, 0);
}

#[tokio::test]
async fn user_access_composite_key_operations() {
    let dir = tempfile::tempdir().unwrap();
    let store = store(&dir);

    assert!(store.save_access(1, 10).await);
    assert!(store.save_access(1, 11).await);
    assert!(store.save_access(2, 10).await);
    // Duplicate grant is a no-op.
    store.save_access(1, 10).await;

    assert_eq!(store.get_all_access().await.len(), 3);
    assert_eq!(store.get_access_by_user(1).await.len(), 2);
    assert_eq!(store.get_access_by_vehicle(10).await.len(), 2);

    assert!(store.delete_access(1, 10).await);
    assert_eq!(store.get_access_by_user(1).await.len(), 1);

    assert!(store.delete_all_access_by_vehicle(10).await);
    assert!(store.get_access_by_vehicle(10).await.is_empty());

    assert!(store.delete_all_access_by_user(1).await);
    assert!(store.get_all_access().await.is_empty());
}

#[tokio::test]
async fn archive_round_trip_preserves_identities_and_payloads() {
    // The concrete migration scenario, minus a live relational server: one
    // vehicle with Id=1 and one note assigned Id=5 referencing it survive a
    // pack/unpack cycle with identical {Id, VehicleId, Payload} triples.
    let dir = tempfile::tempdir().unwrap();
    let source = EmbeddedStore::new(dir.path().join("source/wrenchlog.db"));

    let vehicle = Vehicle {
        id: 1,
        make: "Honda".into(),
        model: "Civic".into(),
        ..Default::default()
    };
    source.upsert_vehicle(&vehicle).await.unwrap();

    let note = Note {
        id: 5,
        vehicle_id: 1,
        text: "oil change".into(),
        ..Default::default()
    };
    source.upsert_document(&note).await.unwrap();

    let archive_path = dir.path().join("export.db.gz");
    archive::pack(source.path(), &archive_path).unwrap();

    let restored_file = dir.path().join("restored/wrenchlog.db");
    archive::unpack(&archive_path, &restored_file).unwrap();
    let restored = EmbeddedStore::new(&restored_file);

    let vehicles = restored.fetch_documents::<Vehicle>(false).await.unwrap();
    assert_eq!(vehicles.len(), 1);
    assert_eq!(vehicles[0].id, 1);

    let notes = restored.fetch_documents::<Note>(true).await.unwrap();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].id(), 5);
    assert_eq!(notes[0].vehicle_id(), 1);
    assert_eq!(notes[0].text, "oil change");
}

#[tokio::test]
async fn bulk_upsert_preserves_supplied_identities() {
    let dir = tempfile::tempdir().unwrap();
    let store = store(&dir);

    let note = Note {
        id: 40,
        vehicle_id: 2,
        ..Default::default()
    };
    store.upsert_document(&note).await.unwrap();
    // Upserting again with changed payload keeps the identity.
    let changed = Note {
        id: 40,
        vehicle_id: 2,
        text: "revised".into(),
        ..Default::default()
    };
    store.upsert_document(&changed).await.unwrap();

    let fetched: Note = store.get_by_id(40).await;
    assert_eq!(fetched.id, 40);
    assert_eq!(fetched.text, "revised");

    // A subsequent generated insert does not collide with the preserved id.
    let mut fresh = Note {
        vehicle_id: 2,
        ..Default::default()
    };
    assert!(store.save(&mut fresh).await);
    assert!(fresh.id > 40);
}
