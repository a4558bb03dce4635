use super::*;

use std::time::Duration;

use session::{PROFILE_SLOT, SessionService, SessionStore, TOKEN_SLOT, UserId};

use crate::http::ReqwestBackend;

fn temp_path() -> PathBuf {
    std::env::temp_dir()
        .join(format!("backoffice-cli-{}", uuid::Uuid::new_v4()))
        .join("session.json")
}

fn cleanup(storage: &FileStorage) {
    if let Some(parent) = storage.path().parent() {
        let _ = fs::remove_dir_all(parent);
    }
}

// =============================================================
// Slot operations
// =============================================================

#[test]
fn missing_file_reads_as_empty() {
    let storage = FileStorage::new(temp_path());
    assert_eq!(storage.get("token"), None);
    assert!(storage.remove("token").is_ok());
    assert!(!storage.path().exists());
}

#[test]
fn set_creates_parent_directory_and_persists() {
    let storage = FileStorage::new(temp_path());
    storage.set("token", "tok-1").unwrap();

    let reopened = FileStorage::new(storage.path());
    assert_eq!(reopened.get("token").as_deref(), Some("tok-1"));
    cleanup(&storage);
}

#[test]
fn set_keeps_other_slots() {
    let storage = FileStorage::new(temp_path());
    storage.set("token", "tok-1").unwrap();
    storage.set("user", "{}").unwrap();
    storage.set("token", "tok-2").unwrap();

    assert_eq!(storage.get("token").as_deref(), Some("tok-2"));
    assert_eq!(storage.get("user").as_deref(), Some("{}"));
    cleanup(&storage);
}

#[test]
fn removing_last_slot_deletes_file() {
    let storage = FileStorage::new(temp_path());
    storage.set("token", "tok-1").unwrap();
    storage.set("user", "{}").unwrap();

    storage.remove("token").unwrap();
    assert!(storage.path().exists());
    storage.remove("user").unwrap();
    assert!(!storage.path().exists());
    cleanup(&storage);
}

#[test]
fn corrupt_file_reads_as_empty() {
    let storage = FileStorage::new(temp_path());
    fs::create_dir_all(storage.path().parent().unwrap()).unwrap();
    fs::write(storage.path(), "not json").unwrap();

    assert_eq!(storage.get("token"), None);
    storage.set("token", "tok-1").unwrap();
    assert_eq!(storage.get("token").as_deref(), Some("tok-1"));
    cleanup(&storage);
}

#[cfg(unix)]
#[test]
fn session_file_is_owner_only() {
    use std::os::unix::fs::PermissionsExt;

    let storage = FileStorage::new(temp_path());
    storage.set("token", "tok-1").unwrap();
    let mode = fs::metadata(storage.path()).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
    cleanup(&storage);
}

// =============================================================
// With SessionStore
// =============================================================

#[test]
fn store_reads_slots_written_to_file() {
    let storage = FileStorage::new(temp_path());
    storage.set(TOKEN_SLOT, "tok-7").unwrap();
    storage
        .set(PROFILE_SLOT, r#"{"id":7,"name":"Ana","email":"ana@example.com"}"#)
        .unwrap();

    let store = SessionStore::new(&storage);
    let (token, profile) = store.snapshot().unwrap();
    assert_eq!(token.expose(), "tok-7");
    assert_eq!(profile.id, UserId::Number(7));
    assert_eq!(profile.email.as_deref(), Some("ana@example.com"));
    cleanup(&storage);
}

#[test]
fn destroy_session_removes_file() {
    let storage = FileStorage::new(temp_path());
    storage.set(TOKEN_SLOT, "tok-7").unwrap();
    storage.set(PROFILE_SLOT, r#"{"id":7,"name":"Ana"}"#).unwrap();

    let backend = ReqwestBackend::new("http://127.0.0.1:9", Duration::from_secs(1)).unwrap();
    let service = SessionService::new(&storage, backend);
    assert!(service.has_local_session());

    service.destroy_session();
    service.destroy_session();

    assert!(!service.has_local_session());
    assert!(!storage.path().exists());
    cleanup(&storage);
}

#[test]
fn set_slots_replaces_pair_in_one_write() {
    let storage = FileStorage::new(temp_path());
    storage.set(TOKEN_SLOT, "old-token").unwrap();
    storage.set(PROFILE_SLOT, r#"{"id":1,"name":"A"}"#).unwrap();

    storage
        .set_slots(&[(PROFILE_SLOT, r#"{"id":2,"name":"B"}"#), (TOKEN_SLOT, "new-token")])
        .unwrap();

    let raw = fs::read_to_string(storage.path()).unwrap();
    let slots: BTreeMap<String, String> = serde_json::from_str(&raw).unwrap();
    assert_eq!(slots.get(TOKEN_SLOT).map(String::as_str), Some("new-token"));
    assert_eq!(
        slots.get(PROFILE_SLOT).map(String::as_str),
        Some(r#"{"id":2,"name":"B"}"#)
    );
    assert!(!storage.path().with_extension("json.tmp").exists());
    cleanup(&storage);
}

#[test]
fn set_slots_failure_keeps_previous_file() {
    let storage = FileStorage::new(temp_path());
    storage.set(TOKEN_SLOT, "old-token").unwrap();
    // A directory where the temp file should go makes the write fail.
    fs::create_dir_all(storage.path().with_extension("json.tmp")).unwrap();

    let result = storage.set_slots(&[(PROFILE_SLOT, "{}"), (TOKEN_SLOT, "new-token")]);

    assert!(matches!(result, Err(StorageError::Write { .. })));
    assert_eq!(storage.get(TOKEN_SLOT).as_deref(), Some("old-token"));
    assert_eq!(storage.get(PROFILE_SLOT), None);
    cleanup(&storage);
}
