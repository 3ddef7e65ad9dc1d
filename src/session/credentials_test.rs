use super::*;

use time::Duration;

fn temp_store() -> (tempfile::TempDir, FileCredentialStore) {
    let dir = tempfile::tempdir().unwrap();
    let store = FileCredentialStore::new(dir.path().join("credentials.json"));
    (dir, store)
}

// =============================================================================
// Credential
// =============================================================================

#[test]
fn issued_now_gets_seven_day_window() {
    let credential = Credential::issued_now("t1".to_owned());
    let now = OffsetDateTime::now_utc();
    assert!(credential.expires_at > now + Duration::days(6));
    assert!(credential.expires_at <= now + Duration::days(7) + Duration::minutes(1));
    assert!(!credential.is_expired());
}

#[test]
fn expired_when_window_elapsed() {
    let credential = Credential {
        token: "t1".to_owned(),
        expires_at: OffsetDateTime::now_utc() - Duration::seconds(1),
    };
    assert!(credential.is_expired());
}

// =============================================================================
// File store
// =============================================================================

#[test]
fn file_store_round_trips() {
    let (_dir, store) = temp_store();
    let credential = Credential::issued_now("t1".to_owned());

    store.save(&credential).unwrap();
    assert_eq!(store.load(), Some(credential));
}

#[test]
fn file_store_creates_parent_directories() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileCredentialStore::new(dir.path().join("nested").join("credentials.json"));

    store.save(&Credential::issued_now("t1".to_owned())).unwrap();
    assert!(store.load().is_some());
}

#[test]
fn file_store_discards_expired_credential() {
    let (dir, store) = temp_store();
    let credential = Credential {
        token: "t1".to_owned(),
        expires_at: OffsetDateTime::now_utc() - Duration::days(1),
    };
    store.save(&credential).unwrap();

    assert_eq!(store.load(), None);
    // The file itself is removed, not just ignored.
    assert!(!dir.path().join("credentials.json").exists());
}

#[test]
fn file_store_discards_unreadable_credential() {
    let (dir, store) = temp_store();
    std::fs::write(dir.path().join("credentials.json"), "not json").unwrap();

    assert_eq!(store.load(), None);
    assert!(!dir.path().join("credentials.json").exists());
}

#[test]
fn file_store_load_without_file_is_none() {
    let (_dir, store) = temp_store();
    assert_eq!(store.load(), None);
}

#[test]
fn file_store_clear_is_idempotent() {
    let (_dir, store) = temp_store();
    store.save(&Credential::issued_now("t1".to_owned())).unwrap();

    store.clear();
    store.clear();
    assert_eq!(store.load(), None);
}

#[cfg(unix)]
#[test]
fn file_store_restricts_permissions_to_owner() {
    use std::os::unix::fs::PermissionsExt;

    let (dir, store) = temp_store();
    store.save(&Credential::issued_now("t1".to_owned())).unwrap();

    let mode = std::fs::metadata(dir.path().join("credentials.json"))
        .unwrap()
        .permissions()
        .mode();
    assert_eq!(mode & 0o777, 0o600);
}

// =============================================================================
// Memory store
// =============================================================================

#[test]
fn memory_store_round_trips_and_clears() {
    let store = MemoryCredentialStore::default();
    let credential = Credential::issued_now("t1".to_owned());

    store.save(&credential).unwrap();
    assert_eq!(store.load(), Some(credential));

    store.clear();
    assert_eq!(store.load(), None);
}

#[test]
fn memory_store_discards_expired_credential() {
    let store = MemoryCredentialStore::default();
    store
        .save(&Credential {
            token: "t1".to_owned(),
            expires_at: OffsetDateTime::now_utc() - Duration::seconds(1),
        })
        .unwrap();

    assert_eq!(store.load(), None);
    // A second load stays empty; the expired value was dropped.
    assert_eq!(store.load(), None);
}
