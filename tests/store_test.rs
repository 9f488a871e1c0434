use chrono::{Duration, Utc};
use sporltui::error::StoreError;
use sporltui::management::CredentialStore;
use sporltui::types::{OAuthToken, TokenRecord};
use tempfile::tempdir;

fn create_test_record(refresh: Option<&str>) -> TokenRecord {
    TokenRecord {
        token: OAuthToken {
            access_token: "AT1".to_string(),
            token_type: "Bearer".to_string(),
            refresh_token: refresh.map(str::to_string),
            expiry: Utc::now() + Duration::seconds(3600),
        },
        client_id: "abc".to_string(),
        last_refresh: Utc::now(),
    }
}

#[tokio::test]
async fn test_load_missing_file_is_absent() {
    let dir = tempdir().unwrap();
    let store = CredentialStore::new(dir.path().join("token.json"));

    assert!(store.load().await.unwrap().is_none());
}

#[tokio::test]
async fn test_save_then_load_returns_equal_record() {
    let dir = tempdir().unwrap();
    let store = CredentialStore::new(dir.path().join("token.json"));
    let record = create_test_record(Some("RT1"));

    store.save(&record).await.unwrap();
    let loaded = store.load().await.unwrap().expect("record should exist");

    assert_eq!(loaded, record);
}

#[tokio::test]
async fn test_save_without_refresh_token() {
    let dir = tempdir().unwrap();
    let store = CredentialStore::new(dir.path().join("token.json"));
    let record = create_test_record(None);

    store.save(&record).await.unwrap();
    let loaded = store.load().await.unwrap().unwrap();

    assert_eq!(loaded.token.refresh_token, None);
    assert_eq!(loaded, record);
}

#[tokio::test]
async fn test_saved_file_layout() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("token.json");
    let store = CredentialStore::new(&path);

    store.save(&create_test_record(Some("RT1"))).await.unwrap();

    let raw = std::fs::read_to_string(&path).unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(json["client_id"], "abc");
    assert_eq!(json["token"]["access_token"], "AT1");
    assert_eq!(json["token"]["refresh_token"], "RT1");
    assert!(json["token"]["expiry"].is_string());
    assert!(json["last_refresh"].is_string());
}

#[tokio::test]
async fn test_corrupt_file_is_reported() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("token.json");
    std::fs::write(&path, "{ not json").unwrap();

    let store = CredentialStore::new(&path);
    let err = store.load().await.unwrap_err();

    assert!(matches!(err, StoreError::Corrupt { .. }));
}

#[tokio::test]
async fn test_save_creates_missing_parent_directories() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("sporltui").join("token.json");
    let store = CredentialStore::new(&path);

    store.save(&create_test_record(Some("RT1"))).await.unwrap();

    assert!(path.is_file());
}

#[tokio::test]
async fn test_overwrite_leaves_no_temp_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("token.json");
    let store = CredentialStore::new(&path);

    store.save(&create_test_record(Some("RT1"))).await.unwrap();
    let mut second = create_test_record(Some("RT2"));
    second.token.access_token = "AT2".to_string();
    store.save(&second).await.unwrap();

    let entries: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(entries, vec![std::ffi::OsString::from("token.json")]);
    assert_eq!(store.load().await.unwrap().unwrap().token.access_token, "AT2");
}

#[cfg(unix)]
#[tokio::test]
async fn test_saved_file_is_owner_only() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempdir().unwrap();
    let parent = dir.path().join("fresh");
    let path = parent.join("token.json");
    let store = CredentialStore::new(&path);

    store.save(&create_test_record(Some("RT1"))).await.unwrap();

    let file_mode = std::fs::metadata(&path).unwrap().permissions().mode() & 0o777;
    assert_eq!(file_mode, 0o600);
    let dir_mode = std::fs::metadata(&parent).unwrap().permissions().mode() & 0o777;
    assert_eq!(dir_mode, 0o700);
}

#[tokio::test]
async fn test_clear_removes_record() {
    let dir = tempdir().unwrap();
    let store = CredentialStore::new(dir.path().join("token.json"));

    store.save(&create_test_record(Some("RT1"))).await.unwrap();
    store.clear().await.unwrap();
    assert!(store.load().await.unwrap().is_none());

    // Clearing twice is fine
    store.clear().await.unwrap();
}

#[cfg(unix)]
#[tokio::test]
async fn test_stale_readable_temp_file_is_replaced() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempdir().unwrap();
    let path = dir.path().join("token.json");
    let stale = dir.path().join("token.json.tmp");
    std::fs::write(&stale, "old secrets").unwrap();
    std::fs::set_permissions(&stale, std::fs::Permissions::from_mode(0o644)).unwrap();

    let store = CredentialStore::new(&path);
    store.save(&create_test_record(Some("RT1"))).await.unwrap();

    assert!(!stale.exists());
    let file_mode = std::fs::metadata(&path).unwrap().permissions().mode() & 0o777;
    assert_eq!(file_mode, 0o600);
    assert_eq!(store.load().await.unwrap().unwrap().token.access_token, "AT1");
}

#[tokio::test]
async fn test_failed_save_leaves_no_temp_file() {
    let dir = tempdir().unwrap();
    // a non-empty directory in place of the token file makes the rename fail
    let path = dir.path().join("token.json");
    std::fs::create_dir(&path).unwrap();
    std::fs::write(path.join("keep"), "x").unwrap();

    let store = CredentialStore::new(&path);
    let err = store.save(&create_test_record(Some("RT1"))).await.unwrap_err();

    assert!(matches!(err, StoreError::Io { .. }));
    assert!(!dir.path().join("token.json.tmp").exists());
}
