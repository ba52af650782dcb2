use super::*;

#[test]
fn missing_file_reads_as_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path().join("session.json"));
    assert_eq!(store.get("token"), None);
}

#[test]
fn set_persists_across_instances() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("session.json");

    FileStore::new(&path).set("token", "abc").unwrap();

    let reopened = FileStore::new(&path);
    assert_eq!(reopened.get("token").as_deref(), Some("abc"));
}

#[test]
fn removing_last_entry_deletes_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    let store = FileStore::new(&path);

    store.set("token", "abc").unwrap();
    store.set("user", "{}").unwrap();
    store.remove("token").unwrap();
    assert!(path.exists());
    assert_eq!(store.get("user").as_deref(), Some("{}"));

    store.remove("user").unwrap();
    assert!(!path.exists());
}

#[test]
fn corrupt_file_reads_as_empty_and_is_replaced_on_write() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    std::fs::write(&path, "not json").unwrap();
    let store = FileStore::new(&path);

    assert_eq!(store.get("token"), None);
    store.set("token", "fresh").unwrap();
    assert_eq!(store.get("token").as_deref(), Some("fresh"));
}

#[test]
fn writes_leave_no_staging_files_behind() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    let store = FileStore::new(&path);

    store.set("token", "abc").unwrap();
    store.set("user", "{}").unwrap();
    store.set("token", "def").unwrap();

    let names: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name())
        .collect();
    assert_eq!(names, vec![std::ffi::OsString::from("session.json")]);
    let raw = std::fs::read_to_string(&path).unwrap();
    let map: std::collections::BTreeMap<String, String> = serde_json::from_str(&raw).unwrap();
    assert_eq!(map.get("token").map(String::as_str), Some("def"));
}

