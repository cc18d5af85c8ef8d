use pretty_assertions::assert_eq;
use slotwise_store::{BlobStore, FileBlobStore, MemoryBlobStore};
use tempfile::TempDir;

#[test]
fn test_file_blob_store_round_trip() {
    let dir = TempDir::new().unwrap();
    let mut blobs = FileBlobStore::open(dir.path()).unwrap();

    assert_eq!(blobs.get("@SLOTS").unwrap(), None);

    blobs.set("@SLOTS", "{}").unwrap();
    assert_eq!(blobs.get("@SLOTS").unwrap(), Some("{}".to_string()));

    blobs.set("@SLOTS", "{\"a\":[]}").unwrap();
    assert_eq!(blobs.get("@SLOTS").unwrap(), Some("{\"a\":[]}".to_string()));

    blobs.remove("@SLOTS").unwrap();
    assert_eq!(blobs.get("@SLOTS").unwrap(), None);
}

#[test]
fn test_file_blob_store_sanitises_keys() {
    let dir = TempDir::new().unwrap();
    let blobs = FileBlobStore::open(dir.path()).unwrap();

    assert_eq!(blobs.path_for("@SLOTS"), dir.path().join("_SLOTS.json"));
    assert_eq!(
        blobs.path_for("../escape/key"),
        dir.path().join(".._escape_key.json")
    );
}

#[test]
fn test_file_blob_store_creates_directory() {
    let dir = TempDir::new().unwrap();
    let nested = dir.path().join("nested").join("store");

    let mut blobs = FileBlobStore::open(&nested).unwrap();
    blobs.set("key", "value").unwrap();

    assert!(nested.join("key.json").exists());
    assert!(!nested.join("key.json.tmp").exists());
}

#[test]
fn test_remove_missing_key_is_ok() {
    let dir = TempDir::new().unwrap();
    let mut blobs = FileBlobStore::open(dir.path()).unwrap();
    assert!(blobs.remove("missing").is_ok());

    let mut memory = MemoryBlobStore::new();
    assert!(memory.remove("missing").is_ok());
}

#[test]
fn test_memory_blob_store() {
    let mut blobs = MemoryBlobStore::new();
    blobs.set("a", "1").unwrap();
    blobs.set("b", "2").unwrap();

    assert_eq!(blobs.get("a").unwrap(), Some("1".to_string()));
    assert_eq!(blobs.get("b").unwrap(), Some("2".to_string()));
    assert_eq!(blobs.get("c").unwrap(), None);
}
