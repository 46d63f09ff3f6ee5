use std::fs::File;
use std::io::Write;

use tempfile::TempDir;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use super::*;
use crate::adapter::JsonLoadError;

fn build_archive(entries: &[(&str, Option<&str>)]) -> (TempDir, ZipAdapter) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tree.zip");
    let mut writer = ZipWriter::new(File::create(&path).unwrap());
    let options = SimpleFileOptions::default();
    for (name, contents) in entries {
        match contents {
            Some(data) => {
                writer.start_file(*name, options).unwrap();
                writer.write_all(data.as_bytes()).unwrap();
            }
            None => {
                writer.add_directory(*name, options).unwrap();
            }
        }
    }
    writer.finish().unwrap();
    let adapter = ZipAdapter::open(&path).unwrap();
    (dir, adapter)
}

#[test]
fn enumerate_includes_root_and_all_entries() {
    let (_dir, adapter) = build_archive(&[
        ("img/", None),
        ("img/a.jpg", Some("jpeg")),
        ("top.json", Some("{}")),
    ]);
    assert_eq!(
        adapter.enumerate().unwrap(),
        vec!["", "img", "img/a.jpg", "top.json"]
    );
}

#[test]
fn implicit_parent_directories_exist() {
    // No explicit directory records at all.
    let (_dir, adapter) = build_archive(&[("deep/nested/file.txt", Some("x"))]);
    assert!(adapter.is_dir("deep"));
    assert!(adapter.is_dir("deep/nested"));
    assert!(adapter.is_file("deep/nested/file.txt"));
    assert_eq!(
        adapter.enumerate().unwrap(),
        vec!["", "deep", "deep/nested", "deep/nested/file.txt"]
    );
}

#[test]
fn read_bytes_and_load_json() {
    let (_dir, adapter) = build_archive(&[
        ("meta.json", Some("{\"n\": 3}")),
        ("raw.bin", Some("notjson")),
    ]);
    assert_eq!(adapter.read_bytes("raw.bin").unwrap(), b"notjson");
    assert_eq!(
        adapter.load_json("meta.json").unwrap(),
        serde_json::json!({"n": 3})
    );
    assert!(matches!(
        adapter.load_json("raw.bin"),
        Err(JsonLoadError::Invalid(_))
    ));
    assert_eq!(adapter.load_json("gone"), Err(JsonLoadError::Unreadable));
}

#[test]
fn root_is_a_directory() {
    let (_dir, adapter) = build_archive(&[("a.txt", Some("x"))]);
    assert!(adapter.is_dir(""));
    assert!(!adapter.is_file(""));
}
