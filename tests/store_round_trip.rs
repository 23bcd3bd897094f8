//! Store round-trip tests through the public API: every edit command's
//! result survives a save and a fresh load, and concurrent writers never
//! leave a mixed list behind.

use std::sync::Arc;
use std::thread;

use folio::io::dataset::bundled_projects;
use folio::io::store::{JsonFileStore, ProjectStore};
use folio::model::project::{Project, ProjectField};
use folio::ops::edit::{
    append_detail_image, remove_detail_image, update_cover, update_detail_image, update_field,
};
use pretty_assertions::assert_eq;

fn reload(dir: &std::path::Path) -> Vec<Project> {
    JsonFileStore::new(dir).load().unwrap().unwrap_or_default()
}

#[test]
fn edits_survive_reload() {
    let tmp = tempfile::TempDir::new().unwrap();
    let store = JsonFileStore::new(tmp.path());
    let base = bundled_projects();

    let steps: Vec<Vec<Project>> = vec![
        update_field(&base, "clackyai-ui", ProjectField::Tags, "AI, Agents ,  ").unwrap(),
        update_cover(&base, "methodology", "https://img.example.com/c.jpg").unwrap(),
        update_detail_image(&base, "methodology", 1, "data:image/png;base64,AA").unwrap(),
        append_detail_image(&base, "marketing-visual", "/images/extra.jpg").unwrap(),
        remove_detail_image(&base, "illustration-series", 0).unwrap(),
    ];
    for list in steps {
        store.save(&list).unwrap();
        assert_eq!(reload(tmp.path()), list);
    }
}

#[test]
fn only_one_generation_remains() {
    let tmp = tempfile::TempDir::new().unwrap();
    let store = JsonFileStore::new(tmp.path());
    let base = bundled_projects();
    store.save(&base).unwrap();
    store.save(&base[..2]).unwrap();
    store.save(&base[..4]).unwrap();

    let generations = std::fs::read_dir(tmp.path())
        .unwrap()
        .flatten()
        .filter(|e| e.file_name().to_string_lossy().starts_with("gen-"))
        .count();
    assert_eq!(generations, 1);
    assert_eq!(reload(tmp.path()), base[..4].to_vec());
}

#[test]
fn concurrent_saves_never_mix_lists() {
    let tmp = tempfile::TempDir::new().unwrap();
    let base = bundled_projects();
    let short = base[..3].to_vec();
    let store = Arc::new(JsonFileStore::new(tmp.path()));

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let store = Arc::clone(&store);
            let list = if i % 2 == 0 { base.clone() } else { short.clone() };
            thread::spawn(move || {
                for _ in 0..5 {
                    store.save(&list).unwrap();
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    let loaded = reload(tmp.path());
    assert!(loaded == base || loaded == short);
}

#[test]
fn empty_save_clears_store() {
    let tmp = tempfile::TempDir::new().unwrap();
    let store = JsonFileStore::new(tmp.path());
    store.save(&bundled_projects()).unwrap();
    store.save(&[]).unwrap();
    assert_eq!(store.load().unwrap(), None);
}

#[test]
fn loads_during_saves_see_whole_lists() {
    let tmp = tempfile::TempDir::new().unwrap();
    let base = bundled_projects();
    let short = base[..2].to_vec();
    let store = Arc::new(JsonFileStore::new(tmp.path()));
    store.save(&base).unwrap();

    let writer = {
        let store = Arc::clone(&store);
        let (base, short) = (base.clone(), short.clone());
        thread::spawn(move || {
            for i in 0..100 {
                let list = if i % 2 == 0 { &short } else { &base };
                store.save(list).unwrap();
            }
        })
    };
    for _ in 0..300 {
        let loaded = store.load().unwrap().unwrap();
        assert!(loaded == base || loaded == short);
    }
    writer.join().unwrap();
}
