use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use serde::{Deserialize, Serialize};

use crate::io::lock::{LockError, StoreLock};
use crate::io::recovery::atomic_write;
use crate::model::project::Project;

/// Error type for record store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not write {path}: {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("corrupt store file {path}: {source}")]
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("could not serialize project {id}: {source}")]
    SerializeError {
        id: String,
        source: serde_json::Error,
    },
    #[error(transparent)]
    Lock(#[from] LockError),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Local persistence for the project list.
///
/// `save` replaces the whole store with `projects` (clear, then write every
/// record); a reader never observes a half-written list. `load` returns
/// `None` when nothing has been saved yet or the store is empty.
pub trait ProjectStore: Send + Sync {
    fn load(&self) -> Result<Option<Vec<Project>>, StoreError>;
    fn save(&self, projects: &[Project]) -> Result<(), StoreError>;
}

// ---------------------------------------------------------------------------
// JSON file store
// ---------------------------------------------------------------------------

/// Points at the live generation directory and lists its records in order.
#[derive(Debug, Serialize, Deserialize)]
struct StoreIndex {
    generation: String,
    records: Vec<IndexEntry>,
}

#[derive(Debug, Serialize, Deserialize)]
struct IndexEntry {
    id: String,
    file: String,
}

/// One JSON file per project, keyed by id.
///
/// Each save writes a fresh generation directory and then atomically swaps
/// `index.json` to point at it; older generations are removed afterwards.
/// Readers and writers are serialized with a directory flock.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        JsonFileStore { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn index_path(&self) -> PathBuf {
        self.dir.join("index.json")
    }

    fn read_index(&self) -> Result<Option<StoreIndex>, StoreError> {
        let path = self.index_path();
        let text = match fs::read_to_string(&path) {
            Ok(t) => t,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StoreError::ReadError { path, source: e }),
        };
        serde_json::from_str(&text)
            .map(Some)
            .map_err(|e| StoreError::Corrupt { path, source: e })
    }

    fn new_generation(&self) -> Result<(String, PathBuf), StoreError> {
        let stamp = chrono::Utc::now().format("%Y%m%d%H%M%S%f").to_string();
        for n in 0.. {
            let name = if n == 0 {
                format!("gen-{}", stamp)
            } else {
                format!("gen-{}-{}", stamp, n)
            };
            let path = self.dir.join(&name);
            match fs::create_dir(&path) {
                Ok(()) => return Ok((name, path)),
                Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => continue,
                Err(e) => return Err(StoreError::WriteError { path, source: e }),
            }
        }
        unreachable!("generation names are unbounded")
    }

    /// Remove every generation directory except `keep`.
    fn remove_stale_generations(&self, keep: &str) {
        let Ok(entries) = fs::read_dir(&self.dir) else {
            return;
        };
        for entry in entries.flatten() {
            let name = entry.file_name();
            let name = name.to_string_lossy();
            if name.starts_with("gen-") && name != keep && entry.path().is_dir() {
                if let Err(e) = fs::remove_dir_all(entry.path()) {
                    tracing::warn!("could not remove stale store generation {}: {}", name, e);
                }
            }
        }
    }
}

/// File name for a record: position prefix keeps names unique even when two
/// ids sanitize to the same string.
fn record_file_name(position: usize, id: &str) -> String {
    let safe: String = id
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("{:04}-{}.json", position, safe)
}

impl ProjectStore for JsonFileStore {
    fn load(&self) -> Result<Option<Vec<Project>>, StoreError> {
        if !self.dir.is_dir() {
            return Ok(None);
        }
        // A concurrent save removes the previous generation once the index
        // has moved on, so reads hold the same lock as writes.
        let _lock = StoreLock::acquire_default(&self.dir)?;
        let index = match self.read_index()? {
            Some(i) => i,
            None => return Ok(None),
        };
        if index.records.is_empty() {
            return Ok(None);
        }

        let gen_dir = self.dir.join(&index.generation);
        let mut projects = Vec::with_capacity(index.records.len());
        for entry in &index.records {
            let path = gen_dir.join(&entry.file);
            let text = fs::read_to_string(&path).map_err(|e| StoreError::ReadError {
                path: path.clone(),
                source: e,
            })?;
            let project: Project =
                serde_json::from_str(&text).map_err(|e| StoreError::Corrupt { path, source: e })?;
            projects.push(project);
        }
        Ok(Some(projects))
    }

    fn save(&self, projects: &[Project]) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir).map_err(|e| StoreError::WriteError {
            path: self.dir.clone(),
            source: e,
        })?;

        // Serialize everything before touching the disk
        let mut encoded = Vec::with_capacity(projects.len());
        for (i, project) in projects.iter().enumerate() {
            let json = serde_json::to_string_pretty(project).map_err(|e| {
                StoreError::SerializeError {
                    id: project.id.clone(),
                    source: e,
                }
            })?;
            encoded.push((record_file_name(i, &project.id), json));
        }

        let _lock = StoreLock::acquire_default(&self.dir)?;

        let (generation, gen_dir) = self.new_generation()?;
        let mut records = Vec::with_capacity(projects.len());
        for (project, (file, json)) in projects.iter().zip(&encoded) {
            let path = gen_dir.join(file);
            fs::write(&path, json).map_err(|e| StoreError::WriteError { path, source: e })?;
            records.push(IndexEntry {
                id: project.id.clone(),
                file: file.clone(),
            });
        }

        let index = StoreIndex {
            generation: generation.clone(),
            records,
        };
        let index_json = serde_json::to_string_pretty(&index).map_err(|e| {
            StoreError::SerializeError {
                id: "index".to_string(),
                source: e,
            }
        })?;
        let index_path = self.index_path();
        atomic_write(&index_path, index_json.as_bytes()).map_err(|e| StoreError::WriteError {
            path: index_path,
            source: e,
        })?;

        self.remove_stale_generations(&generation);
        tracing::debug!(count = projects.len(), dir = %self.dir.display(), "store saved");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// In-memory store
// ---------------------------------------------------------------------------

/// Store kept in memory only. Used for `--no-persist` sessions and tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<Vec<Project>>,
    saves: AtomicUsize,
    fail_saves: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(projects: Vec<Project>) -> Self {
        MemoryStore {
            records: Mutex::new(projects),
            ..Self::default()
        }
    }

    /// A store whose every save fails.
    pub fn failing() -> Self {
        MemoryStore {
            fail_saves: true,
            ..Self::default()
        }
    }

    /// Number of save calls received, including failed ones.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    pub fn snapshot(&self) -> Vec<Project> {
        self.records
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }
}

impl ProjectStore for MemoryStore {
    fn load(&self) -> Result<Option<Vec<Project>>, StoreError> {
        let records = self
            .records
            .lock()
            .map_err(|_| StoreError::Unavailable("memory store poisoned".into()))?;
        Ok(if records.is_empty() {
            None
        } else {
            Some(records.clone())
        })
    }

    fn save(&self, projects: &[Project]) -> Result<(), StoreError> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        if self.fail_saves {
            return Err(StoreError::Unavailable("memory store rejects writes".into()));
        }
        let mut records = self
            .records
            .lock()
            .map_err(|_| StoreError::Unavailable("memory store poisoned".into()))?;
        *records = projects.to_vec();
        Ok(())
    }
}
