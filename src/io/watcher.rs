use std::path::{Path, PathBuf};
use std::sync::mpsc;

use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};

/// Events sent from the file watcher to the TUI event loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataEvent {
    /// The store index was replaced, usually by a save from another process.
    StoreChanged,
    /// folio.toml was edited.
    ConfigChanged,
}

/// Which event, if any, a changed path maps to.
pub fn classify(data_dir: &Path, path: &Path) -> Option<DataEvent> {
    if !path.starts_with(data_dir) {
        return None;
    }
    match path.file_name().and_then(|n| n.to_str()) {
        Some("index.json") => Some(DataEvent::StoreChanged),
        Some("folio.toml") => Some(DataEvent::ConfigChanged),
        _ => None,
    }
}

/// Watches the data directory for store and config changes.
pub struct DataWatcher {
    _watcher: RecommendedWatcher,
    rx: mpsc::Receiver<DataEvent>,
}

impl DataWatcher {
    /// Start watching `data_dir`. Call `poll()` each tick.
    pub fn start(data_dir: &Path) -> Result<Self, notify::Error> {
        let (tx, rx) = mpsc::channel();
        let root: PathBuf = data_dir.to_path_buf();

        let mut watcher = RecommendedWatcher::new(
            move |result: Result<Event, notify::Error>| {
                let Ok(event) = result else {
                    return;
                };
                match event.kind {
                    EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_) => {}
                    _ => return,
                }
                for path in &event.paths {
                    if let Some(evt) = classify(&root, path) {
                        let _ = tx.send(evt);
                    }
                }
            },
            Config::default(),
        )?;

        watcher.watch(data_dir, RecursiveMode::Recursive)?;
        Ok(DataWatcher {
            _watcher: watcher,
            rx,
        })
    }

    /// Non-blocking poll. Duplicate events within one poll are collapsed.
    pub fn poll(&self) -> Vec<DataEvent> {
        let mut events: Vec<DataEvent> = Vec::new();
        while let Ok(evt) = self.rx.try_recv() {
            if !events.contains(&evt) {
                events.push(evt);
            }
        }
        events
    }
}
