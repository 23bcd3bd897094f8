use std::path::PathBuf;
use std::sync::Arc;
use std::sync::mpsc;
use std::thread::JoinHandle;

use crate::io::export::export_json;
use crate::io::recovery::{RecoveryCategory, RecoveryEntry, elide_inline, log_recovery};
use crate::io::store::{ProjectStore, StoreError};
use crate::model::project::Project;

/// Result of one background save.
#[derive(Debug)]
pub struct SaveOutcome {
    /// Submission number, increasing from 1.
    pub generation: u64,
    pub count: usize,
    pub result: Result<(), StoreError>,
}

enum Job {
    Save { generation: u64, projects: Vec<Project> },
    Flush(mpsc::Sender<()>),
}

/// Persists project lists on a background thread.
///
/// Jobs run strictly in submission order against a single store, so two
/// quick edits can never interleave their writes. Outcomes are collected
/// with the non-blocking `poll()` from the UI loop.
pub struct SaveWorker {
    tx: Option<mpsc::Sender<Job>>,
    rx: mpsc::Receiver<SaveOutcome>,
    handle: Option<JoinHandle<()>>,
    submitted: u64,
    completed: u64,
}

impl SaveWorker {
    /// Start the worker. Failed saves are written to the recovery log in
    /// `recovery_dir` when one is given.
    pub fn spawn(store: Arc<dyn ProjectStore>, recovery_dir: Option<PathBuf>) -> Self {
        let (job_tx, job_rx) = mpsc::channel::<Job>();
        let (out_tx, out_rx) = mpsc::channel::<SaveOutcome>();

        let handle = std::thread::spawn(move || {
            for job in job_rx {
                match job {
                    Job::Save {
                        generation,
                        projects,
                    } => {
                        let result = store.save(&projects);
                        if let Err(e) = &result {
                            tracing::error!(generation, "save failed: {}", e);
                            if let Some(dir) = &recovery_dir {
                                record_failed_save(dir, &projects, e);
                            }
                        } else {
                            tracing::debug!(generation, count = projects.len(), "save complete");
                        }
                        let outcome = SaveOutcome {
                            generation,
                            count: projects.len(),
                            result,
                        };
                        if out_tx.send(outcome).is_err() {
                            break;
                        }
                    }
                    Job::Flush(ack) => {
                        let _ = ack.send(());
                    }
                }
            }
        });

        SaveWorker {
            tx: Some(job_tx),
            rx: out_rx,
            handle: Some(handle),
            submitted: 0,
            completed: 0,
        }
    }

    /// Queue a save of `projects`. Returns its generation number.
    pub fn submit(&mut self, projects: Vec<Project>) -> u64 {
        self.submitted += 1;
        let generation = self.submitted;
        let sent = self
            .tx
            .as_ref()
            .is_some_and(|tx| tx.send(Job::Save { generation, projects }).is_ok());
        if !sent {
            tracing::error!(generation, "save worker is gone; save dropped");
        }
        generation
    }

    /// Non-blocking: collect every outcome that has arrived.
    pub fn poll(&mut self) -> Vec<SaveOutcome> {
        let mut out = Vec::new();
        while let Ok(outcome) = self.rx.try_recv() {
            self.completed = self.completed.max(outcome.generation);
            out.push(outcome);
        }
        out
    }

    /// Saves submitted but not yet reported through `poll()`.
    pub fn pending(&self) -> u64 {
        self.submitted - self.completed
    }

    /// Block until every job submitted so far has run.
    pub fn flush(&self) {
        let Some(tx) = &self.tx else {
            return;
        };
        let (ack_tx, ack_rx) = mpsc::channel();
        if tx.send(Job::Flush(ack_tx)).is_ok() {
            let _ = ack_rx.recv();
        }
    }
}

impl Drop for SaveWorker {
    fn drop(&mut self) {
        // Closing the channel lets the worker drain queued jobs and exit
        self.tx.take();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

fn record_failed_save(dir: &std::path::Path, projects: &[Project], error: &StoreError) {
    let summarized: Vec<Project> = projects
        .iter()
        .map(|p| Project {
            cover_image: elide_inline(&p.cover_image),
            detail_images: p.detail_images.iter().map(|i| elide_inline(i)).collect(),
            ..p.clone()
        })
        .collect();
    let body = export_json(&summarized).unwrap_or_default();
    log_recovery(
        dir,
        RecoveryEntry::new(RecoveryCategory::Save, "store write failed")
            .field("Projects", projects.len().to_string())
            .field("Error", error.to_string())
            .body(body),
    );
}
