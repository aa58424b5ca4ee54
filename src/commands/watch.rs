//! `watch`: keep a catalog loaded and swap it in whenever its file changes.

use anyhow::Context as _;
use std::path::PathBuf;
use std::time::{Duration, SystemTime};
use tracing::{info, warn};
use tscat_catalog::{Catalog, CatalogHandle};

/// Modification time and size; a change in either means "reload".
type Fingerprint = (Option<SystemTime>, u64);

/// Outcome of one poll.
#[derive(Debug, PartialEq)]
pub enum Poll {
    Unchanged,
    Reloaded { entries: usize },
    /// Re-parse failed; the previous catalog stays active.
    Failed(String),
}

pub struct Watcher {
    path: PathBuf,
    seen: Option<Fingerprint>,
    handle: CatalogHandle,
}

impl Watcher {
    /// Load `path` once; fails if the initial load fails.
    pub fn open(path: PathBuf) -> anyhow::Result<Self> {
        let catalog = Catalog::from_file(&path)
            .with_context(|| format!("failed to load {}", path.display()))?;
        let seen = fingerprint(&path);
        Ok(Self {
            path,
            seen,
            handle: CatalogHandle::new(catalog),
        })
    }

    pub fn handle(&self) -> &CatalogHandle {
        &self.handle
    }

    pub fn poll(&mut self) -> Poll {
        let current = fingerprint(&self.path);
        if current == self.seen {
            return Poll::Unchanged;
        }
        self.seen = current;

        match Catalog::from_file(&self.path) {
            Ok(catalog) => {
                let entries = catalog.len();
                self.handle.replace(catalog);
                Poll::Reloaded { entries }
            }
            Err(e) => Poll::Failed(e.to_string()),
        }
    }
}

fn fingerprint(path: &std::path::Path) -> Option<Fingerprint> {
    let meta = std::fs::metadata(path).ok()?;
    Some((meta.modified().ok(), meta.len()))
}

/// Poll `path` every `every` until Ctrl-C.
pub async fn run(path: PathBuf, every: Duration) -> anyhow::Result<()> {
    let mut watcher = Watcher::open(path)?;
    let stats = watcher.handle().snapshot().stats();
    info!(
        "watching {} ({} entries, {:.1}% translated)",
        watcher.path.display(),
        stats.totals.total(),
        stats.completion * 100.0
    );

    let mut ticker = tokio::time::interval(every);
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                match watcher.poll() {
                    Poll::Unchanged => {}
                    Poll::Reloaded { entries } => {
                        info!("reloaded {} ({entries} entries)", watcher.path.display());
                    }
                    Poll::Failed(e) => {
                        warn!("reload of {} failed, keeping previous catalog: {e}", watcher.path.display());
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Received shutdown signal");
                break;
            }
        }
    }
    Ok(())
}
