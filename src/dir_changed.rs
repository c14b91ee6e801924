use std::path::Path;
use std::sync::{atomic::{AtomicU64, Ordering}, Arc};
use std::time::{SystemTime, UNIX_EPOCH};
use notify::{Watcher, RecursiveMode, Event as NotifyEvent, EventKind};
use thiserror::Error;

/// Errors that can occur during directory change monitoring
#[derive(Error, Debug)]
pub enum DirChangedError {
    /// File watcher setup failed
    #[error("Watcher setup error: {0}")]
    WatcherSetup(#[from] notify::Error),
}

/// Tracks directory changes using file system events and timestamps
///
/// The watcher callback only bumps an atomic timestamp, so callers poll
/// [`DirChanged::last_change_timestamp`] and compare it with the timestamp of
/// their last run.
pub struct DirChanged {
    /// Timestamp of the last detected change (nanoseconds since UNIX epoch)
    last_change_timestamp: Arc<AtomicU64>,
    /// File watcher instance (kept alive to continue monitoring)
    _watcher: notify::RecommendedWatcher,
}

fn now_nanos() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos() as u64
}

/// Whether a file system event should count as a change
///
/// * `file_name` - only events touching a file with this name count; `None` accepts any file
fn is_relevant(event: &NotifyEvent, file_name: Option<&str>) -> bool {
    match event.kind {
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_) => match file_name {
            Some(name) => event
                .paths
                .iter()
                .any(|path| path.file_name().and_then(|s| s.to_str()) == Some(name)),
            None => true,
        },
        _ => false,
    }
}

impl DirChanged {
    /// Creates a new DirChanged instance that monitors the specified directory
    ///
    /// # Arguments
    ///
    /// * `directory` - Path to the directory to monitor
    /// * `file_name` - Optional file name to filter events (e.g., "units.json")
    pub fn new(directory: &Path, file_name: Option<&str>) -> Result<Self, DirChangedError> {
        let last_change_timestamp = Arc::new(AtomicU64::new(now_nanos()));

        let watcher = Self::setup_watcher(directory, file_name, last_change_timestamp.clone())?;

        Ok(Self {
            last_change_timestamp,
            _watcher: watcher,
        })
    }

    /// Gets the timestamp of the last detected change, in nanoseconds since UNIX epoch
    pub fn last_change_timestamp(&self) -> u64 {
        self.last_change_timestamp.load(Ordering::Relaxed)
    }

    fn setup_watcher(
        directory: &Path,
        file_name: Option<&str>,
        timestamp: Arc<AtomicU64>,
    ) -> Result<notify::RecommendedWatcher, notify::Error> {
        let name_filter = file_name.map(|s| s.to_string());

        let mut watcher = notify::recommended_watcher(move |res: Result<NotifyEvent, notify::Error>| {
            let changed = match &res {
                Ok(event) => is_relevant(event, name_filter.as_deref()),
                // On error, assume changes occurred to be safe
                Err(_) => true,
            };
            if changed {
                timestamp.store(now_nanos(), Ordering::Relaxed);
            }
        })?;

        watcher.watch(directory, RecursiveMode::NonRecursive)?;

        Ok(watcher)
    }
}
