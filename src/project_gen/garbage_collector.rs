//! Removal of descriptors left over from earlier passes

use std::fs;
use std::path::{Path, PathBuf};

use log::{error, warn};

use super::error::{GenResult, IoContext};
use super::path_utils::paths_equal;

/// Outcome of one collection run
#[derive(Debug, Default)]
pub struct GarbageCollection {
    pub deleted: Vec<PathBuf>,
    /// Files that could not be deleted, with the reason
    pub failed: Vec<(PathBuf, std::io::Error)>,
}

/// Delete files in `dir` whose extension is in `extensions` and which are not in `keep`.
///
/// Scanning errors abort the run. A file that cannot be deleted is logged and
/// recorded, and the remaining files are still processed.
pub fn collect_garbage(dir: &Path, extensions: &[&str], keep: &[PathBuf]) -> GenResult<GarbageCollection> {
    let mut candidates = Vec::new();
    let entries = fs::read_dir(dir).with_io_context("Failed to read output directory", dir)?;
    for entry in entries {
        let path = entry.with_io_context("Failed to read output directory entry", dir)?.path();
        if !path.is_file() {
            continue;
        }
        let has_extension = path
            .extension()
            .and_then(|s| s.to_str())
            .is_some_and(|ext| extensions.iter().any(|wanted| ext.eq_ignore_ascii_case(wanted)));
        if has_extension && !is_kept(&path, keep) {
            candidates.push(path);
        }
    }
    candidates.sort();

    Ok(delete_candidates(candidates))
}

/// Delete every candidate, recording failures instead of stopping at the first one
fn delete_candidates(candidates: Vec<PathBuf>) -> GarbageCollection {
    let mut collection = GarbageCollection::default();
    for path in candidates {
        match fs::remove_file(&path) {
            Ok(()) => {
                warn!("Deleted stale project file {}", path.display());
                collection.deleted.push(path);
            }
            Err(e) => {
                error!("Failed to delete stale project file {}: {}", path.display(), e);
                collection.failed.push((path, e));
            }
        }
    }
    collection
}

fn is_kept(path: &Path, keep: &[PathBuf]) -> bool {
    let Some(name) = path.file_name().map(|s| s.to_string_lossy()) else {
        return false;
    };
    keep.iter().any(|kept| {
        kept.parent() == path.parent()
            && kept
                .file_name()
                .is_some_and(|kept_name| paths_equal(&kept_name.to_string_lossy(), &name))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_stale_descriptors_are_deleted() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path();
        for name in ["Game.csproj", "Old.csproj", "Project.sln", "Stale.sln", "notes.txt"] {
            fs::write(dir.join(name), "x").unwrap();
        }
        fs::create_dir(dir.join("Folder.csproj")).unwrap();

        let keep = vec![dir.join("Game.csproj"), dir.join("Project.sln")];
        let collection = collect_garbage(dir, &["csproj", "sln"], &keep).unwrap();

        assert_eq!(collection.deleted, vec![dir.join("Old.csproj"), dir.join("Stale.sln")]);
        assert!(collection.failed.is_empty());
        assert!(dir.join("Game.csproj").exists());
        assert!(dir.join("Project.sln").exists());
        assert!(dir.join("notes.txt").exists());
        assert!(dir.join("Folder.csproj").is_dir());
        assert!(!dir.join("Old.csproj").exists());
    }

    #[test]
    fn test_failed_deletion_is_recorded_and_rest_still_deleted() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path();
        fs::write(dir.join("Old.csproj"), "x").unwrap();
        fs::write(dir.join("Stale.sln"), "x").unwrap();

        // already gone by the time it is deleted
        let vanished = dir.join("Gone.csproj");
        let collection = delete_candidates(vec![
            vanished.clone(),
            dir.join("Old.csproj"),
            dir.join("Stale.sln"),
        ]);

        assert_eq!(collection.failed.len(), 1);
        assert_eq!(collection.failed[0].0, vanished);
        assert_eq!(collection.failed[0].1.kind(), std::io::ErrorKind::NotFound);
        assert_eq!(collection.deleted, vec![dir.join("Old.csproj"), dir.join("Stale.sln")]);
        assert!(!dir.join("Old.csproj").exists());
        assert!(!dir.join("Stale.sln").exists());
    }

    #[test]
    fn test_missing_directory_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let result = collect_garbage(&temp_dir.path().join("missing"), &["csproj"], &[]);
        assert!(result.is_err());
    }
}
