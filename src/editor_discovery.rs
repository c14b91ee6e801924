//! Discovery of installed code editors
//!
//! Probing the file system for editors is slow compared to a generation pass,
//! so it runs as a single background job whose result is cached under the
//! generation token that started it. Only [`EditorDiscovery::invalidate`]
//! moves the token forward.

use std::path::PathBuf;

use log::{info, warn};
use tokio::task::JoinHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorKind {
    VsCode,
    VsCodeInsiders,
    Cursor,
    Rider,
}

impl EditorKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            EditorKind::VsCode => "Visual Studio Code",
            EditorKind::VsCodeInsiders => "Visual Studio Code - Insiders",
            EditorKind::Cursor => "Cursor",
            EditorKind::Rider => "JetBrains Rider",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorInstallation {
    pub kind: EditorKind,
    pub path: PathBuf,
}

/// One-shot editor discovery with a token-keyed result cache
pub struct EditorDiscovery {
    candidates: Vec<(EditorKind, PathBuf)>,
    generation: u64,
    cached: Option<(u64, Vec<EditorInstallation>)>,
    pending: Option<(u64, JoinHandle<Vec<EditorInstallation>>)>,
}

impl Default for EditorDiscovery {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorDiscovery {
    /// Discovery over the usual install locations of the current platform
    pub fn new() -> Self {
        Self::with_candidates(default_candidates())
    }

    pub fn with_candidates(candidates: Vec<(EditorKind, PathBuf)>) -> Self {
        Self {
            candidates,
            generation: 0,
            cached: None,
            pending: None,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Drop the cached result; the next query probes again
    pub fn invalidate(&mut self) {
        self.generation += 1;
        self.cached = None;
        if let Some((_, handle)) = self.pending.take() {
            handle.abort();
        }
    }

    /// Start the probe job for the current generation unless a result or job already exists
    pub fn start(&mut self) {
        if self.cached.as_ref().is_some_and(|(token, _)| *token == self.generation) {
            return;
        }
        if self.pending.as_ref().is_some_and(|(token, _)| *token == self.generation) {
            return;
        }
        let candidates = self.candidates.clone();
        let handle = tokio::task::spawn_blocking(move || probe(&candidates));
        self.pending = Some((self.generation, handle));
    }

    /// Installed editors, probing at most once per generation
    pub async fn installations(&mut self) -> Vec<EditorInstallation> {
        if let Some((token, installations)) = &self.cached {
            if *token == self.generation {
                return installations.clone();
            }
        }

        self.start();
        let Some((token, handle)) = self.pending.take() else {
            return Vec::new();
        };

        let installations = match handle.await {
            Ok(installations) => installations,
            Err(e) => {
                warn!("Editor discovery failed: {}", e);
                Vec::new()
            }
        };
        info!("Found {} editor installations", installations.len());

        if token == self.generation {
            self.cached = Some((token, installations.clone()));
        }
        installations
    }
}

fn probe(candidates: &[(EditorKind, PathBuf)]) -> Vec<EditorInstallation> {
    candidates
        .iter()
        .filter(|(_, path)| path.exists())
        .map(|(kind, path)| EditorInstallation {
            kind: *kind,
            path: path.clone(),
        })
        .collect()
}

#[cfg(target_os = "windows")]
fn default_candidates() -> Vec<(EditorKind, PathBuf)> {
    let mut candidates = Vec::new();
    if let Some(local) = dirs::data_local_dir() {
        let programs = local.join("Programs");
        candidates.push((EditorKind::VsCode, programs.join("Microsoft VS Code").join("Code.exe")));
        candidates.push((
            EditorKind::VsCodeInsiders,
            programs.join("Microsoft VS Code Insiders").join("Code - Insiders.exe"),
        ));
        candidates.push((EditorKind::Cursor, programs.join("cursor").join("Cursor.exe")));
        candidates.push((EditorKind::Rider, programs.join("Rider").join("bin").join("rider64.exe")));
    }
    candidates.push((
        EditorKind::VsCode,
        PathBuf::from(r"C:\Program Files\Microsoft VS Code\Code.exe"),
    ));
    candidates
}

#[cfg(target_os = "macos")]
fn default_candidates() -> Vec<(EditorKind, PathBuf)> {
    let applications = PathBuf::from("/Applications");
    vec![
        (EditorKind::VsCode, applications.join("Visual Studio Code.app")),
        (EditorKind::VsCodeInsiders, applications.join("Visual Studio Code - Insiders.app")),
        (EditorKind::Cursor, applications.join("Cursor.app")),
        (EditorKind::Rider, applications.join("Rider.app")),
    ]
}

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
fn default_candidates() -> Vec<(EditorKind, PathBuf)> {
    let mut candidates = vec![
        (EditorKind::VsCode, PathBuf::from("/usr/share/code/code")),
        (EditorKind::VsCode, PathBuf::from("/snap/bin/code")),
        (EditorKind::VsCodeInsiders, PathBuf::from("/usr/share/code-insiders/code-insiders")),
        (EditorKind::Cursor, PathBuf::from("/usr/bin/cursor")),
        (EditorKind::Rider, PathBuf::from("/opt/rider/bin/rider.sh")),
        (EditorKind::Rider, PathBuf::from("/snap/bin/rider")),
    ];
    if let Some(data) = dirs::data_local_dir() {
        candidates.push((
            EditorKind::Rider,
            data.join("JetBrains").join("Toolbox").join("apps").join("rider").join("bin").join("rider.sh"),
        ));
    }
    candidates
}
