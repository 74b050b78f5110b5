use anyhow::{anyhow, Result};
use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use std::{
    path::{Path, PathBuf},
    sync::mpsc::{self, Receiver},
};

const RELEVANT_EXTENSIONS: [&str; 4] = ["html", "css", "js", "toml"];

/// Watches the skin resource root for changes. Events arrive on a channel
/// fed by the notify worker and are drained on the UI thread via `poll`;
/// nothing here blocks.
pub struct SkinWatcher {
    _watcher: RecommendedWatcher,
    changes_rx: Receiver<notify::Result<notify::Event>>,
    root: PathBuf,
}

impl SkinWatcher {
    pub fn watch(root: &Path) -> Result<Self> {
        if !root.exists() {
            return Err(anyhow!(
                "Skin directory {} does not exist",
                root.display()
            ));
        }

        let (tx, rx) = mpsc::channel();
        let mut watcher = notify::recommended_watcher(move |res| {
            let _ = tx.send(res);
        })?;
        watcher.watch(root, RecursiveMode::Recursive)?;

        Ok(Self {
            _watcher: watcher,
            changes_rx: rx,
            root: root.to_path_buf(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Drain pending events; true if any touched a skin-relevant file.
    pub fn poll(&mut self) -> bool {
        let mut changed = false;
        while let Ok(event) = self.changes_rx.try_recv() {
            match event {
                Ok(evt) => {
                    if evt.paths.iter().any(|p| is_relevant_path(p)) {
                        changed = true;
                    }
                }
                Err(err) => tracing::warn!("Skin watcher error: {err}"),
            }
        }
        changed
    }
}

fn is_relevant_path(path: &Path) -> bool {
    path.extension()
        .map(|ext| {
            RELEVANT_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
        .unwrap_or(false)
}
