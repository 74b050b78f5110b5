use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::config::BridgeConfig;

#[derive(Debug, Clone)]
pub struct SkinInfo {
    pub id: String,
    pub display_name: String,
    pub page: String,
    pub path: PathBuf,
}

#[derive(Debug, Clone)]
pub struct SkinManifest {
    pub display_name: String,
    pub page: String,
}

#[derive(Debug, Clone)]
pub struct LoadedManifest {
    pub manifest: SkinManifest,
    pub warnings: Vec<String>,
}

/// Read a skin's `skin.toml`. A missing or unparseable manifest degrades to
/// defaults derived from the directory name, with a warning, so one broken
/// skin never takes down discovery.
pub fn load_manifest_from_dir(skin_dir: &Path) -> Result<LoadedManifest> {
    let mut warnings = Vec::new();
    let manifest_path = skin_dir.join("skin.toml");
    let fallback_name = skin_dir
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "skin".to_string());

    let document = if manifest_path.exists() {
        let data = fs::read_to_string(&manifest_path).with_context(|| {
            format!("Failed to read skin manifest from {}", manifest_path.display())
        })?;
        match toml::from_str::<ManifestDocument>(&data) {
            Ok(doc) => doc,
            Err(err) => {
                warnings.push(format!("Failed to parse skin manifest: {err}"));
                ManifestDocument::default()
            }
        }
    } else {
        warnings.push(format!(
            "Skin folder {} missing skin.toml; using defaults",
            skin_dir.display()
        ));
        ManifestDocument::default()
    };

    Ok(LoadedManifest {
        manifest: SkinManifest {
            display_name: document.skin.display_name.unwrap_or(fallback_name),
            page: document
                .skin
                .page
                .unwrap_or_else(|| "index.html".to_string()),
        },
        warnings,
    })
}

#[derive(Debug, Default, Deserialize)]
struct ManifestDocument {
    #[serde(default)]
    skin: ManifestSection,
}

#[derive(Debug, Default, Deserialize)]
struct ManifestSection {
    display_name: Option<String>,
    page: Option<String>,
}

/// The installed skins under a resource root, with one of them selected.
pub struct SkinCatalog {
    root: PathBuf,
    skins: Vec<SkinInfo>,
    current_index: usize,
    warnings: Vec<String>,
}

impl SkinCatalog {
    pub fn discover(root: impl AsRef<Path>, default_skin: Option<&str>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        let mut entries = Vec::new();
        let mut warnings = Vec::new();

        if root.exists() {
            for entry in fs::read_dir(&root)
                .with_context(|| format!("Failed to list skins directory: {}", root.display()))?
            {
                let entry = entry?;
                if !entry.file_type()?.is_dir() {
                    continue;
                }
                let id = entry.file_name().to_string_lossy().to_string();
                let path = entry.path();
                match load_manifest_from_dir(&path) {
                    Ok(LoadedManifest {
                        manifest,
                        warnings: mut manifest_warnings,
                    }) => {
                        warnings.append(&mut manifest_warnings);
                        entries.push(SkinInfo {
                            id,
                            display_name: manifest.display_name,
                            page: manifest.page,
                            path,
                        });
                    }
                    Err(err) => {
                        tracing::warn!("Failed to load skin {id}: {err:?}");
                    }
                }
            }
        }

        if entries.is_empty() {
            warnings.push(format!("No skins found under {}", root.display()));
        }

        entries.sort_by(|a, b| a.display_name.cmp(&b.display_name));

        let current_index = default_skin
            .and_then(|name| {
                entries
                    .iter()
                    .position(|s| s.id == name || s.display_name == name)
            })
            .unwrap_or(0);

        Ok(Self {
            root,
            skins: entries,
            current_index,
            warnings,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn skin_list(&self) -> &[SkinInfo] {
        &self.skins
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn current_skin(&self) -> Option<&SkinInfo> {
        self.skins.get(self.current_index)
    }

    pub fn set_skin(&mut self, id_or_name: &str) -> Result<()> {
        if let Some(index) = self
            .skins
            .iter()
            .position(|skin| skin.id == id_or_name || skin.display_name == id_or_name)
        {
            self.current_index = index;
            Ok(())
        } else {
            Err(anyhow!("Skin '{id_or_name}' not found"))
        }
    }

    /// A bridge configuration pointing at the selected skin: its directory
    /// becomes the resource root and its manifest page the page identifier.
    pub fn config_for_current(&self, base: &BridgeConfig) -> Option<BridgeConfig> {
        self.current_skin().map(|skin| {
            let mut config = base.clone();
            config.skin_root = skin.path.clone();
            config.page_identifier = skin.page.clone();
            config
        })
    }
}
