use anyhow::Context;
use serde::Deserialize;
use std::{
    env, fs,
    path::{Path, PathBuf},
    time::Duration,
};

/// Screen-space bounds of the scrub control, in surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackingRegion {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Default for TrackingRegion {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: 440.0,
            height: 16.0,
        }
    }
}

impl TrackingRegion {
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x <= self.x + self.width && y >= self.y && y <= self.y + self.height
    }

    /// Map a pointer x offset to a normalized position, clamped to [0, 1].
    pub fn position_at(&self, x: f32) -> f32 {
        if self.width <= f32::EPSILON {
            return 0.0;
        }
        ((x - self.x) / self.width).clamp(0.0, 1.0)
    }
}

#[derive(Debug, Clone)]
pub struct BridgeConfig {
    pub skin_root: PathBuf,
    pub page_identifier: String,
    pub tracking_region: TrackingRegion,
    seek_throttle_ms: u64,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            skin_root: PathBuf::from("skins"),
            page_identifier: "index.html".to_string(),
            tracking_region: TrackingRegion::default(),
            seek_throttle_ms: 250,
        }
    }
}

impl BridgeConfig {
    pub fn load() -> anyhow::Result<Self> {
        let mut candidates = Vec::new();

        if let Ok(current_dir) = env::current_dir() {
            candidates.push(current_dir.join("bridge.toml"));
            candidates.push(current_dir.join("config").join("bridge.toml"));
        }

        if let Ok(exe) = env::current_exe() {
            if let Some(dir) = exe.parent() {
                candidates.push(dir.join("bridge.toml"));
                candidates.push(dir.join("config").join("bridge.toml"));
            }
        }

        for path in candidates {
            if path.exists() {
                return Self::load_from(&path);
            }
        }

        Ok(BridgeConfig::default())
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let doc: ConfigDocument = toml::from_str(&data)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;
        Ok(doc.into())
    }

    /// Minimum interval between native seeks issued while a drag is active.
    /// The commit seek on gesture end is never throttled.
    pub fn seek_throttle(&self) -> Duration {
        Duration::from_millis(self.seek_throttle_ms.min(5_000))
    }

    pub fn with_seek_throttle_ms(mut self, ms: u64) -> Self {
        self.seek_throttle_ms = ms;
        self
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigDocument {
    #[serde(default)]
    skin: SkinSection,
    #[serde(default)]
    tracking: TrackingSection,
    #[serde(default)]
    seek: SeekSection,
}

impl From<ConfigDocument> for BridgeConfig {
    fn from(value: ConfigDocument) -> Self {
        let defaults = BridgeConfig::default();
        let region_defaults = TrackingRegion::default();

        BridgeConfig {
            skin_root: value
                .skin
                .root
                .map(PathBuf::from)
                .unwrap_or(defaults.skin_root),
            page_identifier: value.skin.page.unwrap_or(defaults.page_identifier),
            tracking_region: TrackingRegion {
                x: value.tracking.x.unwrap_or(region_defaults.x),
                y: value.tracking.y.unwrap_or(region_defaults.y),
                width: value.tracking.width.unwrap_or(region_defaults.width),
                height: value.tracking.height.unwrap_or(region_defaults.height),
            },
            seek_throttle_ms: value.seek.throttle_ms.unwrap_or(defaults.seek_throttle_ms),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct SkinSection {
    root: Option<String>,
    page: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct TrackingSection {
    x: Option<f32>,
    y: Option<f32>,
    width: Option<f32>,
    height: Option<f32>,
}

#[derive(Debug, Default, Deserialize)]
struct SeekSection {
    throttle_ms: Option<u64>,
}
