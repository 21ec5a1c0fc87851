//! Persistent settings: ignore list, editor preferences and recent
//! comparisons, stored as YAML.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{DivergeError, Result};
use crate::input_validation::validate_ignore_dir;

/// Most-recent-comparisons list is capped at this many entries.
pub const MAX_RECENT_COMPARISONS: usize = 10;

const DEFAULT_IGNORE_DIRS: &[&str] = &[
    ".git",
    "node_modules",
    "__pycache__",
    "venv",
    ".venv",
    "target",
    ".DS_Store",
    ".idea",
    ".vscode",
    "dist",
    "build",
    ".next",
    ".nuxt",
    "coverage",
    ".tox",
    ".mypy_cache",
    ".pytest_cache",
    ".cargo",
    ".terraform",
    "vendor",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorPreferences {
    pub minimap_enabled: bool,
    pub show_full_content: bool,
    pub sidebar_width: u32,
}

impl Default for EditorPreferences {
    fn default() -> Self {
        Self {
            minimap_enabled: false,
            show_full_content: false,
            sidebar_width: 280,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentComparison {
    pub left_dir: String,
    pub right_dir: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub ignore_dirs: Vec<String>,
    #[serde(default)]
    pub editor_preferences: EditorPreferences,
    #[serde(default)]
    pub recent_comparisons: Vec<RecentComparison>,
}

pub fn default_config() -> AppConfig {
    AppConfig {
        ignore_dirs: DEFAULT_IGNORE_DIRS.iter().map(|s| s.to_string()).collect(),
        editor_preferences: EditorPreferences::default(),
        recent_comparisons: Vec::new(),
    }
}

pub trait ConfigStore: Send + Sync {
    fn load(&self) -> Result<AppConfig>;
    fn save(&self, config: &AppConfig) -> Result<()>;
}

/// YAML file store. `DIVERGE_CONFIG_PATH` overrides `~/.diverge/config.yaml`.
pub struct YamlConfigStore {
    path: PathBuf,
}

impl YamlConfigStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn from_env() -> Result<Self> {
        Ok(Self::new(default_config_path()?))
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

pub fn default_config_path() -> Result<PathBuf> {
    if let Ok(path) = std::env::var("DIVERGE_CONFIG_PATH") {
        return Ok(PathBuf::from(path));
    }
    let home = dirs::home_dir()
        .ok_or_else(|| DivergeError::Config("Could not determine home directory".to_string()))?;
    Ok(home.join(".diverge").join("config.yaml"))
}

impl ConfigStore for YamlConfigStore {
    /// Writes the defaults on first load.
    fn load(&self) -> Result<AppConfig> {
        if !self.path.exists() {
            let config = default_config();
            self.save(&config)?;
            return Ok(config);
        }

        let contents = fs::read_to_string(&self.path)
            .map_err(|e| DivergeError::Config(format!("Failed to read config: {e}")))?;
        serde_yaml::from_str(&contents)
            .map_err(|e| DivergeError::Config(format!("Failed to parse config: {e}")))
    }

    fn save(&self, config: &AppConfig) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                DivergeError::Config(format!("Failed to create config directory: {e}"))
            })?;
        }

        let yaml = serde_yaml::to_string(config)
            .map_err(|e| DivergeError::Config(format!("Failed to serialize config: {e}")))?;
        fs::write(&self.path, yaml)
            .map_err(|e| DivergeError::Config(format!("Failed to write config: {e}")))
    }
}

/// Editable view over the stored config.
///
/// Ignore-list edits only mark the settings dirty until [`Settings::save`];
/// editor preferences and recent comparisons are persisted immediately.
pub struct Settings {
    store: Box<dyn ConfigStore>,
    config: AppConfig,
    dirty: bool,
}

impl Settings {
    pub fn load(store: Box<dyn ConfigStore>) -> Result<Self> {
        let config = store.load()?;
        Ok(Self {
            store,
            config,
            dirty: false,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Adds a trimmed entry. Returns `false` for empty or duplicate entries.
    pub fn add_ignore_dir(&mut self, dir: &str) -> Result<bool> {
        let trimmed = dir.trim();
        if trimmed.is_empty() || self.config.ignore_dirs.iter().any(|d| d == trimmed) {
            return Ok(false);
        }
        validate_ignore_dir(trimmed).map_err(|e| DivergeError::Config(e.to_string()))?;

        self.config.ignore_dirs.push(trimmed.to_string());
        self.dirty = true;
        Ok(true)
    }

    pub fn remove_ignore_dir(&mut self, dir: &str) -> bool {
        let before = self.config.ignore_dirs.len();
        self.config.ignore_dirs.retain(|d| d != dir);
        self.dirty = true;
        self.config.ignore_dirs.len() != before
    }

    /// Renames an entry in place. Empty, unchanged or duplicate names are ignored.
    pub fn edit_ignore_dir(&mut self, old: &str, new: &str) -> Result<bool> {
        let trimmed = new.trim();
        if trimmed.is_empty()
            || trimmed == old
            || self.config.ignore_dirs.iter().any(|d| d == trimmed)
        {
            return Ok(false);
        }
        validate_ignore_dir(trimmed).map_err(|e| DivergeError::Config(e.to_string()))?;

        let mut changed = false;
        for entry in self.config.ignore_dirs.iter_mut() {
            if entry.as_str() == old {
                *entry = trimmed.to_string();
                changed = true;
            }
        }
        self.dirty = true;
        Ok(changed)
    }

    pub fn update_editor_preferences(
        &mut self,
        update: impl FnOnce(&mut EditorPreferences),
    ) -> Result<()> {
        update(&mut self.config.editor_preferences);
        self.store.save(&self.config)
    }

    /// Moves the pair to the front, dropping an older duplicate and anything
    /// past [`MAX_RECENT_COMPARISONS`].
    pub fn add_recent_comparison(&mut self, left_dir: &str, right_dir: &str) -> Result<()> {
        let recent = &mut self.config.recent_comparisons;
        recent.retain(|r| !(r.left_dir == left_dir && r.right_dir == right_dir));
        recent.insert(
            0,
            RecentComparison {
                left_dir: left_dir.to_string(),
                right_dir: right_dir.to_string(),
            },
        );
        recent.truncate(MAX_RECENT_COMPARISONS);
        self.store.save(&self.config)
    }

    pub fn remove_recent_comparison(&mut self, left_dir: &str, right_dir: &str) -> Result<()> {
        self.config
            .recent_comparisons
            .retain(|r| !(r.left_dir == left_dir && r.right_dir == right_dir));
        self.store.save(&self.config)
    }

    pub fn save(&mut self) -> Result<()> {
        self.store.save(&self.config)?;
        self.dirty = false;
        Ok(())
    }
}
