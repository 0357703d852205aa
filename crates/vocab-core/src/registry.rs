//! Module name to deck file mapping, persisted as JSON.

use crate::error::{CoreError, CoreResult};
use indexmap::IndexMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Entry written when no registry file exists yet.
pub const DEFAULT_MODULE: (&str, &str) = ("B2: Verben mit Präpositionen", "vokabeln.csv");

/// Suffix of deck files created for new modules.
pub const CUSTOM_DECK_SUFFIX: &str = "_custom.csv";

/// Deck file name for a new module: lower-cased, letters and digits only, plus suffix.
///
/// `"Mein Modul!"` becomes `"meinmodul_custom.csv"`.
pub fn location_for(name: &str) -> String {
    let stem: String = name
        .chars()
        .flat_map(char::to_lowercase)
        .filter(|c| c.is_alphanumeric())
        .collect();
    format!("{stem}{CUSTOM_DECK_SUFFIX}")
}

/// Registered modules, in file order.
#[derive(Debug, Clone)]
pub struct ModuleRegistry {
    path: PathBuf,
    modules: IndexMap<String, String>,
}

impl ModuleRegistry {
    /// Load the registry, creating it with the default entry if absent.
    pub fn load(path: impl Into<PathBuf>) -> CoreResult<Self> {
        let path = path.into();
        if !path.exists() {
            let registry = Self::with_default(path);
            registry.save()?;
            info!(path = %registry.path.display(), "created default module registry");
            return Ok(registry);
        }

        let content = fs::read_to_string(&path)?;
        let modules: IndexMap<String, String> = serde_json::from_str(&content)
            .map_err(|err| CoreError::Registry(format!("{}: {err}", path.display())))?;
        Ok(Self { path, modules })
    }

    /// In-memory registry holding only the default entry.
    pub fn with_default(path: impl Into<PathBuf>) -> Self {
        let (name, location) = DEFAULT_MODULE;
        Self {
            path: path.into(),
            modules: IndexMap::from([(name.to_string(), location.to_string())]),
        }
    }

    /// Overwrite the registry file.
    pub fn save(&self) -> CoreResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let content = serde_json::to_string_pretty(&self.modules)?;
        fs::write(&self.path, content)?;
        Ok(())
    }

    /// Add a module. The caller persists the registry.
    pub fn register_new(&mut self, name: impl Into<String>, location: impl Into<String>) -> CoreResult<()> {
        let name = name.into();
        if self.modules.contains_key(&name) {
            return Err(CoreError::DuplicateModule(name));
        }
        self.modules.insert(name, location.into());
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Module names in display order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.modules.keys().map(String::as_str)
    }

    /// Stored location, as written in the file.
    pub fn location(&self, name: &str) -> Option<&str> {
        self.modules.get(name).map(String::as_str)
    }

    /// Deck path for a module. Relative locations are taken from the registry's directory.
    pub fn resolve(&self, name: &str) -> Option<PathBuf> {
        let location = Path::new(self.location(name)?);
        if location.is_absolute() {
            return Some(location.to_path_buf());
        }
        let base = self.path.parent().unwrap_or_else(|| Path::new(""));
        Some(base.join(location))
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}
