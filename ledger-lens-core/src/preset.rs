//! Named, persisted filter groups.
//!
//! The engine only ever talks to a [`PresetStore`]; hosts wire in
//! whatever persistence they have. Two implementations ship: an
//! in-process map and a JSON file under the platform data dir.

use crate::group::FilterGroup;
use chrono::{DateTime, Utc};
use ledger_lens_common::{LedgerLensError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterPreset {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub group: FilterGroup,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub is_default: bool,
}

/// The narrow persistence contract the host supplies. `save` upserts by
/// preset id; `delete` is idempotent when the id is absent.
pub trait PresetStore {
    fn save(&mut self, preset: FilterPreset) -> Result<()>;
    fn list(&self) -> Result<Vec<FilterPreset>>;
    fn delete(&mut self, id: &str) -> Result<()>;
}

/// In-process store for tests and ephemeral hosts.
#[derive(Debug, Default)]
pub struct MemoryPresetStore {
    presets: Vec<FilterPreset>,
}

impl MemoryPresetStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PresetStore for MemoryPresetStore {
    fn save(&mut self, preset: FilterPreset) -> Result<()> {
        match self.presets.iter_mut().find(|p| p.id == preset.id) {
            Some(slot) => *slot = preset,
            None => self.presets.push(preset),
        }
        Ok(())
    }

    fn list(&self) -> Result<Vec<FilterPreset>> {
        Ok(self.presets.clone())
    }

    fn delete(&mut self, id: &str) -> Result<()> {
        self.presets.retain(|p| p.id != id);
        Ok(())
    }
}

/// Pretty-printed JSON file store. An absent file reads as an empty list.
#[derive(Debug, Clone)]
pub struct FilePresetStore {
    path: PathBuf,
}

impl FilePresetStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn default_path() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("ledger-lens")
            .join("presets.json")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<Vec<FilterPreset>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&content)?)
    }

    fn write_all(&self, presets: &[FilterPreset]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_string_pretty(presets)?)?;
        Ok(())
    }
}

impl Default for FilePresetStore {
    fn default() -> Self {
        Self::new(Self::default_path())
    }
}

impl PresetStore for FilePresetStore {
    fn save(&mut self, preset: FilterPreset) -> Result<()> {
        let mut presets = self.read_all()?;
        match presets.iter_mut().find(|p| p.id == preset.id) {
            Some(slot) => *slot = preset,
            None => presets.push(preset),
        }
        self.write_all(&presets)
    }

    fn list(&self) -> Result<Vec<FilterPreset>> {
        self.read_all()
    }

    fn delete(&mut self, id: &str) -> Result<()> {
        let mut presets = self.read_all()?;
        let before = presets.len();
        presets.retain(|p| p.id != id);
        if presets.len() != before {
            self.write_all(&presets)?;
        }
        Ok(())
    }
}

/// Preset CRUD over any store. Stored groups are snapshots: saving clones
/// the working group, loading clones the stored one, so neither side can
/// mutate the other.
#[derive(Debug)]
pub struct PresetManager<S: PresetStore> {
    store: S,
}

impl<S: PresetStore> PresetManager<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Rejects empty (or all-whitespace) names.
    pub fn save(
        &mut self,
        name: &str,
        description: Option<&str>,
        group: &FilterGroup,
    ) -> Result<FilterPreset> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LedgerLensError::Validation("preset name required".into()));
        }
        let preset = FilterPreset {
            id: Uuid::new_v4().to_string(),
            name: name.to_owned(),
            description: description.map(|d| d.to_owned()),
            group: group.clone(),
            created_at: Utc::now(),
            is_default: false,
        };
        self.store.save(preset.clone())?;
        Ok(preset)
    }

    pub fn list(&self) -> Result<Vec<FilterPreset>> {
        self.store.list()
    }

    /// A fresh copy of the stored group; mutating it never touches the
    /// preset.
    pub fn load(&self, id: &str) -> Result<Option<FilterGroup>> {
        Ok(self
            .store
            .list()?
            .into_iter()
            .find(|p| p.id == id)
            .map(|p| p.group))
    }

    pub fn delete(&mut self, id: &str) -> Result<()> {
        self.store.delete(id)
    }

    /// Marks one preset as the default, clearing the flag everywhere else.
    pub fn set_default(&mut self, id: &str) -> Result<()> {
        let presets = self.store.list()?;
        if !presets.iter().any(|p| p.id == id) {
            return Err(LedgerLensError::Validation(format!(
                "unknown preset id: {id}"
            )));
        }
        for mut preset in presets {
            let want = preset.id == id;
            if preset.is_default != want {
                preset.is_default = want;
                self.store.save(preset)?;
            }
        }
        Ok(())
    }

    pub fn default_preset(&self) -> Result<Option<FilterPreset>> {
        Ok(self.store.list()?.into_iter().find(|p| p.is_default))
    }
}
