// File-backed route slot store
// JSON persistence with atomic temp file + rename writes

use super::{validate_slot_id, NamedRouteSlot, RouteStore, RouteStoreError};
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::PathBuf;

/// Store for the six named route slots with file-based persistence
#[derive(Debug)]
pub struct FileRouteStore {
    /// Slots indexed by id
    slots: HashMap<u8, NamedRouteSlot>,
    /// Path to persistence file
    config_path: PathBuf,
}

impl FileRouteStore {
    /// Create a store with the given persistence path
    pub fn new(config_path: PathBuf) -> Self {
        Self {
            slots: HashMap::new(),
            config_path,
        }
    }

    /// Create a store using the default path under the platform data dir
    pub fn with_default_path() -> Result<Self, RouteStoreError> {
        let data_dir = dirs::data_dir().ok_or_else(|| {
            RouteStoreError::LoadError("Could not determine data directory".to_string())
        })?;
        Ok(Self::new(data_dir.join("pandu").join("routes.json")))
    }

    /// Load slots from the persistence file
    pub fn load(&mut self) -> Result<(), RouteStoreError> {
        crate::debug!("Loading route slots from {:?}", self.config_path);

        if !self.config_path.exists() {
            crate::debug!("No route slot file found, starting with empty store");
            return Ok(());
        }

        let content = fs::read_to_string(&self.config_path)
            .map_err(|e| RouteStoreError::LoadError(e.to_string()))?;

        let slots: Vec<NamedRouteSlot> = serde_json::from_str(&content)
            .map_err(|e| RouteStoreError::LoadError(e.to_string()))?;

        self.slots.clear();
        for slot in slots {
            if validate_slot_id(slot.id).is_err() {
                crate::warn!("Skipping persisted slot with invalid id {}", slot.id);
                continue;
            }
            self.slots.insert(slot.id, slot);
        }

        crate::info!("Loaded {} route slots", self.slots.len());
        Ok(())
    }

    /// Persist slots to the file using atomic write (temp file + rename)
    fn save(&self) -> Result<(), RouteStoreError> {
        crate::debug!(
            "Persisting {} route slots to {:?}",
            self.slots.len(),
            self.config_path
        );

        // Ensure parent directory exists
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| RouteStoreError::PersistenceError(e.to_string()))?;
        }

        let mut slots: Vec<&NamedRouteSlot> = self.slots.values().collect();
        slots.sort_by_key(|s| s.id);
        let content = serde_json::to_string_pretty(&slots)
            .map_err(|e| RouteStoreError::PersistenceError(e.to_string()))?;

        let temp_path = self.config_path.with_extension("tmp");

        // Write to temp file with explicit sync
        {
            let mut file = File::create(&temp_path).map_err(|e| {
                RouteStoreError::PersistenceError(format!("Failed to create temp file: {}", e))
            })?;
            file.write_all(content.as_bytes()).map_err(|e| {
                RouteStoreError::PersistenceError(format!("Failed to write: {}", e))
            })?;
            file.sync_all().map_err(|e| {
                RouteStoreError::PersistenceError(format!("Failed to sync: {}", e))
            })?;
        } // File closed here

        // Atomic rename
        fs::rename(&temp_path, &self.config_path).map_err(|e| {
            // Clean up temp file on error
            let _ = fs::remove_file(&temp_path);
            RouteStoreError::PersistenceError(format!("Failed to rename: {}", e))
        })?;

        crate::debug!("Route slots persisted successfully");
        Ok(())
    }
}

impl RouteStore for FileRouteStore {
    fn get(&self, id: u8) -> Result<Option<NamedRouteSlot>, RouteStoreError> {
        validate_slot_id(id)?;
        Ok(self.slots.get(&id).cloned())
    }

    fn set(&mut self, slot: NamedRouteSlot) -> Result<(), RouteStoreError> {
        validate_slot_id(slot.id)?;
        self.slots.insert(slot.id, slot);
        self.save()
    }

    fn delete(&mut self, id: u8) -> Result<(), RouteStoreError> {
        validate_slot_id(id)?;
        if self.slots.remove(&id).is_some() {
            self.save()?;
        }
        Ok(())
    }

    fn list(&self) -> Vec<NamedRouteSlot> {
        let mut slots: Vec<NamedRouteSlot> = self.slots.values().cloned().collect();
        slots.sort_by_key(|s| s.id);
        slots
    }
}

#[cfg(test)]
#[path = "file_test.rs"]
mod tests;
