//! Filter state store
//!
//! Persists the active filters as `{query, labels: [..], statuses: [..]}`.
//! Sets are converted to lists only at this boundary.

use std::sync::Arc;

use anyhow::{Context, Result};

use super::blob::BlobStore;
use crate::domain::{FilterBlob, FilterPatch, FilterState};

/// Blob key for the filter settings
pub const SETTINGS_KEY: &str = "month_planner_settings_v1";

/// Write-through holder of the current [`FilterState`]
pub struct FilterStore {
    blobs: Arc<dyn BlobStore>,
    state: FilterState,
}

impl FilterStore {
    /// Loads saved filters; a missing blob means no filters
    pub fn load(blobs: Arc<dyn BlobStore>) -> Result<Self> {
        let state = match blobs.get(SETTINGS_KEY)? {
            Some(raw) => {
                let blob: FilterBlob = serde_json::from_str(&raw)
                    .with_context(|| format!("Corrupt blob '{}'", SETTINGS_KEY))?;
                FilterState::from(blob)
            }
            None => FilterState::default(),
        };

        Ok(Self { blobs, state })
    }

    pub fn get(&self) -> &FilterState {
        &self.state
    }

    /// Merges `patch` into the current filters
    pub fn set(&mut self, patch: FilterPatch) -> Result<&FilterState> {
        self.state.apply(patch);
        self.persist()?;
        Ok(&self.state)
    }

    /// Resets to an empty query and empty label/status sets
    pub fn clear(&mut self) -> Result<()> {
        self.state = FilterState::default();
        self.persist()
    }

    /// Checkbox toggle for a label; returns true if now selected
    pub fn toggle_label(&mut self, key: &str) -> Result<bool> {
        let selected = self.state.toggle_label(key);
        self.persist()?;
        Ok(selected)
    }

    /// Checkbox toggle for a status; returns true if now selected
    pub fn toggle_status(&mut self, key: &str) -> Result<bool> {
        let selected = self.state.toggle_status(key);
        self.persist()?;
        Ok(selected)
    }

    fn persist(&self) -> Result<()> {
        let raw = serde_json::to_string(&FilterBlob::from(&self.state))
            .context("Failed to serialize filters")?;
        self.blobs
            .set(SETTINGS_KEY, &raw)
            .with_context(|| format!("Failed to save blob '{}'", SETTINGS_KEY))
    }
}
