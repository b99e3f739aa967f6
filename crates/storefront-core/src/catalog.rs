//! Two-level region catalog (region → sub-region) used to scope fulfillment
//! points.
//!
//! The catalog is immutable once built. Callers receive it by injection
//! (usually behind an `Arc`) so tests can substitute small fixtures for the
//! bundled dataset. Lookups never fail: unknown keys yield empty results.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

const BUNDLED_REGIONS: &str = include_str!("../data/regions.yaml");

/// Top-level administrative region, unique within a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Region(String);

impl Region {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Region {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Second-level region. Unique only within its owning [`Region`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubRegion(String);

impl SubRegion {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SubRegion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SubRegion {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionEntry {
    pub name: Region,
    #[serde(default)]
    pub sub_regions: Vec<SubRegion>,
}

#[derive(Debug, Deserialize)]
struct RegionsFile {
    regions: Vec<RegionEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionCatalog {
    entries: Vec<RegionEntry>,
}

impl RegionCatalog {
    /// Builds a catalog from already-parsed entries, preserving their order.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] if a name is blank, two regions
    /// share a name, or a region lists the same sub-region twice (all
    /// comparisons are case-insensitive).
    pub fn from_entries(entries: Vec<RegionEntry>) -> Result<Self, ConfigError> {
        validate_entries(&entries)?;
        Ok(Self { entries })
    }

    /// Parses a catalog from YAML shaped as `regions: [{ name, sub_regions }]`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::RegionsFileParse`] on malformed YAML and
    /// [`ConfigError::Validation`] if the entries fail validation.
    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        let file: RegionsFile = serde_yaml::from_str(content)?;
        Self::from_entries(file.regions)
    }

    /// Loads and validates a catalog from a YAML file on disk.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::RegionsFileIo`] if the file cannot be read, or
    /// any error from [`RegionCatalog::from_yaml_str`].
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::RegionsFileIo {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_yaml_str(&content)
    }

    /// The catalog compiled into the crate (Kenyan counties and towns).
    ///
    /// # Errors
    ///
    /// Only fails if the bundled YAML is itself invalid.
    pub fn bundled() -> Result<Self, ConfigError> {
        Self::from_yaml_str(BUNDLED_REGIONS)
    }

    /// All regions in catalog order.
    #[must_use]
    pub fn list_regions(&self) -> Vec<&Region> {
        self.entries.iter().map(|e| &e.name).collect()
    }

    /// Sub-regions of `region` in catalog order; empty for an unknown region.
    #[must_use]
    pub fn list_sub_regions(&self, region: &str) -> &[SubRegion] {
        self.entry(region).map_or(&[], |e| e.sub_regions.as_slice())
    }

    /// Case-insensitive substring search over region names. A blank query
    /// returns every region.
    #[must_use]
    pub fn search_regions(&self, query: &str) -> Vec<&Region> {
        let needle = query.trim().to_lowercase();
        self.entries
            .iter()
            .map(|e| &e.name)
            .filter(|r| needle.is_empty() || r.as_str().to_lowercase().contains(&needle))
            .collect()
    }

    /// Case-insensitive substring search over the sub-regions of `region`.
    #[must_use]
    pub fn search_sub_regions(&self, region: &str, query: &str) -> Vec<&SubRegion> {
        let needle = query.trim().to_lowercase();
        self.list_sub_regions(region)
            .iter()
            .filter(|s| needle.is_empty() || s.as_str().to_lowercase().contains(&needle))
            .collect()
    }

    /// Exact-name region lookup.
    #[must_use]
    pub fn region(&self, name: &str) -> Option<&Region> {
        self.entry(name).map(|e| &e.name)
    }

    /// Exact-name lookup of `sub_region` inside `region`'s own set.
    ///
    /// Sub-region names are only unique per region, so membership must
    /// always be checked against the owning region.
    #[must_use]
    pub fn sub_region(&self, region: &str, sub_region: &str) -> Option<&SubRegion> {
        self.list_sub_regions(region)
            .iter()
            .find(|s| s.as_str() == sub_region)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn entry(&self, region: &str) -> Option<&RegionEntry> {
        if region.is_empty() {
            return None;
        }
        self.entries.iter().find(|e| e.name.as_str() == region)
    }
}

fn validate_entries(entries: &[RegionEntry]) -> Result<(), ConfigError> {
    let mut seen_regions = HashSet::new();

    for entry in entries {
        if entry.name.as_str().trim().is_empty() {
            return Err(ConfigError::Validation(
                "region name must be non-empty".to_string(),
            ));
        }

        if !seen_regions.insert(entry.name.as_str().to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate region: '{}'",
                entry.name
            )));
        }

        let mut seen_subs = HashSet::new();
        for sub in &entry.sub_regions {
            if sub.as_str().trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "region '{}' has an empty sub-region name",
                    entry.name
                )));
            }
            if !seen_subs.insert(sub.as_str().to_lowercase()) {
                return Err(ConfigError::Validation(format!(
                    "duplicate sub-region '{}' in region '{}'",
                    sub, entry.name
                )));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
