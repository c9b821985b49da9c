//! Per-run session state, filled field by field and consumed once to build the request

use crate::fields::{Slot, DESCRIPTION_KEY, NAME_KEY, PACKAGE_NAME_KEY};
use crate::query::QueryAccumulator;

/// Everything the user has chosen so far
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub build_system: Option<String>,
    pub language: Option<String>,
    pub boot_version: Option<String>,
    pub java_version: Option<String>,
    pub packaging: Option<String>,
    pub group_id: Option<String>,
    pub artifact_id: Option<String>,
    /// Derived: the artifact id
    pub name: Option<String>,
    /// Derived: `<group id>.<artifact id>`
    pub package_name: Option<String>,
    pub description: Option<String>,
    /// Selected dependency ids, insertion ordered, no repeats
    dependencies: Vec<String>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot_mut(&mut self, slot: Slot) -> &mut Option<String> {
        match slot {
            Slot::BuildSystem => &mut self.build_system,
            Slot::Language => &mut self.language,
            Slot::BootVersion => &mut self.boot_version,
            Slot::JavaVersion => &mut self.java_version,
            Slot::Packaging => &mut self.packaging,
            Slot::GroupId => &mut self.group_id,
            Slot::ArtifactId => &mut self.artifact_id,
        }
    }

    pub fn set(&mut self, slot: Slot, value: &str) {
        *self.slot_mut(slot) = Some(value.to_string());
    }

    pub fn get(&self, slot: Slot) -> Option<&str> {
        match slot {
            Slot::BuildSystem => self.build_system.as_deref(),
            Slot::Language => self.language.as_deref(),
            Slot::BootVersion => self.boot_version.as_deref(),
            Slot::JavaVersion => self.java_version.as_deref(),
            Slot::Packaging => self.packaging.as_deref(),
            Slot::GroupId => self.group_id.as_deref(),
            Slot::ArtifactId => self.artifact_id.as_deref(),
        }
    }

    /// Compute name and package name, set the description, and record all three
    ///
    /// Runs at most once; later calls leave the state and the query untouched.
    /// Returns whether anything was derived.
    pub fn derive_fields(&mut self, query: &mut QueryAccumulator, description: &str) -> bool {
        if self.name.is_some() {
            return false;
        }
        let (Some(group_id), Some(artifact_id)) = (self.group_id.clone(), self.artifact_id.clone())
        else {
            return false;
        };

        let package_name = format!("{}.{}", group_id, artifact_id);
        query.push(NAME_KEY, &artifact_id);
        query.push(PACKAGE_NAME_KEY, &package_name);
        query.push(DESCRIPTION_KEY, description);

        self.name = Some(artifact_id);
        self.package_name = Some(package_name);
        self.description = Some(description.to_string());
        true
    }

    pub fn dependencies(&self) -> &[String] {
        &self.dependencies
    }

    pub fn has_dependency(&self, id: &str) -> bool {
        self.dependencies.iter().any(|d| d == id)
    }

    /// Add a dependency id; returns false if it was already selected
    pub fn add_dependency(&mut self, id: &str) -> bool {
        if self.has_dependency(id) {
            return false;
        }
        self.dependencies.push(id.to_string());
        true
    }

    /// File stem of the downloaded archive
    pub fn archive_stem<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.artifact_id.as_deref().unwrap_or(fallback)
    }

    /// Label/value rows for the status screen, only for values collected so far
    pub fn summary(&self) -> Vec<(&'static str, String)> {
        let mut rows = Vec::new();
        let scalar = [
            ("Build System", &self.build_system),
            ("Language", &self.language),
            ("Boot Version", &self.boot_version),
            ("Java Version", &self.java_version),
            ("Packaging", &self.packaging),
            ("Group Id", &self.group_id),
            ("Artifact Id", &self.artifact_id),
            ("Name", &self.name),
            ("Package Name", &self.package_name),
            ("Description", &self.description),
        ];
        for (label, value) in scalar {
            if let Some(value) = value {
                rows.push((label, value.clone()));
            }
        }
        if !self.dependencies.is_empty() {
            rows.push(("Dependencies", self.dependencies.join(", ")));
        }
        rows
    }
}
