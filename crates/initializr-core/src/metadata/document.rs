//! Metadata document types and parsing

use crate::error::Result;
use serde::Deserialize;
use std::collections::HashMap;

/// Key of the hierarchical dependency field
const DEPENDENCIES_KEY: &str = "dependencies";

/// One selectable entry of a value-set or dependency category
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ValueEntry {
    pub id: String,

    pub name: String,

    #[serde(default)]
    pub description: Option<String>,
}

/// A field's selectable values plus its declared default
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ValueSet {
    /// Declared default; an id for choice fields, a literal for text fields
    #[serde(default)]
    pub default: Option<serde_json::Value>,

    #[serde(default)]
    pub description: Option<String>,

    /// Entries in document order
    #[serde(default)]
    pub values: Vec<ValueEntry>,
}

impl ValueSet {
    /// Declared default as a string, if it is one
    pub fn default_value(&self) -> Option<&str> {
        self.default.as_ref().and_then(|v| v.as_str())
    }

    /// 0-based position of the entry whose id equals the declared default
    pub fn default_position(&self) -> Option<usize> {
        let default = self.default_value()?;
        self.values.iter().position(|entry| entry.id == default)
    }
}

/// A named group of dependencies, shown as a first-level menu entry
#[derive(Debug, Clone, Deserialize)]
pub struct DependencyCategory {
    pub name: String,

    #[serde(default)]
    pub values: Vec<ValueEntry>,
}

/// All dependency categories in document order
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DependencyCatalog {
    #[serde(default)]
    pub values: Vec<DependencyCategory>,
}

impl DependencyCatalog {
    pub fn categories(&self) -> &[DependencyCategory] {
        &self.values
    }

    /// Look an id up across every category
    pub fn find(&self, id: &str) -> Option<&ValueEntry> {
        self.values
            .iter()
            .flat_map(|category| category.values.iter())
            .find(|entry| entry.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.find(id).is_some()
    }
}

/// The metadata document served by the generator, immutable once parsed
#[derive(Debug, Clone, Default)]
pub struct MetadataDocument {
    fields: HashMap<String, ValueSet>,
    dependencies: DependencyCatalog,
}

impl MetadataDocument {
    /// Parse a metadata document from raw JSON bytes
    ///
    /// Top-level entries that are not value-set shaped (links, plain strings) are skipped.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let root: serde_json::Map<String, serde_json::Value> = serde_json::from_slice(bytes)?;

        let mut fields = HashMap::new();
        let mut dependencies = DependencyCatalog::default();

        for (key, value) in root {
            if key == DEPENDENCIES_KEY {
                dependencies = serde_json::from_value(value)?;
            } else if let Ok(set) = serde_json::from_value::<ValueSet>(value) {
                fields.insert(key, set);
            }
        }

        Ok(Self {
            fields,
            dependencies,
        })
    }

    /// Value-set for a field key
    pub fn value_set(&self, key: &str) -> Option<&ValueSet> {
        self.fields.get(key)
    }

    /// Free-text description embedded for a field, ignoring empty and literal "null" values
    pub fn description(&self, key: &str) -> Option<&str> {
        self.fields
            .get(key)
            .and_then(|set| set.description.as_deref())
            .map(str::trim)
            .filter(|d| !d.is_empty() && *d != "null")
    }

    /// Declared default for a text field
    pub fn text_default(&self, key: &str) -> Option<&str> {
        self.fields
            .get(key)
            .and_then(ValueSet::default_value)
            .filter(|d| !d.is_empty())
    }

    pub fn dependencies(&self) -> &DependencyCatalog {
        &self.dependencies
    }
}
