//! Metadata document fetching and parsing
//!
//! This module provides:
//! - Metadata document types (value-sets, dependency categories)
//! - A client that fetches the document once per session and spools it to a temporary file

pub mod client;
pub mod document;

pub use client::{FetchedMetadata, MetadataClient};
pub use document::{DependencyCatalog, DependencyCategory, MetadataDocument, ValueEntry, ValueSet};
