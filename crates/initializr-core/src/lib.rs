//! Initializr Core - Shared library for the project-generation wizard
//!
//! This library collects project parameters interactively, validates them against the
//! generator's metadata document and downloads the generated archive.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Core Operations** - Metadata fetching, field registry, query building, archive download
//! - **Layer 2: Session** - `SessionState` and `QueryAccumulator`, passed explicitly through every prompt
//! - **Layer 3: CLI/TUI Interface** - Line-based prompts and the wizard run loop (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the interactive prompt modules
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use initializr_core::{MetadataClient, QueryAccumulator, build_query};
//!
//! let metadata = MetadataClient::new(url, "application/json", "my-agent").fetch().await?;
//! let mut query = QueryAccumulator::new();
//! query.push("type", "maven-project");
//! let query_string = build_query(&query);
//! ```

pub mod cleanup;
pub mod download;
pub mod error;
pub mod fields;
pub mod metadata;
pub mod product;
pub mod query;
pub mod session;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use cleanup::{CleanupRegistry, Registration};
pub use download::ArchiveDownloader;
pub use error::{InputError, Rejection, Result, WizardError};
pub use metadata::{FetchedMetadata, MetadataClient, MetadataDocument};
pub use product::{Endpoints, ProductConfig};
pub use query::{build_query, encode_component, QueryAccumulator};
pub use session::SessionState;

#[cfg(feature = "tui")]
pub use tui::run;
