//! The wizard's linear run: metadata, fields, dependencies, confirmation, download

use super::dependencies::select_dependencies;
use super::prompts::{collect_choice, collect_text, confirm};
use super::screen::Screen;
use crate::cleanup::CleanupRegistry;
use crate::download::{extract_archive, extraction_hint, ArchiveDownloader};
use crate::error::Result;
use crate::fields::{ARTIFACT_ID, CHOICE_FIELDS, GROUP_ID};
use crate::metadata::MetadataClient;
use crate::product::{Endpoints, ProductConfig};
use crate::query::{build_query, QueryAccumulator};
use crate::session::SessionState;
use colored::Colorize;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing::info;

/// Options for one wizard run
#[derive(Debug, Clone)]
pub struct WizardArgs {
    /// Metadata endpoint override
    pub metadata_url: Option<String>,

    /// Archive endpoint override
    pub archive_url: Option<String>,

    /// Directory the archive is written to
    pub output_dir: PathBuf,

    /// Unpack the archive after downloading it
    pub extract: bool,

    /// Skip the final confirmation
    pub yes: bool,

    /// Temporary files created during the run are registered here while they exist
    pub cleanup: CleanupRegistry,
}

impl Default for WizardArgs {
    fn default() -> Self {
        Self {
            metadata_url: None,
            archive_url: None,
            output_dir: PathBuf::from("."),
            extract: false,
            yes: false,
            cleanup: CleanupRegistry::default(),
        }
    }
}

/// How a run ended without error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The archive was written to this path
    Generated(PathBuf),
    /// The user declined at the confirmation prompt
    Declined,
}

/// Run the wizard end to end on `screen`
///
/// The metadata spool file is removed when this returns, whatever the result. While the run
/// is in progress the spool is registered in `args.cleanup` so an interrupt can remove it.
pub async fn run<C: ProductConfig, R: BufRead, W: Write>(
    config: &C,
    args: &WizardArgs,
    screen: &mut Screen<R, W>,
) -> Result<Outcome> {
    let endpoints = Endpoints::resolve(
        config,
        args.metadata_url.as_deref(),
        args.archive_url.as_deref(),
    )?;

    screen.line(format!("Fetching metadata from {}", endpoints.metadata).dimmed().to_string())?;
    let metadata = MetadataClient::from_config(config, endpoints.metadata.clone())
        .fetch()
        .await?;
    let _spool = args.cleanup.track(metadata.spool_path());
    let document = &metadata.document;
    info!(spool = %metadata.spool_path().display(), "metadata loaded");

    let mut session = SessionState::new();
    let mut query = QueryAccumulator::new();

    for field in CHOICE_FIELDS {
        collect_choice(screen, document, &mut session, &mut query, field)?;
    }

    for field in [GROUP_ID, ARTIFACT_ID] {
        let default = field.default_from(document);
        collect_text(screen, &mut session, &mut query, field, default)?;
    }

    session.derive_fields(&mut query, config.project_description());

    select_dependencies(screen, document, &mut session, &mut query)?;

    if !args.yes && !confirm(screen, &session)? {
        info!("generation declined");
        screen.line("Project generation cancelled.".yellow().to_string())?;
        return Ok(Outcome::Declined);
    }

    let query_string = build_query(&query);
    let downloader =
        ArchiveDownloader::from_config(config, endpoints.archive, args.output_dir.clone());
    let stem = session.archive_stem(config.fallback_archive_stem());

    screen.line(format!("Downloading {}.zip ...", stem).dimmed().to_string())?;
    let archive = downloader.download(&query_string, stem).await?;

    screen.line(format!(
        "{} {}",
        "Project saved to".green().bold(),
        archive.display()
    ))?;

    if args.extract {
        let count = extract_archive(&archive, &args.output_dir)?;
        screen.line(format!(
            "{} {} files into {}",
            "Extracted".green(),
            count,
            args.output_dir.display()
        ))?;
    } else {
        screen.line(format!(
            "Extract it with: {}",
            extraction_hint(&archive, &args.output_dir).cyan()
        ))?;
    }

    Ok(Outcome::Generated(archive))
}
