//! Initializr wizard - interactive Spring Boot project generation

use anyhow::{Context, Result};
use clap::Parser;
use initializr_core::tui::{Outcome, Screen, WizardArgs};
use initializr_core::{CleanupRegistry, ProductConfig, WizardError};
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

/// Spring Initializr product configuration
#[derive(Clone)]
pub struct SpringInitializr;

impl ProductConfig for SpringInitializr {
    fn name(&self) -> &'static str {
        "initializr-wizard"
    }

    fn display_name(&self) -> &'static str {
        "Spring Initializr"
    }

    fn default_metadata_url(&self) -> &'static str {
        "https://start.spring.io/metadata/client"
    }

    fn metadata_url_env(&self) -> &'static str {
        "INITIALIZR_METADATA_URL"
    }

    fn default_archive_url(&self) -> &'static str {
        "https://start.spring.io/starter.zip"
    }

    fn archive_url_env(&self) -> &'static str {
        "INITIALIZR_ARCHIVE_URL"
    }

    fn metadata_media_type(&self) -> &'static str {
        "application/vnd.initializr.v2.2+json"
    }

    fn project_description(&self) -> &'static str {
        "Demo project for Spring Boot"
    }
}

#[derive(Parser, Debug)]
#[command(name = "initializr-wizard")]
#[command(about = "Interactive wizard for generating Spring Boot starter projects")]
#[command(version)]
pub struct Args {
    /// Metadata endpoint (overrides INITIALIZR_METADATA_URL)
    #[arg(long = "metadata-url")]
    pub metadata_url: Option<String>,

    /// Archive endpoint (overrides INITIALIZR_ARCHIVE_URL)
    #[arg(long = "archive-url")]
    pub archive_url: Option<String>,

    /// Directory the archive is written to
    #[arg(short, long = "output-dir", default_value = ".")]
    pub output_dir: PathBuf,

    /// Unpack the archive after downloading it
    #[arg(long)]
    pub extract: bool,

    /// Generate without asking for confirmation
    #[arg(short, long)]
    pub yes: bool,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl From<Args> for WizardArgs {
    fn from(args: Args) -> Self {
        WizardArgs {
            metadata_url: args.metadata_url,
            archive_url: args.archive_url,
            output_dir: args.output_dir,
            extract: args.extract,
            yes: args.yes,
            cleanup: CleanupRegistry::default(),
        }
    }
}

/// Initialize logging; RUST_LOG takes precedence over the verbosity flag
fn init_logging(verbose: bool) -> Result<()> {
    let level = if verbose { "debug" } else { "warn" };
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::new(format!("initializr_core={level},initializr_wizard={level}")),
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))
        .context("Failed to initialize logging")
}

/// Exit status for an error that reached the top level
fn exit_code(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<WizardError>()
        .map(WizardError::exit_code)
        .unwrap_or(1)
}

async fn run(args: Args, cleanup: CleanupRegistry) -> Result<Outcome> {
    init_logging(args.verbose)?;
    tracing::info!("{} v{} starting", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    let config = SpringInitializr;
    let mut screen = Screen::stdio(config.display_name());
    let wizard_args = WizardArgs {
        cleanup,
        ..WizardArgs::from(args)
    };
    let outcome = initializr_core::run(&config, &wizard_args, &mut screen).await?;
    Ok(outcome)
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully; exiting here skips destructors, so remove temp files first
    let cleanup = CleanupRegistry::new();
    let on_interrupt = cleanup.clone();
    ctrlc::set_handler(move || {
        on_interrupt.remove_all();
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();
    let result = run(args, cleanup).await;

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    let code = match result {
        Ok(Outcome::Generated(_)) => {
            let _ = cliclack::outro("Happy coding!");
            0
        }
        Ok(Outcome::Declined) => {
            let _ = cliclack::outro_cancel("No project generated.");
            0
        }
        Err(err) => {
            let _ = cliclack::log::error(format!("{:#}", err));
            exit_code(&err)
        }
    };

    std::process::exit(code);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_defaults() {
        let args = Args::parse_from(["initializr-wizard"]);
        let wizard: WizardArgs = args.into();
        assert_eq!(wizard.output_dir, PathBuf::from("."));
        assert!(!wizard.extract);
        assert!(!wizard.yes);
        assert!(wizard.metadata_url.is_none());
    }

    #[test]
    fn test_args_overrides() {
        let args = Args::parse_from([
            "initializr-wizard",
            "--metadata-url",
            "http://localhost:8080/metadata/client",
            "-o",
            "out",
            "--extract",
            "-y",
        ]);
        let wizard: WizardArgs = args.into();
        assert_eq!(
            wizard.metadata_url.as_deref(),
            Some("http://localhost:8080/metadata/client")
        );
        assert_eq!(wizard.output_dir, PathBuf::from("out"));
        assert!(wizard.extract);
        assert!(wizard.yes);
    }

    #[test]
    fn test_fatal_errors_exit_with_one() {
        let err = anyhow::Error::from(WizardError::EmptyResponse {
            url: "https://start.spring.io/metadata/client".to_string(),
        });
        assert_eq!(exit_code(&err), 1);
        assert_eq!(exit_code(&anyhow::anyhow!("other")), 1);
    }
}
