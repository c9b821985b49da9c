//! Interactive wizard: screen, prompts, dependency menus and the run loop
//!
//! This module is optional and only available when the `tui` feature is enabled.

#[cfg(feature = "tui")]
pub mod dependencies;
#[cfg(feature = "tui")]
pub mod prompts;
#[cfg(feature = "tui")]
pub mod screen;
#[cfg(feature = "tui")]
mod wizard;

#[cfg(feature = "tui")]
pub use screen::{Notice, Screen, Tone};
#[cfg(feature = "tui")]
pub use wizard::{run, Outcome, WizardArgs};
