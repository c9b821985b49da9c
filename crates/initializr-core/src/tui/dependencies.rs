//! Two-level dependency menu: category first, then one or more dependencies inside it

use super::prompts::{parse_choice, parse_index};
use super::screen::{Screen, Tone};
use crate::error::{InputError, Rejection, Result};
use crate::fields::DEPENDENCIES_KEY;
use crate::metadata::{DependencyCatalog, DependencyCategory, MetadataDocument};
use crate::query::QueryAccumulator;
use crate::session::SessionState;
use std::io::{BufRead, Write};
use tracing::debug;

/// Leaves the current menu; never a valid 1-based index
pub const EXIT_TOKEN: &str = "0";

/// Result of applying one input line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionOutcome {
    pub added: Vec<String>,
    pub rejected: Vec<(String, Rejection)>,
}

impl SelectionOutcome {
    /// Summary notice for the line, or `None` if nothing was submitted
    pub fn summary(&self) -> Option<(Tone, String)> {
        let added = (!self.added.is_empty()).then(|| format!("Added: {}", self.added.join(", ")));
        let rejected = (!self.rejected.is_empty()).then(|| {
            let items: Vec<String> = self
                .rejected
                .iter()
                .map(|(id, reason)| format!("{} ({})", id, reason))
                .collect();
            format!("Rejected: {}", items.join(", "))
        });

        match (added, rejected) {
            (Some(a), Some(r)) => Some((Tone::Warning, format!("{}. {}", a, r))),
            (Some(a), None) => Some((Tone::Success, a)),
            (None, Some(r)) => Some((Tone::Error, r)),
            (None, None) => None,
        }
    }
}

/// Turn one input line into candidate dependency ids for `category`
///
/// A lone in-range number picks that entry. Anything else is a comma-separated list where
/// each trimmed token is either an in-range number or a literal id; empty tokens are skipped.
pub fn resolve_candidates(input: &str, category: &DependencyCategory) -> Vec<String> {
    let by_index = |token: &str| -> Option<String> {
        let index = parse_index(token)?;
        let entry = category.values.get(index.checked_sub(1)?)?;
        Some(entry.id.clone())
    };

    let input = input.trim();
    if let Some(id) = by_index(input) {
        return vec![id];
    }

    input
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| by_index(token).unwrap_or_else(|| token.to_string()))
        .collect()
}

/// Validate candidates against the whole catalog and add the new ones to the session
pub fn apply_candidates(
    catalog: &DependencyCatalog,
    session: &mut SessionState,
    candidates: Vec<String>,
) -> SelectionOutcome {
    let mut outcome = SelectionOutcome::default();
    for id in candidates {
        if !catalog.contains(&id) {
            outcome.rejected.push((id, Rejection::Invalid));
        } else if session.add_dependency(&id) {
            outcome.added.push(id);
        } else {
            outcome.rejected.push((id, Rejection::Duplicate));
        }
    }
    outcome
}

/// Run the category/dependency menus until the user exits, then record the selection
pub fn select_dependencies<R: BufRead, W: Write>(
    screen: &mut Screen<R, W>,
    document: &MetadataDocument,
    session: &mut SessionState,
    query: &mut QueryAccumulator,
) -> Result<()> {
    let catalog = document.dependencies();
    let categories = catalog.categories();

    loop {
        screen.redraw(session)?;
        screen.heading("Dependencies")?;
        for (pos, category) in categories.iter().enumerate() {
            let count = format!("({})", category.values.len());
            screen.option(pos + 1, &category.name, Some(count.as_str()))?;
        }
        screen.line(format!("  {:>3}) Done", EXIT_TOKEN))?;
        screen.line("")?;

        let Some(answer) = screen.read_line("Category:")? else {
            continue;
        };
        if answer.trim() == EXIT_TOKEN {
            break;
        }
        match parse_choice(&answer, categories.len(), None) {
            Ok(pos) => select_in_category(screen, catalog, &categories[pos], session)?,
            Err(err) => screen.reject(&err),
        }
    }

    if !session.dependencies().is_empty() {
        let joined = session.dependencies().join(",");
        debug!(dependencies = %joined, "dependency selection finished");
        query.push(DEPENDENCIES_KEY, &joined);
    }
    Ok(())
}

fn select_in_category<R: BufRead, W: Write>(
    screen: &mut Screen<R, W>,
    catalog: &DependencyCatalog,
    category: &DependencyCategory,
    session: &mut SessionState,
) -> Result<()> {
    loop {
        screen.redraw(session)?;
        screen.heading(&category.name)?;
        for (pos, entry) in category.values.iter().enumerate() {
            let label = format!("{} [{}]", entry.name, entry.id);
            let marker = session.has_dependency(&entry.id).then_some("(selected)");
            screen.option(pos + 1, &label, marker)?;
        }
        screen.line(format!("  {:>3}) Back to categories", EXIT_TOKEN))?;
        screen.line("")?;

        let Some(answer) = screen.read_line("Number or comma-separated ids:")? else {
            continue;
        };
        if answer.trim() == EXIT_TOKEN {
            return Ok(());
        }

        let candidates = resolve_candidates(&answer, category);
        let outcome = apply_candidates(catalog, session, candidates);
        debug!(?outcome, category = %category.name, "dependency input applied");
        match outcome.summary() {
            Some((tone, text)) => screen.notify(tone, text),
            None => screen.reject(&InputError::EmptyDependencyInput),
        }
    }
}
