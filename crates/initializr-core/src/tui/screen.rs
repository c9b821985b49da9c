//! Line-based screen: full redraws, one-shot notices and blocking line reads

use crate::error::{InputError, Result, WizardError};
use crate::session::SessionState;
use colored::Colorize;
use std::io::{self, BufRead, Stdout, StdinLock, Write};

/// Color of a notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Success,
    Warning,
    Error,
}

/// A status line shown once after the next redraw
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub tone: Tone,
    pub text: String,
}

/// Terminal surface the prompts draw on
///
/// Holds at most one pending notice. [`Screen::redraw`] prints it right after the current
/// selections and then drops it.
pub struct Screen<R, W> {
    input: R,
    output: W,
    title: String,
    term: Option<console::Term>,
    notice: Option<Notice>,
}

impl Screen<StdinLock<'static>, Stdout> {
    /// Screen bound to the process's stdin/stdout, clearing between redraws on a terminal
    pub fn stdio(title: &str) -> Self {
        let term = console::Term::stdout();
        let term = term.is_term().then_some(term);
        Self {
            input: io::stdin().lock(),
            output: io::stdout(),
            title: title.to_string(),
            term,
            notice: None,
        }
    }
}

impl<R: BufRead, W: Write> Screen<R, W> {
    /// Screen over arbitrary streams; never clears
    pub fn new(input: R, output: W, title: &str) -> Self {
        Self {
            input,
            output,
            title: title.to_string(),
            term: None,
            notice: None,
        }
    }

    pub fn notify(&mut self, tone: Tone, text: impl Into<String>) {
        self.notice = Some(Notice {
            tone,
            text: text.into(),
        });
    }

    pub fn success(&mut self, text: impl Into<String>) {
        self.notify(Tone::Success, text);
    }

    pub fn reject(&mut self, err: &InputError) {
        tracing::warn!(%err, "input rejected");
        self.notify(Tone::Error, err.to_string());
    }

    /// Pending notice, if any
    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Clear, print the header and current selections, then the pending notice
    pub fn redraw(&mut self, session: &SessionState) -> Result<()> {
        self.output.flush()?;
        if let Some(term) = &self.term {
            term.clear_screen()?;
        }

        writeln!(
            self.output,
            "{}",
            format!("=== {} ===", self.title).yellow().bold()
        )?;
        writeln!(self.output)?;

        let rows = session.summary();
        if rows.is_empty() {
            writeln!(self.output, "  {}", "Nothing selected yet".dimmed())?;
        }
        for (label, value) in rows {
            writeln!(self.output, "  {} {}", format!("{}:", label).cyan(), value)?;
        }
        writeln!(self.output)?;

        if let Some(notice) = self.notice.take() {
            let line = match notice.tone {
                Tone::Success => notice.text.green(),
                Tone::Warning => notice.text.yellow(),
                Tone::Error => notice.text.red(),
            };
            writeln!(self.output, "{}", line)?;
            writeln!(self.output)?;
        }

        Ok(())
    }

    /// Print a section heading
    pub fn heading(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{}", text.yellow().bold())?;
        Ok(())
    }

    /// Print a plain line
    pub fn line(&mut self, text: impl AsRef<str>) -> Result<()> {
        writeln!(self.output, "{}", text.as_ref())?;
        Ok(())
    }

    /// Print a numbered menu entry
    pub fn option(&mut self, index: usize, label: &str, marker: Option<&str>) -> Result<()> {
        match marker {
            Some(marker) => writeln!(
                self.output,
                "  {:>3}) {} {}",
                index,
                label,
                marker.dimmed()
            )?,
            None => writeln!(self.output, "  {:>3}) {}", index, label)?,
        }
        Ok(())
    }

    /// Show a prompt and block for one line, without its line terminator
    ///
    /// Returns `None` when the line is not valid UTF-8; an error notice is then pending and the
    /// caller re-prompts.
    pub fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{} ", prompt.cyan())?;
        self.output.flush()?;

        let mut raw = Vec::new();
        if self.input.read_until(b'\n', &mut raw)? == 0 {
            return Err(WizardError::InputClosed);
        }
        while matches!(raw.last(), Some(b'\n' | b'\r')) {
            raw.pop();
        }

        match String::from_utf8(raw) {
            Ok(line) => Ok(Some(line)),
            Err(_) => {
                self.reject(&InputError::InvalidEncoding);
                Ok(None)
            }
        }
    }

    /// Access the underlying output, e.g. to inspect it in tests
    pub fn output(&self) -> &W {
        &self.output
    }
}
