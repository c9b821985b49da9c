//! Single-field prompts: choice menus, free text and the final confirmation

use super::screen::Screen;
use crate::error::{InputError, Result, WizardError};
use crate::fields::{self, ChoiceField, TextField};
use crate::metadata::MetadataDocument;
use crate::query::QueryAccumulator;
use crate::session::SessionState;
use regex::Regex;
use std::io::{BufRead, Write};
use std::sync::LazyLock;
use tracing::debug;

static TEXT_VALUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._-]+$").expect("text value pattern is valid")
});

/// Whether a text value only uses the allowed characters
pub fn is_valid_text(value: &str) -> bool {
    TEXT_VALUE.is_match(value)
}

/// Parse a plain run of ASCII digits; signs, spaces and other characters are rejected
pub fn parse_index(token: &str) -> Option<usize> {
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    token.parse().ok()
}

/// Resolve a menu answer to a 0-based position
///
/// Empty input picks `default`; otherwise the input must be a 1-based index within `count`.
pub fn parse_choice(
    input: &str,
    count: usize,
    default: Option<usize>,
) -> std::result::Result<usize, InputError> {
    let input = input.trim();
    if input.is_empty() {
        return default.ok_or(InputError::NoDefault);
    }
    let index = parse_index(input).ok_or_else(|| InputError::NotANumber(input.to_string()))?;
    if index == 0 || index > count {
        return Err(InputError::OutOfRange {
            value: index,
            max: count,
        });
    }
    Ok(index - 1)
}

/// Prompt for one of the document's values for `field`
pub fn collect_choice<R: BufRead, W: Write>(
    screen: &mut Screen<R, W>,
    document: &MetadataDocument,
    session: &mut SessionState,
    query: &mut QueryAccumulator,
    field: ChoiceField,
) -> Result<String> {
    let set = document
        .value_set(field.key)
        .filter(|set| !set.values.is_empty())
        .ok_or_else(|| WizardError::MissingField {
            key: field.key.to_string(),
        })?;
    let default = set.default_position();
    let label = fields::humanize(field.key);
    let description = fields::describe(document, field.key);

    loop {
        screen.redraw(session)?;
        screen.heading(&label)?;
        screen.line(&description)?;
        screen.line("")?;
        for (pos, entry) in set.values.iter().enumerate() {
            let marker = (Some(pos) == default).then_some("(default)");
            screen.option(pos + 1, &entry.name, marker)?;
        }
        screen.line("")?;

        let prompt = match default {
            Some(pos) => format!("Select {} [{}]:", label, pos + 1),
            None => format!("Select {}:", label),
        };
        let Some(answer) = screen.read_line(&prompt)? else {
            continue;
        };

        match parse_choice(&answer, set.values.len(), default) {
            Ok(pos) => {
                let id = set.values[pos].id.clone();
                debug!(field = field.key, %id, "choice accepted");
                session.set(field.slot, &id);
                query.push(field.key, &id);
                screen.success(format!("{} set to {}", label, id));
                return Ok(id);
            }
            Err(err) => screen.reject(&err),
        }
    }
}

/// Prompt for a free-text value restricted to `[a-zA-Z0-9._-]+`
pub fn collect_text<R: BufRead, W: Write>(
    screen: &mut Screen<R, W>,
    session: &mut SessionState,
    query: &mut QueryAccumulator,
    field: TextField,
    default: &str,
) -> Result<String> {
    let label = fields::humanize(field.key);

    loop {
        screen.redraw(session)?;
        screen.heading(&label)?;
        let Some(answer) = screen.read_line(&format!("{} [{}]:", label, default))? else {
            continue;
        };
        let value = if answer.is_empty() {
            default.to_string()
        } else {
            answer
        };

        if !is_valid_text(&value) {
            screen.reject(&InputError::InvalidCharacters(value));
            continue;
        }

        debug!(field = field.key, %value, "text accepted");
        if let Some(slot) = field.slot {
            session.set(slot, &value);
        }
        query.push(field.key, &value);
        screen.success(format!("{} set to {}", label, value));
        return Ok(value);
    }
}

/// Ask whether to generate the project; empty input means yes
pub fn confirm<R: BufRead, W: Write>(
    screen: &mut Screen<R, W>,
    session: &SessionState,
) -> Result<bool> {
    loop {
        screen.redraw(session)?;
        let Some(answer) = screen.read_line("Generate project? [Y/n]:")? else {
            continue;
        };
        match answer.trim() {
            "" | "y" | "Y" => return Ok(true),
            "n" | "N" => return Ok(false),
            _ => screen.reject(&InputError::UnrecognizedAnswer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::{ARTIFACT_ID, CHOICE_FIELDS, GROUP_ID};
    use crate::metadata::document::tests::sample_document;
    use crate::query::build_query;
    use std::io::Cursor;

    type TestScreen = Screen<Cursor<Vec<u8>>, Vec<u8>>;

    fn screen(input: &str) -> TestScreen {
        Screen::new(Cursor::new(input.as_bytes().to_vec()), Vec::new(), "Test")
    }

    fn output_of(screen: &TestScreen) -> String {
        String::from_utf8_lossy(screen.output()).into_owned()
    }

    #[test]
    fn test_parse_choice() {
        assert_eq!(parse_choice("", 3, Some(1)), Ok(1));
        assert_eq!(parse_choice(" 3 ", 3, None), Ok(2));
        assert_eq!(parse_choice("", 3, None), Err(InputError::NoDefault));
        assert_eq!(
            parse_choice("0", 3, Some(0)),
            Err(InputError::OutOfRange { value: 0, max: 3 })
        );
        assert_eq!(
            parse_choice("4", 3, Some(0)),
            Err(InputError::OutOfRange { value: 4, max: 3 })
        );
        assert_eq!(
            parse_choice("two", 3, Some(0)),
            Err(InputError::NotANumber("two".to_string()))
        );
    }

    #[test]
    fn test_signed_numbers_are_not_indices() {
        assert_eq!(parse_index("+2"), None);
        assert_eq!(parse_index("-1"), None);
        assert_eq!(parse_index("1 2"), None);
        assert_eq!(parse_index(""), None);
        assert_eq!(parse_index("02"), Some(2));
        assert_eq!(
            parse_choice("+2", 3, Some(0)),
            Err(InputError::NotANumber("+2".to_string()))
        );
    }

    #[test]
    fn test_choice_reprompts_after_invalid_utf8() {
        let doc = sample_document();
        let mut screen = Screen::new(Cursor::new(b"\xff\n2\n".to_vec()), Vec::new(), "Test");
        let mut session = SessionState::new();
        let mut query = QueryAccumulator::new();

        let id = collect_choice(&mut screen, &doc, &mut session, &mut query, CHOICE_FIELDS[1])
            .unwrap();

        assert_eq!(id, "kotlin");
        assert!(output_of(&screen).contains("Input is not valid UTF-8"));
    }

    #[test]
    fn test_text_validation() {
        for ok in ["com.example", "demo", "my_app-2", "A.b_C-9"] {
            assert!(is_valid_text(ok), "{ok} should be valid");
        }
        for bad in ["", "my app", "com/example", "demo!", "naïve", " demo"] {
            assert!(!is_valid_text(bad), "{bad:?} should be invalid");
        }
    }

    #[test]
    fn test_choice_default_equals_explicit_default_index() {
        let doc = sample_document();
        let java = CHOICE_FIELDS[3];

        let mut by_default = SessionState::new();
        let mut query = QueryAccumulator::new();
        collect_choice(&mut screen("\n"), &doc, &mut by_default, &mut query, java).unwrap();

        let mut by_index = SessionState::new();
        let mut query = QueryAccumulator::new();
        collect_choice(&mut screen("3\n"), &doc, &mut by_index, &mut query, java).unwrap();

        assert_eq!(by_default.java_version.as_deref(), Some("17"));
        assert_eq!(by_default, by_index);
    }

    #[test]
    fn test_choice_reprompts_until_valid() {
        let doc = sample_document();
        let mut screen = screen("9\nabc\n2\n");
        let mut session = SessionState::new();
        let mut query = QueryAccumulator::new();

        let id = collect_choice(&mut screen, &doc, &mut session, &mut query, CHOICE_FIELDS[1])
            .unwrap();

        assert_eq!(id, "kotlin");
        assert_eq!(build_query(&query), "language=kotlin");
        let out = output_of(&screen);
        assert!(out.contains("9 is out of range, choose between 1 and 3"));
        assert!(out.contains("'abc' is not a number"));
        assert_eq!(
            screen.notice().map(|n| n.text.as_str()),
            Some("Language set to kotlin")
        );
    }

    #[test]
    fn test_choice_missing_field_is_fatal() {
        let doc = MetadataDocument::default();
        let err = collect_choice(
            &mut screen("1\n"),
            &doc,
            &mut SessionState::new(),
            &mut QueryAccumulator::new(),
            CHOICE_FIELDS[0],
        )
        .unwrap_err();
        assert!(matches!(err, WizardError::MissingField { key } if key == "type"));
    }

    #[test]
    fn test_text_default_and_rejection() {
        let mut screen = screen("my app\n\n");
        let mut session = SessionState::new();
        let mut query = QueryAccumulator::new();

        let value =
            collect_text(&mut screen, &mut session, &mut query, GROUP_ID, "com.example").unwrap();

        assert_eq!(value, "com.example");
        assert_eq!(session.group_id.as_deref(), Some("com.example"));
        assert!(output_of(&screen).contains("'my app' is invalid"));
        assert_eq!(query.pairs().len(), 1);
    }

    #[test]
    fn test_text_stored_verbatim() {
        let mut screen = screen("shop-api_v2.0\n");
        let mut session = SessionState::new();
        let mut query = QueryAccumulator::new();
        collect_text(&mut screen, &mut session, &mut query, ARTIFACT_ID, "demo").unwrap();
        assert_eq!(session.artifact_id.as_deref(), Some("shop-api_v2.0"));
    }

    #[test]
    fn test_text_without_slot_only_reaches_query() {
        let field = TextField {
            key: "version",
            slot: None,
            fallback_default: "0.0.1-SNAPSHOT",
        };
        let mut session = SessionState::new();
        let mut query = QueryAccumulator::new();
        collect_text(&mut screen("\n"), &mut session, &mut query, field, "0.0.1-SNAPSHOT")
            .unwrap();
        assert_eq!(session, SessionState::new());
        assert_eq!(build_query(&query), "version=0.0.1-SNAPSHOT");
    }

    #[test]
    fn test_confirm_answers() {
        let session = SessionState::new();
        assert!(confirm(&mut screen("\n"), &session).unwrap());
        assert!(confirm(&mut screen("Y\n"), &session).unwrap());
        assert!(!confirm(&mut screen("n\n"), &session).unwrap());

        let mut screen = screen("maybe\nN\n");
        assert!(!confirm(&mut screen, &session).unwrap());
        let out = output_of(&screen);
        assert!(out.contains("Please answer y or n"));
        // the error is shown on a fresh redraw
        assert_eq!(out.matches("=== Test ===").count(), 2);
    }
}
