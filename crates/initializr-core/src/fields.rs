//! Field registry: which fields the wizard collects, in what order, and how they are labelled

use crate::metadata::MetadataDocument;

/// Session slot a collected value is written to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    BuildSystem,
    Language,
    BootVersion,
    JavaVersion,
    Packaging,
    GroupId,
    ArtifactId,
}

/// A field chosen from the metadata document's value-set
#[derive(Debug, Clone, Copy)]
pub struct ChoiceField {
    pub key: &'static str,
    pub slot: Slot,
}

/// A free-text field
#[derive(Debug, Clone, Copy)]
pub struct TextField {
    pub key: &'static str,
    /// Only group and artifact ids are kept on the session; other text goes straight to the query
    pub slot: Option<Slot>,
    /// Used when the document declares no default
    pub fallback_default: &'static str,
}

impl TextField {
    /// Default offered at the prompt, preferring the document's declared value
    pub fn default_from<'a>(&self, document: &'a MetadataDocument) -> &'a str {
        document
            .text_default(self.key)
            .unwrap_or(self.fallback_default)
    }
}

/// Choice fields in prompt order
pub const CHOICE_FIELDS: [ChoiceField; 5] = [
    ChoiceField {
        key: "type",
        slot: Slot::BuildSystem,
    },
    ChoiceField {
        key: "language",
        slot: Slot::Language,
    },
    ChoiceField {
        key: "bootVersion",
        slot: Slot::BootVersion,
    },
    ChoiceField {
        key: "javaVersion",
        slot: Slot::JavaVersion,
    },
    ChoiceField {
        key: "packaging",
        slot: Slot::Packaging,
    },
];

pub const GROUP_ID: TextField = TextField {
    key: "groupId",
    slot: Some(Slot::GroupId),
    fallback_default: "com.example",
};

pub const ARTIFACT_ID: TextField = TextField {
    key: "artifactId",
    slot: Some(Slot::ArtifactId),
    fallback_default: "demo",
};

/// Query keys for values the wizard derives or fixes itself
pub const NAME_KEY: &str = "name";
pub const PACKAGE_NAME_KEY: &str = "packageName";
pub const DESCRIPTION_KEY: &str = "description";
pub const DEPENDENCIES_KEY: &str = "dependencies";

const PLACEHOLDER_DESCRIPTION: &str = "No description available.";

fn builtin_description(key: &str) -> Option<&'static str> {
    match key {
        "type" => Some("The build system used to compile, test and package the project."),
        "packaging" => Some("How the application is packaged: Jar runs standalone, War deploys to a servlet container."),
        "javaVersion" => Some("The Java version the project is compiled for."),
        "bootVersion" => Some("The Spring Boot version the project is built on."),
        "language" => Some("The JVM language the project sources are written in."),
        _ => None,
    }
}

/// Description shown under a field's label
pub fn describe(document: &MetadataDocument, key: &str) -> String {
    document
        .description(key)
        .or_else(|| builtin_description(key))
        .unwrap_or(PLACEHOLDER_DESCRIPTION)
        .to_string()
}

/// Turn a camel-case key into a spaced, capitalized label
pub fn humanize(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    let mut label = String::with_capacity(key.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if i == 0 {
            label.extend(c.to_uppercase());
            continue;
        }
        if c.is_uppercase() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if !prev.is_uppercase() || next_is_lower {
                label.push(' ');
            }
        }
        label.push(c);
    }

    label
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::document::tests::sample_document;

    #[test]
    fn test_humanize() {
        assert_eq!(humanize("bootVersion"), "Boot Version");
        assert_eq!(humanize("groupId"), "Group Id");
        assert_eq!(humanize("type"), "Type");
        assert_eq!(humanize("packageName"), "Package Name");
        assert_eq!(humanize("metadataURLPath"), "Metadata URL Path");
        assert_eq!(humanize(""), "");
    }

    #[test]
    fn test_entry_description_is_not_field_description() {
        let doc = sample_document();
        // only an entry of "type" has a description, the field itself does not
        assert!(describe(&doc, "type").starts_with("The build system"));
    }

    #[test]
    fn test_describe_falls_back_on_null() {
        let doc = sample_document();
        assert_eq!(
            describe(&doc, "javaVersion"),
            "The Java version the project is compiled for."
        );
        assert_eq!(
            describe(&doc, "bootVersion"),
            "The Spring Boot version the project is built on."
        );
    }

    #[test]
    fn test_describe_unknown_key() {
        let doc = sample_document();
        assert_eq!(describe(&doc, "somethingElse"), PLACEHOLDER_DESCRIPTION);
    }

    #[test]
    fn test_describe_uses_document_description() {
        let doc = MetadataDocument::from_slice(
            br#"{"packaging": {"default": "jar", "description": "Archive format", "values": []}}"#,
        )
        .unwrap();
        assert_eq!(describe(&doc, "packaging"), "Archive format");
    }

    #[test]
    fn test_text_defaults() {
        let doc = sample_document();
        assert_eq!(GROUP_ID.default_from(&doc), "com.example");
        let empty = MetadataDocument::default();
        assert_eq!(ARTIFACT_ID.default_from(&empty), "demo");
    }
}
