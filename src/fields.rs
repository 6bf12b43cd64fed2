//! The field store: the ordered list of entries in the external event form.

use std::collections::HashSet;
use std::fmt::Display;

use camino::Utf8Path;
use miette::miette;
use miette::Context;
use miette::IntoDiagnostic;
use serde::Deserialize;

use crate::format_bulleted_list;

/// The name of the field whose value is rendered from Markdown.
pub const EVENT_DESCRIPTION: &str = "Event Description";

/// The fixed choices offered by fields with a free-text "other" option.
pub const CHOICE_OPTIONS: [&str; 4] = ["English", "Spanish", "French", "German"];

/// One entry in the external form.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FieldDescriptor {
    /// The form provider's entry identifier. Emitted as `entry.<id>`.
    pub id: u64,
    /// Human-readable label, unique within a [`FieldStore`].
    pub name: String,
    /// The current value, if any.
    #[serde(default)]
    pub value: Option<String>,
    /// The free-text "other" response. Only present for fields offering one.
    #[serde(default)]
    pub other: Option<String>,
}

impl FieldDescriptor {
    /// A field with a blank value.
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            value: None,
            other: None,
        }
    }

    /// Give this field a free-text "other" response, making it a choice field.
    pub fn with_other(mut self, other: impl Into<String>) -> Self {
        self.other = Some(other.into());
        self
    }

    /// The kind of control used to edit this field.
    pub fn kind(&self) -> FieldKind {
        FieldKind::classify(self)
    }

    /// The value, if it's set and non-empty.
    pub fn non_empty_value(&self) -> Option<&str> {
        self.value.as_deref().filter(|value| !value.is_empty())
    }

    /// The "other" response, if it's set and non-empty.
    pub fn non_empty_other(&self) -> Option<&str> {
        self.other.as_deref().filter(|other| !other.is_empty())
    }
}

/// The control used to edit a field, chosen from its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// One of [`CHOICE_OPTIONS`] plus a free-text companion.
    Choice,
    /// An email address.
    Email,
    /// A URL.
    Url,
    /// The event description, authored in Markdown.
    Markdown,
    /// Multi-line text.
    MultiLine,
    /// Single-line text.
    Text,
}

impl FieldKind {
    /// Classify a field. Fields with an `other` response are always choices; the rest are matched
    /// on substrings of their name, first match wins.
    pub fn classify(field: &FieldDescriptor) -> Self {
        let name = field.name.as_str();
        if field.other.is_some() {
            Self::Choice
        } else if name.contains("email") {
            Self::Email
        } else if name.contains("URL") || name.contains("Link") {
            Self::Url
        } else if name == EVENT_DESCRIPTION {
            Self::Markdown
        } else if name.contains("Description") {
            Self::MultiLine
        } else {
            Self::Text
        }
    }
}

impl Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldKind::Choice => write!(f, "choice"),
            FieldKind::Email => write!(f, "email"),
            FieldKind::Url => write!(f, "url"),
            FieldKind::Markdown => write!(f, "markdown"),
            FieldKind::MultiLine => write!(f, "multi-line"),
            FieldKind::Text => write!(f, "text"),
        }
    }
}

/// An ordered collection of [`FieldDescriptor`]s with unique ids and names.
///
/// The set of fields is fixed once the store is built; only values change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldStore {
    fields: Vec<FieldDescriptor>,
}

impl FieldStore {
    /// Build a store, checking that ids and names are unique.
    pub fn new(fields: Vec<FieldDescriptor>) -> miette::Result<Self> {
        let mut ids = HashSet::new();
        let mut names = HashSet::new();
        for field in &fields {
            if !ids.insert(field.id) {
                return Err(miette!("Duplicate field id {}", field.id));
            }
            if !names.insert(field.name.as_str()) {
                return Err(miette!("Duplicate field name {:?}", field.name));
            }
        }
        Ok(Self { fields })
    }

    /// Load fields from a JSON array of descriptors.
    pub fn from_json(json: &str) -> miette::Result<Self> {
        let fields: Vec<FieldDescriptor> = serde_json::from_str(json).into_diagnostic()?;
        Self::new(fields)
    }

    /// Load fields from a JSON file.
    pub fn from_json_file(path: &Utf8Path) -> miette::Result<Self> {
        let json = std::fs::read_to_string(path)
            .into_diagnostic()
            .wrap_err_with(|| format!("Failed to read {path}"))?;
        Self::from_json(&json).wrap_err_with(|| format!("Failed to load fields from {path}"))
    }

    /// The entries of the Ingress First Saturday event form, all blank.
    pub fn ingress_defaults() -> Self {
        Self {
            fields: vec![
                FieldDescriptor::new(1775527946, "City"),
                FieldDescriptor::new(1102707395, "Country"),
                FieldDescriptor::new(2109327838, "Event Page or Telegram Channel"),
                FieldDescriptor::new(1809010630, EVENT_DESCRIPTION),
                FieldDescriptor::new(329793926, "Enlightened Leader email address"),
                FieldDescriptor::new(939910283, "Enlightened Leader Agent Name"),
                FieldDescriptor::new(671403473, "Enlightened Leader Social Media Profile Link"),
                FieldDescriptor::new(1803675650, "Resistance Leader email address"),
                FieldDescriptor::new(1535781286, "Resistance Leader Agent Name"),
                FieldDescriptor::new(314166447, "Resistance Leader Social Media Profile Link"),
                FieldDescriptor::new(1140650120, "Auto Score Sheet URL"),
                FieldDescriptor::new(1677540642, "Preferred Language").with_other(""),
                FieldDescriptor::new(222644845, "Hide Attendee List"),
                FieldDescriptor::new(1534513796, "Event Start Time"),
                FieldDescriptor::new(1756031242, "Base Portal Name"),
                FieldDescriptor::new(1702289666, "Base Portal URL"),
                FieldDescriptor::new(1570769333, "Event Type"),
                FieldDescriptor::new(2839749, "Restocking Portal Name"),
                FieldDescriptor::new(158918171, "Restocking Portal Intel URL"),
                FieldDescriptor::new(221911722, "Onsite Puzzle Path"),
            ],
        }
    }

    /// Iterate over the fields in form order.
    pub fn iter(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter()
    }

    /// Get a field by name.
    pub fn get(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Get a field by its entry id.
    pub fn get_by_id(&self, id: u64) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|field| field.id == id)
    }

    /// The value of the named field, or an empty string if it's missing or unset.
    pub fn value_of(&self, name: &str) -> &str {
        self.get(name)
            .and_then(|field| field.value.as_deref())
            .unwrap_or_default()
    }

    /// Set the value of the named field. Returns `false` if there's no such field.
    pub fn assign(&mut self, name: &str, value: impl Into<String>) -> bool {
        match self.fields.iter_mut().find(|field| field.name == name) {
            Some(field) => {
                field.value = Some(value.into());
                true
            }
            None => false,
        }
    }

    /// Set the value of the named field, erroring if there's no such field.
    pub fn set_value(&mut self, name: &str, value: impl Into<String>) -> miette::Result<()> {
        if self.assign(name, value) {
            Ok(())
        } else {
            Err(self.unknown_field(name))
        }
    }

    /// Set the "other" response of the named field, erroring if there's no such field or the
    /// field doesn't offer a free-text response.
    pub fn set_other(&mut self, name: &str, other: impl Into<String>) -> miette::Result<()> {
        match self.fields.iter_mut().find(|field| field.name == name) {
            Some(field) if field.other.is_some() => {
                field.other = Some(other.into());
                Ok(())
            }
            Some(_) => Err(miette!("Field {name:?} doesn't have an \"other\" option")),
            None => Err(self.unknown_field(name)),
        }
    }

    fn unknown_field(&self, name: &str) -> miette::Report {
        miette!(
            "No field named {name:?}. Known fields are:\n{}",
            format_bulleted_list(self.fields.iter().map(|field| &field.name))
        )
    }
}

impl<'a> IntoIterator for &'a FieldStore {
    type Item = &'a FieldDescriptor;
    type IntoIter = std::slice::Iter<'a, FieldDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}
