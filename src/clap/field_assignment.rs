//! Parsing `NAME=VALUE` field assignments with a [`clap::Arg::value_parser`].

use clap::builder::StringValueParser;
use clap::builder::TypedValueParser;
use clap::builder::ValueParserFactory;
use miette::LabeledSpan;
use miette::MietteDiagnostic;
use miette::Report;

use super::value_validation_error;

/// A field name and the value to give it, written `NAME=VALUE` on the command line.
///
/// Field names may contain spaces but not `=`; everything after the first `=` is the value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldAssignment {
    /// The field's name, trimmed.
    pub name: String,
    /// The new value, exactly as given.
    pub value: String,
}

impl FieldAssignment {
    fn parse(input: &str) -> Result<Self, MietteDiagnostic> {
        let (name, value) = input.split_once('=').ok_or_else(|| MietteDiagnostic {
            message: "Expected `NAME=VALUE`".to_owned(),
            code: None,
            severity: None,
            help: Some("Quote names with spaces, like `--set 'Event Type=Onsite'`".to_owned()),
            url: None,
            labels: Some(vec![LabeledSpan::at(0..input.len(), "Missing `=`")]),
        })?;

        let trimmed = name.trim();
        if trimmed.is_empty() {
            let label = LabeledSpan::at(0..name.len() + 1, "Expected a field name");
            return Err(MietteDiagnostic {
                message: "Field name is empty".to_owned(),
                code: None,
                severity: None,
                help: None,
                url: None,
                labels: Some(vec![label]),
            });
        }

        Ok(Self {
            name: trimmed.to_owned(),
            value: value.to_owned(),
        })
    }
}

/// [`clap`] parser for [`FieldAssignment`] values.
#[derive(Default, Clone)]
pub struct FieldAssignmentParser {
    inner: StringValueParser,
}

impl TypedValueParser for FieldAssignmentParser {
    type Value = FieldAssignment;

    fn parse_ref(
        &self,
        cmd: &clap::Command,
        arg: Option<&clap::Arg>,
        value: &std::ffi::OsStr,
    ) -> Result<Self::Value, clap::Error> {
        self.inner.parse_ref(cmd, arg, value).and_then(|str_value| {
            FieldAssignment::parse(&str_value).map_err(|diagnostic| {
                let report = Report::new(diagnostic).with_source_code(str_value.clone());
                value_validation_error(arg, &str_value, format!("{report:?}"))
            })
        })
    }
}

impl ValueParserFactory for FieldAssignment {
    type Parser = FieldAssignmentParser;

    fn value_parser() -> Self::Parser {
        Self::Parser::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse() {
        assert_eq!(
            FieldAssignment::parse("Event Type=Onsite").unwrap(),
            FieldAssignment {
                name: "Event Type".to_owned(),
                value: "Onsite".to_owned(),
            }
        );
        assert_eq!(
            FieldAssignment::parse(" City =a=b ").unwrap(),
            FieldAssignment {
                name: "City".to_owned(),
                value: "a=b ".to_owned(),
            }
        );
        assert_eq!(FieldAssignment::parse("City=").unwrap().value, "");
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            FieldAssignment::parse("City").unwrap_err().message,
            "Expected `NAME=VALUE`"
        );
        assert_eq!(
            FieldAssignment::parse("  =Budapest").unwrap_err().message,
            "Field name is empty"
        );
    }
}
