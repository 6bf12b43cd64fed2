//! Human-readable listings of fields and template variables.

use std::fmt::Write;

use itertools::Itertools;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::fields::FieldKind;
use crate::fields::FieldStore;
use crate::fields::CHOICE_OPTIONS;
use crate::template::TemplateContext;
use crate::textwrap::indented_options;

/// List each field with its entry id, kind, and any values.
pub fn format_field_list(store: &FieldStore) -> String {
    let wrap = indented_options("    ");
    let mut ret = String::new();

    for field in store {
        let kind = match field.kind() {
            FieldKind::Choice => format!(
                "{}: {}, or other",
                FieldKind::Choice,
                CHOICE_OPTIONS.iter().join(", ")
            ),
            kind => kind.to_string(),
        };
        // Writing to a `String` can't fail.
        let _ = writeln!(
            ret,
            "• {} {}",
            field.name.if_supports_color(Stdout, |text| text.bold()),
            format!("(entry.{}, {kind})", field.id).if_supports_color(Stdout, |text| text.dimmed()),
        );

        for (label, value) in [
            ("value", field.non_empty_value()),
            ("other", field.non_empty_other()),
        ] {
            if let Some(value) = value {
                let _ = writeln!(ret, "  {label}:");
                for line in textwrap::wrap(value, &wrap) {
                    let _ = writeln!(ret, "{line}");
                }
            }
        }
    }

    ret
}

/// List each template variable as `{{name}}` with its current value.
pub fn format_variable_list(context: &TemplateContext) -> String {
    context
        .names()
        .map(|name| {
            format!(
                "{} = {:?}",
                format!("{{{{{name}}}}}").if_supports_color(Stdout, |text| text.bold()),
                context.get(name).unwrap_or_default()
            )
        })
        .join("\n")
}
