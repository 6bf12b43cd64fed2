//! `{{variable}}` substitution for the event description.

use std::borrow::Cow;

use chrono::Duration;
use chrono::NaiveDate;
use chrono::NaiveTime;
use once_cell::sync::Lazy;
use regex::Captures;
use regex::Regex;

use crate::fields::FieldStore;

static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{([A-Za-z0-9_]+)\}\}").expect("Placeholder pattern is valid"));

/// Variable values available to a description template, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateContext {
    variables: Vec<(String, String)>,
}

impl TemplateContext {
    /// An empty context; every placeholder substitutes to the empty string.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a variable, replacing any previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.variables.iter_mut().find(|(key, _)| *key == name) {
            Some((_, old)) => *old = value,
            None => self.variables.push((name, value)),
        }
    }

    /// Builder-style [`TemplateContext::insert`].
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// Get a variable's value.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.variables
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Variable names, in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.variables.iter().map(|(name, _)| name.as_str())
    }

    /// The variables derived from the event form's fields.
    ///
    /// `today` fills `{{currentDate}}`; the times are offsets from the `Event Start Time` field.
    pub fn from_store(store: &FieldStore, today: NaiveDate) -> Self {
        let start_time = store.value_of("Event Start Time");
        let offset = |minutes| time_offset(start_time, minutes).unwrap_or_default();

        Self::new()
            .with("city", store.value_of("City"))
            .with("country", store.value_of("Country"))
            .with("startTime", start_time)
            .with("eventType", store.value_of("Event Type"))
            .with("basePortal", store.value_of("Base Portal Name"))
            .with("restockPortal", store.value_of("Restocking Portal Name"))
            .with("currentDate", today.format("%Y. %m. %d.").to_string())
            .with("halfHourBefore", offset(-30))
            .with("fiveMinutesBefore", offset(-5))
            .with("endTime", offset(120))
            .with("endTimePlus5hr", offset(300))
    }

    /// Replace every `{{name}}` placeholder in `text`.
    ///
    /// Unknown variables become the empty string. Substitution is a single pass, so values that
    /// themselves contain placeholders aren't expanded.
    pub fn substitute<'t>(&self, text: &'t str) -> Cow<'t, str> {
        PLACEHOLDER.replace_all(text, |captures: &Captures<'_>| {
            self.get(&captures[1]).unwrap_or_default().to_owned()
        })
    }
}

/// Shift a `HH:MM` time by `offset_minutes`, wrapping around midnight.
///
/// The result is formatted on a 24-hour clock with a period separator, like `13.30`. A blank
/// `start` gives a blank result. An unparseable `start`, or an offset too large to represent,
/// gives `None`.
pub fn time_offset(start: &str, offset_minutes: i64) -> Option<String> {
    let start = start.trim();
    if start.is_empty() {
        return Some(String::new());
    }

    let time = NaiveTime::parse_from_str(start, "%H:%M").ok()?;
    let offset = Duration::try_minutes(offset_minutes)?;
    let (shifted, _) = time.overflowing_add_signed(offset);
    Some(shifted.format("%H.%M").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    use expect_test::expect;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_substitute() {
        let context = TemplateContext::new().with("name", "World");
        assert_eq!(context.substitute("Hello {{name}}"), "Hello World");
        assert_eq!(
            TemplateContext::new().substitute("Hello {{name}}"),
            "Hello "
        );
    }

    #[test]
    fn test_substitute_all_occurrences() {
        let context = TemplateContext::new()
            .with("a", "1")
            .with("b", "2")
            .with("empty", "");
        assert_eq!(
            context.substitute("{{a}}{{b}}{{a}} {{empty}}! {{ a }} {a}"),
            "121 ! {{ a }} {a}"
        );
    }

    #[test]
    fn test_substitute_single_pass() {
        let context = TemplateContext::new()
            .with("outer", "{{inner}}")
            .with("inner", "nope");
        assert_eq!(context.substitute("{{outer}}"), "{{inner}}");
    }

    #[test]
    fn test_insert_replaces() {
        let mut context = TemplateContext::new().with("city", "Szeged");
        context.insert("city", "Budapest");
        assert_eq!(context.get("city"), Some("Budapest"));
        assert_eq!(context.names().collect::<Vec<_>>(), vec!["city"]);
    }

    #[test]
    fn test_time_offset() {
        assert_eq!(time_offset("14:00", -30).as_deref(), Some("13.30"));
        assert_eq!(time_offset("14:00", 120).as_deref(), Some("16.00"));
        assert_eq!(time_offset("14:00", -5).as_deref(), Some("13.55"));
        assert_eq!(time_offset("9:05", 0).as_deref(), Some("09.05"));
        assert_eq!(time_offset("23:50", 20).as_deref(), Some("00.10"));
        assert_eq!(time_offset("00:10", -30).as_deref(), Some("23.40"));
        assert_eq!(time_offset("", 30).as_deref(), Some(""));
        assert_eq!(time_offset("noon", 30), None);
        assert_eq!(time_offset("14:00", 24 * 60).as_deref(), Some("14.00"));
    }

    #[test]
    fn test_time_offset_out_of_range() {
        assert_eq!(time_offset("14:00", i64::MAX), None);
        assert_eq!(time_offset("14:00", i64::MIN), None);
        assert_eq!(time_offset("", i64::MAX).as_deref(), Some(""));
    }

    #[test]
    fn test_from_store() {
        let mut store = FieldStore::ingress_defaults();
        store.set_value("City", "Budapest").unwrap();
        store.set_value("Country", "Hungary").unwrap();
        store.set_value("Event Start Time", "14:00").unwrap();
        store.set_value("Event Type", "Onsite").unwrap();
        store.set_value("Base Portal Name", "Lions").unwrap();

        let context = TemplateContext::from_store(
            &store,
            NaiveDate::from_ymd_opt(2026, 3, 7).expect("Date is valid"),
        );
        let rendered = context
            .names()
            .map(|name| format!("{name}={}", context.get(name).unwrap_or_default()))
            .collect::<Vec<_>>()
            .join("\n");
        expect![[r#"
            city=Budapest
            country=Hungary
            startTime=14:00
            eventType=Onsite
            basePortal=Lions
            restockPortal=
            currentDate=2026. 03. 07.
            halfHourBefore=13.30
            fiveMinutesBefore=13.55
            endTime=16.00
            endTimePlus5hr=19.00"#]]
        .assert_eq(&rendered);
    }
}
