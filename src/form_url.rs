//! Building pre-filled form URLs.

use itertools::Itertools;
use miette::IntoDiagnostic;
use miette::WrapErr;

use crate::fields::FieldDescriptor;
use crate::fields::FieldStore;

/// The Ingress First Saturday event registration form.
pub const DEFAULT_BASE_URL: &str =
    "https://docs.google.com/forms/d/e/1FAIpQLSc0n27dpw5ewId4ugkesc8QpjF1on29ThxcU776kA53ayrkvQ/viewform";

/// Sentinel value selecting a choice field's free-text "other" option.
pub const OTHER_OPTION: &str = "__other_option__";

/// The `entry.<id>=<value>` query pairs for one field, in order.
///
/// A non-empty value gives one pair. A non-empty "other" response gives two more: the
/// [`OTHER_OPTION`] sentinel and then the response itself. Blank fields give nothing.
pub fn field_query_pairs(field: &FieldDescriptor) -> Vec<String> {
    let mut pairs = Vec::new();
    if let Some(value) = field.non_empty_value() {
        pairs.push(format!("entry.{}={}", field.id, urlencoding::encode(value)));
    }
    if let Some(other) = field.non_empty_other() {
        pairs.push(format!("entry.{}={OTHER_OPTION}", field.id));
        pairs.push(format!(
            "entry.{}.other_option_response={}",
            field.id,
            urlencoding::encode(other)
        ));
    }
    pairs
}

/// Build the URL that opens the form at `base_url` with every filled-in field pre-filled.
///
/// If no fields are filled in, `base_url` is returned unchanged.
pub fn build_form_url(base_url: &str, store: &FieldStore) -> String {
    let query = store.iter().flat_map(field_query_pairs).join("&");
    if query.is_empty() {
        base_url.to_owned()
    } else {
        format!("{base_url}?{query}")
    }
}

/// Open a URL in the user's browser.
pub fn open_in_browser(url: &str) -> miette::Result<()> {
    tracing::debug!(url, "Opening browser");
    open::that(url)
        .into_diagnostic()
        .wrap_err("Failed to open the form in a browser")
}

#[cfg(test)]
mod tests {
    use super::*;

    use expect_test::expect;
    use pretty_assertions::assert_eq;

    fn store(fields: Vec<FieldDescriptor>) -> FieldStore {
        FieldStore::new(fields).unwrap()
    }

    #[test]
    fn test_empty_store() {
        assert_eq!(
            build_form_url(DEFAULT_BASE_URL, &FieldStore::ingress_defaults()),
            DEFAULT_BASE_URL
        );
        assert_eq!(
            build_form_url("https://example.com/form", &store(vec![])),
            "https://example.com/form"
        );
    }

    #[test]
    fn test_blank_fields_omitted() {
        let mut field = FieldDescriptor::new(2, "Country");
        field.value = Some(String::new());
        let url = build_form_url(
            "https://example.com/form",
            &store(vec![
                FieldDescriptor::new(1, "City"),
                field,
                FieldDescriptor::new(3, "Preferred Language").with_other(""),
            ]),
        );
        assert_eq!(url, "https://example.com/form");
    }

    #[test]
    fn test_value_encoded() {
        let mut field = FieldDescriptor::new(1775527946, "City");
        field.value = Some("Szent István tér & <h1>".to_owned());
        expect![[r#"entry.1775527946=Szent%20Istv%C3%A1n%20t%C3%A9r%20%26%20%3Ch1%3E"#]]
            .assert_eq(&field_query_pairs(&field).join("&"));
    }

    #[test]
    fn test_other_pairs() {
        let field = FieldDescriptor::new(1677540642, "Preferred Language").with_other("Hungarian");
        assert_eq!(
            field_query_pairs(&field),
            vec![
                "entry.1677540642=__other_option__",
                "entry.1677540642.other_option_response=Hungarian",
            ]
        );
    }

    #[test]
    fn test_value_and_other() {
        let mut field = FieldDescriptor::new(7, "Preferred Language").with_other("Hungarian");
        field.value = Some("English".to_owned());
        assert_eq!(
            field_query_pairs(&field),
            vec![
                "entry.7=English",
                "entry.7=__other_option__",
                "entry.7.other_option_response=Hungarian",
            ]
        );
    }

    #[test]
    fn test_store_order() {
        let mut store = FieldStore::ingress_defaults();
        store.set_value("Event Type", "Onsite").unwrap();
        store.set_value("City", "Budapest").unwrap();
        store.set_other("Preferred Language", "Hungarian").unwrap();
        expect![[r#"https://docs.google.com/forms/d/e/1FAIpQLSc0n27dpw5ewId4ugkesc8QpjF1on29ThxcU776kA53ayrkvQ/viewform?entry.1775527946=Budapest&entry.1677540642=__other_option__&entry.1677540642.other_option_response=Hungarian&entry.1570769333=Onsite"#]]
            .assert_eq(&build_form_url(DEFAULT_BASE_URL, &store));
    }
}
