//! Running a form session from the command-line options.

use chrono::Local;
use miette::Context;
use miette::IntoDiagnostic;
use tracing::instrument;

use crate::cli::Opts;
use crate::field_list::format_field_list;
use crate::field_list::format_variable_list;
use crate::fields::FieldStore;
use crate::form_url::open_in_browser;
use crate::map_link::PortalSlot;
use crate::session::FormSession;

/// Build a [`FormSession`] from the command-line options: load the fields, apply `--set` and
/// `--other`, parse the map links, and render the description.
///
/// Map links that fail to parse are reported and skipped; they don't stop the session.
#[instrument(skip_all, level = "debug")]
pub async fn build_session(opts: &Opts) -> miette::Result<FormSession> {
    let fields = match &opts.fields {
        Some(path) => FieldStore::from_json_file(path)?,
        None => FieldStore::ingress_defaults(),
    };
    let mut session = FormSession::new(fields, &opts.base_url, Local::now().date_naive());

    for assignment in &opts.set {
        session
            .fields
            .set_value(&assignment.name, &assignment.value)
            .wrap_err("Invalid `--set`")?;
    }
    for assignment in &opts.other {
        session
            .fields
            .set_other(&assignment.name, &assignment.value)
            .wrap_err("Invalid `--other`")?;
    }

    for (slot, link) in [
        (PortalSlot::Base, &opts.portals.base_portal),
        (PortalSlot::Restock, &opts.portals.restock_portal),
    ] {
        let Some(link) = link else {
            continue;
        };
        match session.parse_portal(slot, link) {
            Ok(Some(location)) => {
                tracing::info!(%slot, name = %location.name, "Filled in portal");
            }
            Ok(None) => {}
            Err(err) => {
                tracing::warn!(
                    "Couldn't read the {slot} portal link:\n{:?}",
                    miette::Report::new(err)
                );
            }
        }
    }

    let pending = match &opts.description.description {
        Some(path) => {
            let markdown = tokio::fs::read_to_string(path)
                .await
                .into_diagnostic()
                .wrap_err_with(|| format!("Failed to read {path}"))?;
            Some(session.edit_description(markdown))
        }
        None if opts.description.default_description => Some(session.refresh_description()),
        None => None,
    };
    if let Some(pending) = pending {
        pending
            .apply(&mut session.fields)
            .await
            .wrap_err("Failed to render the description")?;
    }

    Ok(session)
}

/// Run `ifs-form` with the given options.
pub async fn run(opts: &Opts) -> miette::Result<()> {
    let session = build_session(opts).await?;

    if opts.output.list_fields {
        print!("{}", format_field_list(&session.fields));
        return Ok(());
    }
    if opts.description.list_variables {
        println!("{}", format_variable_list(&session.template_context()));
        return Ok(());
    }
    if opts.description.preview {
        println!("{}", session.preview_description());
    }

    let url = session.form_url();
    println!("{url}");

    if opts.output.no_open {
        tracing::debug!("Not opening the browser");
    } else {
        open_in_browser(&url)?;
        tracing::info!("Opened the form in your browser");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use clap::Parser;
    use pretty_assertions::assert_eq;
    use tracing_test::traced_test;

    use crate::fields::EVENT_DESCRIPTION;
    use crate::form_url::DEFAULT_BASE_URL;

    fn opts(args: &[&str]) -> Opts {
        Opts::try_parse_from(std::iter::once("ifs-form").chain(args.iter().copied())).unwrap()
    }

    #[tokio::test]
    #[traced_test]
    async fn test_bad_portal_link_is_not_fatal() {
        let session = build_session(&opts(&[
            "--base-portal",
            "not a url",
            "--restock-portal",
            "https://maps.google.com/?ll=47.1,19.2&q=47.1,19.2%20(Blue%20House)",
        ]))
        .await
        .unwrap();

        assert!(logs_contain("Couldn't read the base portal link"));
        assert_eq!(session.base_portal.input(), "not a url");
        assert_eq!(session.fields.value_of("Base Portal Name"), "");
        assert_eq!(
            session.fields.value_of("Restocking Portal Name"),
            "Blue House"
        );
    }

    #[tokio::test]
    async fn test_unknown_field_is_fatal() {
        let err = build_session(&opts(&["--set", "Town=Budapest"]))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid `--set`");
    }

    #[tokio::test]
    async fn test_explicit_description_kept() {
        let session = build_session(&opts(&["--set", "Event Description=<p>Hi</p>"]))
            .await
            .unwrap();
        assert_eq!(session.fields.value_of(EVENT_DESCRIPTION), "<p>Hi</p>");
    }

    #[tokio::test]
    async fn test_description_untouched_by_default() {
        let session = build_session(&opts(&["--set", "City=Szeged"]))
            .await
            .unwrap();
        assert_eq!(session.fields.value_of(EVENT_DESCRIPTION), "");
        assert_eq!(
            session.form_url(),
            format!("{DEFAULT_BASE_URL}?entry.1775527946=Szeged")
        );
    }

    #[tokio::test]
    async fn test_default_description_rendered() {
        let session = build_session(&opts(&["--set", "City=Szeged", "--default-description"]))
            .await
            .unwrap();
        assert!(session
            .fields
            .value_of(EVENT_DESCRIPTION)
            .starts_with("<p>First Saturday @ Szeged,"));
    }
}
