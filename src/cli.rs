//! Command-line argument parser and argument access.

use camino::Utf8PathBuf;
use clap::Parser;

use crate::clap::FieldAssignment;
use crate::form_url::DEFAULT_BASE_URL;

/// Build a pre-filled Ingress First Saturday event form and open it in your browser.
#[derive(Debug, Clone, Parser)]
#[command(version, author, about)]
#[command(max_term_width = 100)]
pub struct Opts {
    /// A JSON file listing the form's fields, to use instead of the built-in event form fields.
    ///
    /// The file holds an array of objects with an `id`, a `name`, and optionally a `value` and an
    /// `other` response.
    #[arg(long, value_name = "PATH")]
    pub fields: Option<Utf8PathBuf>,

    /// The address of the form to pre-fill.
    #[arg(long, env = "IFS_FORM_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Set a field's value, like `--set City=Budapest`. Can be given multiple times.
    #[arg(long = "set", value_name = "NAME=VALUE")]
    pub set: Vec<FieldAssignment>,

    /// Set a choice field's free-text "other" response, like
    /// `--other 'Preferred Language=Hungarian'`. Can be given multiple times.
    #[arg(long = "other", value_name = "NAME=VALUE")]
    pub other: Vec<FieldAssignment>,

    /// Options for filling in portals from map links.
    #[command(flatten)]
    pub portals: PortalOpts,

    /// Options for the event description.
    #[command(flatten)]
    pub description: DescriptionOpts,

    /// Options for what to do with the result.
    #[command(flatten)]
    pub output: OutputOpts,

    /// Options to modify logging and error-handling behavior.
    #[command(flatten)]
    pub logging: LoggingOpts,
}

/// Options for filling in portals from map links.
#[derive(Debug, Clone, clap::Args)]
#[clap(next_help_heading = "Portal options")]
pub struct PortalOpts {
    /// A Google Maps link to the base portal, with `ll` and `q` query parameters.
    ///
    /// Fills in the base portal's name and Intel link.
    #[arg(long, value_name = "URL")]
    pub base_portal: Option<String>,

    /// A Google Maps link to the restocking portal, with `ll` and `q` query parameters.
    ///
    /// Fills in the restocking portal's name and Intel link.
    #[arg(long, value_name = "URL")]
    pub restock_portal: Option<String>,
}

/// Options for the event description.
#[derive(Debug, Clone, clap::Args)]
#[clap(next_help_heading = "Description options")]
pub struct DescriptionOpts {
    /// A Markdown file to use as the event description.
    ///
    /// `{{variable}}` placeholders are replaced with field values; see `--list-variables`.
    /// Without this option or `--default-description`, the description field keeps the value it
    /// was given in `--fields` or with `--set`.
    #[arg(long, value_name = "PATH")]
    pub description: Option<Utf8PathBuf>,

    /// Render the built-in description template into the description field.
    #[arg(long, conflicts_with = "description")]
    pub default_description: bool,

    /// Print the rendered description HTML before the URL.
    #[arg(long)]
    pub preview: bool,

    /// List the variables available to the description and their current values, then exit.
    #[arg(long)]
    pub list_variables: bool,
}

/// Options for what to do with the result.
#[derive(Debug, Clone, clap::Args)]
#[clap(next_help_heading = "Output options")]
pub struct OutputOpts {
    /// List the form's fields and their current values, then exit.
    #[arg(long)]
    pub list_fields: bool,

    /// Print the URL without opening it in a browser.
    #[arg(long)]
    pub no_open: bool,
}

/// Options to modify logging and error-handling behavior.
#[derive(Debug, Clone, clap::Args)]
#[clap(next_help_heading = "Logging options")]
pub struct LoggingOpts {
    #[allow(rustdoc::bare_urls)]
    /// Tracing filter.
    ///
    /// Can be any of "error", "warn", "info", "debug", or
    /// "trace". Supports more granular filtering, as well.
    /// See: https://docs.rs/tracing-subscriber/latest/tracing_subscriber/filter/struct.EnvFilter.html
    ///
    /// A nice value is "ifs_form=debug".
    #[arg(long, default_value = "ifs_form=info")]
    pub tracing_filter: String,

    /// Write logs as JSON lines instead of human-readable text.
    #[arg(long)]
    pub log_json: bool,
}
