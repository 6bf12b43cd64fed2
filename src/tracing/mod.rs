//! Extensions and utilities for the [`tracing`] crate.

use miette::IntoDiagnostic;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::Layer;

use crate::cli::Opts;

/// Options for [`tracing_subscriber`].
#[derive(Debug, Clone)]
pub struct TracingOpts<'opts> {
    /// Filter directives, like `ifs_form=debug`.
    pub filter_directives: &'opts str,
    /// Whether to write JSON lines rather than human-readable logs.
    pub json: bool,
}

impl<'opts> TracingOpts<'opts> {
    /// Construct options for initializing the logging framework from the CLI options.
    pub fn from_cli(opts: &'opts Opts) -> Self {
        Self {
            filter_directives: &opts.logging.tracing_filter,
            json: opts.logging.log_json,
        }
    }

    /// Initialize the logging framework. Logs are written to stderr so they don't mix with the
    /// URL on stdout.
    pub fn install(&self) -> miette::Result<()> {
        let env_filter = EnvFilter::try_new(self.filter_directives)
            .or_else(|_| EnvFilter::try_from_default_env())
            .or_else(|_| EnvFilter::try_new("info"))
            .into_diagnostic()?;

        let registry = tracing_subscriber::registry();

        if self.json {
            registry
                .with(
                    fmt::layer()
                        .json()
                        .with_writer(std::io::stderr)
                        .with_filter(env_filter),
                )
                .try_init()
                .into_diagnostic()?;
        } else {
            registry
                .with(
                    fmt::layer()
                        .without_time()
                        .with_target(false)
                        .with_writer(std::io::stderr)
                        .with_filter(env_filter),
                )
                .try_init()
                .into_diagnostic()?;
        }

        Ok(())
    }
}
