//! `ifs-form` builds a pre-filled Ingress First Saturday event form from map links and a Markdown
//! description, then opens it in your browser.

use clap::Parser;
use ifs_form::cli;
use ifs_form::TracingOpts;

#[tokio::main]
async fn main() -> miette::Result<()> {
    miette::set_panic_hook();
    let opts = cli::Opts::parse();
    TracingOpts::from_cli(&opts).install()?;

    ifs_form::run(&opts).await
}
