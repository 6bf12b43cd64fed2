//! The event description editor.
//!
//! Descriptions are written in Markdown with `{{variable}}` placeholders. Each edit substitutes
//! the variables, renders the Markdown to HTML, and minifies it before storing the result in the
//! [`EVENT_DESCRIPTION`] field. Rendering happens off the async runtime, so several renders can be
//! in flight at once; only the most recent edit's result is ever stored.

use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use miette::IntoDiagnostic;
use tokio::task::JoinHandle;
use tracing::instrument;

use crate::fields::FieldStore;
use crate::fields::EVENT_DESCRIPTION;
use crate::markdown::markdown_to_html;
use crate::markdown::minify_html;
use crate::template::TemplateContext;

/// The description template used when none is given.
pub const DEFAULT_TEMPLATE: &str = include_str!("default_template.md");

/// Substitute, render, and minify a description.
pub fn render_description(markdown: &str, context: &TemplateContext) -> String {
    minify_html(&markdown_to_html(&context.substitute(markdown)))
}

/// Holds the Markdown source of the event description.
#[derive(Debug)]
pub struct DescriptionEditor {
    markdown: String,
    /// Incremented on every edit. A render is only stored if this still matches the value it
    /// was started with.
    generation: Arc<AtomicU64>,
}

impl Default for DescriptionEditor {
    fn default() -> Self {
        Self::new(DEFAULT_TEMPLATE)
    }
}

impl DescriptionEditor {
    /// Create an editor with the given initial Markdown. Nothing is rendered until the first
    /// [`DescriptionEditor::edit`].
    pub fn new(markdown: impl Into<String>) -> Self {
        Self {
            markdown: markdown.into(),
            generation: Default::default(),
        }
    }

    /// The current Markdown source.
    pub fn markdown(&self) -> &str {
        &self.markdown
    }

    /// Replace the Markdown source and start rendering it against `context`.
    ///
    /// Must be called from within a Tokio runtime.
    #[instrument(skip_all, level = "debug")]
    pub fn edit(
        &mut self,
        markdown: impl Into<String>,
        context: &TemplateContext,
    ) -> PendingRender {
        self.markdown = markdown.into();
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let substituted = context.substitute(&self.markdown).into_owned();
        let handle =
            tokio::task::spawn_blocking(move || minify_html(&markdown_to_html(&substituted)));
        tracing::debug!(generation, "Started rendering description");

        PendingRender {
            generation,
            latest: self.generation.clone(),
            handle,
        }
    }

    /// Re-render the current Markdown, for when the variables have changed but the text hasn't.
    pub fn refresh(&mut self, context: &TemplateContext) -> PendingRender {
        let markdown = std::mem::take(&mut self.markdown);
        self.edit(markdown, context)
    }

    /// Render the current Markdown with variables substituted, without minifying, for display.
    pub fn preview(&self, context: &TemplateContext) -> String {
        markdown_to_html(&context.substitute(&self.markdown))
    }
}

/// A description render started by [`DescriptionEditor::edit`].
#[derive(Debug)]
pub struct PendingRender {
    generation: u64,
    latest: Arc<AtomicU64>,
    handle: JoinHandle<String>,
}

impl PendingRender {
    /// Wait for the render to finish and store it in the [`EVENT_DESCRIPTION`] field.
    ///
    /// Returns `false` without touching the store if a newer edit was started in the meantime.
    #[instrument(skip_all, fields(generation = self.generation), level = "debug")]
    pub async fn apply(self, store: &mut FieldStore) -> miette::Result<bool> {
        let html = self.handle.await.into_diagnostic()?;

        let latest = self.latest.load(Ordering::SeqCst);
        if latest != self.generation {
            tracing::debug!(latest, "Discarding stale description render");
            return Ok(false);
        }

        store.set_value(EVENT_DESCRIPTION, html)?;
        Ok(true)
    }
}
