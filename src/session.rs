//! The editing session: fields, the two portal link inputs, and the description editor.

use chrono::NaiveDate;

use crate::description::DescriptionEditor;
use crate::description::PendingRender;
use crate::fields::FieldStore;
use crate::form_url::build_form_url;
use crate::map_link::MapLinkError;
use crate::map_link::ParsedLocation;
use crate::map_link::PortalParser;
use crate::map_link::PortalSlot;
use crate::template::TemplateContext;

/// All of the state for filling in one form.
#[derive(Debug)]
pub struct FormSession {
    /// The form's fields.
    pub fields: FieldStore,
    /// The base portal's map link input.
    pub base_portal: PortalParser,
    /// The restocking portal's map link input.
    pub restock_portal: PortalParser,
    /// The event description's Markdown source.
    pub description: DescriptionEditor,
    base_url: String,
    today: NaiveDate,
}

impl FormSession {
    /// Start a session for the form at `base_url`. `today` is used for `{{currentDate}}`.
    pub fn new(fields: FieldStore, base_url: impl Into<String>, today: NaiveDate) -> Self {
        Self {
            fields,
            base_portal: PortalParser::new(PortalSlot::Base),
            restock_portal: PortalParser::new(PortalSlot::Restock),
            description: DescriptionEditor::default(),
            base_url: base_url.into(),
            today,
        }
    }

    /// The map link input for a slot.
    pub fn portal_mut(&mut self, slot: PortalSlot) -> &mut PortalParser {
        self.portal_and_fields(slot).0
    }

    /// A slot's map link input, borrowed alongside the fields it fills.
    fn portal_and_fields(&mut self, slot: PortalSlot) -> (&mut PortalParser, &mut FieldStore) {
        let parser = match slot {
            PortalSlot::Base => &mut self.base_portal,
            PortalSlot::Restock => &mut self.restock_portal,
        };
        (parser, &mut self.fields)
    }

    /// Paste a map link into a slot's input and parse it into the fields.
    pub fn parse_portal(
        &mut self,
        slot: PortalSlot,
        link: impl Into<String>,
    ) -> Result<Option<ParsedLocation>, MapLinkError> {
        let (parser, fields) = self.portal_and_fields(slot);
        parser.set_input(link);
        parser.parse(fields)
    }

    /// The template variables for the current field values.
    pub fn template_context(&self) -> TemplateContext {
        TemplateContext::from_store(&self.fields, self.today)
    }

    /// Replace the description's Markdown and start rendering it.
    pub fn edit_description(&mut self, markdown: impl Into<String>) -> PendingRender {
        let context = self.template_context();
        self.description.edit(markdown, &context)
    }

    /// Re-render the description against the current field values.
    pub fn refresh_description(&mut self) -> PendingRender {
        let context = self.template_context();
        self.description.refresh(&context)
    }

    /// Render the description for display, variables substituted but not minified.
    pub fn preview_description(&self) -> String {
        self.description.preview(&self.template_context())
    }

    /// The pre-filled form URL for the current field values.
    pub fn form_url(&self) -> String {
        build_form_url(&self.base_url, &self.fields)
    }
}
