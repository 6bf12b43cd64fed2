//! `ifs-form` fills in the Ingress First Saturday event registration form.
//!
//! It keeps the form's fields, reads portal names and coordinates out of pasted Google Maps
//! links, renders a Markdown event description with `{{variable}}` placeholders into compact HTML,
//! and builds a URL that opens the form with everything pre-filled.
//!
//! Note that the `ifs-form` Rust library is a convenience for the command-line tool and its tests,
//! not a stable API.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

mod clap;
pub mod cli;
pub mod description;
mod field_list;
pub mod fields;
pub mod form_url;
mod format_bulleted_list;
pub mod map_link;
pub mod markdown;
mod runner;
pub mod session;
pub mod template;
mod textwrap;
mod tracing;

pub(crate) use format_bulleted_list::format_bulleted_list;

pub use self::clap::FieldAssignment;
pub use self::tracing::TracingOpts;
pub use description::DescriptionEditor;
pub use description::PendingRender;
pub use field_list::format_field_list;
pub use fields::FieldDescriptor;
pub use fields::FieldKind;
pub use fields::FieldStore;
pub use form_url::build_form_url;
pub use map_link::parse_map_link;
pub use map_link::MapLinkError;
pub use map_link::ParsedLocation;
pub use map_link::PortalParser;
pub use map_link::PortalSlot;
pub use runner::build_session;
pub use runner::run;
pub use session::FormSession;
pub use template::TemplateContext;
