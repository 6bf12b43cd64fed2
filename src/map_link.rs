//! Parsing pasted Google Maps links into portal names and coordinates.

use std::fmt::Display;

use miette::Diagnostic;
use once_cell::sync::Lazy;
use regex::Captures;
use regex::Regex;
use thiserror::Error;
use tracing::instrument;
use url::Url;

use crate::fields::FieldStore;

/// The name used when a portal name can't be found in a map link.
pub const UNKNOWN_PORTAL: &str = "Unknown Portal";

/// A problem with a pasted map link.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum MapLinkError {
    /// The input isn't a URL at all.
    #[error("Invalid URL format: {input:?}")]
    #[diagnostic(
        code(ifs_form::map_link::invalid_url),
        help("Paste a valid Google Maps URL.")
    )]
    InvalidUrl {
        /// The rejected input.
        input: String,
        /// Why the input failed to parse.
        #[source]
        source: url::ParseError,
    },

    /// The URL is missing its coordinates or its label.
    #[error("Invalid Google Maps URL format: expected `ll` and `q` query parameters")]
    #[diagnostic(
        code(ifs_form::map_link::missing_params),
        help("Copy the full URL from Google Maps.")
    )]
    MissingParams,
}

/// A location extracted from a map link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLocation {
    /// Latitude, as written in the link.
    pub latitude: String,
    /// Longitude, as written in the link.
    pub longitude: String,
    /// The portal name, or [`UNKNOWN_PORTAL`].
    pub name: String,
}

impl ParsedLocation {
    /// An Ingress Intel map link pointing at this location.
    pub fn intel_url(&self) -> String {
        format!(
            "https://intel.ingress.com/intel?pll={},{}",
            self.latitude, self.longitude
        )
    }
}

/// Parse a map link of the form `...?ll=<lat>,<lng>&q=<label>`.
///
/// Coordinates aren't validated as numbers; they're kept exactly as written.
pub fn parse_map_link(input: &str) -> Result<ParsedLocation, MapLinkError> {
    let url = Url::parse(input).map_err(|source| MapLinkError::InvalidUrl {
        input: input.to_owned(),
        source,
    })?;

    let query_param = |name: &str| {
        url.query_pairs()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
            .filter(|value| !value.is_empty())
    };

    let (ll, q) = match (query_param("ll"), query_param("q")) {
        (Some(ll), Some(q)) => (ll, q),
        _ => return Err(MapLinkError::MissingParams),
    };

    let mut coordinates = ll.split(',');
    let latitude = coordinates.next().unwrap_or_default().to_owned();
    let longitude = coordinates.next().unwrap_or_default().to_owned();

    Ok(ParsedLocation {
        latitude,
        longitude,
        name: extract_portal_name(&q),
    })
}

/// A way of pulling a portal name out of a map link's `q` parameter.
struct NamePattern {
    regex: Regex,
    extract: fn(&Captures<'_>) -> String,
}

static NAME_PATTERNS: Lazy<[NamePattern; 3]> = Lazy::new(|| {
    [
        // `47.491558,19.069074 (Oroszlanos Kapubejaro)`
        NamePattern {
            regex: Regex::new(r"^\s*[0-9.,]+\s*\((.+)\)\s*$").expect("Coordinate pattern is valid"),
            extract: |captures| captures[1].trim().to_owned(),
        },
        // The same, with the space still percent-encoded.
        NamePattern {
            regex: Regex::new(r"^[^%]*%20\((.+)\)$").expect("Encoded pattern is valid"),
            extract: |captures| match urlencoding::decode(&captures[1]) {
                Ok(decoded) => decoded.into_owned(),
                Err(_) => captures[1].to_owned(),
            },
        },
        // Anything in parentheses after whitespace.
        NamePattern {
            regex: Regex::new(r"\s+\((.+)\)").expect("Parenthesized pattern is valid"),
            extract: |captures| captures[1].trim().to_owned(),
        },
    ]
});

/// Extract a portal name from a map link label, trying each pattern in turn.
///
/// Returns [`UNKNOWN_PORTAL`] if nothing matches.
pub fn extract_portal_name(label: &str) -> String {
    NAME_PATTERNS
        .iter()
        .find_map(|pattern| {
            pattern
                .regex
                .captures(label)
                .map(|captures| (pattern.extract)(&captures))
        })
        .unwrap_or_else(|| UNKNOWN_PORTAL.to_owned())
}

/// Which portal a map link describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortalSlot {
    /// The portal the event is held at.
    Base,
    /// The portal players restock at afterwards.
    Restock,
}

impl PortalSlot {
    /// The field holding this portal's name.
    pub fn name_field(&self) -> &'static str {
        match self {
            PortalSlot::Base => "Base Portal Name",
            PortalSlot::Restock => "Restocking Portal Name",
        }
    }

    /// The field holding this portal's Intel link.
    pub fn url_field(&self) -> &'static str {
        match self {
            PortalSlot::Base => "Base Portal URL",
            PortalSlot::Restock => "Restocking Portal Intel URL",
        }
    }
}

impl Display for PortalSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PortalSlot::Base => write!(f, "base"),
            PortalSlot::Restock => write!(f, "restock"),
        }
    }
}

/// A map link input for one [`PortalSlot`].
///
/// Each parser has its own input buffer, which is cleared when a link is parsed successfully and
/// left alone when it isn't.
#[derive(Debug, Clone)]
pub struct PortalParser {
    slot: PortalSlot,
    input: String,
}

impl PortalParser {
    /// Create a parser with an empty input.
    pub fn new(slot: PortalSlot) -> Self {
        Self {
            slot,
            input: String::new(),
        }
    }

    /// The slot this parser fills.
    pub fn slot(&self) -> PortalSlot {
        self.slot
    }

    /// The current contents of the input buffer.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Replace the contents of the input buffer.
    pub fn set_input(&mut self, input: impl Into<String>) {
        self.input = input.into();
    }

    /// Parse the input buffer and write the portal name and Intel link into `store`.
    ///
    /// An empty buffer does nothing and returns `Ok(None)`.
    #[instrument(skip_all, fields(slot = %self.slot), level = "debug")]
    pub fn parse(
        &mut self,
        store: &mut FieldStore,
    ) -> Result<Option<ParsedLocation>, MapLinkError> {
        if self.input.is_empty() {
            return Ok(None);
        }

        let location = parse_map_link(&self.input)?;
        tracing::debug!(
            latitude = %location.latitude,
            longitude = %location.longitude,
            name = %location.name,
            "Parsed map link"
        );

        for (field, value) in [
            (self.slot.name_field(), location.name.clone()),
            (self.slot.url_field(), location.intel_url()),
        ] {
            if !store.assign(field, value) {
                tracing::warn!(field, "No such field to fill from the map link");
            }
        }

        self.input.clear();
        Ok(Some(location))
    }
}
