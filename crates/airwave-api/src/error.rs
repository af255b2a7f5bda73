use thiserror::Error;

/// Top-level error type for the `airwave-api` crate.
///
/// Covers record lookups made while building graph URLs as well as the
/// HTTP surface of the XML API client. `airwave-config` wraps these for
/// configuration-driven consumers.
#[derive(Debug, Error)]
pub enum Error {
    // ── Record lookup ───────────────────────────────────────────────
    /// A required attribute is absent from an access point or radio record.
    #[error("Missing attribute: {key}")]
    MissingAttribute { key: String },

    /// An attribute value that cannot be rendered as a query parameter.
    #[error("Invalid parameter {key}: {reason}")]
    InvalidParameter { key: String, reason: String },

    /// Malformed XML, or a document with an unexpected root element.
    #[error("XML error: {0}")]
    Xml(String),

    // ── Authentication ──────────────────────────────────────────────
    /// Login rejected or session no longer valid.
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS setup or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── API ─────────────────────────────────────────────────────────
    /// Non-success HTTP status from an AirWave endpoint.
    #[error("AirWave API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Self::Xml(err.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for Error {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        Self::Xml(err.to_string())
    }
}

impl Error {
    pub(crate) fn missing(key: impl Into<String>) -> Self {
        Self::MissingAttribute { key: key.into() }
    }

    /// Returns `true` if the session needs to be re-established.
    pub fn is_auth_expired(&self) -> bool {
        matches!(self, Self::Authentication { .. })
    }

    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            Self::Api { status: 404, .. } => true,
            _ => false,
        }
    }
}
