//! Content types for leaf payloads.

use std::borrow::Cow;
use std::fmt;

/// A MIME type attached to bytes handed to the transport.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Format(pub Cow<'static, str>);

impl Format {
    /// JSON (`application/json`)
    pub const JSON: Format = Format(Cow::Borrowed("application/json"));

    /// Opaque binary data (`application/octet-stream`). This is also the
    /// content type of the store's native serialization format.
    pub const OCTET_STREAM: Format = Format(Cow::Borrowed("application/octet-stream"));

    /// Pick a format for a non-empty payload from its first byte.
    ///
    /// Anything starting with `{` is treated as JSON, everything else is
    /// opaque. The rest of the payload is never looked at, so malformed JSON
    /// is still labelled JSON.
    ///
    /// ```rust
    /// use coordfs_core_store::Format;
    ///
    /// assert_eq!(Format::sniff(b"{\"x\":1}"), Format::JSON);
    /// assert_eq!(Format::sniff(b"\x00\x01"), Format::OCTET_STREAM);
    /// ```
    pub fn sniff(data: &[u8]) -> Format {
        match data.first() {
            Some(b'{') => Self::JSON,
            _ => Self::OCTET_STREAM,
        }
    }

    pub fn new(s: impl Into<String>) -> Self {
        Format(Cow::Owned(s.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_json(&self) -> bool {
        self == &Self::JSON
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&'static str> for Format {
    fn from(s: &'static str) -> Self {
        Format(Cow::Borrowed(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constants_work() {
        assert_eq!(Format::JSON.as_str(), "application/json");
        assert_eq!(Format::OCTET_STREAM.as_str(), "application/octet-stream");
        assert!(Format::JSON.is_json());
        assert!(!Format::OCTET_STREAM.is_json());
    }

    #[test]
    fn sniff_only_looks_at_first_byte() {
        assert_eq!(Format::sniff(b"{"), Format::JSON);
        assert_eq!(Format::sniff(b"{not json at all"), Format::JSON);
        assert_eq!(Format::sniff(b" {\"x\":1}"), Format::OCTET_STREAM);
        assert_eq!(Format::sniff(b"[1,2,3]"), Format::OCTET_STREAM);
        assert_eq!(Format::sniff(b"plain text"), Format::OCTET_STREAM);
    }

    #[test]
    fn sniff_empty_is_opaque() {
        assert_eq!(Format::sniff(b""), Format::OCTET_STREAM);
    }

    #[test]
    fn equality() {
        assert_eq!(Format::JSON, Format::from("application/json"));
        assert_eq!(Format::JSON, Format::new("application/json".to_string()));
    }

    #[test]
    fn display_impl() {
        assert_eq!(format!("{}", Format::OCTET_STREAM), "application/octet-stream");
    }
}
