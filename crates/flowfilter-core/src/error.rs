//! Error types for flowfilter-core
//!
//! Centralized error handling using `thiserror` for ergonomic error definitions.
//! Every error is raised while compiling a filter; matching never fails.

use std::fmt;
use thiserror::Error;

/// Request field a filter entry belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    /// `source_fqdn` patterns
    SourceFqdn,
    /// `destination_fqdn` patterns
    DestinationFqdn,
    /// `dns_query` regular expressions
    DnsQuery,
}

impl FilterField {
    pub(crate) fn error_prefix(self) -> &'static str {
        match self {
            Self::SourceFqdn | Self::DestinationFqdn => "invalid FQDN in filter",
            Self::DnsQuery => "invalid DNS query filter",
        }
    }
}

impl fmt::Display for FilterField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::SourceFqdn => "source_fqdn",
            Self::DestinationFqdn => "destination_fqdn",
            Self::DnsQuery => "dns_query",
        };
        f.write_str(name)
    }
}

/// Main error type for flowfilter-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Domain pattern contains characters outside the glob dialect
    #[error(r#"only alphanumeric ASCII characters, the hyphen "-", the underscore "_", "." and "*" are allowed: {pattern}"#)]
    InvalidPatternSyntax {
        /// The rejected pattern, as supplied by the caller
        pattern: String,
    },

    /// Regular expression failed to compile
    #[error("failed to compile regexp: {0}")]
    RegexCompile(#[from] regex::Error),

    /// An entry of a request field could not be compiled
    #[error("{}: {source}", .field.error_prefix())]
    InvalidFilterField {
        /// Field that was being compiled
        field: FilterField,
        /// Root cause
        #[source]
        source: Box<Error>,
    },

    /// Filter request file not found
    #[error("Filter request file not found: {path}")]
    RequestNotFound {
        /// Path to the missing file
        path: String,
    },

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an invalid pattern error
    pub fn invalid_pattern(pattern: impl Into<String>) -> Self {
        Self::InvalidPatternSyntax {
            pattern: pattern.into(),
        }
    }

    /// Wrap a root cause with the field it was found in
    pub fn invalid_field(field: FilterField, source: Error) -> Self {
        Self::InvalidFilterField {
            field,
            source: Box::new(source),
        }
    }

    /// Whether this error rejects a filter entry (as opposed to loading a request)
    pub fn is_invalid_filter(&self) -> bool {
        matches!(
            self,
            Self::InvalidPatternSyntax { .. } | Self::RegexCompile(_) | Self::InvalidFilterField { .. }
        )
    }
}
