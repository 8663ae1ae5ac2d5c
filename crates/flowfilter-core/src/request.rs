//! Filter requests
//!
//! A [`FilterRequest`] is the already-parsed filter specification. Every field
//! is optional, and an absent field is not the same as an empty list: absent
//! means the field contributes no predicate at all.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Parsed filter specification
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterRequest {
    /// Glob patterns matched against source domain names
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_fqdn: Option<Vec<String>>,

    /// Glob patterns matched against destination domain names
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_fqdn: Option<Vec<String>>,

    /// Regular expressions matched against the DNS query
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dns_query: Option<Vec<String>>,

    /// Allowed reply directions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply: Option<Vec<bool>>,
}

impl FilterRequest {
    /// Create an empty request
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a request from a file
    ///
    /// `.json` files are parsed as JSON, anything else as TOML.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|_| Error::RequestNotFound {
            path: path.display().to_string(),
        })?;

        if path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json")) {
            Self::from_json(&content)
        } else {
            Self::from_toml(&content)
        }
    }

    /// Parse a request from a TOML string
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(Error::from)
    }

    /// Parse a request from a JSON string
    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(Error::from)
    }

    /// Set source domain patterns
    #[must_use]
    pub fn with_source_fqdn<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.source_fqdn = Some(patterns.into_iter().map(Into::into).collect());
        self
    }

    /// Set destination domain patterns
    #[must_use]
    pub fn with_destination_fqdn<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.destination_fqdn = Some(patterns.into_iter().map(Into::into).collect());
        self
    }

    /// Set DNS query regular expressions
    #[must_use]
    pub fn with_dns_query<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dns_query = Some(patterns.into_iter().map(Into::into).collect());
        self
    }

    /// Set allowed reply directions
    #[must_use]
    pub fn with_reply(mut self, reply: impl IntoIterator<Item = bool>) -> Self {
        self.reply = Some(reply.into_iter().collect());
        self
    }

    /// True when no field is set
    pub fn is_empty(&self) -> bool {
        self.source_fqdn.is_none()
            && self.destination_fqdn.is_none()
            && self.dns_query.is_none()
            && self.reply.is_none()
    }
}
