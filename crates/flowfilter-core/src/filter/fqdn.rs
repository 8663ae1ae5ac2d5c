//! FQDN and DNS query filtering
//!
//! Domain patterns use a small glob dialect: ASCII letters, digits, `-`, `_`,
//! `.` as a literal delimiter and `*` as a wildcard. Each pattern is compiled
//! into an anchored regular expression over lower-case names; candidates are
//! lower-cased before matching:
//!
//! - `example.com` matches only `example.com` (and `EXAMPLE.com`)
//! - `*.example.com` matches `www.example.com`, `a.b.example.com`, not `example.com`
//! - `example.com.` is the same pattern as `example.com`
//!
//! DNS query filters are plain, unanchored regular expressions.

use super::{FilterBuilder, FilterFunc};
use crate::error::{Error, FilterField, Result};
use crate::event::Event;
use crate::request::FilterRequest;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Characters a wildcard may expand to
const WILDCARD: &str = "[-a-z0-9_.]*";

static VALID_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new("^[-a-zA-Z0-9_.*]+$").expect("static pattern regex is valid")
});

/// A compiled domain name glob
#[derive(Clone)]
pub struct FqdnPattern {
    /// Normalized glob, lower-cased without trailing dot
    pattern: String,
    regex: Regex,
}

impl FqdnPattern {
    /// Compile a domain glob
    ///
    /// The pattern is lower-cased, trimmed and stripped of one trailing dot
    /// before validation. Rejected patterns are reported as given.
    pub fn compile(raw: &str) -> Result<Self> {
        let lowered = raw.to_lowercase();
        let trimmed = lowered.trim();
        let pattern = trimmed.strip_suffix('.').unwrap_or(trimmed);

        if !VALID_PATTERN.is_match(pattern) {
            return Err(Error::invalid_pattern(raw));
        }

        let source = format!("^{}$", pattern.replace('.', "[.]").replace('*', WILDCARD));
        let regex = Regex::new(&source)?;

        Ok(Self {
            pattern: pattern.to_string(),
            regex,
        })
    }

    /// Whether the whole lower-cased name matches the pattern
    pub fn is_match(&self, name: &str) -> bool {
        self.regex.is_match(&name.to_lowercase())
    }

    /// The normalized glob
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// The generated regular expression
    pub fn as_regex_str(&self) -> &str {
        self.regex.as_str()
    }
}

impl FromStr for FqdnPattern {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::compile(s)
    }
}

impl fmt::Debug for FqdnPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FqdnPattern")
            .field("pattern", &self.pattern)
            .field("regex", &self.regex.as_str())
            .finish()
    }
}

fn filter_by_fqdns(
    patterns: &[String],
    field: FilterField,
    names: fn(&Event) -> &[String],
) -> Result<FilterFunc> {
    let compiled = patterns
        .iter()
        .map(|p| FqdnPattern::compile(p))
        .collect::<Result<Vec<_>>>()
        .map_err(|e| Error::invalid_field(field, e))?;

    debug!(%field, patterns = compiled.len(), "Compiled FQDN filter");

    Ok(Box::new(move |event: &Event| {
        names(event)
            .iter()
            .any(|name| compiled.iter().any(|pattern| pattern.is_match(name)))
    }))
}

fn filter_by_dns_queries(patterns: &[String]) -> Result<FilterFunc> {
    let queries = patterns
        .iter()
        .map(|p| Regex::new(p).map_err(Error::from))
        .collect::<Result<Vec<_>>>()
        .map_err(|e| Error::invalid_field(FilterField::DnsQuery, e))?;

    debug!(patterns = queries.len(), "Compiled DNS query filter");

    Ok(Box::new(move |event: &Event| {
        event
            .dns_query()
            .is_some_and(|query| queries.iter().any(|re| re.is_match(query)))
    }))
}

/// Builds filters on resolved domain names and DNS queries
///
/// Produces up to three predicates: source names, destination names and
/// DNS query, one per field present in the request.
#[derive(Debug, Clone, Copy, Default)]
pub struct FqdnFilter;

impl FilterBuilder for FqdnFilter {
    fn name(&self) -> &'static str {
        "fqdn"
    }

    fn build_filter(&self, request: &FilterRequest) -> Result<Vec<FilterFunc>> {
        let mut filters = Vec::new();

        if let Some(patterns) = &request.source_fqdn {
            filters.push(filter_by_fqdns(patterns, FilterField::SourceFqdn, Event::source_names)?);
        }

        if let Some(patterns) = &request.destination_fqdn {
            filters.push(filter_by_fqdns(
                patterns,
                FilterField::DestinationFqdn,
                Event::destination_names,
            )?);
        }

        if let Some(patterns) = &request.dns_query {
            filters.push(filter_by_dns_queries(patterns)?);
        }

        Ok(filters)
    }
}
