//! Flow filtering
//!
//! A [`FilterRequest`] is compiled into a [`FilterChain`] by asking every
//! [`FilterBuilder`] for the predicates it can build from the request. The
//! chain matches an event when any of its predicates does.
//!
//! Builders:
//! - [`FqdnFilter`] - source/destination domain globs and DNS query regexes
//! - [`ReplyFilter`] - reply direction

mod fqdn;
mod reply;

pub use fqdn::{FqdnFilter, FqdnPattern};
pub use reply::ReplyFilter;

use crate::error::Result;
use crate::event::Event;
use crate::request::FilterRequest;
use std::fmt;
use tracing::{debug, instrument, warn};

/// Compiled predicate over a single event
pub type FilterFunc = Box<dyn Fn(&Event) -> bool + Send + Sync>;

/// Compiles the parts of a request it understands into predicates
///
/// Returning an empty list means the builder has nothing to contribute.
#[cfg_attr(test, mockall::automock)]
pub trait FilterBuilder: Send + Sync {
    /// Builder name for logging/debugging
    fn name(&self) -> &'static str;

    /// Build predicates from the request
    ///
    /// An error rejects the whole contribution of this builder.
    fn build_filter(&self, request: &FilterRequest) -> Result<Vec<FilterFunc>>;
}

/// Builders known to this crate, in evaluation order
pub fn default_builders() -> Vec<Box<dyn FilterBuilder>> {
    vec![Box::new(FqdnFilter), Box::new(ReplyFilter)]
}

/// Ordered list of compiled predicates
#[derive(Default)]
pub struct FilterChain {
    filters: Vec<FilterFunc>,
}

impl FilterChain {
    /// Create an empty chain
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a predicate
    pub fn push(&mut self, filter: FilterFunc) {
        self.filters.push(filter);
    }

    /// Number of predicates
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// Check if chain is empty
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// True if any predicate matches the event
    ///
    /// An empty chain matches nothing.
    pub fn matches(&self, event: &Event) -> bool {
        self.filters.iter().any(|filter| filter(event))
    }

    /// True if no predicate matches the event
    pub fn matches_none(&self, event: &Event) -> bool {
        !self.matches(event)
    }
}

impl Extend<FilterFunc> for FilterChain {
    fn extend<T: IntoIterator<Item = FilterFunc>>(&mut self, iter: T) {
        self.filters.extend(iter);
    }
}

impl FromIterator<FilterFunc> for FilterChain {
    fn from_iter<T: IntoIterator<Item = FilterFunc>>(iter: T) -> Self {
        Self {
            filters: iter.into_iter().collect(),
        }
    }
}

impl fmt::Debug for FilterChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterChain")
            .field("filters", &self.filters.len())
            .finish()
    }
}

/// Compile a request with every builder, in order
///
/// Stops at the first builder error; nothing built so far is returned.
#[instrument(skip_all, fields(builders = builders.len()))]
pub fn build_filter_chain(
    builders: &[Box<dyn FilterBuilder>],
    request: &FilterRequest,
) -> Result<FilterChain> {
    let mut chain = FilterChain::new();

    for builder in builders {
        let filters = builder.build_filter(request).map_err(|e| {
            warn!("Filter builder '{}' rejected request: {}", builder.name(), e);
            e
        })?;

        if !filters.is_empty() {
            debug!("Builder '{}' added {} filter(s)", builder.name(), filters.len());
        }
        chain.extend(filters);
    }

    Ok(chain)
}

/// Decide whether an event is surfaced
///
/// An empty allow chain lets everything through; the deny chain must not
/// match.
pub fn apply(allow: &FilterChain, deny: &FilterChain, event: &Event) -> bool {
    (allow.is_empty() || allow.matches(event)) && deny.matches_none(event)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::event::{Flow, LostEvents};
    use mockall::Sequence;

    fn always(result: bool) -> FilterFunc {
        Box::new(move |_: &Event| result)
    }

    fn flow() -> Event {
        Event::Flow(Flow::default())
    }

    #[test]
    fn test_empty_chain() {
        let chain = FilterChain::new();
        assert!(chain.is_empty());
        assert!(!chain.matches(&flow()));
        assert!(chain.matches_none(&flow()));
    }

    #[test]
    fn test_chain_is_or() {
        let chain: FilterChain = vec![always(false), always(true)].into_iter().collect();
        assert_eq!(chain.len(), 2);
        assert!(chain.matches(&flow()));

        let chain: FilterChain = vec![always(false), always(false)].into_iter().collect();
        assert!(!chain.matches(&flow()));
    }

    #[test]
    fn test_builders_called_in_order() {
        let mut seq = Sequence::new();

        let mut first = MockFilterBuilder::new();
        first.expect_name().return_const("first");
        first
            .expect_build_filter()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(vec![always(false)]));

        let mut second = MockFilterBuilder::new();
        second.expect_name().return_const("second");
        second
            .expect_build_filter()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(vec![always(true), always(false)]));

        let builders: Vec<Box<dyn FilterBuilder>> = vec![Box::new(first), Box::new(second)];
        let chain = build_filter_chain(&builders, &FilterRequest::new()).unwrap();

        assert_eq!(chain.len(), 3);
        assert!(chain.matches(&flow()));
    }

    #[test]
    fn test_first_error_stops_compilation() {
        let mut failing = MockFilterBuilder::new();
        failing.expect_name().return_const("failing");
        failing
            .expect_build_filter()
            .times(1)
            .returning(|_| Err(Error::invalid_pattern("bad$char")));

        let mut never = MockFilterBuilder::new();
        never.expect_build_filter().never();

        let builders: Vec<Box<dyn FilterBuilder>> = vec![Box::new(failing), Box::new(never)];
        let err = build_filter_chain(&builders, &FilterRequest::new()).unwrap_err();

        assert!(err.to_string().contains("bad$char"));
    }

    #[test]
    fn test_default_builders_empty_request() {
        let chain = build_filter_chain(&default_builders(), &FilterRequest::new()).unwrap();
        assert!(chain.is_empty());
    }

    #[test]
    fn test_apply_allow_deny() {
        let empty = FilterChain::new();
        let yes: FilterChain = std::iter::once(always(true)).collect();
        let no: FilterChain = std::iter::once(always(false)).collect();
        let event = Event::LostEvents(LostEvents::default());

        assert!(apply(&empty, &empty, &event));
        assert!(apply(&yes, &empty, &event));
        assert!(!apply(&no, &empty, &event));
        assert!(!apply(&empty, &yes, &event));
        assert!(apply(&yes, &no, &event));
    }
}
