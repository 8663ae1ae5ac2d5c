//! Reply direction filtering

use super::{FilterBuilder, FilterFunc};
use crate::error::Result;
use crate::event::Event;
use crate::request::FilterRequest;
use tracing::debug;

fn filter_by_reply(allowed: Vec<bool>) -> FilterFunc {
    Box::new(move |event: &Event| {
        if allowed.is_empty() {
            return true;
        }
        event
            .is_reply()
            .is_some_and(|reply| allowed.contains(&reply))
    })
}

/// Builds a filter on the reply direction of flows
///
/// An empty list of allowed values matches every event, flows or not.
/// Otherwise only flows whose reply flag is listed match.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReplyFilter;

impl FilterBuilder for ReplyFilter {
    fn name(&self) -> &'static str {
        "reply"
    }

    fn build_filter(&self, request: &FilterRequest) -> Result<Vec<FilterFunc>> {
        let Some(allowed) = &request.reply else {
            return Ok(Vec::new());
        };

        debug!(?allowed, "Compiled reply filter");
        Ok(vec![filter_by_reply(allowed.clone())])
    }
}
