//! # flowfilter core
//!
//! Compiles declarative flow filter requests into predicates over network
//! observability events, and decides which events are surfaced.
//!
//! ## Architecture
//!
//! This crate provides:
//! - **Events** - Tagged event type with a flow variant carrying domain names,
//!   DNS query and reply direction
//! - **Filter requests** - Deserializable filter specification (TOML/JSON)
//! - **Filter builders** - FQDN/DNS query and reply builders, each turning the
//!   parts of a request it understands into predicates
//! - **Filter chain** - Ordered predicates, matching when any predicate does
//!
//! ## Example
//!
//! ```rust
//! use flowfilter_core::{build_filter_chain, default_builders, Event, FilterRequest, Flow};
//!
//! # fn main() -> flowfilter_core::Result<()> {
//! let request = FilterRequest::new().with_destination_fqdn(["*.example.com"]);
//! let chain = build_filter_chain(&default_builders(), &request)?;
//!
//! let event = Event::Flow(Flow {
//!     destination_names: vec!["www.example.com".to_string()],
//!     ..Flow::default()
//! });
//! assert!(chain.matches(&event));
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod event;
pub mod filter;
pub mod request;

// Re-exports for convenience
pub use error::{Error, FilterField, Result};
pub use event::{AgentEvent, DnsRecord, Event, Flow, LostEvents};
pub use filter::{
    apply, build_filter_chain, default_builders, FilterBuilder, FilterChain, FilterFunc,
    FqdnFilter, FqdnPattern, ReplyFilter,
};
pub use request::FilterRequest;
