//! Observability events
//!
//! Events are produced upstream and only read here. Flow events carry the
//! network data filters look at; the other variants pass through the same
//! stream and never carry domain names or a reply direction.

use serde::{Deserialize, Serialize};

/// An observed event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Event {
    /// A captured network flow
    Flow(Flow),
    /// Informational message from the capturing agent
    Agent(AgentEvent),
    /// Notification that events were dropped before reaching the consumer
    LostEvents(LostEvents),
}

/// A captured network flow
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Flow {
    /// Domain names resolved for the source address
    pub source_names: Vec<String>,
    /// Domain names resolved for the destination address
    pub destination_names: Vec<String>,
    /// DNS record, for flows carrying DNS traffic
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dns: Option<DnsRecord>,
    /// Whether the flow is in the reply direction
    pub reply: bool,
}

/// DNS information parsed from a flow
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DnsRecord {
    /// Queried name, as it appears on the wire (usually with a trailing dot)
    pub query: String,
    /// Addresses returned in the answer
    pub ips: Vec<String>,
}

/// Message emitted by the agent itself
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentEvent {
    /// Human readable message
    pub message: String,
}

/// Count of events lost upstream
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LostEvents {
    /// Number of events dropped
    pub num_events_lost: u64,
}

impl Event {
    /// The flow view of this event, if it is one
    pub fn as_flow(&self) -> Option<&Flow> {
        match self {
            Self::Flow(flow) => Some(flow),
            Self::Agent(_) | Self::LostEvents(_) => None,
        }
    }

    /// Source domain names (empty for non-flow events)
    pub fn source_names(&self) -> &[String] {
        match self.as_flow() {
            Some(flow) => &flow.source_names,
            None => &[],
        }
    }

    /// Destination domain names (empty for non-flow events)
    pub fn destination_names(&self) -> &[String] {
        match self.as_flow() {
            Some(flow) => &flow.destination_names,
            None => &[],
        }
    }

    /// DNS query of the flow, if it carries one
    pub fn dns_query(&self) -> Option<&str> {
        self.as_flow()
            .and_then(|flow| flow.dns.as_ref())
            .map(|dns| dns.query.as_str())
    }

    /// Reply direction; `None` when the event is not a flow
    pub fn is_reply(&self) -> Option<bool> {
        self.as_flow().map(|flow| flow.reply)
    }
}

impl From<Flow> for Event {
    fn from(flow: Flow) -> Self {
        Self::Flow(flow)
    }
}
