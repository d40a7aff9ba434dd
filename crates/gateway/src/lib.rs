//! `gatehouse-gateway` — edge gateway.
//!
//! Matches inbound paths against a fixed route table, rewrites them, and
//! forwards to the owning backend. Unmatched paths and failed outbound calls
//! are translated through the shared envelope contract.

pub mod app;
pub mod forward;
pub mod route;

pub use app::{build_app, GatewayState};
pub use forward::Forwarder;
pub use route::{RouteConfigError, RouteEntry, RouteTable};
