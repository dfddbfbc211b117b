// Adapters layer: clients for the external systems (shared HTTP transport,
// qkamura vacancy search, slack notification).

pub mod http;
pub mod qkamura;
pub mod slack;
