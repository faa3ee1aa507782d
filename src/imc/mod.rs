// Cisco IMC XML API client
pub mod client;
pub mod error;
pub mod types;
pub mod xml;

pub use client::{Connector, HttpConnector, ImcSession, SessionGuard};
pub use types::{EndpointOptions, ManagedObject};
