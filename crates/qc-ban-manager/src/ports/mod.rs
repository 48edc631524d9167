//! # Ports Layer - Hexagonal Architecture Boundaries
//!
//! - **Driving Ports (Inbound):** the API this crate exposes to consumers
//! - **Driven Ports (Outbound):** storage, notification and time the host
//!   must supply

pub mod inbound;
pub mod outbound;

pub use inbound::BanManagerApi;
pub use outbound::{BanListListener, BanStore, TimeSource};
