//! # Ports Module
//!
//! Inbound API of the scheduler. Outbound dependencies are the chain
//! adapter ports of `xt-01-chain-adapters`.

pub mod inbound;

pub use inbound::*;
