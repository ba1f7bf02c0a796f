//! # convert-uuid
//!
//! Bulk conversion of player usernames into profile UUIDs.
//!
//! A bounded pool of concurrent lookups (engine) resolves each username
//! through a profile lookup client (lookup), accumulates successes in a
//! shared store (store), and writes them out as a properties file (output).

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod input;
pub mod lookup;
pub mod model;
pub mod output;
pub mod store;
pub mod telemetry;
