//! Conversion engine: bounded concurrent dispatch of lookup jobs.

pub mod dispatcher;
pub mod job;

pub use dispatcher::{DispatchReport, Dispatcher, DispatcherConfig, Unresolved, convert};
pub use job::LookupJob;
