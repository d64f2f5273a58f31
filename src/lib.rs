pub mod collector;
pub mod config;
pub mod domain;
pub mod error;
pub mod pipeline;
pub mod resolver;

pub use collector::{Collector, OutputFormat, Summary};
pub use domain::extract_domain;
pub use pipeline::{Outcome, Pipeline};
pub use resolver::{resolve_ipv4, Deadline, Lookup, SystemLookup};
