//! Domain types shared by the nodeflow crates.

pub mod error;
pub mod job_events;
pub mod node_type;
pub mod types;
