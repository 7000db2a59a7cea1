//! Row structs for the tables in `db/migrations`.

pub mod workflow;
