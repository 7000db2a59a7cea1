pub mod serve;
pub mod workflows;
