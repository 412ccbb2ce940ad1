pub mod block;
pub mod completions;
pub mod config;
pub mod plan;
