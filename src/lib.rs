pub mod cli;
pub mod config;
pub mod errors;
pub mod executor;
pub mod models;
pub mod pipeline;
pub mod reporting;
pub mod utils;
