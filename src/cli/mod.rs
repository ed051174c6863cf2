pub mod commands;
pub mod combined;
pub mod driver;
pub mod per_profile;

pub use commands::{Cli, Commands};
