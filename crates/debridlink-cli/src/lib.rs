#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

// Used only by the binary
use dotenvy as _;
use tokio as _;

pub mod bootstrap;
pub mod error;
pub mod logging;
pub mod parser;

pub use bootstrap::bootstrap;
pub use error::CliError;
pub use parser::Cli;
