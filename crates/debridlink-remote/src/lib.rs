#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]
// The default client aliases name generic clients over crate-private
// backends; they are meant to be used through the core port traits.
#![allow(private_interfaces)]

mod client;
mod config;
mod error;
mod http;
mod models;
mod port;
mod url;

// ============================================================================
// Public API
// ============================================================================

// Clients
pub use client::{DefaultDebridClient, DefaultResolverClient};

// Configuration
pub use config::{DebridClientConfig, ResolverClientConfig};
