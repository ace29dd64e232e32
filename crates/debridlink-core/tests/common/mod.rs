//! Common test utilities.
//!
//! In-memory fakes for the remote ports plus a temp-dir backed layout.

#![allow(dead_code)]

pub mod fakes;
pub mod fixtures;
