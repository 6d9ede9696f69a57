//! Bookstore application library
//!
//! Hosts the catalog module and the bootstrap sequence shared by the server
//! binary and the CLI.
#![recursion_limit = "256"]

pub mod bootstrap;
pub mod modules;

/// Re-export commonly used types
pub use modules::*;
