//! `gearshare-migrate` library crate.
//!
//! Backs the `run-migration` and `verify-migration` binaries. Each command
//! loads its configuration, opens one connection, does its work and closes
//! the connection before returning.

pub mod cli;
pub mod error;
pub mod logging;
pub mod runner;
pub mod verifier;
