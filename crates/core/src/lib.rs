//! Database-free building blocks shared by the migration tools.
//!
//! Everything here is pure: configuration parsing, script loading,
//! identifier validation and the verification report model. Database
//! access lives in `gearshare_db`.

pub mod config;
pub mod error;
pub mod script;
pub mod sql;
pub mod verification;
