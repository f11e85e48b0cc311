//! scadastore - Diagram configuration store for SCADA monitoring front ends
//!
//! Persists named diagram snapshots (components, groups, canvas view) as a
//! versioned JSON collection, with import/export of single configurations,
//! plus the session, navigation-guard and REST-endpoint helpers the editor
//! relies on.

pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use error::ScadaError;
