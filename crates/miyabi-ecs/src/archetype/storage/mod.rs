//! Raw views over archetype columns used while iterating queries.
//!
//! Column data is owned by `Archetype`s. The buffers in this module are short-lived pointers into
//! those columns and are only handed out by query construction after the requested accesses have
//! been checked for aliasing.

pub mod access;
pub mod set;
