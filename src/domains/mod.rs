//! Domains module containing business logic organized by bounded contexts.
//!
//! The server exposes a single capability today: tools that clients can
//! invoke by name with JSON arguments.

pub mod tools;
