//! Domains module containing business logic organized by bounded contexts.
//!
//! The server only exposes tools; each tool lives under `tools/definitions`.

pub mod tools;
