//! # Workflows Module
//!
//! High-level entry points that chain the `core` models and the `client` transport into
//! complete procedures.
//!
//! - **Generation Workflow** ([`generate`]): makes sure the reference structure is on disk,
//!   truncates it to a bounded set of `ATOM` records, submits it to the generation service
//!   and writes the generated structure to the output file.
//!
//! Every step propagates its error immediately. Nothing is retried and no partial output
//! is cleaned up.

pub mod generate;
