//! Stateless data models and text utilities.
//!
//! Nothing in this module touches the network. Structure text is treated as a sequence of
//! fixed-format lines and only `ATOM` records are ever inspected.

pub mod params;
pub mod payload;
pub mod structure;
pub mod summary;
