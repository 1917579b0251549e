//! # RFdiffusion Client Core Library
//!
//! A small library for preparing protein structures and submitting them to an
//! RFdiffusion structure generation service over HTTP.
//!
//! ## Architectural Philosophy
//!
//! The library follows the same three-layer split used across our tooling:
//!
//! - **[`core`]: The Foundation.** Stateless models and pure text handling: structure
//!   identifiers, `ATOM` record truncation, generation parameters and the request/response
//!   payloads exchanged with the service.
//!
//! - **[`client`]: The Transport.** HTTP clients for the public structure repository and the
//!   generation service, their configuration, error type and progress reporting.
//!
//! - **[`workflows`]: The Public API.** Ties `core` and `client` together into the complete
//!   fetch, extract, submit and persist pipeline.

pub mod client;
pub mod core;
pub mod workflows;
