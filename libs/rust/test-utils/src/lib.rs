//! Shared test utilities for local-token crates.
//!
//! This crate provides:
//! - Proptest generators for token-shaped strings and file identifiers
//! - Mock loggers and path resolvers
//! - A temporary runtime directory fixture

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;
pub mod mocks;

pub use fixtures::RuntimeDirFixture;
pub use generators::*;
pub use mocks::{FailingPathResolver, FixedPathResolver, RecordingLogger};
