// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # `glyco` Core
//!
//! Core types and models for the `glyco` command-line client.
//!
//! This crate provides the canonical representation of glucose data shared
//! by the other `glyco` crates:
//!
//! - [`Entry`] - A single glucose observation
//! - [`Direction`] - Trend arrow for a reading
//! - [`EntryKind`] - The server-side record discriminator
//! - [`CoreError`] - Core error type
//!
//! Entries are transient, call-scoped values: they are decoded from server
//! responses or built for insertion, and discarded when the invocation
//! returns. There is no local store.

pub mod error;
pub mod models;

// Re-export error types
pub use error::CoreError;

// Re-export all model types
pub use models::{Direction, Entry, EntryKind};
