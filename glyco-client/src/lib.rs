// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # `glyco` Client
//!
//! The API client layer for Nightscout-compatible glucose servers.
//!
//! This crate turns the raw HTTP surface of the server into four typed
//! operations over the canonical [`glyco_core::Entry`] model:
//!
//! - [`EntryClient::fetch_latest`] - most recent reading, if any
//! - [`EntryClient::insert_entry`] - create a new reading
//! - [`EntryClient::list_entries`] - recent readings, newest first
//! - [`EntryClient::delete_entry`] - remove a reading by id
//!
//! ## Layers
//!
//! - [`credentials`] - base URL handling and the hashed `api-secret` token
//! - [`codec`] - wire format encode/decode with tolerant list decoding
//! - [`executor`] - one bounded-timeout round trip per call, classified
//!   into success / client error / server error / transport failure
//! - [`client`] - the public operations, composing the layers above
//!
//! Every distinguishable failure is surfaced as a dedicated
//! [`ClientError`] variant; nothing is collapsed into a generic error.
//! The client performs no retries of its own: re-issuing a failed call is
//! the caller's decision (and is only safe for the idempotent operations —
//! re-running an insert may create a duplicate record).

pub mod client;
pub mod codec;
pub mod credentials;
pub mod error;
pub mod executor;

// Re-export key types at crate root

// Errors
pub use error::ClientError;

// Credentials
pub use credentials::{Credentials, API_SECRET_HEADER};

// Codec
pub use codec::{DecodedBatch, DEFAULT_DEVICE};

// Executor
pub use executor::{Outcome, RequestExecutor, DEFAULT_TIMEOUT_SECS};

// Client
pub use client::{EntryClient, InsertReceipt, InsertRequest};
