//! Error types for the cirrus client layer
//!
//! Every fallible operation in this crate returns [`CirrusResult`]. Errors are
//! grouped by who has to act on them:
//! - configuration and introspection errors are caller mistakes, never retried
//! - API errors carry the provider's status and message exactly as received
//! - HTTP, JSON and IO errors describe transport or decoding failures

mod constructors;
mod conversions;
mod types;

pub use types::{CirrusError, CirrusResult};
