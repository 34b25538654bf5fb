//! HTTP protocol constants
//!
//! Provides the recognized method set shared by both importers.

mod method;

pub use method::*;
