//! Command-line front end for `bandquant`.
//!
//! [`App`] keeps the loaded image and exposes the two user actions, picking
//! a file and processing it. Decoding and encoding live in [`codec`].

pub mod app;
pub mod codec;

pub use crate::app::{App, ProcessOutcome, option_code};
pub use crate::codec::OutputFormat;
