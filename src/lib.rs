//! Detect the language a conversation is held in and keep generated text in it.
//!
//! The [`language`] module is the engine: pure, synchronous functions with no
//! shared mutable state. [`enforcement`] wraps them into the bounded
//! generate → validate → correct loop used by callers that drive a text
//! generator.

pub mod config;
pub mod enforcement;
pub mod error;
pub mod fields;
pub mod language;
