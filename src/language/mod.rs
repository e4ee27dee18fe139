//! Target-language detection and enforcement.
//!
//! This module infers which human language generated content should be
//! written in, renders generation directives for that language, and checks
//! generated fields against it.
//!
//! # Architecture
//!
//! - `registry`: Single source of truth for detectable languages and their lexical signals
//! - `script`: Per-script letter counting and tokenization
//! - `detector`: `TargetLanguage` and the `detect` pipeline
//! - `validator`: Per-field validation against a detected target
//! - `instructions`: Initial and corrective generation directives
//!
//! All tables are built once and read-only afterwards; every function here is
//! pure and safe to call from any number of threads.
//!
//! # Example
//!
//! ```rust
//! use language_gate::language::{build_initial_instruction, detect, validate_fields};
//! use std::collections::BTreeMap;
//!
//! let target = detect("¿Nos vemos mañana para la reunión?");
//! assert_eq!(target.code(), "es");
//!
//! let prompt_suffix = build_initial_instruction(&target);
//! assert!(prompt_suffix.contains("Spanish"));
//!
//! let fields = BTreeMap::from([("title", "Reunión del equipo")]);
//! assert!(validate_fields(&target, &fields).is_match());
//! ```

mod detector;
mod instructions;
mod registry;
mod script;
mod validator;

pub use detector::{detect, TargetLanguage};
pub use instructions::{build_corrective_instruction, build_initial_instruction};
pub use registry::{LanguageConfig, LanguageRegistry};
pub use script::{letter_tokens, Script, ScriptCounts};
pub use validator::{is_language_compatible, validate_fields, FieldMismatch, ValidationResult};
