//! Bounded generate → validate → correct loop.
//!
//! The generator itself (an LLM call, a template engine, ...) is supplied by
//! the caller. This module only decides which directive each attempt gets
//! and when to stop.

use crate::config::Config;
use crate::language::{
    build_corrective_instruction, build_initial_instruction, validate_fields, TargetLanguage,
    ValidationResult,
};
use anyhow::Result;
use std::collections::BTreeMap;
use std::future::Future;
use tracing::{debug, info, warn};

/// Configuration for language enforcement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnforcementPolicy {
    /// Maximum number of generation attempts (including the first one)
    pub max_attempts: u32,
    /// When false, a single attempt is made and never corrected
    pub enabled: bool,
}

impl EnforcementPolicy {
    /// Create a new enforcement policy
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            enabled: true,
        }
    }

    /// Enable or disable correction attempts
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Build the policy from application configuration
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.max_generation_attempts).with_enabled(config.enforcement_enabled)
    }
}

impl Default for EnforcementPolicy {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// Directive handed to the generator for one attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationDirective {
    /// 1-based attempt number
    pub attempt: u32,
    /// Language directive to append to the prompt; empty when none applies
    pub instruction: String,
}

impl GenerationDirective {
    /// Whether this attempt is a correction of a previous one
    pub fn is_correction(&self) -> bool {
        self.attempt > 1
    }
}

/// Result of running the enforcement loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnforcementOutcome {
    /// Field values from the last attempt
    pub fields: BTreeMap<String, String>,
    /// Validation of the last attempt's fields
    pub validation: ValidationResult,
    /// Number of generation attempts made
    pub attempts: u32,
    /// Whether the final fields were accepted as matching the target
    pub accepted: bool,
}

/// Generate fields, re-requesting mismatched ones until they match `target`.
///
/// # Arguments
/// * `policy` - Enforcement policy (max_attempts must be >= 1)
/// * `target` - Previously detected target language, passed unchanged
/// * `generate` - Async closure producing field values for a directive
///
/// # Returns
/// The last generated fields with their validation. Running out of attempts
/// is not an error; check `accepted`. Generator errors are returned as-is.
///
/// # Panics
/// Panics if `policy.max_attempts` is 0
pub async fn enforce_language<F, Fut>(
    policy: &EnforcementPolicy,
    target: &TargetLanguage,
    mut generate: F,
) -> Result<EnforcementOutcome>
where
    F: FnMut(GenerationDirective) -> Fut,
    Fut: Future<Output = Result<BTreeMap<String, String>>>,
{
    assert!(
        policy.max_attempts >= 1,
        "EnforcementPolicy.max_attempts must be >= 1, got {}",
        policy.max_attempts
    );

    let enforce = policy.enabled && target.is_enforceable();
    let max_attempts = if enforce { policy.max_attempts } else { 1 };
    let mut instruction = build_initial_instruction(target);

    for attempt in 1..=max_attempts {
        if attempt > 1 {
            debug!(
                "Language correction attempt {}/{} for {} ({})",
                attempt,
                max_attempts,
                target.label(),
                target.code()
            );
        }

        let fields = generate(GenerationDirective {
            attempt,
            instruction: instruction.clone(),
        })
        .await?;

        if !enforce {
            return Ok(EnforcementOutcome {
                fields,
                validation: ValidationResult::new(),
                attempts: attempt,
                accepted: true,
            });
        }

        let validation = validate_fields(target, &fields);
        if validation.is_match() {
            if attempt > 1 {
                info!(
                    "Fields matched {} ({}) on attempt {}/{}",
                    target.label(),
                    target.code(),
                    attempt,
                    max_attempts
                );
            }
            return Ok(EnforcementOutcome {
                fields,
                validation,
                attempts: attempt,
                accepted: true,
            });
        }

        let mismatched = validation.mismatched_fields().collect::<Vec<_>>().join(", ");
        let remaining = max_attempts - attempt;
        if remaining > 0 {
            warn!(
                "Attempt {}/{} produced fields not in {} ({}): {}; {} corrections remaining",
                attempt,
                max_attempts,
                target.label(),
                target.code(),
                mismatched,
                remaining
            );
            instruction = build_corrective_instruction(target, &validation);
        } else {
            warn!(
                "All {} attempts produced fields not in {} ({}). Last mismatches: {}",
                max_attempts,
                target.label(),
                target.code(),
                mismatched
            );
            return Ok(EnforcementOutcome {
                fields,
                validation,
                attempts: attempt,
                accepted: false,
            });
        }
    }

    unreachable!("the loop returns on its final attempt")
}
