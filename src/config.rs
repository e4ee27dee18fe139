use anyhow::{bail, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    // Enforcement
    pub max_generation_attempts: u32,
    pub enforcement_enabled: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_generation_attempts: 3,
            enforcement_enabled: true,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let max_generation_attempts = std::env::var("LANGUAGE_MAX_ATTEMPTS")
            .ok()
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(defaults.max_generation_attempts);
        if max_generation_attempts == 0 {
            bail!("LANGUAGE_MAX_ATTEMPTS must be at least 1");
        }

        let enforcement_enabled = std::env::var("LANGUAGE_ENFORCEMENT")
            .ok()
            .and_then(|v| parse_bool(&v))
            .unwrap_or(defaults.enforcement_enabled);

        Ok(Self {
            max_generation_attempts,
            enforcement_enabled,
        })
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
