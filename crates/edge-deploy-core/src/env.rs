// crates/edge-deploy-core/src/env.rs
// ============================================================================
// Module: Environment Parsing
// Description: Strict environment variable access for pipeline tools.
// Purpose: Centralize env lookups with UTF-8 validation and blank handling.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! Pipeline tools are configured entirely through environment variables.
//! Values are read through the [`EnvSource`] trait so configuration loading can
//! be exercised against in-memory maps. Invalid UTF-8 fails closed; blank
//! values are reported as unset.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use thiserror::Error;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Environment parsing errors.
///
/// # Invariants
/// - Variants are stable for CLI error mapping and tests.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnvError {
    /// The variable is set but is not valid UTF-8.
    #[error("{name} must be valid UTF-8")]
    InvalidUtf8 {
        /// Variable name.
        name: String,
    },
    /// The variable is set but its value is rejected.
    #[error("{name} {reason}")]
    Invalid {
        /// Variable name.
        name: String,
        /// Human-readable rejection reason.
        reason: String,
    },
}

// ============================================================================
// SECTION: Sources
// ============================================================================

/// Lookup abstraction over environment variables.
pub trait EnvSource {
    /// Returns the raw value of `name`, or `None` when unset.
    ///
    /// # Errors
    ///
    /// Returns [`EnvError`] when the value cannot be represented as UTF-8.
    fn lookup(&self, name: &str) -> Result<Option<String>, EnvError>;
}

/// [`EnvSource`] backed by the current process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn lookup(&self, name: &str) -> Result<Option<String>, EnvError> {
        read_env_strict(name)
    }
}

impl EnvSource for BTreeMap<String, String> {
    fn lookup(&self, name: &str) -> Result<Option<String>, EnvError> {
        Ok(self.get(name).cloned())
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Reads an environment variable and enforces UTF-8 validity.
///
/// # Errors
///
/// Returns [`EnvError::InvalidUtf8`] when the variable contains invalid UTF-8.
pub fn read_env_strict(name: &str) -> Result<Option<String>, EnvError> {
    std::env::var_os(name).map_or(Ok(None), |raw| {
        raw.into_string().map(Some).map_err(|_| EnvError::InvalidUtf8 {
            name: name.to_string(),
        })
    })
}

/// Reads a variable from `source`, trimming whitespace and treating blank
/// values as unset.
///
/// # Errors
///
/// Returns [`EnvError`] when the underlying lookup fails.
pub fn read_trimmed<S: EnvSource + ?Sized>(
    source: &S,
    name: &str,
) -> Result<Option<String>, EnvError> {
    Ok(source.lookup(name)?.and_then(|value| {
        let trimmed = value.trim();
        if trimmed.is_empty() { None } else { Some(trimmed.to_string()) }
    }))
}
