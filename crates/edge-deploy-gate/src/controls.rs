// crates/edge-deploy-gate/src/controls.rs
// ============================================================================
// Module: Security Controls
// Description: Recognized controls and the controls document parser.
// Purpose: Turn untrusted YAML into a typed control set.
// Dependencies: serde_yaml, thiserror
// ============================================================================

//! ## Overview
//! The controls document is a YAML mapping with a `controls` key whose entries
//! are named control objects carrying an `enabled` boolean. Parsing is lenient
//! about absence (missing or null values read as disabled) and strict about
//! types (a non-boolean `enabled` is rejected).

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde_yaml::Mapping;
use serde_yaml::Value;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default controls file name at the project root.
pub const DEFAULT_CONTROLS_FILE: &str = "security-controls.yaml";
/// Maximum accepted controls file size.
pub const MAX_CONTROLS_BYTES: usize = 1024 * 1024;
/// Top-level key holding the control set.
const CONTROLS_KEY: &str = "controls";
/// Per-control toggle key.
const ENABLED_KEY: &str = "enabled";

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Controls document loading errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ControlsError {
    /// The file could not be read.
    #[error("{0}")]
    Io(String),
    /// The file exceeds the size limit.
    #[error("file exceeds {limit} byte limit")]
    TooLarge {
        /// Maximum accepted size in bytes.
        limit: usize,
    },
    /// The content is not valid YAML.
    #[error("{0}")]
    Yaml(String),
    /// The YAML does not have the expected shape.
    #[error("{0}")]
    Shape(String),
}

// ============================================================================
// SECTION: Control Kinds
// ============================================================================

/// Recognized security controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ControlKind {
    /// Web application firewall. Mandatory.
    Waf,
    /// API discovery from a published OpenAPI document.
    ApiDiscovery,
    /// Advanced bot protection on login and contact pages.
    BotAdvanced,
    /// Request rate limiting.
    RateLimiting,
}

impl ControlKind {
    /// All controls in evaluation and output order.
    pub const ALL: [Self; 4] =
        [Self::Waf, Self::ApiDiscovery, Self::BotAdvanced, Self::RateLimiting];

    /// Returns the key used in the controls document.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Waf => "waf",
            Self::ApiDiscovery => "api_discovery",
            Self::BotAdvanced => "bot_advanced",
            Self::RateLimiting => "rate_limiting",
        }
    }

    /// Returns the human-readable control name.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Waf => "WAF",
            Self::ApiDiscovery => "API discovery",
            Self::BotAdvanced => "Advanced BOT protection",
            Self::RateLimiting => "Rate limiting",
        }
    }

    /// Returns the feature flag key written to the flags file.
    #[must_use]
    pub const fn env_key(self) -> &'static str {
        match self {
            Self::Waf => "ENABLE_WAF",
            Self::ApiDiscovery => "ENABLE_API_DISCOVERY",
            Self::BotAdvanced => "ENABLE_BOT_ADVANCED",
            Self::RateLimiting => "ENABLE_RATE_LIMITING",
        }
    }

    /// Returns artifacts that must exist, relative to the project root, when
    /// the control is enabled. Checked in order.
    #[must_use]
    pub const fn required_artifacts(self) -> &'static [&'static str] {
        match self {
            Self::Waf | Self::RateLimiting => &[],
            Self::ApiDiscovery => &["openapi/openapi.json"],
            Self::BotAdvanced => &["app/templates/login.html", "app/templates/contact.html"],
        }
    }

    /// Looks up a control by document key.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == key)
    }
}

// ============================================================================
// SECTION: Document
// ============================================================================

/// Parsed controls document.
///
/// # Invariants
/// - `entries` holds every declared control name, recognized or not.
/// - Unrecognized names map to `false`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControlsDocument {
    /// Declared control names mapped to their `enabled` value.
    entries: BTreeMap<String, bool>,
}

impl ControlsDocument {
    /// Reads and parses a controls file, enforcing [`MAX_CONTROLS_BYTES`].
    ///
    /// # Errors
    ///
    /// Returns [`ControlsError`] when the file cannot be read, exceeds the
    /// size limit, or is not a valid controls document.
    pub fn load(path: &Path) -> Result<Self, ControlsError> {
        let content = read_file_limited(path, MAX_CONTROLS_BYTES)?;
        Self::parse(&content)
    }

    /// Parses a controls document from raw bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ControlsError`] when the content is not valid YAML or
    /// violates the document shape.
    pub fn parse(content: &[u8]) -> Result<Self, ControlsError> {
        if content.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        let document: Value =
            serde_yaml::from_slice(content).map_err(|err| ControlsError::Yaml(err.to_string()))?;
        let controls = match document {
            Value::Null => return Ok(Self::default()),
            Value::Mapping(mut root) => root.remove(CONTROLS_KEY).unwrap_or(Value::Null),
            _ => return Err(ControlsError::Shape("document root must be a mapping".to_string())),
        };
        let controls = match controls {
            Value::Null => return Ok(Self::default()),
            Value::Mapping(controls) => controls,
            _ => return Err(ControlsError::Shape(format!("`{CONTROLS_KEY}` must be a mapping"))),
        };
        parse_entries(controls).map(|entries| Self {
            entries,
        })
    }

    /// Returns declared control names that are not recognized, sorted.
    #[must_use]
    pub fn unsupported_keys(&self) -> Vec<String> {
        self.entries.keys().filter(|key| ControlKind::from_key(key).is_none()).cloned().collect()
    }

    /// Returns whether a control is enabled. Undeclared controls are disabled.
    #[must_use]
    pub fn enabled(&self, kind: ControlKind) -> bool {
        self.entries.get(kind.as_str()).copied().unwrap_or(false)
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Converts the `controls` mapping into name/enabled pairs.
///
/// Values of unrecognized names are not inspected.
fn parse_entries(controls: Mapping) -> Result<BTreeMap<String, bool>, ControlsError> {
    let mut entries = BTreeMap::new();
    for (key, value) in controls {
        let Value::String(name) = key else {
            return Err(ControlsError::Shape("control names must be strings".to_string()));
        };
        if ControlKind::from_key(&name).is_none() {
            entries.insert(name, false);
            continue;
        }
        let enabled = match value {
            Value::Null => false,
            Value::Mapping(control) => match control.get(ENABLED_KEY) {
                None | Some(Value::Null) => false,
                Some(Value::Bool(enabled)) => *enabled,
                Some(_) => {
                    return Err(ControlsError::Shape(format!(
                        "{CONTROLS_KEY}.{name}.{ENABLED_KEY} must be a boolean"
                    )));
                }
            },
            _ => {
                let message = format!("{CONTROLS_KEY}.{name} must be a mapping");
                return Err(ControlsError::Shape(message));
            }
        };
        entries.insert(name, enabled);
    }
    Ok(entries)
}

/// Reads a file while enforcing a maximum byte limit.
fn read_file_limited(path: &Path, max_bytes: usize) -> Result<Vec<u8>, ControlsError> {
    let file = File::open(path).map_err(|err| ControlsError::Io(err.to_string()))?;
    let limit = u64::try_from(max_bytes.saturating_add(1))
        .map_err(|_| ControlsError::Io("size limit exceeds u64".to_string()))?;
    let mut buf = Vec::new();
    file.take(limit).read_to_end(&mut buf).map_err(|err| ControlsError::Io(err.to_string()))?;
    if buf.len() > max_bytes {
        return Err(ControlsError::TooLarge {
            limit: max_bytes,
        });
    }
    Ok(buf)
}
