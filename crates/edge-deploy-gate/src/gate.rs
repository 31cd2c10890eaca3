// crates/edge-deploy-gate/src/gate.rs
// ============================================================================
// Module: Security Controls Gate
// Description: Ordered policy checks over a project's declared controls.
// Purpose: Decide whether an application may be published.
// Dependencies: edge-deploy-core, thiserror
// ============================================================================

//! ## Overview
//! Checks run in a fixed order and the first failure wins:
//! 1. the controls file exists,
//! 2. it parses,
//! 3. it declares only recognized controls,
//! 4. WAF is enabled,
//! 5. every enabled control has its companion artifacts.
//!
//! The flags file is written only after all checks pass.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;

use edge_deploy_core::AuditSink;
use edge_deploy_core::audit::NoopAuditSink;
use edge_deploy_core::audit::record_event;
use thiserror::Error;

use crate::audit::GateAuditEvent;
use crate::controls::ControlKind;
use crate::controls::ControlsDocument;
use crate::controls::ControlsError;
use crate::controls::DEFAULT_CONTROLS_FILE;
use crate::features::DEFAULT_FEATURES_FILE;
use crate::features::FeatureFlags;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Gate failures, in check order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GateError {
    /// The controls file does not exist.
    #[error(
        "A security-controls file MUST exist in the repository for the Application to be \
         published."
    )]
    MissingControls,
    /// The controls file could not be read or parsed.
    #[error("Failed to parse {file}: {source}")]
    Parse {
        /// Controls file name.
        file: String,
        /// Underlying failure.
        source: ControlsError,
    },
    /// Unrecognized controls were declared.
    #[error(
        "Unsupported security controls found: {}. Only WAF, API discovery, Advanced BOT \
         protection, and Rate limiting are supported.",
        keys.join(", ")
    )]
    Unsupported {
        /// Unrecognized control names, sorted.
        keys: Vec<String>,
    },
    /// WAF is not enabled.
    #[error(
        "WAF must be enabled as the minimum application security baseline. Set \
         controls.waf.enabled: true in security-controls.yaml"
    )]
    WafDisabled,
    /// An enabled control is missing a companion artifact.
    #[error("{}", missing_artifact_message(*control, artifact))]
    MissingArtifact {
        /// Control requiring the artifact.
        control: ControlKind,
        /// Artifact path relative to the project root.
        artifact: &'static str,
    },
    /// The flags file could not be written.
    #[error("Failed to write {path}: {detail}")]
    WriteFlags {
        /// Flags file path.
        path: String,
        /// Underlying I/O failure.
        detail: String,
    },
}

/// Formats the missing-artifact message for a control.
fn missing_artifact_message(control: ControlKind, artifact: &str) -> String {
    let base = format!("{} is enabled, but {artifact} is missing.", control.label());
    match control {
        ControlKind::ApiDiscovery => format!("{base} Provide the OpenAPI spec at {artifact}"),
        ControlKind::Waf | ControlKind::BotAdvanced | ControlKind::RateLimiting => base,
    }
}

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Paths used by a gate run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateConfig {
    /// Project root used to resolve companion artifacts.
    pub root: PathBuf,
    /// Controls file to evaluate.
    pub controls_path: PathBuf,
    /// Flags file to write.
    pub output_path: PathBuf,
}

impl GateConfig {
    /// Uses the default controls and flags file names under `root`.
    #[must_use]
    pub fn for_root(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            controls_path: root.join(DEFAULT_CONTROLS_FILE),
            output_path: root.join(DEFAULT_FEATURES_FILE),
            root,
        }
    }
}

// ============================================================================
// SECTION: Gate
// ============================================================================

/// Security controls policy gate.
pub struct SecurityGate {
    /// Paths for this run.
    config: GateConfig,
    /// Audit sink for the run record.
    audit: Arc<dyn AuditSink>,
}

impl SecurityGate {
    /// Creates a gate with auditing disabled.
    #[must_use]
    pub fn new(config: GateConfig) -> Self {
        Self {
            config,
            audit: Arc::new(NoopAuditSink),
        }
    }

    /// Replaces the audit sink.
    #[must_use]
    pub fn with_audit(mut self, audit: Arc<dyn AuditSink>) -> Self {
        self.audit = audit;
        self
    }

    /// Returns the run configuration.
    #[must_use]
    pub const fn config(&self) -> &GateConfig {
        &self.config
    }

    /// Runs every check without writing the flags file.
    ///
    /// # Errors
    ///
    /// Returns the first failing check as a [`GateError`].
    pub fn evaluate(&self) -> Result<FeatureFlags, GateError> {
        let controls_path = &self.config.controls_path;
        match controls_path.try_exists() {
            Ok(true) => {}
            Ok(false) => return Err(GateError::MissingControls),
            Err(err) => {
                return Err(parse_error(controls_path, ControlsError::Io(err.to_string())));
            }
        }
        let document =
            ControlsDocument::load(controls_path).map_err(|err| parse_error(controls_path, err))?;

        let unsupported = document.unsupported_keys();
        if !unsupported.is_empty() {
            return Err(GateError::Unsupported {
                keys: unsupported,
            });
        }

        let flags = FeatureFlags::from_document(&document);
        if !flags.waf {
            return Err(GateError::WafDisabled);
        }
        for control in ControlKind::ALL.into_iter().filter(|kind| flags.get(*kind)) {
            for &artifact in control.required_artifacts() {
                if !self.config.root.join(artifact).is_file() {
                    return Err(GateError::MissingArtifact {
                        control,
                        artifact,
                    });
                }
            }
        }
        Ok(flags)
    }

    /// Runs every check, writes the flags file on success, and records one
    /// audit event for the decision.
    ///
    /// # Errors
    ///
    /// Returns the first failing check, or [`GateError::WriteFlags`] when the
    /// flags file cannot be written.
    pub fn run(&self) -> Result<FeatureFlags, GateError> {
        let result = self.evaluate().and_then(|flags| {
            flags.write_to(&self.config.output_path).map_err(|err| GateError::WriteFlags {
                path: self.config.output_path.display().to_string(),
                detail: err.to_string(),
            })?;
            Ok(flags)
        });
        let controls_path = &self.config.controls_path;
        let event = match &result {
            Ok(flags) => GateAuditEvent::pass(controls_path, flags),
            Err(err) => GateAuditEvent::fail(controls_path, err.to_string()),
        };
        record_event(self.audit.as_ref(), &event);
        result
    }
}

impl std::fmt::Debug for SecurityGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecurityGate").field("config", &self.config).finish_non_exhaustive()
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Wraps a load failure with the controls file name.
fn parse_error(path: &Path, source: ControlsError) -> GateError {
    let file = path.file_name().map_or_else(
        || DEFAULT_CONTROLS_FILE.to_string(),
        |name| name.to_string_lossy().into_owned(),
    );
    GateError::Parse {
        file,
        source,
    }
}
