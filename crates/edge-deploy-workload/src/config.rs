// crates/edge-deploy-workload/src/config.rs
// ============================================================================
// Module: Workload Manager Configuration
// Description: Environment-backed configuration for the workload manager.
// Purpose: Resolve API settings and the workload descriptor from CI variables.
// Dependencies: edge-deploy-core, thiserror
// ============================================================================

//! ## Overview
//! The workload manager is configured entirely through environment variables
//! set by the CI pipeline. Blank values count as unset. All missing required
//! variables are reported together so a misconfigured job fails once with the
//! full list.

// ============================================================================
// SECTION: Imports
// ============================================================================

use edge_deploy_core::EnvError;
use edge_deploy_core::EnvSource;
use edge_deploy_core::ProcessEnv;
use edge_deploy_core::env::read_trimmed;
use thiserror::Error;

use crate::client::ApiSettings;
use crate::payload::WorkloadSpec;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Port used when [`WorkloadEnv::WorkloadPort`] is unset.
pub const DEFAULT_WORKLOAD_PORT: u16 = 5000;
/// Suffix appended to the namespace to name the default registry.
pub const DEFAULT_REGISTRY_SUFFIX: &str = "-acr";

// ============================================================================
// SECTION: Environment Keys
// ============================================================================

/// Environment keys for workload manager configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkloadEnv {
    /// API endpoint URL.
    ApiUrl,
    /// API token.
    ApiToken,
    /// Tenant name.
    Tenant,
    /// Namespace to operate in.
    Namespace,
    /// Virtual site name.
    SiteName,
    /// Workload name.
    WorkloadName,
    /// Container image reference.
    ImageRef,
    /// Optional container registry object name.
    RegistryName,
    /// Optional workload port.
    WorkloadPort,
}

impl WorkloadEnv {
    /// Returns the canonical environment variable name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ApiUrl => "F5XC_API_URL",
            Self::ApiToken => "F5XC_API_TOKEN",
            Self::Tenant => "F5XC_TENANT",
            Self::Namespace => "F5XC_NAMESPACE",
            Self::SiteName => "F5XC_SITE_NAME",
            Self::WorkloadName => "F5XC_WORKLOAD_NAME",
            Self::ImageRef => "IMAGE_REF",
            Self::RegistryName => "F5XC_REGISTRY_NAME",
            Self::WorkloadPort => "F5XC_WORKLOAD_PORT",
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A variable could not be read or parsed.
    #[error(transparent)]
    Env(#[from] EnvError),
    /// One or more required variables are unset.
    #[error("Missing required environment variables ({})", .0.join(", "))]
    Missing(Vec<&'static str>),
}

// ============================================================================
// SECTION: Config Types
// ============================================================================

/// Typed workload manager configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkloadManagerConfig {
    /// API connection settings.
    pub api: ApiSettings,
    /// Workload name.
    pub workload_name: String,
    /// Virtual site name (required for create/replace).
    pub site_name: Option<String>,
    /// Container image reference (required for create/replace).
    pub image_ref: Option<String>,
    /// Container registry object name.
    pub registry_name: String,
    /// Workload port.
    pub port: u16,
}

impl WorkloadManagerConfig {
    /// Loads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when required variables are missing or a value
    /// is invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::load(&ProcessEnv)
    }

    /// Loads configuration from an arbitrary environment source.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when required variables are missing or a value
    /// is invalid.
    pub fn load<S: EnvSource + ?Sized>(source: &S) -> Result<Self, ConfigError> {
        let mut missing = Vec::new();
        let mut required = |key: WorkloadEnv| -> Result<String, ConfigError> {
            let value = read_trimmed(source, key.as_str())?;
            if value.is_none() {
                missing.push(key.as_str());
            }
            Ok(value.unwrap_or_default())
        };
        let api_url = required(WorkloadEnv::ApiUrl)?;
        let api_token = required(WorkloadEnv::ApiToken)?;
        let tenant = required(WorkloadEnv::Tenant)?;
        let namespace = required(WorkloadEnv::Namespace)?;
        let workload_name = required(WorkloadEnv::WorkloadName)?;
        if !missing.is_empty() {
            return Err(ConfigError::Missing(missing));
        }

        let site_name = read_trimmed(source, WorkloadEnv::SiteName.as_str())?;
        let image_ref = read_trimmed(source, WorkloadEnv::ImageRef.as_str())?;
        let registry_name = read_trimmed(source, WorkloadEnv::RegistryName.as_str())?
            .unwrap_or_else(|| format!("{namespace}{DEFAULT_REGISTRY_SUFFIX}"));
        let port = read_trimmed(source, WorkloadEnv::WorkloadPort.as_str())?
            .map(|raw| parse_port(WorkloadEnv::WorkloadPort.as_str(), &raw))
            .transpose()?
            .unwrap_or(DEFAULT_WORKLOAD_PORT);

        Ok(Self {
            api: ApiSettings {
                api_url,
                api_token,
                tenant,
                namespace,
            },
            workload_name,
            site_name,
            image_ref,
            registry_name,
            port,
        })
    }

    /// Builds the workload descriptor used by create and replace.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] when the site name or image reference
    /// is unset.
    pub fn workload_spec(&self) -> Result<WorkloadSpec, ConfigError> {
        let mut missing = Vec::new();
        if self.site_name.is_none() {
            missing.push(WorkloadEnv::SiteName.as_str());
        }
        if self.image_ref.is_none() {
            missing.push(WorkloadEnv::ImageRef.as_str());
        }
        match (&self.site_name, &self.image_ref) {
            (Some(site), Some(image)) => Ok(WorkloadSpec {
                name: self.workload_name.clone(),
                image: image.clone(),
                site: site.clone(),
                port: self.port,
                registry: self.registry_name.clone(),
            }),
            _ => Err(ConfigError::Missing(missing)),
        }
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Parses a TCP port in `1..=65535`.
///
/// # Errors
///
/// Returns [`EnvError::Invalid`] for non-numeric or out-of-range values.
fn parse_port(name: &str, raw: &str) -> Result<u16, EnvError> {
    match raw.parse::<u16>() {
        Ok(port) if port > 0 => Ok(port),
        _ => Err(EnvError::Invalid {
            name: name.to_string(),
            reason: "must be an integer port between 1 and 65535".to_string(),
        }),
    }
}
