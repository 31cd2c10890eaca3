// crates/edge-deploy-gate/src/main.rs
// ============================================================================
// Module: Security Controls Validator Entry Point
// Description: Pipeline gate binary for application security controls.
// Purpose: Fail the pipeline unless declared controls satisfy policy.
// Dependencies: clap, edge-deploy-core, edge-deploy-gate, thiserror
// ============================================================================

//! ## Overview
//! `validate-security-controls` evaluates `security-controls.yaml` under the
//! project root and writes `features.env` on success. With no arguments it
//! operates on the current directory. Failures print
//! `POLICY GATE FAILED: <reason>` to stderr and exit non-zero.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use edge_deploy_core::AuditTarget;
use edge_deploy_core::ProcessEnv;
use edge_deploy_core::t;
use edge_deploy_gate::GateConfig;
use edge_deploy_gate::SecurityGate;
use thiserror::Error;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "validate-security-controls",
    about = "Validate security-controls.yaml and write features.env"
)]
struct Cli {
    /// Project root used to resolve companion artifacts.
    #[arg(long, value_name = "DIR", default_value = ".")]
    root: PathBuf,
    /// Controls file (defaults to `<root>/security-controls.yaml`).
    #[arg(long, value_name = "PATH")]
    controls: Option<PathBuf>,
    /// Flags file to write (defaults to `<root>/features.env`).
    #[arg(long, value_name = "PATH")]
    output: Option<PathBuf>,
}

impl Cli {
    /// Resolves gate paths, applying root-relative defaults.
    fn gate_config(self) -> GateConfig {
        let mut config = GateConfig::for_root(self.root);
        if let Some(controls) = self.controls {
            config.controls_path = controls;
        }
        if let Some(output) = self.output {
            config.output_path = output;
        }
        config
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper for catalog messages.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`] from a catalog message.
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Runs the gate once.
fn run() -> CliResult<ExitCode> {
    let config = Cli::parse().gate_config();

    let target =
        AuditTarget::from_env(&ProcessEnv).map_err(|err| CliError::new(err.to_string()))?;
    let audit = target.open().map_err(|err| {
        let path = match &target {
            AuditTarget::File(path) => path.display().to_string(),
            AuditTarget::Stderr | AuditTarget::Disabled => t!("output.stream.stderr"),
        };
        CliError::new(t!("audit.open_failed", path = path, error = err))
    })?;

    SecurityGate::new(config)
        .with_audit(audit)
        .run()
        .map_err(|err| CliError::new(t!("gate.failed", reason = err)))?;

    write_stdout_line(&t!("gate.ok")).map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes a single line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes a single line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Formats a catalog output error message.
fn output_error(stream: &str, error: &std::io::Error) -> String {
    let stream_label = match stream {
        "stdout" => t!("output.stream.stdout"),
        "stderr" => t!("output.stream.stderr"),
        _ => t!("output.stream.unknown"),
    };
    t!("output.write_failed", stream = stream_label, error = error)
}

/// Emits an error message to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
