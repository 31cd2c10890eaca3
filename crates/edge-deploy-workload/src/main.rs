// crates/edge-deploy-workload/src/main.rs
// ============================================================================
// Module: Workload Manager CLI Entry Point
// Description: Command dispatcher for workload API operations.
// Purpose: Run one create/replace/get/delete request configured from env.
// Dependencies: clap, edge-deploy-core, edge-deploy-workload, serde_json, thiserror
// ============================================================================

//! ## Overview
//! `workload-manager <create|replace|get|delete>` reads its configuration from
//! CI environment variables, issues exactly one request, and prints the JSON
//! response. Every failure is fatal: the message goes to stderr and the process
//! exits non-zero. HTTP errors additionally print the response body.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::process::ExitCode;

use clap::Parser;
use clap::ValueEnum;
use edge_deploy_core::AuditTarget;
use edge_deploy_core::ProcessEnv;
use edge_deploy_core::t;
use edge_deploy_workload::Operation;
use edge_deploy_workload::WorkloadClient;
use edge_deploy_workload::WorkloadError;
use edge_deploy_workload::WorkloadManagerConfig;
use edge_deploy_workload::WorkloadSpec;
use serde_json::Value;
use thiserror::Error;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "workload-manager", about = "Workload Manager for customer edge virtual sites")]
struct Cli {
    /// Operation to perform.
    #[arg(value_enum)]
    operation: OperationArg,
}

/// Operation selector.
#[derive(ValueEnum, Copy, Clone, Debug)]
enum OperationArg {
    /// Create a new workload.
    Create,
    /// Replace an existing workload configuration.
    Replace,
    /// Retrieve workload details.
    Get,
    /// Delete a workload.
    Delete,
}

impl From<OperationArg> for Operation {
    fn from(value: OperationArg) -> Self {
        match value {
            OperationArg::Create => Self::Create,
            OperationArg::Replace => Self::Replace,
            OperationArg::Get => Self::Get,
            OperationArg::Delete => Self::Delete,
        }
    }
}

/// Operation resolved against configuration, ready to send.
enum PlannedRequest {
    /// Create with the configured descriptor.
    Create(WorkloadSpec),
    /// Replace with the configured descriptor.
    Replace(WorkloadSpec),
    /// Fetch by name.
    Get,
    /// Delete by name.
    Delete,
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

    /// Formats a workload error, appending the response body for HTTP errors.
    fn workload(err: &WorkloadError) -> Self {
        let mut message = t!("workload.error", error = err);
        if let Some(body) = err.response_body() {
            message.push('\n');
            message.push_str(&t!("workload.error.response", body = body));
        }
        Self::new(message)
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

/// Executes the requested workload operation.
fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();
    let operation = Operation::from(cli.operation);
    let config = WorkloadManagerConfig::from_env()
        .map_err(|err| CliError::new(t!("workload.error", error = err)))?;
    let request = match operation {
        Operation::Create => PlannedRequest::Create(workload_spec(&config)?),
        Operation::Replace => PlannedRequest::Replace(workload_spec(&config)?),
        Operation::Get => PlannedRequest::Get,
        Operation::Delete => PlannedRequest::Delete,
    };

    let target = AuditTarget::from_env(&ProcessEnv)
        .map_err(|err| CliError::new(t!("workload.error", error = err)))?;
    let audit = target.open().map_err(|err| {
        CliError::new(t!("audit.open_failed", path = audit_label(&target), error = err))
    })?;
    let client = WorkloadClient::new(&config.api)
        .map_err(|err| CliError::workload(&err))?
        .with_audit(audit);

    let name = config.workload_name.as_str();
    let progress = match operation {
        Operation::Create => t!("workload.progress.create", name = name),
        Operation::Replace => t!("workload.progress.replace", name = name),
        Operation::Get => t!("workload.progress.get", name = name),
        Operation::Delete => t!("workload.progress.delete", name = name),
    };
    write_stdout_line(&progress).map_err(|err| CliError::new(output_error("stdout", &err)))?;

    let result = match &request {
        PlannedRequest::Create(spec) => client.create_workload(spec),
        PlannedRequest::Replace(spec) => client.replace_workload(spec),
        PlannedRequest::Get => client.get_workload(name),
        PlannedRequest::Delete => client.delete_workload(name),
    }
    .map_err(|err| CliError::workload(&err))?;

    write_json(&result)?;
    Ok(ExitCode::SUCCESS)
}

/// Builds the workload descriptor, failing when site or image are unset.
fn workload_spec(config: &WorkloadManagerConfig) -> CliResult<WorkloadSpec> {
    config.workload_spec().map_err(|err| CliError::new(t!("workload.error", error = err)))
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes a JSON value to stdout with two-space indentation.
fn write_json(value: &Value) -> CliResult<()> {
    let rendered = serde_json::to_string_pretty(value)
        .map_err(|err| CliError::new(t!("workload.output.serialize_failed", error = err)))?;
    write_stdout_line(&rendered).map_err(|err| CliError::new(output_error("stdout", &err)))
}

/// Returns a display label for an audit target.
fn audit_label(target: &AuditTarget) -> String {
    match target {
        AuditTarget::File(path) => path.display().to_string(),
        AuditTarget::Stderr => t!("output.stream.stderr"),
        AuditTarget::Disabled => t!("output.stream.unknown"),
    }
}

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
