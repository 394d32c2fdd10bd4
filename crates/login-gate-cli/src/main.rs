// crates/login-gate-cli/src/main.rs
// ============================================================================
// Module: Login Gate CLI Entry Point
// Description: Command dispatcher for login gate operator workflows.
// Purpose: Validate configuration and evaluate gates outside the login pipeline.
// Dependencies: clap, login-gate-config, login-gate-core, login-gate-providers,
//               serde_json, thiserror, tracing-subscriber
// ============================================================================

//! ## Overview
//! The `login-gate` binary lets operators check a configuration file,
//! preview how a relying-party id normalizes, and evaluate either gate for a
//! given user against the live Group Web Service. Decisions go to stdout;
//! logs and errors go to stderr.

// ============================================================================
// SECTION: Modules
// ============================================================================


// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::ArgAction;
use clap::Args;
use clap::Parser;
use clap::Subcommand;
use login_gate_config::LoginGateConfig;
use login_gate_config::config_toml_example;
use login_gate_core::GateDecision;
use login_gate_core::GateKind;
use login_gate_core::LoginRequest;
use login_gate_core::MembershipSource;
use login_gate_core::normalize;
use login_gate_providers::GwsHttpSource;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "login-gate", version, disable_help_subcommand = true)]
struct Cli {
    /// Emit logs as JSON lines on stderr.
    #[arg(long = "log-json", action = ArgAction::SetTrue, global = true)]
    log_json: bool,
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Commands,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Configuration utilities.
    Config {
        /// Selected config subcommand.
        #[command(subcommand)]
        command: ConfigCommand,
    },
    /// Print the group key derived from a relying-party id.
    Normalize(NormalizeCommand),
    /// Evaluate a gate for one login.
    Check {
        /// Selected gate.
        #[command(subcommand)]
        command: CheckCommand,
    },
}

/// Configuration subcommands.
#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Load and validate a configuration file.
    Validate(ConfigValidateCommand),
    /// Print a canonical example configuration.
    Example,
}

/// Arguments for config validation.
#[derive(Args, Debug)]
struct ConfigValidateCommand {
    /// Optional config file path (defaults to login-gate.toml or env override).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

/// Arguments for relying-party normalization.
#[derive(Args, Debug)]
struct NormalizeCommand {
    /// Raw relying-party id.
    #[arg(value_name = "RPID")]
    rpid: String,
}

/// Gate evaluation subcommands.
#[derive(Subcommand, Debug)]
enum CheckCommand {
    /// Evaluate the Slack gate; prints `allow` or `deny`.
    Slack(CheckSlackCommand),
    /// Evaluate a named warning gate; prints `warn` or `no-warn`.
    Warning(CheckWarningCommand),
}

/// Login context shared by gate checks.
#[derive(Args, Debug)]
struct LoginArgs {
    /// Principal name; omit to evaluate a login without a subject.
    #[arg(long, value_name = "USER")]
    user: Option<String>,
    /// Relying-party id; omit to evaluate a login without a relying party.
    #[arg(long, value_name = "RPID")]
    rp: Option<String>,
    /// Optional config file path (defaults to login-gate.toml or env override).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Print the full decision record as JSON.
    #[arg(long, action = ArgAction::SetTrue)]
    json: bool,
}

impl LoginArgs {
    /// Builds the login request described by the arguments.
    fn request(&self) -> LoginRequest {
        let mut request = LoginRequest::default();
        if let Some(user) = &self.user {
            request = request.with_username(user.clone());
        }
        if let Some(rp) = &self.rp {
            request = request.with_relying_party_id(rp.clone());
        }
        request
    }
}

/// Arguments for a Slack gate check.
#[derive(Args, Debug)]
struct CheckSlackCommand {
    /// Login context.
    #[command(flatten)]
    login: LoginArgs,
}

/// Arguments for a warning gate check.
#[derive(Args, Debug)]
struct CheckWarningCommand {
    /// Warning entry name from the configuration.
    #[arg(long, value_name = "NAME")]
    name: String,
    /// Login context.
    #[command(flatten)]
    login: LoginArgs,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper for operator-facing messages.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`] from a message.
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

/// Executes the CLI command dispatcher.
fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.log_json);
    match cli.command {
        Commands::Config {
            command,
        } => command_config(command),
        Commands::Normalize(command) => command_normalize(&command),
        Commands::Check {
            command,
        } => command_check(command),
    }
}

/// Installs the stderr tracing subscriber, filtered by `RUST_LOG`.
fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);
    let _ = if json { builder.json().try_init() } else { builder.try_init() };
}

// ============================================================================
// SECTION: Config Commands
// ============================================================================

/// Dispatches config subcommands.
fn command_config(command: ConfigCommand) -> CliResult<ExitCode> {
    match command {
        ConfigCommand::Validate(command) => command_config_validate(&command),
        ConfigCommand::Example => {
            write_stdout(&config_toml_example())?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Executes the config validation command.
fn command_config_validate(command: &ConfigValidateCommand) -> CliResult<ExitCode> {
    let config = load_config(command.config.as_deref())?;
    for line in validation_report(&config) {
        write_stdout_line(&line)?;
    }
    Ok(ExitCode::SUCCESS)
}

/// Returns the lines printed by `config validate`.
fn validation_report(config: &LoginGateConfig) -> Vec<String> {
    let mut lines: Vec<String> =
        config.diagnostics().into_iter().map(|note| format!("warning: {note}")).collect();
    lines.push(format!(
        "config ok: slack {}, {} warning gate(s)",
        if config.slack.enabled { "enabled" } else { "disabled" },
        config.warning.len()
    ));
    lines
}

// ============================================================================
// SECTION: Normalize Command
// ============================================================================

/// Executes the normalize command.
fn command_normalize(command: &NormalizeCommand) -> CliResult<ExitCode> {
    write_stdout_line(normalize(&command.rpid).as_str())?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Check Commands
// ============================================================================

/// Dispatches gate checks against the configured Group Web Service.
fn command_check(command: CheckCommand) -> CliResult<ExitCode> {
    let (login, name) = match &command {
        CheckCommand::Slack(command) => (&command.login, None),
        CheckCommand::Warning(command) => (&command.login, Some(command.name.as_str())),
    };
    let config = load_config(login.config.as_deref())?;
    let source = GwsHttpSource::new(config.gws.http_config())
        .map_err(|err| CliError::new(format!("membership source setup failed: {err}")))?;
    let decision = evaluate(&config, Arc::new(source), name, &login.request())?;
    if login.json {
        let rendered = serde_json::to_string(&decision)
            .map_err(|err| CliError::new(format!("decision serialization failed: {err}")))?;
        write_stdout_line(&rendered)?;
    } else {
        write_stdout_line(decision_label(&decision))?;
    }
    Ok(ExitCode::SUCCESS)
}

/// Evaluates the Slack gate, or the named warning gate when `warning` is set.
fn evaluate(
    config: &LoginGateConfig,
    source: Arc<dyn MembershipSource>,
    warning: Option<&str>,
    request: &LoginRequest,
) -> CliResult<GateDecision> {
    let gates = config.build_gates(source);
    match warning {
        None => gates
            .slack
            .as_ref()
            .map(|gate| gate.evaluate(request))
            .ok_or_else(|| CliError::new("slack gate is disabled in configuration".to_string())),
        Some(name) => gates
            .warning(name)
            .map(|gate| gate.evaluate(request))
            .ok_or_else(|| CliError::new(format!("unknown warning gate: {name}"))),
    }
}

/// Returns the operator-facing label for a decision.
const fn decision_label(decision: &GateDecision) -> &'static str {
    match (decision.gate, decision.value) {
        (GateKind::Slack, true) => "allow",
        (GateKind::Slack, false) => "deny",
        (GateKind::Warning, true) => "warn",
        (GateKind::Warning, false) => "no-warn",
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Loads configuration, mapping failures to a CLI error.
fn load_config(path: Option<&Path>) -> CliResult<LoginGateConfig> {
    LoginGateConfig::load(path).map_err(|err| CliError::new(format!("config load failed: {err}")))
}

/// Writes a line to stdout.
fn write_stdout_line(message: &str) -> CliResult<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}").map_err(|err| output_error("stdout", &err))
}

/// Writes text to stdout without adding a newline.
fn write_stdout(message: &str) -> CliResult<()> {
    let mut stdout = std::io::stdout();
    stdout.write_all(message.as_bytes()).map_err(|err| output_error("stdout", &err))
}

/// Writes a line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Formats an output error.
fn output_error(stream: &str, error: &std::io::Error) -> CliError {
    CliError::new(format!("failed to write {stream}: {error}"))
}

/// Emits an error message to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
