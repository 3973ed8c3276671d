// crates/weathervane-cli/src/main.rs
// ============================================================================
// Module: Weathervane CLI Entry Point
// Description: Command dispatcher for offline handling and the HTTP front end.
// Purpose: Provide a safe, message-cataloged CLI around the skill dispatcher.
// Dependencies: clap, serde_json, tokio, weathervane-config, weathervane-core
// ============================================================================

//! ## Overview
//! The Weathervane CLI drives the skill's invoke-per-request surfaces: the
//! `handle` command dispatches one envelope from a file or stdin and writes
//! the response envelope to stdout, `serve` exposes the same dispatch over a
//! loopback HTTP bind, and `config validate` checks a configuration file
//! without dispatching. All user-facing strings route through the CLI
//! message catalog; dispatch events go to stderr as JSON lines.

// ============================================================================
// SECTION: Modules
// ============================================================================

#[cfg(test)]
mod main_tests;
pub(crate) mod serve;

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::io::Read;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::ArgAction;
use clap::Args;
use clap::CommandFactory;
use clap::Parser;
use clap::Subcommand;
use thiserror::Error;
use weathervane_cli::logging::JsonLineLog;
use weathervane_cli::messages;
use weathervane_cli::msg;
use weathervane_cli::serve_policy::ALLOW_NON_LOOPBACK_ENV;
use weathervane_cli::serve_policy::DEFAULT_BIND;
use weathervane_cli::serve_policy::enforce_bind;
use weathervane_cli::serve_policy::resolve_allow_non_loopback;
use weathervane_config::SkillConfig;
use weathervane_core::RequestEnvelope;
use weathervane_core::runtime::Dispatcher;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Maximum size of a request envelope input in bytes.
const MAX_ENVELOPE_BYTES: usize = 1_048_576;

// ============================================================================
// SECTION: CLI Surface
// ============================================================================

/// Weathervane: a voice-skill request dispatcher.
#[derive(Parser, Debug)]
#[command(name = "weathervane", disable_version_flag = true)]
struct Cli {
    /// Prints the version and exits.
    #[arg(long = "version", action = ArgAction::SetTrue)]
    show_version: bool,
    /// Subcommand to execute.
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Top-level CLI commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Dispatches one request envelope and prints the response envelope.
    Handle(HandleCommand),
    /// Serves the dispatcher over a loopback HTTP bind.
    Serve(ServeCommand),
    /// Configuration inspection commands.
    Config {
        /// Configuration subcommand.
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Arguments for one-shot envelope handling.
#[derive(Args, Debug)]
struct HandleCommand {
    /// Path to the request envelope JSON file (stdin when omitted).
    #[arg(long, value_name = "PATH")]
    input: Option<PathBuf>,
    /// Optional config file path (defaults to weathervane.toml when present).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Pretty-prints the response envelope.
    #[arg(long, action = ArgAction::SetTrue)]
    pretty: bool,
}

/// Arguments for the HTTP front end.
#[derive(Args, Debug)]
struct ServeCommand {
    /// Bind address for the HTTP listener.
    #[arg(long, value_name = "ADDR", default_value = DEFAULT_BIND)]
    bind: String,
    /// Optional config file path (defaults to weathervane.toml when present).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Allows binding to a non-loopback address.
    #[arg(long, action = ArgAction::SetTrue)]
    allow_non_loopback: bool,
}

/// Configuration subcommands.
#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Validates a configuration file.
    Validate(ConfigValidateCommand),
}

/// Arguments for config validation.
#[derive(Args, Debug)]
struct ConfigValidateCommand {
    /// Optional config file path (defaults to weathervane.toml when present).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper for cataloged error messages.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`] from a formatted message.
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
#[tokio::main(flavor = "multi_thread")]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
async fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();

    if cli.show_version {
        let version = env!("CARGO_PKG_VERSION");
        write_stdout_line(&msg!("main.version", version = version))
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        return Ok(ExitCode::SUCCESS);
    }

    let Some(command) = cli.command else {
        show_help()?;
        return Ok(ExitCode::SUCCESS);
    };

    match command {
        Commands::Handle(command) => command_handle(&command),
        Commands::Serve(command) => command_serve(command).await,
        Commands::Config {
            command,
        } => command_config(&command),
    }
}

/// Prints top-level help.
fn show_help() -> CliResult<()> {
    Cli::command()
        .print_help()
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(())
}

// ============================================================================
// SECTION: Handle Command
// ============================================================================

/// Executes the `handle` command.
fn command_handle(command: &HandleCommand) -> CliResult<ExitCode> {
    let dispatcher = build_dispatcher(command.config.as_deref(), "config.load_failed")?;

    let raw = read_envelope(command.input.as_deref())?;
    let envelope: RequestEnvelope = serde_json::from_str(&raw)
        .map_err(|err| CliError::new(msg!("handle.input.parse_failed", error = err)))?;

    let response = dispatcher
        .dispatch_to_envelope(&envelope)
        .map_err(|err| CliError::new(msg!("handle.dispatch_failed", error = err)))?;

    let rendered = if command.pretty {
        serde_json::to_string_pretty(&response)
    } else {
        serde_json::to_string(&response)
    }
    .map_err(|err| CliError::new(msg!("handle.output.render_failed", error = err)))?;
    write_stdout_line(&rendered).map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

/// Loads configuration and assembles the dispatcher with stderr logging.
fn build_dispatcher(config: Option<&Path>, load_failed_key: &str) -> CliResult<Dispatcher> {
    let config = SkillConfig::load(config)
        .map_err(|err| CliError::new(load_error(load_failed_key, &err)))?;
    let definition =
        config.build().map_err(|err| CliError::new(load_error(load_failed_key, &err)))?;
    Ok(definition.into_dispatcher(Arc::new(JsonLineLog::stderr())))
}

/// Formats a config loading failure for the given message key.
fn load_error(key: &str, error: &weathervane_config::ConfigError) -> String {
    messages::message(key, vec![messages::MessageArg::new("error", error.to_string())])
}

/// Reads the request envelope from a file or stdin, size-limited.
fn read_envelope(path: Option<&Path>) -> CliResult<String> {
    let limit = u64::try_from(MAX_ENVELOPE_BYTES).unwrap_or(u64::MAX);
    match path {
        Some(path) => {
            let metadata = fs::metadata(path).map_err(|err| {
                CliError::new(msg!(
                    "handle.input.read_failed",
                    path = path.display(),
                    error = err
                ))
            })?;
            if metadata.len() > limit {
                return Err(CliError::new(msg!(
                    "handle.input.too_large",
                    size = metadata.len(),
                    limit = MAX_ENVELOPE_BYTES
                )));
            }
            fs::read_to_string(path).map_err(|err| {
                CliError::new(msg!(
                    "handle.input.read_failed",
                    path = path.display(),
                    error = err
                ))
            })
        }
        None => {
            let mut raw = String::new();
            std::io::stdin()
                .take(limit.saturating_add(1))
                .read_to_string(&mut raw)
                .map_err(|err| {
                    CliError::new(msg!("handle.input.stdin_failed", error = err))
                })?;
            if raw.len() > MAX_ENVELOPE_BYTES {
                return Err(CliError::new(msg!(
                    "handle.input.too_large",
                    size = raw.len(),
                    limit = MAX_ENVELOPE_BYTES
                )));
            }
            Ok(raw)
        }
    }
}

// ============================================================================
// SECTION: Serve Command
// ============================================================================

/// Executes the `serve` command.
async fn command_serve(command: ServeCommand) -> CliResult<ExitCode> {
    let dispatcher = build_dispatcher(command.config.as_deref(), "serve.config.load_failed")?;

    let env_value = std::env::var(ALLOW_NON_LOOPBACK_ENV).ok();
    let allow = resolve_allow_non_loopback(command.allow_non_loopback, env_value.as_deref())
        .map_err(|err| CliError::new(err.to_string()))?;
    let outcome =
        enforce_bind(&command.bind, allow).map_err(|err| CliError::new(err.to_string()))?;

    if outcome.network_exposed {
        write_stderr_line(&msg!("serve.warn.network_exposed", bind = outcome.addr))
            .map_err(|err| CliError::new(output_error("stderr", &err)))?;
    }
    write_stderr_line(&msg!("serve.started", bind = outcome.addr))
        .map_err(|err| CliError::new(output_error("stderr", &err)))?;

    serve::run_server(outcome.addr, Arc::new(dispatcher))
        .await
        .map_err(|err| CliError::new(msg!("serve.failed", error = err)))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Config Command
// ============================================================================

/// Executes `config` subcommands.
fn command_config(command: &ConfigCommand) -> CliResult<ExitCode> {
    match command {
        ConfigCommand::Validate(command) => command_config_validate(command),
    }
}

/// Executes the `config validate` command.
fn command_config_validate(command: &ConfigValidateCommand) -> CliResult<ExitCode> {
    SkillConfig::load(command.config.as_deref())
        .map_err(|err| CliError::new(msg!("config.load_failed", error = err)))?;
    write_stdout_line(&msg!("config.validate.ok"))
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
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

/// Formats a stream write failure.
fn output_error(stream: &str, error: &std::io::Error) -> String {
    let label = if stream == "stdout" {
        msg!("output.stream.stdout")
    } else {
        msg!("output.stream.stderr")
    };
    msg!("output.write_failed", stream = label, error = error)
}

/// Emits an error message and returns the failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
