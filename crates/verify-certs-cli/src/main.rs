// verify-certs-cli/src/main.rs
// ============================================================================
// Module: Verify Certs CLI Entry Point
// Description: Command dispatcher for certificate verification workflows.
// Purpose: Provide a localized CLI standing in for the host's verify page.
// Dependencies: clap, verify-certs-config, verify-certs-core, verify-certs-handlers
// ============================================================================

//! ## Overview
//! The Verify Certs CLI loads configuration and a deployment snapshot, wires
//! the built-in handlers, and resolves submitted codes through the verifier
//! registry. All user-facing strings are routed through the i18n catalog to
//! prepare for future localization. Codes are validated before dispatch and
//! the principal must hold the view capability, matching the host page.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use clap::Args;
use clap::Parser;
use clap::Subcommand;
use verify_certs_cli::audit::AuditSink;
use verify_certs_cli::audit::FileAuditSink;
use verify_certs_cli::audit::VerificationAuditEvent;
use verify_certs_cli::audit::VerificationAuditEventParams;
use verify_certs_cli::snapshot::Snapshot;
use verify_certs_cli::snapshot::SnapshotPermissions;
use verify_certs_cli::t;
use verify_certs_config::VerifyCertsConfig;
use verify_certs_core::Capability;
use verify_certs_core::ConfigReader;
use verify_certs_core::MessageCatalog;
use verify_certs_core::PermissionChecker;
use verify_certs_core::SettingKind;
use verify_certs_core::Timestamp;
use verify_certs_core::UserId;
use verify_certs_core::Verdict;
use verify_certs_core::VerificationOutcome;
use verify_certs_core::VerifierRegistry;
use verify_certs_core::VerifyContext;
use verify_certs_handlers::builtin_verifiers;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Maximum accepted length of a submitted code.
const MAX_CODE_LENGTH: usize = 64;

// ============================================================================
// SECTION: Command Line
// ============================================================================

/// Certificate verification against a deployment snapshot.
#[derive(Debug, Parser)]
#[command(name = "verify-certs", version, about = "Verify issued certificate codes")]
struct Cli {
    /// Selected subcommand.
    #[command(subcommand)]
    command: Command,
}

/// Top-level subcommands.
#[derive(Debug, Subcommand)]
enum Command {
    /// Verify a certificate code.
    Verify(VerifyArgs),
    /// List installed certificate handlers.
    Handlers(HostArgs),
    /// Print the settings contributed by installed handlers.
    Settings(HostArgs),
    /// Configuration tooling.
    Config {
        /// Configuration subcommand.
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Arguments locating the host deployment inputs.
#[derive(Debug, Args)]
struct HostArgs {
    /// Path to the TOML configuration file; defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Path to the JSON snapshot of the host deployment.
    #[arg(long)]
    snapshot: PathBuf,
}

/// Arguments for the verify subcommand.
#[derive(Debug, Args)]
struct VerifyArgs {
    /// Host deployment inputs.
    #[command(flatten)]
    host: HostArgs,
    /// Certificate code to verify.
    code: String,
    /// Principal performing the verification.
    #[arg(long)]
    user: String,
    /// Verification instant as unix seconds; defaults to the current time.
    #[arg(long)]
    at: Option<i64>,
    /// Append JSON audit events to this file.
    #[arg(long)]
    audit_log: Option<PathBuf>,
    /// Include the submitted code in audit events.
    #[arg(long)]
    audit_code: bool,
}

/// Configuration subcommands.
#[derive(Debug, Subcommand)]
enum ConfigCommand {
    /// Load and validate a configuration file.
    Validate {
        /// Path to the TOML configuration file.
        #[arg(long)]
        config: PathBuf,
    },
}

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// Parses arguments and dispatches the selected subcommand.
fn main() -> ExitCode {
    let cli = Cli::parse();
    match cli.command {
        Command::Verify(args) => run_verify(&args),
        Command::Handlers(args) => run_handlers(&args),
        Command::Settings(args) => run_settings(&args),
        Command::Config {
            command: ConfigCommand::Validate {
                config,
            },
        } => run_config_validate(&config),
    }
}

// ============================================================================
// SECTION: Subcommands
// ============================================================================

/// Runs a verification pass and renders the outcome.
fn run_verify(args: &VerifyArgs) -> ExitCode {
    if !is_valid_code(&args.code) {
        emit_err(&t!("verify.invalid_code", limit = MAX_CODE_LENGTH));
        return ExitCode::FAILURE;
    }

    let Some((registry, permissions)) = load_host(&args.host) else {
        return ExitCode::FAILURE;
    };

    let principal = UserId::new(args.user.clone());
    if !permissions.has_capability(&principal, Capability::View) {
        emit_err(&t!("verify.permission_denied"));
        return ExitCode::FAILURE;
    }

    let sink = match args.audit_log.as_deref() {
        Some(path) => match FileAuditSink::new(path) {
            Ok(sink) => Some(sink),
            Err(error) => {
                emit_err(&t!("audit.open_failed", path = path.display(), error = error));
                return ExitCode::FAILURE;
            }
        },
        None => None,
    };

    let ctx = VerifyContext {
        can_verify_all: permissions.has_capability(&principal, Capability::VerifyAll),
        principal,
        verified_at: args.at.map_or_else(now_unix_seconds, Timestamp::from_unix_seconds),
    };

    let audit_code = args.audit_code.then(|| args.code.clone());
    match registry.verify(&args.code, &ctx) {
        Ok(outcome) => {
            record_outcome(sink.as_ref(), &ctx, &outcome, audit_code);
            emit(&registry.render(&outcome));
            ExitCode::SUCCESS
        }
        Err(error) => {
            record_error(sink.as_ref(), &ctx, audit_code);
            emit_err(&t!("verify.store_failed", error = error));
            ExitCode::FAILURE
        }
    }
}

/// Lists installed handlers with their enablement state.
fn run_handlers(args: &HostArgs) -> ExitCode {
    let Some((registry, _)) = load_host(args) else {
        return ExitCode::FAILURE;
    };

    if registry.verifiers().is_empty() {
        emit(&t!("handlers.none"));
        return ExitCode::SUCCESS;
    }

    emit(&t!("handlers.header"));
    for verifier in registry.verifiers() {
        let shortname = verifier.shortname();
        let fullname = verifier.fullname(registry.catalog());
        let line = if verifier.is_enabled() {
            t!("handlers.line.enabled", shortname = shortname, fullname = fullname)
        } else {
            t!("handlers.line.disabled", shortname = shortname, fullname = fullname)
        };
        emit(&line);
    }
    ExitCode::SUCCESS
}

/// Prints the settings surface contributed by installed handlers.
fn run_settings(args: &HostArgs) -> ExitCode {
    let Some((registry, _)) = load_host(args) else {
        return ExitCode::FAILURE;
    };

    let catalog = registry.catalog();
    for verifier in registry.verifiers() {
        for descriptor in verifier.settings() {
            let label = catalog.get(&descriptor.label_key).to_string();
            match descriptor.kind {
                SettingKind::Heading => emit(&t!("settings.heading", label = label)),
                SettingKind::Checkbox {
                    default,
                } => {
                    let line = if default {
                        t!("settings.checkbox.on", key = descriptor.key, label = label)
                    } else {
                        t!("settings.checkbox.off", key = descriptor.key, label = label)
                    };
                    emit(&line);
                    if let Some(help_key) = &descriptor.help_key {
                        emit(&t!("settings.help", help = catalog.get(help_key)));
                    }
                }
            }
        }
    }
    ExitCode::SUCCESS
}

/// Loads and validates a configuration file.
fn run_config_validate(path: &std::path::Path) -> ExitCode {
    match VerifyCertsConfig::load(path) {
        Ok(_) => {
            emit(&t!("config.validate.ok"));
            ExitCode::SUCCESS
        }
        Err(error) => {
            emit_err(&t!("config.load_failed", error = error));
            ExitCode::FAILURE
        }
    }
}

// ============================================================================
// SECTION: Host Wiring
// ============================================================================

/// Loads configuration and snapshot, returning the wired registry.
///
/// Emits a localized error and returns `None` when loading fails.
fn load_host(args: &HostArgs) -> Option<(VerifierRegistry, SnapshotPermissions)> {
    let config = match args.config.as_deref() {
        Some(path) => match VerifyCertsConfig::load(path) {
            Ok(config) => config,
            Err(error) => {
                emit_err(&t!("config.load_failed", error = error));
                return None;
            }
        },
        None => VerifyCertsConfig::default(),
    };

    let snapshot = match Snapshot::load(&args.snapshot) {
        Ok(snapshot) => snapshot,
        Err(error) => {
            emit_err(&t!("snapshot.load_failed", error = error));
            return None;
        }
    };

    let (stores, permissions) = snapshot.split();
    let config: Arc<dyn ConfigReader> = Arc::new(config);
    let verifiers = builtin_verifiers(&config, stores);
    let registry = VerifierRegistry::discover(verifiers, MessageCatalog::builtin());
    Some((registry, permissions))
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Returns true when the code is non-empty, bounded, and alphanumeric.
fn is_valid_code(code: &str) -> bool {
    !code.is_empty()
        && code.len() <= MAX_CODE_LENGTH
        && code.bytes().all(|byte| byte.is_ascii_alphanumeric())
}

/// Returns the current wall-clock time as unix seconds.
fn now_unix_seconds() -> Timestamp {
    let seconds = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_secs();
    Timestamp::from_unix_seconds(i64::try_from(seconds).unwrap_or(i64::MAX))
}

/// Records an audit event for a completed verification pass.
fn record_outcome(
    sink: Option<&FileAuditSink>,
    ctx: &VerifyContext,
    outcome: &VerificationOutcome,
    code: Option<String>,
) {
    let Some(sink) = sink else {
        return;
    };
    let (outcome_label, handler, disclosed) = match outcome.verification() {
        Some(verification) => (
            match verification.verdict {
                Verdict::Valid => "valid",
                Verdict::ValidArchived => "valid_archived",
            },
            Some(verification.handler.to_string()),
            verification.detail.is_some(),
        ),
        None => ("expired", None, false),
    };
    sink.record(&VerificationAuditEvent::new(VerificationAuditEventParams {
        principal: ctx.principal.to_string(),
        handler,
        outcome: outcome_label,
        disclosed_detail: disclosed,
        code,
    }));
}

/// Records an audit event for a failed verification pass.
fn record_error(sink: Option<&FileAuditSink>, ctx: &VerifyContext, code: Option<String>) {
    let Some(sink) = sink else {
        return;
    };
    sink.record(&VerificationAuditEvent::new(VerificationAuditEventParams {
        principal: ctx.principal.to_string(),
        handler: None,
        outcome: "store_error",
        disclosed_detail: false,
        code,
    }));
}

/// Writes a line to stdout, ignoring write failures.
fn emit(message: &str) {
    let _ = writeln!(io::stdout(), "{message}");
}

/// Writes a line to stderr, ignoring write failures.
fn emit_err(message: &str) {
    let _ = writeln!(io::stderr(), "{message}");
}
