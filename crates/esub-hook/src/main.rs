//! esub admission hook.
//!
//! Invoked by the submission pipeline once per job:
//! - job request JSON on stdin
//! - one reply JSON on stdout (`accept` / `reject` / `error`)
//! - diagnostics on stderr, filtered by `RUST_LOG`

use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use esub_core::error::{EsubError, Result};
use esub_hook::config::{self, HookConfig};
use esub_hook::hook::{error_outcome, Hook};
use esub_hook::transport::codec;

#[derive(Parser)]
#[command(
    name = "esub",
    about = "Job submission admission hook: validates and rewrites one job request",
    version
)]
struct Cli {
    /// Policy config (YAML). Built-in defaults apply when omitted.
    #[arg(short, long, env = "ESUB_CONFIG")]
    config: Option<String>,

    /// Exit status signalling an aborted submission
    #[arg(long, env = "LSB_SUB_ABORT_VALUE")]
    abort_status: Option<String>,

    /// Validate the config, print the rule order and exit
    #[arg(long)]
    check_config: bool,
}

impl Cli {
    fn abort_status(&self) -> Option<u8> {
        let raw = self.abort_status.as_deref()?;
        match raw.trim().parse::<u8>() {
            Ok(n) if n != 0 => Some(n),
            _ => {
                tracing::warn!(value = raw, "ignoring invalid abort status");
                None
            }
        }
    }
}

fn main() -> ExitCode {
    fmt()
        .with_writer(io::stderr)
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => {
            return fail(EsubError::Config(e.to_string()), HookConfig::default().hook.abort_status)
        }
    };

    let abort_override = cli.abort_status();
    let hook = match build_hook(&cli) {
        Ok(hook) => hook,
        Err(e) => {
            let status = abort_override.unwrap_or(HookConfig::default().hook.abort_status);
            return fail(e, status);
        }
    };
    let hook = match abort_override {
        Some(status) => hook.with_abort_status(status),
        None => hook,
    };

    if cli.check_config {
        for name in hook.engine().rule_names() {
            println!("{name}");
        }
        return ExitCode::SUCCESS;
    }

    match hook.run(io::stdin().lock(), io::stdout().lock()) {
        Ok(status) => ExitCode::from(status),
        Err(e) => {
            tracing::error!(error = %e, "failed to write reply");
            ExitCode::from(hook.abort_status())
        }
    }
}

fn build_hook(cli: &Cli) -> Result<Hook> {
    let cfg = match &cli.config {
        Some(path) => config::load_from_file(path)?,
        None => HookConfig::default(),
    };
    tracing::debug!(config = ?cli.config, "policy loaded");
    Hook::new(&cfg)
}

fn fail(e: EsubError, abort_status: u8) -> ExitCode {
    let outcome = error_outcome(&e, abort_status);
    if let Err(we) = codec::write_reply(io::stdout().lock(), &outcome.reply) {
        tracing::error!(error = %we, "failed to write reply");
    }
    ExitCode::from(outcome.exit_status)
}
