//! Command-line client for the back-office session endpoints.
//!
//! Keeps a session in a local file and drives the same `session` crate the
//! web client uses, so sign-in, revalidation and the guard decision can be
//! exercised from a terminal.


mod file_storage;
mod http;

use std::time::Duration;

use clap::{Parser, Subcommand};
use session::{DenyReason, GuardMount, GuardState, RouteGuard, SessionError, SessionService, UserProfile};
use tracing_subscriber::EnvFilter;

use crate::file_storage::FileStorage;
use crate::http::ReqwestBackend;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("missing password; pass --password or set BACKOFFICE_PASSWORD")]
    MissingPassword,
    #[error("failed to build http client: {0}")]
    Client(#[from] reqwest::Error),
    #[error("{0}")]
    Session(#[from] SessionError),
    #[error("access denied: {0}")]
    Denied(&'static str),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "backoffice", about = "Back-office session CLI")]
struct Cli {
    #[arg(long, env = "BACKOFFICE_BASE_URL", default_value = "http://127.0.0.1:3000")]
    base_url: String,

    #[arg(long, env = "BACKOFFICE_SESSION_FILE")]
    session_file: Option<std::path::PathBuf>,

    #[arg(long, env = "BACKOFFICE_TIMEOUT_SECS", default_value_t = 10)]
    timeout_secs: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Exchange email and password for a session and store it.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "BACKOFFICE_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Ask the backend who the stored session belongs to.
    Whoami,
    /// Show the stored session without contacting the backend.
    Status,
    /// Run one guard cycle and report whether a protected page would render.
    Check,
    /// Forget the stored session.
    Logout,
}

type CliSession = SessionService<FileStorage, ReqwestBackend>;

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let storage = FileStorage::new(cli.session_file.unwrap_or_else(FileStorage::default_path));
    let backend = ReqwestBackend::new(cli.base_url, Duration::from_secs(cli.timeout_secs))?;
    let service = SessionService::new(storage, backend);

    match cli.command {
        Command::Login { email, password } => run_login(&service, &email, password).await,
        Command::Whoami => run_whoami(&service).await,
        Command::Status => run_status(&service),
        Command::Check => run_check(&service).await,
        Command::Logout => {
            service.destroy_session();
            println!("signed out");
            Ok(())
        }
    }
}

async fn run_login(service: &CliSession, email: &str, password: Option<String>) -> Result<(), CliError> {
    let password = password.ok_or(CliError::MissingPassword)?;
    let profile = service.authenticate(email, &password).await?;
    println!("signed in as {}", profile.display_name());
    Ok(())
}

async fn run_whoami(service: &CliSession) -> Result<(), CliError> {
    match service.fetch_current_user().await {
        Ok(profile) => print_profile(&profile),
        Err(err @ SessionError::SessionInvalid(_)) => {
            tracing::info!(error = %err, "stored session rejected; clearing it");
            service.destroy_session();
            Err(err.into())
        }
        Err(err) => Err(err.into()),
    }
}

fn run_status(service: &CliSession) -> Result<(), CliError> {
    tracing::debug!(path = %service.store().storage().path().display(), "reading session file");
    match service.local_profile() {
        Some(profile) => print_profile(&profile),
        None => {
            println!("no local session");
            Ok(())
        }
    }
}

async fn run_check(service: &CliSession) -> Result<(), CliError> {
    let guard = RouteGuard::new(service);
    let mount = GuardMount::new();
    let redirect = |route: &str| println!("redirect -> {route}");
    let state = guard
        .run(&mount, |next| tracing::debug!(state = ?next, "guard transition"), &redirect)
        .await;

    match state {
        Some(GuardState::Authenticated(profile)) => {
            println!("authenticated as {}", profile.display_name());
            Ok(())
        }
        Some(GuardState::Unauthenticated(reason)) => Err(CliError::Denied(deny_label(reason))),
        Some(GuardState::Checking) | None => Ok(()),
    }
}

fn print_profile(profile: &UserProfile) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(profile)?;
    println!("{rendered}");
    Ok(())
}

fn deny_label(reason: DenyReason) -> &'static str {
    match reason {
        DenyReason::NoLocalSession => "no local session",
        DenyReason::Rejected => "the backend rejected the stored session",
        DenyReason::Unreachable => "the backend could not be reached",
    }
}
