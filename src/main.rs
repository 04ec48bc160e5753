//! Command-line runner for the Content API for Shopping samples.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use shopping_samples::auth::oauth::AuthFlowMode;
use shopping_samples::samples::output::ErrorReport;
use shopping_samples::samples::{self, Demo};
use shopping_samples::{ContentSession, SamplesError, SessionOptions};
use tracing_subscriber::EnvFilter;

const DESCRIPTION: &str = concat!(
    "Runs Content API for Shopping demos against a Merchant Center account.",
    " With no demo names, every demo except `orders` runs."
);

/// How the interactive OAuth flow receives the authorization code.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
enum AuthFlow {
    /// Local HTTP listener on the redirect port.
    #[default]
    Loopback,
    /// Paste the code into the terminal.
    Manual,
}

impl From<AuthFlow> for AuthFlowMode {
    fn from(flow: AuthFlow) -> Self {
        match flow {
            AuthFlow::Loopback => Self::default(),
            AuthFlow::Manual => Self::Manual,
        }
    }
}

/// Command-line options.
#[derive(Clone, Debug, Parser)]
#[command(version, about, long_about = DESCRIPTION)]
struct Args {
    /// Configuration directory; defaults to `$HOME/shopping-samples`.
    #[arg(short = 'p', long = "config_path")]
    config_path: Option<PathBuf>,

    /// Ignore the configuration directory and use application default
    /// credentials only.
    #[arg(short = 'n', long = "noconfig", default_value_t = false)]
    no_config: bool,

    /// Write a JSON log of every API request and response to this file.
    #[arg(long = "log_file")]
    log_file: Option<PathBuf>,

    /// How the interactive OAuth flow receives the authorization code.
    #[arg(long = "auth_flow", value_enum, default_value_t = AuthFlow::Loopback)]
    auth_flow: AuthFlow,

    /// Demos to run, in order.
    #[arg(value_name = "DEMO")]
    demos: Vec<String>,
}

impl Args {
    fn session_options(&self) -> SessionOptions {
        SessionOptions {
            config_path: self.config_path.clone(),
            no_config: self.no_config,
            log_file: self.log_file.clone(),
            auth_flow: self.auth_flow.into(),
        }
    }
}

fn enable_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn exit_code_for(error: &SamplesError) -> ExitCode {
    match error {
        SamplesError::Endpoint(_) | SamplesError::UnknownDemo { .. } => ExitCode::from(2),
        _ => ExitCode::FAILURE,
    }
}

fn fail(error: &SamplesError) -> ExitCode {
    eprint!("{}", ErrorReport(error));
    exit_code_for(error)
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    enable_tracing();
    tracing::debug!("Arguments: {args:?}");

    let demos: Vec<Demo> = match samples::select(&args.demos) {
        Ok(demos) => demos,
        Err(e) => return fail(&e),
    };

    let session = match ContentSession::bootstrap(&args.session_options()).await {
        Ok(session) => session,
        Err(e) => return fail(&e),
    };

    let failures = samples::run_all(&session, &demos).await;
    if failures > 0 {
        eprintln!("{failures} of {} demos failed.", demos.len());
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
