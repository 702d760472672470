//! RAX FTP Client - Entry Point
//!
//! A minimal passive-mode FTP client: list, create and remove directories,
//! delete files, and copy or move files in either direction.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use log::info;

use rax_ftp_client::config::ClientConfig;
use rax_ftp_client::error::FtpClientError;
use rax_ftp_client::error::handlers::{exit_code, report_error};
use rax_ftp_client::orchestrator::{Operation, OperationOutcome};
use rax_ftp_client::target::{SessionConfig, resolve_transfer};
use rax_ftp_client::utils::logging::setup_logging;
use rax_ftp_client::TransferOrchestrator;

#[derive(Parser, Debug)]
#[command(name = "rax-ftp-client", version, about = "Minimal passive-mode FTP client")]
struct Args {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Configuration file (defaults to ./rax-ftp-client.toml when present)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List a remote directory
    Ls { url: String },
    /// Create a remote directory
    Mkdir { url: String },
    /// Delete a remote file
    Rm { url: String },
    /// Remove a remote directory
    Rmdir { url: String },
    /// Copy a file; exactly one side must be an ftp:// URL
    Cp { source: String, destination: String },
    /// Move a file; exactly one side must be an ftp:// URL
    Mv { source: String, destination: String },
}

impl Commands {
    fn plan(&self) -> Result<(SessionConfig, Operation), FtpClientError> {
        let planned = match self {
            Commands::Ls { url } => (SessionConfig::from_url(url)?, Operation::List),
            Commands::Mkdir { url } => (SessionConfig::from_url(url)?, Operation::MakeDir),
            Commands::Rm { url } => (SessionConfig::from_url(url)?, Operation::Delete),
            Commands::Rmdir { url } => (SessionConfig::from_url(url)?, Operation::RemoveDir),
            Commands::Cp {
                source,
                destination,
            } => {
                let (target, direction) = resolve_transfer(source, destination)?;
                (target, Operation::copy(direction))
            }
            Commands::Mv {
                source,
                destination,
            } => {
                let (target, direction) = resolve_transfer(source, destination)?;
                (target, Operation::Move(direction))
            }
        };
        Ok(planned)
    }
}

async fn execute(args: &Args) -> Result<OperationOutcome, FtpClientError> {
    let config = ClientConfig::load(args.config.as_deref())?;
    let (target, operation) = args.command.plan()?;

    TransferOrchestrator::new(config)
        .run(&target, &operation)
        .await
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();
    setup_logging(args.verbose);

    match execute(&args).await {
        Ok(outcome) => {
            if let OperationOutcome::Listing { text, .. } = &outcome {
                print!("{text}");
            }

            match outcome.failure() {
                None => {
                    info!("Operation completed");
                    ExitCode::SUCCESS
                }
                Some(reason) => {
                    eprintln!("Error: {reason}");
                    ExitCode::FAILURE
                }
            }
        }
        Err(e) => {
            report_error(&e);
            ExitCode::from(exit_code(&e))
        }
    }
}
