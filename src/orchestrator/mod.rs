//! Module `orchestrator`
//!
//! Sequences one operation over a fresh control session: connect,
//! authenticate, configure the transfer, then either run a passive-mode data
//! transfer or a single administrative command, and finally terminate the
//! session. Termination is attempted on every path where the control socket
//! is still usable, and the first error is the one returned.

pub mod operations;
pub mod phase;
pub mod results;

pub use operations::{Direction, Operation};
pub use phase::{Phase, PhaseTracker};
pub use results::{OperationOutcome, SourceCleanup};

use std::path::Path;

use log::{debug, info, warn};
use tokio::io::{AsyncRead, AsyncWrite};

use crate::config::{ClientConfig, DataConnectOrder};
use crate::error::FtpClientError;
use crate::protocol::Command;
use crate::protocol::responses::{FILE_ACTION_OK, PATHNAME_CREATED, TRANSFER_READY};
use crate::session::ControlSession;
use crate::storage;
use crate::target::SessionConfig;
use crate::transfer::{DataChannel, TransferSummary, negotiate_passive};

/// Drives single operations against an FTP server.
#[derive(Debug, Clone, Default)]
pub struct TransferOrchestrator {
    config: ClientConfig,
}

impl TransferOrchestrator {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    /// Connects to the target and runs `operation` on its path.
    pub async fn run(
        &self,
        target: &SessionConfig,
        operation: &Operation,
    ) -> Result<OperationOutcome, FtpClientError> {
        let mut phases = PhaseTracker::default();
        self.run_traced(target, operation, &mut phases).await
    }

    /// Same as `run`, recording every phase entered into `phases`.
    pub async fn run_traced(
        &self,
        target: &SessionConfig,
        operation: &Operation,
        phases: &mut PhaseTracker,
    ) -> Result<OperationOutcome, FtpClientError> {
        if let Some(local) = operation.upload_source() {
            storage::ensure_source_file(local).await?;
        }

        info!(
            "Starting {operation} for {}:{}{}",
            target.host, target.port, target.path
        );

        phases.enter(Phase::Connecting);
        let session = ControlSession::connect(&target.host, target.port).await?;
        self.drive(session, target, operation, phases).await
    }

    /// Runs `operation` over an already established session and terminates it.
    pub async fn drive<S>(
        &self,
        mut session: ControlSession<S>,
        target: &SessionConfig,
        operation: &Operation,
        phases: &mut PhaseTracker,
    ) -> Result<OperationOutcome, FtpClientError>
    where
        S: AsyncRead + AsyncWrite + Unpin,
    {
        let result = self.perform(&mut session, target, operation, phases).await;

        if let Err(e) = &result {
            debug!("{operation} failed: {e}");
        }

        phases.enter(Phase::Terminating);
        match session.terminate().await {
            Ok(Some(reply)) => debug!("Session terminated: {reply}"),
            Ok(None) => debug!("Session already closed"),
            Err(e) => warn!("Failed to terminate session cleanly: {e}"),
        }
        phases.enter(Phase::Closed);

        result
    }

    async fn perform<S>(
        &self,
        session: &mut ControlSession<S>,
        target: &SessionConfig,
        operation: &Operation,
        phases: &mut PhaseTracker,
    ) -> Result<OperationOutcome, FtpClientError>
    where
        S: AsyncRead + AsyncWrite + Unpin,
    {
        phases.enter(Phase::Authenticating);
        session.authenticate(&target.credentials).await?;

        phases.enter(Phase::ConfiguringTransfer);
        session
            .configure_transfer(&target.params, self.config.strict_replies)
            .await?;

        let path = target.path.clone();
        match operation {
            Operation::List => self.list(session, path, phases).await,
            Operation::MakeDir => {
                self.administer(session, Command::MKD(path), PATHNAME_CREATED, phases)
                    .await
            }
            Operation::Delete => {
                self.administer(session, Command::DELE(path), FILE_ACTION_OK, phases)
                    .await
            }
            Operation::RemoveDir => {
                self.administer(session, Command::RMD(path), FILE_ACTION_OK, phases)
                    .await
            }
            Operation::Upload(local) => self
                .upload(session, path, local, phases)
                .await
                .map(OperationOutcome::Transferred),
            Operation::Download(local) => self
                .download(session, path, local, phases)
                .await
                .map(OperationOutcome::Transferred),
            Operation::Move(Direction::Download { local }) => {
                let transfer = self.download(session, path.clone(), local, phases).await?;
                let cleanup = if transfer.final_reply.is_positive() {
                    self.remove_remote_source(session, path, phases).await
                } else {
                    SourceCleanup::Skipped(transfer.final_reply.clone())
                };
                Ok(OperationOutcome::Moved { transfer, cleanup })
            }
            Operation::Move(Direction::Upload { local }) => {
                let transfer = self.upload(session, path, local, phases).await?;
                let cleanup = if transfer.final_reply.is_positive() {
                    match storage::remove_local_file(local).await {
                        Ok(()) => SourceCleanup::Removed,
                        Err(e) => SourceCleanup::Failed(e.to_string()),
                    }
                } else {
                    SourceCleanup::Skipped(transfer.final_reply.clone())
                };
                Ok(OperationOutcome::Moved { transfer, cleanup })
            }
        }
    }

    async fn list<S>(
        &self,
        session: &mut ControlSession<S>,
        path: String,
        phases: &mut PhaseTracker,
    ) -> Result<OperationOutcome, FtpClientError>
    where
        S: AsyncRead + AsyncWrite + Unpin,
    {
        let mut channel = self.open_transfer(session, Command::LIST(path), phases).await?;

        let mut listing = Vec::new();
        let drained = channel
            .drain_to_sink(&mut listing, self.config.buffer_size)
            .await;
        let transfer = self
            .finish_transfer(session, channel, drained, phases)
            .await?;

        Ok(OperationOutcome::Listing {
            text: String::from_utf8_lossy(&listing).into_owned(),
            transfer,
        })
    }

    async fn download<S>(
        &self,
        session: &mut ControlSession<S>,
        path: String,
        local: &Path,
        phases: &mut PhaseTracker,
    ) -> Result<TransferSummary, FtpClientError>
    where
        S: AsyncRead + AsyncWrite + Unpin,
    {
        let mut channel = self.open_transfer(session, Command::RETR(path), phases).await?;

        let drained = match storage::create_destination(local).await {
            Ok(mut file) => {
                channel
                    .drain_to_sink(&mut file, self.config.buffer_size)
                    .await
            }
            Err(e) => Err(e.into()),
        };
        self.finish_transfer(session, channel, drained, phases).await
    }

    async fn upload<S>(
        &self,
        session: &mut ControlSession<S>,
        path: String,
        local: &Path,
        phases: &mut PhaseTracker,
    ) -> Result<TransferSummary, FtpClientError>
    where
        S: AsyncRead + AsyncWrite + Unpin,
    {
        let mut source = storage::open_source(local).await?;
        let mut channel = self.open_transfer(session, Command::STOR(path), phases).await?;

        let drained = channel
            .drain_from_source(&mut source, self.config.buffer_size)
            .await;
        self.finish_transfer(session, channel, drained, phases).await
    }

    /// Negotiates passive mode, sends the transfer command and waits for the
    /// server to report the data connection ready.
    ///
    /// A reply other than 125/150 aborts the operation with no payload sent.
    async fn open_transfer<S>(
        &self,
        session: &mut ControlSession<S>,
        command: Command,
        phases: &mut PhaseTracker,
    ) -> Result<DataChannel, FtpClientError>
    where
        S: AsyncRead + AsyncWrite + Unpin,
    {
        phases.enter(Phase::Negotiating);
        let endpoint = negotiate_passive(session).await?;

        let early = match self.config.data_connect {
            DataConnectOrder::BeforeCommand => Some(DataChannel::open(endpoint).await?),
            DataConnectOrder::AfterReady => None,
        };

        let reply = session.exchange(&command).await?;
        if !TRANSFER_READY.contains(&reply.code) {
            if let Some(channel) = early {
                channel.close().await;
            }
            return Err(FtpClientError::UnexpectedReply {
                context: format!("server did not accept {}", command.verb()),
                reply,
            });
        }

        let channel = match early {
            Some(channel) => channel,
            None => DataChannel::open(endpoint).await?,
        };

        phases.enter(Phase::Transferring);
        Ok(channel)
    }

    /// Closes the data connection, then reads the final transfer reply.
    async fn finish_transfer<S>(
        &self,
        session: &mut ControlSession<S>,
        channel: DataChannel,
        drained: Result<u64, FtpClientError>,
        phases: &mut PhaseTracker,
    ) -> Result<TransferSummary, FtpClientError>
    where
        S: AsyncRead + AsyncWrite + Unpin,
    {
        channel.close().await;
        let bytes = drained?;

        phases.enter(Phase::AwaitingFinalReply);
        let final_reply = session.read_reply().await?;

        if !final_reply.is_positive() {
            if self.config.strict_replies {
                return Err(FtpClientError::UnexpectedReply {
                    context: "transfer not confirmed".into(),
                    reply: final_reply,
                });
            }
            warn!("Transfer finished with unexpected reply: {final_reply}");
        } else {
            info!("Transfer complete: {bytes} bytes ({final_reply})");
        }

        Ok(TransferSummary { bytes, final_reply })
    }

    /// Sends one administrative command and checks it against `expected`.
    async fn administer<S>(
        &self,
        session: &mut ControlSession<S>,
        command: Command,
        expected: u16,
        phases: &mut PhaseTracker,
    ) -> Result<OperationOutcome, FtpClientError>
    where
        S: AsyncRead + AsyncWrite + Unpin,
    {
        phases.enter(Phase::AwaitingFinalReply);
        let reply = session.exchange(&command).await?;

        if reply.code == expected {
            info!("{command} succeeded: {reply}");
            Ok(OperationOutcome::Completed(reply))
        } else {
            warn!("{command} refused: {reply}");
            Ok(OperationOutcome::Rejected(reply))
        }
    }

    async fn remove_remote_source<S>(
        &self,
        session: &mut ControlSession<S>,
        path: String,
        phases: &mut PhaseTracker,
    ) -> SourceCleanup
    where
        S: AsyncRead + AsyncWrite + Unpin,
    {
        match self
            .administer(session, Command::DELE(path), FILE_ACTION_OK, phases)
            .await
        {
            Ok(OperationOutcome::Completed(_)) => SourceCleanup::Removed,
            Ok(OperationOutcome::Rejected(reply)) => SourceCleanup::Rejected(reply),
            Ok(other) => SourceCleanup::Failed(format!("unexpected outcome {other:?}")),
            Err(e) => SourceCleanup::Failed(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::Reply;
    use crate::target::Credentials;
    use crate::transfer::TransferParams;
    use tokio_test::io::Builder;

    fn target(path: &str) -> SessionConfig {
        SessionConfig {
            host: "ftp.example.com".into(),
            port: 21,
            path: path.into(),
            credentials: Credentials::default(),
            params: TransferParams::default(),
        }
    }

    fn login(builder: &mut Builder) -> &mut Builder {
        builder
            .read(b"220 ready\r\n")
            .write(b"USER anonymous\r\n")
            .read(b"230 Login successful\r\n")
            .write(b"TYPE I\r\n")
            .read(b"200 Binary\r\n")
            .write(b"MODE S\r\n")
            .read(b"200 Stream\r\n")
            .write(b"STRU F\r\n")
            .read(b"200 File\r\n")
    }

    #[tokio::test]
    async fn test_delete_skips_data_phases() {
        let mock = login(&mut Builder::new())
            .write(b"DELE /old.txt\r\n")
            .read(b"250 Deleted\r\n")
            .write(b"QUIT\r\n")
            .read(b"221 Goodbye\r\n")
            .build();

        let session = ControlSession::establish(mock).await.unwrap();
        let mut phases = PhaseTracker::default();
        let outcome = TransferOrchestrator::default()
            .drive(session, &target("/old.txt"), &Operation::Delete, &mut phases)
            .await
            .unwrap();

        assert_eq!(outcome, OperationOutcome::Completed(Reply::new(250, "Deleted")));
        assert_eq!(
            phases.history(),
            &[
                Phase::Authenticating,
                Phase::ConfiguringTransfer,
                Phase::AwaitingFinalReply,
                Phase::Terminating,
                Phase::Closed,
            ]
        );
    }

    #[tokio::test]
    async fn test_mkdir_rejection_still_terminates() {
        let mock = login(&mut Builder::new())
            .write(b"MKD /exists\r\n")
            .read(b"550 Directory exists\r\n")
            .write(b"QUIT\r\n")
            .read(b"221 Goodbye\r\n")
            .build();

        let session = ControlSession::establish(mock).await.unwrap();
        let outcome = TransferOrchestrator::default()
            .drive(
                session,
                &target("/exists"),
                &Operation::MakeDir,
                &mut PhaseTracker::default(),
            )
            .await
            .unwrap();

        assert!(!outcome.is_success());
        assert_eq!(outcome, OperationOutcome::Rejected(Reply::new(550, "Directory exists")));
    }

    #[tokio::test]
    async fn test_rejected_retr_opens_no_data_connection() {
        // Nothing listens on the PASV endpoint.
        let mock = login(&mut Builder::new())
            .write(b"PASV\r\n")
            .read(b"227 Entering Passive Mode (127,0,0,1,0,1)\r\n")
            .write(b"RETR /missing.bin\r\n")
            .read(b"550 No such file\r\n")
            .write(b"QUIT\r\n")
            .read(b"221 Goodbye\r\n")
            .build();

        let dir = tempfile::tempdir().unwrap();
        let local = dir.path().join("missing.bin");

        let session = ControlSession::establish(mock).await.unwrap();
        let err = TransferOrchestrator::default()
            .drive(
                session,
                &target("/missing.bin"),
                &Operation::Download(local.clone()),
                &mut PhaseTracker::default(),
            )
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "server did not accept RETR: 550 No such file");
        assert!(!local.exists());
    }

    #[tokio::test]
    async fn test_auth_failure_still_quits() {
        let mock = Builder::new()
            .read(b"220 ready\r\n")
            .write(b"USER anonymous\r\n")
            .read(b"530 Anonymous login not allowed\r\n")
            .write(b"QUIT\r\n")
            .read(b"221 Goodbye\r\n")
            .build();

        let session = ControlSession::establish(mock).await.unwrap();
        let err = TransferOrchestrator::default()
            .drive(
                session,
                &target("/"),
                &Operation::List,
                &mut PhaseTracker::default(),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, FtpClientError::Auth(_)));
    }

    #[tokio::test]
    async fn test_lost_connection_skips_quit() {
        let mock = Builder::new()
            .read(b"220 ready\r\n")
            .write(b"USER anonymous\r\n")
            .read(b"230 Login successful\r\n")
            .write(b"TYPE I\r\n")
            .build();

        let session = ControlSession::establish(mock).await.unwrap();
        let err = TransferOrchestrator::default()
            .drive(
                session,
                &target("/"),
                &Operation::Delete,
                &mut PhaseTracker::default(),
            )
            .await
            .unwrap_err();

        assert!(err.breaks_control());
    }
}
