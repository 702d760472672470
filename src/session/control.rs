//! Control connection
//!
//! `ControlSession` owns the control socket for the lifetime of one
//! operation: it is created by connecting and reading the banner, carries
//! every command/reply exchange, and is consumed by `terminate`.

use log::{debug, info, warn};
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpStream;

use crate::error::FtpClientError;
use crate::protocol::responses::{CLOSING_CONTROL, COMMAND_OK, SERVICE_READY};
use crate::protocol::{Command, Reply, read_reply_line};
use crate::session::auth::AuthState;
use crate::target::Credentials;
use crate::transfer::modes::TransferParams;

/// Client side of the control connection.
///
/// Generic over the stream so the protocol logic runs against any
/// `AsyncRead + AsyncWrite` transport; production code uses `TcpStream`.
/// Once the socket fails the session is marked closed and every further
/// command is refused with `SessionClosed`.
pub struct ControlSession<S = TcpStream> {
    stream: Option<S>,
    banner: Reply,
}

impl ControlSession<TcpStream> {
    /// Opens the control connection and reads the server banner.
    pub async fn connect(host: &str, port: u16) -> Result<Self, FtpClientError> {
        info!("Connecting to {host}:{port}");

        let stream = TcpStream::connect((host, port))
            .await
            .map_err(|source| FtpClientError::Connect {
                addr: format!("{host}:{port}"),
                source,
            })?;

        Self::establish(stream).await
    }
}

impl<S> ControlSession<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// Wraps an already connected stream and reads the server banner.
    pub async fn establish(mut stream: S) -> Result<Self, FtpClientError> {
        let line = read_reply_line(&mut stream).await?;
        let banner = Reply::parse(&line)?;

        if banner.code != SERVICE_READY {
            warn!("Unexpected server banner: {banner}");
        } else {
            info!("Server banner: {banner}");
        }

        Ok(Self {
            stream: Some(stream),
            banner,
        })
    }

    pub fn banner(&self) -> &Reply {
        &self.banner
    }

    /// Returns whether the control socket is still usable.
    pub fn is_open(&self) -> bool {
        self.stream.is_some()
    }

    /// Writes `text` followed by CRLF. The text is not validated.
    pub async fn send_raw(&mut self, text: &str) -> Result<(), FtpClientError> {
        let stream = self.stream.as_mut().ok_or(FtpClientError::SessionClosed)?;

        let line = format!("{text}\r\n");
        let result = match stream.write_all(line.as_bytes()).await {
            Ok(()) => stream.flush().await,
            Err(e) => Err(e),
        };

        result.map_err(|e| self.fail(e.into()))
    }

    pub async fn send_command(&mut self, command: &Command) -> Result<(), FtpClientError> {
        debug!(">>> {command}");
        self.send_raw(&command.to_line()).await
    }

    /// Reads and parses one reply line.
    pub async fn read_reply(&mut self) -> Result<Reply, FtpClientError> {
        let stream = self.stream.as_mut().ok_or(FtpClientError::SessionClosed)?;

        let line = match read_reply_line(stream).await {
            Ok(line) => line,
            Err(e) => return Err(self.fail(e.into())),
        };

        match Reply::parse(&line) {
            Ok(reply) => {
                debug!("<<< {reply}");
                Ok(reply)
            }
            Err(e) => Err(self.fail(e.into())),
        }
    }

    /// Sends one command and reads its reply.
    pub async fn exchange(&mut self, command: &Command) -> Result<Reply, FtpClientError> {
        self.send_command(command).await?;
        self.read_reply().await
    }

    /// Logs in with USER, and PASS when the server asks for it.
    pub async fn authenticate(
        &mut self,
        credentials: &Credentials,
    ) -> Result<AuthState, FtpClientError> {
        let mut state = AuthState::AwaitingUserReply;
        let mut reply = self
            .exchange(&Command::USER(credentials.user.clone()))
            .await?;

        loop {
            state = state.next(&reply);
            match state {
                AuthState::AwaitingPassReply => {
                    reply = self
                        .exchange(&Command::PASS(credentials.password.clone()))
                        .await?;
                }
                AuthState::Authenticated => {
                    info!("Logged in as {}", credentials.user);
                    return Ok(state);
                }
                AuthState::AwaitingUserReply | AuthState::Failed => {
                    return Err(FtpClientError::Auth(reply));
                }
            }
        }
    }

    /// Sends TYPE, MODE and STRU in that order.
    ///
    /// With `strict` unset the replies are read but not checked; a refusal is
    /// only logged. With `strict` set each one must be 200.
    pub async fn configure_transfer(
        &mut self,
        params: &TransferParams,
        strict: bool,
    ) -> Result<(), FtpClientError> {
        for command in params.commands() {
            let reply = self.exchange(&command).await?;
            if reply.code == COMMAND_OK {
                continue;
            }
            if strict {
                return Err(FtpClientError::UnexpectedReply {
                    context: format!("server rejected {command}"),
                    reply,
                });
            }
            warn!("{command} not acknowledged: {reply}");
        }
        Ok(())
    }

    /// Sends QUIT, reads the goodbye and closes the socket.
    ///
    /// The socket is closed whatever the server answers. On a session that is
    /// already closed nothing is sent and `Ok(None)` is returned.
    pub async fn terminate(mut self) -> Result<Option<Reply>, FtpClientError> {
        if !self.is_open() {
            debug!("Control connection already closed, skipping QUIT");
            return Ok(None);
        }

        let result = self.exchange(&Command::QUIT).await;

        if let Some(mut stream) = self.stream.take() {
            if let Err(e) = stream.shutdown().await {
                debug!("Control socket shutdown failed: {e}");
            }
        }

        let reply = result?;
        if reply.code != CLOSING_CONTROL {
            warn!("Unexpected reply to QUIT: {reply}");
        }
        Ok(Some(reply))
    }

    /// Drops the socket after an unrecoverable failure on it.
    fn fail(&mut self, err: FtpClientError) -> FtpClientError {
        if err.breaks_control() && self.stream.take().is_some() {
            warn!("Control connection lost: {err}");
        }
        err
    }
}
