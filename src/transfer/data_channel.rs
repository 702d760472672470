//! Module `data_channel`
//!
//! The data connection for a single listing or file transfer. It is opened
//! to the endpoint decoded from the PASV reply, carries raw bytes in one
//! direction until either side is exhausted, and is closed before the final
//! control reply is read.

use log::{debug, info, trace};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpStream;

use crate::error::{FtpClientError, LocalError, TransferError};
use crate::transfer::passive::Endpoint;

/// One open data connection
pub struct DataChannel {
    stream: TcpStream,
    endpoint: Endpoint,
}

impl DataChannel {
    /// Connects to the negotiated endpoint.
    pub async fn open(endpoint: Endpoint) -> Result<Self, TransferError> {
        let stream = TcpStream::connect(endpoint.socket_addr())
            .await
            .map_err(|source| TransferError::ConnectFailed {
                endpoint: endpoint.to_string(),
                source,
            })?;

        debug!("Data connection open to {endpoint}");
        Ok(Self { stream, endpoint })
    }

    /// Reads the connection until the server closes it, appending every chunk
    /// to `sink`. Returns the number of bytes received.
    pub async fn drain_to_sink<W>(
        &mut self,
        sink: &mut W,
        chunk_size: usize,
    ) -> Result<u64, FtpClientError>
    where
        W: AsyncWrite + Unpin + ?Sized,
    {
        let mut buffer = vec![0u8; chunk_size];
        let mut total_bytes_received = 0u64;

        loop {
            let n = self
                .stream
                .read(&mut buffer)
                .await
                .map_err(TransferError::ReadFailed)?;
            if n == 0 {
                break;
            }

            sink.write_all(&buffer[..n])
                .await
                .map_err(LocalError::Write)?;
            total_bytes_received += n as u64;
            trace!("Received {n} bytes ({total_bytes_received} total) from {}", self.endpoint);
        }

        sink.flush().await.map_err(LocalError::Write)?;

        info!("Received {total_bytes_received} bytes on data connection");
        Ok(total_bytes_received)
    }

    /// Reads `source` until it is exhausted, writing every chunk to the
    /// connection. Returns the number of bytes sent.
    pub async fn drain_from_source<R>(
        &mut self,
        source: &mut R,
        chunk_size: usize,
    ) -> Result<u64, FtpClientError>
    where
        R: AsyncRead + Unpin + ?Sized,
    {
        let mut buffer = vec![0u8; chunk_size];
        let mut total_bytes_sent = 0u64;

        loop {
            let n = source.read(&mut buffer).await.map_err(LocalError::Read)?;
            if n == 0 {
                break;
            }

            self.stream
                .write_all(&buffer[..n])
                .await
                .map_err(TransferError::WriteFailed)?;
            total_bytes_sent += n as u64;
            trace!("Sent {n} bytes ({total_bytes_sent} total) to {}", self.endpoint);
        }

        self.stream
            .flush()
            .await
            .map_err(TransferError::WriteFailed)?;

        info!("Sent {total_bytes_sent} bytes on data connection");
        Ok(total_bytes_sent)
    }

    /// Closes the connection. The write side is shut down first so the
    /// server sees end-of-file on uploads.
    pub async fn close(mut self) {
        if let Err(e) = self.stream.shutdown().await {
            debug!("Data connection shutdown failed: {e}");
        }
        debug!("Data connection to {} closed", self.endpoint);
    }
}
