//! Reply line reader
//!
//! Pulls one CRLF-terminated line off the control connection.

use tokio::io::{AsyncRead, AsyncReadExt};

/// Line terminator used on the control channel.
pub const CRLF: &[u8] = b"\r\n";

/// Reads from `reader` one byte at a time until CR LF has been seen or the
/// source reports end of input.
///
/// The returned text includes the delimiter. When the peer closes before a
/// delimiter arrives, whatever was accumulated is returned as-is (possibly
/// empty); callers treat such a line as a closed connection, not a reply.
pub async fn read_reply_line<R>(reader: &mut R) -> std::io::Result<String>
where
    R: AsyncRead + Unpin + ?Sized,
{
    let mut line = Vec::new();
    let mut byte = [0u8; 1];

    while !line.ends_with(CRLF) {
        if reader.read(&mut byte).await? == 0 {
            break;
        }
        line.push(byte[0]);
    }

    Ok(String::from_utf8_lossy(&line).into_owned())
}
