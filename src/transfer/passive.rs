//! Passive mode negotiation
//!
//! Sends PASV and decodes the `(h1,h2,h3,h4,p1,p2)` group of the 227 reply
//! into the endpoint the data connection must be opened to.

use std::fmt;
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};

use log::debug;
use tokio::io::{AsyncRead, AsyncWrite};

use crate::error::{FtpClientError, ProtocolError};
use crate::protocol::Command;
use crate::protocol::responses::ENTERING_PASSIVE;
use crate::session::ControlSession;

/// Address and port designated by the server for the data connection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    pub address: Ipv4Addr,
    pub port: u16,
}

impl Endpoint {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::V4(SocketAddrV4::new(self.address, self.port))
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.address, self.port)
    }
}

/// Decodes the endpoint from the text of a passive-mode reply.
///
/// Takes the segment between the first `(` and the first `)` after it. It
/// must hold exactly six comma-separated numbers: four address octets, then
/// the port as high byte and low byte.
pub fn parse_passive_reply(text: &str) -> Result<Endpoint, ProtocolError> {
    let missing = || ProtocolError::MissingPassiveAddress(text.to_string());

    let start = text.find('(').ok_or_else(missing)?;
    let end = text[start + 1..]
        .find(')')
        .map(|offset| start + 1 + offset)
        .ok_or_else(missing)?;

    let fields: Vec<&str> = text[start + 1..end].split(',').map(str::trim).collect();
    if fields.len() != 6 {
        return Err(ProtocolError::PassiveFieldCount {
            count: fields.len(),
            text: text.to_string(),
        });
    }

    let mut octets = [0u8; 6];
    for (slot, field) in octets.iter_mut().zip(&fields) {
        *slot = field
            .parse::<u8>()
            .map_err(|_| ProtocolError::MalformedPassive {
                field: field.to_string(),
                text: text.to_string(),
            })?;
    }

    Ok(Endpoint {
        address: Ipv4Addr::new(octets[0], octets[1], octets[2], octets[3]),
        port: (u16::from(octets[4]) << 8) | u16::from(octets[5]),
    })
}

/// Issues PASV on the session and returns the decoded endpoint.
///
/// Anything but a 227 reply fails the negotiation; no fallback is tried.
pub async fn negotiate_passive<S>(
    session: &mut ControlSession<S>,
) -> Result<Endpoint, FtpClientError>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let reply = session.exchange(&Command::PASV).await?;
    if reply.code != ENTERING_PASSIVE {
        return Err(FtpClientError::UnexpectedReply {
            context: "passive mode refused".into(),
            reply,
        });
    }

    let endpoint = parse_passive_reply(&reply.message)?;
    debug!("Passive endpoint: {endpoint}");
    Ok(endpoint)
}
