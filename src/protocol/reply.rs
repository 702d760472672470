//! FTP reply parsing
//!
//! A reply is a 3-digit status code plus free text, carried on one
//! CRLF-terminated line. Multi-line continuation replies are not supported.

use std::fmt;

use log::debug;

use crate::error::ProtocolError;

/// Parsed reply from the server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    /// Status code (e.g., 230, 530, 331)
    pub code: u16,

    /// Text following the code (e.g., "User logged in, proceed")
    pub message: String,
}

impl Reply {
    pub fn new(code: u16, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Parses a raw line as returned by `read_reply_line`.
    ///
    /// An empty line means the peer closed the connection. A line without
    /// its CRLF terminator is a truncated reply.
    pub fn parse(line: &str) -> Result<Self, ProtocolError> {
        if line.is_empty() {
            return Err(ProtocolError::ConnectionClosed);
        }

        let body = line
            .strip_suffix("\r\n")
            .ok_or_else(|| ProtocolError::MissingDelimiter(line.to_string()))?;

        let bytes = body.as_bytes();
        if bytes.len() < 3 || !bytes[..3].iter().all(u8::is_ascii_digit) {
            return Err(ProtocolError::MalformedReply(body.to_string()));
        }
        if bytes.len() > 3 && !matches!(bytes[3], b' ' | b'-') {
            return Err(ProtocolError::MalformedReply(body.to_string()));
        }

        let code = body[..3]
            .parse::<u16>()
            .map_err(|_| ProtocolError::MalformedReply(body.to_string()))?;
        let message = body.get(4..).unwrap_or_default().to_string();

        debug!("Parsed reply: code={code}, message='{message}'");

        Ok(Self::new(code, message))
    }

    /// 2xx: the action completed.
    pub fn is_positive(&self) -> bool {
        (200..300).contains(&self.code)
    }
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.message.is_empty() {
            write!(f, "{}", self.code)
        } else {
            write!(f, "{} {}", self.code, self.message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_reply() {
        let reply = Reply::parse("230 User logged in, proceed\r\n").unwrap();
        assert_eq!(reply.code, 230);
        assert_eq!(reply.message, "User logged in, proceed");
        assert!(reply.is_positive());
    }

    #[test]
    fn test_parse_code_only() {
        let reply = Reply::parse("200\r\n").unwrap();
        assert_eq!(reply, Reply::new(200, ""));
        assert_eq!(reply.to_string(), "200");
    }

    #[test]
    fn test_parse_dash_separator() {
        let reply = Reply::parse("220-Welcome\r\n").unwrap();
        assert_eq!(reply.code, 220);
        assert_eq!(reply.message, "Welcome");
    }

    #[test]
    fn test_empty_line_means_closed() {
        assert!(matches!(
            Reply::parse(""),
            Err(ProtocolError::ConnectionClosed)
        ));
    }

    #[test]
    fn test_truncated_line() {
        assert!(matches!(
            Reply::parse("226 Transfer"),
            Err(ProtocolError::MissingDelimiter(_))
        ));
    }

    #[test]
    fn test_malformed_codes() {
        for line in ["\r\n", "22\r\n", "abc Hello\r\n", "2x0 Hello\r\n", "2000 Hello\r\n"] {
            assert!(
                matches!(Reply::parse(line), Err(ProtocolError::MalformedReply(_))),
                "{line:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_reply_classes() {
        assert!(Reply::new(226, "").is_positive());
        assert!(!Reply::new(150, "").is_positive());
        assert!(!Reply::new(331, "").is_positive());
        assert!(!Reply::new(550, "").is_positive());
    }
}
