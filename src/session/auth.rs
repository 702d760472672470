//! Login handshake
//!
//! USER/PASS exchange modelled as a small state machine so the transition
//! rules can be checked without a server.

use crate::protocol::Reply;
use crate::protocol::responses::{LOGIN_SUCCESS, PASSWORD_REQUIRED};

/// Position in the USER/PASS handshake.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    AwaitingUserReply,
    AwaitingPassReply,
    Authenticated,
    Failed,
}

impl AuthState {
    /// Advances the handshake with the reply just received.
    ///
    /// 331 after USER asks for a password; 230 at either step logs in.
    /// Anything else fails, and terminal states never move.
    pub fn next(self, reply: &Reply) -> AuthState {
        match (self, reply.code) {
            (AuthState::AwaitingUserReply, PASSWORD_REQUIRED) => AuthState::AwaitingPassReply,
            (AuthState::AwaitingUserReply | AuthState::AwaitingPassReply, LOGIN_SUCCESS) => {
                AuthState::Authenticated
            }
            (AuthState::Authenticated, _) => AuthState::Authenticated,
            _ => AuthState::Failed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reply(code: u16) -> Reply {
        Reply::new(code, "")
    }

    #[test]
    fn test_user_accepted_without_password() {
        assert_eq!(
            AuthState::AwaitingUserReply.next(&reply(230)),
            AuthState::Authenticated
        );
    }

    #[test]
    fn test_password_round() {
        let state = AuthState::AwaitingUserReply.next(&reply(331));
        assert_eq!(state, AuthState::AwaitingPassReply);
        assert_eq!(state.next(&reply(230)), AuthState::Authenticated);
        assert_eq!(state.next(&reply(530)), AuthState::Failed);
        assert_eq!(state.next(&reply(331)), AuthState::Failed);
    }

    #[test]
    fn test_unexpected_user_reply_fails() {
        for code in [332, 421, 500, 530] {
            assert_eq!(AuthState::AwaitingUserReply.next(&reply(code)), AuthState::Failed);
        }
        assert_eq!(AuthState::Failed.next(&reply(230)), AuthState::Failed);
    }
}
