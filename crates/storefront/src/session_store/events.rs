use crate::model::AccessToken;

/// Announcements of the session store, broadcast to whoever wires stores together.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// A register or login succeeded with `token`.
    Authenticated { token: AccessToken },
    LoggedOut,
}
