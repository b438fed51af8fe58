// Screen navigation and session ownership
use crate::domain::session::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenId {
    Login,
    Register,
    Main,
    History,
}

impl ScreenId {
    pub fn name(self) -> &'static str {
        match self {
            ScreenId::Login => "login",
            ScreenId::Register => "register",
            ScreenId::Main => "main",
            ScreenId::History => "history",
        }
    }

    pub fn requires_session(self) -> bool {
        matches!(self, ScreenId::Main | ScreenId::History)
    }
}

/// Single current-screen pointer plus the session, if any. No back-stack.
#[derive(Debug)]
pub struct Navigator {
    current: ScreenId,
    session: Option<Session>,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator {
    pub fn new() -> Self {
        Self {
            current: ScreenId::Login,
            session: None,
        }
    }

    pub fn current(&self) -> ScreenId {
        self.current
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Switch screens. Screens that need a session fall back to login without one.
    pub fn go(&mut self, target: ScreenId) -> ScreenId {
        if target.requires_session() && self.session.is_none() {
            tracing::warn!("No session, redirecting {} to login", target.name());
            self.current = ScreenId::Login;
        } else {
            self.current = target;
        }
        self.current
    }

    pub fn sign_in(&mut self, session: Session) {
        self.session = Some(session);
        self.current = ScreenId::Main;
    }

    /// Drop the session and return to login.
    pub fn sign_out(&mut self) -> Option<Session> {
        self.current = ScreenId::Login;
        self.session.take()
    }
}
