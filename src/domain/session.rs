// User session domain models
use chrono::NaiveDateTime;
use std::collections::BTreeMap;

/// Profile returned by the server on login.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UserProfile {
    pub name: String,
    pub company: String,
    /// Any further profile fields, stringified.
    pub attributes: BTreeMap<String, String>,
}

impl UserProfile {
    pub fn new(name: String, company: String) -> Self {
        Self {
            name,
            company,
            attributes: BTreeMap::new(),
        }
    }

    pub fn display_line(&self) -> String {
        format!("{} | {}", self.name, self.company)
    }
}

/// Authenticated session. Exists from a successful login until logout.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub user: UserProfile,
    pub phone: String,
    pub started_at: NaiveDateTime,
}

impl Session {
    pub fn new(user: UserProfile, phone: String, started_at: NaiveDateTime) -> Self {
        Self {
            user,
            phone,
            started_at,
        }
    }
}
