use std::fmt::{Display, Formatter};

use serde::Deserialize;

/// Describe the possible ways to authenticate oneself
///
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(untagged)]
pub enum Auth {
    /// Nothing special, no auth
    #[default]
    Anon,
    /// Using plain login/password
    Login { username: String, password: String },
}

impl Auth {
    /// Build from optional parts, both must be present and non-empty.
    ///
    pub fn from_parts(username: Option<String>, password: Option<String>) -> Self {
        match (username, password) {
            (Some(username), Some(password)) if !username.is_empty() && !password.is_empty() => {
                Auth::Login { username, password }
            }
            _ => Auth::Anon,
        }
    }
}

impl Display for Auth {
    /// Obfuscate the passwords
    ///
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Auth::Anon => write!(f, "anonymous"),
            Auth::Login { username, .. } => write!(f, "{username}:HIDDEN"),
        }
    }
}
