//! Granted authorities.
//!
//! Authorities arrive in the `auth` claim of the caller's token as a
//! comma-separated list such as `ROLE_ADMIN,ROLE_USER`.

use std::collections::BTreeSet;
use std::fmt;

/// A named capability a caller may hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Authority {
    /// May create cities
    Admin,
    /// May update cities
    Editor,
    /// Any signed-in user
    User,
}

pub const ROLE_ADMIN: &str = "ROLE_ADMIN";
pub const ROLE_EDITOR: &str = "ROLE_EDITOR";
pub const ROLE_USER: &str = "ROLE_USER";

impl Authority {
    pub fn as_str(self) -> &'static str {
        match self {
            Authority::Admin => ROLE_ADMIN,
            Authority::Editor => ROLE_EDITOR,
            Authority::User => ROLE_USER,
        }
    }

    /// Parse a single authority name. Unknown names yield `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim() {
            ROLE_ADMIN => Some(Authority::Admin),
            ROLE_EDITOR => Some(Authority::Editor),
            ROLE_USER => Some(Authority::User),
            _ => None,
        }
    }
}

impl fmt::Display for Authority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The set of authorities granted to one caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Authorities(BTreeSet<Authority>);

impl Authorities {
    /// Parse a comma-separated claim, skipping names this service does not know.
    pub fn parse_claim(claim: &str) -> Self {
        Self(claim.split(',').filter_map(Authority::from_name).collect())
    }

    pub fn contains(&self, authority: Authority) -> bool {
        self.0.contains(&authority)
    }

    /// Render back to the claim format.
    pub fn to_claim(&self) -> String {
        self.0
            .iter()
            .map(|a| a.as_str())
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl FromIterator<Authority> for Authorities {
    fn from_iter<I: IntoIterator<Item = Authority>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
