use std::fmt;
use std::str::FromStr;

/// Identifier of an agency member or client. Stored as the 26-character ULID text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserId(ulid::Ulid);

impl UserId {
    pub fn new() -> Self {
        Self(ulid::Ulid::new())
    }

    /// Text form used in the users table and in session rows.
    pub fn as_str(&self) -> String {
        self.0.to_string()
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for UserId {
    type Err = ulid::DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ulid::Ulid::from_string(s).map(Self)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}
