use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// User role enum. Decides which records a user may see and change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, sqlx::Type)]
#[serde(rename_all = "lowercase")] // Serialize as lowercase string
#[strum(serialize_all = "lowercase")] // Display/FromStr as lowercase string
#[sqlx(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Staff,
    Client,
}

impl UserRole {
    /// Agency-side roles see every project and hidden records.
    pub fn is_agency(self) -> bool {
        match self {
            UserRole::Admin | UserRole::Staff => true,
            UserRole::Client => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn roles_round_trip_lowercase() {
        assert_eq!(UserRole::Staff.to_string(), "staff");
        assert_eq!(UserRole::from_str("client").unwrap(), UserRole::Client);
    }

    #[test]
    fn only_client_is_external() {
        assert!(UserRole::Admin.is_agency());
        assert!(UserRole::Staff.is_agency());
        assert!(!UserRole::Client.is_agency());
    }
}
