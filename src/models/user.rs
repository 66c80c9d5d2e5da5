use serde::{Deserialize, Serialize};

/// Store-assigned user identifier (auto-increment, never reused)
pub type UserId = u64;

/// User record stored in redb, keyed by [`UserId`]
/// Both fields are kept in their normalized form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub name: String,
    /// Trimmed and lowercased; the email index relies on it
    pub email: String,
}

/// User model handed to the service and view layers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
}

impl User {
    pub fn from_record(id: UserId, record: UserRecord) -> Self {
        Self {
            id,
            name: record.name,
            email: record.email,
        }
    }

    /// Uppercased first character of the name, shown as the list avatar
    pub fn initial(&self) -> Option<char> {
        self.name.chars().next().and_then(|c| c.to_uppercase().next())
    }
}
