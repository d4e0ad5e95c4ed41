//! User directory records.

use serde::{Deserialize, Serialize};

/// A person who can manage projects and be assigned tasks.
///
/// Users never change once created; projects and tasks refer to them by id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

/// Input for registering a new user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub avatar: Option<String>,
}

impl User {
    pub fn from_draft(id: String, draft: UserDraft) -> Self {
        User {
            id,
            first_name: draft.first_name,
            last_name: draft.last_name,
            email: draft.email,
            avatar: draft.avatar,
        }
    }

    /// "First Last".
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Two-letter initials used where there is no room for the full name.
    pub fn initials(&self) -> String {
        self.first_name
            .chars()
            .take(1)
            .chain(self.last_name.chars().take(1))
            .collect::<String>()
            .to_uppercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names() {
        let user = User {
            id: "7".into(),
            first_name: "jane".into(),
            last_name: "Smith".into(),
            email: "jane@example.com".into(),
            avatar: None,
        };
        assert_eq!(user.full_name(), "jane Smith");
        assert_eq!(user.initials(), "JS");
    }
}
