//! User domain entity and related types.

use serde::{Deserialize, Serialize};

/// User domain entity
///
/// `id` stays `None` until a store persists the user and assigns one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Option<i64>,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl User {
    /// Create a new, not yet persisted user
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            email: email.into(),
            phone: None,
        }
    }

    /// Set the phone number
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Check whether a store has assigned an identity
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Apply a partial update. Identity is never touched.
    pub fn apply(&mut self, changes: UserChanges) {
        if let Some(name) = changes.name {
            self.name = name;
        }
        if let Some(email) = changes.email {
            self.email = email;
        }
        if let Some(phone) = changes.phone {
            // empty clears
            self.phone = if phone.is_empty() { None } else { Some(phone) };
        }
    }
}

/// User creation data transfer object
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    /// Display name
    pub name: String,
    /// Email address, expected to be unique
    pub email: String,
    /// Optional phone number
    #[serde(default)]
    pub phone: Option<String>,
}

impl From<NewUser> for User {
    fn from(new: NewUser) -> Self {
        User {
            id: None,
            name: new.name,
            email: new.email,
            phone: new.phone.filter(|p| !p.is_empty()),
        }
    }
}

/// User update data transfer object
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserChanges {
    /// New display name
    pub name: Option<String>,
    /// New email address
    pub email: Option<String>,
    /// New phone number, empty string removes it
    pub phone: Option<String>,
}

impl UserChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.phone.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_keeps_identity() {
        let mut user = User::new("Ann", "ann@example.com").with_phone("555-0100");
        user.id = Some(7);

        user.apply(UserChanges {
            name: Some("Anne".to_string()),
            email: None,
            phone: Some(String::new()),
        });

        assert_eq!(user.id, Some(7));
        assert_eq!(user.name, "Anne");
        assert_eq!(user.email, "ann@example.com");
        assert_eq!(user.phone, None);
    }

    #[test]
    fn test_new_user_drops_empty_phone() {
        let user = User::from(NewUser {
            name: "Bob".to_string(),
            email: "bob@example.com".to_string(),
            phone: Some(String::new()),
        });

        assert!(!user.is_persisted());
        assert_eq!(user.phone, None);
    }

    #[test]
    fn test_serialize_skips_missing_phone() {
        let json = serde_json::to_value(User::new("Cy", "cy@example.com")).unwrap();
        assert_eq!(json["email"], "cy@example.com");
        assert!(json.get("phone").is_none());
    }

    #[test]
    fn test_empty_changes() {
        assert!(UserChanges::default().is_empty());
        assert!(!UserChanges {
            phone: Some(String::new()),
            ..Default::default()
        }
        .is_empty());
    }
}
