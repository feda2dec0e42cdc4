//! User types.

use serde::{Deserialize, Serialize};
use shop_commerce::UserId;
use std::str::FromStr;

/// User role as the backend reports it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[default]
    Customer,
    Staff,
    Admin,
    /// Any role this client does not know about.
    #[serde(other)]
    Other,
}

impl Role {
    /// Get role as string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Customer => "customer",
            Role::Staff => "staff",
            Role::Admin => "admin",
            Role::Other => "other",
        }
    }

    /// Check if the role can see the admin area.
    pub fn is_staff(&self) -> bool {
        matches!(self, Role::Staff | Role::Admin)
    }
}

impl FromStr for Role {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "customer" => Ok(Role::Customer),
            "staff" => Ok(Role::Staff),
            "admin" => Ok(Role::Admin),
            _ => Err(()),
        }
    }
}

/// A signed-in user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: UserId,
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default, alias = "phone_number", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl User {
    /// First and last name, trimmed. Empty when neither is set.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
            .trim()
            .to_string()
    }

    /// Name to greet the user with: the full name, else the email.
    pub fn display_name(&self) -> String {
        let name = self.full_name();
        if name.is_empty() {
            self.email.clone()
        } else {
            name
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_from_api() {
        let user: User = serde_json::from_value(json!({
            "id": 4,
            "email": "ada@example.com",
            "first_name": "Ada",
            "last_name": "Lovelace",
            "role": "customer",
            "phone_number": null
        }))
        .unwrap();
        assert_eq!(user.id, UserId::new("4"));
        assert_eq!(user.display_name(), "Ada Lovelace");
        assert_eq!(user.phone, None);
    }

    #[test]
    fn test_unknown_role() {
        let user: User = serde_json::from_value(json!({
            "id": "u1",
            "email": "x@example.com",
            "role": "vendor"
        }))
        .unwrap();
        assert_eq!(user.role, Role::Other);
        assert_eq!(user.display_name(), "x@example.com");
    }

    #[test]
    fn test_role_parsing() {
        assert_eq!("admin".parse::<Role>(), Ok(Role::Admin));
        assert!("root".parse::<Role>().is_err());
        assert!(Role::Staff.is_staff());
        assert!(!Role::Customer.is_staff());
    }
}
