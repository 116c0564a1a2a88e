//! User domain entity and its public projections

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use social_shared::UserId;
use validator::Validate;

/// Full user record as shown to the owner or to a permitted viewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    #[serde(rename = "firstname")]
    pub first_name: String,
    #[serde(rename = "lastname")]
    pub last_name: String,
    pub date_of_birth: Option<String>,
    pub bio: String,
    pub is_private: bool,
    pub created_at: DateTime<Utc>,
}

/// What a viewer without full access may see of a private profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitedUser {
    pub id: UserId,
    pub username: String,
    pub firstname: String,
    pub lastname: String,
    pub is_private: bool,
}

impl From<&User> for LimitedUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            firstname: user.first_name.clone(),
            lastname: user.last_name.clone(),
            is_private: user.is_private,
        }
    }
}

/// Entry of a follower / following list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: UserId,
    pub username: String,
    pub firstname: String,
    pub lastname: String,
}

/// Stored login credentials; never serialized.
#[derive(Debug, Clone)]
pub struct UserCredentials {
    pub user_id: UserId,
    pub password_hash: String,
}

/// Registration input.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewUser {
    #[validate(length(min = 2, max = 50, message = "Username must be 2-50 characters"))]
    pub username: String,

    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    pub password: String,

    #[serde(rename = "firstname")]
    #[validate(length(min = 1, message = "First name is required"))]
    pub first_name: String,

    #[serde(rename = "lastname")]
    #[validate(length(min = 1, message = "Last name is required"))]
    pub last_name: String,

    #[validate(length(min = 1, message = "Date of birth is required"))]
    pub date_of_birth: String,

    #[serde(default)]
    pub bio: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User {
            id: 9,
            username: "nora".to_string(),
            email: "nora@example.com".to_string(),
            first_name: "Nora".to_string(),
            last_name: "Lind".to_string(),
            date_of_birth: Some("1994-03-02".to_string()),
            bio: "private person".to_string(),
            is_private: true,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_limited_projection_drops_private_fields() {
        let limited = LimitedUser::from(&user());
        let json = serde_json::to_value(&limited).unwrap();

        assert_eq!(json["id"], 9);
        assert_eq!(json["username"], "nora");
        assert_eq!(json["firstname"], "Nora");
        assert_eq!(json["lastname"], "Lind");
        assert_eq!(json["is_private"], true);
        assert!(json.get("email").is_none());
        assert!(json.get("bio").is_none());
    }

    #[test]
    fn test_new_user_validation() {
        let mut input = NewUser {
            username: "nora".to_string(),
            email: "nora@example.com".to_string(),
            password: "irrelevant-here".to_string(),
            first_name: "Nora".to_string(),
            last_name: "Lind".to_string(),
            date_of_birth: "1994-03-02".to_string(),
            bio: String::new(),
        };
        assert!(input.validate().is_ok());

        input.email = "not-an-email".to_string();
        assert!(input.validate().is_err());
    }
}
