use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Employee,
    Therapist,
}

impl Role {
    /// Human-readable label shown on the profile screen.
    pub fn label(self) -> &'static str {
        match self {
            Role::Student => "Student",
            Role::Employee => "University Staff",
            Role::Therapist => "Therapist",
        }
    }

    /// Only students and university staff book appointments.
    pub fn can_book_appointments(self) -> bool {
        matches!(self, Role::Student | Role::Employee)
    }
}

/// The authenticated session record. Never carries the password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_therapist_id: Option<String>,
}

/// An entry of the credential table, keyed by normalized email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub name: String,
    pub password: String,
    pub role: Role,
}

impl Credential {
    pub fn to_user(&self, email: &str) -> User {
        User {
            name: self.name.clone(),
            email: email.to_string(),
            role: self.role,
            selected_therapist_id: None,
        }
    }
}

/// Lowercases and trims an email so it can be used as the account key.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
