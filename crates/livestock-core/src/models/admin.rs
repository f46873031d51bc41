//! Admin console models: roles, sessions and the audit log.

use serde::{Deserialize, Serialize};

use super::timestamp_now;

/// Role granted to a portal account.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Moderator,
    Farmer,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Moderator => "moderator",
            Role::Farmer => "farmer",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "admin" => Some(Role::Admin),
            "moderator" => Some(Role::Moderator),
            "farmer" => Some(Role::Farmer),
            _ => None,
        }
    }
}

/// One row of the admin audit log.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AdminAuditEntry {
    pub id: String,
    /// Admin who performed the action
    pub admin_id: String,
    /// Action name (e.g., "impersonation_start")
    pub action: String,
    pub target_user_id: Option<String>,
    /// Free-form JSON details
    pub details: serde_json::Value,
    pub created_at: String,
}

impl AdminAuditEntry {
    /// Create a new audit entry stamped now.
    pub fn new(admin_id: String, action: &str, target_user_id: Option<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            admin_id,
            action: action.to_string(),
            target_user_id,
            details: serde_json::Value::Object(Default::default()),
            created_at: timestamp_now(),
        }
    }
}
