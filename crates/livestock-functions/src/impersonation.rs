//! Admin impersonation audit handler.
//!
//! An admin starts or stops viewing the portal as another user. The session
//! switch itself happens client-side; this handler only authorizes the
//! request and writes the audit trail.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use livestock_core::models::{format_timestamp, AdminAuditEntry, Role};
use livestock_core::Database;

use crate::error::{FunctionError, FunctionResult};
use crate::response::FunctionResponse;

pub const ACTION_START: &str = "impersonation_start";
pub const ACTION_STOP: &str = "impersonation_stop";

/// Requested impersonation change.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ImpersonationAction {
    Start,
    Stop,
}

impl ImpersonationAction {
    fn audit_action(&self) -> &'static str {
        match self {
            ImpersonationAction::Start => ACTION_START,
            ImpersonationAction::Stop => ACTION_STOP,
        }
    }
}

/// Request body.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ImpersonationRequest {
    #[serde(default)]
    pub target_user_id: Option<String>,
    pub action: ImpersonationAction,
}

/// Success body.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ImpersonationOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub impersonated_user_id: Option<String>,
    pub message: String,
}

/// Handle one request. Every failure becomes a 400 with `{"error": ...}`.
pub fn handle_impersonation(
    db: &Database,
    authorization: Option<&str>,
    body: &str,
    now: DateTime<Utc>,
) -> FunctionResponse {
    match impersonate(db, authorization, body, now) {
        Ok(outcome) => FunctionResponse::ok(&outcome),
        Err(e) => {
            tracing::warn!(error = %e, "impersonation request rejected");
            FunctionResponse::error(&e)
        }
    }
}

fn impersonate(
    db: &Database,
    authorization: Option<&str>,
    body: &str,
    now: DateTime<Utc>,
) -> FunctionResult<ImpersonationOutcome> {
    let admin_id = authenticate_admin(db, authorization, now)?;
    let request: ImpersonationRequest = serde_json::from_str(body)?;

    let target = request
        .target_user_id
        .filter(|t| !t.trim().is_empty());
    if request.action == ImpersonationAction::Start && target.is_none() {
        return Err(FunctionError::BadRequest("targetUserId is required".into()));
    }

    let mut entry = AdminAuditEntry::new(
        admin_id.clone(),
        request.action.audit_action(),
        target.clone(),
    );
    entry.created_at = format_timestamp(now);
    entry.details = json!({
        "action": request.action,
        "timestamp": entry.created_at,
    });
    db.insert_audit_entry(&entry)?;

    tracing::info!(
        admin = %admin_id,
        target = ?target,
        action = entry.action.as_str(),
        "impersonation audited"
    );

    Ok(match request.action {
        ImpersonationAction::Start => ImpersonationOutcome {
            success: true,
            impersonated_user_id: target,
            message: "Impersonation started".into(),
        },
        ImpersonationAction::Stop => ImpersonationOutcome {
            success: true,
            impersonated_user_id: None,
            message: "Impersonation stopped".into(),
        },
    })
}

/// Resolve the bearer token and require the admin role.
fn authenticate_admin(
    db: &Database,
    authorization: Option<&str>,
    now: DateTime<Utc>,
) -> FunctionResult<String> {
    let header = authorization
        .map(str::trim)
        .filter(|h| !h.is_empty())
        .ok_or(FunctionError::MissingAuthorization)?;
    let token = header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(FunctionError::InvalidToken)?;

    let user_id = db
        .resolve_session(token, &format_timestamp(now))?
        .ok_or(FunctionError::InvalidToken)?;

    match db.get_user_role(&user_id)? {
        Some(Role::Admin) => Ok(user_id),
        _ => Err(FunctionError::Forbidden),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    fn setup_db() -> Database {
        let db = Database::open_in_memory().unwrap();
        db.insert_session("admin-token", "admin-1", "2024-03-02T00:00:00Z")
            .unwrap();
        db.set_user_role("admin-1", Role::Admin).unwrap();
        db.insert_session("farmer-token", "farmer-1", "2024-03-02T00:00:00Z")
            .unwrap();
        db.set_user_role("farmer-1", Role::Farmer).unwrap();
        db
    }

    #[test]
    fn test_start_writes_audit_entry() {
        let db = setup_db();
        let response = handle_impersonation(
            &db,
            Some("Bearer admin-token"),
            r#"{"targetUserId":"farmer-1","action":"start"}"#,
            now(),
        );

        assert_eq!(response.status, 200);
        assert_eq!(response.body["success"], true);
        assert_eq!(response.body["impersonatedUserId"], "farmer-1");

        let entries = db.list_audit_entries("admin-1").unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].action, ACTION_START);
        assert_eq!(entries[0].target_user_id.as_deref(), Some("farmer-1"));
        assert_eq!(entries[0].created_at, "2024-03-01T12:00:00Z");
    }

    #[test]
    fn test_stop_omits_impersonated_user() {
        let db = setup_db();
        let response = handle_impersonation(
            &db,
            Some("Bearer admin-token"),
            r#"{"targetUserId":"farmer-1","action":"stop"}"#,
            now(),
        );

        assert_eq!(response.status, 200);
        assert!(response.body.get("impersonatedUserId").is_none());
        assert_eq!(db.list_audit_entries("admin-1").unwrap()[0].action, ACTION_STOP);
    }

    #[test]
    fn test_rejections_are_400_without_audit() {
        let db = setup_db();
        let body = r#"{"targetUserId":"farmer-1","action":"start"}"#;

        for auth in [
            None,
            Some("admin-token"),
            Some("Bearer nope"),
            Some("Bearer farmer-token"),
        ] {
            let response = handle_impersonation(&db, auth, body, now());
            assert_eq!(response.status, 400, "auth {:?}", auth);
            assert!(response.body["error"].is_string());
        }

        assert!(db.list_audit_entries("admin-1").unwrap().is_empty());
    }

    #[test]
    fn test_expired_session_rejected() {
        let db = setup_db();
        let later = Utc.with_ymd_and_hms(2024, 3, 3, 0, 0, 0).unwrap();
        let response = handle_impersonation(
            &db,
            Some("Bearer admin-token"),
            r#"{"targetUserId":"farmer-1","action":"start"}"#,
            later,
        );
        assert_eq!(response.body["error"], "Invalid or expired token");
    }

    #[test]
    fn test_bad_body() {
        let db = setup_db();
        for body in ["not json", r#"{"action":"pause"}"#, r#"{"action":"start"}"#] {
            let response = handle_impersonation(&db, Some("Bearer admin-token"), body, now());
            assert_eq!(response.status, 400, "body {}", body);
        }
    }
}
