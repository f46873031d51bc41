//! Roles, sessions and the admin audit log.

use rusqlite::{params, OptionalExtension};

use super::{tables, Database, DbError, DbResult};
use crate::feed::ChangeKind;
use crate::models::{AdminAuditEntry, Role};

impl Database {
    // =========================================================================
    // Roles
    // =========================================================================

    /// Grant `role` to a user, replacing any previous role.
    pub fn set_user_role(&self, user_id: &str, role: Role) -> DbResult<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO user_roles (user_id, role) VALUES (?1, ?2)",
            params![user_id, role.as_str()],
        )?;
        Ok(())
    }

    /// Role of a user, if one has been granted.
    pub fn get_user_role(&self, user_id: &str) -> DbResult<Option<Role>> {
        let role: Option<String> = self
            .conn
            .query_row(
                "SELECT role FROM user_roles WHERE user_id = ?",
                [user_id],
                |row| row.get(0),
            )
            .optional()?;

        match role {
            None => Ok(None),
            Some(r) => Role::parse(&r)
                .map(Some)
                .ok_or_else(|| DbError::Constraint(format!("unknown role '{}'", r))),
        }
    }

    // =========================================================================
    // Sessions
    // =========================================================================

    /// Record a bearer token for a user, valid until `expires_at`.
    pub fn insert_session(&self, token: &str, user_id: &str, expires_at: &str) -> DbResult<()> {
        self.conn.execute(
            "INSERT INTO sessions (token, user_id, expires_at) VALUES (?1, ?2, ?3)",
            params![token, user_id, expires_at],
        )?;
        Ok(())
    }

    /// User a token belongs to, if the token exists and has not expired at `now`.
    pub fn resolve_session(&self, token: &str, now: &str) -> DbResult<Option<String>> {
        self.conn
            .query_row(
                "SELECT user_id FROM sessions WHERE token = ?1 AND expires_at > ?2",
                params![token, now],
                |row| row.get(0),
            )
            .optional()
            .map_err(Into::into)
    }

    // =========================================================================
    // Audit log
    // =========================================================================

    /// Append an entry to the audit log.
    pub fn insert_audit_entry(&self, entry: &AdminAuditEntry) -> DbResult<()> {
        let details = serde_json::to_string(&entry.details)?;
        self.conn.execute(
            r#"
            INSERT INTO admin_audit_logs (id, admin_id, action, target_user_id, details, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
            params![
                entry.id,
                entry.admin_id,
                entry.action,
                entry.target_user_id,
                details,
                entry.created_at,
            ],
        )?;
        self.notify(tables::ADMIN_AUDIT_LOGS, ChangeKind::Insert, &entry.id);
        Ok(())
    }

    /// Audit entries written by one admin, oldest first.
    pub fn list_audit_entries(&self, admin_id: &str) -> DbResult<Vec<AdminAuditEntry>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, admin_id, action, target_user_id, details, created_at
            FROM admin_audit_logs
            WHERE admin_id = ?
            ORDER BY created_at, rowid
            "#,
        )?;

        let rows = stmt.query_map([admin_id], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, Option<String>>(3)?,
                row.get::<_, String>(4)?,
                row.get::<_, String>(5)?,
            ))
        })?;

        let mut entries = Vec::new();
        for row in rows {
            let (id, admin_id, action, target_user_id, details, created_at) = row?;
            entries.push(AdminAuditEntry {
                id,
                admin_id,
                action,
                target_user_id,
                details: serde_json::from_str(&details)?,
                created_at,
            });
        }
        Ok(entries)
    }
}
