//! Listing, enquiry and notification operations.

use rusqlite::{params, OptionalExtension, Row};

use super::{tables, Database, DbError, DbResult};
use crate::feed::ChangeKind;
use crate::models::{Enquiry, EnquiryStatus, Listing, Notification};
use crate::validation::Validate;

const ENQUIRY_COLUMNS: &str =
    "e.id, e.listing_id, e.buyer_id, e.message, e.status, e.reminder_sent, e.created_at";

/// A pending enquiry together with the listing it was made on.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingEnquiry {
    pub enquiry: Enquiry,
    /// `None` if the listing row is gone
    pub seller_id: Option<String>,
    pub listing_title: Option<String>,
}

impl Database {
    // =========================================================================
    // Listings
    // =========================================================================

    /// Insert a new listing.
    pub fn insert_listing(&self, listing: &Listing) -> DbResult<()> {
        self.conn.execute(
            r#"
            INSERT INTO listings (id, seller_id, title, status, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                listing.id,
                listing.seller_id,
                listing.title,
                listing.status,
                listing.created_at,
            ],
        )?;
        self.notify(tables::LISTINGS, ChangeKind::Insert, &listing.id);
        Ok(())
    }

    /// Get a listing by ID.
    pub fn get_listing(&self, id: &str) -> DbResult<Option<Listing>> {
        self.conn
            .query_row(
                "SELECT id, seller_id, title, status, created_at FROM listings WHERE id = ?",
                [id],
                |row| {
                    Ok(Listing {
                        id: row.get(0)?,
                        seller_id: row.get(1)?,
                        title: row.get(2)?,
                        status: row.get(3)?,
                        created_at: row.get(4)?,
                    })
                },
            )
            .optional()
            .map_err(Into::into)
    }

    /// Delete a listing. Its enquiries are kept.
    pub fn delete_listing(&self, id: &str) -> DbResult<bool> {
        let rows_affected = self.conn.execute("DELETE FROM listings WHERE id = ?", [id])?;
        if rows_affected > 0 {
            self.notify(tables::LISTINGS, ChangeKind::Delete, id);
        }
        Ok(rows_affected > 0)
    }

    // =========================================================================
    // Enquiries
    // =========================================================================

    /// Insert a new enquiry against an existing listing.
    pub fn insert_enquiry(&self, enquiry: &Enquiry) -> DbResult<()> {
        enquiry.validate()?;
        if self.get_listing(&enquiry.listing_id)?.is_none() {
            return Err(DbError::NotFound(format!("listing {}", enquiry.listing_id)));
        }
        self.conn.execute(
            r#"
            INSERT INTO enquiries (id, listing_id, buyer_id, message, status, reminder_sent, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
            params![
                enquiry.id,
                enquiry.listing_id,
                enquiry.buyer_id,
                enquiry.message,
                enquiry.status.as_str(),
                enquiry.reminder_sent,
                enquiry.created_at,
            ],
        )?;
        self.notify(tables::ENQUIRIES, ChangeKind::Insert, &enquiry.id);
        Ok(())
    }

    /// Get an enquiry by ID.
    pub fn get_enquiry(&self, id: &str) -> DbResult<Option<Enquiry>> {
        let enquiry = self
            .conn
            .query_row(
                &format!("SELECT {} FROM enquiries e WHERE e.id = ?", ENQUIRY_COLUMNS),
                [id],
                enquiry_from_row,
            )
            .optional()?;
        enquiry.transpose()
    }

    /// Move an enquiry to a new status.
    pub fn set_enquiry_status(&self, id: &str, status: EnquiryStatus) -> DbResult<bool> {
        let rows_affected = self.conn.execute(
            "UPDATE enquiries SET status = ? WHERE id = ?",
            params![status.as_str(), id],
        )?;
        if rows_affected > 0 {
            self.notify(tables::ENQUIRIES, ChangeKind::Update, id);
        }
        Ok(rows_affected > 0)
    }

    /// Pending enquiries created before `cutoff` whose seller has not been
    /// reminded yet, oldest first.
    ///
    /// `cutoff` must be in the canonical timestamp format.
    pub fn list_reminder_candidates(&self, cutoff: &str) -> DbResult<Vec<PendingEnquiry>> {
        let mut stmt = self.conn.prepare(&format!(
            r#"
            SELECT {}, l.seller_id, l.title
            FROM enquiries e
            LEFT JOIN listings l ON l.id = e.listing_id
            WHERE e.status = 'pending'
              AND e.reminder_sent = 0
              AND e.created_at < ?1
            ORDER BY e.created_at
            "#,
            ENQUIRY_COLUMNS
        ))?;

        let rows = stmt.query_map([cutoff], |row| {
            let seller_id: Option<String> = row.get(7)?;
            let listing_title: Option<String> = row.get(8)?;
            Ok((enquiry_from_row(row)?, seller_id, listing_title))
        })?;

        let mut pending = Vec::new();
        for row in rows {
            let (enquiry, seller_id, listing_title) = row?;
            pending.push(PendingEnquiry {
                enquiry: enquiry?,
                seller_id,
                listing_title,
            });
        }
        Ok(pending)
    }

    /// Flag an enquiry as reminded. Returns false if it was already flagged
    /// or does not exist.
    pub fn mark_reminder_sent(&self, id: &str) -> DbResult<bool> {
        let rows_affected = self.conn.execute(
            "UPDATE enquiries SET reminder_sent = 1 WHERE id = ? AND reminder_sent = 0",
            [id],
        )?;
        if rows_affected > 0 {
            self.notify(tables::ENQUIRIES, ChangeKind::Update, id);
        }
        Ok(rows_affected > 0)
    }

    // =========================================================================
    // Notifications
    // =========================================================================

    /// Insert a new notification.
    pub fn insert_notification(&self, notification: &Notification) -> DbResult<()> {
        self.conn.execute(
            r#"
            INSERT INTO notifications (id, user_id, title, message, kind, reference_id, read, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
            params![
                notification.id,
                notification.user_id,
                notification.title,
                notification.message,
                notification.kind,
                notification.reference_id,
                notification.read,
                notification.created_at,
            ],
        )?;
        self.notify(tables::NOTIFICATIONS, ChangeKind::Insert, &notification.id);
        Ok(())
    }

    /// List a user's notifications, newest first.
    pub fn list_notifications(&self, user_id: &str) -> DbResult<Vec<Notification>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, user_id, title, message, kind, reference_id, read, created_at
            FROM notifications
            WHERE user_id = ?
            ORDER BY created_at DESC
            "#,
        )?;

        let rows = stmt.query_map([user_id], |row| {
            Ok(Notification {
                id: row.get(0)?,
                user_id: row.get(1)?,
                title: row.get(2)?,
                message: row.get(3)?,
                kind: row.get(4)?,
                reference_id: row.get(5)?,
                read: row.get(6)?,
                created_at: row.get(7)?,
            })
        })?;

        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }
}

/// Read an enquiry from the first seven columns.
///
/// The outer result is a SQLite read error; the inner one an unknown status.
fn enquiry_from_row(row: &Row<'_>) -> rusqlite::Result<DbResult<Enquiry>> {
    let status: String = row.get(4)?;
    let status = match EnquiryStatus::parse(&status) {
        Some(s) => s,
        None => {
            return Ok(Err(DbError::Constraint(format!(
                "unknown enquiry status '{}'",
                status
            ))))
        }
    };
    Ok(Ok(Enquiry {
        id: row.get(0)?,
        listing_id: row.get(1)?,
        buyer_id: row.get(2)?,
        message: row.get(3)?,
        status,
        reminder_sent: row.get(5)?,
        created_at: row.get(6)?,
    }))
}
