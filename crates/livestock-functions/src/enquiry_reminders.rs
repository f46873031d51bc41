//! Scheduled job: remind sellers about unanswered enquiries.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use livestock_core::db::PendingEnquiry;
use livestock_core::models::{format_timestamp, Notification};
use livestock_core::Database;

use crate::error::{FunctionError, FunctionResult};

/// Notification kind used for seller reminders.
pub const REMINDER_KIND: &str = "enquiry_reminder";

/// Result of one run.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ReminderSummary {
    /// Candidates found (pending, not yet reminded, old enough)
    pub total_enquiries: usize,
    pub reminders_sent: usize,
}

/// Notify the seller of every pending enquiry older than `min_age_hours`
/// and flag it so it is not reminded again.
///
/// Only the candidate query can fail the run; a failure on one enquiry is
/// logged and the rest still go out.
pub fn run_enquiry_reminders(
    db: &Database,
    now: DateTime<Utc>,
    min_age_hours: i64,
) -> FunctionResult<ReminderSummary> {
    let cutoff = format_timestamp(now - Duration::hours(min_age_hours));
    let candidates = db.list_reminder_candidates(&cutoff)?;

    let mut summary = ReminderSummary {
        total_enquiries: candidates.len(),
        reminders_sent: 0,
    };

    for candidate in &candidates {
        match remind_seller(db, candidate, now) {
            Ok(()) => summary.reminders_sent += 1,
            Err(e) => tracing::warn!(
                enquiry = %candidate.enquiry.id,
                error = %e,
                "failed to send enquiry reminder"
            ),
        }
    }

    tracing::info!(
        total = summary.total_enquiries,
        sent = summary.reminders_sent,
        "enquiry reminder run finished"
    );
    Ok(summary)
}

fn remind_seller(db: &Database, candidate: &PendingEnquiry, now: DateTime<Utc>) -> FunctionResult<()> {
    let seller_id = candidate
        .seller_id
        .as_deref()
        .ok_or_else(|| FunctionError::BadRequest("listing no longer exists".into()))?;
    let title = candidate.listing_title.as_deref().unwrap_or("your listing");

    let mut notification = Notification::new(
        seller_id.to_string(),
        REMINDER_KIND,
        "Pending enquiry reminder".into(),
        format!(
            "You have an unanswered enquiry on \"{}\". Buyers are more likely to purchase when sellers reply quickly.",
            title
        ),
    );
    notification.reference_id = Some(candidate.enquiry.id.clone());
    notification.created_at = format_timestamp(now);

    db.insert_notification(&notification)?;
    db.mark_reminder_sent(&candidate.enquiry.id)?;
    Ok(())
}
