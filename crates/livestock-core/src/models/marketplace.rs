//! Marketplace listings, buyer enquiries and user notifications.

use serde::{Deserialize, Serialize};

use super::timestamp_now;

/// An animal or produce listing on the marketplace.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Listing {
    pub id: String,
    /// Farmer selling the listing
    pub seller_id: String,
    pub title: String,
    /// "active", "sold", "withdrawn"
    pub status: String,
    pub created_at: String,
}

impl Listing {
    /// Create a new active listing.
    pub fn new(seller_id: String, title: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            seller_id,
            title,
            status: "active".into(),
            created_at: timestamp_now(),
        }
    }
}

/// Enquiry lifecycle.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EnquiryStatus {
    Pending,
    Responded,
    Closed,
}

impl EnquiryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnquiryStatus::Pending => "pending",
            EnquiryStatus::Responded => "responded",
            EnquiryStatus::Closed => "closed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(EnquiryStatus::Pending),
            "responded" => Some(EnquiryStatus::Responded),
            "closed" => Some(EnquiryStatus::Closed),
            _ => None,
        }
    }
}

/// A buyer's enquiry on a listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Enquiry {
    pub id: String,
    pub listing_id: String,
    pub buyer_id: String,
    pub message: String,
    pub status: EnquiryStatus,
    /// Set once the seller has been reminded; prevents duplicate reminders
    pub reminder_sent: bool,
    pub created_at: String,
}

impl Enquiry {
    /// Create a new pending enquiry.
    pub fn new(listing_id: String, buyer_id: String, message: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            listing_id,
            buyer_id,
            message,
            status: EnquiryStatus::Pending,
            reminder_sent: false,
            created_at: timestamp_now(),
        }
    }
}

/// An in-app notification for a user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Notification {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub message: String,
    /// Notification category (e.g., "enquiry_reminder", "health_alert")
    pub kind: String,
    /// Record the notification points at, if any
    pub reference_id: Option<String>,
    pub read: bool,
    pub created_at: String,
}

impl Notification {
    /// Create a new unread notification.
    pub fn new(user_id: String, kind: &str, title: String, message: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            user_id,
            title,
            message,
            kind: kind.to_string(),
            reference_id: None,
            read: false,
            created_at: timestamp_now(),
        }
    }
}
