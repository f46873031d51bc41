//! Write-path validation.
//!
//! Each check returns the first violated constraint, so the message can be
//! shown to the user as-is.

use thiserror::Error;

use crate::models::{AnimalRecord, Enquiry, HealthRecord, VaccinationRecord};

/// Maximum length of free-text enquiry messages.
pub const MAX_ENQUIRY_MESSAGE_LEN: usize = 1000;

/// A violated write constraint.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

pub type ValidationResult = Result<(), ValidationError>;

/// Records that are checked before being written.
pub trait Validate {
    fn validate(&self) -> ValidationResult;
}

fn required(field: &'static str, value: &str, label: &str) -> ValidationResult {
    if value.trim().is_empty() {
        Err(ValidationError::new(field, format!("{} is required", label)))
    } else {
        Ok(())
    }
}

impl Validate for AnimalRecord {
    fn validate(&self) -> ValidationResult {
        required("owner_id", &self.owner_id, "Owner")?;
        required("name", &self.name, "Animal name")?;
        required("species", &self.species, "Species")?;
        if self.name.chars().count() > 100 {
            return Err(ValidationError::new(
                "name",
                "Animal name must be at most 100 characters",
            ));
        }
        Ok(())
    }
}

impl Validate for VaccinationRecord {
    fn validate(&self) -> ValidationResult {
        required("animal_id", &self.animal_id, "Animal")?;
        required("vaccine_name", &self.vaccine_name, "Vaccine name")?;
        if let (Some(given), Some(next)) = (self.date_administered, self.next_due_date) {
            if next < given {
                return Err(ValidationError::new(
                    "next_due_date",
                    "Next due date cannot be before the date administered",
                ));
            }
        }
        Ok(())
    }
}

impl Validate for HealthRecord {
    fn validate(&self) -> ValidationResult {
        required("animal_id", &self.animal_id, "Animal")?;
        if let Some(next) = self.next_checkup_date {
            if next < self.record_date {
                return Err(ValidationError::new(
                    "next_checkup_date",
                    "Next checkup cannot be before the record date",
                ));
            }
        }
        Ok(())
    }
}

impl Validate for Enquiry {
    fn validate(&self) -> ValidationResult {
        required("listing_id", &self.listing_id, "Listing")?;
        required("buyer_id", &self.buyer_id, "Buyer")?;
        required("message", &self.message, "Message")?;
        if self.message.chars().count() > MAX_ENQUIRY_MESSAGE_LEN {
            return Err(ValidationError::new(
                "message",
                format!("Message must be at most {} characters", MAX_ENQUIRY_MESSAGE_LEN),
            ));
        }
        Ok(())
    }
}
