//! Domain models for the livestock portal.

mod admin;
mod animal;
mod health;
mod insight;
mod marketplace;

pub use admin::*;
pub use animal::*;
pub use health::*;
pub use insight::*;
pub use marketplace::*;

use chrono::{DateTime, SecondsFormat, Utc};

/// Canonical timestamp text used for every `created_at` column.
///
/// Second precision with a `Z` suffix, so stored timestamps compare correctly
/// as strings.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}

pub(crate) fn timestamp_now() -> String {
    format_timestamp(Utc::now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_timestamp_is_sortable() {
        let earlier = Utc.with_ymd_and_hms(2024, 1, 9, 23, 0, 0).unwrap();
        let later = Utc.with_ymd_and_hms(2024, 1, 10, 1, 0, 0).unwrap();
        assert_eq!(format_timestamp(earlier), "2024-01-09T23:00:00Z");
        assert!(format_timestamp(earlier) < format_timestamp(later));
    }
}
