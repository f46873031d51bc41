//! Placeholder farm data feeds.
//!
//! The dashboards show regional disease alerts, local weather and a few
//! sample notifications. Until a real upstream feed exists these come from
//! [`DemoDataSource`]; callers only see the [`FarmDataSource`] trait.

mod generators;

pub use generators::*;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::Notification;

/// Feed errors.
#[derive(Error, Debug)]
pub enum FeedError {
    #[error("Feed unavailable: {0}")]
    Unavailable(String),

    #[error("Invalid coordinates: {0}, {1}")]
    InvalidCoordinates(f64, f64),
}

pub type FeedResult<T> = Result<T, FeedError>;

/// Severity of a regional disease alert. Sorts most severe first.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

/// A regional disease outbreak alert.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiseaseAlert {
    pub id: String,
    pub disease: String,
    pub species: String,
    pub location: String,
    pub severity: Severity,
    pub cases_reported: u32,
    /// Short outlook text
    pub prediction: String,
    pub reported_days_ago: u32,
}

/// Latitude/longitude pair.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> FeedResult<Self> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(FeedError::InvalidCoordinates(latitude, longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }
}

/// Current weather at a location.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeatherReport {
    pub location: Coordinates,
    pub condition: String,
    pub temperature_c: i32,
    pub humidity_percent: u32,
    /// Livestock advisory, present on some reports
    pub alert: Option<String>,
}

/// Source of regional alerts, weather and sample notifications.
pub trait FarmDataSource {
    /// Up to `count` distinct disease alerts, most severe first.
    fn disease_alerts(&mut self, count: usize) -> FeedResult<Vec<DiseaseAlert>>;

    /// Weather at the given location.
    fn weather(&mut self, at: Coordinates) -> FeedResult<WeatherReport>;

    /// Sample notifications for a user.
    fn notifications(&mut self, user_id: &str, count: usize) -> FeedResult<Vec<Notification>>;
}
