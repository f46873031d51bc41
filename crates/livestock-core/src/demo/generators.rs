//! Seeded pseudo-random demo feed.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use super::{Coordinates, DiseaseAlert, FarmDataSource, FeedResult, Severity, WeatherReport};
use crate::models::Notification;

/// Chance that a weather report carries an advisory.
pub const WEATHER_ALERT_PROBABILITY: f64 = 0.4;

/// (disease, species, severity)
const DISEASES: &[(&str, &str, Severity)] = &[
    ("Foot and Mouth Disease", "cattle", Severity::Critical),
    ("Lumpy Skin Disease", "cattle", Severity::Critical),
    ("Peste des Petits Ruminants", "goat", Severity::High),
    ("Haemorrhagic Septicaemia", "buffalo", Severity::High),
    ("Avian Influenza", "poultry", Severity::Critical),
    ("Brucellosis", "cattle", Severity::Medium),
    ("Sheep Pox", "sheep", Severity::Medium),
    ("Mastitis", "cattle", Severity::Low),
    ("Enterotoxaemia", "goat", Severity::Medium),
    ("African Swine Fever", "pig", Severity::High),
];

const LOCATIONS: &[&str] = &[
    "Pune, Maharashtra",
    "Nashik, Maharashtra",
    "Anand, Gujarat",
    "Karnal, Haryana",
    "Ludhiana, Punjab",
    "Mysuru, Karnataka",
    "Guntur, Andhra Pradesh",
    "Jaipur, Rajasthan",
];

const PREDICTIONS: &[&str] = &[
    "Likely to spread to neighbouring districts within 2 weeks",
    "Cases expected to decline after the vaccination drive",
    "Stable; continue routine monitoring",
    "High risk of spread during animal fairs and markets",
    "Seasonal rise expected with humid weather",
];

/// (condition, temperature range °C, humidity range %, advisory)
const CONDITIONS: &[(&str, (i32, i32), (u32, u32), &str)] = &[
    ("Sunny", (28, 38), (20, 45), "Heat stress risk: keep animals shaded and well watered."),
    ("Partly Cloudy", (24, 32), (40, 60), "Good grazing conditions expected through the day."),
    ("Cloudy", (22, 30), (55, 75), "Possible showers: store dry fodder under cover."),
    ("Light Rain", (20, 27), (70, 90), "Wet ground: watch for foot rot and keep sheds dry."),
    ("Thunderstorm", (19, 26), (80, 95), "Storm warning: bring animals indoors and avoid open fields."),
    ("Foggy", (10, 18), (85, 100), "Cold morning: delay grazing until the fog lifts."),
    ("Hot and Humid", (32, 40), (65, 85), "High heat index: provide electrolytes and avoid midday work."),
];

/// (kind, title, message)
const NOTIFICATION_TEMPLATES: &[(&str, &str, &str)] = &[
    ("health_alert", "Health check due", "One of your animals is due for a routine health check."),
    ("vaccination", "Vaccination camp nearby", "A free FMD vaccination camp is scheduled in your block this week."),
    ("marketplace", "New enquiry", "A buyer has enquired about your listing."),
    ("scheme", "New government scheme", "A new subsidy scheme for dairy farmers is open for applications."),
    ("weather", "Weather advisory", "Heavy rain is forecast for your district over the next 48 hours."),
    ("feeding", "Feeding tip", "Add mineral mixture to the daily ration to improve fertility."),
];

/// Demo implementation of [`FarmDataSource`].
pub struct DemoDataSource {
    rng: StdRng,
}

impl DemoDataSource {
    /// Unseeded source (different output every run).
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic source.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Seeded if a seed is given, otherwise from entropy.
    pub fn from_optional_seed(seed: Option<u64>) -> Self {
        seed.map(Self::with_seed).unwrap_or_default()
    }

    /// Draw up to `count` diseases without replacement, most severe first.
    pub fn generate_disease_alerts(&mut self, count: usize) -> Vec<DiseaseAlert> {
        let picked: Vec<&(&str, &str, Severity)> =
            DISEASES.choose_multiple(&mut self.rng, count).collect();

        let mut alerts: Vec<DiseaseAlert> = picked
            .into_iter()
            .enumerate()
            .map(|(i, (disease, species, severity))| DiseaseAlert {
                id: format!("demo-disease-{}", i + 1),
                disease: disease.to_string(),
                species: species.to_string(),
                location: pick(&mut self.rng, LOCATIONS).to_string(),
                severity: *severity,
                cases_reported: self.rng.gen_range(3..=120),
                prediction: pick(&mut self.rng, PREDICTIONS).to_string(),
                reported_days_ago: self.rng.gen_range(0..=14),
            })
            .collect();

        alerts.sort_by_key(|a| a.severity);
        alerts
    }

    /// Weather drawn from the condition table.
    pub fn generate_weather(&mut self, at: Coordinates) -> WeatherReport {
        let (condition, (t_lo, t_hi), (h_lo, h_hi), advisory) = *pick(&mut self.rng, CONDITIONS);
        let alert = self
            .rng
            .gen_bool(WEATHER_ALERT_PROBABILITY)
            .then(|| advisory.to_string());

        WeatherReport {
            location: at,
            condition: condition.to_string(),
            temperature_c: self.rng.gen_range(t_lo..=t_hi),
            humidity_percent: self.rng.gen_range(h_lo..=h_hi),
            alert,
        }
    }

    /// Sample notifications for a user, one template each, no repeats.
    pub fn generate_notifications(&mut self, user_id: &str, count: usize) -> Vec<Notification> {
        NOTIFICATION_TEMPLATES
            .choose_multiple(&mut self.rng, count)
            .map(|(kind, title, message)| {
                let mut n = Notification::new(
                    user_id.to_string(),
                    kind,
                    title.to_string(),
                    message.to_string(),
                );
                n.read = self.rng.gen_bool(0.3);
                n
            })
            .collect()
    }
}

impl Default for DemoDataSource {
    fn default() -> Self {
        Self::new()
    }
}

impl FarmDataSource for DemoDataSource {
    fn disease_alerts(&mut self, count: usize) -> FeedResult<Vec<DiseaseAlert>> {
        Ok(self.generate_disease_alerts(count))
    }

    fn weather(&mut self, at: Coordinates) -> FeedResult<WeatherReport> {
        Ok(self.generate_weather(at))
    }

    fn notifications(&mut self, user_id: &str, count: usize) -> FeedResult<Vec<Notification>> {
        Ok(self.generate_notifications(user_id, count))
    }
}

fn pick<'a, T>(rng: &mut StdRng, items: &'a [T]) -> &'a T {
    // Tables are non-empty constants.
    &items[rng.gen_range(0..items.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn coords() -> Coordinates {
        Coordinates::new(18.52, 73.85).unwrap()
    }

    #[test]
    fn test_disease_alerts_distinct_and_sorted() {
        let mut source = DemoDataSource::with_seed(7);
        let alerts = source.generate_disease_alerts(5);

        assert_eq!(alerts.len(), 5);
        let names: HashSet<&str> = alerts.iter().map(|a| a.disease.as_str()).collect();
        assert_eq!(names.len(), 5);
        assert!(alerts.windows(2).all(|w| w[0].severity <= w[1].severity));
    }

    #[test]
    fn test_disease_alerts_capped_at_catalog() {
        let mut source = DemoDataSource::with_seed(1);
        assert_eq!(source.generate_disease_alerts(100).len(), DISEASES.len());
        assert!(source.generate_disease_alerts(0).is_empty());
    }

    #[test]
    fn test_seeded_output_is_deterministic() {
        let a = DemoDataSource::with_seed(42).generate_disease_alerts(4);
        let b = DemoDataSource::with_seed(42).generate_disease_alerts(4);
        assert_eq!(a, b);

        let w1 = DemoDataSource::with_seed(42).generate_weather(coords());
        let w2 = DemoDataSource::with_seed(42).generate_weather(coords());
        assert_eq!(w1, w2);
    }

    #[test]
    fn test_weather_within_table_bounds() {
        let mut source = DemoDataSource::with_seed(3);
        for _ in 0..200 {
            let report = source.generate_weather(coords());
            let row = CONDITIONS
                .iter()
                .find(|(c, ..)| *c == report.condition)
                .unwrap();
            let ((t_lo, t_hi), (h_lo, h_hi)) = (row.1, row.2);
            assert!((t_lo..=t_hi).contains(&report.temperature_c));
            assert!((h_lo..=h_hi).contains(&report.humidity_percent));
            if let Some(alert) = &report.alert {
                assert_eq!(alert, row.3);
            }
        }
    }

    #[test]
    fn test_weather_alert_rate_roughly_forty_percent() {
        let mut source = DemoDataSource::with_seed(11);
        let with_alert = (0..2000)
            .filter(|_| source.generate_weather(coords()).alert.is_some())
            .count();
        assert!((600..=1000).contains(&with_alert), "got {}", with_alert);
    }

    #[test]
    fn test_notifications_for_user() {
        let mut source = DemoDataSource::with_seed(5);
        let notes = source.notifications("farmer-1", 3).unwrap();
        assert_eq!(notes.len(), 3);
        assert!(notes.iter().all(|n| n.user_id == "farmer-1"));
    }
}
