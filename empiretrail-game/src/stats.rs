//! Player statistics aggregate.
//!
//! One instance lives per active game session, created at game start and
//! updated by the achievement service's event handlers on each qualifying
//! action. It is never reset except on a new game.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::data::PropertyType;

/// Gameplay counters the achievement criteria evaluate.
///
/// Timestamps are Unix milliseconds; money fields are whole dollars;
/// `total_play_time` is whole minutes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlayerStats {
    pub total_properties_purchased: u32,
    pub total_properties_sold: u32,
    pub total_properties_rented: u32,
    pub total_revenue: i64,
    pub total_profit: i64,
    pub total_investment: i64,
    pub current_net_worth: i64,
    pub current_monthly_income: i64,
    /// City names in first-visit order; set semantics, no duplicates.
    pub cities_visited: Vec<String>,
    pub properties_by_type: HashMap<PropertyType, u32>,
    pub properties_by_city: HashMap<String, u32>,
    /// Longest any portfolio property has been held, in months.
    pub longest_property_held: u32,
    /// Quickest buy-to-sell turnaround in months. Starts at infinity until
    /// the first sale; stored as JSON null while non-finite.
    #[serde(with = "non_finite_as_null")]
    pub fastest_flip: f64,
    /// Best single-sale return on investment, in percent.
    pub highest_roi: f64,
    pub consecutive_successful_rolls: u32,
    pub total_dice_rolls: u32,
    pub successful_dice_rolls: u32,
    pub game_start_time: u64,
    pub total_play_time: u64,
}

impl Default for PlayerStats {
    fn default() -> Self {
        Self {
            total_properties_purchased: 0,
            total_properties_sold: 0,
            total_properties_rented: 0,
            total_revenue: 0,
            total_profit: 0,
            total_investment: 0,
            current_net_worth: 0,
            current_monthly_income: 0,
            cities_visited: Vec::new(),
            properties_by_type: HashMap::new(),
            properties_by_city: HashMap::new(),
            longest_property_held: 0,
            fastest_flip: f64::INFINITY,
            highest_roi: 0.0,
            consecutive_successful_rolls: 0,
            total_dice_rolls: 0,
            successful_dice_rolls: 0,
            game_start_time: 0,
            total_play_time: 0,
        }
    }
}

impl PlayerStats {
    /// Fresh, zeroed aggregate stamped with the session start time.
    #[must_use]
    pub fn new(game_start_time: u64) -> Self {
        Self {
            game_start_time,
            ..Self::default()
        }
    }

    /// Whether a city has already been counted as visited.
    #[must_use]
    pub fn has_visited(&self, city: &str) -> bool {
        self.cities_visited.iter().any(|c| c == city)
    }

    /// Count held for one property type.
    #[must_use]
    pub fn count_of_type(&self, ty: PropertyType) -> u32 {
        self.properties_by_type.get(&ty).copied().unwrap_or(0)
    }

    /// Count held in one city.
    #[must_use]
    pub fn count_in_city(&self, city: &str) -> u32 {
        self.properties_by_city.get(city).copied().unwrap_or(0)
    }
}

/// JSON has no representation for infinity, so `fastest_flip` round-trips
/// through null while no flip has happened yet.
mod non_finite_as_null {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_finite() {
            serializer.serialize_f64(*value)
        } else {
            serializer.serialize_none()
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::INFINITY))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_stats_start_zeroed_with_infinite_fastest_flip() {
        let stats = PlayerStats::new(1_000);
        assert_eq!(stats.game_start_time, 1_000);
        assert_eq!(stats.total_properties_purchased, 0);
        assert!(stats.fastest_flip.is_infinite());
        assert!(stats.cities_visited.is_empty());
    }

    #[test]
    fn fastest_flip_roundtrips_through_null() {
        let stats = PlayerStats::new(0);
        let json = serde_json::to_string(&stats).unwrap();
        assert!(json.contains("\"fastestFlip\":null"));
        let back: PlayerStats = serde_json::from_str(&json).unwrap();
        assert!(back.fastest_flip.is_infinite());
    }

    #[test]
    fn finite_fastest_flip_roundtrips_as_number() {
        let mut stats = PlayerStats::new(0);
        stats.fastest_flip = 2.0;
        let json = serde_json::to_string(&stats).unwrap();
        let back: PlayerStats = serde_json::from_str(&json).unwrap();
        assert!((back.fastest_flip - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let back: PlayerStats = serde_json::from_str("{}").unwrap();
        assert_eq!(back, PlayerStats::default());
    }

    #[test]
    fn type_counter_keys_serialize_as_display_names() {
        let mut stats = PlayerStats::new(0);
        stats.properties_by_type.insert(PropertyType::Apartment, 3);
        let json = serde_json::to_string(&stats).unwrap();
        assert!(json.contains("\"Apartment\":3"));
    }
}
